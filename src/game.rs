//! Round lifecycle
//!
//! `Game` owns the collaborators (settings, word sets, leaderboard) and the
//! current round. Front ends queue keys and call `update` with wall-clock
//! deltas; the round runs at the fixed `SIM_DT` step.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::highscores::HighScores;
use crate::settings::Settings;
use crate::sim::{Autopilot, GamePhase, GameState, Key, TickInput, tick};
use crate::words::WordBank;

/// Longest accepted player name
pub const MAX_NAME_LEN: usize = 20;

/// Frame delta clamp (seconds) to avoid a burst of catch-up ticks
const MAX_FRAME_DT: f32 = 0.1;

/// Printable ASCII only, trimmed and capped. None if nothing is left.
pub fn sanitize_player_name(name: &str) -> Option<String> {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .take(MAX_NAME_LEN)
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

pub struct Game {
    pub settings: Settings,
    pub words: WordBank,
    pub high_scores: HighScores,
    /// Types on the player's behalf when set (demo mode)
    pub autopilot: Option<Autopilot>,
    round: Option<GameState>,
    input: TickInput,
    accumulator: f32,
    high_score_eligible: bool,
    submitted: bool,
    rng: Pcg32,
}

impl Game {
    pub fn new(settings: Settings, words: WordBank, high_scores: HighScores, seed: u64) -> Self {
        Self {
            settings,
            words,
            high_scores,
            autopilot: None,
            round: None,
            input: TickInput::default(),
            accumulator: 0.0,
            high_score_eligible: false,
            submitted: false,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Start a fresh round from the current settings. Returns the round seed.
    pub fn start_round(&mut self) -> u64 {
        if !self.settings.randomize_word_sets {
            self.words.set_current(self.settings.primary_word_set());
        }
        let config = self.settings.round_config(&mut self.rng);
        let seed: u64 = self.rng.random();

        let mut state = GameState::new(seed, config);
        state.start(&self.words);
        self.round = Some(state);
        self.input = TickInput::default();
        self.accumulator = 0.0;
        self.high_score_eligible = false;
        self.submitted = false;
        seed
    }

    /// Queue a keystroke for the next tick
    pub fn queue_key(&mut self, key: Key) {
        self.input.keys.push(key);
    }

    /// Queue a raw text-entry code; unsupported codes are ignored
    pub fn queue_code(&mut self, code: u32) {
        if let Some(key) = Key::from_code(code) {
            self.queue_key(key);
        }
    }

    /// Run as many fixed steps as `dt` covers
    pub fn update(&mut self, dt: f32) {
        let Some(state) = self.round.as_mut() else {
            return;
        };
        let was_over = state.is_over();
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            // One-shot input goes to the first substep only
            let mut input = std::mem::take(&mut self.input);
            if let Some(pilot) = self.autopilot.as_mut() {
                input.keys.extend(pilot.next_keys(&state.words, SIM_DT));
            }
            tick(state, &input, SIM_DT, &self.words);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        if !was_over && state.is_over() {
            self.on_round_over();
        }
    }

    /// End the current round early
    pub fn end_round(&mut self) {
        let Some(state) = self.round.as_mut() else {
            return;
        };
        if state.end_round() {
            self.on_round_over();
        }
    }

    fn on_round_over(&mut self) {
        let Some(state) = self.round.as_ref() else {
            return;
        };
        let score = state.stats.score;
        self.high_score_eligible = self.high_scores.qualifies(score);
        if let Some(rank) = self.high_scores.potential_rank(score) {
            log::info!("Score {score} qualifies for rank {rank}");
        }
    }

    pub fn round(&self) -> Option<&GameState> {
        self.round.as_ref()
    }

    pub fn round_mut(&mut self) -> Option<&mut GameState> {
        self.round.as_mut()
    }

    pub fn phase(&self) -> Option<GamePhase> {
        self.round.as_ref().map(|s| s.phase)
    }

    /// Finished round whose score would enter the leaderboard, not yet submitted
    pub fn is_high_score_eligible(&self) -> bool {
        self.high_score_eligible && !self.submitted
    }

    /// Submit the finished round under `name`. Returns the rank achieved.
    /// Only the first valid submission per round is accepted.
    pub fn submit_high_score(&mut self, name: &str) -> Option<usize> {
        if !self.is_high_score_eligible() {
            return None;
        }
        let name = sanitize_player_name(name)?;
        let state = self.round.as_ref()?;
        let rank = self.high_scores.add_entry(
            &name,
            state.stats.score,
            state.stats.history_snapshot(),
        );
        self.submitted = true;
        if let Some(rank) = rank {
            log::info!(
                "High score for {name:?}: {} (rank {rank} of {})",
                state.stats.score,
                self.high_scores.top_entries().len()
            );
        }
        rank
    }
}
