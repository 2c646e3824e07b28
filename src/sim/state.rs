//! Round state and core simulation types

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bounds::TextMetrics;
use super::rng::RandomSource;
use super::router;
use super::spawn::{SpawnPlanner, SpawnSpec};
use super::stats::SessionStats;
use super::word::Word;
use crate::consts::*;
use crate::settings::FontId;
use crate::words::WordSource;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Words are moving and accepting input
    Playing,
    /// Round ended; state is read-only
    GameOver,
}

/// Things that happened during a tick, for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    WordSpawned { id: u32, chained: bool },
    WordCompleted { id: u32, points: u64 },
    /// A reverse-lane word left the screen untyped
    WordEscaped { id: u32, penalty: u64 },
    RoundOver { score: u64 },
}

/// Settings snapshot a round runs with
#[derive(Debug, Clone, PartialEq)]
pub struct RoundConfig {
    /// Speed of new words (pixels/s)
    pub word_speed: f32,
    /// Seconds between spawns
    pub spawn_interval: f32,
    pub linked_words: bool,
    pub randomize_word_sets: bool,
    /// Sets eligible when randomizing (empty = all sets)
    pub word_set_pool: Vec<usize>,
    pub metrics: TextMetrics,
    /// Round font
    pub font: FontId,
    /// Per-word random fonts (empty = always use `font`)
    pub font_pool: Vec<FontId>,
    pub highlight_typing: bool,
    pub history_cap: usize,
    pub screen_width: f32,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            word_speed: BASE_SPEED,
            spawn_interval: WORD_SPAWN_INTERVAL,
            linked_words: true,
            randomize_word_sets: false,
            word_set_pool: Vec::new(),
            metrics: TextMetrics::default(),
            font: FontId::default(),
            font_pool: Vec::new(),
            highlight_typing: true,
            history_cap: MAX_HISTORY_POINTS,
            screen_width: SCREEN_WIDTH,
        }
    }
}

/// Complete state of one round
pub struct GameState {
    /// Round seed (0 when a custom random source was injected)
    pub seed: u64,
    pub phase: GamePhase,
    /// Words on screen, in spawn order
    pub words: Vec<Word>,
    pub stats: SessionStats,
    pub planner: SpawnPlanner,
    pub config: RoundConfig,
    /// Pending events, drained by the front end
    pub events: Vec<GameEvent>,
    rng: Box<dyn RandomSource>,
    next_id: u32,
}

impl GameState {
    /// Create a round driven by a seeded PCG generator
    pub fn new(seed: u64, config: RoundConfig) -> Self {
        let mut state = Self::with_rng(config, Box::new(Pcg32::seed_from_u64(seed)));
        state.seed = seed;
        state
    }

    /// Create a round with an injected random source
    pub fn with_rng(config: RoundConfig, rng: Box<dyn RandomSource>) -> Self {
        Self {
            seed: 0,
            phase: GamePhase::Playing,
            words: Vec::new(),
            stats: SessionStats::new(config.history_cap),
            planner: SpawnPlanner::new(&config),
            config,
            events: Vec::new(),
            rng,
            next_id: 1,
        }
    }

    /// Spawn the opening words
    pub fn start(&mut self, source: &dyn WordSource) {
        for _ in 0..INITIAL_WORDS {
            self.spawn_next(source);
        }
        log::info!("Round started (seed {})", self.seed);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn metrics(&self) -> &TextMetrics {
        &self.config.metrics
    }

    /// Plan and insert the next word
    pub fn spawn_next(&mut self, source: &dyn WordSource) -> u32 {
        let spec = self.planner.plan_next_spawn(
            &self.words,
            self.stats.elapsed,
            self.stats.score,
            source,
            self.rng.as_mut(),
        );
        self.spawn(spec)
    }

    /// Insert a planned word
    pub fn spawn(&mut self, spec: SpawnSpec) -> u32 {
        let id = self.next_entity_id();
        let chained = spec.is_chained();
        let word = spec.into_word(id);
        log::debug!("Spawned word {} {:?}", id, word.display_text());
        self.words.push(word);
        self.events.push(GameEvent::WordSpawned { id, chained });
        id
    }

    /// Insert an already-built word (assigns a fresh id)
    pub fn insert_word(&mut self, mut word: Word) -> u32 {
        word.id = self.next_entity_id();
        let id = word.id;
        self.events.push(GameEvent::WordSpawned {
            id,
            chained: word.is_chained(),
        });
        self.words.push(word);
        id
    }

    /// End the round. Returns false if it had already ended.
    pub fn end_round(&mut self) -> bool {
        if self.phase == GamePhase::GameOver {
            return false;
        }
        self.phase = GamePhase::GameOver;
        self.stats.recompute();
        self.events.push(GameEvent::RoundOver {
            score: self.stats.score,
        });
        log::info!(
            "Round over: score {}, {} words, {:.1} WPM, {:.1}% accuracy",
            self.stats.score,
            self.stats.words_typed,
            self.stats.wpm,
            self.stats.accuracy
        );
        true
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Word currently receiving keystrokes
    pub fn active_target(&self) -> Option<&Word> {
        router::active_target(&self.words).map(|i| &self.words[i])
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::WordBank;
    use glam::Vec2;

    #[test]
    fn test_start_spawns_opening_words() {
        let mut state = GameState::new(42, RoundConfig::default());
        state.start(&WordBank::default());
        assert_eq!(state.words.len(), INITIAL_WORDS);
        let ids: Vec<u32> = state.words.iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(state.words.iter().all(|w| w.pos.x < 0.0));
        let events = state.drain_events();
        assert_eq!(events.len(), INITIAL_WORDS);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_same_seed_same_round() {
        let mut a = GameState::new(7, RoundConfig::default());
        let mut b = GameState::new(7, RoundConfig::default());
        a.start(&WordBank::default());
        b.start(&WordBank::default());
        for (wa, wb) in a.words.iter().zip(&b.words) {
            assert_eq!(wa.kind, wb.kind);
            assert_eq!(wa.pos, wb.pos);
        }
    }

    #[test]
    fn test_end_round_once() {
        let mut state = GameState::new(1, RoundConfig::default());
        assert!(state.end_round());
        assert!(!state.end_round());
        let over: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::RoundOver { .. }))
            .collect();
        assert_eq!(over.len(), 1);
    }

    #[test]
    fn test_insert_word_assigns_id() {
        let mut state = GameState::new(1, RoundConfig::default());
        let id = state.insert_word(Word::simple(99, "cat", Vec2::new(10.0, 200.0), 100.0));
        assert_eq!(id, 1);
        assert_eq!(state.words[0].id, 1);
        assert!(state.active_target().is_none());
    }
}
