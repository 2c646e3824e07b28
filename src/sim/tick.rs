//! Per-frame simulation step
//!
//! Order within a tick: input dispatch, clock, movement and
//! reconciliation, spawn decision, stats snapshot.

use super::router::{self, Key};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::MISTAKE_PENALTY;
use crate::words::WordSource;

/// Input gathered since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Keystrokes in the order they were entered
    pub keys: Vec<Key>,
    /// Request to end the round from outside the core
    pub end_round: bool,
}

impl TickInput {
    pub fn from_keys(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Keys for typing `text` (characters outside printable ASCII are dropped)
    pub fn typed(text: &str) -> Self {
        Self::from_keys(text.chars().filter_map(Key::from_char))
    }
}

/// Advance the round by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, source: &dyn WordSource) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    if input.end_round {
        state.end_round();
        return;
    }

    for &key in &input.keys {
        router::route_key(&mut state.words, key);
    }

    state.stats.advance_clock(dt);

    for word in &mut state.words {
        word.advance(dt);
    }
    if reconcile(state) {
        return;
    }

    if state.planner.tick(dt) {
        state.spawn_next(source);
    }

    state.stats.recompute();
    state.stats.sample_history();
}

/// Score finished words, drop escaped ones, and detect the losing condition.
/// Returns true if the round ended.
fn reconcile(state: &mut GameState) -> bool {
    let metrics = state.config.metrics;
    let width = state.config.screen_width;
    let stats = &mut state.stats;
    let events = &mut state.events;
    let mut breached: Option<u32> = None;

    state.words.retain(|word| {
        if word.is_completed() {
            let points =
                stats.record_completion(word.total_chars(), word.mistakes(), word.score_multiplier());
            log::debug!("Word {} completed for {} points", word.id, points);
            events.push(GameEvent::WordCompleted { id: word.id, points });
            return false;
        }
        if word.speed > 0.0 && word.is_offscreen_forward(&metrics, width) {
            breached.get_or_insert(word.id);
            return true;
        }
        if word.speed < 0.0 && word.is_offscreen_any(&metrics, width) {
            stats.apply_penalty(MISTAKE_PENALTY);
            events.push(GameEvent::WordEscaped {
                id: word.id,
                penalty: MISTAKE_PENALTY,
            });
            return false;
        }
        true
    });

    match breached {
        Some(id) => {
            log::info!("Word {id} reached the right edge");
            state.end_round()
        }
        None => false,
    }
}
