//! Round bookkeeping: score, WPM, accuracy and sampled score history

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::consts::{HISTORY_SAMPLE_INTERVAL, MAX_HISTORY_POINTS};

/// Elapsed time below which rates are not computed
const MIN_ELAPSED: f32 = 0.001;

/// Score at a point in round time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScorePoint {
    /// Seconds since round start
    pub time: f32,
    pub score: u64,
}

/// (chars / 5) per minute, 0 while no meaningful time has passed
pub fn words_per_minute(chars_typed: u32, elapsed: f32) -> f32 {
    if elapsed < MIN_ELAPSED {
        return 0.0;
    }
    ((chars_typed as f32 / 5.0) / (elapsed / 60.0)).max(0.0)
}

/// Share of correct characters in percent; 100 with nothing typed
pub fn accuracy(chars_typed: u32, mistakes: u32) -> f32 {
    let total = chars_typed + mistakes;
    if total == 0 {
        return 100.0;
    }
    (chars_typed as f32 / total as f32 * 100.0).clamp(0.0, 100.0)
}

/// Running statistics for one round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    /// Never below zero
    pub score: u64,
    /// Seconds since round start
    pub elapsed: f32,
    pub words_typed: u32,
    pub chars_typed: u32,
    pub mistakes: u32,
    pub wpm: f32,
    pub accuracy: f32,
    history: VecDeque<ScorePoint>,
    history_cap: usize,
    last_sample: f32,
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new(MAX_HISTORY_POINTS)
    }
}

impl SessionStats {
    pub fn new(history_cap: usize) -> Self {
        Self {
            score: 0,
            elapsed: 0.0,
            words_typed: 0,
            chars_typed: 0,
            mistakes: 0,
            wpm: 0.0,
            accuracy: 100.0,
            history: VecDeque::with_capacity(history_cap.min(MAX_HISTORY_POINTS)),
            history_cap: history_cap.max(1),
            last_sample: 0.0,
        }
    }

    /// Back to a fresh round
    pub fn reset(&mut self) {
        *self = Self::new(self.history_cap);
    }

    pub fn advance_clock(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
    }

    /// Credit a finished word. Returns the points awarded.
    pub fn record_completion(&mut self, chars: usize, mistakes: u32, multiplier: u64) -> u64 {
        let chars = chars as u32;
        let points = chars as u64 * multiplier;
        self.words_typed += 1;
        self.chars_typed += chars;
        self.mistakes += mistakes;
        self.score += points;
        points
    }

    /// A penalty word escaped: lose score (floored at 0) and count a mistake
    pub fn apply_penalty(&mut self, penalty: u64) {
        self.score = self.score.saturating_sub(penalty);
        self.mistakes += 1;
    }

    /// Refresh WPM and accuracy from the counters
    pub fn recompute(&mut self) {
        if self.elapsed < MIN_ELAPSED {
            self.wpm = 0.0;
            self.accuracy = 100.0;
            return;
        }
        self.wpm = words_per_minute(self.chars_typed, self.elapsed);
        self.accuracy = accuracy(self.chars_typed, self.mistakes);
    }

    /// Record a history sample if a full interval has passed since the last one
    pub fn sample_history(&mut self) {
        if self.elapsed - self.last_sample >= HISTORY_SAMPLE_INTERVAL {
            self.last_sample = self.elapsed;
            self.push_sample(ScorePoint {
                time: self.elapsed,
                score: self.score,
            });
        }
    }

    /// Append a sample, evicting the oldest beyond the cap
    pub fn push_sample(&mut self, point: ScorePoint) {
        self.history.push_back(point);
        while self.history.len() > self.history_cap {
            self.history.pop_front();
        }
    }

    pub fn history(&self) -> &VecDeque<ScorePoint> {
        &self.history
    }

    pub fn history_cap(&self) -> usize {
        self.history_cap
    }

    /// Owned copy for high-score submission
    pub fn history_snapshot(&self) -> Vec<ScorePoint> {
        self.history.iter().copied().collect()
    }
}
