//! Demo-mode typist
//!
//! Plays the round at a fixed typing speed: finishes the current target,
//! otherwise starts on the word closest to the right edge.

use super::router::{self, Key};
use super::word::Word;

#[derive(Debug, Clone)]
pub struct Autopilot {
    chars_per_sec: f32,
    budget: f32,
}

impl Autopilot {
    pub fn new(chars_per_sec: f32) -> Self {
        Self {
            chars_per_sec: chars_per_sec.max(0.0),
            budget: 0.0,
        }
    }

    pub fn chars_per_sec(&self) -> f32 {
        self.chars_per_sec
    }

    /// Keys to send this tick. At most one key per call; unspent budget
    /// carries over but never banks more than one keystroke.
    pub fn next_keys(&mut self, words: &[Word], dt: f32) -> Vec<Key> {
        self.budget = (self.budget + self.chars_per_sec * dt).min(1.0);
        if self.budget < 1.0 {
            return Vec::new();
        }
        match Self::choose_key(words) {
            Some(key) => {
                self.budget -= 1.0;
                vec![key]
            }
            None => Vec::new(),
        }
    }

    fn choose_key(words: &[Word]) -> Option<Key> {
        if let Some(i) = router::active_target(words) {
            let word = &words[i];
            let text = word.display_text();
            let input = word.input();
            let on_track = text
                .get(..input.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(input));
            if !on_track {
                return Some(Key::Backspace);
            }
            return text[input.len()..].chars().next().and_then(Key::from_char);
        }

        let i = router::most_urgent(words, |w| !w.display_text().is_empty())?;
        words[i].display_text().chars().next().and_then(Key::from_char)
    }
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(6.0)
    }
}
