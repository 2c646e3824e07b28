//! Word sets the spawner draws from

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::ERROR_WORD;
use crate::persistence;
use crate::sim::RandomSource;

/// Words used when no dictionary could be loaded
pub const DEFAULT_WORDS: [&str; 5] = ["hello", "world", "game", "typing", "monkey"];

/// A single token of printable ASCII, the only text the router can complete
pub fn is_typable(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_graphic())
}

/// A named list of words (one dictionary file)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordSet {
    pub name: String,
    pub words: Vec<String>,
}

impl WordSet {
    pub fn new(name: impl Into<String>, words: Vec<String>) -> Self {
        Self {
            name: name.into(),
            words,
        }
    }

    fn pick(&self, rng: &mut dyn RandomSource) -> Option<String> {
        if self.words.is_empty() {
            return None;
        }
        let index = rng.range_usize(0, self.words.len() - 1);
        self.words.get(index).cloned()
    }
}

/// Source of text for new words. Must be cheap enough to call every frame.
pub trait WordSource {
    /// Random word from the current set, or the `"error"` sentinel
    fn random_word(&self, rng: &mut dyn RandomSource) -> String;

    /// Random word from a specific set (out-of-range indices fall back to set 0)
    fn random_word_from_set(&self, set: usize, rng: &mut dyn RandomSource) -> String;

    fn all_sets(&self) -> &[WordSet];

    fn set_count(&self) -> usize {
        self.all_sets().len()
    }
}

/// In-memory collection of word sets with one selected as current
#[derive(Debug, Clone)]
pub struct WordBank {
    sets: Vec<WordSet>,
    current: usize,
}

impl Default for WordBank {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl WordBank {
    /// Untypable words and then empty sets are dropped; with nothing left
    /// the default set is used
    pub fn new(sets: Vec<WordSet>) -> Self {
        let mut sets: Vec<WordSet> = sets
            .into_iter()
            .map(|mut set| {
                let before = set.words.len();
                set.words.retain(|w| is_typable(w));
                if set.words.len() < before {
                    log::warn!(
                        "Word set {}: dropped {} untypable words",
                        set.name,
                        before - set.words.len()
                    );
                }
                set
            })
            .filter(|s| !s.words.is_empty())
            .collect();
        if sets.is_empty() {
            log::info!("No word sets available, using default words");
            sets.push(WordSet::new(
                "default.txt",
                DEFAULT_WORDS.iter().map(|w| w.to_string()).collect(),
            ));
        }
        Self { sets, current: 0 }
    }

    /// Load every `.txt` file in `dir` as a word set
    pub fn load_dir(dir: &Path) -> Self {
        match persistence::dictionary::load_word_sets(dir) {
            Ok(sets) => Self::new(sets),
            Err(e) => {
                log::warn!("Could not load word sets from {}: {e}", dir.display());
                Self::default()
            }
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.sets.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_set(&self) -> Option<&WordSet> {
        self.sets.get(self.current)
    }

    /// Select the current set; out of range selects set 0
    pub fn set_current(&mut self, index: usize) {
        if index < self.sets.len() {
            self.current = index;
            log::info!("Word set {} selected ({})", index, self.sets[index].name);
        } else {
            log::warn!("Word set {index} out of range, using set 0");
            self.current = 0;
        }
    }
}

impl WordSource for WordBank {
    fn random_word(&self, rng: &mut dyn RandomSource) -> String {
        self.current_set()
            .and_then(|s| s.pick(rng))
            .unwrap_or_else(|| ERROR_WORD.to_string())
    }

    fn random_word_from_set(&self, set: usize, rng: &mut dyn RandomSource) -> String {
        let chosen = self.sets.get(set).or(self.sets.first());
        chosen
            .and_then(|s| s.pick(rng))
            .unwrap_or_else(|| self.random_word(rng))
    }

    fn all_sets(&self) -> &[WordSet] {
        &self.sets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn set(name: &str, words: &[&str]) -> WordSet {
        WordSet::new(name, words.iter().map(|w| w.to_string()).collect())
    }

    #[test]
    fn test_default_bank() {
        let bank = WordBank::new(vec![set("empty.txt", &[])]);
        assert_eq!(bank.set_count(), 1);
        assert_eq!(bank.names(), vec!["default.txt"]);
        let mut rng = Pcg32::seed_from_u64(5);
        let word = bank.random_word(&mut rng);
        assert!(DEFAULT_WORDS.contains(&word.as_str()));
    }

    #[test]
    fn test_untypable_words_dropped() {
        let bank = WordBank::new(vec![
            set("accents.txt", &["café", "naïve"]),
            set("mixed.txt", &["café", "cafe", ""]),
        ]);
        assert_eq!(bank.names(), vec!["mixed.txt"]);
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..10 {
            assert_eq!(bank.random_word(&mut rng), "cafe");
        }
        assert!(is_typable("don't"));
        assert!(!is_typable("two words"));
    }

    #[test]
    fn test_draw_from_specific_set() {
        let bank = WordBank::new(vec![set("a.txt", &["alpha"]), set("b.txt", &["beta"])]);
        let mut rng = Pcg32::seed_from_u64(5);
        assert_eq!(bank.random_word_from_set(1, &mut rng), "beta");
        // Out of range falls back to the first set
        assert_eq!(bank.random_word_from_set(9, &mut rng), "alpha");
    }

    #[test]
    fn test_set_current() {
        let mut bank = WordBank::new(vec![set("a.txt", &["alpha"]), set("b.txt", &["beta"])]);
        let mut rng = Pcg32::seed_from_u64(5);
        bank.set_current(1);
        assert_eq!(bank.random_word(&mut rng), "beta");
        bank.set_current(7);
        assert_eq!(bank.current_index(), 0);
        assert_eq!(bank.random_word(&mut rng), "alpha");
    }
}
