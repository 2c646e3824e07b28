//! Game settings and preferences
//!
//! Persisted as JSON next to the high scores. The simulation never reads
//! these directly: a `RoundConfig` snapshot is taken when a round starts.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::{self, PersistError};
use crate::sim::{RandomSource, RoundConfig, TextMetrics};

/// Name of the font used when nothing else is configured
pub const DEFAULT_FONT: &str = "PixelTCG.ttf";

/// Handle to a font; resolved by the renderer, opaque to the simulation
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontId(pub String);

impl FontId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FontId {
    fn default() -> Self {
        Self(DEFAULT_FONT.to_string())
    }
}

/// Where the typed input is echoed on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InputDisplayStyle {
    #[default]
    UnderCursor,
    BelowWord,
    Centered,
}

impl InputDisplayStyle {
    pub const ALL: [InputDisplayStyle; 3] = [
        InputDisplayStyle::UnderCursor,
        InputDisplayStyle::BelowWord,
        InputDisplayStyle::Centered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InputDisplayStyle::UnderCursor => "Under Cursor",
            InputDisplayStyle::BelowWord => "Below Word",
            InputDisplayStyle::Centered => "Centered",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace([' ', '_', '-'], "").as_str() {
            "undercursor" | "cursor" => Some(InputDisplayStyle::UnderCursor),
            "belowword" | "below" => Some(InputDisplayStyle::BelowWord),
            "centered" | "center" => Some(InputDisplayStyle::Centered),
            _ => None,
        }
    }

    /// Cycle to the next style (settings screen)
    pub fn next(&self) -> Self {
        match self {
            InputDisplayStyle::UnderCursor => InputDisplayStyle::BelowWord,
            InputDisplayStyle::BelowWord => InputDisplayStyle::Centered,
            InputDisplayStyle::Centered => InputDisplayStyle::UnderCursor,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Pace ===
    /// Multiplies the base word speed
    pub word_speed_multiplier: f32,
    /// Multiplies the spawn rate (divides the spawn interval)
    pub spawn_rate_multiplier: f32,

    // === Typing ===
    /// Highlight the word being typed
    pub highlight_typing: bool,
    pub input_style: InputDisplayStyle,
    /// Allow linked word chains
    pub linked_words: bool,

    // === Fonts ===
    pub font_size: u32,
    /// Font used when randomization is off
    pub font: FontId,
    /// Pick fonts from `randomized_fonts` instead of `font`
    pub randomize_fonts: bool,
    pub randomized_fonts: BTreeSet<FontId>,

    // === Word sets ===
    /// Draw every word from a random eligible set
    pub randomize_word_sets: bool,
    /// Eligible set indices (the first one is used when randomization is off)
    pub word_sets: BTreeSet<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            word_speed_multiplier: 1.0,
            spawn_rate_multiplier: 1.0,

            highlight_typing: true,
            input_style: InputDisplayStyle::UnderCursor,
            linked_words: true,

            font_size: DEFAULT_FONT_SIZE,
            font: FontId::default(),
            randomize_fonts: false,
            randomized_fonts: BTreeSet::new(),

            randomize_word_sets: false,
            word_sets: BTreeSet::new(),
        }
    }
}

impl Settings {
    /// Lowest multiplier accepted for speed and spawn rate
    pub const MIN_MULTIPLIER: f32 = 0.1;

    pub fn effective_word_speed(&self) -> f32 {
        BASE_SPEED * self.word_speed_multiplier.max(Self::MIN_MULTIPLIER)
    }

    pub fn effective_spawn_interval(&self) -> f32 {
        WORD_SPAWN_INTERVAL / self.spawn_rate_multiplier.max(Self::MIN_MULTIPLIER)
    }

    pub fn toggle_randomized_font(&mut self, font: FontId) {
        if !self.randomized_fonts.remove(&font) {
            self.randomized_fonts.insert(font);
        }
    }

    pub fn toggle_word_set(&mut self, index: usize) {
        if !self.word_sets.remove(&index) {
            self.word_sets.insert(index);
        }
    }

    /// Word set to use for a round when set randomization is off
    pub fn primary_word_set(&self) -> usize {
        self.word_sets.first().copied().unwrap_or(0)
    }

    /// Font for a round: explicit, or a random pick from the pool
    pub fn pick_round_font(&self, rng: &mut dyn RandomSource) -> FontId {
        if self.randomize_fonts && !self.randomized_fonts.is_empty() {
            let index = rng.range_usize(0, self.randomized_fonts.len() - 1);
            if let Some(font) = self.randomized_fonts.iter().nth(index) {
                return font.clone();
            }
        }
        self.font.clone()
    }

    /// Snapshot the parts of the settings a round needs
    pub fn round_config(&self, rng: &mut dyn RandomSource) -> RoundConfig {
        let font_pool = if self.randomize_fonts {
            self.randomized_fonts.iter().cloned().collect()
        } else {
            Vec::new()
        };
        RoundConfig {
            word_speed: self.effective_word_speed(),
            spawn_interval: self.effective_spawn_interval(),
            linked_words: self.linked_words,
            randomize_word_sets: self.randomize_word_sets,
            word_set_pool: self.word_sets.iter().copied().collect(),
            metrics: TextMetrics::for_font_size(self.font_size),
            font: self.pick_round_font(rng),
            font_pool,
            highlight_typing: self.highlight_typing,
            ..RoundConfig::default()
        }
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            log::info!("Settings file {} not found, using defaults", path.display());
            return Self::default();
        }
        match persistence::read_json::<Settings>(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Could not load settings ({e}), using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        persistence::write_json(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}
