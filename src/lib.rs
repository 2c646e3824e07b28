//! Monkey Typer - a typing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (moving words, typing, spawning, stats)
//! - `words`: Word sets the spawner draws from
//! - `settings`: Player preferences
//! - `highscores`: Leaderboard with per-entry score history
//! - `persistence`: File I/O for the collaborators above
//! - `game`: Round lifecycle tying it all together

pub mod game;
pub mod highscores;
pub mod persistence;
pub mod settings;
pub mod sim;
pub mod words;

pub use game::Game;
pub use highscores::HighScores;
pub use settings::{FontId, InputDisplayStyle, Settings};
pub use words::{WordBank, WordSource};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep for the headless driver (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play area dimensions
    pub const SCREEN_WIDTH: f32 = 1700.0;
    pub const SCREEN_HEIGHT: f32 = 900.0;

    /// Safe vertical band (excludes the HUD at the top and bottom)
    pub const SAFE_TOP: f32 = 100.0;
    pub const SAFE_BOTTOM: f32 = SCREEN_HEIGHT - 150.0;

    /// Word speed at multiplier 1.0 (pixels/s)
    pub const BASE_SPEED: f32 = 100.0;
    /// Seconds between spawns at spawn-rate multiplier 1.0
    pub const WORD_SPAWN_INTERVAL: f32 = 2.0;
    /// Words spawned immediately when a round starts
    pub const INITIAL_WORDS: usize = 3;

    /// Score lost when a reverse-lane word escapes
    pub const MISTAKE_PENALTY: u64 = 5;
    /// Score history samples kept per round
    pub const MAX_HISTORY_POINTS: usize = 1000;
    /// Seconds between score history samples
    pub const HISTORY_SAMPLE_INTERVAL: f32 = 1.0;

    pub const DEFAULT_FONT_SIZE: u32 = 24;

    /// Spawn x for plain words (fully left of the screen)
    pub const SIMPLE_SPAWN_X: f32 = -100.0;
    /// Spawn x for linked chains
    pub const CHAIN_SPAWN_X: f32 = -150.0;
    /// Horizontal gap between chain segments
    pub const CHAIN_SEGMENT_GAP: f32 = 30.0;
    /// Backward anchor shift when a chain segment is finished (cosmetic)
    pub const CHAIN_NUDGE: f32 = -20.0;

    /// Chance a spawn becomes a linked chain (when enabled)
    pub const LINKED_CHANCE: f32 = 0.3;
    pub const MIN_CHAIN_LEN: usize = 2;
    pub const MAX_CHAIN_LEN: usize = 4;
    /// Score needed per extra possible chain segment
    pub const SCORE_PER_CHAIN_STEP: u64 = 30;
    /// Rejection-sampling attempts for vertical placement
    pub const PLACEMENT_ATTEMPTS: usize = 15;

    /// Substituted for empty or sentinel word-source output
    pub const FALLBACK_WORD: &str = "fallback";
    /// Sentinel returned by a word source that has nothing to offer
    pub const ERROR_WORD: &str = "error";
}
