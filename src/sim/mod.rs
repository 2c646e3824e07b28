//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Randomness only through an injected `RandomSource`
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod bounds;
pub mod rng;
pub mod router;
pub mod spawn;
pub mod state;
pub mod stats;
pub mod tick;
pub mod word;

pub use autopilot::Autopilot;
pub use bounds::{Rect, TextMetrics};
pub use rng::RandomSource;
pub use router::{Key, route_key};
pub use spawn::{SpawnPlanner, SpawnShape, SpawnSpec};
pub use state::{GameEvent, GamePhase, GameState, RoundConfig};
pub use stats::{ScorePoint, SessionStats};
pub use tick::{TickInput, tick};
pub use word::{Chain, SegmentStyle, Word, WordKind};
