//! Hen Hop - A side-scrolling obstacle-avoidance arcade game
//!
//! Core modules:
//! - `sim`: Fixed-tick simulation (scroll, spawning, jumps, collisions)
//! - `session`: Start/playing/results state machine and frame snapshots
//! - `driver`: Fixed-interval tick cadence
//! - `persistence`: Key-value storage for the best score
//! - `settings`: Data-driven game tuning
//! - `platform`: Browser/native clock

pub mod best_score;
pub mod driver;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use best_score::BestScore;
pub use session::{Frame, Screen, Session};
pub use settings::{Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Fixed tick interval in milliseconds (~60 Hz)
    pub const TICK_INTERVAL_MS: u64 = 16;
    /// Maximum ticks run per pump to prevent spiral of death
    pub const MAX_TICKS_PER_PUMP: u32 = 8;

    /// Visible field defaults (a typical phone held in landscape)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 400.0;

    /// World scroll per tick
    pub const SCROLL_SPEED: f32 = 5.0;

    /// Character sits at this fraction of the field width
    pub const CHARACTER_X_FRACTION: f32 = 0.14;
    pub const CHARACTER_SIZE: f32 = 80.0;
    pub const OBSTACLE_SIZE: f32 = 90.0;
    pub const COLLECTIBLE_SIZE: f32 = 56.0;

    /// Per-tick spawn probabilities
    pub const OBSTACLE_CHANCE: f32 = 0.02;
    pub const COLLECTIBLE_CHANCE: f32 = 0.015;
    /// New entities appear this far past the right edge
    pub const SPAWN_MARGIN: f32 = 30.0;
    /// Collectible lane heights above the ground line
    pub const LOW_LANE: f32 = 45.0;
    pub const HIGH_LANE: f32 = 95.0;

    /// Jump arcs (heights in units, durations in ms)
    pub const SINGLE_JUMP_HEIGHT: f32 = 130.0;
    pub const SINGLE_JUMP_MS: u64 = 420;
    pub const DOUBLE_JUMP_HEIGHT: f32 = 200.0;
    pub const DOUBLE_JUMP_MS: u64 = 500;
    pub const DOUBLE_JUMP_WINDOW_MS: u64 = 300;

    /// Background source image (2150 x 932), scaled to field height
    pub const BACKGROUND_WIDTH: f32 = 2150.0;
    pub const BACKGROUND_HEIGHT: f32 = 932.0;
}
