//! Game tuning
//!
//! Every gameplay constant lives here so balance can be adjusted without a
//! rebuild. Persisted as JSON: a file on native, LocalStorage on the web.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a tuning file can be rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("{name} must be within [0, 1], got {value}")]
    ChanceOutOfRange { name: &'static str, value: f32 },
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("double jump ({double}) must be higher than single jump ({single})")]
    JumpOrder { single: f32, double: f32 },
    #[error("failed to read tuning: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning: {0}")]
    Json(#[from] serde_json::Error),
}

/// Jump arc parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpTuning {
    /// Offset held during a single jump
    pub single_height: f32,
    /// Time from a single jump until landing (D1)
    pub single_ms: u64,
    /// Offset held during a double jump
    pub double_height: f32,
    /// Time from the double-jump trigger until landing (D2)
    pub double_ms: u64,
    /// A second trigger within this long after the first escalates (W)
    pub window_ms: u64,
}

impl Default for JumpTuning {
    fn default() -> Self {
        Self {
            single_height: SINGLE_JUMP_HEIGHT,
            single_ms: SINGLE_JUMP_MS,
            double_height: DOUBLE_JUMP_HEIGHT,
            double_ms: DOUBLE_JUMP_MS,
            window_ms: DOUBLE_JUMP_WINDOW_MS,
        }
    }
}

/// Game tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Cadence ===
    pub tick_interval_ms: u64,
    pub max_ticks_per_pump: u32,
    /// World scroll per tick (background and entities alike)
    pub scroll_speed: f32,

    // === Bounding boxes ===
    pub character_size: f32,
    pub obstacle_size: f32,
    pub collectible_size: f32,

    // === Spawning ===
    pub obstacle_chance: f32,
    pub collectible_chance: f32,
    pub spawn_margin: f32,
    pub low_lane: f32,
    pub high_lane: f32,

    pub jump: JumpTuning,

    // === Background tile source image ===
    pub background_width: f32,
    pub background_height: f32,

    /// Fixed spawner seed. `None` draws one from OS entropy per session.
    pub seed: Option<u64>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            tick_interval_ms: TICK_INTERVAL_MS,
            max_ticks_per_pump: MAX_TICKS_PER_PUMP,
            scroll_speed: SCROLL_SPEED,

            character_size: CHARACTER_SIZE,
            obstacle_size: OBSTACLE_SIZE,
            collectible_size: COLLECTIBLE_SIZE,

            obstacle_chance: OBSTACLE_CHANCE,
            collectible_chance: COLLECTIBLE_CHANCE,
            spawn_margin: SPAWN_MARGIN,
            low_lane: LOW_LANE,
            high_lane: HIGH_LANE,

            jump: JumpTuning::default(),

            background_width: BACKGROUND_WIDTH,
            background_height: BACKGROUND_HEIGHT,

            seed: None,
        }
    }
}

impl Tuning {
    /// Same tuning sized for a different field
    pub fn for_field(width: f32, height: f32) -> Self {
        Self {
            field_width: width,
            field_height: height,
            ..Self::default()
        }
    }

    /// Copy with both spawn chances zeroed (scripted scenarios)
    pub fn without_spawns(mut self) -> Self {
        self.obstacle_chance = 0.0;
        self.collectible_chance = 0.0;
        self
    }

    /// Horizontal position of the character's left edge
    pub fn character_x(&self) -> f32 {
        self.field_width * CHARACTER_X_FRACTION
    }

    /// Width of one background tile once scaled to the field height
    pub fn tile_width(&self) -> f32 {
        self.background_width * (self.field_height / self.background_height)
    }

    /// Check every value for sanity
    pub fn validate(&self) -> Result<(), TuningError> {
        for (name, value) in [
            ("obstacle_chance", self.obstacle_chance),
            ("collectible_chance", self.collectible_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::ChanceOutOfRange { name, value });
            }
        }

        for (name, value) in [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("scroll_speed", self.scroll_speed),
            ("character_size", self.character_size),
            ("obstacle_size", self.obstacle_size),
            ("collectible_size", self.collectible_size),
            ("background_width", self.background_width),
            ("background_height", self.background_height),
            ("jump.single_height", self.jump.single_height),
            ("tick_interval_ms", self.tick_interval_ms as f32),
            ("max_ticks_per_pump", self.max_ticks_per_pump as f32),
            ("jump.single_ms", self.jump.single_ms as f32),
            ("jump.double_ms", self.jump.double_ms as f32),
            ("jump.window_ms", self.jump.window_ms as f32),
        ] {
            // NaN fails this comparison too
            if !(value > 0.0) {
                return Err(TuningError::NotPositive { name, value });
            }
        }

        for (name, value) in [
            ("low_lane", self.low_lane),
            ("high_lane", self.high_lane),
            ("spawn_margin", self.spawn_margin),
        ] {
            if !(value >= 0.0) {
                return Err(TuningError::Negative { name, value });
            }
        }

        if self.jump.double_height <= self.jump.single_height {
            return Err(TuningError::JumpOrder {
                single: self.jump.single_height,
                double: self.jump.double_height,
            });
        }

        Ok(())
    }

    /// Parse and validate tuning JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "hen_hop_tuning";

    /// Read tuning from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn try_load_from(path: &std::path::Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Read tuning from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match Self::try_load_from(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Using default tuning ({})", e);
                Self::default()
            }
        }
    }

    /// Write tuning to a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), TuningError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Tuning saved to {}", path.display());
        Ok(())
    }

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning ({})", e),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }
}
