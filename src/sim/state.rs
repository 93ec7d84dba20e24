//! Game state and core simulation types
//!
//! Everything a single run mutates lives in [`GameState`], which the session
//! owns and lends to the tick. There are no module-level counters or timers.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::kinematics::JumpTimers;
use super::world::World;
use crate::settings::Tuning;

/// Where the character is in its jump arc
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JumpPhase {
    /// On the ground, no jump in progress
    #[default]
    Grounded,
    /// Single jump in progress, double jump still available
    Airborne,
    /// Double jump consumed for this arc
    DoubleJump,
}

/// The player character
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Character {
    /// Height of the character's feet above the ground line (>= 0)
    pub offset: f32,
    pub phase: JumpPhase,
    /// Time of the last single-jump trigger (ms)
    pub last_jump_ms: u64,
    /// Pending landings
    #[serde(skip)]
    pub(crate) timers: JumpTimers,
}

impl Character {
    pub fn is_grounded(&self) -> bool {
        self.phase == JumpPhase::Grounded
    }
}

/// Obstacle look (no gameplay effect)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleVariant {
    Box,
    Rock,
}

/// An obstacle resting on the ground line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub variant: ObstacleVariant,
}

/// Collectible look (no gameplay effect)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleVariant {
    Grain,
    Egg,
}

/// Collectible lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lane {
    Low,
    High,
}

/// A bonus item floating in one of the lanes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    /// Left edge
    pub x: f32,
    /// Bottom edge above the ground line
    pub y: f32,
    pub lane: Lane,
    pub variant: CollectibleVariant,
}

/// Fixed sizes and positions for one run, derived from tuning
///
/// Coordinates are y-up with the ground line at 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub field_width: f32,
    pub character_x: f32,
    pub character_size: f32,
    pub obstacle_size: f32,
    pub collectible_size: f32,
    pub scroll_speed: f32,
    pub tile_width: f32,
    /// Where new entities appear
    pub spawn_x: f32,
}

impl Geometry {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            field_width: tuning.field_width,
            character_x: tuning.character_x(),
            character_size: tuning.character_size,
            obstacle_size: tuning.obstacle_size,
            collectible_size: tuning.collectible_size,
            scroll_speed: tuning.scroll_speed,
            tile_width: tuning.tile_width(),
            spawn_x: tuning.field_width + tuning.spawn_margin,
        }
    }

    /// Character's horizontal span (left, right)
    pub fn character_span_x(&self) -> (f32, f32) {
        (self.character_x, self.character_x + self.character_size)
    }

    /// Character's vertical span (bottom, top) at the given jump offset
    pub fn character_span_y(&self, offset: f32) -> (f32, f32) {
        (offset, offset + self.character_size)
    }

    /// Center of the character's box at the given jump offset
    pub fn character_center(&self, offset: f32) -> Vec2 {
        let half = self.character_size / 2.0;
        Vec2::new(self.character_x + half, offset + half)
    }

    pub fn obstacle_span_x(&self, obstacle: &Obstacle) -> (f32, f32) {
        (obstacle.x, obstacle.x + self.obstacle_size)
    }

    /// Obstacles always sit on the ground line
    pub fn obstacle_span_y(&self) -> (f32, f32) {
        (0.0, self.obstacle_size)
    }

    pub fn collectible_center(&self, collectible: &Collectible) -> Vec2 {
        let half = self.collectible_size / 2.0;
        Vec2::new(collectible.x + half, collectible.y + half)
    }
}

/// Complete state of one run (the simulation context)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub geometry: Geometry,
    pub character: Character,
    pub world: World,
    /// Run score (never decreases during a run)
    pub score: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Fresh run: empty world, grounded character, zero score and ids
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            geometry: Geometry::from_tuning(tuning),
            character: Character::default(),
            world: World::default(),
            score: 0,
            time_ticks: 0,
        }
    }
}
