//! Fixed-tick simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering,
//! storage, and wall-clock access:
//! - Fixed timestep only; callers pass the tick time in
//! - Randomness only through an injected [`RandomSource`]
//! - Stable iteration order (spawn order, which is id order)

pub mod autopilot;
pub mod collision;
pub mod kinematics;
pub mod rng;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::{collect_in_reach, in_reach, lethal_collision, spans_overlap};
pub use kinematics::{JumpOutcome, land_due, trigger_jump};
pub use rng::{RandomSource, ScriptedSource};
pub use spawner::Spawner;
pub use state::{
    Character, Collectible, CollectibleVariant, GameState, Geometry, JumpPhase, Lane, Obstacle,
    ObstacleVariant,
};
pub use tick::{TickReport, tick};
pub use world::World;
