//! Per-tick entity spawning
//!
//! Two independent Bernoulli draws per tick, one for obstacles and one for
//! collectibles. No cooldown and no minimum gap: clumps are part of the game.

use super::rng::RandomSource;
use super::state::{CollectibleVariant, Geometry, Lane, ObstacleVariant};
use super::world::World;
use crate::settings::Tuning;

/// What a spawner tick produced (ids of new entities)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Spawned {
    pub obstacle: Option<u32>,
    pub collectible: Option<u32>,
}

/// Spawn chances and lane layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spawner {
    pub obstacle_chance: f32,
    pub collectible_chance: f32,
    pub low_lane: f32,
    pub high_lane: f32,
}

impl Spawner {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            obstacle_chance: tuning.obstacle_chance,
            collectible_chance: tuning.collectible_chance,
            low_lane: tuning.low_lane,
            high_lane: tuning.high_lane,
        }
    }

    /// Maybe append one obstacle and/or one collectible at the spawn line
    pub fn tick(
        &self,
        world: &mut World,
        geometry: &Geometry,
        rng: &mut impl RandomSource,
    ) -> Spawned {
        let mut spawned = Spawned::default();

        if rng.next_unit() < self.obstacle_chance {
            let variant = if coin(rng) {
                ObstacleVariant::Box
            } else {
                ObstacleVariant::Rock
            };
            let id = world.place_obstacle(geometry.spawn_x, variant);
            log::trace!("spawned obstacle {} ({:?})", id, variant);
            spawned.obstacle = Some(id);
        }

        if rng.next_unit() < self.collectible_chance {
            let (lane, y) = if coin(rng) {
                (Lane::Low, self.low_lane)
            } else {
                (Lane::High, self.high_lane)
            };
            let variant = if coin(rng) {
                CollectibleVariant::Grain
            } else {
                CollectibleVariant::Egg
            };
            let id = world.place_collectible(geometry.spawn_x, y, lane, variant);
            log::trace!("spawned collectible {} ({:?} in {:?} lane)", id, variant, lane);
            spawned.collectible = Some(id);
        }

        spawned
    }
}

/// Fair coin flip
#[inline]
fn coin(rng: &mut impl RandomSource) -> bool {
    rng.next_unit() > 0.5
}
