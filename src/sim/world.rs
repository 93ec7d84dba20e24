//! Scrolling world: background offset and entity lists
//!
//! Entities are kept in spawn order, which is also id order.

use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use super::spawner::{Spawned, Spawner};
use super::state::{Collectible, CollectibleVariant, Geometry, Lane, Obstacle, ObstacleVariant};

/// Entities and scroll position for one run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    /// Left edge of the first background tile (<= 0)
    pub scroll_offset: f32,
    pub obstacles: Vec<Obstacle>,
    pub collectibles: Vec<Collectible>,
    next_obstacle_id: u32,
    next_collectible_id: u32,
}

impl World {
    /// Add an obstacle with its left edge at `x`
    pub fn place_obstacle(&mut self, x: f32, variant: ObstacleVariant) -> u32 {
        let id = self.next_obstacle_id;
        self.next_obstacle_id += 1;
        self.obstacles.push(Obstacle { id, x, variant });
        id
    }

    /// Add a collectible with its bottom-left corner at (`x`, `y`)
    pub fn place_collectible(
        &mut self,
        x: f32,
        y: f32,
        lane: Lane,
        variant: CollectibleVariant,
    ) -> u32 {
        let id = self.next_collectible_id;
        self.next_collectible_id += 1;
        self.collectibles.push(Collectible {
            id,
            x,
            y,
            lane,
            variant,
        });
        id
    }

    /// Scroll one tick, drop what left the screen, then spawn
    pub fn advance(
        &mut self,
        geometry: &Geometry,
        spawner: &Spawner,
        rng: &mut impl RandomSource,
    ) -> Spawned {
        let speed = geometry.scroll_speed;

        // Second tile sits at offset + tile_width, so snapping back to 0 is seamless
        let next = self.scroll_offset - speed;
        self.scroll_offset = if next <= -geometry.tile_width { 0.0 } else { next };

        let obstacle_size = geometry.obstacle_size;
        self.obstacles.retain_mut(|o| {
            o.x -= speed;
            o.x + obstacle_size > 0.0
        });

        let collectible_size = geometry.collectible_size;
        self.collectibles.retain_mut(|c| {
            c.x -= speed;
            c.x + collectible_size > 0.0
        });

        spawner.tick(self, geometry, rng)
    }
}
