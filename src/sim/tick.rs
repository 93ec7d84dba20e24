//! Fixed timestep simulation tick
//!
//! One tick: scroll the world (which also spawns), check for a crash, then
//! collect. Jump landings are applied by the caller before the tick so the
//! collision passes see one consistent character height.

use super::collision::{collect_in_reach, lethal_collision};
use super::rng::RandomSource;
use super::spawner::{Spawned, Spawner};
use super::state::GameState;

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub spawned: Spawned,
    /// Ids of collectibles picked up this tick
    pub collected: Vec<u32>,
    /// Obstacle that ended the run
    pub crashed_into: Option<u32>,
}

impl TickReport {
    pub fn crashed(&self) -> bool {
        self.crashed_into.is_some()
    }
}

/// Advance the game state by one fixed tick
pub fn tick(state: &mut GameState, spawner: &Spawner, rng: &mut impl RandomSource) -> TickReport {
    state.time_ticks += 1;

    let spawned = state.world.advance(&state.geometry, spawner, rng);

    if let Some(obstacle) =
        lethal_collision(&state.geometry, &state.character, &state.world.obstacles)
    {
        // Score stays frozen; nothing else happens on a crash tick
        return TickReport {
            spawned,
            collected: Vec::new(),
            crashed_into: Some(obstacle.id),
        };
    }

    let collected = collect_in_reach(
        &state.geometry,
        &state.character,
        &mut state.world.collectibles,
    );
    state.score += collected.len() as u32;

    TickReport {
        spawned,
        collected,
        crashed_into: None,
    }
}
