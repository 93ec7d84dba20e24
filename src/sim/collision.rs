//! Collision detection
//!
//! Two queries per tick:
//! - lethal: axis-aligned box overlap between the character and any obstacle
//! - collection: center-distance test between the character and each
//!   collectible, compared against the mean of the two box sizes

use super::state::{Character, Collectible, Geometry, Obstacle};

/// Strict overlap of two closed spans `(min, max)`
///
/// Spans that only touch at an edge do not overlap.
#[inline]
pub fn spans_overlap(a: (f32, f32), b: (f32, f32)) -> bool {
    a.1 > b.0 && a.0 < b.1
}

/// Does the character at jump `offset` overlap this obstacle?
pub fn hits_obstacle(geometry: &Geometry, offset: f32, obstacle: &Obstacle) -> bool {
    spans_overlap(geometry.character_span_x(), geometry.obstacle_span_x(obstacle))
        && spans_overlap(geometry.character_span_y(offset), geometry.obstacle_span_y())
}

/// First obstacle the character overlaps, if any
///
/// Read-only: calling it twice on the same state gives the same answer.
pub fn lethal_collision<'a>(
    geometry: &Geometry,
    character: &Character,
    obstacles: &'a [Obstacle],
) -> Option<&'a Obstacle> {
    obstacles
        .iter()
        .find(|o| hits_obstacle(geometry, character.offset, o))
}

/// Is this collectible close enough to pick up?
pub fn in_reach(geometry: &Geometry, offset: f32, collectible: &Collectible) -> bool {
    let distance = geometry
        .character_center(offset)
        .distance(geometry.collectible_center(collectible));
    distance < (geometry.character_size + geometry.collectible_size) / 2.0
}

/// Remove every collectible in reach and return their ids
///
/// Every collectible in reach is taken in the same tick; there is no cap.
pub fn collect_in_reach(
    geometry: &Geometry,
    character: &Character,
    collectibles: &mut Vec<Collectible>,
) -> Vec<u32> {
    let mut collected = Vec::new();
    collectibles.retain(|c| {
        if in_reach(geometry, character.offset, c) {
            collected.push(c.id);
            false
        } else {
            true
        }
    });
    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Tuning;
    use crate::sim::state::{CollectibleVariant, JumpPhase, Lane, ObstacleVariant};
    use proptest::prelude::*;

    fn geometry() -> Geometry {
        // character spans x 112..192
        Geometry::from_tuning(&Tuning::default())
    }

    fn obstacle(x: f32) -> Obstacle {
        Obstacle {
            id: 0,
            x,
            variant: ObstacleVariant::Box,
        }
    }

    fn collectible(id: u32, x: f32, y: f32) -> Collectible {
        Collectible {
            id,
            x,
            y,
            lane: Lane::Low,
            variant: CollectibleVariant::Grain,
        }
    }

    fn at_height(offset: f32) -> Character {
        Character {
            offset,
            phase: if offset > 0.0 {
                JumpPhase::Airborne
            } else {
                JumpPhase::Grounded
            },
            ..Character::default()
        }
    }

    #[test]
    fn test_spans_overlap() {
        assert!(spans_overlap((0.0, 10.0), (5.0, 15.0)));
        assert!(spans_overlap((5.0, 15.0), (0.0, 10.0)));
        assert!(spans_overlap((0.0, 10.0), (2.0, 3.0)));
        assert!(!spans_overlap((0.0, 10.0), (10.0, 20.0)));
        assert!(!spans_overlap((10.0, 20.0), (0.0, 10.0)));
        assert!(!spans_overlap((0.0, 10.0), (11.0, 20.0)));
    }

    #[test]
    fn test_grounded_hit() {
        let g = geometry();
        let obstacles = [obstacle(150.0)];
        let hit = lethal_collision(&g, &at_height(0.0), &obstacles);
        assert_eq!(hit.map(|o| o.id), Some(0));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let g = geometry();
        let grounded = at_height(0.0);
        // Obstacle left edge on character right edge
        assert!(lethal_collision(&g, &grounded, &[obstacle(192.0)]).is_none());
        // Obstacle right edge on character left edge
        assert!(lethal_collision(&g, &grounded, &[obstacle(112.0 - 90.0)]).is_none());
        // Nudge either way and it hits
        assert!(lethal_collision(&g, &grounded, &[obstacle(191.9)]).is_some());
        assert!(lethal_collision(&g, &grounded, &[obstacle(22.1)]).is_some());
    }

    #[test]
    fn test_jump_clears_obstacle() {
        let g = geometry();
        let obstacles = [obstacle(150.0)];
        // Feet exactly on top of the obstacle: touching, not overlapping
        assert!(lethal_collision(&g, &at_height(90.0), &obstacles).is_none());
        assert!(lethal_collision(&g, &at_height(130.0), &obstacles).is_none());
        assert!(lethal_collision(&g, &at_height(89.0), &obstacles).is_some());
    }

    #[test]
    fn test_lethal_check_is_idempotent() {
        let g = geometry();
        let character = at_height(40.0);
        let obstacles = [obstacle(500.0), obstacle(120.0)];
        let first = lethal_collision(&g, &character, &obstacles).map(|o| o.x);
        let second = lethal_collision(&g, &character, &obstacles).map(|o| o.x);
        assert_eq!(first, second);
        assert_eq!(first, Some(120.0));
    }

    #[test]
    fn test_reach_low_lane_grounded() {
        let g = geometry();
        // Character center (152, 40); low-lane item centered (152, 73): dy 33
        let item = collectible(0, 124.0, 45.0);
        assert!(in_reach(&g, 0.0, &item));
    }

    #[test]
    fn test_high_lane_needs_a_jump() {
        let g = geometry();
        // Item centered (152, 123): dy 83 grounded, 47 at single-jump height
        let item = collectible(0, 124.0, 95.0);
        assert!(!in_reach(&g, 0.0, &item));
        assert!(in_reach(&g, 130.0, &item));
    }

    #[test]
    fn test_reach_is_strict() {
        let g = geometry();
        // Reach is (80 + 56) / 2 = 68; put the item center exactly 68 to the right
        let item = collectible(0, 152.0 + 68.0 - 28.0, 40.0 - 28.0);
        assert!(!in_reach(&g, 0.0, &item));
        let item = collectible(0, 152.0 + 67.5 - 28.0, 40.0 - 28.0);
        assert!(in_reach(&g, 0.0, &item));
    }

    #[test]
    fn test_collects_all_in_reach() {
        let g = geometry();
        let mut items = vec![
            collectible(0, 124.0, 45.0),
            collectible(1, 600.0, 45.0),
            collectible(2, 140.0, 45.0),
        ];
        let taken = collect_in_reach(&g, &at_height(0.0), &mut items);
        assert_eq!(taken, vec![0, 2]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 1);
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(a0 in -500.0f32..500.0, aw in 0.0f32..200.0, b0 in -500.0f32..500.0, bw in 0.0f32..200.0) {
            let a = (a0, a0 + aw);
            let b = (b0, b0 + bw);
            prop_assert_eq!(spans_overlap(a, b), spans_overlap(b, a));
        }

        #[test]
        fn prop_collection_order_independent(xs in proptest::collection::vec(-100.0f32..900.0, 0..12)) {
            let g = geometry();
            let character = at_height(0.0);
            let forward: Vec<Collectible> = xs.iter().enumerate().map(|(i, &x)| collectible(i as u32, x, 45.0)).collect();
            let mut reversed = forward.clone();
            reversed.reverse();
            let mut forward = forward;

            let mut a = collect_in_reach(&g, &character, &mut forward);
            let mut b = collect_in_reach(&g, &character, &mut reversed);
            a.sort_unstable();
            b.sort_unstable();
            prop_assert_eq!(a, b);
        }
    }
}
