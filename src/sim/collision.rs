//! Collision and pickup detection
//!
//! Both checks are plain box overlaps against the player. The obstacle
//! check only reports; consuming the shield and removing the obstacle is
//! up to the caller.

use glam::Vec3;

use super::aabb::Aabb;
use super::state::{Collectible, Obstacle};

/// Result of checking the player against obstacles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    NoCollision,
    /// Fatal hit
    Collision { obstacle_id: u32 },
    /// Hit while shielded; the shield should be spent
    ShieldAbsorbed { obstacle_id: u32 },
}

impl CollisionOutcome {
    pub fn is_hit(&self) -> bool {
        !matches!(self, CollisionOutcome::NoCollision)
    }
}

/// Check the player box against every obstacle. The first overlap in spawn
/// order wins.
///
/// `travel` is how far obstacles scrolled this step. Each obstacle box is
/// stretched back over that distance so a fast step cannot carry it through
/// the player between two samples. With `travel == 0` this is a plain
/// overlap test.
pub fn check_obstacles(
    player: &Aabb,
    obstacles: &[Obstacle],
    shield_active: bool,
    travel: f32,
) -> CollisionOutcome {
    let travel = travel.max(0.0);
    let Some(hit) = obstacles.iter().find(|o| player.overlaps(&swept(&o.aabb(), travel))) else {
        return CollisionOutcome::NoCollision;
    };

    if shield_active {
        CollisionOutcome::ShieldAbsorbed { obstacle_id: hit.id }
    } else {
        CollisionOutcome::Collision { obstacle_id: hit.id }
    }
}

/// Box covering everything `aabb` passed through while moving `travel` along +z
fn swept(aabb: &Aabb, travel: f32) -> Aabb {
    let stretch = Vec3::new(0.0, 0.0, travel);
    Aabb::new(aabb.center - stretch * 0.5, aabb.size + stretch)
}

/// Lateral pickup slack for the current magnet state
#[inline]
pub fn magnet_slack(magnet_active: bool, magnet_range: f32) -> Vec3 {
    if magnet_active {
        Vec3::new(magnet_range, 0.0, 0.0)
    } else {
        Vec3::ZERO
    }
}

/// Remove and return every collectible overlapping the player, in spawn order.
///
/// With the magnet active the lateral axis is widened by `magnet_range`;
/// height and depth tolerances are unchanged.
pub fn collect_pickups(
    player: &Aabb,
    collectibles: &mut Vec<Collectible>,
    magnet_active: bool,
    magnet_range: f32,
) -> Vec<Collectible> {
    let slack = magnet_slack(magnet_active, magnet_range);
    let mut collected = Vec::new();
    let mut i = 0;
    while i < collectibles.len() {
        if player.overlaps_with_slack(&collectibles[i].aabb(), slack) {
            collected.push(collectibles.remove(i));
        } else {
            i += 1;
        }
    }
    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{CollectibleKind, ObstacleKind};
    use crate::size_vec;

    fn player_box(x: f32) -> Aabb {
        Aabb::new(Vec3::new(x, GROUND_Y, 0.0), size_vec(PLAYER_SIZE))
    }

    fn obstacle(id: u32, x: f32, z: f32) -> Obstacle {
        Obstacle { id, kind: ObstacleKind::Barrier, pos: Vec3::new(x, OBSTACLE_Y, z) }
    }

    fn coin(id: u32, x: f32, y: f32) -> Collectible {
        Collectible::new(id, CollectibleKind::Coin, x, y, 0.0, 0.0)
    }

    #[test]
    fn test_same_lane_same_depth_is_fatal() {
        let obstacles = vec![obstacle(1, 0.0, 0.0)];
        let outcome = check_obstacles(&player_box(0.0), &obstacles, false, 0.0);
        assert_eq!(outcome, CollisionOutcome::Collision { obstacle_id: 1 });
    }

    #[test]
    fn test_shield_absorbs() {
        let obstacles = vec![obstacle(1, 0.0, 0.0)];
        let outcome = check_obstacles(&player_box(0.0), &obstacles, true, 0.0);
        assert_eq!(outcome, CollisionOutcome::ShieldAbsorbed { obstacle_id: 1 });
    }

    #[test]
    fn test_other_lane_or_far_ahead_misses() {
        let obstacles = vec![obstacle(1, 4.0, 0.0), obstacle(2, 0.0, -10.0)];
        let outcome = check_obstacles(&player_box(0.0), &obstacles, false, 0.0);
        assert_eq!(outcome, CollisionOutcome::NoCollision);
        assert!(!outcome.is_hit());
    }

    #[test]
    fn test_first_in_spawn_order_wins() {
        let obstacles = vec![obstacle(7, 0.0, 0.1), obstacle(3, 0.0, 0.0)];
        let outcome = check_obstacles(&player_box(0.0), &obstacles, false, 0.0);
        assert_eq!(outcome, CollisionOutcome::Collision { obstacle_id: 7 });
    }

    #[test]
    fn test_jumping_clears_obstacle() {
        let obstacles = vec![obstacle(1, 0.0, 0.0)];
        // Barrier top is at 1.6; player bottom at 3.0 - 1.0 = 2.0
        let player = Aabb::new(Vec3::new(0.0, 3.0, 0.0), size_vec(PLAYER_SIZE));
        assert_eq!(check_obstacles(&player, &obstacles, false, 0.0), CollisionOutcome::NoCollision);
    }

    #[test]
    fn test_fast_step_cannot_skip_an_obstacle() {
        // Barrier moved 1.5 this step (40 u/s at ~27 fps) and is now past the player
        let obstacles = vec![obstacle(1, 0.0, 0.8 + 0.65 + 0.4)];
        let player = player_box(0.0);
        assert_eq!(check_obstacles(&player, &obstacles, false, 0.0), CollisionOutcome::NoCollision);
        assert_eq!(
            check_obstacles(&player, &obstacles, false, 1.5),
            CollisionOutcome::Collision { obstacle_id: 1 }
        );
    }

    #[test]
    fn test_sweep_ignores_obstacles_already_behind() {
        let obstacles = vec![obstacle(1, 0.0, 5.0)];
        let outcome = check_obstacles(&player_box(0.0), &obstacles, false, 1.5);
        assert_eq!(outcome, CollisionOutcome::NoCollision);
    }

    #[test]
    fn test_collects_all_overlapping() {
        let mut collectibles = vec![
            coin(1, 0.0, COLLECTIBLE_Y),
            coin(2, 4.0, COLLECTIBLE_Y),
            coin(3, 0.2, COLLECTIBLE_Y),
        ];
        let collected = collect_pickups(&player_box(0.0), &mut collectibles, false, 4.0);
        let ids: Vec<u32> = collected.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(collectibles.len(), 1);
        assert_eq!(collectibles[0].id, 2);
    }

    #[test]
    fn test_magnet_widens_lateral_reach() {
        // 2.5 units off: outside the 1.0 plain reach, inside the 3.0 magnet reach
        let mut collectibles = vec![coin(1, 2.5, COLLECTIBLE_Y)];
        assert!(collect_pickups(&player_box(0.0), &mut collectibles, false, 4.0).is_empty());
        assert_eq!(collect_pickups(&player_box(0.0), &mut collectibles, true, 4.0).len(), 1);
    }

    #[test]
    fn test_magnet_does_not_reach_high_coins() {
        let mut collectibles = vec![coin(1, 0.0, COLLECTIBLE_JUMP_Y)];
        assert!(collect_pickups(&player_box(0.0), &mut collectibles, true, 4.0).is_empty());
        assert_eq!(collectibles.len(), 1);
    }
}
