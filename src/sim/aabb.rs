//! Axis-aligned bounding boxes for spatial entities
//!
//! Every entity in the world is a center position plus a full-size box.
//! Overlap is tested per axis against the sum of half extents:
//! - x: lateral (lane axis)
//! - y: vertical
//! - z: depth (negative is ahead of the player)

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A box centered on `center` with full extents `size`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Center of the box in world space
    pub center: Vec3,
    /// Full width/height/depth
    pub size: Vec3,
}

impl Aabb {
    pub fn new(center: Vec3, size: Vec3) -> Self {
        Self { center, size }
    }

    /// Half of each extent
    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        self.size * 0.5
    }

    #[inline]
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents()
    }

    #[inline]
    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents()
    }

    /// Strict overlap on all three axes (touching faces do not count)
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.overlaps_with_slack(other, Vec3::ZERO)
    }

    /// Overlap test with the combined extents widened by `slack` on each axis
    ///
    /// `slack` is added to the full-size sum before halving, so a slack of 4
    /// on x accepts centers up to 2 units further apart laterally.
    pub fn overlaps_with_slack(&self, other: &Aabb, slack: Vec3) -> bool {
        let delta = (self.center - other.center).abs();
        let reach = (self.size + other.size + slack) * 0.5;
        delta.x < reach.x && delta.y < reach.y && delta.z < reach.z
    }

    /// Same box moved to a new center
    pub fn at(&self, center: Vec3) -> Self {
        Self { center, size: self.size }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_at(x: f32, y: f32, z: f32) -> Aabb {
        Aabb::new(Vec3::new(x, y, z), Vec3::ONE)
    }

    #[test]
    fn test_min_max() {
        let b = Aabb::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(2.0, 2.0, 0.8));
        assert_eq!(b.min(), Vec3::new(-1.0, 0.0, -0.4));
        assert_eq!(b.max(), Vec3::new(1.0, 2.0, 0.4));
    }

    #[test]
    fn test_overlap_requires_all_axes() {
        let a = unit_at(0.0, 0.0, 0.0);
        assert!(a.overlaps(&unit_at(0.5, 0.5, 0.5)));
        // Separated on any single axis means no overlap
        assert!(!a.overlaps(&unit_at(1.5, 0.0, 0.0)));
        assert!(!a.overlaps(&unit_at(0.0, 1.5, 0.0)));
        assert!(!a.overlaps(&unit_at(0.0, 0.0, 1.5)));
    }

    #[test]
    fn test_touching_faces_do_not_overlap() {
        let a = unit_at(0.0, 0.0, 0.0);
        assert!(!a.overlaps(&unit_at(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_lateral_slack_widens_only_x() {
        let a = unit_at(0.0, 0.0, 0.0);
        let b = unit_at(2.5, 0.0, 0.0);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps_with_slack(&b, Vec3::new(4.0, 0.0, 0.0)));

        // Slack on x does nothing for a vertical miss
        let c = unit_at(0.0, 1.5, 0.0);
        assert!(!a.overlaps_with_slack(&c, Vec3::new(4.0, 0.0, 0.0)));
    }
}
