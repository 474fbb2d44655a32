//! Axis-aligned bounding-box collision detection

use glam::Vec2;

use super::state::{Obstacle, Player};

/// Axis-aligned box given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap test: boxes that only share an edge do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x
            && a_max.x > other.min.x
            && self.min.y < b_max.y
            && a_max.y > other.min.y
    }
}

/// Index of the first obstacle overlapping the player, if any
pub fn first_hit(player: &Player, obstacles: &[Obstacle]) -> Option<usize> {
    let bounds = player.bounds();
    obstacles.iter().position(|o| bounds.overlaps(&o.bounds()))
}
