//! Arcade physics bodies
//!
//! Axis-aligned boxes with vertical gravity, a per-body velocity cap and an
//! optional world-bounds clamp. No rotation, no separation response.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// True if the boxes share interior area. Touching edges do not count.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// A physics body attached to a sprite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner of the sprite
    pub pos: Vec2,
    /// Sprite size
    pub size: Vec2,
    pub vel: Vec2,
    /// Hit-box offset from the sprite's top-left corner
    pub hitbox_offset: Vec2,
    pub hitbox_size: Vec2,
    /// Per-axis speed cap (absolute value)
    pub max_velocity: Option<Vec2>,
    pub allow_gravity: bool,
    /// Never pushed by other bodies
    pub immovable: bool,
    /// Clamp the hit-box inside the world
    pub collide_world_bounds: bool,
}

impl Body {
    /// Body whose hit-box matches the sprite
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            hitbox_offset: Vec2::ZERO,
            hitbox_size: size,
            max_velocity: None,
            allow_gravity: true,
            immovable: false,
            collide_world_bounds: false,
        }
    }

    /// Resize the hit-box relative to the sprite
    pub fn set_hitbox(&mut self, size: Vec2, offset: Vec2) {
        self.hitbox_size = size;
        self.hitbox_offset = offset;
    }

    pub fn hitbox(&self) -> Aabb {
        Aabb::new(self.pos + self.hitbox_offset, self.hitbox_size)
    }

    /// Apply gravity, clamp velocity, move
    pub fn integrate(&mut self, dt: f32, gravity: f32) {
        if self.allow_gravity {
            self.vel.y += gravity * dt;
        }
        if let Some(max) = self.max_velocity {
            self.vel = self.vel.clamp(-max, max);
        }
        self.pos += self.vel * dt;
    }

    /// Keep the hit-box inside `[0, bounds]`. Velocity into a wall is zeroed.
    pub fn clamp_to(&mut self, bounds: Vec2) {
        let hitbox = self.hitbox();
        let max = (bounds - hitbox.size()).max(Vec2::ZERO);
        let clamped = hitbox.min.clamp(Vec2::ZERO, max);

        if clamped.x != hitbox.min.x {
            self.vel.x = 0.0;
        }
        if clamped.y != hitbox.min.y {
            self.vel.y = 0.0;
        }
        self.pos = clamped - self.hitbox_offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        let c = Aabb::new(Vec2::new(20.0, 0.0), Vec2::new(5.0, 5.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_aabb_touching_edges_do_not_overlap() {
        let a = Aabb::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_gravity_is_capped() {
        let mut body = Body::new(Vec2::ZERO, Vec2::splat(10.0));
        body.max_velocity = Some(Vec2::new(0.0, 375.0));

        for _ in 0..600 {
            body.integrate(1.0 / 60.0, 300.0);
        }
        assert_eq!(body.vel.y, 375.0);
        assert_eq!(body.vel.x, 0.0);
    }

    #[test]
    fn test_no_gravity_body_stays_put() {
        let mut body = Body::new(Vec2::new(50.0, 400.0), Vec2::splat(10.0));
        body.allow_gravity = false;
        body.integrate(0.5, 300.0);
        assert_eq!(body.pos, Vec2::new(50.0, 400.0));
    }

    #[test]
    fn test_clamp_uses_hitbox() {
        let mut body = Body::new(Vec2::new(-50.0, 100.0), Vec2::new(100.0, 60.0));
        body.set_hitbox(Vec2::new(75.0, 30.0), Vec2::new(10.0, 30.0));
        body.vel.x = -350.0;

        body.clamp_to(Vec2::new(500.0, 500.0));
        assert_eq!(body.hitbox().min.x, 0.0);
        assert_eq!(body.pos.x, -10.0);
        assert_eq!(body.vel.x, 0.0);

        body.pos.x = 490.0;
        body.vel.x = 350.0;
        body.clamp_to(Vec2::new(500.0, 500.0));
        assert_eq!(body.hitbox().max.x, 500.0);
        assert_eq!(body.vel.x, 0.0);
    }

    #[test]
    fn test_clamp_inside_bounds_is_noop() {
        let mut body = Body::new(Vec2::new(200.0, 100.0), Vec2::splat(20.0));
        body.vel = Vec2::new(10.0, 0.0);
        body.clamp_to(Vec2::new(500.0, 500.0));
        assert_eq!(body.pos, Vec2::new(200.0, 100.0));
        assert_eq!(body.vel.x, 10.0);
    }
}
