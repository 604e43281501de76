//! Arcade physics world
//!
//! Owns the two bodies (basket and apple), the catch emitter and the seeded
//! RNG. Provides what the round controller expects from an engine: gravity,
//! per-body velocity caps, world-bounds clamping, particle bursts and an
//! overlap watcher that reports each new overlap once.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::body::{Aabb, Body};
use super::config::RoundConfig;
use super::particles::Emitter;

/// Edge-triggered overlap detector.
///
/// Reports `true` only on the step where two boxes start overlapping. The
/// same overlap must end before it can fire again.
#[derive(Debug, Clone, Default)]
pub struct OverlapWatcher {
    overlapping: bool,
}

impl OverlapWatcher {
    pub fn check(&mut self, a: &Aabb, b: &Aabb) -> bool {
        let now = a.intersects(b);
        let entered = now && !self.overlapping;
        self.overlapping = now;
        entered
    }

    /// Forget the current overlap (after a body is teleported away)
    pub fn reset(&mut self) {
        self.overlapping = false;
    }
}

pub struct ArcadeWorld {
    pub bounds: Vec2,
    pub gravity: f32,
    /// The basket
    pub player: Body,
    /// The falling apple
    pub target: Body,
    pub emitter: Emitter,
    watcher: OverlapWatcher,
    rng: Pcg32,
}

impl ArcadeWorld {
    /// Build the basket and apple for a fresh round
    pub fn new(config: &RoundConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);

        let mut player = Body::new(config.player_start(), config.player_size);
        player.allow_gravity = false;
        player.immovable = true;
        player.collide_world_bounds = true;
        let (hitbox_size, hitbox_offset) = config.player_hitbox();
        player.set_hitbox(hitbox_size, hitbox_offset);

        let target_x = random_x(&mut rng, config.target_x_range());
        let mut target = Body::new(Vec2::new(target_x, 0.0), config.target_size);
        target.max_velocity = Some(Vec2::new(0.0, config.max_fall_speed()));

        let follow_offset = config.player_size / 10.0;
        let emitter = Emitter::new(config.emitter_gravity(), follow_offset);

        Self {
            bounds: config.field_size(),
            gravity: config.fall_speed,
            player,
            target,
            emitter,
            watcher: OverlapWatcher::default(),
            rng,
        }
    }

    /// Uniform X in `[0, field_width - target_width)`
    pub fn random_target_x(&mut self) -> f32 {
        let range = (self.bounds.x - self.target.size.x).max(0.0);
        random_x(&mut self.rng, range)
    }

    /// Move the apple back to the top at a fresh random X. Velocity is kept.
    pub fn respawn_target(&mut self) {
        let x = self.random_target_x();
        self.target.pos = Vec2::new(x, 0.0);
        self.watcher.reset();
    }

    /// Advance physics one step. Returns true if basket and apple just
    /// started overlapping.
    pub fn step(&mut self, dt: f32) -> bool {
        for body in [&mut self.player, &mut self.target] {
            body.integrate(dt, self.gravity);
            if body.collide_world_bounds {
                body.clamp_to(self.bounds);
            }
        }

        self.emitter.update(dt, self.player.pos, &mut self.rng);

        self.watcher
            .check(&self.player.hitbox(), &self.target.hitbox())
    }
}

fn random_x(rng: &mut Pcg32, range: f32) -> f32 {
    if range <= 0.0 {
        0.0
    } else {
        rng.random_range(0.0..range).floor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_world_setup() {
        let config = RoundConfig::default();
        let world = ArcadeWorld::new(&config, 42);

        assert!(!world.player.allow_gravity);
        assert!(world.player.immovable);
        assert!(world.player.collide_world_bounds);
        assert_eq!(world.player.hitbox().size(), Vec2::new(75.0, 30.0));

        assert_eq!(world.target.pos.y, 0.0);
        assert!(world.target.pos.x >= 0.0);
        assert!(world.target.pos.x < config.target_x_range());
        assert_eq!(world.target.max_velocity, Some(Vec2::new(0.0, 375.0)));
    }

    #[test]
    fn test_apple_falls_basket_does_not() {
        let mut world = ArcadeWorld::new(&RoundConfig::default(), 42);
        let basket_y = world.player.pos.y;

        for _ in 0..30 {
            world.step(DT);
        }
        assert!(world.target.pos.y > 0.0);
        assert!(world.target.vel.y > 0.0);
        assert_eq!(world.player.pos.y, basket_y);
    }

    #[test]
    fn test_basket_clamped_to_field() {
        let mut world = ArcadeWorld::new(&RoundConfig::default(), 42);
        world.player.vel.x = -350.0;
        for _ in 0..120 {
            world.step(DT);
        }
        assert_eq!(world.player.hitbox().min.x, 0.0);

        world.player.vel.x = 350.0;
        for _ in 0..240 {
            world.player.vel.x = 350.0;
            world.step(DT);
        }
        assert_eq!(world.player.hitbox().max.x, 500.0);
    }

    #[test]
    fn test_overlap_reported_once() {
        let mut world = ArcadeWorld::new(&RoundConfig::default(), 42);
        world.target.allow_gravity = false;
        // Park the apple inside the basket's hit-box
        world.target.pos = world.player.hitbox().min + Vec2::new(5.0, 2.0);

        assert!(world.step(DT));
        assert!(!world.step(DT));
        assert!(!world.step(DT));

        // Leave and come back
        world.target.pos = Vec2::new(0.0, 0.0);
        assert!(!world.step(DT));
        world.target.pos = world.player.hitbox().min + Vec2::new(5.0, 2.0);
        assert!(world.step(DT));
    }

    #[test]
    fn test_respawn_keeps_velocity() {
        let mut world = ArcadeWorld::new(&RoundConfig::default(), 9);
        world.target.pos.y = 480.0;
        world.target.vel.y = 375.0;

        world.respawn_target();
        assert_eq!(world.target.pos.y, 0.0);
        assert_eq!(world.target.vel.y, 375.0);
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let config = RoundConfig::default();
        let mut a = ArcadeWorld::new(&config, 1234);
        let mut b = ArcadeWorld::new(&config, 1234);
        for _ in 0..20 {
            assert_eq!(a.random_target_x(), b.random_target_x());
        }
    }

    #[test]
    fn test_zero_width_range() {
        let config = RoundConfig {
            field_width: 20.0,
            ..RoundConfig::default()
        };
        let mut world = ArcadeWorld::new(&config, 5);
        assert_eq!(world.random_target_x(), 0.0);
    }
}
