//! Round configuration
//!
//! Everything the round controller reads at initialization. Defaults come
//! from [`crate::consts`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Round configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundConfig {
    pub field_width: f32,
    pub field_height: f32,
    /// Base fall speed; world gravity and the source of player/target speeds
    pub fall_speed: f32,
    pub round_duration_ms: f64,
    pub catch_award: u32,
    pub win_threshold: u32,
    pub player_size: Vec2,
    pub target_size: Vec2,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            fall_speed: FALL_SPEED,
            round_duration_ms: ROUND_DURATION_MS,
            catch_award: CATCH_AWARD,
            win_threshold: WIN_THRESHOLD,
            player_size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            target_size: Vec2::new(TARGET_WIDTH, TARGET_HEIGHT),
        }
    }
}

impl RoundConfig {
    pub fn new(field_width: f32, field_height: f32, fall_speed: f32, round_duration_ms: f64) -> Self {
        Self {
            field_width,
            field_height,
            fall_speed,
            round_duration_ms,
            ..Self::default()
        }
    }

    pub fn field_size(&self) -> Vec2 {
        Vec2::new(self.field_width, self.field_height)
    }

    /// Horizontal basket speed
    pub fn player_speed(&self) -> f32 {
        self.fall_speed + PLAYER_SPEED_BONUS
    }

    /// Apple terminal velocity
    pub fn max_fall_speed(&self) -> f32 {
        self.fall_speed * MAX_FALL_MULTIPLIER
    }

    /// Top-left corner of the basket sprite at round start.
    /// The sprite is anchored at its top-centre.
    pub fn player_start(&self) -> Vec2 {
        Vec2::new(
            self.field_width * 0.5 - self.player_size.x * 0.5,
            self.field_height - PLAYER_LIFT,
        )
    }

    /// Basket hit-box size and offset inside the sprite.
    ///
    /// Three quarters of the width and the bottom half of the height, nudged
    /// right by a tenth of the width.
    pub fn player_hitbox(&self) -> (Vec2, Vec2) {
        let w = self.player_size.x;
        let h = self.player_size.y;
        let size = Vec2::new(w - w / 4.0, h / 2.0);
        let offset = Vec2::new(w / 10.0, h - h / 2.0);
        (size, offset)
    }

    /// Exclusive upper bound for a respawned apple's X
    pub fn target_x_range(&self) -> f32 {
        (self.field_width - self.target_size.x).max(0.0)
    }

    /// Particle gravity for the catch burst
    pub fn emitter_gravity(&self) -> f32 {
        self.fall_speed - EMITTER_GRAVITY_OFFSET
    }
}
