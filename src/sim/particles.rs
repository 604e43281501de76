//! Catch particle burst
//!
//! Visual only. Particles never touch gameplay state.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining life in ms
    pub life_ms: f32,
    pub scale: f32,
}

impl Particle {
    /// 1.0 when fresh, 0.0 when expired
    pub fn life_ratio(&self) -> f32 {
        (self.life_ms / PARTICLE_LIFESPAN_MS).clamp(0.0, 1.0)
    }
}

/// Emitter that follows an anchor and emits for a short window after `start`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Emitter {
    pub speed: f32,
    pub gravity_y: f32,
    pub scale: f32,
    pub duration_ms: f32,
    pub lifespan_ms: f32,
    /// Particles per step while emitting
    pub quantity: u32,
    /// Offset from the anchor's top-left corner
    pub follow_offset: Vec2,
    emit_remaining_ms: f32,
    particles: Vec<Particle>,
}

impl Emitter {
    pub fn new(gravity_y: f32, follow_offset: Vec2) -> Self {
        Self {
            speed: EMITTER_SPEED,
            gravity_y,
            scale: EMITTER_SCALE,
            duration_ms: EMITTER_DURATION_MS,
            lifespan_ms: PARTICLE_LIFESPAN_MS,
            quantity: 1,
            follow_offset,
            emit_remaining_ms: 0.0,
            particles: Vec::with_capacity(MAX_PARTICLES),
        }
    }

    /// Begin (or restart) an emission window
    pub fn start(&mut self) {
        self.emit_remaining_ms = self.duration_ms;
    }

    pub fn is_emitting(&self) -> bool {
        self.emit_remaining_ms > 0.0
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn update(&mut self, dt: f32, anchor: Vec2, rng: &mut impl Rng) {
        let dt_ms = dt * 1000.0;

        if self.is_emitting() {
            let origin = anchor + self.follow_offset;
            for _ in 0..self.quantity {
                if self.particles.len() >= MAX_PARTICLES {
                    break;
                }
                let angle = rng.random_range(0.0..std::f32::consts::TAU);
                self.particles.push(Particle {
                    pos: origin,
                    vel: Vec2::new(angle.cos(), angle.sin()) * self.speed,
                    life_ms: self.lifespan_ms,
                    scale: self.scale,
                });
            }
            self.emit_remaining_ms -= dt_ms;
        }

        for particle in self.particles.iter_mut() {
            particle.vel.y += self.gravity_y * dt;
            particle.pos += particle.vel * dt;
            particle.life_ms -= dt_ms;
        }
        self.particles.retain(|p| p.life_ms > 0.0);
    }
}
