//! Scene assembly: one vertex list per frame

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::settings::Settings;
use crate::sim::{RoundController, RoundHost};

/// Height of the grass strip at the bottom of the field
const GRASS_HEIGHT: f32 = 24.0;

/// Background, basket, apple and catch particles, back to front
pub fn build_scene<H: RoundHost>(round: &RoundController<H>, settings: &Settings) -> Vec<Vertex> {
    let field = round.config().field_size();
    let world = round.world();

    let mut vertices = shapes::gradient_rect(
        Vec2::ZERO,
        Vec2::new(field.x, field.y - GRASS_HEIGHT),
        colors::SKY_TOP,
        colors::SKY_BOTTOM,
    );
    vertices.extend(shapes::rect(
        Vec2::new(0.0, field.y - GRASS_HEIGHT),
        Vec2::new(field.x, GRASS_HEIGHT),
        colors::GRASS,
    ));

    vertices.extend(shapes::basket(world.player.pos, world.player.size));
    vertices.extend(shapes::apple(world.target.pos, world.target.size));

    if settings.particles {
        for particle in round.particles() {
            vertices.extend(shapes::coin(
                particle.pos,
                particle.scale,
                particle.life_ratio(),
            ));
        }
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::round::testing::running_round;

    #[test]
    fn test_particles_respect_settings() {
        let mut round = running_round(1);
        round.on_catch();
        for _ in 0..3 {
            crate::sim::tick(&mut round, &Default::default(), crate::consts::SIM_DT);
        }
        assert!(!round.particles().is_empty());

        let with = build_scene(&round, &Settings::default());
        let without = build_scene(
            &round,
            &Settings {
                particles: false,
                ..Settings::default()
            },
        );
        assert!(with.len() > without.len());
    }
}
