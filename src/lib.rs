//! Apple Catch - a small browser arcade game
//!
//! Move the basket left and right to catch falling apples before the round
//! clock runs out.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (arcade physics, round controller, frame driver)
//! - `renderer`: WebGPU rendering pipeline
//! - `input`: Keyboard state tracking
//! - `settings`: Audio/visual preferences
//! - `audio`: Web Audio sound effects and music (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use input::KeyState;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one controller tick per step)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play-field dimensions
    pub const FIELD_WIDTH: f32 = 500.0;
    pub const FIELD_HEIGHT: f32 = 500.0;

    /// Base fall speed (world gravity, units/s²)
    pub const FALL_SPEED: f32 = 300.0;
    /// Added to the fall speed to get the basket's horizontal speed
    pub const PLAYER_SPEED_BONUS: f32 = 50.0;
    /// Apple terminal velocity as a multiple of the fall speed
    pub const MAX_FALL_MULTIPLIER: f32 = 1.25;

    /// Round length
    pub const ROUND_DURATION_MS: f64 = 30_000.0;
    /// Points per caught apple
    pub const CATCH_AWARD: u32 = 100;
    /// Final score needed to win (inclusive)
    pub const WIN_THRESHOLD: u32 = 1000;

    /// Basket sprite size
    pub const PLAYER_WIDTH: f32 = 100.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    /// Gap between the basket's top edge and the field bottom
    pub const PLAYER_LIFT: f32 = 100.0;

    /// Apple sprite size
    pub const TARGET_WIDTH: f32 = 32.0;
    pub const TARGET_HEIGHT: f32 = 36.0;

    /// Particle burst
    pub const EMITTER_SPEED: f32 = 100.0;
    pub const EMITTER_GRAVITY_OFFSET: f32 = 200.0; // subtracted from FALL_SPEED
    pub const EMITTER_SCALE: f32 = 0.04;
    pub const EMITTER_DURATION_MS: f32 = 90.0;
    pub const PARTICLE_LIFESPAN_MS: f32 = 1000.0;
    pub const MAX_PARTICLES: usize = 64;

    /// Volumes
    pub const CATCH_VOLUME: f32 = 0.15;
    pub const MUSIC_VOLUME: f32 = 0.2;
}
