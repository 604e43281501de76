//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod body;
pub mod config;
pub mod particles;
pub mod round;
pub mod tick;
pub mod timer;
pub mod world;

pub use body::{Aabb, Body};
pub use config::RoundConfig;
pub use particles::{Emitter, Particle};
pub use round::{
    Outcome, RoundController, RoundHost, RoundPhase, RoundResult, RoundSignal, Sound, TickInput,
    score_text, time_text,
};
pub use tick::tick;
pub use timer::DelayedCall;
pub use world::{ArcadeWorld, OverlapWatcher};
