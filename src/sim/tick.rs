//! Fixed timestep frame driver
//!
//! One call is one frame of the round, in this order:
//! 1. round clock (expiry ends the round and skips the rest)
//! 2. controller tick (basket velocity, time text, apple respawn)
//! 3. physics step (gravity, bounds, particles)
//! 4. overlap watcher (a new overlap is a catch)

use super::round::{RoundController, RoundHost, TickInput};

/// Advance the round by one fixed timestep
pub fn tick<H: RoundHost>(round: &mut RoundController<H>, input: &TickInput, dt: f32) {
    // Paused rounds wait for the start signal; ended rounds are frozen
    if !round.is_running() {
        return;
    }

    if round.advance_clock(dt) {
        round.on_round_expired();
        return;
    }

    round.on_tick(input);

    if round.world_mut().step(dt) {
        round.on_catch();
    }
}
