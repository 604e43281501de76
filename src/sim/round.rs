//! Game round controller
//!
//! Owns the round lifecycle and score/time bookkeeping. The host page is
//! injected as a [`RoundHost`], so the controller runs the same in the
//! browser, in the native demo, and under test.
//!
//! ```text
//! Paused --Start--> Running --Expire--> Ended
//!                   ^     |
//!                   +-----+ Tick, Catch
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::config::RoundConfig;
use super::particles::Particle;
use super::timer::DelayedCall;
use super::world::ArcadeWorld;

/// Lifecycle phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Built and waiting for the host's start signal
    Paused,
    /// Clock running, input and catches accepted
    Running,
    /// Timer fired; terminal
    Ended,
}

/// Stimuli the controller reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundSignal {
    Start,
    Tick,
    Catch,
    Expire,
}

impl RoundPhase {
    /// Phase after `signal`, or `None` if this phase does not accept it
    pub fn next(self, signal: RoundSignal) -> Option<RoundPhase> {
        use RoundPhase::*;
        use RoundSignal::*;
        match (self, signal) {
            (Paused, Start) => Some(Running),
            (Paused, Tick | Catch | Expire) => None,
            (Running, Tick | Catch) => Some(Running),
            (Running, Expire) => Some(Ended),
            // Already running; a second start changes nothing
            (Running, Start) => None,
            (Ended, _) => None,
        }
    }
}

/// Win/lose verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
}

impl Outcome {
    pub fn from_score(score: u32, threshold: u32) -> Self {
        if score >= threshold {
            Outcome::Win
        } else {
            Outcome::Lose
        }
    }

    /// Results overlay text
    pub fn banner(&self) -> &'static str {
        match self {
            Outcome::Win => "You WIN!",
            Outcome::Lose => "You LOSE!",
        }
    }
}

/// Final score and verdict handed to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub score: u32,
    pub outcome: Outcome,
}

/// Sounds the controller asks the host to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    Catch,
}

/// Directional keys held this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
}

impl TickInput {
    /// -1, 0 or +1. Right overrides left when both are held.
    pub fn direction(&self) -> f32 {
        if self.right {
            1.0
        } else if self.left {
            -1.0
        } else {
            0.0
        }
    }
}

/// Host page surface the controller writes to
pub trait RoundHost {
    fn set_score_text(&mut self, text: &str);
    fn set_time_text(&mut self, text: &str);
    fn play_sound(&mut self, sound: Sound);
    fn start_music(&mut self);
    /// End-of-round overlay. Called once.
    fn show_results(&mut self, result: &RoundResult);
}

pub fn score_text(score: u32) -> String {
    format!("Score: {score}")
}

/// Truncated whole seconds
pub fn time_text(remaining_secs: f64) -> String {
    format!("Time: {}", remaining_secs.max(0.0).trunc() as u64)
}

/// The single live round
pub struct RoundController<H: RoundHost> {
    config: RoundConfig,
    phase: RoundPhase,
    score: u32,
    remaining_ms: f64,
    timer: DelayedCall,
    world: ArcadeWorld,
    result: Option<RoundResult>,
    host: H,
}

impl<H: RoundHost> RoundController<H> {
    /// Wire up a paused round: bodies, emitter, timer, HUD and music
    pub fn initialize(config: RoundConfig, mut host: H, seed: u64) -> Self {
        let world = ArcadeWorld::new(&config, seed);
        let timer = DelayedCall::new(config.round_duration_ms);

        host.start_music();
        host.set_score_text(&score_text(0));
        host.set_time_text("Time: 00");

        log::info!(
            "Round initialized (seed {seed}, {}x{} field, {} ms)",
            config.field_width,
            config.field_height,
            config.round_duration_ms
        );

        Self {
            remaining_ms: timer.remaining_ms(),
            config,
            phase: RoundPhase::Paused,
            score: 0,
            timer,
            world,
            result: None,
            host,
        }
    }

    /// Apply a signal to the state machine. Rejected signals are logged and
    /// leave the round untouched.
    fn accept(&mut self, signal: RoundSignal) -> bool {
        match self.phase.next(signal) {
            Some(next) => {
                self.phase = next;
                true
            }
            None => {
                if !(self.phase == RoundPhase::Running && signal == RoundSignal::Start) {
                    log::warn!("Ignoring {:?} while {:?}", signal, self.phase);
                }
                false
            }
        }
    }

    /// Paused -> Running. Returns false if the round was not paused.
    pub fn on_start_signal(&mut self) -> bool {
        let accepted = self.accept(RoundSignal::Start);
        if accepted {
            log::info!("Round started");
        }
        accepted
    }

    /// Per-frame update: basket velocity, time text, apple respawn
    pub fn on_tick(&mut self, input: &TickInput) -> bool {
        if !self.accept(RoundSignal::Tick) {
            return false;
        }

        self.world.player.vel.x = input.direction() * self.config.player_speed();

        self.remaining_ms = self.timer.remaining_ms();
        self.host.set_time_text(&time_text(self.timer.remaining_secs()));

        if self.world.target.pos.y >= self.config.field_height {
            self.world.respawn_target();
        }
        true
    }

    /// Basket caught the apple
    pub fn on_catch(&mut self) -> bool {
        if !self.accept(RoundSignal::Catch) {
            return false;
        }

        self.host.play_sound(Sound::Catch);
        self.world.emitter.start();
        self.world.respawn_target();
        self.score += self.config.catch_award;
        self.host.set_score_text(&score_text(self.score));

        log::debug!("Catch! score {}", self.score);
        true
    }

    /// Timer fired: freeze the round and report the result
    pub fn on_round_expired(&mut self) -> bool {
        if !self.accept(RoundSignal::Expire) {
            return false;
        }

        self.remaining_ms = 0.0;
        let result = RoundResult {
            score: self.score,
            outcome: Outcome::from_score(self.score, self.config.win_threshold),
        };
        self.result = Some(result);

        log::info!("Round over: {} points, {:?}", result.score, result.outcome);
        self.host.show_results(&result);
        true
    }

    /// Advance the round clock. Returns true on the step the timer fires.
    /// Only a running round's clock moves.
    pub fn advance_clock(&mut self, dt: f32) -> bool {
        if self.phase != RoundPhase::Running {
            return false;
        }
        self.timer.advance(dt as f64 * 1000.0)
    }

    pub fn world(&self) -> &ArcadeWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut ArcadeWorld {
        &mut self.world
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == RoundPhase::Running
    }

    pub fn is_ended(&self) -> bool {
        self.phase == RoundPhase::Ended
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Remaining time as of the last tick
    pub fn remaining_ms(&self) -> f64 {
        self.remaining_ms
    }

    pub fn result(&self) -> Option<RoundResult> {
        self.result
    }

    pub fn player_pos(&self) -> Vec2 {
        self.world.player.pos
    }

    pub fn player_velocity_x(&self) -> f32 {
        self.world.player.vel.x
    }

    pub fn target_pos(&self) -> Vec2 {
        self.world.target.pos
    }

    pub fn particles(&self) -> &[Particle] {
        self.world.emitter.particles()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_initialize_is_paused_and_wired() {
        let round = new_round(1);
        assert_eq!(round.phase(), RoundPhase::Paused);
        assert_eq!(round.score(), 0);
        assert_eq!(round.remaining_ms(), 30_000.0);
        assert!(round.host().music_started);
        assert_eq!(round.host().score_text, "Score: 0");
        assert_eq!(round.host().time_text, "Time: 00");
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut once = new_round(5);
        assert!(once.on_start_signal());

        let mut twice = new_round(5);
        assert!(twice.on_start_signal());
        assert!(!twice.on_start_signal());

        assert_eq!(once.phase(), twice.phase());
        assert_eq!(once.score(), twice.score());
        assert_eq!(once.target_pos(), twice.target_pos());
        assert_eq!(once.player_pos(), twice.player_pos());
    }

    #[test]
    fn test_signals_before_start_are_ignored() {
        let mut round = new_round(3);
        let target = round.target_pos();

        assert!(!round.on_tick(&TickInput { left: true, right: false }));
        assert!(!round.on_catch());
        assert!(!round.on_round_expired());

        assert_eq!(round.phase(), RoundPhase::Paused);
        assert_eq!(round.score(), 0);
        assert_eq!(round.player_velocity_x(), 0.0);
        assert_eq!(round.target_pos(), target);
        assert!(round.host().sounds.is_empty());
        assert!(round.host().results.is_empty());
    }

    #[test]
    fn test_paused_clock_does_not_run() {
        let mut round = new_round(3);
        assert!(!round.advance_clock(100.0));
        round.on_start_signal();
        round.on_tick(&TickInput::default());
        assert_eq!(round.remaining_ms(), 30_000.0);
    }

    #[test]
    fn test_catch_side_effects() {
        let mut round = running_round(11);
        round.on_catch();

        assert_eq!(round.score(), 100);
        assert_eq!(round.host().score_text, "Score: 100");
        assert_eq!(round.host().sounds, vec![Sound::Catch]);
        assert!(round.world().emitter.is_emitting());
        assert_eq!(round.target_pos().y, 0.0);
    }

    #[test]
    fn test_tick_velocity() {
        let mut round = running_round(2);
        let speed = round.config().player_speed();

        round.on_tick(&TickInput { left: true, right: false });
        assert_eq!(round.player_velocity_x(), -speed);

        round.on_tick(&TickInput { left: false, right: true });
        assert_eq!(round.player_velocity_x(), speed);

        round.on_tick(&TickInput { left: true, right: true });
        assert_eq!(round.player_velocity_x(), speed);

        round.on_tick(&TickInput::default());
        assert_eq!(round.player_velocity_x(), 0.0);
    }

    #[test]
    fn test_tick_respawns_apple_at_floor() {
        let mut round = running_round(8);
        round.world_mut().target.pos = Vec2::new(123.0, 500.0);

        round.on_tick(&TickInput::default());
        let pos = round.target_pos();
        assert_eq!(pos.y, 0.0);
        assert!(pos.x >= 0.0 && pos.x < round.config().target_x_range());
    }

    #[test]
    fn test_tick_leaves_apple_above_floor() {
        let mut round = running_round(8);
        round.world_mut().target.pos = Vec2::new(123.0, 499.5);

        round.on_tick(&TickInput::default());
        assert_eq!(round.target_pos(), Vec2::new(123.0, 499.5));
    }

    #[test]
    fn test_time_text_truncates() {
        assert_eq!(time_text(30.0), "Time: 30");
        assert_eq!(time_text(29.99), "Time: 29");
        assert_eq!(time_text(0.4), "Time: 0");
        assert_eq!(time_text(-1.0), "Time: 0");
    }

    #[test]
    fn test_expire_ends_round_once() {
        let mut round = running_round(4);
        for _ in 0..3 {
            round.on_catch();
        }

        assert!(round.on_round_expired());
        assert!(!round.on_round_expired());
        assert_eq!(round.phase(), RoundPhase::Ended);
        assert_eq!(
            round.host().results,
            vec![RoundResult {
                score: 300,
                outcome: Outcome::Lose
            }]
        );

        // Terminal: nothing else moves the score
        assert!(!round.on_catch());
        assert!(!round.on_tick(&TickInput { left: true, right: false }));
        assert!(!round.on_start_signal());
        assert_eq!(round.score(), 300);
    }

    #[test]
    fn test_outcome_threshold_is_inclusive() {
        assert_eq!(Outcome::from_score(1000, 1000), Outcome::Win);
        assert_eq!(Outcome::from_score(999, 1000), Outcome::Lose);
        assert_eq!(Outcome::from_score(0, 1000), Outcome::Lose);
        assert_eq!(Outcome::Win.banner(), "You WIN!");
        assert_eq!(Outcome::Lose.banner(), "You LOSE!");
    }

    #[test]
    fn test_result_json() {
        let result = RoundResult {
            score: 1000,
            outcome: Outcome::Win,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"score":1000,"outcome":"Win"}"#);
    }

    #[test]
    fn test_transition_table() {
        use RoundPhase::*;
        use RoundSignal::*;
        assert_eq!(Paused.next(Start), Some(Running));
        assert_eq!(Paused.next(Tick), None);
        assert_eq!(Running.next(Tick), Some(Running));
        assert_eq!(Running.next(Catch), Some(Running));
        assert_eq!(Running.next(Expire), Some(Ended));
        assert_eq!(Running.next(Start), None);
        for signal in [Start, Tick, Catch, Expire] {
            assert_eq!(Ended.next(signal), None);
        }
    }

    proptest! {
        #[test]
        fn prop_velocity_rule(left: bool, right: bool) {
            let mut round = running_round(1);
            let speed = round.config().player_speed();
            round.on_tick(&TickInput { left, right });

            let expected = if right {
                speed
            } else if left {
                -speed
            } else {
                0.0
            };
            prop_assert_eq!(round.player_velocity_x(), expected);
        }

        #[test]
        fn prop_catch_postconditions(seed: u64, catches in 1u32..40) {
            let mut round = running_round(seed);
            let range = round.config().target_x_range();

            for i in 1..=catches {
                let before = round.score();
                prop_assert!(round.on_catch());
                prop_assert_eq!(round.score(), before + 100);
                prop_assert_eq!(round.score(), i * 100);

                let pos = round.target_pos();
                prop_assert_eq!(pos.y, 0.0);
                prop_assert!(pos.x >= 0.0 && pos.x < range);
            }
        }
    }
}
