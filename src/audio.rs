//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects and music - no external files needed!

use web_sys::{AudioContext, AudioNode, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::Sound;

/// Background tune: (frequency Hz, beats). A rest is 0 Hz.
const MELODY: &[(f32, f32)] = &[
    (392.0, 1.0),
    (523.3, 1.0),
    (659.3, 1.0),
    (523.3, 1.0),
    (587.3, 1.0),
    (493.9, 1.0),
    (392.0, 2.0),
    (440.0, 1.0),
    (523.3, 1.0),
    (659.3, 1.0),
    (784.0, 1.0),
    (698.5, 1.0),
    (587.3, 1.0),
    (523.3, 1.0),
    (0.0, 1.0),
];
/// Seconds per beat
const BEAT: f64 = 0.25;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    sfx_volume: f32,
    music_volume: f32,
    /// Bus for all scheduled music notes; dropping its gain silences them
    music_bus: Option<GainNode>,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            sfx_volume: settings.effective_sfx_volume(),
            music_volume: settings.effective_music_volume(),
            music_bus: None,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Play a sound effect
    pub fn play(&self, sound: Sound) {
        if self.sfx_volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match sound {
            Sound::Catch => self.play_coin(ctx, self.sfx_volume),
        }
    }

    /// Schedule the background tune, looped to cover `duration_secs`.
    ///
    /// Notes are queued on the context clock; a suspended context holds them
    /// until it resumes.
    pub fn start_music(&mut self, duration_secs: f64) {
        if self.music_volume <= 0.0 || self.music_bus.is_some() {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        let Some(bus) = ctx.create_gain().ok() else { return };
        bus.gain().set_value(self.music_volume);
        if bus.connect_with_audio_node(&ctx.destination()).is_err() {
            return;
        }

        let start = ctx.current_time() + 0.05;
        let mut t = start;
        let mut notes = 0;
        while t - start < duration_secs {
            for &(freq, beats) in MELODY {
                let len = beats as f64 * BEAT;
                if freq > 0.0 {
                    self.schedule_note(ctx, &bus, freq, t, len * 0.9);
                    notes += 1;
                }
                t += len;
            }
        }
        log::info!("Background music scheduled ({notes} notes)");
        self.music_bus = Some(bus);
    }

    /// Silence and release the music bus
    pub fn stop_music(&mut self) {
        if let Some(bus) = self.music_bus.take() {
            bus.gain().set_value(0.0);
            let _ = bus.disconnect();
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope, routed into `out`
    fn create_osc(
        &self,
        ctx: &AudioContext,
        out: &AudioNode,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(out).ok()?;

        Some((osc, gain))
    }

    /// Catch - two-note coin chime
    fn play_coin(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) =
            self.create_osc(ctx, &ctx.destination(), 987.8, OscillatorType::Square)
        else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol, t).ok();
        gain.gain().set_value_at_time(vol, t + 0.08).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, t + 0.4)
            .ok();
        osc.frequency().set_value_at_time(987.8, t).ok();
        osc.frequency().set_value_at_time(1318.5, t + 0.08).ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.45).ok();
    }

    /// One music note into the music bus
    fn schedule_note(&self, ctx: &AudioContext, bus: &GainNode, freq: f32, t: f64, len: f64) {
        let Some((osc, gain)) = self.create_osc(ctx, bus, freq, OscillatorType::Triangle) else {
            return;
        };

        gain.gain().set_value_at_time(0.001, t).ok();
        gain.gain().linear_ramp_to_value_at_time(1.0, t + 0.02).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, t + len)
            .ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + len + 0.02).ok();
    }
}
