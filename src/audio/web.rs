//! Web Audio backend
//!
//! Effects and the ambient drone are synthesized from oscillators.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use super::{AudioSink, SoundEffect};
use crate::settings::Settings;

/// Drone voices for the ambient loop (Hz)
const AMBIENT_VOICES: [(f32, OscillatorType); 3] = [
    (55.0, OscillatorType::Sine),
    (82.5, OscillatorType::Sine),
    (110.3, OscillatorType::Triangle),
];
/// Ambient fade in/out time (seconds)
const AMBIENT_FADE: f64 = 0.4;

/// A running ambient loop
struct Ambient {
    voices: Vec<OscillatorNode>,
    gain: GainNode,
}

/// Audio manager for the game
pub struct WebAudio {
    ctx: Option<AudioContext>,
    ambient: Option<Ambient>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl Default for WebAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl WebAudio {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            ambient: None,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }

    /// Copy volume/mute preferences
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.master_volume = settings.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = settings.music_volume.clamp(0.0, 1.0);
        self.set_muted(settings.muted);
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if let (Some(ctx), Some(ambient)) = (&self.ctx, &self.ambient) {
            let level = if muted { 0.0 } else { self.ambient_volume() };
            ambient
                .gain
                .gain()
                .set_value_at_time(level, ctx.current_time())
                .ok();
        }
    }

    /// Get effective effect volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn ambient_volume(&self) -> f32 {
        self.master_volume * self.music_volume * 0.08
    }

    /// Live context, resumed if the browser suspended it
    fn live_ctx(&self) -> Option<&AudioContext> {
        let ctx = self.ctx.as_ref()?;
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        Some(ctx)
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Meteor impact - low crunch with a sharp crack
    fn play_hit(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 140.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.5)
                .ok();
            osc.frequency().set_value_at_time(140.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(25.0, t + 0.5)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.6).ok();
        }

        if let Some((osc, gain)) = self.create_osc(ctx, 1800.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.08)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.12).ok();
        }
    }

    /// Star collected - bright rising chime
    fn play_success(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [660.0, 880.0, 1320.0].iter().enumerate() {
            let delay = i as f64 * 0.07;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.2).ok();
            }
        }
    }

    /// Build the drone graph: voices -> shared gain -> destination
    fn build_ambient(&self, ctx: &AudioContext) -> Option<Ambient> {
        let gain = ctx.create_gain().ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        let t = ctx.current_time();
        gain.gain().set_value_at_time(0.0001, t).ok();
        if !self.muted {
            gain.gain()
                .linear_ramp_to_value_at_time(self.ambient_volume(), t + AMBIENT_FADE)
                .ok();
        }

        let mut voices = Vec::with_capacity(AMBIENT_VOICES.len());
        for (freq, osc_type) in AMBIENT_VOICES {
            let osc = ctx.create_oscillator().ok()?;
            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            osc.start().ok()?;
            voices.push(osc);
        }

        Some(Ambient { voices, gain })
    }
}

impl AudioSink for WebAudio {
    fn request_sound(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = self.live_ctx() else { return };

        match effect {
            SoundEffect::Hit => self.play_hit(ctx, vol),
            SoundEffect::Success => self.play_success(ctx, vol),
        }
    }

    fn start_ambient(&mut self) {
        if self.ambient.is_some() {
            return;
        }
        let Some(ctx) = self.live_ctx() else { return };
        let ambient = self.build_ambient(ctx);
        if ambient.is_none() {
            log::warn!("Could not start ambient audio");
        }
        self.ambient = ambient;
    }

    fn stop_ambient(&mut self) {
        let Some(ambient) = self.ambient.take() else {
            return;
        };
        let Some(ctx) = &self.ctx else { return };

        let t = ctx.current_time();
        let gain = ambient.gain.gain();
        gain.cancel_scheduled_values(t).ok();
        gain.set_value_at_time(gain.value(), t).ok();
        gain.linear_ramp_to_value_at_time(0.0001, t + AMBIENT_FADE)
            .ok();
        for osc in &ambient.voices {
            osc.stop_with_when(t + AMBIENT_FADE + 0.05).ok();
        }
    }
}
