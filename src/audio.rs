//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::{EndReason, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Attack box comes out
    Swing,
    /// Attack connects
    Hit,
    Jump,
    Land,
    /// Round ended by knockout
    KnockOut,
    /// Round ended by the timer
    TimeUp,
}

impl SoundEffect {
    /// Sound for a simulation event
    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::Swing { .. } => SoundEffect::Swing,
            GameEvent::Hit { .. } => SoundEffect::Hit,
            GameEvent::Jump { .. } => SoundEffect::Jump,
            GameEvent::Land { .. } => SoundEffect::Land,
            GameEvent::RoundOver(result) => match result.reason {
                EndReason::KnockOut => SoundEffect::KnockOut,
                EndReason::TimeUp => SoundEffect::TimeUp,
            },
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx, volume: 0.8 }
    }

    /// Set effective volume (0.0 - 1.0), already combining master, sfx and mute
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Swing => self.play_swing(ctx, vol),
            SoundEffect::Hit => self.play_hit(ctx, vol),
            SoundEffect::Jump => self.play_jump(ctx, vol),
            SoundEffect::Land => self.play_land(ctx, vol),
            SoundEffect::KnockOut => self.play_knockout(ctx, vol),
            SoundEffect::TimeUp => self.play_time_up(ctx, vol),
        }
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

    /// Short falling sweep from `from` to `to` Hz
    fn sweep(
        &self,
        ctx: &AudioContext,
        osc_type: OscillatorType,
        from: f32,
        to: f32,
        peak: f32,
        duration: f64,
    ) {
        let Some((osc, gain)) = self.create_osc(ctx, from, osc_type) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(peak, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + duration)
            .ok();
        osc.frequency().set_value_at_time(from, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(to, t + duration)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + duration + 0.05).ok();
    }

    /// Swing - airy whoosh
    fn play_swing(&self, ctx: &AudioContext, vol: f32) {
        self.sweep(ctx, OscillatorType::Sawtooth, 900.0, 300.0, vol * 0.15, 0.08);
    }

    /// Hit - solid thump
    fn play_hit(&self, ctx: &AudioContext, vol: f32) {
        self.sweep(ctx, OscillatorType::Square, 180.0, 50.0, vol * 0.4, 0.12);
    }

    /// Jump - rising blip
    fn play_jump(&self, ctx: &AudioContext, vol: f32) {
        self.sweep(ctx, OscillatorType::Sine, 250.0, 600.0, vol * 0.25, 0.1);
    }

    /// Land - soft low tap
    fn play_land(&self, ctx: &AudioContext, vol: f32) {
        self.sweep(ctx, OscillatorType::Triangle, 120.0, 60.0, vol * 0.2, 0.06);
    }

    /// Knockout - long descending tone
    fn play_knockout(&self, ctx: &AudioContext, vol: f32) {
        self.sweep(ctx, OscillatorType::Sawtooth, 440.0, 55.0, vol * 0.35, 0.8);
    }

    /// Time up - two bell beeps
    fn play_time_up(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        for (i, freq) in [880.0, 660.0].into_iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sine) else {
                return;
            };
            let start = t + i as f64 * 0.2;
            gain.gain().set_value_at_time(0.0, t).ok();
            gain.gain().set_value_at_time(vol * 0.3, start).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, start + 0.18)
                .ok();
            osc.start_with_when(start).ok();
            osc.stop_with_when(start + 0.2).ok();
        }
    }
}
