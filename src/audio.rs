//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Hammer whoosh
    Swing,
    /// Target smashed
    Smash,
    /// Ultra-bonk shockwave
    MegaBonk,
    /// Hammer landed on a mine
    MineHit,
    /// UI button
    Click,
    GameOver,
    MissionComplete,
}

impl SoundEffect {
    /// Sound for a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<SoundEffect> {
        match event {
            GameEvent::Swing => Some(SoundEffect::Swing),
            GameEvent::Smash { .. } => Some(SoundEffect::Smash),
            GameEvent::MineHit => Some(SoundEffect::MineHit),
            GameEvent::MegaBonk { .. } => Some(SoundEffect::MegaBonk),
            GameEvent::MissionComplete => Some(SoundEffect::MissionComplete),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::PowerReady => None,
        }
    }
}

/// Mission fanfare arpeggio: C5 E5 G5 C6 E6 G6
pub const ARPEGGIO: [f32; 6] = [523.25, 659.25, 783.99, 1046.50, 1318.51, 1567.98];
/// Closing chord: C5 E5 G5 C6
pub const CHORD: [f32; 4] = [523.25, 659.25, 783.99, 1046.50];
const ARPEGGIO_STEP: f64 = 0.08;

#[cfg(target_arch = "wasm32")]
pub use manager::AudioManager;

#[cfg(target_arch = "wasm32")]
mod manager {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;
    use web_sys::{
        AudioBufferSourceNode, AudioContext, BiquadFilterNode, BiquadFilterType, GainNode,
        OscillatorNode, OscillatorType,
    };

    use super::{ARPEGGIO, ARPEGGIO_STEP, CHORD, SoundEffect};
    use crate::settings::Settings;

    /// One second of white noise, sliced for every noisy effect
    const NOISE_SECONDS: f32 = 1.0;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        noise: Vec<f32>,
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
            let sample_rate = ctx.as_ref().map(|c| c.sample_rate()).unwrap_or(44_100.0);
            let mut rng = Pcg32::seed_from_u64(0x5eed);
            let noise = (0..(sample_rate * NOISE_SECONDS) as usize)
                .map(|_| rng.random::<f32>() * 2.0 - 1.0)
                .collect();
            Self {
                ctx,
                noise,
                volume: 0.8,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                if ctx.state() == web_sys::AudioContextState::Suspended {
                    let _ = ctx.resume();
                }
            }
        }

        /// Pick up volume and mute from settings
        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_volume();
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };
            self.resume();

            match effect {
                SoundEffect::Swing => self.play_swing(ctx, vol),
                SoundEffect::Smash => self.play_smash(ctx, vol),
                SoundEffect::MegaBonk => self.play_mega_bonk(ctx, vol),
                SoundEffect::MineHit => self.play_mine_hit(ctx, vol),
                SoundEffect::Click => self.play_click(ctx, vol),
                SoundEffect::GameOver => self.play_game_over(ctx, vol),
                SoundEffect::MissionComplete => self.play_mission_complete(ctx, vol),
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

        /// Noise burst through a filter: source -> filter -> gain -> out
        fn create_noise(
            &self,
            ctx: &AudioContext,
            seconds: f32,
            filter_type: Option<BiquadFilterType>,
        ) -> Option<(AudioBufferSourceNode, Option<BiquadFilterNode>, GainNode)> {
            let rate = ctx.sample_rate();
            let len = ((rate * seconds) as usize).clamp(1, self.noise.len());
            let buffer = ctx.create_buffer(1, len as u32, rate).ok()?;
            buffer.copy_to_channel(&self.noise[..len], 0).ok()?;

            let source = ctx.create_buffer_source().ok()?;
            source.set_buffer(Some(&buffer));
            let gain = ctx.create_gain().ok()?;

            let filter = match filter_type {
                Some(kind) => {
                    let filter = ctx.create_biquad_filter().ok()?;
                    filter.set_type(kind);
                    source.connect_with_audio_node(&filter).ok()?;
                    filter.connect_with_audio_node(&gain).ok()?;
                    Some(filter)
                }
                None => {
                    source.connect_with_audio_node(&gain).ok()?;
                    None
                }
            };
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((source, filter, gain))
        }

        /// Swing - band-passed whoosh with a low sine for weight
        fn play_swing(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((noise, Some(filter), gain)) =
                self.create_noise(ctx, 0.2, Some(BiquadFilterType::Bandpass))
            {
                filter.frequency().set_value_at_time(400.0, t).ok();
                filter
                    .frequency()
                    .exponential_ramp_to_value_at_time(1200.0, t + 0.15)
                    .ok();
                filter.q().set_value(1.0);
                gain.gain().set_value_at_time(0.0, t).ok();
                gain.gain().linear_ramp_to_value_at_time(vol * 0.3, t + 0.05).ok();
                gain.gain().linear_ramp_to_value_at_time(0.0, t + 0.2).ok();
                noise.start_with_when(t).ok();
            }

            if let Some((osc, gain)) = self.create_osc(ctx, 150.0, OscillatorType::Sine) {
                osc.frequency().set_value_at_time(150.0, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(80.0, t + 0.2)
                    .ok();
                gain.gain().set_value_at_time(vol * 0.1, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.25).ok();
            }
        }

        /// Smash - kick, square "bonk" slide, crunchy noise
        fn play_smash(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((kick, gain)) = self.create_osc(ctx, 200.0, OscillatorType::Sine) {
                kick.frequency().set_value_at_time(200.0, t).ok();
                kick.frequency()
                    .exponential_ramp_to_value_at_time(40.0, t + 0.15)
                    .ok();
                gain.gain().set_value_at_time(vol, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                kick.start_with_when(t).ok();
                kick.stop_with_when(t + 0.2).ok();
            }

            if let Some((bonk, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Square) {
                bonk.frequency().set_value_at_time(400.0, t).ok();
                bonk.frequency().linear_ramp_to_value_at_time(100.0, t + 0.1).ok();
                gain.gain().set_value_at_time(vol * 0.2, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                    .ok();
                bonk.start_with_when(t).ok();
                bonk.stop_with_when(t + 0.15).ok();
            }

            if let Some((noise, Some(filter), gain)) =
                self.create_noise(ctx, 0.1, Some(BiquadFilterType::Lowpass))
            {
                filter.frequency().set_value(1000.0);
                gain.gain().set_value_at_time(vol * 0.5, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                    .ok();
                noise.start_with_when(t).ok();
            }
        }

        /// Ultra-bonk - sub drop, laser sweep, expanding explosion
        fn play_mega_bonk(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((sub, gain)) = self.create_osc(ctx, 80.0, OscillatorType::Sine) {
                sub.frequency().set_value_at_time(80.0, t).ok();
                sub.frequency()
                    .exponential_ramp_to_value_at_time(10.0, t + 1.0)
                    .ok();
                gain.gain().set_value_at_time(vol, t).ok();
                gain.gain().linear_ramp_to_value_at_time(0.0, t + 1.0).ok();
                sub.start_with_when(t).ok();
                sub.stop_with_when(t + 1.0).ok();
            }

            if let Some((laser, gain)) = self.create_osc(ctx, 1500.0, OscillatorType::Sawtooth) {
                laser.frequency().set_value_at_time(1500.0, t).ok();
                laser
                    .frequency()
                    .exponential_ramp_to_value_at_time(100.0, t + 0.4)
                    .ok();
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                    .ok();
                laser.start_with_when(t).ok();
                laser.stop_with_when(t + 0.4).ok();
            }

            if let Some((noise, Some(filter), gain)) =
                self.create_noise(ctx, 0.8, Some(BiquadFilterType::Lowpass))
            {
                filter.frequency().set_value_at_time(200.0, t).ok();
                filter
                    .frequency()
                    .linear_ramp_to_value_at_time(1000.0, t + 0.2)
                    .ok();
                gain.gain().set_value_at_time(vol, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.8)
                    .ok();
                noise.start_with_when(t).ok();
            }
        }

        /// Mine hit - dissonant falling saws and a static burst
        fn play_mine_hit(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            for freq in [200.0, 290.0] {
                if let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sawtooth) {
                    osc.frequency().set_value_at_time(freq, t).ok();
                    osc.frequency()
                        .linear_ramp_to_value_at_time(freq * 0.5, t + 0.4)
                        .ok();
                    gain.gain().set_value_at_time(vol * 0.3, t).ok();
                    gain.gain().linear_ramp_to_value_at_time(0.0, t + 0.4).ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.4).ok();
                }
            }

            if let Some((noise, _, gain)) = self.create_noise(ctx, 0.3, None) {
                gain.gain().set_value_at_time(vol * 0.4, t).ok();
                gain.gain().linear_ramp_to_value_at_time(0.0, t + 0.3).ok();
                noise.start_with_when(t).ok();
            }
        }

        /// UI click - short 8-bit blip
        fn play_click(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 800.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.1, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.05)
                .ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + 0.05).ok();
        }

        /// Game over - wobbly saw slide under a closing low-pass
        fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            let end = t + 1.5;

            let (Ok(osc), Ok(filter), Ok(gain)) =
                (ctx.create_oscillator(), ctx.create_biquad_filter(), ctx.create_gain())
            else {
                return;
            };

            osc.set_type(OscillatorType::Sawtooth);
            osc.frequency().set_value_at_time(300.0, t).ok();
            osc.frequency().linear_ramp_to_value_at_time(50.0, end).ok();

            filter.set_type(BiquadFilterType::Lowpass);
            filter.frequency().set_value_at_time(1000.0, t).ok();
            filter.frequency().linear_ramp_to_value_at_time(100.0, end).ok();

            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain().linear_ramp_to_value_at_time(0.0, end).ok();

            // 6 Hz vibrato, +-10 Hz
            if let (Ok(lfo), Ok(depth)) = (ctx.create_oscillator(), ctx.create_gain()) {
                lfo.frequency().set_value(6.0);
                depth.gain().set_value(10.0);
                if lfo.connect_with_audio_node(&depth).is_ok()
                    && depth.connect_with_audio_param(&osc.frequency()).is_ok()
                {
                    lfo.start_with_when(t).ok();
                    lfo.stop_with_when(end).ok();
                }
            }

            if osc.connect_with_audio_node(&filter).is_err()
                || filter.connect_with_audio_node(&gain).is_err()
                || gain.connect_with_audio_node(&ctx.destination()).is_err()
            {
                return;
            }
            osc.start_with_when(t).ok();
            osc.stop_with_when(end).ok();
        }

        /// Mission complete - square arpeggio, then a soft triangle chord
        fn play_mission_complete(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            let duration = 0.1;

            for (i, freq) in ARPEGGIO.iter().enumerate() {
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Square) {
                    let start = t + i as f64 * ARPEGGIO_STEP;
                    gain.gain().set_value_at_time(0.0, t).ok();
                    gain.gain().set_value_at_time(vol * 0.1, start).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, start + duration)
                        .ok();
                    osc.start_with_when(start).ok();
                    osc.stop_with_when(start + duration + 0.05).ok();
                }
            }

            let chord_start = t + ARPEGGIO.len() as f64 * ARPEGGIO_STEP;
            for freq in CHORD {
                if let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Triangle) {
                    gain.gain().set_value_at_time(0.0, t).ok();
                    gain.gain().set_value_at_time(vol * 0.05, chord_start).ok();
                    gain.gain()
                        .linear_ramp_to_value_at_time(0.0, chord_start + 0.5)
                        .ok();
                    osc.start_with_when(chord_start).ok();
                    osc.stop_with_when(chord_start + 0.5).ok();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::EntityKind;

    #[test]
    fn test_event_sounds() {
        assert_eq!(SoundEffect::for_event(&GameEvent::Swing), Some(SoundEffect::Swing));
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Smash { kind: EntityKind::Fast }),
            Some(SoundEffect::Smash)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::GameOver { score: 10 }),
            Some(SoundEffect::GameOver)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::PowerReady), None);
    }

    #[test]
    fn test_fanfare_is_c_major() {
        // The closing chord reuses the first four arpeggio tones
        for note in CHORD {
            assert!(ARPEGGIO.contains(&note));
        }
        assert!((ARPEGGIO[3] / ARPEGGIO[0] - 2.0).abs() < 1e-3);
    }
}
