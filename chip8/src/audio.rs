use std::f32::consts::PI;

use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

use emu8_core::SoundGate;

const SAMPLE_RATE: i32 = 44_100;
const BUFFER_SAMPLES: u16 = 2048;
const TONE_HZ: f32 = 440.0;
const VOLUME: f32 = 0.5;

/// # Beeper
/// A sine tone generator that sounds while the Chip-8 sound timer is running.
///
/// SDL2 calls `callback` from its own audio thread, so the sound timer is read
/// through a `SoundGate`. `phase` carries over between buffers so the wave
/// stays continuous.
pub struct Beeper {
    gate: SoundGate,
    phase: f32,
    phase_step: f32,
}

impl Beeper {
    pub fn new(gate: SoundGate, sample_rate: i32) -> Self {
        Beeper {
            gate,
            phase: 0.0,
            phase_step: TONE_HZ / sample_rate as f32,
        }
    }

    /// Fills `out` with tone or silence depending on the gate.
    pub fn fill(&mut self, out: &mut [f32]) {
        if !self.gate.is_open() {
            out.iter_mut().for_each(|sample| *sample = 0.0);
            return;
        }
        for sample in out.iter_mut() {
            *sample = (self.phase * 2.0 * PI).sin() * VOLUME;
            self.phase = (self.phase + self.phase_step) % 1.0;
        }
    }
}

impl AudioCallback for Beeper {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        self.fill(out);
    }
}

/// Opens and starts a mono playback device driven by a `Beeper`.
pub fn open(sdl: &sdl2::Sdl, gate: SoundGate) -> Result<AudioDevice<Beeper>, String> {
    let audio = sdl.audio()?;
    let desired = AudioSpecDesired {
        freq: Some(SAMPLE_RATE),
        channels: Some(1),
        samples: Some(BUFFER_SAMPLES),
    };
    let device = audio.open_playback(None, &desired, |spec| {
        log::debug!("audio device opened at {}Hz", spec.freq);
        Beeper::new(gate, spec.freq)
    })?;
    device.resume();
    Ok(device)
}

#[cfg(test)]
mod tests {
    use super::*;
    use emu8_core::timers::TimerPair;

    #[test]
    fn test_silent_when_gate_closed() {
        let timers = TimerPair::new();
        let mut beeper = Beeper::new(timers.sound_gate(), SAMPLE_RATE);
        let mut out = [1.0; 64];
        beeper.fill(&mut out);
        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_tone_when_gate_open() {
        let mut timers = TimerPair::new();
        timers.set_sound(10);
        let mut beeper = Beeper::new(timers.sound_gate(), SAMPLE_RATE);
        let mut out = [0.0; 256];
        beeper.fill(&mut out);
        assert_eq!(out[0], 0.0);
        assert!(out.iter().all(|&s| s.abs() <= VOLUME));
        // a quarter period of 440Hz at 44.1kHz is ~25 samples
        assert!((out[25] - VOLUME).abs() < 0.01);
    }

    #[test]
    fn test_phase_continues_across_buffers() {
        let mut timers = TimerPair::new();
        timers.set_sound(10);
        let mut whole = Beeper::new(timers.sound_gate(), SAMPLE_RATE);
        let mut split = Beeper::new(timers.sound_gate(), SAMPLE_RATE);
        let mut expected = [0.0; 100];
        whole.fill(&mut expected);
        let mut first = [0.0; 40];
        let mut second = [0.0; 60];
        split.fill(&mut first);
        split.fill(&mut second);
        assert_eq!(first[..], expected[..40]);
        assert_eq!(second[..], expected[40..]);
    }
}
