use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// # Timers
/// Delay and sound counters, each decremented toward zero once per `tick`.
///
/// The host calls `tick` once per 60 Hz frame regardless of how many
/// instructions ran. The sound timer is shared with `SoundGate` handles so an
/// audio callback on another thread can read it.
#[derive(Debug)]
pub struct TimerPair {
    delay: u8,
    sound: Arc<AtomicU8>,
}

impl TimerPair {
    pub fn new() -> Self {
        TimerPair {
            delay: 0,
            sound: Arc::new(AtomicU8::new(0)),
        }
    }

    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        // only this thread writes the sound timer, so load-then-store can't lose an update
        let sound = self.sound.load(Ordering::Relaxed);
        if sound > 0 {
            self.sound.store(sound - 1, Ordering::Relaxed);
        }
    }

    pub fn delay(&self) -> u8 {
        self.delay
    }

    pub fn set_delay(&mut self, value: u8) {
        self.delay = value;
    }

    pub fn sound(&self) -> u8 {
        self.sound.load(Ordering::Relaxed)
    }

    pub fn set_sound(&mut self, value: u8) {
        self.sound.store(value, Ordering::Relaxed);
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound() > 0
    }

    /// A handle for reading the sound timer from another thread.
    pub fn sound_gate(&self) -> SoundGate {
        SoundGate {
            sound: Arc::clone(&self.sound),
        }
    }
}

impl Default for TimerPair {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only, thread-safe view of the sound timer, for audio synthesis.
#[derive(Clone, Debug)]
pub struct SoundGate {
    sound: Arc<AtomicU8>,
}

impl SoundGate {
    /// True while the sound timer is non-zero.
    pub fn is_open(&self) -> bool {
        self.sound.load(Ordering::Relaxed) > 0
    }
}
