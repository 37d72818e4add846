use std::time::{Duration, Instant};

use anyhow::anyhow;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use emu8_core::{Chip8, TIMER_HZ};
use emu8_display::Display;

use crate::audio;
use crate::config::Config;
use crate::keymap::keymap;

/// Drives `chip8` at 60 frames a second until the window closes or Escape is pressed.
///
/// Each frame handles input, runs `cycles_per_frame` instructions, ticks the
/// timers, and redraws if the frame buffer changed. Holding Space skips the
/// frame sleep.
pub fn run(mut chip8: Chip8, config: &Config) -> anyhow::Result<()> {
    let sdl = sdl2::init().map_err(|e| anyhow!("failed to initialise SDL2: {}", e))?;
    let mut display =
        Display::new(&sdl, config.scale).map_err(|e| anyhow!("failed to open window: {}", e))?;
    // kept alive for the duration of the loop; dropping it stops playback
    let _audio = match audio::open(&sdl, chip8.sound_gate()) {
        Ok(device) => Some(device),
        Err(e) => {
            log::warn!("continuing without sound: {}", e);
            None
        }
    };
    let mut events = sdl
        .event_pump()
        .map_err(|e| anyhow!("failed to get SDL2 event pump: {}", e))?;

    let frame_time = Duration::from_secs(1) / TIMER_HZ;
    let mut fast_forward = false;

    'frame: loop {
        let frame_start = Instant::now();

        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'frame,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_press(kc),
                    (Keycode::Space, _) => fast_forward = true,
                    _ => log::debug!("unmapped key {:?}", key),
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_release(kc),
                    (Keycode::Space, _) => fast_forward = false,
                    _ => continue,
                },
                _ => continue,
            }
        }

        chip8.run_frame(config.cycles_per_frame);

        if let Some(frame) = chip8.take_frame() {
            display
                .render(frame)
                .map_err(|e| anyhow!("failed to render frame: {}", e))?;
        }

        let elapsed = frame_start.elapsed();
        if !fast_forward && elapsed < frame_time {
            std::thread::sleep(frame_time - elapsed);
        }
    }

    log::info!("shutting down");
    Ok(())
}
