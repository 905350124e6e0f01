use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use log::{error, info};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use display::Display;
use emu8::{Chip8, Config};

use crate::keymap::keypad_mask;

/// Host frames per second
const FRAME_RATE: u32 = 60;
/// How many times faster than the configured clock to run while fast forwarding
const FAST_FORWARD: u32 = 10;

pub fn run(rom: &Path, config: Config, scale: u32) -> Result<()> {
    let mut chip8 = Chip8::new(config)?;

    // Load ROM
    let file = File::open(rom).with_context(|| format!("unable to open {}", rom.display()))?;
    let mut reader = BufReader::new(file);
    let size = chip8
        .load_rom(&mut reader)
        .with_context(|| format!("unable to load {}", rom.display()))?;
    info!("running {} ({} bytes)", rom.display(), size);

    // Get SDL2 context
    let sdl = sdl2::init().map_err(|e| anyhow!(e))?;
    let mut display = Display::new(&sdl, scale)?;
    let mut events = sdl.event_pump().map_err(|e| anyhow!(e))?;

    let frame_time = Duration::from_secs(1) / FRAME_RATE;
    let mut last_frame = Instant::now();
    let mut status = (0, false);

    // Whether or not the configured clock speed should be respected
    let mut fast_forward = false;

    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match key {
                    Keycode::Space => fast_forward = true,
                    Keycode::Backspace => chip8.reset()?,
                    Keycode::Escape => break 'event,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(Keycode::Space),
                    ..
                } => fast_forward = false,
                _ => continue,
            };
        }

        // Sample the keypad from whatever is held right now
        let held = events
            .keyboard_state()
            .pressed_scancodes()
            .filter_map(Keycode::from_scancode)
            .collect::<Vec<_>>();
        chip8.set_keys(keypad_mask(held));

        // Update state
        let now = Instant::now();
        let mut elapsed = now - last_frame;
        last_frame = now;
        if fast_forward {
            elapsed *= FAST_FORWARD;
        }
        if let Err(fault) = chip8.advance(elapsed) {
            error!("{}", fault);
            chip8.log_state();
            return Err(fault.into());
        }

        // If the draw flag is set, unset it and render the current frame
        if let Some(frame) = chip8.take_frame() {
            display.render(&frame)?;
        }

        let current = (chip8.steps_per_second(), chip8.sound_active());
        if current != status {
            display.set_status(current.0, current.1)?;
            status = current;
        }

        // Handle timing
        let work = last_frame.elapsed();
        if frame_time > work {
            std::thread::sleep(frame_time - work);
        }
    }

    Ok(())
}
