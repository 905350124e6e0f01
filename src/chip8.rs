use std::convert::TryFrom;
use std::io::Read;
use std::time::Duration;

use log::{debug, info};

use crate::config::Config;
use crate::cpu::Cpu;
use crate::display::FrameBuffer;
use crate::error::{Chip8Error, Fault};

const NANOS_PER_SECOND: u128 = 1_000_000_000;

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
/// Owns a CPU along with the ROM it was last given so that it can be restarted.
///
/// Is interfaced with by the outside world via methods to:
/// - load roms
/// - press and release keys
/// - advance the CPU and its timers by some amount of wall time
/// - inspect its frame buffer for rendering by some display
pub struct Chip8 {
    cpu: Cpu,
    config: Config,
    rom: Vec<u8>,
    /// Elapsed nanoseconds multiplied by the clock speed; one step per `NANOS_PER_SECOND`
    cycle_counter: u128,
    window_elapsed: Duration,
    window_steps: u64,
    steps_per_second: u32,
}

impl Chip8 {
    pub fn new(config: Config) -> Result<Self, Chip8Error> {
        config.validate()?;
        Ok(Chip8 {
            cpu: Cpu::new(&config),
            config,
            rom: Vec::new(),
            cycle_counter: 0,
            window_elapsed: Duration::from_secs(0),
            window_steps: 0,
            steps_per_second: 0,
        })
    }

    /// Load a rom from some source and restart the machine with it
    ///
    /// Returns the size of the rom in bytes.
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<usize, Chip8Error> {
        let mut rom = Vec::new();
        reader.read_to_end(&mut rom)?;
        self.load_bytes(&rom)
    }

    /// Restart the machine with `rom` at 0x200
    ///
    /// A rejected rom leaves the machine reset with nothing loaded.
    pub fn load_bytes(&mut self, rom: &[u8]) -> Result<usize, Chip8Error> {
        self.rom.clear();
        self.restart();
        self.cpu.load(rom)?;
        self.rom.extend_from_slice(rom);
        info!("loaded {} byte ROM", rom.len());
        Ok(rom.len())
    }

    /// Restart the currently loaded rom from scratch
    pub fn reset(&mut self) -> Result<(), Chip8Error> {
        self.restart();
        self.cpu.load(&self.rom)?;
        info!("reset");
        Ok(())
    }

    fn restart(&mut self) {
        self.cpu.reset();
        self.cycle_counter = 0;
        self.window_elapsed = Duration::from_secs(0);
        self.window_steps = 0;
        self.steps_per_second = 0;
    }

    /// Executes exactly one CPU step without touching the timers
    pub fn step(&mut self) -> Result<(), Fault> {
        self.cpu.step()
    }

    /// Runs the timers for `elapsed` without executing anything
    pub fn tick(&mut self, elapsed: Duration) {
        self.cpu.timers_mut().tick(elapsed);
    }

    /// Advances the machine by `elapsed` of wall time.
    /// - executes as many steps as the clock speed calls for, carrying over partial steps
    /// - a backlog of more than a second's worth of steps is dropped
    /// - then runs the timers for the same amount of time
    ///
    /// Returns how many steps were executed, or the fault that halted the CPU.
    pub fn advance(&mut self, elapsed: Duration) -> Result<usize, Fault> {
        self.cycle_counter += elapsed.as_nanos() * u128::from(self.config.clock_speed);

        let backlog = u128::from(self.config.clock_speed);
        let mut steps = self.cycle_counter / NANOS_PER_SECOND;
        self.cycle_counter %= NANOS_PER_SECOND;
        if steps > backlog {
            debug!("dropping {} steps of backlog", steps - backlog);
            steps = backlog;
        }

        for _ in 0..steps {
            self.cpu.step()?;
        }
        self.cpu.timers_mut().tick(elapsed);

        let steps = usize::try_from(steps).unwrap_or(usize::MAX);
        self.measure(elapsed, steps);
        Ok(steps)
    }

    /// Tracks throughput over windows of at least a second
    fn measure(&mut self, elapsed: Duration, steps: usize) {
        self.window_elapsed += elapsed;
        self.window_steps += steps as u64;

        if self.window_elapsed >= Duration::from_secs(1) {
            let rate = u128::from(self.window_steps) * NANOS_PER_SECOND
                / self.window_elapsed.as_nanos();
            self.steps_per_second = u32::try_from(rate).unwrap_or(u32::MAX);
            self.window_elapsed = Duration::from_secs(0);
            self.window_steps = 0;
        }
    }

    /// Steps executed per second over the last full measurement window
    pub fn steps_per_second(&self) -> u32 {
        self.steps_per_second
    }

    /// Returns the FrameBuffer if the display should be redrawn
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        self.cpu.display_mut().take_frame()
    }

    pub fn frame(&self) -> &FrameBuffer {
        self.cpu.display().frame()
    }

    /// Whether the sound timer is running and a tone should be playing
    pub fn sound_active(&self) -> bool {
        self.cpu.timers().sound_active()
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.cpu.keypad_mut().press(key);
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.cpu.keypad_mut().release(key);
    }

    /// Replace the whole keypad state; bit k is key k
    pub fn set_keys(&mut self, mask: u16) {
        self.cpu.keypad_mut().set_mask(mask);
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Dumps the registers, stack pointer and timers
    pub fn log_state(&self) {
        let cpu = &self.cpu;
        info!(
            "pc {:03X} sp {:X} i {:03X} mode {:?}",
            cpu.pc(),
            cpu.sp(),
            cpu.i(),
            cpu.mode()
        );
        for (x, value) in cpu.registers().iter().enumerate() {
            info!("v{:X} {:02X}", x, value);
        }
        info!(
            "dt {:02X} st {:02X}",
            cpu.timers().delay(),
            cpu.timers().sound()
        );
    }
}
