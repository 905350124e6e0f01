use log::{debug, error, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::Config;
use crate::constants::{ADDRESS_MASK, PROGRAM_START, REGISTER_COUNT};
use crate::display::Display;
use crate::error::{Chip8Error, Fault};
use crate::instruction::from_op;
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::stack::CallStack;
use crate::timers::Timers;

/// What the CPU does the next time it's stepped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Fetch, decode and execute the next opcode
    Running,
    /// Poll the keypad and store the first held key in the given register
    AwaitingKey(u8),
    /// Stopped by a fault; stays here until reset
    Halted(Fault),
}

/// # Chip-8 CPU
///
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - VF doubles as the carry, borrow and collision flag
/// - (i) a memory address register, kept within 12 bits
///
/// Counter
/// - (pc) a program counter, kept within 12 bits
///
/// Owns the memory, call stack, display, keypad and timers it executes against.
pub struct Cpu {
    pub(crate) v: [u8; REGISTER_COUNT],
    pub(crate) i: u16,
    pub(crate) pc: u16,
    pub(crate) mode: Mode,
    pub(crate) memory: Memory,
    pub(crate) stack: CallStack,
    pub(crate) display: Display,
    pub(crate) keypad: Keypad,
    pub(crate) timers: Timers,
    rng: StdRng,
}

impl Cpu {
    pub fn new(config: &Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Cpu {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            mode: Mode::Running,
            memory: Memory::new(),
            stack: CallStack::new(),
            display: Display::new(),
            keypad: Keypad::new(),
            timers: Timers::new(config.timer_frequency),
            rng,
        }
    }

    /// Zero every register, the stack, the timers and memory then reload the sprite sheet.
    /// The blank display is flagged for redrawing.
    pub fn reset(&mut self) {
        self.v = [0; REGISTER_COUNT];
        self.i = 0;
        self.pc = PROGRAM_START;
        self.mode = Mode::Running;
        self.memory.reset();
        self.stack.clear();
        self.display.clear();
        self.keypad.release_all();
        self.timers.reset();
    }

    /// Copy a ROM into memory at 0x200
    pub fn load(&mut self, rom: &[u8]) -> Result<(), Chip8Error> {
        self.memory.load(rom)
    }

    /// Advances the CPU by a single cycle
    /// - polls the keypad instead if awaiting a keypress
    /// - otherwise gets and executes the next opcode
    /// - a fault halts the CPU and is returned again on every later step
    pub fn step(&mut self) -> Result<(), Fault> {
        match self.mode {
            Mode::Halted(fault) => Err(fault),
            Mode::AwaitingKey(register) => {
                if let Some(key) = self.keypad.first_pressed() {
                    debug!("key {:X} pressed; stored in v{:X}", key, register);
                    self.v[usize::from(register)] = key;
                    self.keypad.release(key);
                    self.mode = Mode::Running;
                }
                Ok(())
            }
            Mode::Running => {
                let pc = self.pc;
                let op = self.fetch();
                trace!(
                    "{:04X} v{:02X?} i{:04X} pc{:04X}",
                    op,
                    self.v,
                    self.i,
                    pc
                );

                let result = from_op(&op, pc).and_then(|operation| operation(&op, self));
                if let Err(fault) = result {
                    error!("halting: {}", fault);
                    self.mode = Mode::Halted(fault);
                }
                result
            }
        }
    }

    /// Gets the opcode currently pointed at by the pc and moves the pc past it
    fn fetch(&mut self) -> u16 {
        let op = self.memory.read_word(self.pc);
        self.advance_pc();
        op
    }

    pub(crate) fn advance_pc(&mut self) {
        self.pc = self.pc.wrapping_add(2) & ADDRESS_MASK;
    }

    /// The address of the opcode being executed
    pub(crate) fn instruction_addr(&self) -> u16 {
        self.pc.wrapping_sub(2) & ADDRESS_MASK
    }

    pub(crate) fn random_byte(&mut self) -> u8 {
        self.rng.gen()
    }

    pub fn registers(&self) -> &[u8; REGISTER_COUNT] {
        &self.v
    }

    pub fn register(&self, x: u8) -> u8 {
        self.v[usize::from(x & 0xF)]
    }

    pub fn i(&self) -> u16 {
        self.i
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// The stack pointer; how many return addresses are saved
    pub fn sp(&self) -> usize {
        self.stack.depth()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut Display {
        &mut self.display
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn keypad_mut(&mut self) -> &mut Keypad {
        &mut self.keypad
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut Timers {
        &mut self.timers
    }
}
