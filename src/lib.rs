pub use chip8::Chip8;
pub use config::Config;
pub use constants::CLOCK_SPEED;
pub use cpu::{Cpu, Mode};
pub use display::{Display, FrameBuffer};
pub use error::{Chip8Error, Fault};
pub use keypad::Keypad;
pub use memory::Memory;
pub use stack::{CallStack, StackError};
pub use timers::Timers;

mod chip8;
mod config;
pub mod constants;
mod cpu;
mod display;
mod error;
mod instruction;
mod keypad;
mod memory;
mod opcode;
mod operations;
mod stack;
mod timers;
