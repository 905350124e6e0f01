use std::io;

use thiserror::Error;

/// Conditions that stop the CPU dead.
///
/// Once a `Fault` is raised the CPU is halted and keeps reporting the same fault
/// until it is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("unknown opcode {opcode:#06X} at {pc:#05X}")]
    UnknownOpcode { opcode: u16, pc: u16 },

    #[error("call stack overflow at {pc:#05X}")]
    StackOverflow { pc: u16 },

    #[error("call stack underflow at {pc:#05X}")]
    StackUnderflow { pc: u16 },
}

/// Everything that can go wrong while setting up or running a Chip-8
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error(transparent)]
    Fault(#[from] Fault),

    #[error("ROM is too large ({size} bytes), max size is {max} bytes")]
    RomTooLarge { size: usize, max: usize },

    #[error("unable to read ROM")]
    Io(#[from] io::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_reports_opcode_and_pc() {
        let fault = Fault::UnknownOpcode {
            opcode: 0x5121,
            pc: 0x204,
        };
        assert_eq!(fault.to_string(), "unknown opcode 0x5121 at 0x204");
    }

    #[test]
    fn test_fault_converts_to_chip8_error() {
        let error: Chip8Error = Fault::StackUnderflow { pc: 0x200 }.into();
        assert!(matches!(
            error,
            Chip8Error::Fault(Fault::StackUnderflow { pc: 0x200 })
        ));
    }
}
