use crate::constants::STACK_DEPTH;
use crate::error::Fault;

/// Why a push or pop was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    Overflow,
    Underflow,
}

impl StackError {
    /// The fault raised by the opcode at `pc`
    pub fn at(self, pc: u16) -> Fault {
        match self {
            StackError::Overflow => Fault::StackOverflow { pc },
            StackError::Underflow => Fault::StackUnderflow { pc },
        }
    }
}

/// # Call Stack
/// Return addresses saved by CALL and restored by RET.
/// The depth doubles as the stack pointer.
#[derive(Clone)]
pub struct CallStack {
    frames: [u16; STACK_DEPTH],
    depth: usize,
}

impl CallStack {
    pub fn new() -> Self {
        CallStack {
            frames: [0; STACK_DEPTH],
            depth: 0,
        }
    }

    pub fn push(&mut self, addr: u16) -> Result<(), StackError> {
        if self.depth == STACK_DEPTH {
            return Err(StackError::Overflow);
        }
        self.frames[self.depth] = addr;
        self.depth += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, StackError> {
        if self.depth == 0 {
            return Err(StackError::Underflow);
        }
        self.depth -= 1;
        Ok(self.frames[self.depth])
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn clear(&mut self) {
        self.frames = [0; STACK_DEPTH];
        self.depth = 0;
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new()
    }
}
