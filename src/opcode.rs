use crate::constants::ADDRESS_MASK;

/// # Opcodes
///
/// Every instruction is one big-endian 16-bit word, read as four nibbles `[o x y n]`.
/// The top nibble `o` picks an instruction family; within the families that share a
/// top nibble, the low nibble or low byte picks the instruction.
///
/// The remaining nibbles are operands:
/// - `x` names a register Vx, or the last register of the range V0..=Vx
/// - `y` names a second register Vy
/// - `n` is a 4-bit sprite height
/// - `kk` (the low byte) is an 8-bit immediate
/// - `addr` (the low 12 bits) is a memory address
pub trait Opcode {
    /// The whole instruction word
    fn word(&self) -> u16;

    /// `(o, x, y, n)`
    fn nibbles(&self) -> (u8, u8, u8, u8);

    fn x(&self) -> u8;

    fn y(&self) -> u8;

    fn n(&self) -> u8;

    fn kk(&self) -> u8;

    fn addr(&self) -> u16;
}

/// Shifts the nibble `index` places from the right down to the bottom of a byte
fn nibble(word: u16, index: u32) -> u8 {
    (word >> (index * 4)) as u8 & 0xF
}

impl Opcode for u16 {
    fn word(&self) -> u16 {
        *self
    }

    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (nibble(*self, 3), self.x(), self.y(), self.n())
    }

    fn x(&self) -> u8 {
        nibble(*self, 2)
    }

    fn y(&self) -> u8 {
        nibble(*self, 1)
    }

    fn n(&self) -> u8 {
        nibble(*self, 0)
    }

    fn kk(&self) -> u8 {
        self.to_be_bytes()[1]
    }

    fn addr(&self) -> u16 {
        self & ADDRESS_MASK
    }
}
