use crate::constants::{ADDRESS_MASK, MAX_ROM_SIZE, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::error::Chip8Error;

/// # Memory
/// 4096 bytes of addressable memory.
///
/// - 0x000..0x050 holds the hex digit sprite sheet
/// - 0x200..0x1000 holds the loaded ROM
///
/// Addresses are masked to 12 bits on every access so they wrap around the end of
/// memory instead of escaping it.
#[derive(Clone)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    pub fn new() -> Self {
        let mut memory = Memory {
            bytes: [0; MEMORY_SIZE],
        };
        memory.reset();
        memory
    }

    /// Zero everything and write the sprite sheet back in at address 0
    pub fn reset(&mut self) {
        self.bytes = [0; MEMORY_SIZE];
        self.bytes[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
    }

    /// Copy a ROM into memory at `PROGRAM_START`.
    /// Anything left over from a previous ROM is zeroed first.
    ///
    /// # Arguments
    /// * `rom` the raw program bytes
    pub fn load(&mut self, rom: &[u8]) -> Result<(), Chip8Error> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(Chip8Error::RomTooLarge {
                size: rom.len(),
                max: MAX_ROM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.bytes[start..].iter_mut().for_each(|byte| *byte = 0);
        self.bytes[start..start + rom.len()].copy_from_slice(rom);
        Ok(())
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[usize::from(addr & ADDRESS_MASK)]
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        self.bytes[usize::from(addr & ADDRESS_MASK)] = value;
    }

    /// Opcodes are 16 bits stored big-endian across two subsequent bytes
    pub fn read_word(&self, addr: u16) -> u16 {
        let left = u16::from(self.read(addr));
        let right = u16::from(self.read(addr.wrapping_add(1)));
        left << 8 | right
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
