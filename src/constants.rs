/// Bytes of addressable memory
pub const MEMORY_SIZE: usize = 4096;

/// Every address is kept within 12 bits
pub const ADDRESS_MASK: u16 = 0x0FFF;

/// 0x200 is where ROMs are loaded into memory
pub const PROGRAM_START: u16 = 0x200;

/// The largest ROM that fits between `PROGRAM_START` and the end of memory
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

pub const REGISTER_COUNT: usize = 16;
pub const STACK_DEPTH: usize = 16;
pub const KEY_COUNT: u8 = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Instructions per second unless the host asks for something else
pub const CLOCK_SPEED: u32 = 500;

/// The delay and sound timers count down at 60Hz
pub const TIMER_FREQUENCY: u32 = 60;

/// Each hex digit sprite is 5 rows tall
pub const GLYPH_SIZE: u16 = 5;

/// # Sprite Sheet
/// Sprites for the hex digits 0..F, stored at the very start of memory.
///
/// Each glyph is 8x5 pixels with only the high nibble of every row in use:
/// ```text
/// 0xF0  ****
/// 0x90  *  *
/// 0x90  *  *
/// 0x90  *  *
/// 0xF0  ****
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
