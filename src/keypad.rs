use crate::constants::KEY_COUNT;

/// # Keypad
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// The pressed status of keys 0..F is tracked as a 16-bit mask where bit k is set
/// while key k is held.
#[derive(Clone, Copy, Default)]
pub struct Keypad {
    pressed_keys: u16,
}

impl Keypad {
    pub fn new() -> Self {
        Keypad { pressed_keys: 0 }
    }

    /// Replace the pressed status of every key at once
    pub fn set_mask(&mut self, mask: u16) {
        self.pressed_keys = mask;
    }

    pub fn mask(&self) -> u16 {
        self.pressed_keys
    }

    /// Set the pressed status of key; keys outside 0..F are ignored
    pub fn press(&mut self, key: u8) {
        if key < KEY_COUNT {
            self.pressed_keys |= 1 << key;
        }
    }

    /// Unset the pressed status of key; keys outside 0..F are ignored
    pub fn release(&mut self, key: u8) {
        if key < KEY_COUNT {
            self.pressed_keys &= !(1 << key);
        }
    }

    pub fn release_all(&mut self) {
        self.pressed_keys = 0;
    }

    /// A register can hold values past 0xF; no such key exists so it is never held
    pub fn is_pressed(&self, key: u8) -> bool {
        key < KEY_COUNT && self.pressed_keys & (1 << key) != 0
    }

    /// The lowest numbered key currently held
    pub fn first_pressed(&self) -> Option<u8> {
        if self.pressed_keys == 0 {
            None
        } else {
            Some(self.pressed_keys.trailing_zeros() as u8)
        }
    }
}
