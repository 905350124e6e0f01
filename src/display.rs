use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// The FrameBuffer is indexed as [y][x]
pub type FrameBuffer = [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// # Display
/// The Chip-8 display is composed of 64x32 black/white pixels.
///
/// Sprites are XORed onto the frame and wrap around its edges. The display keeps
/// track of whether it changed since the last time the host took a frame.
#[derive(Clone)]
pub struct Display {
    frame_buffer: FrameBuffer,
    draw_flag: bool,
}

impl Display {
    pub fn new() -> Self {
        Display {
            frame_buffer: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
        }
    }

    pub fn clear(&mut self) {
        self.frame_buffer = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        self.draw_flag = true;
    }

    /// draw_sprite(x, y, rows)
    /// XORs each row of `sprite` onto the frame starting at (x, y) with wrapping.
    ///
    /// Returns true if any pixel was erased anywhere in the sprite.
    ///
    /// # Arguments
    /// * `x` the column of the sprite's top left corner
    /// * `y` the row of the sprite's top left corner
    /// * `sprite` one byte per row, most significant bit leftmost
    pub fn draw(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let mut collision = false;

        for (row, byte) in sprite.iter().enumerate() {
            let y = (usize::from(y) + row) % DISPLAY_HEIGHT;
            for bit in 0..8 {
                if byte & (0x80 >> bit) == 0 {
                    continue;
                }
                let x = (usize::from(x) + bit) % DISPLAY_WIDTH;
                let pixel = &mut self.frame_buffer[y][x];
                collision |= *pixel;
                *pixel ^= true;
            }
        }

        self.draw_flag = true;
        collision
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.frame_buffer[y % DISPLAY_HEIGHT][x % DISPLAY_WIDTH]
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    /// Whether the frame changed since it was last taken
    pub fn is_dirty(&self) -> bool {
        self.draw_flag
    }

    /// Returns the FrameBuffer if the display should be redrawn and unsets the draw flag
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.draw_flag {
            self.draw_flag = false;
            Some(self.frame_buffer)
        } else {
            None
        }
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_pixels(display: &Display) -> Vec<(usize, usize)> {
        let mut lit = Vec::new();
        for y in 0..DISPLAY_HEIGHT {
            for x in 0..DISPLAY_WIDTH {
                if display.pixel(x, y) {
                    lit.push((x, y));
                }
            }
        }
        lit
    }

    #[test]
    fn test_starts_blank_and_clean() {
        let display = Display::new();
        assert!(lit_pixels(&display).is_empty());
        assert!(!display.is_dirty());
    }

    #[test]
    fn test_draw_sets_pixels() {
        let mut display = Display::new();
        let collision = display.draw(1, 1, &[0xF0, 0x90]);
        assert!(!collision);
        assert_eq!(
            lit_pixels(&display),
            vec![(1, 1), (2, 1), (3, 1), (4, 1), (1, 2), (4, 2)]
        );
    }

    #[test]
    fn test_draw_wraps_both_axes() {
        let mut display = Display::new();
        display.draw(60, 30, &[0xFF; 4]);
        for &y in &[30, 31, 0, 1] {
            for &x in &[60, 61, 62, 63, 0, 1, 2, 3] {
                assert!(display.pixel(x, y), "expected ({}, {}) to be lit", x, y);
            }
        }
        assert_eq!(lit_pixels(&display).len(), 32);
    }

    #[test]
    fn test_draw_twice_restores_frame_and_collides() {
        let mut display = Display::new();
        display.draw(10, 5, &[0x3C, 0x42]);
        display.draw(10, 5, &[0x3C, 0x42]);
        assert!(lit_pixels(&display).is_empty());
        assert!(!display.draw(10, 5, &[0x3C]));
        assert!(display.draw(10, 5, &[0x3C]));
    }

    #[test]
    fn test_collision_survives_later_rows() {
        let mut display = Display::new();
        display.draw(0, 0, &[0x80]);
        // the first row erases (0, 0); the second row lights fresh pixels
        assert!(display.draw(0, 0, &[0x80, 0xFF]));
    }

    #[test]
    fn test_draw_xors() {
        let mut display = Display::new();
        display.draw(2, 0, &[0x50]);
        display.draw(2, 0, &[0xC0]);
        let row: Vec<bool> = (2..6).map(|x| display.pixel(x, 0)).collect();
        assert_eq!(row, vec![true, false, false, true]);
    }

    #[test]
    fn test_clear_blanks_frame() {
        let mut display = Display::new();
        display.draw(0, 0, &[0xFF]);
        display.clear();
        assert!(lit_pixels(&display).is_empty());
        assert!(display.is_dirty());
    }

    #[test]
    fn test_take_frame_unsets_draw_flag() {
        let mut display = Display::new();
        assert!(display.take_frame().is_none());
        display.draw(0, 0, &[0x80]);
        let frame = display.take_frame().unwrap();
        assert!(frame[0][0]);
        assert!(display.take_frame().is_none());
    }
}
