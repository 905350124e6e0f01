use anyhow::{anyhow, Result};
use sdl2::pixels::PixelFormatEnum;

use emu8::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use emu8::FrameBuffer;

const TITLE: &str = "Emu-8";
const BYTES_PER_PIXEL: usize = 3;

/// # Display
/// An SDL2 window showing the Chip-8's 64x32 black/white pixels scaled up.
/// The display only gets a call to `render` when the Chip-8 FrameBuffer is updated.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self> {
        let video_subsystem = sdl.video().map_err(|e| anyhow!(e))?;
        let window = video_subsystem
            .window(
                TITLE,
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .opengl()
            .build()?;
        let canvas = window.into_canvas().build()?;

        Ok(Display { canvas })
    }

    /// Formats a Chip-8 FrameBuffer for rendering as an SDL2 texture.
    ///
    /// An SDL2 texture is a 1D array of bytes that represent concatenated rows of RGB pixels.
    /// Lit pixels become white and unlit ones black.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    fn frame_to_sdl_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .iter()
            .flat_map(|row| row.iter())
            .flat_map(|&lit| std::iter::repeat(if lit { 255 } else { 0 }).take(BYTES_PER_PIXEL))
            .collect()
    }

    /// Formats the Chip-8 FrameBuffer as an SDL2 RGB24 texture and renders it.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<()> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator.create_texture_streaming(
            PixelFormatEnum::RGB24,
            DISPLAY_WIDTH as u32,
            DISPLAY_HEIGHT as u32,
        )?;

        let pixels = Display::frame_to_sdl_texture(frame);
        texture
            .with_lock(None, |buffer: &mut [u8], pitch: usize| {
                let row_size = DISPLAY_WIDTH * BYTES_PER_PIXEL;
                for (y, row) in pixels.chunks(row_size).enumerate() {
                    buffer[y * pitch..y * pitch + row_size].copy_from_slice(row);
                }
            })
            .map_err(|e| anyhow!(e))?;

        self.canvas.copy(&texture, None, None).map_err(|e| anyhow!(e))?;
        self.canvas.present();
        Ok(())
    }

    /// Shows the measured speed and whether a tone should be sounding in the title bar
    pub fn set_status(&mut self, steps_per_second: u32, sound: bool) -> Result<()> {
        let title = if sound {
            format!("{} - {} steps/s - \u{266A}", TITLE, steps_per_second)
        } else {
            format!("{} - {} steps/s", TITLE, steps_per_second)
        };
        self.canvas.window_mut().set_title(&title)?;
        Ok(())
    }
}
