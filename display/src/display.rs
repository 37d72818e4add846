use sdl2::pixels::PixelFormatEnum;
use sdl2::render::WindowCanvas;

use emu8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use emu8_core::Framebuffer;

const BYTES_PER_PIXEL: usize = 3;

/// # Display
/// The Chip-8 display is composed of 64x32 black/white pixels.
/// Each frame buffer cell is 1 (white) or 0 (black) and is drawn as a
/// `scale` by `scale` square.
/// The display only gets a call to `render` when the frame buffer has changed.
pub struct Display {
    canvas: WindowCanvas,
}

impl Display {
    /// Opens a window bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` window pixels per Chip-8 pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, String> {
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                "Emu-8",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;
        let canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .map_err(|e| e.to_string())?;

        let mut display = Display { canvas };
        display.render(&Framebuffer::new())?;
        Ok(display)
    }

    /// Formats a Chip-8 Framebuffer as an SDL2 RGB24 texture.
    ///
    /// An RGB24 texture is a flat array of bytes, three per pixel, row after row.
    /// Each cell is triplicated and multiplied by 255 to go from on/off to intensity.
    fn frame_to_sdl_texture(frame: &Framebuffer) -> Vec<u8> {
        frame
            .cells()
            .iter()
            .flat_map(|&cell| std::iter::repeat(cell * 255).take(BYTES_PER_PIXEL))
            .collect()
    }

    /// Formats the Framebuffer as an SDL2 RGB24 texture and presents it,
    /// stretched over the whole window.
    pub fn render(&mut self, frame: &Framebuffer) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();
        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .map_err(|e| e.to_string())?;

        let pixels = Display::frame_to_sdl_texture(frame);
        texture
            .update(None, &pixels, DISPLAY_WIDTH * BYTES_PER_PIXEL)
            .map_err(|e| e.to_string())?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}
