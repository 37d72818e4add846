use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// # Frame Buffer
/// 64x32 monochrome cells, one byte (0 or 1) each, stored row-major.
///
/// Sprites are XORed in and wrap around both edges of the screen.
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    cells: [u8; DISPLAY_WIDTH * DISPLAY_HEIGHT],
}

impl Framebuffer {
    pub fn new() -> Self {
        Framebuffer {
            cells: [0; DISPLAY_WIDTH * DISPLAY_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.cells = [0; DISPLAY_WIDTH * DISPLAY_HEIGHT];
    }

    /// The cell at column `x`, row `y`; coordinates wrap.
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.cells[Self::index(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        self.cells[Self::index(x, y)] = value & 0x1;
    }

    /// XORs `sprite` (one byte per row, MSB leftmost) in at `(x, y)`.
    ///
    /// Returns whether any lit cell was turned off.
    pub fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (line, byte) in sprite.iter().enumerate() {
            for bit in 0..8 {
                if byte & (0x80 >> bit) == 0 {
                    continue;
                }
                let cell = &mut self.cells[Self::index(usize::from(x) + bit, usize::from(y) + line)];
                collision |= *cell == 1;
                *cell ^= 1;
            }
        }
        collision
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Rows from top to bottom, each `DISPLAY_WIDTH` cells long.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(DISPLAY_WIDTH)
    }

    fn index(x: usize, y: usize) -> usize {
        (y % DISPLAY_HEIGHT) * DISPLAY_WIDTH + x % DISPLAY_WIDTH
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|&c| if c == 1 { '#' } else { '.' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draws_msb_first() {
        let mut frame = Framebuffer::new();
        let collision = frame.draw_sprite(1, 1, &[0b1100_0001]);
        assert!(!collision);
        assert_eq!(frame.rows().nth(1).unwrap()[1..9], [1, 1, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_xors_over_existing_cells() {
        let mut frame = Framebuffer::new();
        // 0 1 0 1 already lit
        frame.set(3, 0, 1);
        frame.set(5, 0, 1);
        // 1 1 0 0 drawn over it
        let collision = frame.draw_sprite(2, 0, &[0b1100_0000]);
        assert!(collision);
        assert_eq!(frame.cells()[2..6], [1, 0, 0, 1]);
    }

    #[test]
    fn test_collision_survives_later_bits() {
        // first bit collides, the rest light new cells
        let mut frame = Framebuffer::new();
        frame.set(0, 0, 1);
        assert!(frame.draw_sprite(0, 0, &[0xFF, 0xFF]));
    }

    #[test]
    fn test_wraps_both_axes() {
        let mut frame = Framebuffer::new();
        frame.draw_sprite(62, 31, &[0b1110_0000, 0b1000_0000]);
        assert_eq!(frame.get(62, 31), 1);
        assert_eq!(frame.get(63, 31), 1);
        assert_eq!(frame.get(0, 31), 1);
        assert_eq!(frame.get(62, 0), 1);
        assert_eq!(frame.cells().iter().filter(|&&c| c == 1).count(), 4);
    }

    #[test]
    fn test_draw_twice_restores() {
        let mut frame = Framebuffer::new();
        frame.set(10, 10, 1);
        let before = frame.clone();
        frame.draw_sprite(8, 9, &[0xA5, 0x3C, 0xFF]);
        frame.draw_sprite(8, 9, &[0xA5, 0x3C, 0xFF]);
        assert_eq!(frame, before);
    }

    #[test]
    fn test_clear() {
        let mut frame = Framebuffer::new();
        frame.draw_sprite(0, 0, &[0xFF; 15]);
        frame.clear();
        assert!(frame.cells().iter().all(|&c| c == 0));
    }
}
