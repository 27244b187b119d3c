use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// The FrameBuffer is indexed as [y][x]; `true` is a lit pixel.
pub type FrameBuffer = [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// # Screen
/// The 64x32 monochrome display surface.
///
/// Programs can only clear it or XOR sprites onto it; renderers get a read-only view of the
/// FrameBuffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    frame_buffer: FrameBuffer,
}

impl Screen {
    pub fn new() -> Self {
        Screen {
            frame_buffer: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.frame_buffer = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    }

    /// XORs a sprite onto the FrameBuffer and reports whether any lit pixel was erased.
    ///
    /// Each byte of `sprite` is one 8 pixel row, most significant bit leftmost. The starting
    /// corner wraps around the display but the sprite itself is clipped at the right and
    /// bottom edges.
    ///
    /// # Arguments
    /// * `x` the column of the sprite's top left corner
    /// * `y` the row of the sprite's top left corner
    /// * `sprite` the rows of the sprite
    pub fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let left = x as usize % DISPLAY_WIDTH;
        let top = y as usize % DISPLAY_HEIGHT;
        let mut collision = false;

        for (row, byte) in sprite.iter().enumerate() {
            let y = top + row;
            if y >= DISPLAY_HEIGHT {
                break;
            }
            for bit in 0..8 {
                let x = left + bit;
                if x >= DISPLAY_WIDTH {
                    break;
                }
                if (byte >> (7 - bit)) & 0x1 == 0x1 {
                    let pixel = &mut self.frame_buffer[y][x];
                    collision |= *pixel;
                    *pixel = !*pixel;
                }
            }
        }
        collision
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.frame_buffer[y][x]
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame_buffer
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}
