pub const WIDTH: usize = 64;
pub const HEIGHT: usize = 32;

const PIXEL_ON: u32 = 0x00_7F_FF;
const PIXEL_OFF: u32 = 0x00_00_00;

/// Monochrome 64x32 screen. Pixels only change through `paint` and
/// `clear_buffer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    bit_buffer: Vec<bool>,
    frame_ready: bool,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            bit_buffer: vec![false; WIDTH * HEIGHT],
            frame_ready: false,
        }
    }

    pub fn clear_buffer(&mut self) {
        self.bit_buffer.fill(false);
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        x < WIDTH && y < HEIGHT && self.bit_buffer[y * WIDTH + x]
    }

    pub fn pixels(&self) -> &[bool] {
        &self.bit_buffer
    }

    pub fn lit_count(&self) -> usize {
        self.bit_buffer.iter().filter(|p| **p).count()
    }

    pub fn frame_ready(&self) -> bool {
        self.frame_ready
    }

    pub fn set_frame_ready(&mut self) {
        self.frame_ready = true;
    }

    pub fn clear_frame_ready(&mut self) {
        self.frame_ready = false;
    }

    /// XOR the sprite rows onto the screen with the top left corner at
    /// (x mod 64, y mod 32). Pixels past the right or bottom edge are clipped.
    /// Returns true when any lit pixel was switched off.
    pub fn paint(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let (x, y) = (x as usize % WIDTH, y as usize % HEIGHT);
        let mut vf = false;
        for (i, row) in sprite.iter().enumerate() {
            let ny = y + i;
            if ny >= HEIGHT {
                break;
            }
            for j in 0..8 {
                let nx = x + j;
                if nx >= WIDTH {
                    break;
                }
                if (row >> (7 - j)) & 1 == 0 {
                    continue;
                }
                let index = (ny * WIDTH) + nx;
                if self.bit_buffer[index] {
                    vf = true;
                }
                self.bit_buffer[index] ^= true;
            }
        }
        vf
    }

    /// 0RGB pixels, one per cell, for hosts that blit 32-bit buffers.
    pub fn to_argb(&self) -> Vec<u32> {
        self.bit_buffer
            .iter()
            .map(|p| if *p { PIXEL_ON } else { PIXEL_OFF })
            .collect()
    }
}
