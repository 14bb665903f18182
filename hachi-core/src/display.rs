use std::fmt;

/// A 1-bit-per-pixel framebuffer, row-major, `(0, 0)` at the top left.
#[derive(Clone, PartialEq, Eq)]
pub struct MonochromeDisplay {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
}

impl fmt::Debug for MonochromeDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lit = self.pixels.iter().filter(|p| **p).count();
        write!(f, "MonochromeDisplay[{}x{}, {} lit]", self.width, self.height, lit)
    }
}

impl MonochromeDisplay {
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Self {
        if width == 0 || height == 0 {
            panic!("MonochromeDisplay dimensions must be non-zero, got {}x{}", width, height);
        }

        Self {
            width,
            height,
            pixels: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.pixels.fill(false);
    }

    /// Returns the pixel at `(x, y)`; anything off-screen reads as unlit.
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.pixels[y * self.width + x]
    }

    pub fn pixels(&self) -> &[bool] {
        &self.pixels
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.pixels.chunks(self.width)
    }

    /// XORs 8-pixel-wide sprite rows into the framebuffer with the top-left
    /// corner at `(x, y)`, most significant bit leftmost.
    ///
    /// The origin wraps onto the screen, but the sprite itself is clipped at
    /// the right and bottom edges. Returns `true` if any lit pixel was
    /// turned off.
    pub fn xor_sprite(&mut self, x: usize, y: usize, rows: &[u8]) -> bool {
        let origin_x = x % self.width;
        let origin_y = y % self.height;
        let mut collision = false;

        for (row_idx, row) in rows.iter().enumerate() {
            let py = origin_y + row_idx;
            if py >= self.height {
                break;
            }
            for bit in 0..8 {
                let px = origin_x + bit;
                if px >= self.width {
                    break;
                }
                if row & (0x80 >> bit) == 0 {
                    continue;
                }
                let pixel = &mut self.pixels[py * self.width + px];
                collision |= *pixel;
                *pixel = !*pixel;
            }
        }

        tracing::trace!(
            "xor sprite of {} rows at ({}, {}), collision: {}",
            rows.len(),
            origin_x,
            origin_y,
            collision
        );
        collision
    }
}
