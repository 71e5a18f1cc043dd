/// Scan conversion into a caller-owned pixel buffer
///
/// The buffer is a borrowed view over packed 32-bit colors with an explicit
/// row stride. Drawing only ever overwrites cells; anything outside
/// `0..width` x `0..height` is dropped by [`PixelBuffer::set_pixel`].
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default half-size of a vertex marker, in pixels
pub const POINT_RADIUS: i32 = 2;

/// Packed RGBA color, red in the most significant byte (`0xRRGGBBAA`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    pub const RED: Color = Color::rgba(255, 0, 0, 255);
    pub const YELLOW: Color = Color::rgba(255, 255, 0, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color(u32::from_be_bytes([r, g, b, a]))
    }

    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn a(self) -> u8 {
        self.0 as u8
    }
}

/// Rejected buffer geometry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    StrideTooSmall { stride: usize, width: u32 },
    TooSmall { needed: usize, len: usize },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::StrideTooSmall { stride, width } => {
                write!(f, "row stride {stride} is smaller than width {width}")
            }
            BufferError::TooSmall { needed, len } => {
                write!(f, "pixel storage holds {len} cells, {needed} needed")
            }
        }
    }
}

impl std::error::Error for BufferError {}

/// Mutable view of a `width` x `height` grid of packed colors.
///
/// Cell `(x, y)` lives at `y * stride + x`. The view is borrowed for one
/// frame and never outlives the storage it was made from.
pub struct PixelBuffer<'a> {
    pixels: &'a mut [u32],
    width: u32,
    height: u32,
    stride: usize,
}

impl<'a> PixelBuffer<'a> {
    pub fn new(
        pixels: &'a mut [u32],
        width: u32,
        height: u32,
        stride: usize,
    ) -> Result<Self, BufferError> {
        if stride < width as usize {
            return Err(BufferError::StrideTooSmall { stride, width });
        }

        let needed = if width == 0 || height == 0 {
            0
        } else {
            (height as usize - 1) * stride + width as usize
        };
        if pixels.len() < needed {
            return Err(BufferError::TooSmall {
                needed,
                len: pixels.len(),
            });
        }

        Ok(Self {
            pixels,
            width,
            height,
            stride,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.stride + x as usize)
    }

    /// Fill every visible cell; stride padding is left alone
    pub fn clear(&mut self, color: Color) {
        let width = self.width as usize;
        for row in self.pixels.chunks_mut(self.stride.max(1)).take(self.height as usize) {
            let end = width.min(row.len());
            row[..end].fill(color.0);
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| Color(self.pixels[i]))
    }

    /// Write `color` at `(x, y)`; out-of-range coordinates are ignored
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color.0;
        }
    }

    /// Fill the `(2 * radius + 1)` square centered on `(cx, cy)`. A negative
    /// radius draws nothing.
    pub fn draw_point(&mut self, cx: i32, cy: i32, color: Color, radius: i32) {
        if radius < 0 {
            return;
        }
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                self.set_pixel(cx.saturating_add(dx), cy.saturating_add(dy), color);
            }
        }
    }

    /// Bresenham line between two integer endpoints, both inclusive.
    ///
    /// Endpoints are put in a canonical order first, so a segment produces the
    /// same pixels whichever way round it is drawn.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let ((x0, y0), (x1, y1)) = if (x0, y0) <= (x1, y1) {
            ((x0, y0), (x1, y1))
        } else {
            ((x1, y1), (x0, y0))
        };

        // i64 keeps 2 * err clear of overflow for far off-screen endpoints
        let (x1, y1) = (x1 as i64, y1 as i64);
        let (mut x, mut y) = (x0 as i64, y0 as i64);
        let dx = (x1 - x).abs();
        let dy = (y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx - dy;

        loop {
            self.set_pixel(x as i32, y as i32, color);

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Outline `a -> b -> c -> a`. No fill, no culling.
    pub fn draw_triangle_outline(
        &mut self,
        a: (i32, i32),
        b: (i32, i32),
        c: (i32, i32),
        color: Color,
    ) {
        self.draw_line(a.0, a.1, b.0, b.1, color);
        self.draw_line(b.0, b.1, c.0, c.1, color);
        self.draw_line(c.0, c.1, a.0, a.1, color);
    }
}
