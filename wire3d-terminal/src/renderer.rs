/// Terminal presentation of the pixel buffer
///
/// Every character cell shows two vertically stacked pixels using the upper
/// half block: foreground is the top pixel, background the bottom one.
use crossterm::{
    cursor::MoveTo,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wire3d_core::{BufferError, Color, PixelBuffer};

const HALF_BLOCK: char = '\u{2580}';

/// Rows are padded to a multiple of this many pixels
const ROW_ALIGN: usize = 8;

/// Pixel storage sized to the terminal, owned across frames
pub struct TerminalCanvas {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
    stride: usize,
}

impl TerminalCanvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        let mut canvas = Self {
            pixels: Vec::new(),
            width: 0,
            height: 0,
            stride: 0,
        };
        canvas.resize(cols, rows);
        canvas
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.width = u32::from(cols);
        self.height = u32::from(rows) * 2;
        self.stride = (self.width as usize).div_ceil(ROW_ALIGN) * ROW_ALIGN;
        self.pixels = vec![0; self.stride * self.height as usize];
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

    /// Borrow the storage as a drawable buffer for one frame
    pub fn buffer(&mut self) -> Result<PixelBuffer<'_>, BufferError> {
        PixelBuffer::new(&mut self.pixels, self.width, self.height, self.stride)
    }

    fn pixel(&self, x: usize, y: usize) -> Color {
        Color(self.pixels[y * self.stride + x])
    }

    /// Queue the whole canvas; the caller flushes
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current: Option<(Color, Color)> = None;

        for row in 0..(self.height / 2) as usize {
            writer.queue(MoveTo(0, row as u16))?;
            for x in 0..self.width as usize {
                let top = self.pixel(x, 2 * row);
                let bottom = self.pixel(x, 2 * row + 1);

                if current != Some((top, bottom)) {
                    writer.queue(SetForegroundColor(term_color(top)))?;
                    writer.queue(SetBackgroundColor(term_color(bottom)))?;
                    current = Some((top, bottom));
                }
                writer.queue(Print(HALF_BLOCK))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

fn term_color(c: Color) -> TermColor {
    TermColor::Rgb {
        r: c.r(),
        g: c.g(),
        b: c.b(),
    }
}
