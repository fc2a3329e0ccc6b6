//! The monochrome display buffer.

use std::fmt;

/// A `width * height` grid of pixels, stored row by row.
/// Only CLS, DRW and [`Display::resize`] change it.
#[derive(Clone, PartialEq, Eq)]
pub struct Display {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
    redraw: bool,
}

impl Display {

    pub fn new(width: usize, height: usize) -> Display {
        Display {
            width,
            height,
            pixels: vec![false; width * height],
            redraw: true,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The pixel at `(x, y)`, coordinates wrap around both edges.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.pixels[self.index(x, y)]
    }

    pub fn clear(&mut self) {
        self.pixels.iter_mut().for_each(|p| *p = false);
        self.redraw = true;
    }

    /// XOR one row of a sprite onto the screen with its left edge at `(x, y)`.
    /// Returns whether a lit pixel was turned off.
    pub fn draw_row(&mut self, x: usize, y: usize, row: u8) -> bool {
        let mut collision = false;
        for bit in 0..8 {
            if row >> (7 - bit) & 1 == 0 {
                continue;
            }
            let index = self.index(x + bit, y);
            let pixel = &mut self.pixels[index];
            collision |= *pixel;
            *pixel = !*pixel;
        }
        self.redraw = true;
        collision
    }

    /// Replace the whole buffer with a blank one of the new size.
    /// Returns `false` and leaves the pixels alone if the size is unchanged.
    pub fn resize(&mut self, width: usize, height: usize) -> bool {
        if (width, height) == (self.width, self.height) {
            return false;
        }
        *self = Display::new(width, height);
        true
    }

    /// Whether anything changed since the last call.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::replace(&mut self.redraw, false)
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|p| !p)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.pixels.chunks(self.width)
    }

    fn index(&self, x: usize, y: usize) -> usize {
        (y % self.height) * self.width + (x % self.width)
    }
}

impl fmt::Display for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for pixel in row {
                write!(f, "{}", if *pixel { "#" } else { " " })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Display {}x{}", self.width, self.height)?;
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_display_is_blank() {
        let display = Display::new(64, 32);
        assert!(display.is_blank());
        assert_eq!(display.rows().count(), 32);
        assert!(display.rows().all(|row| row.len() == 64));
    }

    #[test]
    fn draw_row_sets_pixels_left_to_right() {
        let mut display = Display::new(64, 32);
        assert!(!display.draw_row(0, 0, 0b1010_0000));
        assert!(display.get(0, 0));
        assert!(!display.get(1, 0));
        assert!(display.get(2, 0));
    }

    #[test]
    fn draw_row_reports_collision() {
        let mut display = Display::new(64, 32);
        display.draw_row(0, 0, 0b1000_0000);
        assert!(display.draw_row(0, 0, 0b1100_0000));
        assert!(!display.get(0, 0));
        assert!(display.get(1, 0));
    }

    #[test]
    fn drawing_wraps_both_axes() {
        let mut display = Display::new(64, 32);
        display.draw_row(62, 33, 0xF0);
        assert!(display.get(62, 1));
        assert!(display.get(63, 1));
        assert!(display.get(0, 1));
        assert!(display.get(1, 1));
        assert!(!display.get(2, 1));
    }

    #[test]
    fn resize_replaces_buffer_once() {
        let mut display = Display::new(64, 32);
        display.draw_row(0, 0, 0xFF);
        assert!(!display.resize(64, 32));
        assert!(!display.is_blank());
        assert!(display.resize(128, 64));
        assert!(display.is_blank());
        assert_eq!((display.width(), display.height()), (128, 64));
    }

    #[test]
    fn redraw_flag_is_taken() {
        let mut display = Display::new(8, 2);
        assert!(display.take_redraw());
        assert!(!display.take_redraw());
        display.clear();
        assert!(display.take_redraw());
    }

    #[test]
    fn renders_lit_pixels_as_hashes() {
        let mut display = Display::new(4, 2);
        display.draw_row(0, 1, 0b0110_0000);
        assert_eq!(display.to_string(), "    \n ## \n");
    }
}
