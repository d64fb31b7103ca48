//! ARGB color buffer
use std::slice::ChunksExact;

use crate::error::RenderError;

/// A 32-bit ARGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0xFF00_0000);
    pub const WHITE: Color = Color(0xFFFF_FFFF);

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Color(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    /// Sum of the color channels, used to pick the most visible of several pixels.
    pub fn brightness(self) -> u16 {
        self.r() as u16 + self.g() as u16 + self.b() as u16
    }
}

/// Row-major ARGB color buffer with bounds-checked writes
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    /// Allocate a `width` x `height` buffer filled with black.
    ///
    /// Fails instead of aborting when the size is zero or the allocation
    /// cannot be satisfied.
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyBuffer { width, height });
        }
        let too_large = || RenderError::Allocation { width, height };
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(too_large)?;
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|_| too_large())?;
        pixels.resize(len, Color::BLACK.0);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Write a pixel. Coordinates outside the buffer are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(index) = self.index(x, y) {
            self.pixels[index] = color.0;
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|index| Color(self.pixels[index]))
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color.0);
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn rows(&self) -> ChunksExact<'_, u32> {
        self.pixels.chunks_exact(self.width as usize)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
}
