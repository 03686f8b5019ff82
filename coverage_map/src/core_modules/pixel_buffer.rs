// THEORY:
// The `PixelBuffer` is the read-only window the resolver looks through. The engine
// never decodes an image itself; the acquisition stage hands over something that can
// answer "what color is at (x, y)" together with fixed bounds.
//
// Key architectural principles:
// 1.  **Trait At The Seam**: Decoded `image` buffers implement the trait directly, so
//     a map loaded by any caller can be probed without conversion. `RasterGrid` is the
//     engine's own owned buffer for synthetic maps and raw RGBA frames.
// 2.  **Bounds Are The Caller's Contract**: `color_at` assumes an in-bounds point.
//     Anything that generates candidate points (the ring search) checks `contains`
//     first, using signed coordinates so points left of or above the origin are
//     representable and simply rejected.

use crate::core_modules::color_key::ColorKey;
use crate::error::BufferError;
use image::{ImageBuffer, Rgba};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// A pixel coordinate on a map image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Read-only 2-D color lookup with fixed bounds.
pub trait PixelBuffer {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// The color at `point`. Callers must ensure `point` is inside the buffer.
    fn color_at(&self, point: Point) -> ColorKey;

    fn contains(&self, x: i64, y: i64) -> bool {
        (0..i64::from(self.width())).contains(&x) && (0..i64::from(self.height())).contains(&y)
    }

    fn contains_point(&self, point: Point) -> bool {
        point.x < self.width() && point.y < self.height()
    }
}

impl<B: PixelBuffer + ?Sized> PixelBuffer for &B {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn color_at(&self, point: Point) -> ColorKey {
        (**self).color_at(point)
    }
}

impl<C> PixelBuffer for ImageBuffer<Rgba<u8>, C>
where
    C: Deref<Target = [u8]>,
{
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn color_at(&self, point: Point) -> ColorKey {
        ColorKey::from(self.get_pixel(point.x, point.y))
    }
}

/// An owned, row-major buffer of colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterGrid {
    width: u32,
    height: u32,
    pixels: Vec<ColorKey>,
}

impl RasterGrid {
    /// A `width` x `height` grid where every pixel is `color`.
    pub fn filled(width: u32, height: u32, color: ColorKey) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Wraps a tightly packed RGBA byte buffer (4 bytes per pixel, row-major).
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self, BufferError> {
        let length_error = |expected| BufferError::Length {
            width,
            height,
            expected,
            found: bytes.len(),
        };
        // Dimensions whose byte count overflows `usize` can never be backed by a slice.
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or_else(|| length_error(usize::MAX))?;
        if bytes.len() != expected {
            return Err(length_error(expected));
        }

        let pixels = bytes
            .chunks_exact(4)
            .map(ColorKey::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Overwrites one pixel. Out-of-bounds writes are ignored.
    pub fn set(&mut self, point: Point, color: ColorKey) {
        if self.contains_point(point) {
            let index = self.index(point);
            self.pixels[index] = color;
        }
    }

    pub fn pixels(&self) -> &[ColorKey] {
        &self.pixels
    }

    fn index(&self, point: Point) -> usize {
        point.y as usize * self.width as usize + point.x as usize
    }
}

impl PixelBuffer for RasterGrid {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn color_at(&self, point: Point) -> ColorKey {
        self.pixels[self.index(point)]
    }
}
