//! Access to the raster that terrain is sampled from

use crate::Color;

/// A fixed-size raster that can be asked for the color of a single pixel.
///
/// The graph never stores the raster itself; it only samples colors through
/// this trait while [`build_nodes`](crate::TerrainGraph::build_nodes) runs.
/// This allows the caller to keep the image in whatever format they want
/// (a decoded bitmap, a tile atlas, a procedural function, ...), as long as a
/// specific `(x, y)` can be resolved to an RGBA value. Implementations are
/// expected to be pure for the lifetime of one build.
pub trait PixelSource {
    /// Width of the raster in pixels.
    fn width(&self) -> usize;
    /// Height of the raster in pixels.
    fn height(&self) -> usize;
    /// The RGBA color of the pixel at `(x, y)`.
    ///
    /// Only called with `x < width()` and `y < height()`.
    fn color_at(&self, x: usize, y: usize) -> Color;
}

/// A simple row-major in-memory [`PixelSource`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl PixelBuffer {
    /// Creates a buffer of `width * height` pixels, all set to `background`.
    pub fn new(width: usize, height: usize, background: Color) -> PixelBuffer {
        PixelBuffer {
            width,
            height,
            pixels: vec![background; width * height],
        }
    }

    /// Creates a buffer by evaluating `f` at every `(x, y)`.
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> Color,
    ) -> PixelBuffer {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        PixelBuffer {
            width,
            height,
            pixels,
        }
    }

    /// Overwrites the pixel at `(x, y)`.
    ///
    /// Panics if `(x, y)` is outside the buffer.
    pub fn set(&mut self, x: usize, y: usize, color: Color) {
        assert!(x < self.width && y < self.height, "pixel out of range");
        self.pixels[y * self.width + x] = color;
    }

    /// Overwrites every pixel of the axis-aligned rectangle starting at
    /// `(x, y)` with size `w * h`, clipped to the buffer.
    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: Color) {
        for j in y..(y + h).min(self.height) {
            for i in x..(x + w).min(self.width) {
                self.pixels[j * self.width + i] = color;
            }
        }
    }
}

impl PixelSource for PixelBuffer {
    fn width(&self) -> usize {
        self.width
    }
    fn height(&self) -> usize {
        self.height
    }
    fn color_at(&self, x: usize, y: usize) -> Color {
        self.pixels[y * self.width + x]
    }
}
