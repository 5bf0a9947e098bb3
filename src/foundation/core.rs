use crate::foundation::error::{MemeError, MemeResult};
use crate::foundation::math::Fnv1a64;

pub use kurbo::{Point, Rect};

/// Bytes per pixel in every [`Raster`] buffer.
pub const RGBA_CHANNELS: usize = 4;

/// Decoded bitmap in straight-alpha RGBA8, row-major, tightly packed.
///
/// A raster is immutable once built. Compositing always produces a new raster, so a base image can
/// be re-captioned any number of times and every preview stays reproducible from its inputs.
#[derive(Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    /// Build a raster from straight RGBA8 bytes.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> MemeResult<Self> {
        if width == 0 || height == 0 {
            return Err(MemeError::config("raster width and height must be > 0"));
        }
        let expected = byte_len(width, height);
        if data.len() != expected {
            return Err(MemeError::config(format!(
                "raster byte len mismatch: expected {expected}, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a raster with every pixel set to `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> MemeResult<Self> {
        let n = (width as usize).saturating_mul(height as usize);
        let data = rgba.repeat(n);
        Self::new(width, height, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Straight RGBA8 pixel bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Pixel at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * RGBA_CHANNELS;
        let px = &self.data[i..i + RGBA_CHANNELS];
        Some([px[0], px[1], px[2], px[3]])
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    /// Pixel-by-pixel comparison that returns how many pixels differ.
    pub fn count_differing_pixels(&self, other: &Raster) -> Option<usize> {
        if self.dimensions() != other.dimensions() {
            return None;
        }
        Some(
            self.data
                .chunks_exact(RGBA_CHANNELS)
                .zip(other.data.chunks_exact(RGBA_CHANNELS))
                .filter(|(a, b)| a != b)
                .count(),
        )
    }

    /// Stable 64-bit fingerprint of dimensions and pixels.
    pub fn digest(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_u32(self.width);
        h.write_u32(self.height);
        h.write_bytes(&self.data);
        h.finish()
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl std::fmt::Debug for Raster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

fn byte_len(width: u32, height: u32) -> usize {
    (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(RGBA_CHANNELS)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
