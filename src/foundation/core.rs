use std::{fmt, sync::Arc};

use image::{DynamicImage, RgbaImage};

use crate::foundation::error::{StereoError, StereoResult};

/// Decoded RGBA8 raster shared by reference.
///
/// Cloning a `Raster` never copies pixels; eye images handed to the renderer may share the buffer
/// of the source asset.
#[derive(Clone, Debug)]
pub struct Raster {
    pixels: Arc<RgbaImage>,
}

impl Raster {
    /// Wrap an RGBA8 buffer.
    pub fn new(pixels: RgbaImage) -> Self {
        Self {
            pixels: Arc::new(pixels),
        }
    }

    /// Convert any decoded image into an RGBA8 raster.
    pub fn from_dynamic(img: DynamicImage) -> Self {
        Self::new(img.into_rgba8())
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Borrow the underlying RGBA8 buffer (row-major, tightly packed).
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Whether both rasters point at the same pixel allocation.
    pub fn shares_buffer(&self, other: &Raster) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

impl PartialEq for Raster {
    fn eq(&self, other: &Self) -> bool {
        self.shares_buffer(other) || *self.pixels == *other.pixels
    }
}

impl Eq for Raster {}

/// A decoded source photo together with the bytes it was decoded from.
///
/// Assets are immutable. Choosing a new photo builds a new asset; nothing is carried over from the
/// previous one.
#[derive(Clone, Debug)]
pub struct RawImageAsset {
    raster: Raster,
    bytes: Arc<[u8]>,
}

impl RawImageAsset {
    /// Pair an already-decoded raster with its originating byte stream.
    pub fn new(raster: Raster, bytes: impl Into<Arc<[u8]>>) -> StereoResult<Self> {
        let (width, height) = raster.dimensions();
        if width == 0 || height == 0 {
            return Err(StereoError::InvalidDimensions { width, height });
        }
        Ok(Self {
            raster,
            bytes: bytes.into(),
        })
    }

    /// The decoded primary frame.
    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// The encoded bytes the raster was decoded from.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Shared handle to the encoded bytes.
    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    /// Width of the primary frame in pixels.
    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    /// Height of the primary frame in pixels.
    pub fn height(&self) -> u32 {
        self.raster.height()
    }
}

/// Which eye an image is meant for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Eye {
    /// Left eye, rendered on layer 1.
    Left,
    /// Right eye, rendered on layer 2.
    Right,
}

impl Eye {
    /// Stable identifier the renderer binds the eye texture under.
    pub fn texture_id(self) -> &'static str {
        match self {
            Eye::Left => "leftEyeImage",
            Eye::Right => "rightEyeImage",
        }
    }

    /// Render layer that only this eye's camera sees.
    pub fn render_layer(self) -> u8 {
        match self {
            Eye::Left => 1,
            Eye::Right => 2,
        }
    }
}

/// Token minted for every photo load; later loads carry strictly larger values.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
)]
pub struct Generation(pub u64);

impl Generation {
    /// The token that follows this one.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
