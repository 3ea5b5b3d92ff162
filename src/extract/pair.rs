use std::sync::Arc;

use crate::{
    classify::format::StereoFormat,
    foundation::core::{Eye, Raster},
};

/// One eye's texture, ready for binding.
#[derive(Clone, Debug)]
pub struct EyeImage {
    /// Which eye this image belongs to.
    pub eye: Eye,
    /// Decoded pixels.
    pub raster: Raster,
    /// Encoded form of `raster`, when one exists (original payload or re-encoded half).
    pub encoded: Option<Arc<[u8]>>,
}

impl EyeImage {
    /// Identifier the renderer binds this texture under.
    pub fn texture_id(&self) -> &'static str {
        self.eye.texture_id()
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        self.raster.dimensions()
    }
}

/// Left and right eye images for one photo.
///
/// Ownership moves to the renderer on delivery.
#[derive(Clone, Debug)]
pub struct StereoPair {
    /// Layout the pair was extracted from.
    pub format: StereoFormat,
    /// Left eye image.
    pub left: EyeImage,
    /// Right eye image.
    pub right: EyeImage,
}

impl StereoPair {
    /// Eye image for `eye`.
    pub fn eye(&self, eye: Eye) -> &EyeImage {
        match eye {
            Eye::Left => &self.left,
            Eye::Right => &self.right,
        }
    }
}
