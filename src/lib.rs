//! stereo180 turns a stereoscopic 180° photo into the two eye textures and the horizon
//! correction a VR viewer needs.
//!
//! # Pipeline overview
//!
//! 1. **Classify**: `MetadataTree -> StereoLayout` (VR180 if Extended XMP embeds a right-eye
//!    image, side-by-side otherwise)
//! 2. **Extract**: `RawImageAsset + StereoLayout -> StereoPair` (payload decode or half split)
//! 3. **Correct**: `MetadataTree -> OrientationCorrection` (GPano pose, zero when absent)
//! 4. **Commit**: the [`Coordinator`] delivers pair + correction to a [`StereoSink`], but only for
//!    the most recently started load
//!
//! Constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Total metadata access**: every metadata read goes through [`lookup`], which cannot fail.
//! - **Codec is a collaborator**: decoding and encoding happen behind [`ImageCodec`]; the default
//!   [`ImageCrateCodec`] uses the `image` crate on tokio's blocking pool.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod classify;
mod extract;
mod foundation;
mod metadata;
mod orientation;

/// Pipeline coordination and collaborator contracts.
pub mod pipeline;

pub use classify::format::{StereoFormat, StereoLayout, classify, classify_format};
pub use extract::extract_pair;
pub use extract::pair::{EyeImage, StereoPair};
pub use extract::sbs::split_halves;
pub use extract::vr180::decode_payload;
pub use foundation::core::{Eye, Generation, Raster, RawImageAsset};
pub use foundation::error::{FailureKind, StereoError, StereoResult};
pub use metadata::traversal::{
    GIMAGE_DATA, GIMAGE_MIME, GPANO_POSE_PITCH, GPANO_POSE_ROLL, Lookup,
    XMP_DESCRIPTION_ATTRIBUTES, description_attribute, lookup,
};
pub use metadata::tree::{MetaNode, MetadataTree};
pub use orientation::resolver::{OrientationCorrection, resolve_from_xmp, resolve_orientation};
pub use pipeline::codec::{
    ImageCodec, ImageCrateCodec, decode_raster, encode_jpeg_raster, load_asset,
};
pub use pipeline::coordinator::{Coordinator, RunOutcome};
pub use pipeline::opts::{PipelineOpts, ReencodePolicy};
pub use pipeline::sink::{LatestSink, Presentation, StereoSink};
pub use pipeline::state::{LoadStatus, PipelineState};
