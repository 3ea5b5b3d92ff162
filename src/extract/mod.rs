//! Stereo pair extraction for both supported layouts.

pub(crate) mod pair;
pub(crate) mod sbs;
pub(crate) mod vr180;

use crate::{
    classify::format::StereoLayout,
    extract::pair::StereoPair,
    foundation::{core::RawImageAsset, error::StereoResult},
    pipeline::{codec::ImageCodec, opts::PipelineOpts},
};

/// Produce the left/right eye images for `asset` according to its classified layout.
pub async fn extract_pair<C: ImageCodec>(
    asset: &RawImageAsset,
    layout: StereoLayout<'_>,
    codec: &C,
    opts: &PipelineOpts,
) -> StereoResult<StereoPair> {
    match layout {
        StereoLayout::Vr180 { payload, mime } => {
            vr180::extract_vr180(asset, payload, mime, codec, opts).await
        }
        StereoLayout::SideBySide => sbs::extract_side_by_side(asset, codec, opts).await,
    }
}
