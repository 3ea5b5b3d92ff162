use std::sync::Arc;

use image::imageops;

use crate::{
    classify::format::StereoFormat,
    extract::pair::{EyeImage, StereoPair},
    foundation::{
        core::{Eye, Raster, RawImageAsset},
        error::{StereoError, StereoResult},
    },
    pipeline::{
        codec::{ImageCodec, bounded},
        opts::{PipelineOpts, ReencodePolicy},
    },
};

/// Split a side-by-side frame into `(left, right)` halves.
///
/// Each half is `floor(width / 2)` wide and full height. With an odd width the last column
/// belongs to neither half. Pixels are copied 1:1.
pub fn split_halves(raster: &Raster) -> StereoResult<(Raster, Raster)> {
    let (width, height) = raster.dimensions();
    let half_width = width / 2;
    if half_width == 0 || height == 0 {
        return Err(StereoError::InvalidDimensions { width, height });
    }

    let half = |index: u32| {
        let view = imageops::crop_imm(raster.pixels(), index * half_width, 0, half_width, height);
        Raster::new(view.to_image())
    };
    Ok((half(0), half(1)))
}

/// Build the pair for a side-by-side photo.
///
/// With [`ReencodePolicy::Jpeg`] both halves go through an encode/decode round trip on the codec,
/// concurrently; the pair is ready only once both finish.
pub(crate) async fn extract_side_by_side<C: ImageCodec>(
    asset: &RawImageAsset,
    codec: &C,
    opts: &PipelineOpts,
) -> StereoResult<StereoPair> {
    let (left, right) = split_halves(asset.raster())?;
    tracing::debug!(
        half_width = left.width(),
        height = left.height(),
        dropped_column = asset.width() % 2 == 1,
        "split side-by-side frame"
    );

    let (left, right) = match opts.reencode {
        ReencodePolicy::Passthrough => (
            EyeImage {
                eye: Eye::Left,
                raster: left,
                encoded: None,
            },
            EyeImage {
                eye: Eye::Right,
                raster: right,
                encoded: None,
            },
        ),
        ReencodePolicy::Jpeg => tokio::try_join!(
            reencode(codec, Eye::Left, left, opts),
            reencode(codec, Eye::Right, right, opts),
        )?,
    };

    Ok(StereoPair {
        format: StereoFormat::SideBySide,
        left,
        right,
    })
}

async fn reencode<C: ImageCodec>(
    codec: &C,
    eye: Eye,
    raster: Raster,
    opts: &PipelineOpts,
) -> StereoResult<EyeImage> {
    let encoded: Arc<[u8]> = bounded(
        opts.decode_timeout,
        codec.encode_jpeg(raster, opts.jpeg_quality),
    )
    .await?
    .into();
    let raster = bounded(opts.decode_timeout, codec.decode(Arc::clone(&encoded))).await?;
    Ok(EyeImage {
        eye,
        raster,
        encoded: Some(encoded),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/extract/sbs.rs"]
mod tests;
