use std::{future::Future, sync::Arc, time::Duration};

use anyhow::Context;
use image::{DynamicImage, codecs::jpeg::JpegEncoder};

use crate::foundation::{
    core::{Raster, RawImageAsset},
    error::{StereoError, StereoResult},
};

/// Image codec collaborator.
///
/// Both operations complete asynchronously. Implementations decide where the work runs; the
/// pipeline only awaits the returned futures.
pub trait ImageCodec: Send + Sync {
    /// Decode encoded image bytes into a raster.
    fn decode(&self, bytes: Arc<[u8]>) -> impl Future<Output = StereoResult<Raster>> + Send;

    /// Encode a raster as a baseline JPEG at `quality` (1..=100).
    fn encode_jpeg(
        &self,
        raster: Raster,
        quality: u8,
    ) -> impl Future<Output = StereoResult<Vec<u8>>> + Send;
}

/// Codec backed by the `image` crate, running on tokio's blocking pool.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageCrateCodec;

impl ImageCodec for ImageCrateCodec {
    fn decode(&self, bytes: Arc<[u8]>) -> impl Future<Output = StereoResult<Raster>> + Send {
        async move {
            tokio::task::spawn_blocking(move || decode_raster(&bytes))
                .await
                .context("join decode task")?
        }
    }

    fn encode_jpeg(
        &self,
        raster: Raster,
        quality: u8,
    ) -> impl Future<Output = StereoResult<Vec<u8>>> + Send {
        async move {
            tokio::task::spawn_blocking(move || encode_jpeg_raster(&raster, quality))
                .await
                .context("join encode task")?
        }
    }
}

/// Decode encoded bytes (format sniffed from the content) into an RGBA8 raster.
pub fn decode_raster(bytes: &[u8]) -> StereoResult<Raster> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| StereoError::decode(format!("decode image from memory: {e}")))?;
    Ok(Raster::from_dynamic(img))
}

/// Encode a raster as JPEG. Alpha is dropped; JPEG has no alpha channel.
pub fn encode_jpeg_raster(raster: &Raster, quality: u8) -> StereoResult<Vec<u8>> {
    if !(1..=100).contains(&quality) {
        return Err(StereoError::validation("jpeg quality must be in 1..=100"));
    }

    let rgb = DynamicImage::ImageRgba8(raster.pixels().clone()).into_rgb8();
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality)
        .encode_image(&rgb)
        .map_err(|e| StereoError::decode(format!("encode jpeg: {e}")))?;
    Ok(buf)
}

/// Decode a freshly chosen photo into an asset owned by the next pipeline run.
pub async fn load_asset<C: ImageCodec>(
    codec: &C,
    bytes: impl Into<Arc<[u8]>>,
) -> StereoResult<RawImageAsset> {
    let bytes: Arc<[u8]> = bytes.into();
    let raster = codec.decode(Arc::clone(&bytes)).await?;
    RawImageAsset::new(raster, bytes)
}

/// Await a codec future, failing with [`StereoError::DecodeTimeout`] once `limit` elapses.
pub(crate) async fn bounded<T>(
    limit: Option<Duration>,
    fut: impl Future<Output = StereoResult<T>>,
) -> StereoResult<T> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| StereoError::DecodeTimeout(limit))?,
        None => fut.await,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/codec.rs"]
mod tests;
