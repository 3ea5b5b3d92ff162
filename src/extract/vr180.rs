use std::sync::Arc;

use base64::{
    Engine as _,
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};

use crate::{
    classify::format::StereoFormat,
    extract::pair::{EyeImage, StereoPair},
    foundation::{
        core::{Eye, RawImageAsset},
        error::{StereoError, StereoResult},
    },
    pipeline::{
        codec::{ImageCodec, bounded},
        opts::PipelineOpts,
    },
};

/// XMP writers wrap long attribute values and some drop the trailing padding.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode the `GImage:Data` text into raw image bytes.
///
/// ASCII whitespace anywhere in the payload is ignored, as is a leading `data:...;base64,` prefix.
pub fn decode_payload(payload: &str) -> StereoResult<Vec<u8>> {
    let payload = payload.trim();
    let body = match payload.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => payload,
    };
    let compact: String = body.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if compact.is_empty() {
        return Err(StereoError::malformed("GImage:Data payload is empty"));
    }

    PAYLOAD_ENGINE
        .decode(compact.as_bytes())
        .map_err(|e| StereoError::malformed(format!("GImage:Data is not valid base64: {e}")))
}

/// Build the pair for a VR180 photo: the primary frame is the left eye, the embedded payload is
/// the right eye. No pixels are copied for the left eye.
pub(crate) async fn extract_vr180<C: ImageCodec>(
    asset: &RawImageAsset,
    payload: &str,
    mime: Option<&str>,
    codec: &C,
    opts: &PipelineOpts,
) -> StereoResult<StereoPair> {
    if let Some(mime) = mime
        && mime != "image/jpeg"
    {
        tracing::warn!(mime, "unexpected GImage:Mime; decoding payload anyway");
    }

    let bytes: Arc<[u8]> = decode_payload(payload)?.into();
    tracing::debug!(payload_bytes = bytes.len(), "decoding embedded right eye");

    let right = bounded(opts.decode_timeout, codec.decode(Arc::clone(&bytes)))
        .await
        .map_err(|e| match e {
            StereoError::DecodeFailure(msg) => {
                StereoError::malformed(format!("embedded right eye does not decode: {msg}"))
            }
            other => other,
        })?;

    Ok(StereoPair {
        format: StereoFormat::Vr180,
        left: EyeImage {
            eye: Eye::Left,
            raster: asset.raster().clone(),
            encoded: Some(asset.shared_bytes()),
        },
        right: EyeImage {
            eye: Eye::Right,
            raster: right,
            encoded: Some(bytes),
        },
    })
}

#[cfg(test)]
#[path = "../../tests/unit/extract/vr180.rs"]
mod tests;
