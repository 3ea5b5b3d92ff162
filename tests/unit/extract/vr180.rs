use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::RgbaImage;

use crate::{foundation::core::Raster, pipeline::codec::ImageCrateCodec};

use super::*;

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| image::Rgba([x as u8, y as u8, 40, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn source_asset() -> RawImageAsset {
    let raster = Raster::new(RgbaImage::from_pixel(8, 4, image::Rgba([200, 10, 10, 255])));
    RawImageAsset::new(raster, b"primary".to_vec()).unwrap()
}

#[test]
fn payload_tolerates_wrapping_and_missing_padding() {
    assert_eq!(decode_payload("QUJD").unwrap(), b"ABC");
    assert_eq!(decode_payload("QU\nJD\r\n").unwrap(), b"ABC");
    assert_eq!(decode_payload("QUI").unwrap(), b"AB");
    assert_eq!(decode_payload("QUI=").unwrap(), b"AB");
    assert_eq!(
        decode_payload("data:image/jpeg;base64,QUJD").unwrap(),
        b"ABC"
    );
    assert_eq!(
        decode_payload("  \n data:image/jpeg;base64,QUJD\n").unwrap(),
        b"ABC"
    );
    assert_eq!(decode_payload("\t QUJD \n").unwrap(), b"ABC");
}

#[test]
fn invalid_payload_is_malformed() {
    for bad in ["", "   ", "!!!!", "QUJD$"] {
        let err = decode_payload(bad).unwrap_err();
        assert!(
            matches!(err, StereoError::MalformedEmbeddedImage(_)),
            "{bad:?} -> {err}"
        );
    }
}

#[tokio::test]
async fn left_is_source_right_is_payload() {
    let asset = source_asset();
    let payload_bytes = png_bytes(6, 3);
    let payload = STANDARD.encode(&payload_bytes);

    let pair = extract_vr180(
        &asset,
        &payload,
        Some("image/png"),
        &ImageCrateCodec,
        &PipelineOpts::default(),
    )
    .await
    .unwrap();

    assert_eq!(pair.format, StereoFormat::Vr180);
    assert_eq!(pair.left.eye, Eye::Left);
    assert!(pair.left.raster.shares_buffer(asset.raster()));
    assert_eq!(pair.left.encoded.as_deref(), Some(&b"primary"[..]));

    assert_eq!(pair.right.eye, Eye::Right);
    assert_eq!(pair.right.dimensions(), (6, 3));
    assert_eq!(pair.right.encoded.as_deref(), Some(payload_bytes.as_slice()));
    assert_eq!(
        pair.right.raster.pixels().get_pixel(5, 2),
        &image::Rgba([5, 2, 40, 255])
    );
}

#[tokio::test]
async fn undecodable_payload_is_malformed() {
    let payload = STANDARD.encode(b"definitely not an image");
    let err = extract_vr180(
        &source_asset(),
        &payload,
        None,
        &ImageCrateCodec,
        &PipelineOpts::default(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, StereoError::MalformedEmbeddedImage(_)), "{err}");
}
