use image::{Rgba, RgbaImage};

use crate::pipeline::codec::ImageCrateCodec;

use super::*;

fn columns(width: u32, height: u32) -> Raster {
    Raster::new(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([x as u8, y as u8, 0, 255])
    }))
}

fn asset(width: u32, height: u32) -> RawImageAsset {
    RawImageAsset::new(columns(width, height), Vec::new()).unwrap()
}

#[test]
fn even_width_splits_into_equal_halves() {
    let (left, right) = split_halves(&columns(8, 3)).unwrap();
    assert_eq!(left.dimensions(), (4, 3));
    assert_eq!(right.dimensions(), (4, 3));

    assert_eq!(left.pixels().get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
    assert_eq!(left.pixels().get_pixel(3, 2), &Rgba([3, 2, 0, 255]));
    assert_eq!(right.pixels().get_pixel(0, 0), &Rgba([4, 0, 0, 255]));
    assert_eq!(right.pixels().get_pixel(3, 2), &Rgba([7, 2, 0, 255]));
}

#[test]
fn odd_width_drops_last_column() {
    let (left, right) = split_halves(&columns(7, 2)).unwrap();
    assert_eq!(left.dimensions(), (3, 2));
    assert_eq!(right.dimensions(), (3, 2));
    assert_eq!(right.pixels().get_pixel(2, 1), &Rgba([5, 1, 0, 255]));
}

#[test]
fn too_narrow_to_split() {
    let err = split_halves(&columns(1, 5)).unwrap_err();
    assert!(matches!(
        err,
        StereoError::InvalidDimensions {
            width: 1,
            height: 5
        }
    ));
}

#[tokio::test]
async fn passthrough_hands_over_raw_halves() {
    let opts = PipelineOpts {
        reencode: ReencodePolicy::Passthrough,
        ..PipelineOpts::default()
    };
    let pair = extract_side_by_side(&asset(400, 200), &ImageCrateCodec, &opts)
        .await
        .unwrap();

    assert_eq!(pair.format, StereoFormat::SideBySide);
    assert_eq!(pair.left.dimensions(), (200, 200));
    assert_eq!(pair.right.dimensions(), (200, 200));
    assert!(pair.left.encoded.is_none());
    assert!(pair.right.encoded.is_none());
}

#[tokio::test]
async fn jpeg_policy_reencodes_both_halves() {
    let pair = extract_side_by_side(&asset(32, 16), &ImageCrateCodec, &PipelineOpts::default())
        .await
        .unwrap();

    for eye in [&pair.left, &pair.right] {
        assert_eq!(eye.dimensions(), (16, 16));
        let encoded = eye.encoded.as_deref().unwrap();
        assert_eq!(&encoded[..2], &[0xFF, 0xD8]);
    }
    assert_eq!(pair.left.eye, Eye::Left);
    assert_eq!(pair.right.eye, Eye::Right);
}
