use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        StereoError::malformed("x")
            .to_string()
            .contains("malformed embedded image:")
    );
    assert!(StereoError::decode("x").to_string().contains("decode error:"));
    assert!(
        StereoError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert_eq!(
        StereoError::InvalidDimensions {
            width: 1,
            height: 4
        }
        .to_string(),
        "invalid dimensions: 1x4 cannot be split into two eyes"
    );
}

#[test]
fn kinds_follow_variants() {
    assert_eq!(
        StereoError::malformed("x").kind(),
        FailureKind::MalformedEmbeddedImage
    );
    assert_eq!(StereoError::decode("x").kind(), FailureKind::DecodeFailure);
    assert_eq!(
        StereoError::DecodeTimeout(Duration::from_millis(5)).kind(),
        FailureKind::DecodeTimeout
    );
    assert_eq!(StereoError::validation("x").kind(), FailureKind::Other);
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = StereoError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert_eq!(err.kind(), FailureKind::Other);
}
