use std::time::Duration;

/// Convenience result type used across stereo180.
pub type StereoResult<T> = Result<T, StereoError>;

/// Top-level error taxonomy used by pipeline APIs.
///
/// Missing metadata is never an error: it always resolves through a default fallback and has no
/// variant here.
#[derive(thiserror::Error, Debug)]
pub enum StereoError {
    /// The VR180 right-eye payload is not valid base64 or does not decode as an image.
    #[error("malformed embedded image: {0}")]
    MalformedEmbeddedImage(String),

    /// The source raster is too small to be split into two eyes.
    #[error("invalid dimensions: {width}x{height} cannot be split into two eyes")]
    InvalidDimensions {
        /// Source width in pixels.
        width: u32,
        /// Source height in pixels.
        height: u32,
    },

    /// Generic codec failure while decoding or encoding either eye.
    #[error("decode error: {0}")]
    DecodeFailure(String),

    /// A codec operation did not complete within the configured timeout.
    #[error("decode timed out after {0:?}")]
    DecodeTimeout(Duration),

    /// Invalid options or caller-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Coarse failure category published to the UI-state collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// See [`StereoError::MalformedEmbeddedImage`].
    MalformedEmbeddedImage,
    /// See [`StereoError::InvalidDimensions`].
    InvalidDimensions,
    /// See [`StereoError::DecodeFailure`].
    DecodeFailure,
    /// See [`StereoError::DecodeTimeout`].
    DecodeTimeout,
    /// Anything else (bad options, sink failures, IO).
    Other,
}

impl StereoError {
    /// Build a [`StereoError::MalformedEmbeddedImage`] value.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedEmbeddedImage(msg.into())
    }

    /// Build a [`StereoError::DecodeFailure`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::DecodeFailure(msg.into())
    }

    /// Build a [`StereoError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Category of this error as reported to the UI.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::MalformedEmbeddedImage(_) => FailureKind::MalformedEmbeddedImage,
            Self::InvalidDimensions { .. } => FailureKind::InvalidDimensions,
            Self::DecodeFailure(_) => FailureKind::DecodeFailure,
            Self::DecodeTimeout(_) => FailureKind::DecodeTimeout,
            Self::Validation(_) | Self::Other(_) => FailureKind::Other,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
