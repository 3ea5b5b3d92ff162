use std::time::Duration;

use crate::foundation::error::{StereoError, StereoResult};

/// What happens to side-by-side halves after the split.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReencodePolicy {
    /// Encode each half as JPEG and decode it again, so the renderer receives addressable encoded
    /// images. Lossy even at maximum quality.
    #[default]
    Jpeg,
    /// Hand the split buffers over untouched.
    Passthrough,
}

/// Tunables for a pipeline run.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PipelineOpts {
    /// Side-by-side re-encode policy.
    pub reencode: ReencodePolicy,
    /// JPEG quality for re-encoded halves (1..=100).
    pub jpeg_quality: u8,
    /// Upper bound for each individual codec operation. `None` waits forever.
    pub decode_timeout: Option<Duration>,
}

impl Default for PipelineOpts {
    fn default() -> Self {
        Self {
            reencode: ReencodePolicy::Jpeg,
            jpeg_quality: 100,
            decode_timeout: None,
        }
    }
}

impl PipelineOpts {
    /// Reject option combinations no run could honor.
    pub fn validate(&self) -> StereoResult<()> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(StereoError::validation("jpeg_quality must be in 1..=100"));
        }
        if self.decode_timeout.is_some_and(|t| t.is_zero()) {
            return Err(StereoError::validation("decode_timeout must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/opts.rs"]
mod tests;
