use crate::{
    extract::pair::StereoPair, foundation::core::Generation, foundation::error::StereoResult,
    orientation::resolver::OrientationCorrection,
};

/// Everything the renderer needs for one photo, delivered in one piece.
#[derive(Clone, Debug)]
pub struct Presentation {
    /// Generation of the run that produced this delivery.
    pub generation: Generation,
    /// Left/right eye textures.
    pub pair: StereoPair,
    /// Rotation applied to both hemispheres.
    pub correction: OrientationCorrection,
}

/// Renderer contract.
///
/// `present` is called at most once per generation, only for the generation that is current at
/// commit time, and never concurrently.
pub trait StereoSink: Send {
    /// Take ownership of a finished pair and show it.
    fn present(&mut self, presentation: Presentation) -> StereoResult<()>;
}

/// In-memory sink that keeps the most recent delivery.
#[derive(Debug, Default)]
pub struct LatestSink {
    current: Option<Presentation>,
    presented: u64,
}

impl LatestSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// The delivery currently on screen, if any.
    pub fn current(&self) -> Option<&Presentation> {
        self.current.as_ref()
    }

    /// Remove and return the current delivery.
    pub fn take(&mut self) -> Option<Presentation> {
        self.current.take()
    }

    /// Number of deliveries received so far.
    pub fn presented_count(&self) -> u64 {
        self.presented
    }
}

impl StereoSink for LatestSink {
    fn present(&mut self, presentation: Presentation) -> StereoResult<()> {
        self.current = Some(presentation);
        self.presented += 1;
        Ok(())
    }
}
