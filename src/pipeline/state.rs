use crate::foundation::error::FailureKind;

/// Stage of the most recent pipeline run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    /// A generation was minted; nothing has run yet.
    #[default]
    Idle,
    /// Source decoded (if needed) and layout being decided.
    Classifying,
    /// Eye images being produced; codec operations may be outstanding.
    Extracting,
    /// Horizon correction being resolved.
    Correcting,
    /// Pair and correction delivered to the renderer.
    Ready,
    /// Terminal failure; the previously displayed pair stays on screen.
    Failed(FailureKind),
}

impl PipelineState {
    /// Whether `self -> next` is a legal transition.
    ///
    /// `Correcting -> Failed` only happens when the renderer rejects the delivery.
    pub fn can_transition_to(self, next: PipelineState) -> bool {
        use PipelineState::*;
        matches!(
            (self, next),
            (Idle, Classifying)
                | (Classifying, Extracting)
                | (Extracting, Correcting)
                | (Correcting, Ready)
                | (Classifying | Extracting | Correcting, Failed(_))
        )
    }

    /// Whether no further transitions follow.
    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineState::Ready | PipelineState::Failed(_))
    }
}

/// Three-valued load indicator for the UI, plus the state before any photo was chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    /// No photo requested yet.
    #[default]
    Idle,
    /// A load is in flight.
    Loading,
    /// The latest load is on screen.
    Ready,
    /// The latest load failed.
    Failed(FailureKind),
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/state.rs"]
mod tests;
