use std::{
    future::Future,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use tokio::sync::watch;

use crate::{
    classify::format::classify,
    extract::extract_pair,
    foundation::{
        core::{Generation, RawImageAsset},
        error::{StereoError, StereoResult},
    },
    metadata::tree::MetadataTree,
    orientation::resolver::resolve_orientation,
    pipeline::{
        codec::{ImageCodec, bounded, load_asset},
        opts::PipelineOpts,
        sink::{Presentation, StereoSink},
        state::{LoadStatus, PipelineState},
    },
};

/// How a single pipeline run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// The pair and correction were delivered to the sink.
    Committed(Generation),
    /// A newer load started before this run finished; its result (or failure) was dropped.
    Superseded(Generation),
    /// The run failed while it was still the newest load.
    Failed {
        /// Generation of the failed run.
        generation: Generation,
        /// Why it failed.
        error: StereoError,
    },
}

impl RunOutcome {
    /// Generation of the run this outcome belongs to.
    pub fn generation(&self) -> Generation {
        match self {
            RunOutcome::Committed(g) | RunOutcome::Superseded(g) => *g,
            RunOutcome::Failed { generation, .. } => *generation,
        }
    }

    /// Whether the run's result reached the sink.
    pub fn is_committed(&self) -> bool {
        matches!(self, RunOutcome::Committed(_))
    }
}

enum Source {
    Decoded(RawImageAsset),
    Encoded(Arc<[u8]>),
}

struct Shared<S> {
    current: Generation,
    committed: Option<Generation>,
    state: PipelineState,
    sink: S,
}

/// Sequences classification, extraction and orientation for each photo load and delivers the
/// result of the newest load only.
///
/// Minting a generation and committing a result both happen under the same lock, so once a newer
/// load has begun no older run can reach the sink. A superseded run also stops waiting on its
/// codec operations and drops its buffers as soon as the newer load begins.
pub struct Coordinator<C, S> {
    codec: C,
    opts: PipelineOpts,
    shared: Mutex<Shared<S>>,
    status: watch::Sender<LoadStatus>,
    latest: watch::Sender<Generation>,
}

impl<C: ImageCodec, S: StereoSink> Coordinator<C, S> {
    /// Build a coordinator around a codec and a renderer sink.
    pub fn new(codec: C, sink: S, opts: PipelineOpts) -> StereoResult<Self> {
        opts.validate()?;
        let (status, _) = watch::channel(LoadStatus::Idle);
        let (latest, _) = watch::channel(Generation::default());
        Ok(Self {
            codec,
            opts,
            shared: Mutex::new(Shared {
                current: Generation::default(),
                committed: None,
                state: PipelineState::Idle,
                sink,
            }),
            status,
            latest,
        })
    }

    /// Codec every run decodes and encodes through.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Options every run uses.
    pub fn opts(&self) -> &PipelineOpts {
        &self.opts
    }

    /// Subscribe to load-status changes.
    pub fn subscribe(&self) -> watch::Receiver<LoadStatus> {
        self.status.subscribe()
    }

    /// Latest published load status.
    pub fn status(&self) -> LoadStatus {
        *self.status.borrow()
    }

    /// Newest minted generation.
    pub fn current_generation(&self) -> Generation {
        self.lock().current
    }

    /// Generation whose result is currently on screen.
    pub fn committed_generation(&self) -> Option<Generation> {
        self.lock().committed
    }

    /// State of the newest run.
    pub fn state(&self) -> PipelineState {
        self.lock().state
    }

    /// Inspect the sink.
    pub fn with_sink<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut self.lock().sink)
    }

    /// Mint a new generation, superseding every run in flight.
    pub fn begin(&self) -> Generation {
        let mut shared = self.lock();
        shared.current = shared.current.next();
        shared.state = PipelineState::Idle;
        self.latest.send_replace(shared.current);
        self.status.send_replace(LoadStatus::Loading);
        tracing::debug!(generation = %shared.current, "minted generation");
        shared.current
    }

    /// Run the pipeline for an already-decoded photo.
    #[tracing::instrument(skip_all, fields(generation = tracing::field::Empty))]
    pub async fn run(&self, asset: RawImageAsset, meta: MetadataTree) -> RunOutcome {
        let generation = self.begin();
        tracing::Span::current().record("generation", generation.0);
        self.drive(generation, Source::Decoded(asset), &meta).await
    }

    /// Decode the photo's bytes through the codec, then run the pipeline on it.
    ///
    /// The generation is minted before decoding starts, so choosing a photo supersedes older
    /// loads immediately.
    #[tracing::instrument(skip_all, fields(generation = tracing::field::Empty))]
    pub async fn load(&self, bytes: impl Into<Arc<[u8]>>, meta: MetadataTree) -> RunOutcome {
        let generation = self.begin();
        tracing::Span::current().record("generation", generation.0);
        self.drive(generation, Source::Encoded(bytes.into()), &meta).await
    }

    async fn drive(
        &self,
        generation: Generation,
        source: Source,
        meta: &MetadataTree,
    ) -> RunOutcome {
        self.advance(generation, PipelineState::Classifying);
        let asset = match source {
            Source::Decoded(asset) => asset,
            Source::Encoded(bytes) => {
                let decoded = bounded(self.opts.decode_timeout, load_asset(&self.codec, bytes));
                match self.unless_superseded(generation, decoded).await {
                    Some(Ok(asset)) => asset,
                    Some(Err(error)) => return self.fail(generation, error),
                    None => return self.abandon(generation),
                }
            }
        };

        let layout = classify(meta);
        tracing::debug!(
            format = ?layout.format(),
            width = asset.width(),
            height = asset.height(),
            "classified photo"
        );

        self.advance(generation, PipelineState::Extracting);
        let extracted = extract_pair(&asset, layout, &self.codec, &self.opts);
        let pair = match self.unless_superseded(generation, extracted).await {
            Some(Ok(pair)) => pair,
            Some(Err(error)) => return self.fail(generation, error),
            None => return self.abandon(generation),
        };
        drop(asset);

        self.advance(generation, PipelineState::Correcting);
        let correction = resolve_orientation(meta);
        tracing::debug!(
            pitch = correction.pitch_degrees,
            roll = correction.roll_degrees,
            "resolved orientation"
        );

        self.commit(Presentation {
            generation,
            pair,
            correction,
        })
    }

    /// Await `fut` unless a newer generation is minted first; then `fut` is dropped unfinished.
    async fn unless_superseded<T>(
        &self,
        generation: Generation,
        fut: impl Future<Output = T>,
    ) -> Option<T> {
        let mut latest = self.latest.subscribe();
        let superseded = async move {
            loop {
                if *latest.borrow_and_update() != generation {
                    return;
                }
                if latest.changed().await.is_err() {
                    std::future::pending::<()>().await;
                }
            }
        };
        tokio::select! {
            biased;
            () = superseded => None,
            out = fut => Some(out),
        }
    }

    fn abandon(&self, generation: Generation) -> RunOutcome {
        tracing::debug!(%generation, "abandoning superseded run before its codec work finished");
        RunOutcome::Superseded(generation)
    }

    fn advance(&self, generation: Generation, next: PipelineState) {
        let mut shared = self.lock();
        if shared.current != generation {
            return;
        }
        debug_assert!(
            shared.state.can_transition_to(next),
            "illegal pipeline transition {:?} -> {next:?}",
            shared.state
        );
        tracing::debug!(from = ?shared.state, to = ?next, "pipeline transition");
        shared.state = next;
    }

    fn fail(&self, generation: Generation, error: StereoError) -> RunOutcome {
        let mut shared = self.lock();
        if shared.current != generation {
            tracing::debug!(%generation, %error, "dropping failure of superseded run");
            return RunOutcome::Superseded(generation);
        }

        tracing::warn!(%generation, %error, "pipeline run failed");
        let kind = error.kind();
        shared.state = PipelineState::Failed(kind);
        self.status.send_replace(LoadStatus::Failed(kind));
        RunOutcome::Failed { generation, error }
    }

    fn commit(&self, presentation: Presentation) -> RunOutcome {
        let generation = presentation.generation;
        let mut shared = self.lock();
        if shared.current != generation {
            tracing::warn!(
                %generation,
                current = %shared.current,
                "discarding result of superseded run"
            );
            return RunOutcome::Superseded(generation);
        }

        if let Err(error) = shared.sink.present(presentation) {
            drop(shared);
            return self.fail(generation, error);
        }

        shared.state = PipelineState::Ready;
        shared.committed = Some(generation);
        self.status.send_replace(LoadStatus::Ready);
        tracing::info!(%generation, "stereo pair committed");
        RunOutcome::Committed(generation)
    }

    fn lock(&self) -> MutexGuard<'_, Shared<S>> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/coordinator.rs"]
mod tests;
