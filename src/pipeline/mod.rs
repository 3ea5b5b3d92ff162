//! Pipeline coordination: codec collaborator, renderer sink, options and the run state machine.

/// Image codec collaborator and the default `image`-crate codec.
pub mod codec;
pub(crate) mod coordinator;
pub(crate) mod opts;
pub(crate) mod sink;
pub(crate) mod state;
