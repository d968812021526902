//! Durable per-chunk checkpoint state.
//!
//! The chunk store and transcript store hold the run's only persistent
//! state. Both are idempotent on artifact existence, which is what makes an
//! interrupted run resumable: a restart redoes nothing that already
//! finished. Writes go to a temporary sibling and are renamed into place so
//! a crash mid-write never produces a file the existence check would trust.

pub mod chunks;
pub mod transcripts;

pub use chunks::ChunkStore;
pub use transcripts::TranscriptStore;
