//! chunkscribe - chunked offline audio transcription with Whisper
//!
//! Splits one audio source into N sequential chunks, transcribes each with
//! a locally loaded Whisper model, and reassembles the per-chunk text into
//! one transcript prefixed with the source file's tags. Chunk artifacts and
//! transcript fragments are durable checkpoints, so an interrupted run
//! resumes at the first incomplete index.

// Errors are propagated, not unwrapped, outside of tests.
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod app;
pub mod assemble;
pub mod audio;
pub mod cli;
pub mod config;
pub mod defaults;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod segment;
pub mod source;
pub mod store;
pub mod stt;
pub mod tags;

// Core pipeline surface
pub use audio::AudioClip;
pub use pipeline::{RunContext, run};
pub use segment::{Interval, plan};
pub use store::{ChunkStore, TranscriptStore};
pub use stt::Transcriber;

// Error handling
pub use error::{ChunkscribeError, Result};

// Config
pub use config::Config;

#[cfg(test)]
pub(crate) mod test_util {
    // Tests that change the process working directory must hold this lock;
    // the directory is process-global and the harness runs tests in parallel.
    pub(crate) static CWD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
}
