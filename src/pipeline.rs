//! The pipeline driver.
//!
//! Drives one run through its stages: segment the clip, then for each index
//! in strictly increasing order materialize the chunk artifact and its
//! transcript fragment, then assemble the final document. Any failure stops
//! the run at the failing index (fail-fast, no skip-and-continue); because
//! both stores are idempotent, the next run picks up at the first
//! incomplete index.

use crate::audio::AudioClip;
use crate::error::Result;
use crate::store::{ChunkStore, TranscriptStore};
use crate::stt::Transcriber;
use crate::tags::Metadata;
use crate::{assemble, segment};
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::path::PathBuf;

/// Everything one run needs, constructed once by the composition root and
/// passed down explicitly. No global state.
pub struct RunContext<'a> {
    /// Decoded source audio, read-only for the whole run.
    pub clip: &'a AudioClip,
    pub chunks: ChunkStore,
    pub transcripts: TranscriptStore,
    /// Model loaded once, reused for every chunk.
    pub transcriber: &'a dyn Transcriber,
    pub metadata: Metadata,
    pub num_chunks: usize,
    /// Where the assembled transcript is written.
    pub output_path: PathBuf,
    /// Suppress progress bars.
    pub quiet: bool,
}

/// Run the chunk-and-transcribe pipeline to completion.
///
/// Returns the final transcript path. On any per-chunk failure the error is
/// logged with the failing index and propagated; no further indices are
/// attempted.
pub fn run(ctx: &RunContext) -> Result<PathBuf> {
    let duration_ms = ctx.clip.duration_ms();
    log::info!(
        "segmenting {}ms of audio into {} chunks",
        duration_ms,
        ctx.num_chunks
    );
    let plan = segment::plan(duration_ms, ctx.num_chunks)?;

    let progress = if ctx.quiet {
        MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
    } else {
        MultiProgress::new()
    };
    let chunk_bar = progress.add(stage_bar("Chunking", ctx.num_chunks));
    let transcribe_bar = progress.add(stage_bar("Transcription", ctx.num_chunks));

    for (index, interval) in plan.iter().enumerate() {
        let chunk_path = ctx
            .chunks
            .ensure_chunk(ctx.clip, interval, index)
            .map_err(|e| {
                log::error!("chunk {} extraction failed: {}", index, e);
                e
            })?;
        chunk_bar.inc(1);

        ctx.transcripts
            .ensure_transcript(ctx.transcriber, &chunk_path, index)
            .map_err(|e| {
                log::error!("chunk {} transcription failed: {}", index, e);
                e
            })?;
        transcribe_bar.inc(1);
    }

    chunk_bar.finish();
    transcribe_bar.finish();

    assemble::assemble(
        &ctx.transcripts,
        &ctx.metadata,
        ctx.num_chunks,
        &ctx.output_path,
    )
    .map_err(|e| {
        log::error!("assembly failed: {}", e);
        e
    })?;

    Ok(ctx.output_path.clone())
}

fn stage_bar(name: &str, len: usize) -> ProgressBar {
    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        // SAFETY: hardcoded template string — always valid
        #[allow(clippy::expect_used)]
        ProgressStyle::default_bar()
            .template("{msg:>13} [{bar:40.cyan/blue}] {pos}/{len}")
            .expect("hardcoded progress bar template")
            .progress_chars("#>-"),
    );
    bar.set_message(name.to_string());
    bar
}
