//! Final transcript assembly.
//!
//! Reads every transcript fragment back from disk in index order and
//! concatenates them into one document behind the metadata header. Assembly
//! is a pure function of the on-disk checkpoint state: a run that resumed
//! halfway produces byte-identical output to one that ran start to finish.

use crate::error::{ChunkscribeError, Result};
use crate::store::TranscriptStore;
use crate::tags::Metadata;
use std::fs;
use std::path::Path;

/// Assemble the final transcript from `count` fragments and write it to
/// `output_path`.
///
/// Fragments are read strictly in index order, each followed by a single
/// separating space. The metadata header (six `key: value` lines and a
/// blank line) is prepended.
///
/// # Errors
/// Returns `ChunkscribeError::IncompleteRun` naming the first missing
/// fragment index; nothing is written in that case.
pub fn assemble(
    transcripts: &TranscriptStore,
    metadata: &Metadata,
    count: usize,
    output_path: &Path,
) -> Result<String> {
    let mut document = metadata.header();

    for index in 0..count {
        let path = transcripts.transcript_path(index);
        if !path.exists() {
            return Err(ChunkscribeError::IncompleteRun { index });
        }
        document.push_str(&fs::read_to_string(&path)?);
        document.push(' ');
    }

    fs::write(output_path, &document)?;
    log::info!("created final transcription file: {}", output_path.display());
    Ok(document)
}
