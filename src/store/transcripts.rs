//! Transcript fragment store.

use crate::error::{ChunkscribeError, Result};
use crate::stt::Transcriber;
use std::fs;
use std::path::{Path, PathBuf};

/// Persists per-chunk transcribed text under
/// `<transcripts_dir>/<base_name>/transcription<i>.txt`.
#[derive(Debug, Clone)]
pub struct TranscriptStore {
    dir: PathBuf,
}

impl TranscriptStore {
    pub fn new(transcripts_dir: &Path, base_name: &str) -> Self {
        Self {
            dir: transcripts_dir.join(base_name),
        }
    }

    /// Path of the transcript fragment for `index`.
    pub fn transcript_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("transcription{}.txt", index))
    }

    /// Ensure the transcript fragment for `index` exists and return its text.
    ///
    /// If the fragment already exists on disk it is read back without
    /// invoking the transcriber. Otherwise the chunk artifact is decoded,
    /// transcribed, and the result persisted (tmp file + rename, same
    /// all-or-nothing rule as the chunk store) before it is returned.
    pub fn ensure_transcript(
        &self,
        transcriber: &dyn Transcriber,
        chunk_path: &Path,
        index: usize,
    ) -> Result<String> {
        let path = self.transcript_path(index);
        if path.exists() {
            return Ok(fs::read_to_string(&path)?);
        }

        fs::create_dir_all(&self.dir)?;

        let samples = read_chunk_samples(chunk_path)?;
        let text = transcriber.transcribe(&samples)?;

        let tmp = path.with_extension("txt.tmp");
        if let Err(e) = fs::write(&tmp, &text) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        fs::rename(&tmp, &path)?;

        log::info!("created transcription file: {}", path.display());
        Ok(text)
    }
}

/// Read a chunk artifact back into 16-bit PCM samples.
///
/// A chunk that fails to decode is a transcription failure for that index,
/// not an encoding one: the artifact passed the existence check, so the
/// failure belongs to the transcribe step.
fn read_chunk_samples(chunk_path: &Path) -> Result<Vec<i16>> {
    let reader =
        hound::WavReader::open(chunk_path).map_err(|e| ChunkscribeError::Transcription {
            message: format!("failed to open chunk {}: {}", chunk_path.display(), e),
        })?;
    reader
        .into_samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| ChunkscribeError::Transcription {
            message: format!("failed to read chunk {}: {}", chunk_path.display(), e),
        })
}
