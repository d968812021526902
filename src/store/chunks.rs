//! Chunk artifact store.

use crate::audio::AudioClip;
use crate::error::{ChunkscribeError, Result};
use crate::segment::Interval;
use std::fs;
use std::path::{Path, PathBuf};

/// Materializes segment windows as WAV files under
/// `<chunks_dir>/<base_name>/chunk<i>.wav`.
#[derive(Debug, Clone)]
pub struct ChunkStore {
    dir: PathBuf,
}

impl ChunkStore {
    pub fn new(chunks_dir: &Path, base_name: &str) -> Self {
        Self {
            dir: chunks_dir.join(base_name),
        }
    }

    /// Path of the chunk artifact for `index`. Existence of this path is the
    /// idempotence signal.
    pub fn chunk_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("chunk{}.wav", index))
    }

    /// Ensure the chunk artifact for `index` exists, extracting it from the
    /// clip if necessary.
    ///
    /// Returns immediately if the artifact is already present. Otherwise the
    /// interval's samples are encoded to a temporary file which is renamed
    /// into place, so no partially written artifact is ever observable.
    pub fn ensure_chunk(
        &self,
        clip: &AudioClip,
        interval: &Interval,
        index: usize,
    ) -> Result<PathBuf> {
        let path = self.chunk_path(index);
        if path.exists() {
            return Ok(path);
        }

        fs::create_dir_all(&self.dir)?;

        let tmp = path.with_extension("wav.tmp");
        let write_result = write_wav(&tmp, clip.slice(interval), clip.sample_rate());
        if let Err(e) = write_result {
            // Never leave a half-written file behind.
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        fs::rename(&tmp, &path)?;

        log::info!("created chunk file: {}", path.display());
        Ok(path)
    }
}

fn write_wav(path: &Path, samples: &[i16], sample_rate: u32) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer =
        hound::WavWriter::create(path, spec).map_err(|e| ChunkscribeError::Encoding {
            message: format!("failed to create {}: {}", path.display(), e),
        })?;
    for &sample in samples {
        writer
            .write_sample(sample)
            .map_err(|e| ChunkscribeError::Encoding {
                message: format!("failed to write sample: {}", e),
            })?;
    }
    writer.finalize().map_err(|e| ChunkscribeError::Encoding {
        message: format!("failed to finalize {}: {}", path.display(), e),
    })
}
