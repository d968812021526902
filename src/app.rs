//! Composition root.
//!
//! Builds the run context from parsed CLI arguments and configuration,
//! then hands it to the pipeline driver. All resource acquisition (source
//! resolution, audio decode, model load) happens here, once, before any
//! chunk work starts.

use crate::audio::decode;
use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;
use crate::pipeline::{self, RunContext};
use crate::source::{self, SystemCommandExecutor};
use crate::store::{ChunkStore, TranscriptStore};
use crate::stt::{WhisperConfig, WhisperTranscriber};
use crate::tags::Metadata;
use std::path::PathBuf;

/// Execute one full run and return the final transcript path.
///
/// Every failure is logged with context before it propagates; the caller
/// only needs to turn the error into a non-zero exit.
pub fn run(cli: &Cli) -> Result<PathBuf> {
    let config = Config::load_or_default(cli.config.as_deref())?;

    let executor = SystemCommandExecutor::new();
    let resolved = source::resolve(cli.input_type, &cli.input_path, &executor).map_err(|e| {
        log::error!("failed to resolve input {}: {}", cli.input_path, e);
        e
    })?;
    log::info!(
        "resolved source '{}' at {}",
        resolved.base_name,
        resolved.audio_path.display()
    );

    let clip = decode::decode_file(&resolved.audio_path).map_err(|e| {
        log::error!("error loading audio file: {}", e);
        e
    })?;

    let metadata = Metadata::read(&resolved.audio_path, resolved.tag_family);

    let model = cli.model.clone().unwrap_or(config.stt.model);
    let whisper_config = WhisperConfig {
        language: cli.language.clone().unwrap_or(config.stt.language),
        threads: cli.threads.or(config.stt.threads),
        ..WhisperConfig::for_model(&model)
    };
    let transcriber = WhisperTranscriber::new(whisper_config).map_err(|e| {
        log::error!("error loading Whisper model: {}", e);
        e
    })?;

    let ctx = RunContext {
        clip: &clip,
        chunks: ChunkStore::new(&cli.chunks_dir, &resolved.base_name),
        transcripts: TranscriptStore::new(&cli.transcripts_dir, &resolved.base_name),
        transcriber: &transcriber,
        metadata,
        num_chunks: cli.num_chunks,
        output_path: resolved.final_transcript_path(),
        quiet: cli.quiet,
    };

    let path = pipeline::run(&ctx)?;
    log::info!("run complete: {}", path.display());
    Ok(path)
}
