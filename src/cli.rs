//! Command-line interface for chunkscribe
//!
//! Provides argument parsing using clap derive macros. The long flag names
//! use underscores for compatibility with earlier releases.

use crate::defaults;
use crate::source::InputType;
use clap::Parser;
use std::path::PathBuf;

/// Transcribe an audio file with Whisper
#[derive(Parser, Debug)]
#[command(
    name = "chunkscribe",
    version,
    about = "Transcribe an audio file with Whisper"
)]
pub struct Cli {
    /// The type of the input (file or youtube)
    #[arg(long = "input_type", value_enum, default_value = "file")]
    pub input_type: InputType,

    /// The path to the audio file or video URL to transcribe
    #[arg(
        long = "input_path",
        value_name = "PATH",
        default_value = defaults::DEFAULT_INPUT_PATH
    )]
    pub input_path: String,

    /// The directory to store the audio chunks
    #[arg(long = "chunks_dir", value_name = "DIR", default_value = defaults::CHUNKS_DIR)]
    pub chunks_dir: PathBuf,

    /// The directory to store the transcriptions
    #[arg(
        long = "transcripts_dir",
        value_name = "DIR",
        default_value = defaults::TRANSCRIPTS_DIR
    )]
    pub transcripts_dir: PathBuf,

    /// The number of chunks to split the audio into
    #[arg(
        long = "num_chunks",
        value_name = "N",
        default_value_t = defaults::DEFAULT_NUM_CHUNKS
    )]
    pub num_chunks: usize,

    /// Whisper model name (default: base, multilingual)
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Language code for transcription (default: auto-detect)
    #[arg(long, value_name = "LANG")]
    pub language: Option<String>,

    /// Number of CPU threads for inference (default: auto)
    #[arg(long, short = 't', value_name = "THREADS")]
    pub threads: Option<usize>,

    /// Path to a TOML configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}
