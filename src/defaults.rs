//! Default configuration constants for chunkscribe.
//!
//! Shared constants used across configuration, CLI defaults, and the stores,
//! kept in one place so the values stay consistent.

/// Audio sample rate every clip is normalized to, in Hz.
///
/// 16kHz is what Whisper expects; source audio at any other rate is
/// resampled on load.
pub const SAMPLE_RATE: u32 = 16000;

/// Default Whisper model name.
pub const DEFAULT_MODEL: &str = "base";

/// Default language code for transcription.
///
/// "auto" lets Whisper detect the spoken language automatically.
pub const DEFAULT_LANGUAGE: &str = "auto";

/// Language value that triggers automatic language detection.
pub const AUTO_LANGUAGE: &str = "auto";

/// Default number of chunks the source audio is split into.
pub const DEFAULT_NUM_CHUNKS: usize = 100;

/// Default input path when none is given on the command line.
pub const DEFAULT_INPUT_PATH: &str = "learn-in-podcast__the-rise-of-the-ai-engine.mp3";

/// Default directory for chunk artifacts.
pub const CHUNKS_DIR: &str = "chunks_dir";

/// Default directory for per-chunk transcript fragments.
pub const TRANSCRIPTS_DIR: &str = "transcripts_dir";

/// Directory remote audio is downloaded into. The final transcript for a
/// remote source is written here as well.
pub const DOWNLOADS_DIR: &str = "youtube_downloads";

/// Append-only run log file.
pub const LOG_FILE: &str = "transcription.log";

/// Directory scanned for local model files (`ggml-<name>.bin`).
pub const MODELS_DIR: &str = "models";
