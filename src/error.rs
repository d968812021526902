//! Error types for chunkscribe.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChunkscribeError {
    // Argument validation
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    // Source resolution
    #[error("Audio file not found: {path}")]
    FileNotFound { path: String },

    #[error("Download failed: {message}")]
    Download { message: String },

    // Audio decoding
    #[error("Failed to decode audio: {message}")]
    Decode { message: String },

    // Transcription
    #[error("Transcription model not found at {path}")]
    ModelNotFound { path: String },

    #[error("Failed to load transcription model: {message}")]
    ModelLoad { message: String },

    #[error("Transcription failed: {message}")]
    Transcription { message: String },

    // Chunk extraction
    #[error("Failed to encode chunk: {message}")]
    Encoding { message: String },

    // Assembly precondition
    #[error("Transcript fragment {index} is missing; run is incomplete")]
    IncompleteRun { index: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ChunkscribeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn invalid_argument_message() {
        let error = ChunkscribeError::InvalidArgument {
            message: "num_chunks must be at least 1".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid argument: num_chunks must be at least 1"
        );
    }

    #[test]
    fn file_not_found_names_the_path() {
        let error = ChunkscribeError::FileNotFound {
            path: "/audio/missing.mp3".to_string(),
        };
        assert_eq!(error.to_string(), "Audio file not found: /audio/missing.mp3");
    }

    #[test]
    fn download_message() {
        let error = ChunkscribeError::Download {
            message: "yt-dlp exited with status 1".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Download failed: yt-dlp exited with status 1"
        );
    }

    #[test]
    fn model_not_found_names_the_path() {
        let error = ChunkscribeError::ModelNotFound {
            path: "models/ggml-base.bin".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Transcription model not found at models/ggml-base.bin"
        );
    }

    #[test]
    fn incomplete_run_names_the_index() {
        let error = ChunkscribeError::IncompleteRun { index: 17 };
        assert_eq!(
            error.to_string(),
            "Transcript fragment 17 is missing; run is incomplete"
        );
    }

    #[test]
    fn io_errors_convert_and_keep_their_source() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error: ChunkscribeError = io_error.into();
        assert!(error.to_string().contains("file not found"));

        let as_std: &dyn std::error::Error = &error;
        assert!(as_std.source().is_some());
    }

    #[test]
    fn errors_cross_thread_boundaries() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<ChunkscribeError>();
        assert_sync::<ChunkscribeError>();
    }
}
