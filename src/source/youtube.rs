//! Remote audio download via yt-dlp, behind a testable command seam.
//!
//! The `CommandExecutor` trait lets tests substitute a mock for the real
//! subprocess call.

use crate::error::{ChunkscribeError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Trait for executing system commands.
///
/// Object-safe, Send + Sync. Enables testability by allowing mock
/// implementations.
pub trait CommandExecutor: Send + Sync {
    /// Execute a command with arguments.
    ///
    /// Returns the stdout of the command on success.
    /// Returns an error if the command fails or is not found.
    fn execute(&self, command: &str, args: &[&str]) -> Result<String>;
}

/// Production command executor using std::process::Command.
#[derive(Debug, Clone, Default)]
pub struct SystemCommandExecutor;

impl SystemCommandExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl CommandExecutor for SystemCommandExecutor {
    fn execute(&self, command: &str, args: &[&str]) -> Result<String> {
        let output = Command::new(command).args(args).output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ChunkscribeError::Download {
                    message: format!(
                        "{} not found. Install it first:\n\
                         Ubuntu/Debian: sudo apt install {}\n\
                         or: pip install {}",
                        command, command, command
                    ),
                }
            } else {
                ChunkscribeError::Download {
                    message: format!("Failed to execute {}: {}", command, e),
                }
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ChunkscribeError::Download {
                message: format!(
                    "{} failed with status {:?}: {}",
                    command, output.status, stderr
                ),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// Downloads the highest-quality audio-only stream of a video.
pub struct YoutubeDownloader<'a> {
    executor: &'a dyn CommandExecutor,
    output_dir: PathBuf,
}

impl<'a> YoutubeDownloader<'a> {
    pub fn new(executor: &'a dyn CommandExecutor, output_dir: &Path) -> Self {
        Self {
            executor,
            output_dir: output_dir.to_path_buf(),
        }
    }

    /// Download the audio-only stream for `url` into the output directory.
    ///
    /// The video title, sanitized to alphanumerics and spaces, becomes both
    /// the filename stem and the returned base name. An already-downloaded
    /// file is reused.
    ///
    /// # Errors
    /// Returns `ChunkscribeError::Download` if yt-dlp fails, the title is
    /// unusable, or no file exists at the expected path afterwards.
    pub fn download(&self, url: &str) -> Result<(PathBuf, String)> {
        fs::create_dir_all(&self.output_dir)?;

        let title = self
            .executor
            .execute("yt-dlp", &["--print", "title", "--skip-download", url])?;
        let base_name = sanitize_title(&title);
        if base_name.is_empty() {
            return Err(ChunkscribeError::Download {
                message: format!("video title {:?} sanitized to an empty base name", title.trim()),
            });
        }

        let audio_path = self.output_dir.join(format!("{}.m4a", base_name));
        if !audio_path.exists() {
            let target = audio_path.to_string_lossy().to_string();
            self.executor.execute(
                "yt-dlp",
                &["-f", "bestaudio[ext=m4a]/bestaudio", "-o", &target, url],
            )?;
        }

        if !audio_path.is_file() {
            return Err(ChunkscribeError::Download {
                message: format!(
                    "no audio file at {} after download of {}",
                    audio_path.display(),
                    url
                ),
            });
        }

        log::info!("downloaded audio to: {}", audio_path.display());
        Ok((audio_path, base_name))
    }
}

/// Reduce a video title to a filesystem-safe base name: alphanumerics and
/// spaces only, trailing whitespace stripped.
pub fn sanitize_title(title: &str) -> String {
    let filtered: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .collect();
    filtered.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Mock executor that replays canned stdout per call and records every
    /// invocation. Optionally creates a file to simulate a download.
    struct MockExecutor {
        responses: Mutex<Vec<Result<String>>>,
        calls: Mutex<Vec<Vec<String>>>,
        create_on_download: Option<PathBuf>,
    }

    impl MockExecutor {
        fn new(responses: Vec<Result<String>>) -> Self {
            Self {
                responses: Mutex::new(responses),
                calls: Mutex::new(Vec::new()),
                create_on_download: None,
            }
        }

        fn creating(mut self, path: &Path) -> Self {
            self.create_on_download = Some(path.to_path_buf());
            self
        }

        fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl CommandExecutor for MockExecutor {
        fn execute(&self, command: &str, args: &[&str]) -> Result<String> {
            let mut call = vec![command.to_string()];
            call.extend(args.iter().map(|s| s.to_string()));
            let is_download = args.first() == Some(&"-f");
            self.calls.lock().unwrap().push(call);

            if is_download && let Some(path) = &self.create_on_download {
                fs::write(path, b"fake m4a").unwrap();
            }
            self.responses.lock().unwrap().remove(0)
        }
    }

    #[test]
    fn sanitize_title_keeps_alphanumerics_and_spaces() {
        assert_eq!(
            sanitize_title("Rust: The Movie (2023) | part 1!"),
            "Rust The Movie 2023  part 1"
        );
    }

    #[test]
    fn sanitize_title_strips_trailing_whitespace() {
        assert_eq!(sanitize_title("A Title?! "), "A Title");
    }

    #[test]
    fn sanitize_title_keeps_unicode_letters() {
        assert_eq!(sanitize_title("Motörhead Übersicht"), "Motörhead Übersicht");
    }

    #[test]
    fn download_fetches_title_then_audio() {
        let dir = TempDir::new().unwrap();
        let expected = dir.path().join("My Video.m4a");
        let executor = MockExecutor::new(vec![
            Ok("My Video!\n".to_string()),
            Ok(String::new()),
        ])
        .creating(&expected);

        let downloader = YoutubeDownloader::new(&executor, dir.path());
        let (path, base_name) = downloader.download("https://example.com/v").unwrap();

        assert_eq!(path, expected);
        assert_eq!(base_name, "My Video");

        let calls = executor.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0][0], "yt-dlp");
        assert!(calls[0].contains(&"--print".to_string()));
        assert!(calls[1].contains(&"bestaudio[ext=m4a]/bestaudio".to_string()));
    }

    #[test]
    fn download_reuses_existing_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Cached.m4a"), b"already here").unwrap();
        let executor = MockExecutor::new(vec![Ok("Cached\n".to_string())]);

        let downloader = YoutubeDownloader::new(&executor, dir.path());
        let (path, base_name) = downloader.download("https://example.com/v").unwrap();

        assert_eq!(base_name, "Cached");
        assert!(path.is_file());
        assert_eq!(executor.calls().len(), 1, "no second yt-dlp call expected");
    }

    #[test]
    fn download_fails_when_no_file_appears() {
        let dir = TempDir::new().unwrap();
        // Download call "succeeds" but creates nothing.
        let executor = MockExecutor::new(vec![
            Ok("Ghost Video\n".to_string()),
            Ok(String::new()),
        ]);

        let downloader = YoutubeDownloader::new(&executor, dir.path());
        match downloader.download("https://example.com/v") {
            Err(ChunkscribeError::Download { message }) => {
                assert!(message.contains("Ghost Video.m4a"));
            }
            other => panic!("Expected Download error, got {:?}", other),
        }
    }

    #[test]
    fn download_propagates_tool_failure() {
        let dir = TempDir::new().unwrap();
        let executor = MockExecutor::new(vec![Err(ChunkscribeError::Download {
            message: "yt-dlp exploded".to_string(),
        })]);

        let downloader = YoutubeDownloader::new(&executor, dir.path());
        let result = downloader.download("https://example.com/v");
        assert!(matches!(result, Err(ChunkscribeError::Download { .. })));
    }

    #[test]
    fn download_rejects_empty_sanitized_title() {
        let dir = TempDir::new().unwrap();
        let executor = MockExecutor::new(vec![Ok("!!!???\n".to_string())]);

        let downloader = YoutubeDownloader::new(&executor, dir.path());
        let result = downloader.download("https://example.com/v");
        assert!(matches!(result, Err(ChunkscribeError::Download { .. })));
    }

    #[test]
    fn system_executor_missing_tool_is_download_error() {
        let executor = SystemCommandExecutor::new();
        match executor.execute("definitely-not-a-real-tool-xyz", &[]) {
            Err(ChunkscribeError::Download { message }) => {
                assert!(message.contains("not found"));
            }
            other => panic!("Expected Download error, got {:?}", other),
        }
    }

    #[test]
    fn system_executor_captures_stdout() {
        let executor = SystemCommandExecutor::new();
        let output = executor.execute("echo", &["hello"]).unwrap();
        assert_eq!(output.trim(), "hello");
    }

    #[test]
    fn system_executor_nonzero_exit_is_download_error() {
        let executor = SystemCommandExecutor::new();
        let result = executor.execute("false", &[]);
        assert!(matches!(result, Err(ChunkscribeError::Download { .. })));
    }
}
