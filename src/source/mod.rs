//! Source resolution.
//!
//! Turns `--input_type` / `--input_path` into a local audio file, a stable
//! base name for namespacing the stores, and the tag family of the
//! container. Remote sources are downloaded first; local paths are only
//! checked for existence.

pub mod youtube;

pub use youtube::{CommandExecutor, SystemCommandExecutor, YoutubeDownloader};

use crate::defaults;
use crate::error::{ChunkscribeError, Result};
use crate::tags::TagFamily;
use std::path::{Path, PathBuf};

/// Kind of input the CLI was pointed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum InputType {
    File,
    Youtube,
}

/// A resolved audio source, ready for decoding.
#[derive(Debug, Clone)]
pub struct ResolvedSource {
    /// Local path of the audio file (downloaded, for remote sources).
    pub audio_path: PathBuf,
    /// Filesystem-safe stem used to namespace chunk/transcript directories
    /// and the final transcript file.
    pub base_name: String,
    /// Tag schema of the container.
    pub tag_family: TagFamily,
    /// Directory the final transcript is written into.
    pub transcript_dir: PathBuf,
}

impl ResolvedSource {
    /// Path the final transcript is written to.
    pub fn final_transcript_path(&self) -> PathBuf {
        self.transcript_dir.join(format!("{}.txt", self.base_name))
    }
}

/// Resolve an input into a local audio file.
///
/// # Errors
/// - `FileNotFound` for a local path that does not exist.
/// - `Download` when the remote fetch fails or leaves no file behind.
pub fn resolve(
    input_type: InputType,
    input_path: &str,
    executor: &dyn CommandExecutor,
) -> Result<ResolvedSource> {
    match input_type {
        InputType::File => resolve_local(input_path),
        InputType::Youtube => resolve_youtube(input_path, executor),
    }
}

fn resolve_local(input_path: &str) -> Result<ResolvedSource> {
    let path = Path::new(input_path);
    if !path.is_file() {
        return Err(ChunkscribeError::FileNotFound {
            path: input_path.to_string(),
        });
    }

    let base_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("audio")
        .to_string();

    let tag_family = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("mp3") => TagFamily::Id3,
        _ => TagFamily::Mp4,
    };

    // Final transcript goes next to the source file.
    let transcript_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();

    Ok(ResolvedSource {
        audio_path: path.to_path_buf(),
        base_name,
        tag_family,
        transcript_dir,
    })
}

fn resolve_youtube(url: &str, executor: &dyn CommandExecutor) -> Result<ResolvedSource> {
    let download_dir = PathBuf::from(defaults::DOWNLOADS_DIR);
    let downloader = YoutubeDownloader::new(executor, &download_dir);
    let (audio_path, base_name) = downloader.download(url)?;

    Ok(ResolvedSource {
        audio_path,
        base_name,
        // YouTube audio arrives as m4a.
        tag_family: TagFamily::Mp4,
        transcript_dir: download_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn resolve_local_mp3_uses_id3_family() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("my episode.mp3");
        fs::write(&path, b"data").unwrap();

        let source =
            resolve_local(path.to_str().unwrap()).unwrap();

        assert_eq!(source.base_name, "my episode");
        assert_eq!(source.tag_family, TagFamily::Id3);
        assert_eq!(source.audio_path, path);
        assert_eq!(source.transcript_dir, dir.path());
        assert_eq!(
            source.final_transcript_path(),
            dir.path().join("my episode.txt")
        );
    }

    #[test]
    fn resolve_local_m4a_uses_mp4_family() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("talk.m4a");
        fs::write(&path, b"data").unwrap();

        let source = resolve_local(path.to_str().unwrap()).unwrap();
        assert_eq!(source.tag_family, TagFamily::Mp4);
    }

    #[test]
    fn resolve_local_uppercase_mp3_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("SHOUTING.MP3");
        fs::write(&path, b"data").unwrap();

        let source = resolve_local(path.to_str().unwrap()).unwrap();
        assert_eq!(source.tag_family, TagFamily::Id3);
    }

    #[test]
    fn resolve_local_missing_file_fails_fast() {
        match resolve_local("/nonexistent/episode.mp3") {
            Err(ChunkscribeError::FileNotFound { path }) => {
                assert_eq!(path, "/nonexistent/episode.mp3");
            }
            other => panic!("Expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn resolve_local_bare_filename_writes_transcript_to_current_dir() {
        // A bare relative filename has an empty parent; the transcript dir
        // must still be a usable path.
        let _cwd = crate::test_util::CWD_LOCK
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        let dir = TempDir::new().unwrap();
        let old_cwd = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();
        fs::write("episode.mp3", b"data").unwrap();

        let source = resolve_local("episode.mp3").unwrap();
        std::env::set_current_dir(old_cwd).unwrap();

        assert_eq!(source.transcript_dir, Path::new("."));
        assert_eq!(
            source.final_transcript_path(),
            Path::new(".").join("episode.txt")
        );
    }
}
