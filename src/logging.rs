//! Run log initialization.
//!
//! Events go through the `log` facade into an append-only file, one
//! timestamped line per event. The log is observational only; nothing in
//! the pipeline depends on it.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Initialize logging into the append-only run log at `path`.
///
/// Safe to call more than once; only the first call installs the logger.
/// The filter defaults to `info` and can be raised via `RUST_LOG`.
pub fn init(path: &Path) -> std::io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {}: {}",
                buf.timestamp_seconds(),
                record.level(),
                record.args()
            )
        })
        .try_init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn init_creates_log_file_and_tolerates_reinit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("transcription.log");

        init(&path).unwrap();
        init(&path).unwrap();

        assert!(path.is_file());
    }

    #[test]
    fn init_fails_for_unwritable_path() {
        let dir = TempDir::new().unwrap();
        let result = init(&dir.path().join("no-such-dir").join("run.log"));
        assert!(result.is_err());
    }
}
