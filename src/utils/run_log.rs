// src/utils/run_log.rs
use std::fs::File;
use std::io::{LineWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Append-only, human-readable record of one pipeline run.
///
/// The file is truncated when the log is opened. Each call writes exactly one
/// line under the lock, so concurrent writers can never split a line. Every
/// line is also forwarded to `tracing`.
pub struct RunLog {
    path: PathBuf,
    sink: Mutex<LineWriter<File>>,
}

impl RunLog {
    /// Opens (and truncates) the run log at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(&path)?;
        Ok(Self {
            path,
            sink: Mutex::new(LineWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn info(&self, message: impl AsRef<str>) {
        let message = message.as_ref();
        tracing::info!("{}", message);
        self.write_line(message);
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        let message = message.as_ref();
        tracing::warn!("{}", message);
        self.write_line(message);
    }

    pub fn error(&self, message: impl AsRef<str>) {
        let message = message.as_ref();
        tracing::error!("{}", message);
        self.write_line(message);
    }

    fn write_line(&self, message: &str) {
        // A poisoned lock only means another writer panicked mid-call; the file is still usable.
        let mut sink = self.sink.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        // Embedded newlines would break the one-event-per-line layout.
        let line = message.replace(['\r', '\n'], " ");
        if let Err(e) = writeln!(sink, "{}", line) {
            tracing::warn!("Failed to write to run log {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_line_per_event_and_truncates_on_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");
        std::fs::write(&path, "stale line from an earlier run\n").unwrap();

        let log = RunLog::create(&path).unwrap();
        log.info("first");
        log.error("second\nstill second");
        log.warn("third");

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines, vec!["first", "second still second", "third"]);
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("nested").join("run.log");
        let log = RunLog::create(&path).unwrap();
        log.info("hello");
        assert_eq!(log.path(), path.as_path());
        assert!(path.exists());
    }
}
