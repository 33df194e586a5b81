use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::Result;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H:%M:%S";

/// Append-only log of the pipeline stages.
/// Every call to `record` adds a single `"{timestamp}: {message}"` line.
#[derive(Debug, Clone)]
pub struct ProgressLog {
    path: PathBuf,
}

impl ProgressLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends the message to the log file, creating the file if needed.
    pub fn record(&self, message: &str) -> Result<()> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{timestamp}: {message}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use tempfile::TempDir;

    #[test]
    fn test_record_appends_timestamped_lines() {
        let dir = TempDir::new().unwrap();
        let log = ProgressLog::new(dir.path().join("code_log.txt"));

        log.record("first").unwrap();
        log.record("second").unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let (stamp, message) = lines[0].split_once(": ").unwrap();
        assert!(NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).is_ok());
        assert_eq!(message, "first");
        assert!(lines[1].ends_with(": second"));
    }

    #[test]
    fn test_record_keeps_existing_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("code_log.txt");
        std::fs::write(&path, "old line\n").unwrap();

        ProgressLog::new(&path).record("new line").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("old line\n"));
        assert!(content.trim_end().ends_with(": new line"));
    }
}
