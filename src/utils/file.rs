use std::fmt::{self, Display, Formatter};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::utils::logging::{default_log_path, logged, LogMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOp {
    Read,
    Write,
    Append,
}

impl Display for FileOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FileOp::Read => write!(f, "read the file"),
            FileOp::Write => write!(f, "write to the file"),
            FileOp::Append => write!(f, "append to the file"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    /// Raised only when the handler is built for a path that does not exist.
    #[error("File '{}' does not exist!", .path.display())]
    NotFound { path: PathBuf },

    /// Any failure while reading, writing or appending.
    #[error("Unable to {op}!")]
    Corrupted {
        op: FileOp,
        #[source]
        source: io::Error,
    },
}

impl FileError {
    pub fn kind_name(&self) -> &'static str {
        match self {
            FileError::NotFound { .. } => "FileNotFound",
            FileError::Corrupted { .. } => "FileCorrupted",
        }
    }

    fn corrupted(op: FileOp) -> impl FnOnce(io::Error) -> FileError {
        move |source| FileError::Corrupted { op, source }
    }
}

/// Reads, rewrites and appends to a single UTF-8 text file.
///
/// Read and append failures are recorded in `log_path`; write failures go to
/// the console. Every failure is still returned to the caller.
#[derive(Debug, Clone)]
pub struct TextFileHandler {
    pub path: PathBuf,
    log_path: PathBuf,
}

impl TextFileHandler {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, FileError> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(FileError::NotFound { path });
        }
        Ok(Self {
            path,
            log_path: default_log_path(),
        })
    }

    pub fn with_log_path(mut self, log_path: impl Into<PathBuf>) -> Self {
        self.log_path = log_path.into();
        self
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn read(&self) -> Result<String, FileError> {
        logged("read", &LogMode::File(self.log_path.clone()), || {
            fs::read_to_string(&self.path).map_err(FileError::corrupted(FileOp::Read))
        })
    }

    /// Replaces the whole file content with `text`.
    pub fn write(&self, text: &str) -> Result<(), FileError> {
        logged("write", &LogMode::Console, || {
            fs::write(&self.path, text).map_err(FileError::corrupted(FileOp::Write))
        })
    }

    pub fn append(&self, text: &str) -> Result<(), FileError> {
        logged("append", &LogMode::File(self.log_path.clone()), || {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)
                .map_err(FileError::corrupted(FileOp::Append))?;
            file.write_all(text.as_bytes())
                .map_err(FileError::corrupted(FileOp::Append))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("data.txt");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn new_rejects_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");

        let err = TextFileHandler::new(&missing).unwrap_err();

        assert!(matches!(err, FileError::NotFound { .. }));
        assert_eq!(err.kind_name(), "FileNotFound");
        assert_eq!(err.to_string(), format!("File '{}' does not exist!", missing.display()));
    }

    #[test]
    fn read_write_append_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let handler = TextFileHandler::new(seeded(dir.path(), "test"))
            .unwrap()
            .with_log_path(dir.path().join("log.txt"));

        assert_eq!(handler.read().unwrap(), "test");

        handler.write("hello").unwrap();
        handler.append(", world").unwrap();
        assert_eq!(handler.read().unwrap(), "hello, world");
        assert!(!dir.path().join("log.txt").exists());
    }

    #[test]
    fn read_failure_is_corrupted_and_logged_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("log.txt");
        let mut handler = TextFileHandler::new(seeded(dir.path(), "test"))
            .unwrap()
            .with_log_path(&log);
        handler.path = dir.path().join("gone").join("error.txt");

        let err = handler.read().unwrap_err();

        assert!(matches!(err, FileError::Corrupted { op: FileOp::Read, .. }));
        assert_eq!(err.to_string(), "Unable to read the file!");
        let content = fs::read_to_string(&log).unwrap();
        assert!(content.contains("ERROR"));
        assert!(content.contains("Unable to read the file!"));
    }

    #[test]
    fn invalid_utf8_is_corrupted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bin.dat");
        fs::write(&path, [0xff, 0xfe, 0xfd]).unwrap();
        let handler = TextFileHandler::new(&path)
            .unwrap()
            .with_log_path(dir.path().join("log.txt"));

        let err = handler.read().unwrap_err();
        assert_eq!(err.kind_name(), "FileCorrupted");
    }

    #[test]
    fn write_failure_goes_to_console_not_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("log.txt");
        let mut handler = TextFileHandler::new(seeded(dir.path(), "x"))
            .unwrap()
            .with_log_path(&log);
        handler.path = dir.path().to_path_buf();

        let err = handler.write("data").unwrap_err();

        assert_eq!(err.to_string(), "Unable to write to the file!");
        assert!(!log.exists());
    }

    #[test]
    fn append_failure_is_logged() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("log.txt");
        let mut handler = TextFileHandler::new(seeded(dir.path(), "x"))
            .unwrap()
            .with_log_path(&log);
        handler.path = dir.path().join("missing_dir").join("a.txt");

        let err = handler.append("more").unwrap_err();

        assert_eq!(err.to_string(), "Unable to append to the file!");
        assert!(fs::read_to_string(&log).unwrap().contains("Unable to append to the file!"));
    }
}
