//! Error type shared by the file and persistence helpers

use std::path::PathBuf;

use thiserror::Error;

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    IoFailure,
    InvalidArgument,
    Serialization,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("I/O failure on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write to the console")]
    Console(#[source] std::io::Error),
    #[error("{0}")]
    InvalidArgument(String),
    #[error("Failed to (de)serialize {}: {reason}", .path.display())]
    Serialization { path: PathBuf, reason: String },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::Io { .. } | Error::Console(_) => ErrorKind::IoFailure,
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::Serialization { .. } => ErrorKind::Serialization,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Like [`Error::io`], but a missing file becomes [`Error::NotFound`]
    pub(crate) fn io_or_not_found(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Error::NotFound(path)
        } else {
            Error::Io { path, source }
        }
    }

    pub(crate) fn serialization(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::Serialization {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_not_found_is_promoted() {
        let err = Error::io_or_not_found(
            "missing.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "File not found: missing.txt");
    }

    #[test]
    fn test_io_other_stays_io() {
        let err = Error::io_or_not_found(
            "locked.txt",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope"),
        );
        assert_eq!(err.kind(), ErrorKind::IoFailure);

        let err = Error::io(
            "missing.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.kind(), ErrorKind::IoFailure);
    }

    #[test]
    fn test_console_failure_is_io_kind() {
        let err = Error::Console(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "closed",
        ));
        assert_eq!(err.kind(), ErrorKind::IoFailure);
        assert_eq!(err.to_string(), "Failed to write to the console");
    }
}
