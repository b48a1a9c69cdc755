//! Error taxonomy shared by the three pipelines.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures surfaced to callers of the bundling and rendering pipelines.
#[derive(Debug, Error)]
pub enum DocError {
    /// A directory, module, command, or bundle name did not resolve.
    #[error("not found: {0}")]
    NotFound(String),

    /// An input document could not be decoded as text.
    #[error("malformed input in '{what}': {reason}")]
    MalformedInput { what: String, reason: String },

    #[error("{}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

impl DocError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn malformed(what: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            what: what.into(),
            reason: reason.into(),
        }
    }

    pub fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DocError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message() {
        let err = DocError::not_found("module 'Demo'");
        assert_eq!(err.to_string(), "not found: module 'Demo'");
    }

    #[test]
    fn malformed_message() {
        let err = DocError::malformed("Get-Foo", "invalid utf-8");
        assert_eq!(
            err.to_string(),
            "malformed input in 'Get-Foo': invalid utf-8"
        );
    }
}
