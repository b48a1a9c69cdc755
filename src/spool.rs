//! Scoped spool for per-command help extracts.
//!
//! Raw help bytes pass through a temp file before extraction. The file is
//! removed when the spool drops, on success and error paths alike.

use crate::error::{DocError, Result};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// A per-command help extract spooled to disk.
pub struct HelpSpool {
    file: NamedTempFile,
}

impl HelpSpool {
    /// Spool raw help bytes to a fresh temp file.
    pub fn write(raw: &[u8]) -> Result<Self> {
        let mut file =
            NamedTempFile::new().map_err(|e| DocError::io(Path::new("."), e))?;
        file.write_all(raw).map_err(|e| DocError::io(file.path(), e))?;
        file.flush().map_err(|e| DocError::io(file.path(), e))?;
        Ok(Self { file })
    }

    /// Read the spooled document back as UTF-8 text.
    ///
    /// A document that cannot be decoded fails with
    /// [`DocError::MalformedInput`] naming the command; other I/O failures
    /// propagate as-is.
    pub fn read(&self, command: &str) -> Result<String> {
        match fs::read_to_string(self.file.path()) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                Err(DocError::malformed(command, e.to_string()))
            }
            Err(e) => Err(DocError::io(self.file.path(), e)),
        }
    }

    #[cfg(test)]
    fn path(&self) -> std::path::PathBuf {
        self.file.path().to_path_buf()
    }
}

/// Spool raw help bytes and read them back, dropping the file either way.
pub fn spool_help(command: &str, raw: &[u8]) -> Result<String> {
    HelpSpool::write(raw)?.read(command)
}
