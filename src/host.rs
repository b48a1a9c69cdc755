//! Host runtime seam — module enumeration, help-text retrieval, and
//! bundle reloading live behind one trait so the pipelines never touch
//! the host's loading mechanism directly.

use crate::error::{DocError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Column width the host renders help text at. The scraper's line-based
/// assumptions only hold for text formatted at this width.
#[allow(dead_code)]
pub const HELP_TEXT_WIDTH: usize = 500;

/// File suffix of stored help documents in a [`DirHost`] store.
const HELP_SUFFIX: &str = ".help.txt";

pub trait ModuleHost {
    /// Names of the commands belonging to a module, sorted.
    fn commands(&self, module: &str) -> Result<Vec<String>>;

    /// Whether a name resolves to a single known command.
    fn is_command(&self, name: &str) -> bool;

    /// Raw bytes of one command's formatted help text.
    fn help_text(&self, command: &str) -> Result<Vec<u8>>;

    /// Make a freshly written bundle available to downstream tooling.
    fn reload(&self, module: &str, bundle: &Path) -> Result<()>;
}

/// File-backed host: modules are subdirectories of a store root, and each
/// command's help text lives at `<root>/<module>/<command>.help.txt`.
pub struct DirHost {
    root: PathBuf,
}

impl DirHost {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Scan every module directory for the command's help file.
    fn find_help_file(&self, command: &str) -> Option<PathBuf> {
        let file = format!("{command}{HELP_SUFFIX}");
        for entry in fs::read_dir(&self.root).ok()?.flatten() {
            let candidate = entry.path().join(&file);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        None
    }
}

impl ModuleHost for DirHost {
    fn commands(&self, module: &str) -> Result<Vec<String>> {
        let dir = self.root.join(module);
        if !dir.is_dir() {
            return Err(DocError::not_found(format!("module '{module}'")));
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&dir).map_err(|e| DocError::io(&dir, e))?.flatten() {
            if !entry.path().is_file() {
                continue;
            }
            let file_name = entry.file_name();
            if let Some(name) = file_name.to_str().and_then(|n| n.strip_suffix(HELP_SUFFIX)) {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn is_command(&self, name: &str) -> bool {
        self.find_help_file(name).is_some()
    }

    fn help_text(&self, command: &str) -> Result<Vec<u8>> {
        let path = self
            .find_help_file(command)
            .ok_or_else(|| DocError::not_found(format!("command '{command}'")))?;
        fs::read(&path).map_err(|e| DocError::io(&path, e))
    }

    fn reload(&self, module: &str, bundle: &Path) -> Result<()> {
        if bundle.is_file() {
            Ok(())
        } else {
            Err(DocError::not_found(format!(
                "bundle for module '{module}' at {}",
                bundle.display()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with(module: &str, commands: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        let module_dir = dir.path().join(module);
        fs::create_dir(&module_dir).unwrap();
        for (name, help) in commands {
            fs::write(module_dir.join(format!("{name}{HELP_SUFFIX}")), help).unwrap();
        }
        dir
    }

    #[test]
    fn commands_sorted() {
        let store = store_with("Demo", &[("Get-B", "b"), ("Get-A", "a")]);
        let host = DirHost::new(store.path());
        assert_eq!(host.commands("Demo").unwrap(), vec!["Get-A", "Get-B"]);
    }

    #[test]
    fn unknown_module_not_found() {
        let store = store_with("Demo", &[]);
        let host = DirHost::new(store.path());
        assert!(matches!(
            host.commands("Other"),
            Err(DocError::NotFound(_))
        ));
    }

    #[test]
    fn help_text_roundtrip() {
        let store = store_with("Demo", &[("Get-A", "NAME\n    Get-A\n")]);
        let host = DirHost::new(store.path());
        assert_eq!(host.help_text("Get-A").unwrap(), b"NAME\n    Get-A\n");
    }

    #[test]
    fn unknown_command_not_found() {
        let store = store_with("Demo", &[("Get-A", "a")]);
        let host = DirHost::new(store.path());
        assert!(host.is_command("Get-A"));
        assert!(!host.is_command("Get-Z"));
        assert!(matches!(
            host.help_text("Get-Z"),
            Err(DocError::NotFound(_))
        ));
    }

    #[test]
    fn reload_requires_bundle_file() {
        let store = store_with("Demo", &[]);
        let host = DirHost::new(store.path());
        let bundle = store.path().join("Demo.bundle.sh");
        assert!(matches!(
            host.reload("Demo", &bundle),
            Err(DocError::NotFound(_))
        ));
        fs::write(&bundle, "echo demo\n").unwrap();
        host.reload("Demo", &bundle).unwrap();
    }
}
