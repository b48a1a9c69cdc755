//! Module bundling — concatenate a module's loose script files into one
//! distributable bundle, hashing each input for change detection.

use crate::error::{DocError, Result};
use crate::model::BundleResult;
use glob::Pattern;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of the loose script files picked up by the bundler.
pub const SCRIPT_EXT: &str = "sh";

/// Suffix of the written bundle file.
pub const BUNDLE_SUFFIX: &str = "bundle.sh";

pub fn bundle_file_name(module: &str) -> String {
    format!("{module}.{BUNDLE_SUFFIX}")
}

/// Read, hash, and concatenate the module's script files.
///
/// Files are taken in name order for deterministic output. The exclusion
/// pattern matches against bare file names. Each hash covers the exact
/// bytes read from that file.
pub fn collect(source_dir: &Path, exclude: Option<&Pattern>) -> Result<BundleResult> {
    if !source_dir.is_dir() {
        return Err(DocError::not_found(format!(
            "source directory {}",
            source_dir.display()
        )));
    }

    let mut files: Vec<(String, PathBuf)> = Vec::new();
    let entries = fs::read_dir(source_dir).map_err(|e| DocError::io(source_dir, e))?;
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(SCRIPT_EXT) {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if exclude.is_some_and(|p| p.matches(name)) {
            continue;
        }
        files.push((name.to_string(), path));
    }
    files.sort();

    let mut sources = Vec::new();
    let mut texts = Vec::new();
    let mut hashes = BTreeMap::new();
    for (name, path) in files {
        let bytes = fs::read(&path).map_err(|e| DocError::io(&path, e))?;
        hashes.insert(path.clone(), format!("{:x}", Sha256::digest(&bytes)));
        let text = String::from_utf8(bytes)
            .map_err(|e| DocError::malformed(name, e.to_string()))?;
        texts.push(text);
        sources.push(path);
    }

    Ok(BundleResult {
        sources,
        text: texts.join("\n"),
        hashes,
    })
}

/// Write the bundle to `<out_dir>/<module>.bundle.sh`, silently
/// overwriting any existing file there.
pub fn write_bundle(result: &BundleResult, module: &str, out_dir: &Path) -> Result<PathBuf> {
    if !out_dir.is_dir() {
        return Err(DocError::not_found(format!(
            "output directory {}",
            out_dir.display()
        )));
    }
    let path = out_dir.join(bundle_file_name(module));
    fs::write(&path, &result.text).map_err(|e| DocError::io(&path, e))?;
    Ok(path)
}
