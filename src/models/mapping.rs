use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One unit of work: copy `source` to `destination`.
///
/// Mappings are computed fresh on every run by walking the input root;
/// nothing about them persists between invocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMapping {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl FileMapping {
    /// Create a new FileMapping
    pub fn new(source: PathBuf, destination: PathBuf) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// Build the mapping for a source file found under `input_root`:
    /// same relative location under `output_root`, suffix substituted.
    pub fn from_source(
        input_root: &Path,
        output_root: &Path,
        source: PathBuf,
        suffix: &str,
    ) -> Self {
        let destination = map_destination(input_root, output_root, &source, suffix);
        Self::new(source, destination)
    }
}

/// Pure function to derive the destination path for a source file.
///
/// The source's location relative to `input_root` is re-rooted under
/// `output_root`, and the file name's final extension is replaced by
/// `suffix` (appended when the name has no extension).
pub fn map_destination(
    input_root: &Path,
    output_root: &Path,
    source: &Path,
    suffix: &str,
) -> PathBuf {
    let relative = source.strip_prefix(input_root).unwrap_or(source);
    let mut destination = output_root.join(relative);

    let renamed = destination
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| apply_suffix(name, suffix));

    if let Some(name) = renamed {
        destination.set_file_name(name);
    }

    destination
}

/// Replace a file name's final extension with `suffix`.
/// Pure function; names without an extension get the suffix appended.
pub fn apply_suffix(file_name: &str, suffix: &str) -> String {
    // A leading dot alone ("`.gitignore`") is part of the name, not an extension.
    let stem = match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    };
    format!("{stem}{suffix}")
}
