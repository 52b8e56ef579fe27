use crate::models::FileMapping;
use globset::{GlobBuilder, GlobMatcher};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

/// Errors raised while planning the copy: bad configuration or a failed
/// directory walk. I/O errors on individual copies are reported per file
/// by the copy service instead.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("input directory does not exist: {0}")]
    InputRootNotFound(PathBuf),

    #[error("invalid glob pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("failed to walk input directory")]
    Walk(#[from] walkdir::Error),
}

/// The plan for one run: input root, output root, compiled glob, suffix.
///
/// `iter()` walks the input root lazily and yields one [`FileMapping`] per
/// matching regular file. Each call starts a fresh walk, so the sequence is
/// restartable; nothing is cached between calls.
pub struct PathMappings {
    input_root: PathBuf,
    output_root: PathBuf,
    matcher: GlobMatcher,
    suffix: String,
}

impl PathMappings {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(
        input_root: P,
        output_root: Q,
        pattern: &str,
        suffix: &str,
    ) -> Result<Self, DiscoveryError> {
        let input_root = input_root.as_ref().to_path_buf();

        if !input_root.is_dir() {
            return Err(DiscoveryError::InputRootNotFound(input_root));
        }

        // `*` must not cross directory boundaries; `**` spans them.
        let matcher = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|source| DiscoveryError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?
            .compile_matcher();

        Ok(Self {
            input_root,
            output_root: output_root.as_ref().to_path_buf(),
            matcher,
            suffix: suffix.to_string(),
        })
    }

    pub fn input_root(&self) -> &Path {
        &self.input_root
    }

    /// Walk the input root and yield a mapping for every matching file.
    /// The glob is matched against the path relative to the input root.
    pub fn iter(&self) -> impl Iterator<Item = Result<FileMapping, DiscoveryError>> + '_ {
        WalkDir::new(&self.input_root)
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        return None;
                    }

                    let relative = entry
                        .path()
                        .strip_prefix(&self.input_root)
                        .unwrap_or_else(|_| entry.path());

                    if !self.matcher.is_match(relative) {
                        debug!("no match, skipping {}", relative.display());
                        return None;
                    }

                    Some(Ok(FileMapping::from_source(
                        &self.input_root,
                        &self.output_root,
                        entry.into_path(),
                        &self.suffix,
                    )))
                }
                Err(e) => Some(Err(DiscoveryError::Walk(e))),
            })
    }
}

/// Discover all mappings up front
/// Convenience wrapper over [`PathMappings`] for callers that want the
/// whole finite sequence at once.
pub fn discover_mappings<P: AsRef<Path>, Q: AsRef<Path>>(
    input_root: P,
    output_root: Q,
    pattern: &str,
    suffix: &str,
) -> Result<Vec<FileMapping>, DiscoveryError> {
    let mappings = PathMappings::new(input_root, output_root, pattern, suffix)?;
    mappings.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(root: &Path, relative: &str, content: &[u8]) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_discover_matches_recursively_and_filters() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_file(input.path(), "a/scan.dcm", b"dicom");
        write_file(input.path(), "b/notes.txt", b"text");
        write_file(input.path(), "top.dcm", b"dicom");

        let mut mappings =
            discover_mappings(input.path(), output.path(), "**/*.dcm", ".bak.dcm").unwrap();
        mappings.sort_by(|a, b| a.source.cmp(&b.source));

        assert_eq!(mappings.len(), 2);
        assert_eq!(mappings[0].source, input.path().join("a/scan.dcm"));
        assert_eq!(
            mappings[0].destination,
            output.path().join("a/scan.bak.dcm")
        );
        assert_eq!(mappings[1].source, input.path().join("top.dcm"));
        assert_eq!(mappings[1].destination, output.path().join("top.bak.dcm"));
    }

    #[test]
    fn test_discover_single_star_stays_top_level() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_file(input.path(), "top.dcm", b"dicom");
        write_file(input.path(), "a/nested.dcm", b"dicom");

        let mappings =
            discover_mappings(input.path(), output.path(), "*.dcm", ".bak.dcm").unwrap();

        assert_eq!(mappings.len(), 1);
        assert_eq!(mappings[0].source, input.path().join("top.dcm"));
    }

    #[test]
    fn test_discover_empty_input_root() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();

        let mappings =
            discover_mappings(input.path(), output.path(), "**/*.dcm", ".bak.dcm").unwrap();

        assert!(mappings.is_empty());
    }

    #[test]
    fn test_discover_missing_input_root_fails() {
        let output = TempDir::new().unwrap();

        let result = discover_mappings(
            Path::new("/nonexistent/input/root"),
            output.path(),
            "**/*.dcm",
            ".bak.dcm",
        );

        assert!(matches!(result, Err(DiscoveryError::InputRootNotFound(_))));
    }

    #[test]
    fn test_invalid_pattern_is_a_configuration_error() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();

        let result = PathMappings::new(input.path(), output.path(), "[invalid", ".bak.dcm");

        assert!(matches!(result, Err(DiscoveryError::InvalidPattern { .. })));
    }

    #[test]
    fn test_iter_is_restartable() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_file(input.path(), "a/scan.dcm", b"dicom");
        write_file(input.path(), "b/scan.dcm", b"dicom");

        let mappings =
            PathMappings::new(input.path(), output.path(), "**/*.dcm", ".bak.dcm").unwrap();

        let first: Vec<_> = mappings.iter().filter_map(|m| m.ok()).collect();
        let second: Vec<_> = mappings.iter().filter_map(|m| m.ok()).collect();

        assert_eq!(first.len(), 2);
        assert_eq!(first.len(), second.len());
    }
}
