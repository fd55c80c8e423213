//! Expand package patterns into Go source files.
//!
//! Patterns follow the go tool: `dir/...` walks recursively, a directory
//! means the files directly inside it, and a `.go` path means that file.

use crate::utils::config::{
    LoaderConfig, GO_SOURCE_EXTENSION, GO_TEST_SUFFIX, RECURSIVE_PATTERN_SUFFIX,
};
use crate::utils::error::LoadError;
use log::debug;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Resolve every pattern; the result is sorted and free of duplicates
///
/// # Errors
/// * `LoadError::InvalidPattern` - Empty pattern or missing path
/// * `LoadError::NoSources` - Pattern matched no Go files
/// * `LoadError::WalkFailed` - Directory could not be read
pub fn discover_sources(
    patterns: &[String],
    config: &LoaderConfig,
) -> Result<Vec<PathBuf>, LoadError> {
    let mut files = BTreeSet::new();

    for pattern in patterns {
        let matched = expand_pattern(pattern, config)?;
        if matched.is_empty() {
            return Err(LoadError::NoSources(pattern.clone()));
        }
        debug!("Pattern '{}' matched {} files", pattern, matched.len());
        files.extend(matched);
    }

    Ok(files.into_iter().collect())
}

fn expand_pattern(pattern: &str, config: &LoaderConfig) -> Result<Vec<PathBuf>, LoadError> {
    let pattern = pattern.trim();
    if pattern.is_empty() {
        return Err(LoadError::InvalidPattern("pattern is empty".to_string()));
    }

    let (root, recursive) = split_pattern(pattern);

    if root.is_file() {
        return Ok(if is_go_source(&root, true) {
            vec![root]
        } else {
            Vec::new()
        });
    }

    if !root.is_dir() {
        return Err(LoadError::InvalidPattern(format!(
            "{} is neither a directory nor a file",
            root.display()
        )));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut files = Vec::new();

    let walker = WalkDir::new(&root)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry, config));

    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() && is_go_source(entry.path(), config.include_tests) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Split `dir/...` into (`dir`, recursive)
fn split_pattern(pattern: &str) -> (PathBuf, bool) {
    match pattern.strip_suffix(RECURSIVE_PATTERN_SUFFIX) {
        Some(rest) => {
            let rest = rest.trim_end_matches(['/', '\\']);
            let root = if rest.is_empty() { "." } else { rest };
            (PathBuf::from(root), true)
        }
        None => (PathBuf::from(pattern), false),
    }
}

fn is_skipped_dir(entry: &DirEntry, config: &LoaderConfig) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.')
        || name.starts_with('_')
        || config.skip_dirs.iter().any(|skip| *skip == name)
}

fn is_go_source(path: &Path, include_tests: bool) -> bool {
    let is_go = path
        .extension()
        .is_some_and(|ext| ext == GO_SOURCE_EXTENSION);
    if !is_go {
        return false;
    }
    include_tests
        || !path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().ends_with(GO_TEST_SUFFIX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "package x\n").unwrap();
    }

    fn rel(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| {
                f.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "main.go");
        touch(dir.path(), "main_test.go");
        touch(dir.path(), "README.md");
        touch(dir.path(), "pkg/util.go");
        touch(dir.path(), "pkg/deep/more.go");
        touch(dir.path(), "vendor/dep/dep.go");
        touch(dir.path(), "testdata/fixture.go");
        touch(dir.path(), ".git/hook.go");
        touch(dir.path(), "_old/legacy.go");
        dir
    }

    #[test]
    fn test_split_pattern() {
        assert_eq!(split_pattern("./..."), (PathBuf::from("."), true));
        assert_eq!(split_pattern("..."), (PathBuf::from("."), true));
        assert_eq!(split_pattern("pkg/..."), (PathBuf::from("pkg"), true));
        assert_eq!(split_pattern("pkg"), (PathBuf::from("pkg"), false));
    }

    #[test]
    fn test_recursive_pattern_skips_special_dirs() {
        let dir = fixture();
        let pattern = format!("{}/...", dir.path().display());

        let files = discover_sources(&[pattern], &LoaderConfig::default()).unwrap();

        assert_eq!(
            rel(dir.path(), &files),
            vec!["main.go", "pkg/deep/more.go", "pkg/util.go"]
        );
    }

    #[test]
    fn test_directory_pattern_is_not_recursive() {
        let dir = fixture();
        let pattern = dir.path().display().to_string();

        let files = discover_sources(&[pattern], &LoaderConfig::default()).unwrap();

        assert_eq!(rel(dir.path(), &files), vec!["main.go"]);
    }

    #[test]
    fn test_include_tests() {
        let dir = fixture();
        let config = LoaderConfig {
            include_tests: true,
            ..Default::default()
        };

        let files = discover_sources(&[dir.path().display().to_string()], &config).unwrap();

        assert_eq!(rel(dir.path(), &files), vec!["main.go", "main_test.go"]);
    }

    #[test]
    fn test_file_pattern_and_duplicates() {
        let dir = fixture();
        let file = dir.path().join("pkg/util.go").display().to_string();
        let pkg = dir.path().join("pkg").display().to_string();

        let files = discover_sources(&[file, pkg], &LoaderConfig::default()).unwrap();

        assert_eq!(rel(dir.path(), &files), vec!["pkg/util.go"]);
    }

    #[test]
    fn test_no_sources_is_error() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "notes.txt");

        let result = discover_sources(&[dir.path().display().to_string()], &LoaderConfig::default());

        assert!(matches!(result, Err(LoadError::NoSources(_))));
    }

    #[test]
    fn test_missing_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope").display().to_string();

        let result = discover_sources(&[missing], &LoaderConfig::default());

        assert!(matches!(result, Err(LoadError::InvalidPattern(_))));
    }
}
