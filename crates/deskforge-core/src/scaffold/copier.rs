//! Recursive tree copying for the cache-reuse path

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Recursively copy `source` into `target`, skipping `exclusions` among
/// the top-level entries of `source` only. Nested directories are copied
/// in full regardless of name.
///
/// Copying a tree onto itself is a no-op. Returns the number of files
/// created under `target`.
pub fn copy_tree(source: &Path, target: &Path, exclusions: &[&str]) -> Result<usize> {
    if !source.is_dir() {
        anyhow::bail!("Source directory does not exist: {}", source.display());
    }

    fs::create_dir_all(target)
        .with_context(|| format!("Failed to create directory: {}", target.display()))?;

    if same_path(source, target)? {
        return Ok(0);
    }

    let mut copied = 0;

    let entries = fs::read_dir(source)
        .with_context(|| format!("Failed to read directory: {}", source.display()))?;
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        if exclusions.iter().any(|ex| name == *ex) {
            continue;
        }

        let src = entry.path();
        let dst = target.join(&name);
        if entry.file_type()?.is_dir() {
            copied += copy_dir_recursive(&src, &dst)?;
        } else {
            fs::copy(&src, &dst)
                .with_context(|| format!("Failed to copy file: {}", src.display()))?;
            copied += 1;
        }
    }

    Ok(copied)
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<usize> {
    let mut copied = 0;

    for entry in WalkDir::new(src) {
        let entry = entry?;
        let rel = entry.path().strip_prefix(src)?;
        let target_path = dst.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target_path)
                .with_context(|| format!("Failed to create directory: {}", target_path.display()))?;
        } else {
            if let Some(parent) = target_path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            fs::copy(entry.path(), &target_path)
                .with_context(|| format!("Failed to copy file: {}", entry.path().display()))?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Both paths exist at this point, so canonicalization cannot miss.
fn same_path(a: &Path, b: &Path) -> Result<bool> {
    let a = fs::canonicalize(a)
        .with_context(|| format!("Failed to resolve path: {}", a.display()))?;
    let b = fs::canonicalize(b)
        .with_context(|| format!("Failed to resolve path: {}", b.display()))?;
    Ok(a == b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_root_level_exclusions_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = tmp.path().join("cache");
        let target = tmp.path().join("target");

        touch(&cache.join("a.txt"), "a");
        touch(&cache.join("dist/bundle.js"), "x");
        touch(&cache.join("logs/run.log"), "x");
        touch(&cache.join(".git/HEAD"), "x");

        let copied = copy_tree(&cache, &target, &["dist", "logs", ".git"]).unwrap();

        assert_eq!(copied, 1);
        assert_eq!(names(&target), vec!["a.txt"]);
    }

    #[test]
    fn test_nested_directories_copy_in_full() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = tmp.path().join("cache");
        let target = tmp.path().join("target");

        // "dist" is excluded only at the copy root
        touch(&cache.join("frontend/dist/bundle.js"), "x");
        touch(&cache.join("frontend/index.html"), "x");

        copy_tree(&cache, &target, &["dist", "logs", ".git"]).unwrap();

        assert!(target.join("frontend/dist/bundle.js").is_file());
        assert!(target.join("frontend/index.html").is_file());
    }

    #[test]
    fn test_copy_onto_itself_is_a_noop() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("tree");
        touch(&dir.join("a.txt"), "original");
        touch(&dir.join("sub/b.txt"), "nested");

        let copied = copy_tree(&dir, &dir, &["dist"]).unwrap();

        assert_eq!(copied, 0);
        assert_eq!(fs::read_to_string(dir.join("a.txt")).unwrap(), "original");
        assert_eq!(fs::read_to_string(dir.join("sub/b.txt")).unwrap(), "nested");
    }

    #[test]
    fn test_missing_source_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let result = copy_tree(
            &tmp.path().join("absent"),
            &tmp.path().join("target"),
            &[],
        );
        assert!(result.is_err());
    }
}
