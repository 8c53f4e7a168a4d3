//! Directory materialization for a scaffold plan

use super::copier::copy_tree;
use super::plan::ScaffoldPlan;
use crate::config;
use crate::templates::{self, OsFamily};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Which materialization path a run takes.
///
/// The two paths are mutually exclusive; both end with a complete tree
/// at the target.
#[derive(Debug, Clone)]
pub enum Materialize {
    /// Render every template into a fresh tree.
    Populate,
    /// Clone a previously generated tree from the cache.
    Reuse { cache_root: PathBuf },
}

/// Authorization for the destructive clear of a non-empty target.
///
/// `clear_target` is the only recursive delete in the crate and cannot
/// be invoked without one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwriteApproval {
    /// The user answered the overwrite prompt affirmatively.
    Confirmed,
    /// `--force` was passed; no prompt was shown.
    Forced,
}

/// Outcome of a completed materialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Materialization {
    Populated { files: usize },
    Reused { entries: usize },
}

/// Writes a scaffold plan to disk, either by rendering templates or by
/// cloning the cached tree.
pub struct ScaffoldEngine {
    plan: ScaffoldPlan,
    os: OsFamily,
}

impl ScaffoldEngine {
    pub fn new(plan: ScaffoldPlan) -> Self {
        Self::with_os(plan, OsFamily::host())
    }

    /// Engine with an explicit OS family (exercised by tests).
    pub fn with_os(plan: ScaffoldPlan, os: OsFamily) -> Self {
        Self { plan, os }
    }

    pub fn plan(&self) -> &ScaffoldPlan {
        &self.plan
    }

    /// Recursively delete the target directory.
    ///
    /// Destructive and irreversible; callers obtain an
    /// `OverwriteApproval` from an explicit confirmation or a force flag
    /// before calling.
    pub fn clear_target(&self, _approval: OverwriteApproval) -> Result<()> {
        let target = &self.plan.target_dir;
        if !target.exists() {
            return Ok(());
        }
        std::fs::remove_dir_all(target)
            .with_context(|| format!("Failed to clear directory: {}", target.display()))
    }

    /// Materialize the tree at the target.
    ///
    /// The target is expected to be empty or absent; a non-empty target
    /// must have been cleared (with approval) beforehand.
    pub async fn run(&self, mode: Materialize) -> Result<Materialization> {
        match mode {
            Materialize::Populate => self.populate().await,
            Materialize::Reuse { cache_root } => self.reuse(&cache_root),
        }
    }

    async fn populate(&self) -> Result<Materialization> {
        let target = &self.plan.target_dir;

        // Idempotent: the fixed directory set may partially exist
        fs::create_dir_all(target)
            .await
            .with_context(|| format!("Failed to create directory: {}", target.display()))?;
        for dir in config::PROJECT_DIRS {
            let path = target.join(dir);
            fs::create_dir_all(&path)
                .await
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        }

        let entries = templates::render_all(&self.plan, self.os);
        for entry in &entries {
            let path = target.join(&entry.relative_path);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            fs::write(&path, &entry.content)
                .await
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
            if entry.executable {
                mark_executable(&path)?;
            }
        }

        Ok(Materialization::Populated {
            files: entries.len(),
        })
    }

    fn reuse(&self, cache_root: &Path) -> Result<Materialization> {
        if available_cache_at(cache_root).is_none() {
            anyhow::bail!(
                "Scaffold cache is missing or empty: {}",
                cache_root.display()
            );
        }

        let entries = copy_tree(cache_root, &self.plan.target_dir, config::COPY_EXCLUSIONS)
            .with_context(|| {
                format!(
                    "Failed to clone cached scaffold into {}",
                    self.plan.target_dir.display()
                )
            })?;

        Ok(Materialization::Reused { entries })
    }

    /// Save the populated tree back to the well-known cache location so a
    /// later run can reuse it without re-rendering.
    pub fn save_cache(&self) -> Result<PathBuf> {
        let cache = config::cache_root()?;
        copy_tree(&self.plan.target_dir, &cache, config::COPY_EXCLUSIONS)
            .with_context(|| format!("Failed to save scaffold cache: {}", cache.display()))?;
        Ok(cache)
    }
}

/// The configured cache tree, if it exists and has entries.
pub fn available_cache() -> Option<PathBuf> {
    let root = config::cache_root().ok()?;
    available_cache_at(&root)
}

fn available_cache_at(root: &Path) -> Option<PathBuf> {
    let mut entries = std::fs::read_dir(root).ok()?;
    entries.next().is_some().then(|| root.to_path_buf())
}

#[cfg(unix)]
fn mark_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .with_context(|| format!("Failed to mark executable: {}", path.display()))
}

#[cfg(not(unix))]
fn mark_executable(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::Backend;

    fn plan(target: PathBuf) -> ScaffoldPlan {
        ScaffoldPlan {
            target_dir: target,
            project_name: "demo".to_string(),
            backend: Backend::Node,
            use_mirror: false,
            runtime_version: "31.3.0".to_string(),
        }
    }

    #[tokio::test]
    async fn test_populate_writes_the_fixed_layout() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("app");
        let engine = ScaffoldEngine::with_os(plan(target.clone()), OsFamily::Posix);

        let outcome = engine.run(Materialize::Populate).await.unwrap();

        assert!(matches!(outcome, Materialization::Populated { files } if files > 0));
        for dir in config::PROJECT_DIRS {
            assert!(target.join(dir).is_dir(), "missing dir {}", dir);
        }
        assert!(target.join("package.json").is_file());
        assert!(target.join("electron/main.js").is_file());
        assert!(target.join("frontend/package.json").is_file());
        assert!(target.join("backend/server.js").is_file());

        let manifest = std::fs::read_to_string(target.join("package.json")).unwrap();
        assert!(manifest.contains("\"electron\": \"31.3.0\""));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_populate_marks_scripts_executable() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("app");
        let engine = ScaffoldEngine::with_os(plan(target.clone()), OsFamily::Posix);
        engine.run(Materialize::Populate).await.unwrap();

        let mode = std::fs::metadata(target.join("scripts/start.sh"))
            .unwrap()
            .permissions()
            .mode();
        assert_ne!(mode & 0o111, 0, "start.sh should be executable");
    }

    #[tokio::test]
    async fn test_populate_is_idempotent_over_existing_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("app");
        std::fs::create_dir_all(target.join("electron")).unwrap();

        let engine = ScaffoldEngine::with_os(plan(target.clone()), OsFamily::Posix);
        engine.run(Materialize::Populate).await.unwrap();

        assert!(target.join("electron/main.js").is_file());
    }

    #[tokio::test]
    async fn test_reuse_clones_cache_with_exclusions() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = tmp.path().join("cache");
        let target = tmp.path().join("app");

        std::fs::create_dir_all(cache.join("electron")).unwrap();
        std::fs::write(cache.join("package.json"), "{}").unwrap();
        std::fs::write(cache.join("electron/main.js"), "//").unwrap();
        std::fs::create_dir_all(cache.join("dist")).unwrap();
        std::fs::write(cache.join("dist/bundle.js"), "x").unwrap();

        let engine = ScaffoldEngine::with_os(plan(target.clone()), OsFamily::Posix);
        let outcome = engine
            .run(Materialize::Reuse { cache_root: cache })
            .await
            .unwrap();

        assert_eq!(outcome, Materialization::Reused { entries: 2 });
        assert!(target.join("package.json").is_file());
        assert!(target.join("electron/main.js").is_file());
        assert!(!target.join("dist").exists());
    }

    #[tokio::test]
    async fn test_reuse_fails_on_missing_or_empty_cache() {
        let tmp = tempfile::tempdir().unwrap();
        let engine = ScaffoldEngine::with_os(plan(tmp.path().join("app")), OsFamily::Posix);

        let missing = engine
            .run(Materialize::Reuse {
                cache_root: tmp.path().join("absent"),
            })
            .await;
        assert!(missing.is_err());

        let empty = tmp.path().join("empty");
        std::fs::create_dir_all(&empty).unwrap();
        let result = engine
            .run(Materialize::Reuse { cache_root: empty })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_clear_target_removes_the_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("app");
        std::fs::create_dir_all(target.join("sub")).unwrap();
        std::fs::write(target.join("sub/file.txt"), "x").unwrap();

        let engine = ScaffoldEngine::with_os(plan(target.clone()), OsFamily::Posix);
        engine.clear_target(OverwriteApproval::Confirmed).unwrap();

        assert!(!target.exists());
    }

    #[tokio::test]
    async fn test_clear_absent_target_is_fine() {
        let tmp = tempfile::tempdir().unwrap();
        let engine = ScaffoldEngine::with_os(plan(tmp.path().join("absent")), OsFamily::Posix);
        engine.clear_target(OverwriteApproval::Forced).unwrap();
    }
}
