//! Resolved scaffold configuration

use crate::templates::Backend;
use std::path::{Path, PathBuf};

/// Fully resolved configuration for one scaffold run.
///
/// Constructed once after all selections are made; never mutated while
/// the engine is writing.
#[derive(Debug, Clone)]
pub struct ScaffoldPlan {
    pub target_dir: PathBuf,
    pub project_name: String,
    pub backend: Backend,
    pub use_mirror: bool,
    /// Exact Electron version string pinned into the root manifest, with
    /// any leading marker character already stripped.
    pub runtime_version: String,
}

/// Project name derived from the last component of the target directory.
pub fn project_name_from(target_dir: &Path) -> String {
    target_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "deskforge-app".to_string())
}
