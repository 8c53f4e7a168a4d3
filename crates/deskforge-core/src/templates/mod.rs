//! In-memory template set for generated projects
//!
//! This module provides:
//! - `FileEntry`, the unit the scaffold engine writes to disk
//! - Backend flavor definitions and their per-flavor fragments
//! - Pure rendering of the complete file set for a plan

pub mod backend;
pub mod catalog;

pub use backend::Backend;
pub use catalog::render_all;

/// Host operating-system family, as far as generated scripts and
/// subprocess invocation care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Posix,
    Windows,
}

impl OsFamily {
    /// Family of the OS this binary was compiled for.
    pub fn host() -> Self {
        if cfg!(windows) {
            OsFamily::Windows
        } else {
            OsFamily::Posix
        }
    }
}

/// A single generated file, rendered in memory before any I/O happens.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Path relative to the target root, `/`-separated.
    pub relative_path: String,

    pub content: Vec<u8>,

    /// Mark the file executable on Posix targets; ignored elsewhere.
    pub executable: bool,
}

impl FileEntry {
    /// Plain text entry.
    pub fn text(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            relative_path: path.into(),
            content: content.into().into_bytes(),
            executable: false,
        }
    }

    /// Shell script entry, executable on Posix targets.
    pub fn script(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            relative_path: path.into(),
            content: content.into().into_bytes(),
            executable: true,
        }
    }
}
