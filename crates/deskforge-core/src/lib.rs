//! Deskforge Core - Shared library for scaffolding Electron desktop apps
//!
//! This library generates a multi-component desktop-application skeleton
//! (Electron shell, static frontend, backend service) and installs its
//! dependencies. It is designed so the CLI binary stays a thin shell over
//! the library.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Version parsing, release matching,
//!   template rendering, tree materialization, install subprocess
//! - **Layer 2: Workflow Orchestration** - `ScaffoldPlan` and
//!   `ScaffoldEngine` for custom frontends
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts
//!   (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use deskforge_core::releases::{pick_version, ReleaseFeed};
//! use deskforge_core::scaffold::{Materialize, ScaffoldEngine, ScaffoldPlan};
//!
//! let feed = ReleaseFeed::from_env(false, "my-tool")?;
//! let releases = feed.fetch().await?;
//! let matched = pick_version(&releases, Some(20));
//!
//! // Build a plan and materialize it
//! let engine = ScaffoldEngine::new(plan);
//! engine.run(Materialize::Populate).await?;
//! ```

pub mod config;
pub mod install;
pub mod releases;
pub mod runtime;
pub mod scaffold;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use install::{CommandShape, InstallError, InstallRunner};
pub use releases::{pick_version, MatchKind, ReleaseEntry, ReleaseFeed, RuntimeMatch, RuntimeVersion};
pub use scaffold::{Materialization, Materialize, OverwriteApproval, ScaffoldEngine, ScaffoldPlan};
pub use templates::{render_all, Backend, FileEntry, OsFamily};

#[cfg(feature = "tui")]
pub use tui::run;
