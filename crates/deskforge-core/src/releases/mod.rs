//! Electron release resolution
//!
//! This module provides:
//! - Lenient version parsing shared by the feed and local probes
//! - Release feed retrieval from the official endpoint or its mirror
//! - Selection of the release best matching the local Node.js major

pub mod feed;
pub mod matcher;
pub mod version;

pub use feed::{ReleaseEntry, ReleaseFeed};
pub use matcher::{pick_version, MatchKind, RuntimeMatch};
pub use version::{strip_marker, RuntimeVersion};
