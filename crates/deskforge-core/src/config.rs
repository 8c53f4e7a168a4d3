//! Product configuration: endpoints, mirrors, and the generated layout

use anyhow::{Context, Result};
use std::path::PathBuf;
use url::Url;

/// Internal product name (used for cache paths, env vars).
pub const PRODUCT_NAME: &str = "deskforge";

/// User agent string for HTTP requests.
pub const USER_AGENT: &str = "deskforge-create";

/// Official Electron release feed.
pub const RELEASES_URL: &str = "https://releases.electronjs.org/releases.json";

/// Release feed mirror used when the mirror preference is on.
pub const RELEASES_MIRROR_URL: &str = "https://npmmirror.com/mirrors/electron/releases.json";

/// Environment variable overriding the release feed endpoint.
pub const RELEASES_URL_ENV: &str = "DESKFORGE_RELEASES_URL";

/// npm registry mirror written into the generated `.npmrc`.
pub const NPM_REGISTRY_MIRROR: &str = "https://registry.npmmirror.com";

/// Electron binary mirror written into the generated `.npmrc`.
pub const ELECTRON_BINARY_MIRROR: &str = "https://npmmirror.com/mirrors/electron/";

/// Environment variable overriding the scaffold cache directory.
pub const CACHE_DIR_ENV: &str = "DESKFORGE_CACHE_DIR";

/// Node.js download page, offered when npm is missing.
pub const NODE_DOWNLOAD_URL: &str = "https://nodejs.org/en/download";

/// Fixed subdirectories of every generated project.
pub const PROJECT_DIRS: &[&str] = &[
    "electron", "frontend", "backend", "doc", "scripts", "data", "logs", "dist",
];

/// Top-level entries never copied between cache and target trees:
/// build output, logs, and version-control metadata.
pub const COPY_EXCLUSIONS: &[&str] = &["dist", "logs", ".git"];

/// Resolve the release feed endpoint, honoring the environment override
/// and the mirror preference.
pub fn releases_url(use_mirror: bool) -> Result<Url> {
    let url_str = std::env::var(RELEASES_URL_ENV).unwrap_or_else(|_| {
        let default = if use_mirror {
            RELEASES_MIRROR_URL
        } else {
            RELEASES_URL
        };
        default.to_string()
    });
    Url::parse(&url_str).with_context(|| format!("Invalid release feed URL: {}", url_str))
}

/// Well-known location of the scaffold cache tree.
pub fn cache_root() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(CACHE_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    let base = dirs::cache_dir().context("Could not determine a cache directory for this platform")?;
    Ok(base.join(PRODUCT_NAME).join("scaffold"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_feed_urls_parse() {
        assert!(Url::parse(RELEASES_URL).is_ok());
        assert!(Url::parse(RELEASES_MIRROR_URL).is_ok());
    }

    #[test]
    fn test_build_output_and_logs_are_excluded_from_copies() {
        for dir in ["dist", "logs", ".git"] {
            assert!(COPY_EXCLUSIONS.contains(&dir));
        }
        // The excluded names exist at the root of the generated layout
        assert!(PROJECT_DIRS.contains(&"dist"));
        assert!(PROJECT_DIRS.contains(&"logs"));
    }
}
