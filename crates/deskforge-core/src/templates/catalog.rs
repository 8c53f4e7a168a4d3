//! Rendered content of every generated file
//!
//! Every function here is pure: no I/O, and byte-identical output for
//! identical inputs. The cache-reuse path treats a cached tree as
//! equivalent to a fresh render of the same plan, which only holds while
//! this determinism does.

use super::{Backend, FileEntry, OsFamily};
use crate::config;
use crate::scaffold::ScaffoldPlan;

/// Render the complete file set for a plan.
///
/// Paths are relative to the target root. Directory creation is the
/// engine's job; entries here may assume their parent directories exist.
pub fn render_all(plan: &ScaffoldPlan, os: OsFamily) -> Vec<FileEntry> {
    let project = plan.project_name.as_str();
    let package = npm_name(project);

    let mut entries = vec![
        FileEntry::text(
            "package.json",
            root_package_json(&package, &plan.runtime_version),
        ),
        FileEntry::text(".gitignore", gitignore()),
        FileEntry::text("electron/main.js", electron_main(project)),
        FileEntry::text("electron/preload.js", ELECTRON_PRELOAD),
        FileEntry::text("frontend/package.json", frontend_package_json(&package)),
        FileEntry::text("frontend/index.html", frontend_index(project)),
        FileEntry::text("frontend/main.js", FRONTEND_MAIN),
        FileEntry::text(plan.backend.source_path(), plan.backend.source(project)),
        FileEntry::text(plan.backend.manifest_path(), plan.backend.manifest(&package)),
        FileEntry::text("doc/README.md", readme(project, plan.backend, os)),
        FileEntry::text("data/.gitkeep", ""),
        FileEntry::text("logs/.gitkeep", ""),
        FileEntry::text("dist/.gitkeep", ""),
    ];

    if plan.use_mirror {
        entries.push(FileEntry::text(".npmrc", npmrc()));
    }

    entries.push(start_script(plan.backend, os));

    entries
}

/// npm-safe package name derived from the project name.
fn npm_name(project: &str) -> String {
    let name: String = project
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '-'
            }
        })
        .collect();
    if name.is_empty() {
        "deskforge-app".to_string()
    } else {
        name
    }
}

/// Root dependency manifest with the Electron version pinned exactly.
fn root_package_json(package: &str, electron_version: &str) -> String {
    format!(
        r#"{{
  "name": "{package}",
  "version": "1.0.0",
  "private": true,
  "main": "electron/main.js",
  "scripts": {{
    "start": "electron .",
    "dev": "electron . --dev"
  }},
  "devDependencies": {{
    "electron": "{electron_version}"
  }}
}}
"#
    )
}

fn frontend_package_json(package: &str) -> String {
    format!(
        r#"{{
  "name": "{package}-frontend",
  "version": "1.0.0",
  "private": true,
  "dependencies": {{}}
}}
"#
    )
}

fn gitignore() -> String {
    "node_modules/\ndist/\nlogs/\ndata/\nnpm-debug.log*\n.DS_Store\n".to_string()
}

/// Mirror configuration for npm and the Electron binary download.
fn npmrc() -> String {
    format!(
        "registry={}\nelectron_mirror={}\n",
        config::NPM_REGISTRY_MIRROR,
        config::ELECTRON_BINARY_MIRROR
    )
}

fn electron_main(project: &str) -> String {
    ELECTRON_MAIN.replace("{{project}}", project)
}

fn frontend_index(project: &str) -> String {
    FRONTEND_INDEX.replace("{{project}}", project)
}

fn readme(project: &str, backend: Backend, os: OsFamily) -> String {
    let start = match os {
        OsFamily::Posix => "scripts/start.sh",
        OsFamily::Windows => "scripts\\start.cmd",
    };
    format!(
        r#"# {project}

Desktop application scaffolded by deskforge.

## Layout

- `electron/` - desktop shell entry point
- `frontend/` - static frontend loaded into the shell window
- `backend/` - {backend}
- `scripts/` - operational scripts
- `data/` - runtime data
- `logs/` - runtime logs
- `dist/` - build output

## Development

Start the backend and the desktop shell together:

```
{start}
```
"#,
        backend = backend.display_name(),
    )
}

fn start_script(backend: Backend, os: OsFamily) -> FileEntry {
    match os {
        OsFamily::Posix => FileEntry::script(
            "scripts/start.sh",
            format!(
                r#"#!/usr/bin/env sh
set -e

cd "$(dirname "$0")/.."

{backend} &
BACKEND_PID=$!
trap 'kill $BACKEND_PID 2>/dev/null' EXIT

npm run start
"#,
                backend = backend.start_command(os),
            ),
        ),
        OsFamily::Windows => FileEntry::text(
            "scripts/start.cmd",
            format!(
                "@echo off\r\ncd /d \"%~dp0..\"\r\n\r\nstart \"backend\" {}\r\nnpm run start\r\n",
                backend.start_command(os),
            ),
        ),
    }
}

const ELECTRON_MAIN: &str = r#"const path = require('path');
const { app, BrowserWindow } = require('electron');

function createWindow() {
  const win = new BrowserWindow({
    width: 1280,
    height: 800,
    title: '{{project}}',
    webPreferences: {
      preload: path.join(__dirname, 'preload.js'),
      contextIsolation: true,
    },
  });

  win.loadFile(path.join(__dirname, '..', 'frontend', 'index.html'));
}

app.whenReady().then(() => {
  createWindow();

  app.on('activate', () => {
    if (BrowserWindow.getAllWindows().length === 0) {
      createWindow();
    }
  });
});

app.on('window-all-closed', () => {
  if (process.platform !== 'darwin') {
    app.quit();
  }
});
"#;

const ELECTRON_PRELOAD: &str = r#"const { contextBridge } = require('electron');

contextBridge.exposeInMainWorld('desktop', {
  platform: process.platform,
});
"#;

const FRONTEND_INDEX: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <title>{{project}}</title>
  </head>
  <body>
    <h1>{{project}}</h1>
    <p id="status">Backend status: checking...</p>
    <script src="main.js"></script>
  </body>
</html>
"#;

const FRONTEND_MAIN: &str = r#"const statusEl = document.getElementById('status');

fetch('http://127.0.0.1:7074/')
  .then((res) => res.json())
  .then((data) => {
    statusEl.textContent = `Backend status: ${data.status}`;
  })
  .catch(() => {
    statusEl.textContent = 'Backend status: offline';
  });
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn plan(backend: Backend, use_mirror: bool) -> ScaffoldPlan {
        ScaffoldPlan {
            target_dir: PathBuf::from("/tmp/demo"),
            project_name: "Demo App".to_string(),
            backend,
            use_mirror,
            runtime_version: "31.3.0".to_string(),
        }
    }

    fn entry<'a>(entries: &'a [FileEntry], path: &str) -> Option<&'a FileEntry> {
        entries.iter().find(|e| e.relative_path == path)
    }

    #[test]
    fn test_render_is_deterministic() {
        let p = plan(Backend::Python, true);
        let a = render_all(&p, OsFamily::Posix);
        let b = render_all(&p, OsFamily::Posix);

        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.relative_path, y.relative_path);
            assert_eq!(x.content, y.content);
            assert_eq!(x.executable, y.executable);
        }
    }

    #[test]
    fn test_root_manifest_pins_exact_version() {
        let entries = render_all(&plan(Backend::Node, false), OsFamily::Posix);
        let manifest = entry(&entries, "package.json").expect("package.json");
        let text = String::from_utf8(manifest.content.clone()).expect("utf8");

        assert!(text.contains("\"electron\": \"31.3.0\""));
        assert!(!text.contains("^31.3.0"));
    }

    #[test]
    fn test_npmrc_only_when_mirror_selected() {
        let with = render_all(&plan(Backend::Node, true), OsFamily::Posix);
        let without = render_all(&plan(Backend::Node, false), OsFamily::Posix);

        assert!(entry(&with, ".npmrc").is_some());
        assert!(entry(&without, ".npmrc").is_none());
    }

    #[test]
    fn test_backend_fragments_follow_flavor() {
        let python = render_all(&plan(Backend::Python, false), OsFamily::Posix);
        assert!(entry(&python, "backend/app.py").is_some());
        assert!(entry(&python, "backend/requirements.txt").is_some());
        assert!(entry(&python, "backend/server.js").is_none());

        let go = render_all(&plan(Backend::Go, false), OsFamily::Posix);
        assert!(entry(&go, "backend/main.go").is_some());
        assert!(entry(&go, "backend/go.mod").is_some());
    }

    #[test]
    fn test_start_script_variant_per_os_family() {
        let posix = render_all(&plan(Backend::Go, false), OsFamily::Posix);
        let script = entry(&posix, "scripts/start.sh").expect("start.sh");
        assert!(script.executable);
        let text = String::from_utf8(script.content.clone()).expect("utf8");
        assert!(text.contains("go run backend/main.go"));

        let windows = render_all(&plan(Backend::Go, false), OsFamily::Windows);
        let script = entry(&windows, "scripts/start.cmd").expect("start.cmd");
        assert!(!script.executable);
        assert!(entry(&windows, "scripts/start.sh").is_none());
    }

    #[test]
    fn test_matched_feed_version_is_pinned_verbatim() {
        use crate::releases::{pick_version, ReleaseEntry};

        let feed = r#"[
            {"version": "v31.3.0", "node": "20.15.1"},
            {"version": "v30.0.0", "node": "18.19.0"},
            {"version": "v32.0.0-beta.1", "node": "20.16.0"}
        ]"#;
        let releases: Vec<ReleaseEntry> = serde_json::from_str(feed).unwrap();
        let matched = pick_version(&releases, Some(20)).unwrap();
        assert_eq!(matched.version_string, "31.3.0");

        let mut p = plan(Backend::Node, false);
        p.runtime_version = matched.version_string.clone();
        let entries = render_all(&p, OsFamily::Posix);
        let manifest = entry(&entries, "package.json").unwrap();
        let text = String::from_utf8(manifest.content.clone()).unwrap();

        assert!(text.contains("\"electron\": \"31.3.0\""));
        assert!(!text.contains("v31.3.0"));
    }

    #[test]
    fn test_npm_name_is_sanitized() {
        assert_eq!(npm_name("Demo App"), "demo-app");
        assert_eq!(npm_name("my.app_2"), "my.app_2");
        assert_eq!(npm_name(""), "deskforge-app");
    }
}
