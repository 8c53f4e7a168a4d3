//! Local tool detection for Node.js, npm, and backend toolchains

use crate::releases::RuntimeVersion;
use std::process::Command;

/// Probe result for a locally installed tool.
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

impl RuntimeInfo {
    /// Major component of the probed version, when one was captured.
    ///
    /// `None` means "local major unknown": version matching degrades to
    /// the any-release path. Never an error.
    pub fn major(&self) -> Option<u64> {
        RuntimeVersion::parse(self.version.as_deref()?).major()
    }
}

fn probe(name: &'static str, program: &str) -> RuntimeInfo {
    let output = Command::new(program).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name,
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if Node.js is available
pub fn check_node() -> RuntimeInfo {
    probe("Node.js", "node")
}

/// Check if npm is available
pub fn check_npm() -> RuntimeInfo {
    probe("npm", "npm")
}

/// Check if Python 3 is available
pub fn check_python() -> RuntimeInfo {
    probe("Python 3", "python3")
}

/// Check if the Go toolchain is available
pub fn check_go() -> RuntimeInfo {
    let output = Command::new("go").arg("version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name: "Go",
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name: "Go",
            version: None,
            available: false,
        },
    }
}
