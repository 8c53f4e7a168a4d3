//! Dependency installation via the npm subprocess

use crate::templates::OsFamily;
use std::path::Path;
use thiserror::Error;
use tokio::process::Command;

/// How subprocess invocations are shaped for an OS family.
///
/// Posix targets execute the tool directly; Windows targets route
/// through the command interpreter so `.cmd` shims resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandShape {
    Posix,
    Windows,
}

impl CommandShape {
    /// Shape for the OS this binary was compiled for.
    pub fn host() -> Self {
        Self::for_os(OsFamily::host())
    }

    pub fn for_os(family: OsFamily) -> Self {
        match family {
            OsFamily::Posix => CommandShape::Posix,
            OsFamily::Windows => CommandShape::Windows,
        }
    }

    /// Build a command for `program`, wrapped per OS family. Arguments
    /// appended by the caller land after the program name in both shapes.
    pub fn command(&self, program: &str) -> Command {
        match self {
            CommandShape::Posix => Command::new(program),
            CommandShape::Windows => {
                let mut cmd = Command::new("cmd");
                cmd.arg("/C").arg(program);
                cmd
            }
        }
    }
}

/// Installation subprocess failure, classified from the exit status.
///
/// Installer output is never parsed; the exit status is the whole
/// contract.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("failed to start `{program}` in {dir}: {source}")]
    Spawn {
        program: String,
        dir: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` in {dir} exited with status {code}")]
    Failed {
        program: String,
        dir: String,
        code: i32,
    },

    #[error("`{program}` in {dir} was terminated by a signal")]
    Terminated {
        program: String,
        dir: String,
        signal: Option<i32>,
    },
}

/// Runner for the package-manager subprocess.
pub struct InstallRunner {
    shape: CommandShape,
    env: Vec<(String, String)>,
}

impl InstallRunner {
    pub fn new(shape: CommandShape) -> Self {
        Self {
            shape,
            env: Vec::new(),
        }
    }

    /// Add an environment variable passed to every invocation.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Run a program to completion in `dir` with inherited stdio and
    /// classify its exit status. Blocks until the subprocess exits; no
    /// timeout is imposed here.
    pub async fn run(
        &self,
        program: &str,
        args: &[&str],
        dir: &Path,
    ) -> Result<(), InstallError> {
        let mut cmd = self.shape.command(program);
        cmd.args(args).current_dir(dir);
        for (key, value) in &self.env {
            cmd.env(key, value);
        }

        let label = |a: &[&str]| -> String {
            if a.is_empty() {
                program.to_string()
            } else {
                format!("{} {}", program, a.join(" "))
            }
        };

        let status = cmd.status().await.map_err(|source| InstallError::Spawn {
            program: label(args),
            dir: dir.display().to_string(),
            source,
        })?;

        if status.success() {
            return Ok(());
        }

        match status.code() {
            Some(code) => Err(InstallError::Failed {
                program: label(args),
                dir: dir.display().to_string(),
                code,
            }),
            None => Err(InstallError::Terminated {
                program: label(args),
                dir: dir.display().to_string(),
                signal: signal_of(&status),
            }),
        }
    }

    /// Run `npm install` in `dir`.
    pub async fn run_install(&self, dir: &Path) -> Result<(), InstallError> {
        self.run("npm", &["install"], dir).await
    }
}

#[cfg(unix)]
fn signal_of(status: &std::process::ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn signal_of(_status: &std::process::ExitStatus) -> Option<i32> {
    None
}
