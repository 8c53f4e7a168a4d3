//! Charm-style CLI prompts using cliclack

use crate::config;
use crate::install::{CommandShape, InstallRunner};
use crate::releases::{
    pick_version, strip_marker, MatchKind, ReleaseFeed, RuntimeMatch, RuntimeVersion,
};
use crate::runtime::check;
use crate::scaffold::{
    self, Materialization, Materialize, OverwriteApproval, ScaffoldEngine, ScaffoldPlan,
};
use crate::templates::{Backend, OsFamily};
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use url::Url;

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project directory to create
    pub directory: Option<PathBuf>,

    /// Backend flavor to generate
    pub backend: Option<Backend>,

    /// Mirror preference; `None` asks interactively
    pub mirror: Option<bool>,

    /// Electron version to pin, bypassing the release feed
    pub runtime_version: Option<String>,

    /// Release feed endpoint override (for development use)
    pub feed_url: Option<String>,

    /// Reuse the cached scaffold without asking
    pub use_cache: bool,

    /// Skip dependency installation
    pub skip_install: bool,

    /// Clear a non-empty target without asking
    pub force: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Run the CLI with interactive prompts
pub async fn run(args: CreateArgs) -> Result<()> {
    cliclack::intro("deskforge")?;

    // Step 1: npm is the one hard prerequisite
    check_package_manager(&args)?;

    // Step 2: probe the local Node major (absence only degrades matching)
    let local_major = report_local_node()?;

    // Step 3: target directory and overwrite approval
    let target_dir = select_directory(&args)?;
    let approval = resolve_overwrite(&target_dir, &args)?;

    // Step 4: backend flavor and mirror preference
    let backend = select_backend(&args)?;
    let use_mirror = select_mirror(&args)?;

    // Step 5: Electron version (feed match or manual fallback)
    let runtime_version = resolve_runtime_version(&args, local_major, use_mirror).await?;

    let plan = ScaffoldPlan {
        project_name: scaffold::project_name_from(&target_dir),
        target_dir,
        backend,
        use_mirror,
        runtime_version,
    };

    // Step 6: materialize, clearing the target first if approved
    let engine = ScaffoldEngine::new(plan);
    let mode = select_mode(&args)?;
    materialize(&engine, mode, approval).await?;

    // Step 7: dependency installation (two sequential npm runs)
    run_installs(engine.plan(), &args).await?;

    // Step 8: show next steps
    print_next_steps(engine.plan());

    cliclack::outro("Happy coding!")?;

    Ok(())
}

fn check_package_manager(args: &CreateArgs) -> Result<()> {
    let npm = check::check_npm();
    if npm.available {
        cliclack::log::success(format!(
            "npm {}",
            npm.version.as_deref().unwrap_or("unknown")
        ))?;
        return Ok(());
    }

    cliclack::log::error("npm is required but was not found in PATH")?;

    if !args.yes {
        let open_docs: bool = cliclack::confirm("Open the Node.js download page in your browser?")
            .initial_value(true)
            .interact()?;
        if open_docs {
            open::that(config::NODE_DOWNLOAD_URL)?;
        }
    }

    anyhow::bail!("Install Node.js (which includes npm) and run this command again.");
}

fn report_local_node() -> Result<Option<u64>> {
    let node = check::check_node();
    match (node.version.as_deref(), node.major()) {
        (Some(version), Some(major)) => {
            cliclack::log::info(format!("Node.js {} (major {})", version, major))?;
            Ok(Some(major))
        }
        _ => {
            cliclack::log::warning(
                "Node.js not detected; Electron matching will use the newest release",
            )?;
            Ok(None)
        }
    }
}

fn select_directory(args: &CreateArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    // Use --directory flag if provided
    let path = if let Some(dir) = &args.directory {
        let p = if dir.is_absolute() {
            dir.clone()
        } else {
            current_dir.join(dir)
        };
        cliclack::log::info(format!("Using directory: {}", p.display()))?;
        p
    } else {
        let input: String = cliclack::input("Project directory")
            .placeholder("my-app")
            .default_input("my-app")
            .interact()?;

        let p = PathBuf::from(&input);
        if p.is_absolute() {
            p
        } else {
            current_dir.join(p)
        }
    };

    // Validate parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.exists() && parent != Path::new("") {
            anyhow::bail!("Parent directory does not exist: {}", parent.display());
        }
    }

    Ok(path)
}

/// Decide whether, and under what authority, a non-empty target may be
/// cleared. `None` means the target needs no clearing.
fn resolve_overwrite(target: &Path, args: &CreateArgs) -> Result<Option<OverwriteApproval>> {
    let count = match std::fs::read_dir(target) {
        Ok(entries) => entries.count(),
        Err(_) => 0, // absent: nothing to clear
    };
    if count == 0 {
        return Ok(None);
    }

    cliclack::log::warning(format!("Directory has {} existing items", count))?;

    if args.force {
        cliclack::log::info("Clearing without confirmation (--force)")?;
        return Ok(Some(OverwriteApproval::Forced));
    }

    let confirm = if args.yes {
        true
    } else {
        cliclack::confirm("Erase its contents and continue?")
            .initial_value(false)
            .interact()?
    };

    if !confirm {
        anyhow::bail!("Setup cancelled.");
    }

    Ok(Some(OverwriteApproval::Confirmed))
}

fn select_backend(args: &CreateArgs) -> Result<Backend> {
    let backend = match args.backend {
        Some(backend) => {
            cliclack::log::info(format!("Backend: {}", backend.display_name()))?;
            backend
        }
        None if args.yes => Backend::Node,
        None => cliclack::select("Select a backend")
            .item(
                Backend::Node,
                Backend::Node.display_name(),
                "no extra toolchain",
            )
            .item(
                Backend::Python,
                Backend::Python.display_name(),
                "needs python3",
            )
            .item(Backend::Go, Backend::Go.display_name(), "needs go")
            .interact()?,
    };

    advise_backend_toolchain(backend)?;

    Ok(backend)
}

/// Toolchain availability for the chosen backend is advisory: the
/// generated project needs it at runtime, scaffolding does not.
fn advise_backend_toolchain(backend: Backend) -> Result<()> {
    let info = match backend {
        Backend::Node => return Ok(()), // Node presence already reported
        Backend::Python => check::check_python(),
        Backend::Go => check::check_go(),
    };

    if info.available {
        cliclack::log::success(format!(
            "{} ({})",
            info.name,
            info.version.as_deref().unwrap_or("unknown")
        ))?;
    } else {
        cliclack::log::warning(format!(
            "{} not detected; the generated backend needs it at runtime",
            info.name
        ))?;
    }

    Ok(())
}

fn select_mirror(args: &CreateArgs) -> Result<bool> {
    let use_mirror = match args.mirror {
        Some(choice) => choice,
        None if args.yes => false,
        None => cliclack::confirm("Use the npmmirror registry for downloads?")
            .initial_value(false)
            .interact()?,
    };

    if use_mirror {
        cliclack::log::info("Mirror enabled: npm and Electron downloads use npmmirror")?;
    }

    Ok(use_mirror)
}

async fn resolve_runtime_version(
    args: &CreateArgs,
    local_major: Option<u64>,
    use_mirror: bool,
) -> Result<String> {
    // An explicit version bypasses the feed entirely
    if let Some(raw) = &args.runtime_version {
        if !RuntimeVersion::parse(raw).is_valid() {
            anyhow::bail!("Invalid Electron version: {}", raw);
        }
        let cleaned = strip_marker(raw).to_string();
        cliclack::log::info(format!("Pinning Electron {}", cleaned))?;
        return Ok(cleaned);
    }

    let feed = match &args.feed_url {
        Some(raw) => {
            let url =
                Url::parse(raw).with_context(|| format!("Invalid release feed URL: {}", raw))?;
            ReleaseFeed::new(url, config::USER_AGENT)
        }
        None => ReleaseFeed::from_env(use_mirror, config::USER_AGENT)?,
    };

    let spinner = cliclack::spinner();
    spinner.start("Fetching Electron releases...");

    match feed.fetch().await {
        Ok(releases) => match pick_version(&releases, local_major) {
            Some(matched) => {
                spinner.stop(format!(
                    "Electron {} ({})",
                    matched.version_string,
                    describe_match(&matched, local_major)
                ));
                Ok(matched.version_string)
            }
            None => {
                spinner.stop("No usable release in the feed");
                manual_version(args)
            }
        },
        Err(e) => {
            spinner.stop("Release feed unavailable");
            cliclack::log::warning(format!("{:#}", e))?;
            manual_version(args)
        }
    }
}

fn describe_match(matched: &RuntimeMatch, local_major: Option<u64>) -> String {
    match matched.kind {
        MatchKind::Exact => format!(
            "bundles Node {}, matching the local major",
            matched.bundled_node_major
        ),
        MatchKind::Lower => format!(
            "bundles Node {}, older than the local major",
            matched.bundled_node_major
        ),
        MatchKind::Any => match local_major {
            Some(_) => "newest release; no bundled-Node relationship established".to_string(),
            None => "newest release; local Node unknown".to_string(),
        },
    }
}

fn manual_version(args: &CreateArgs) -> Result<String> {
    if args.yes {
        anyhow::bail!("No Electron version could be resolved and none was supplied.");
    }

    let input: String = cliclack::input("Electron version to pin (blank to abort)")
        .placeholder("31.3.0")
        .default_input("")
        .validate(|raw: &String| {
            if raw.is_empty() || RuntimeVersion::parse(raw).is_valid() {
                Ok(())
            } else {
                Err("Enter a version like 31.3.0")
            }
        })
        .interact()?;

    if input.is_empty() {
        anyhow::bail!("No Electron version could be resolved and none was entered.");
    }

    Ok(strip_marker(&input).to_string())
}

fn select_mode(args: &CreateArgs) -> Result<Materialize> {
    if args.use_cache {
        let cache_root = config::cache_root()?;
        cliclack::log::info(format!(
            "Reusing cached scaffold from {}",
            cache_root.display()
        ))?;
        return Ok(Materialize::Reuse { cache_root });
    }

    match scaffold::available_cache() {
        Some(cache_root) if !args.yes => {
            let reuse = cliclack::confirm("A previously generated scaffold exists. Reuse it?")
                .initial_value(false)
                .interact()?;
            if reuse {
                Ok(Materialize::Reuse { cache_root })
            } else {
                Ok(Materialize::Populate)
            }
        }
        _ => Ok(Materialize::Populate),
    }
}

async fn materialize(
    engine: &ScaffoldEngine,
    mode: Materialize,
    approval: Option<OverwriteApproval>,
) -> Result<()> {
    if let Some(approval) = approval {
        engine.clear_target(approval)?;
    }

    let reusing = matches!(mode, Materialize::Reuse { .. });
    let spinner = cliclack::spinner();
    spinner.start(if reusing {
        "Cloning cached scaffold..."
    } else {
        "Creating project..."
    });

    let outcome = match engine.run(mode).await {
        Ok(outcome) => outcome,
        Err(e) => {
            spinner.stop("Scaffolding failed");
            return Err(e);
        }
    };

    let target = engine.plan().target_dir.display().to_string();
    match outcome {
        Materialization::Populated { files } => {
            spinner.stop(format!("Created {} files in {}", files, target));
            match engine.save_cache() {
                Ok(cache) => cliclack::log::info(format!(
                    "Scaffold cached for reuse at {}",
                    cache.display()
                ))?,
                Err(e) => {
                    cliclack::log::warning(format!("Could not cache the scaffold: {:#}", e))?
                }
            }
        }
        Materialization::Reused { entries } => {
            spinner.stop(format!("Cloned {} entries into {}", entries, target));
        }
    }

    Ok(())
}

async fn run_installs(plan: &ScaffoldPlan, args: &CreateArgs) -> Result<()> {
    if args.skip_install {
        cliclack::log::info("Skipping dependency installation")?;
        return Ok(());
    }

    let proceed = if args.yes {
        true
    } else {
        cliclack::confirm("Install dependencies now (npm install)?")
            .initial_value(true)
            .interact()?
    };

    if !proceed {
        anyhow::bail!("Setup cancelled.");
    }

    let mut runner = InstallRunner::new(CommandShape::host());
    if plan.use_mirror {
        runner = runner.with_env("ELECTRON_MIRROR", config::ELECTRON_BINARY_MIRROR);
    }

    println!();
    println!("{} {}", "Running:".dimmed(), "npm install".yellow());
    runner
        .run_install(&plan.target_dir)
        .await
        .context("Root dependency installation failed")?;

    println!();
    println!(
        "{} {}",
        "Running:".dimmed(),
        "npm install (frontend)".yellow()
    );
    runner
        .run_install(&plan.target_dir.join("frontend"))
        .await
        .context("Frontend dependency installation failed")?;

    cliclack::log::success("Dependencies installed")?;

    Ok(())
}

fn print_next_steps(plan: &ScaffoldPlan) {
    let start = match OsFamily::host() {
        OsFamily::Posix => "scripts/start.sh",
        OsFamily::Windows => "scripts\\start.cmd",
    };

    let steps = [
        format!("cd {}", plan.target_dir.display()),
        format!("{}   {}", start, "(backend + desktop shell)".dimmed()),
        "See doc/README.md for the generated layout".to_string(),
    ];

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }
}
