use anyhow::Result;
use clap::{Parser, Subcommand};
use deskforge_core::templates::Backend;
use deskforge_core::tui;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "deskforge-create")]
#[command(about = "CLI for scaffolding Electron desktop-app projects")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new desktop-app project
    Create(CreateArgs),
}

#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Project directory to create
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Backend flavor to generate
    #[arg(short, long, value_enum)]
    pub backend: Option<Backend>,

    /// Use the npmmirror registry for npm and Electron downloads
    #[arg(long)]
    pub mirror: bool,

    /// Electron version to pin, bypassing the release feed
    #[arg(long = "runtime-version")]
    pub runtime_version: Option<String>,

    /// Release feed URL override (for development use)
    #[arg(long = "feed-url")]
    pub feed_url: Option<String>,

    /// Reuse the cached scaffold without asking
    #[arg(long = "use-cache")]
    pub use_cache: bool,

    /// Skip dependency installation
    #[arg(long = "skip-install")]
    pub skip_install: bool,

    /// Clear a non-empty target directory without asking
    #[arg(short, long)]
    pub force: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CreateArgs> for tui::CreateArgs {
    fn from(args: CreateArgs) -> Self {
        Self {
            directory: args.directory,
            backend: args.backend,
            mirror: args.mirror.then_some(true),
            runtime_version: args.runtime_version,
            feed_url: args.feed_url,
            use_cache: args.use_cache,
            skip_install: args.skip_install,
            force: args.force,
            yes: args.yes,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    let create_args = match args.command {
        Some(Command::Create(create_args)) => create_args,
        // No subcommand provided, default to create behavior (interactive mode)
        None => CreateArgs {
            directory: None,
            backend: None,
            mirror: false,
            runtime_version: None,
            feed_url: None,
            use_cache: false,
            skip_install: false,
            force: false,
            yes: false,
        },
    };

    let result = tui::run(create_args.into()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
