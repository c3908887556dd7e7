//! viewcompose — compose Tera views from the command line.
//!
//! # Usage
//!
//! ```text
//! viewcompose [--config <path>] [--templates <dir>] [--compose <key>] [-v] repeat <template> --options <file>
//! viewcompose [...] decorate <template>... --options <file>
//! viewcompose [...] render <template>... --options <file>
//! ```

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{decorate::DecorateArgs, render::RenderArgs, repeat::RepeatArgs, Session};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "viewcompose",
    version,
    about = "Repeat and decorate Tera views",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Settings shared by every subcommand.
#[derive(clap::Args, Debug)]
pub struct GlobalArgs {
    /// Config file (default: ./viewcompose.yaml, then the user config dir).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Template directory; overrides `templates` from the config.
    #[arg(long = "templates", id = "template_dir", value_name = "DIR", global = true)]
    pub template_dir: Option<PathBuf>,

    /// Composition key; overrides `compose` from the config.
    #[arg(long, global = true)]
    pub compose: Option<String>,

    /// Log each render step to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render one template per option set and concatenate the output.
    Repeat(RepeatArgs),

    /// Wrap the innermost template in each following template.
    Decorate(DecorateArgs),

    /// Repeat, decorate, or repeat-then-decorate depending on the inputs.
    Render(RenderArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    let session = Session::open(&cli.global)?;
    let output = match cli.command {
        Commands::Repeat(args) => args.run(&session),
        Commands::Decorate(args) => args.run(&session),
        Commands::Render(args) => args.run(&session),
    }?;
    print!("{output}");
    Ok(())
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
