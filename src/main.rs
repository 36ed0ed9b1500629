// ABOUTME: Entry point for the limani CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use limani::config::{self, Config};
use limani::error::Result;
use limani::output::{Output, OutputMode};
use std::env;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let Cli {
        config: config_path,
        verbose,
        quiet,
        command,
    } = cli;

    let mode = if quiet {
        OutputMode::Quiet
    } else if verbose {
        OutputMode::Verbose
    } else {
        OutputMode::Normal
    };
    let output = Output::new(mode);

    match command {
        Commands::Init { registry, force } => {
            let cwd = env::current_dir()?;
            let path = config::init_config(&cwd, registry.as_deref(), force)?;
            output.result(&format!("Wrote {}", path.display()));
            Ok(())
        }
        Commands::Check => commands::check(load_config(config_path.as_deref())?, output).await,
        Commands::List => commands::list(load_config(config_path.as_deref())?, output).await,
        Commands::Push {
            image,
            dockerfile,
            git,
        } => {
            let args = commands::PushArgs {
                image,
                dockerfile,
                git,
            };
            commands::push(load_config(config_path.as_deref())?, args, output).await
        }
        Commands::Remove { image } => {
            commands::remove(load_config(config_path.as_deref())?, image, output).await
        }
    }
}

/// Load the configuration from an explicit path, or discover it in the
/// current directory.
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Config::discover(&env::current_dir()?),
    }
}
