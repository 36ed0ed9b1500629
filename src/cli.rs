// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "limani")]
#[command(about = "Manage images on a private Docker registry")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file (discovered when omitted)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Stream engine and transport detail
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print final results
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a starter configuration file in the current directory
    Init {
        /// Registry address to record, e.g. http://localhost:5000
        #[arg(long)]
        registry: Option<String>,

        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Verify the configured registry answers the v2 API
    Check,

    /// List every repository on the registry together with its tags
    List,

    /// Push an image to the registry
    Push {
        /// Image to push, as name:tag
        image: String,

        /// Build this directory's Dockerfile instead of pushing a local image
        #[arg(long, value_name = "DIR")]
        dockerfile: Option<PathBuf>,

        /// Clone this repository and build the Dockerfile at its root
        #[arg(long, value_name = "URL", conflicts_with = "dockerfile")]
        git: Option<String>,
    },

    /// Remove a tag from the registry without touching shared content
    Remove {
        /// Image to remove, as name:tag
        image: String,
    },
}
