// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "nephos")]
#[command(about = "Template-driven cloud provisioning with guaranteed teardown")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new nephos.yml configuration file
    Init {
        /// Template URI to record in the generated config
        #[arg(long)]
        template_uri: Option<String>,

        /// Target region
        #[arg(long)]
        region: Option<String>,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Provision the configured template into a disposable container
    Deploy {
        /// Override the configured template URI
        #[arg(long)]
        template_uri: Option<String>,

        /// Override the configured region
        #[arg(long)]
        region: Option<String>,

        /// Report the submission-time state and skip waiting for completion
        #[arg(long)]
        no_wait: bool,
    },
}
