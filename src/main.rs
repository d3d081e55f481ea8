// ABOUTME: Entry point for the nephos CLI application.
// ABOUTME: Parses arguments, validates credentials, and runs the workflow.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use nephos::config::{self, Config, Credentials};
use nephos::error::{Error, Result};
use nephos::provider::{OperationState, RestClient};
use nephos::provision::{Provisioner, ProvisioningTarget, TemplateSource};
use nephos::report::StdoutSink;
use nephos::types::Region;
use std::env;
use tokio::sync::watch;
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
    match cli.command {
        Commands::Init {
            template_uri,
            region,
            force,
        } => {
            let cwd = env::current_dir()?;
            config::init_config(&cwd, template_uri.as_deref(), region.as_deref(), force)
        }
        Commands::Deploy {
            template_uri,
            region,
            no_wait,
        } => {
            let cwd = env::current_dir()?;
            let mut config = Config::discover(&cwd)?;

            // CLI flags override the config file
            if let Some(uri) = template_uri {
                config.template = uri;
            }
            if let Some(r) = region {
                config.region =
                    Region::new(&r).map_err(|e| Error::InvalidConfig(e.to_string()))?;
            }
            if no_wait {
                config.poll.wait = false;
            }

            deploy(config).await
        }
    }
}

/// Provision the configured template and report the outcome.
async fn deploy(config: Config) -> Result<()> {
    // Credential presence is validated before any provider call is made.
    let credentials = Credentials::from_env()?;
    let client = RestClient::new(credentials);

    let sink = StdoutSink;
    let target = ProvisioningTarget::Template(TemplateSource::Uri(config.template.clone()));
    let provisioner = Provisioner::new(target, config.region.clone(), &sink)
        .mode(config.mode)
        .container_prefix(config.prefix.container.as_str())
        .deployment_prefix(config.prefix.deployment.as_str())
        .poll_config(config.poll.clone());

    // Ctrl-C raises the cancel signal; the workflow still tears the
    // container down before reporting Canceled.
    let (cancel_tx, cancel_rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                let _ = cancel_tx.send(true);
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not install Ctrl-C handler");
                // Keep the sender alive so a dropped channel is not mistaken
                // for cancellation.
                std::future::pending::<()>().await;
            }
        }
    });

    let outcome = provisioner.run_with_cancel(&client, Some(cancel_rx)).await?;

    if config.poll.wait && outcome.state != OperationState::Succeeded {
        if let Some(detail) = outcome.last_error {
            eprintln!("Deployment error: {detail}");
        }
        return Err(Error::DeploymentNotSucceeded(outcome.state));
    }

    println!("Deployment complete!");
    Ok(())
}
