//! Marquee admin console - main entry point
//!
//! Thin command-line front end over the content synchronization layer:
//! builds the client/store context once at startup and runs a single
//! operation against it. The site's form-based editor uses the same
//! layer; this tool exists for operations work and local development.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use marquee_common::api::{CredentialsUpdate, LoginRequest};
use marquee_common::config::Config;
use marquee_sync::{ContentApi, ContentStore, ResourceClient};

/// Command-line arguments for marquee-admin
#[derive(Parser, Debug)]
#[command(name = "marquee-admin")]
#[command(about = "Admin console for the marquee content API")]
#[command(version)]
struct Args {
    /// Content API base URL (overrides env and config file)
    #[arg(long)]
    api_url: Option<String>,

    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Refresh every resource and print a content summary
    Pull,
    /// Check credentials against the content API
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Change the admin username and/or password
    SetCredentials {
        #[arg(long)]
        current_password: String,
        #[arg(long)]
        new_username: Option<String>,
        #[arg(long)]
        new_password: Option<String>,
    },
    /// Install the built-in demo model and print it (no backend needed)
    Demo,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marquee=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = Config::resolve(args.api_url.as_deref(), args.config.as_deref())
        .context("Failed to resolve configuration")?;
    info!("Content API endpoint: {}", config.api_base_url);

    let client = Arc::new(
        ResourceClient::new(&config.api_base_url).context("Failed to construct API client")?,
    );
    let store = ContentStore::new(client.clone());

    match args.command {
        Command::Pull => {
            let outcome = store.refresh().await;
            let model = store.snapshot().await;

            println!("artist:  {}", model.hero.artist_name);
            println!("albums:  {}", model.albums.len());
            println!("videos:  {}", model.videos.len());
            println!("tours:   {}", model.tours.len());
            let notice = if model.hero.notice.visible {
                model.hero.notice.text.as_str()
            } else {
                "(hidden)"
            };
            println!("notice:  {notice}");

            if !outcome.is_complete() {
                for failure in &outcome.failures {
                    eprintln!("warning: {} failed to load: {}", failure.resource, failure.message);
                }
                anyhow::bail!("pull was partial: {} of 5 resources failed", outcome.failures.len());
            }
        }
        Command::Login { username, password } => {
            let ok = client
                .login(&LoginRequest { username, password })
                .await
                .context("Login request failed")?;
            if ok {
                println!("login ok");
            } else {
                anyhow::bail!("login rejected");
            }
        }
        Command::SetCredentials {
            current_password,
            new_username,
            new_password,
        } => {
            client
                .update_credentials(&CredentialsUpdate {
                    current_password,
                    new_username,
                    new_password,
                })
                .await
                .context("Credential update failed")?;
            println!("credentials updated");
        }
        Command::Demo => {
            store.reset().await;
            let model = store.snapshot().await;
            println!("{}", serde_json::to_string_pretty(&model)?);
        }
    }

    Ok(())
}
