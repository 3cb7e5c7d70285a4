//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod action;
mod feed;
mod repo;
mod target;
mod task;

pub use feed::FeedCommands;
pub use repo::RepoCommands;
pub use target::TargetCommands;
pub use task::TaskCommands;

use anyhow::{Context, Result};
use clap::Subcommand;
use pulp_client::PulpClient;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Repository management
    Repo {
        #[command(subcommand)]
        command: RepoCommands,
    },
    /// Feed (importer) configuration
    Feed {
        #[command(subcommand)]
        command: FeedCommands,
    },
    /// Publication target (distributor) configuration
    Target {
        #[command(subcommand)]
        command: TargetCommands,
    },
    /// Sync a repository from its feed
    Sync {
        /// Repository ID
        repo_id: String,

        /// Wait for the sync to finish
        #[arg(long)]
        wait: bool,
    },
    /// Publish a repository through its target
    Publish {
        /// Repository ID
        repo_id: String,

        /// Wait for the publish to finish
        #[arg(long)]
        wait: bool,
    },
    /// Copy all content of one repository into another
    Merge {
        /// Repository to copy from
        source: String,

        /// Repository to copy into
        target: String,

        /// Wait for the merge to finish
        #[arg(long)]
        wait: bool,
    },
    /// Task inspection
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    let client =
        PulpClient::new(config.pulp.clone()).context("Failed to create Pulp client")?;

    match command {
        Commands::Repo { command } => repo::handle_repo_command(command, &client).await,
        Commands::Feed { command } => feed::handle_feed_command(command, &client).await,
        Commands::Target { command } => target::handle_target_command(command, &client).await,
        Commands::Sync { repo_id, wait } => action::sync(&client, &repo_id, wait).await,
        Commands::Publish { repo_id, wait } => action::publish(&client, &repo_id, wait).await,
        Commands::Merge {
            source,
            target,
            wait,
        } => action::merge(&client, &source, &target, wait).await,
        Commands::Task { command } => task::handle_task_command(command, &client).await,
    }
}

/// Pretty-print a JSON value returned by the remote service
pub(crate) fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(_) => println!("{}", value),
    }
}
