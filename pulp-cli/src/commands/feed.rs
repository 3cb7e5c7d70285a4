//! Feed command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use pulp_client::PulpClient;

use super::print_json;

/// Feed subcommands
#[derive(Subcommand)]
pub enum FeedCommands {
    /// Attach a yum importer, optionally fed from a URL
    Set {
        /// Repository ID
        repo_id: String,

        /// Upstream repository URL; omit for an importer without feed
        #[arg(short, long)]
        url: Option<String>,
    },
    /// Show the importer of a repository
    Get {
        /// Repository ID
        repo_id: String,
    },
}

/// Handle feed commands
pub async fn handle_feed_command(command: FeedCommands, client: &PulpClient) -> Result<()> {
    match command {
        FeedCommands::Set { repo_id, url } => {
            let echo = client.set_feed(&repo_id, url.as_deref()).await?;
            match url {
                Some(url) => println!(
                    "{} {} ← {}",
                    "✓ Feed set:".green().bold(),
                    repo_id.cyan(),
                    url
                ),
                None => println!(
                    "{} {}",
                    "✓ Importer without feed attached to".green().bold(),
                    repo_id.cyan()
                ),
            }
            print_json(&echo);
            Ok(())
        }
        FeedCommands::Get { repo_id } => {
            let importer = client.get_feed(&repo_id).await?;
            print_json(&importer);
            Ok(())
        }
    }
}
