//! Publication target command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use pulp_client::PulpClient;

use super::print_json;

/// Target subcommands
#[derive(Subcommand)]
pub enum TargetCommands {
    /// Attach the HTTP publication target to a repository
    Set {
        /// Repository ID
        repo_id: String,
    },
    /// Show the distributor of a repository
    Get {
        /// Repository ID
        repo_id: String,
    },
}

/// Handle target commands
pub async fn handle_target_command(command: TargetCommands, client: &PulpClient) -> Result<()> {
    match command {
        TargetCommands::Set { repo_id } => {
            let target = client.set_target(&repo_id).await?;
            println!("{}", "✓ Publication target attached!".green().bold());
            println!("  Repository: {}", repo_id.cyan());
            println!("  URL:        {}", target.repo_url.bold());
            Ok(())
        }
        TargetCommands::Get { repo_id } => {
            let distributor = client.get_target(&repo_id).await?;
            print_json(&distributor);
            Ok(())
        }
    }
}
