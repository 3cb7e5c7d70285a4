//! Repository command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use pulp_client::PulpClient;
use pulp_core::domain::repository::RepositoryRecord;

use super::print_json;
use super::task::wait_and_report;

/// Repository subcommands
#[derive(Subcommand)]
pub enum RepoCommands {
    /// List all repositories
    List,
    /// Show repository details
    Get {
        /// Repository ID
        repo_id: String,
    },
    /// Create a repository
    Create {
        /// Repository ID
        repo_id: String,

        /// Display name (defaults to the ID)
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Delete a repository
    Delete {
        /// Repository ID
        repo_id: String,

        /// Wait for the deletion to finish
        #[arg(long)]
        wait: bool,
    },
}

/// Handle repository commands
pub async fn handle_repo_command(command: RepoCommands, client: &PulpClient) -> Result<()> {
    match command {
        RepoCommands::List => list_repos(client).await,
        RepoCommands::Get { repo_id } => get_repo(client, &repo_id).await,
        RepoCommands::Create { repo_id, name } => {
            let name = name.unwrap_or_else(|| repo_id.clone());
            create_repo(client, &repo_id, &name).await
        }
        RepoCommands::Delete { repo_id, wait } => delete_repo(client, &repo_id, wait).await,
    }
}

async fn list_repos(client: &PulpClient) -> Result<()> {
    let repos = client.list_repositories().await?;

    if repos.is_empty() {
        println!("{}", "No repositories found.".yellow());
    } else {
        println!("{}", format!("Found {} repositories:", repos.len()).bold());
        println!();
        for repo in &repos {
            print_repo_summary(repo);
        }
    }

    Ok(())
}

async fn get_repo(client: &PulpClient, repo_id: &str) -> Result<()> {
    let repo = client.get_repository(repo_id).await?;

    print_repo_summary(&repo);
    println!();
    print_json(&repo.details);

    Ok(())
}

async fn create_repo(client: &PulpClient, repo_id: &str, name: &str) -> Result<()> {
    let repo = client.create_repository(repo_id, name).await?;

    println!("{}", "✓ Repository created successfully!".green().bold());
    println!("  ID:   {}", repo.repo_id.cyan());
    println!("  Name: {}", repo.display_name.bold());

    Ok(())
}

async fn delete_repo(client: &PulpClient, repo_id: &str, wait: bool) -> Result<()> {
    let ack = client.delete_repository(repo_id).await?;

    if ack.spawned_tasks.is_empty() {
        println!(
            "{}",
            format!("✓ Repository {} is gone.", repo_id).green().bold()
        );
        return Ok(());
    }

    if wait {
        wait_and_report(client, &ack).await?;
        println!(
            "{}",
            format!("✓ Repository {} deleted successfully!", repo_id)
                .green()
                .bold()
        );
    } else {
        println!("Deletion of {} started:", repo_id.cyan());
        for task_id in ack.task_ids() {
            println!("  task {}", task_id.dimmed());
        }
    }

    Ok(())
}

fn print_repo_summary(repo: &RepositoryRecord) {
    println!("  {}  {}", repo.repo_id.cyan().bold(), repo.display_name);
}
