//! Pulp CLI
//!
//! Command-line interface for driving the remote Pulp service directly:
//! repositories, feeds, publication targets, and the tasks they start.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;

#[derive(Parser)]
#[command(name = "pulp")]
#[command(about = "Pulp repository management CLI", long_about = None)]
struct Cli {
    /// Pulp base URL
    #[arg(long, env = "PULP_URL")]
    pulp_url: Option<String>,

    /// Pulp user name
    #[arg(long, env = "PULP_USERNAME")]
    username: Option<String>,

    /// Pulp password
    #[arg(long, env = "PULP_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Validate the Pulp TLS certificate
    #[arg(long)]
    verify_tls: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::load(cli.pulp_url, cli.username, cli.password, cli.verify_tls);

    handle_command(cli.command, &config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_merge_with_wait() {
        let cli = Cli::try_parse_from(["pulp", "merge", "src", "dest", "--wait"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Merge { ref source, ref target, wait: true } if source == "src" && target == "dest"
        ));
    }
}
