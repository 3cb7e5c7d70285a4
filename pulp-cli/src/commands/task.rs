//! Task command handlers

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use pulp_client::{CancellationToken, PulpClient};
use pulp_core::domain::task::TaskAck;

use super::print_json;

/// Task subcommands
#[derive(Subcommand)]
pub enum TaskCommands {
    /// Show the current report of a task
    Get {
        /// Task ID
        task_id: String,
    },
    /// Wait until a task settles (Ctrl-C stops waiting)
    Wait {
        /// Task ID
        task_id: String,

        /// Give up after this many seconds (0 waits forever)
        #[arg(long)]
        timeout: Option<u64>,
    },
}

/// Handle task commands
pub async fn handle_task_command(command: TaskCommands, client: &PulpClient) -> Result<()> {
    match command {
        TaskCommands::Get { task_id } => {
            let status = client.get_task(&task_id).await?;
            println!("Task {} is {}", task_id.cyan(), status.state.to_string().bold());
            print_json(&status.payload);
            Ok(())
        }
        TaskCommands::Wait { task_id, timeout } => {
            let mut policy = client.poll_policy().clone();
            if let Some(secs) = timeout {
                policy.max_wait = (secs > 0).then(|| Duration::from_secs(secs));
            }

            let status = client
                .wait_for_task_with(&task_id, &policy, &cancel_on_ctrl_c())
                .await
                .with_context(|| format!("Task {} did not finish", task_id))?;

            println!("{}", format!("✓ Task {} finished.", task_id).green().bold());
            print_json(&status.payload);
            Ok(())
        }
    }
}

/// Wait for every task of `ack`, stopping early on Ctrl-C
pub(crate) async fn wait_and_report(client: &PulpClient, ack: &TaskAck) -> Result<()> {
    let cancel = cancel_on_ctrl_c();

    for task_id in ack.task_ids() {
        println!("Waiting for task {}...", task_id.dimmed());
        client
            .wait_for_task_with(task_id, client.poll_policy(), &cancel)
            .await
            .with_context(|| format!("Task {} did not finish", task_id))?;
    }

    Ok(())
}

fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            trigger.cancel();
        }
    });
    cancel
}
