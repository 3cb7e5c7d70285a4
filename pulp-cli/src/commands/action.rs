//! Repository action handlers (sync, publish, merge)

use anyhow::Result;
use colored::*;
use pulp_client::PulpClient;
use pulp_core::domain::task::TaskAck;

use super::task::wait_and_report;

pub async fn sync(client: &PulpClient, repo_id: &str, wait: bool) -> Result<()> {
    let ack = client.start_sync(repo_id).await?;
    finish(client, &format!("Sync of {}", repo_id), &ack, wait).await
}

pub async fn publish(client: &PulpClient, repo_id: &str, wait: bool) -> Result<()> {
    let ack = client.start_publish(repo_id).await?;
    finish(client, &format!("Publish of {}", repo_id), &ack, wait).await
}

pub async fn merge(client: &PulpClient, source: &str, target: &str, wait: bool) -> Result<()> {
    let ack = client.start_merge(source, target).await?;
    finish(
        client,
        &format!("Merge of {} into {}", source, target),
        &ack,
        wait,
    )
    .await
}

/// Report the started tasks, or wait for them
async fn finish(client: &PulpClient, what: &str, ack: &TaskAck, wait: bool) -> Result<()> {
    if wait {
        wait_and_report(client, ack).await?;
        println!("{}", format!("✓ {} finished.", what).green().bold());
        return Ok(());
    }

    println!("{} started:", what);
    for task_id in ack.task_ids() {
        println!("  task {}", task_id.cyan());
    }

    Ok(())
}
