//! `submit` and `delete` command handlers.

use std::path::Path;

use anyhow::Context;
use gather_api::{submit, EventsClient};
use gather_core::AppConfig;
use gather_wizard::{assemble, LocalClock, WizardSession};

use crate::draft::{fill_session, Draft};
use crate::location::build_resolver;

fn events_client(config: &AppConfig) -> anyhow::Result<EventsClient> {
    EventsClient::new(
        &config.api_base_url,
        config.api_request_timeout_secs,
        &config.user_agent,
    )
    .context("failed to build events API client")
}

/// Walks the draft at `path` through the wizard and publishes it.
///
/// With `dry_run` the assembled payload is printed and nothing is sent.
pub(crate) async fn run_submit(
    config: &AppConfig,
    path: &Path,
    actor: &str,
    dry_run: bool,
) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read draft {}", path.display()))?;
    let draft = Draft::from_yaml(&text)?;

    let resolver = build_resolver(config)?;
    let clock = LocalClock::system(config.timezone);
    let mut session = WizardSession::new();
    fill_session(&draft, &mut session, &resolver, &clock).await?;

    if dry_run {
        let payload = assemble(session.state(), &clock, actor)?;
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let client = events_client(config)?;
    let record = submit(&mut session, &client, actor, &clock)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;
    println!("published {} ({})", record.id, record.kind);
    Ok(())
}

pub(crate) async fn run_delete(config: &AppConfig, id: &str, actor: &str) -> anyhow::Result<()> {
    let client = events_client(config)?;
    client
        .delete_event_by_id(id, actor)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;
    println!("deleted {id}");
    Ok(())
}
