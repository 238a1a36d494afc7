//! `analyze` command: one-shot analysis of a file or stdin text

use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;

use crate::config::Config;
use crate::coordinator::Coordinator;
use crate::extract::{extract_page_text, prepare_submission};
use crate::models::SessionId;

use super::read_input;

/// Submit one text and print the settled state as JSON
///
/// Subscribes to the coordinator's event stream and waits for the settling
/// transition of its own session, the same way an attached viewer would.
pub async fn analyze(input: Option<PathBuf>, html: bool, session: Option<String>) -> Result<()> {
    let config = Config::from_env()?;
    config.validate().context("Invalid configuration")?;

    let raw = read_input(input.as_deref()).await?;
    let text = if html {
        extract_page_text(&raw).ok_or_else(|| anyhow!("no text available in document"))?
    } else {
        raw
    };

    let prepared = prepare_submission(
        &text,
        config.analysis.min_text_chars,
        config.analysis.max_text_chars,
    )?;

    let coordinator = Coordinator::from_config(&config)?;
    let mut events = coordinator.subscribe();

    let session_id = session.map(SessionId::from).unwrap_or_else(SessionId::generate);
    tracing::info!(session_id = %session_id, "Submitting one-shot analysis");

    let handle = coordinator.submit_text(session_id.clone(), prepared).await;

    // Wait for the settling broadcast of our session
    let settled = loop {
        match events.recv().await {
            Ok(change) if change.session_id == session_id && change.state.is_settled() => {
                break change.state;
            }
            Ok(_) => continue,
            Err(_) => {
                // Channel drained or lagged; fall back to polling
                handle.await.context("Analysis task failed")?;
                break coordinator.get_state(&session_id).await;
            }
        }
    };

    println!("{}", serde_json::to_string_pretty(&settled)?);
    Ok(())
}
