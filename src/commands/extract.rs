//! `extract` command: run the page-text pipeline over an HTML document

use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;

use crate::config::Config;
use crate::extract::{extract_page_text, prepare_submission};

use super::read_input;

/// Print the text that would be submitted for an HTML document
///
/// With `raw` set, length bounds are skipped and the bare extraction is
/// printed instead.
pub async fn extract(input: Option<PathBuf>, raw: bool) -> Result<()> {
    let config = Config::from_env()?;
    config.validate().context("Invalid configuration")?;

    let html = read_input(input.as_deref()).await?;
    let text = extract_page_text(&html).ok_or_else(|| anyhow!("no text available in document"))?;

    if raw {
        println!("{text}");
        return Ok(());
    }

    let prepared = prepare_submission(
        &text,
        config.analysis.min_text_chars,
        config.analysis.max_text_chars,
    )?;
    println!("{prepared}");

    Ok(())
}
