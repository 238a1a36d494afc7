//! Page text extraction and truncation
//!
//! Implements the text-source side of the pipeline: pull visible article
//! text out of an HTML document, collapse whitespace, and bound the payload
//! before submission. Long texts keep their beginning and end (lead and
//! conclusion carry most of the signal for fake-news scoring); texts below
//! the minimum threshold are not worth a backend round trip and are refused.

use lazy_static::lazy_static;
use scraper::{Html, Selector};

use crate::error::ExtractError;

/// Marker inserted where the middle of an over-budget text was discarded
pub const TRUNCATION_MARKER: &str = "\n...\n";

/// Percent of the budget kept from the start of the text
const HEAD_PERCENT: usize = 70;

/// Percent of the budget kept from the end of the text
const TAIL_PERCENT: usize = 20;

// Helper macro to parse selectors safely at startup
macro_rules! parse_selector {
    ($s:expr) => {
        Selector::parse($s).expect(concat!("Invalid CSS selector: ", $s))
    };
}

lazy_static! {
    // Containers that usually hold the article body, in priority order
    static ref CONTENT_SELECTORS: Vec<Selector> = vec![
        parse_selector!("article"),
        parse_selector!("main"),
        parse_selector!("[role='article']"),
        parse_selector!(".post"),
        parse_selector!(".news"),
    ];

    static ref BODY_SELECTOR: Selector = parse_selector!("body");
}

/// Extract readable text from an HTML document
///
/// Tries the known article containers in priority order and falls back to
/// the whole `<body>`. All whitespace runs are collapsed to single spaces.
/// Returns `None` when the document has no usable text at all.
pub fn extract_page_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    for selector in CONTENT_SELECTORS.iter() {
        if let Some(text) = first_selector_text(&document, selector) {
            return Some(text);
        }
    }

    document
        .select(&BODY_SELECTOR)
        .next()
        .map(|el| normalize_whitespace(&el.text().collect::<String>()))
        .filter(|text| !text.is_empty())
}

/// Get normalized text of the first element matching `selector`, if any
fn first_selector_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(|el| normalize_whitespace(&el.text().collect::<String>()))
        .filter(|text| !text.is_empty())
}

/// Collapse all whitespace runs to single spaces and trim the ends
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Bound a text to `max_chars` by keeping its head and tail
///
/// Texts within budget pass through unchanged. Over-budget texts keep the
/// first 70% and last 20% of the budget (in chars), joined with
/// [`TRUNCATION_MARKER`]; the middle is discarded.
pub fn condense(text: &str, max_chars: usize) -> String {
    let total = text.chars().count();
    if total <= max_chars {
        return text.to_string();
    }

    let head_budget = max_chars * HEAD_PERCENT / 100;
    let tail_budget = max_chars * TAIL_PERCENT / 100;

    let head: String = text.chars().take(head_budget).collect();
    let tail: String = text.chars().skip(total - tail_budget).collect();

    format!("{head}{TRUNCATION_MARKER}{tail}")
}

/// Prepare raw text for submission to the coordinator
///
/// Trims, refuses texts below `min_chars`, and truncates above `max_chars`.
pub fn prepare_submission(
    text: &str,
    min_chars: usize,
    max_chars: usize,
) -> Result<String, ExtractError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ExtractError::NoText);
    }

    let len = trimmed.chars().count();
    if len < min_chars {
        return Err(ExtractError::TooShort {
            len,
            min: min_chars,
        });
    }

    Ok(condense(trimmed, max_chars))
}
