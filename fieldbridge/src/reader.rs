//! Field Reader: extracts one value per mapping from the source page.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::errors::SyncError;
use crate::page::Page;
use crate::types::{FieldMapping, FieldResult, URL_ID_SENTINEL};

/// Path portion of an address: everything after the authority, up to the
/// query or fragment. The record id must come from the path; digit runs in
/// the query string or fragment are not record ids.
static ADDRESS_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://[^/?#]+([^?#]*)").unwrap());

/// First path segment consisting solely of digits, bounded by a separator
/// or end-of-path. A segment like `123abc` does not match because the
/// digits must be followed immediately by a separator or the end of the
/// input.
static PATH_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"/(\d+)(?:/|$)").unwrap());

static MARKUP_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Read every mapping from the source page.
///
/// The output has the same length and order as `mappings`; no mapping is
/// ever dropped. Each field is independently guarded: a failure while
/// reading one field is recorded as an error result and the loop continues.
/// This function never returns an error to the caller.
pub fn read_fields(mappings: &[FieldMapping], page: &dyn Page) -> Vec<FieldResult> {
    let results: Vec<FieldResult> = mappings
        .iter()
        .map(|mapping| {
            read_field(mapping, page).unwrap_or_else(|e| FieldResult::error(mapping, e.to_string()))
        })
        .collect();
    debug!(fields = results.len(), "read fields from source page");
    results
}

fn read_field(mapping: &FieldMapping, page: &dyn Page) -> Result<FieldResult, SyncError> {
    if mapping.source_selector == URL_ID_SENTINEL {
        let address = page.address();
        let path = ADDRESS_PATH
            .captures(&address)
            .and_then(|caps| caps.get(1))
            .map_or("", |m| m.as_str());
        return Ok(match PATH_ID.captures(path) {
            Some(caps) => FieldResult::success(mapping, &caps[1]),
            None => FieldResult::error(mapping, "Could not extract a record id from the page address"),
        });
    }

    let Some(element) = page.query(&mapping.source_selector)? else {
        return Ok(FieldResult::error(
            mapping,
            format!("Element not found (selector: {})", mapping.source_selector),
        ));
    };

    // Prefer an input-style value; fall back to rendered text for divs,
    // spans, and rich-text containers.
    let raw = match element.value()? {
        Some(value) if !value.is_empty() => value,
        _ => element.text()?,
    };

    let cleaned = clean_value(&raw);
    Ok(if cleaned.is_empty() {
        FieldResult::blank(mapping, "Field is blank on the source page")
    } else {
        FieldResult::success(mapping, cleaned)
    })
}

/// Strip embedded markup tags (replaced by a single space, since the source
/// page occasionally embeds inline tags in text fields), then collapse and
/// trim whitespace.
pub(crate) fn clean_value(raw: &str) -> String {
    let stripped = MARKUP_TAG.replace_all(raw, " ");
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}
