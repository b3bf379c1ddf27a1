//! Field Writer: populates target-page controls with captured values.
//!
//! The target page renders three distinct control types, each needing its
//! own interaction sequence:
//!
//! 1. text: focus, select contents, simulated typing.
//! 2. choice: open the combobox, wait for its options to render in a
//!    detached overlay at document level, match case-insensitively, click.
//! 3. lookup: optionally clear the existing selection, type a search term,
//!    wait for network-backed results, match on the pre-comma primary name
//!    of each result's accessible label, click.
//!
//! Invariants:
//! - Each field write is independently guarded so one failure never aborts
//!   the remaining fields.
//! - No strategy ever submits the form or clicks a save control; every
//!   interaction is scoped to the individual field's own controls.
//! - A lookup that finds no match clears the typed text before returning so
//!   the field is not left half-filled.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, instrument, warn};

use crate::errors::SyncError;
use crate::page::{Page, PageElement};
use crate::selector::{derive_selector, lookup_clear_selector, lookup_results_selector};
use crate::types::{CapturedFieldRecord, FieldMapping, FieldType, WriteResult, WriteStatus};
use crate::wait::{wait_for_element, wait_for_elements};

/// Placeholder title shown by an empty single-select control.
const CHOICE_PLACEHOLDER: &str = "---";

/// Overlay options render at document level, outside the combobox subtree.
const OPTION_SELECTOR: &str = "[role=\"option\"]";

const SKIPPED_MESSAGE: &str = "Field already has a value (overwrite mode is off)";

/// Writes captured values into the target page, one enabled mapping at a
/// time, strictly sequentially. Strategies mutate shared page state (focus,
/// open dropdowns), so fields are never written in parallel.
///
/// Timing knobs are fields so tests and unusual deployments can shrink or
/// stretch them; [`FieldWriter::default`] gives the production values.
#[derive(Debug, Clone)]
pub struct FieldWriter {
    /// Settle delay after simulated typing, letting the target page's own
    /// event handlers run before the next interaction.
    pub settle_delay: Duration,
    /// Bound on waiting for combobox options to appear.
    pub option_timeout: Duration,
    /// Bound on waiting for the lookup filter box to reappear after
    /// clearing an existing selection.
    pub reappear_timeout: Duration,
    /// Bound on waiting for lookup search results; longer than the others
    /// because the search is network-backed.
    pub result_timeout: Duration,
}

impl Default for FieldWriter {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(300),
            option_timeout: Duration::from_secs(3),
            reappear_timeout: Duration::from_secs(3),
            result_timeout: Duration::from_secs(5),
        }
    }
}

/// Outcome of one strategy run, before it is joined with the mapping's
/// identity into a [`WriteResult`].
#[derive(Debug)]
struct Outcome {
    status: WriteStatus,
    message: Option<String>,
}

impl Outcome {
    fn success() -> Self {
        Self { status: WriteStatus::Success, message: None }
    }

    fn skipped() -> Self {
        Self { status: WriteStatus::Skipped, message: Some(SKIPPED_MESSAGE.to_string()) }
    }

    fn warning(message: String) -> Self {
        Self { status: WriteStatus::Warning, message: Some(message) }
    }

    fn error(message: impl Into<String>) -> Self {
        Self { status: WriteStatus::Error, message: Some(message.into()) }
    }
}

impl FieldWriter {
    /// Write every enabled mapping's captured value into the target page.
    ///
    /// Returns one [`WriteResult`] per enabled mapping, in mapping order.
    /// Never returns an error: per-field failures (including unexpected
    /// page errors raised by a strategy) are recorded in the corresponding
    /// result entry and the loop continues.
    #[instrument(skip_all, fields(mappings = mappings.len(), overwrite = overwrite))]
    pub async fn write_fields(
        &self,
        page: &dyn Page,
        captured: &[CapturedFieldRecord],
        mappings: &[FieldMapping],
        overwrite: bool,
    ) -> Vec<WriteResult> {
        let by_field_id: HashMap<&str, &CapturedFieldRecord> =
            captured.iter().map(|r| (r.field_id.as_str(), r)).collect();

        let mut results = Vec::new();
        for mapping in mappings.iter().filter(|m| m.enabled) {
            let outcome = match by_field_id.get(mapping.id.as_str()) {
                None => Outcome::error(format!(
                    "No captured data found for field \"{}\"",
                    mapping.id
                )),
                Some(record) => self
                    .write_field(page, mapping, &record.value, overwrite)
                    .await
                    .unwrap_or_else(|e| {
                        warn!(field = %mapping.id, error = %e, "unexpected failure while writing field");
                        Outcome::error(e.to_string())
                    }),
            };
            debug!(field = %mapping.id, status = ?outcome.status, "field write finished");
            results.push(WriteResult {
                field_id: mapping.id.clone(),
                label: mapping.label.clone(),
                status: outcome.status,
                message: outcome.message,
            });
        }
        results
    }

    async fn write_field(
        &self,
        page: &dyn Page,
        mapping: &FieldMapping,
        value: &str,
        overwrite: bool,
    ) -> Result<Outcome, SyncError> {
        let key = mapping.target_field_key.as_str();
        match mapping.field_type {
            FieldType::Text => self.write_text(page, key, value, overwrite).await,
            FieldType::Choice => self.write_choice(page, key, value, overwrite).await,
            FieldType::Lookup => self.write_lookup(page, key, value, overwrite).await,
            FieldType::Unknown => Ok(Outcome::error(format!(
                "Unknown field type for field \"{}\"",
                mapping.id
            ))),
        }
    }

    /// Plain text strategy: primary text-box control, falling back to the
    /// whole-number control some field renderers use for integer text.
    async fn write_text(
        &self,
        page: &dyn Page,
        field_key: &str,
        value: &str,
        overwrite: bool,
    ) -> Result<Outcome, SyncError> {
        let derived = derive_selector(field_key, FieldType::Text);
        let mut input = page.query(&derived.primary)?;
        if input.is_none() {
            if let Some(fallback) = derived.fallback.as_deref() {
                input = page.query(fallback)?;
            }
        }
        let Some(input) = input else {
            return Ok(Outcome::error(format!("Text input not found: {}", derived.primary)));
        };

        if !overwrite && !input.value()?.unwrap_or_default().is_empty() {
            return Ok(Outcome::skipped());
        }

        input.focus()?;
        self.simulate_typing(&input, value).await?;
        Ok(Outcome::success())
    }

    /// Single-select strategy: open the combobox and pick the option whose
    /// trimmed, case-folded text equals the target value.
    async fn write_choice(
        &self,
        page: &dyn Page,
        field_key: &str,
        value: &str,
        overwrite: bool,
    ) -> Result<Outcome, SyncError> {
        let derived = derive_selector(field_key, FieldType::Choice);
        let Some(combobox) = page.query(&derived.primary)? else {
            return Ok(Outcome::error(format!(
                "Choice combobox not found: {}",
                derived.primary
            )));
        };

        if !overwrite {
            if let Some(title) = combobox.title()? {
                if !title.is_empty() && title != CHOICE_PLACEHOLDER {
                    return Ok(Outcome::skipped());
                }
            }
        }

        combobox.click()?;

        // The option list renders in a detached overlay, not inside the
        // combobox subtree, so the wait observes the whole document.
        let options = wait_for_elements(page, OPTION_SELECTOR, self.option_timeout).await?;
        if options.is_empty() {
            return Ok(Outcome::error("No options appeared after opening dropdown"));
        }

        let target = value.trim().to_lowercase();
        let mut matched = None;
        let mut available = Vec::new();
        for option in options {
            let text = option.text()?.trim().to_string();
            if matched.is_none() && text.to_lowercase() == target {
                matched = Some(option);
            }
            available.push(text);
        }

        match matched {
            Some(option) => {
                option.click()?;
                Ok(Outcome::success())
            }
            None => Ok(Outcome::warning(format!(
                "No option matched \"{value}\". Available: {}",
                available.join(", ")
            ))),
        }
    }

    /// Relationship lookup strategy: type a search term into the filter box
    /// and pick the result whose primary name (the accessible label up to
    /// the first comma) equals the target value, case-insensitively.
    async fn write_lookup(
        &self,
        page: &dyn Page,
        field_key: &str,
        value: &str,
        overwrite: bool,
    ) -> Result<Outcome, SyncError> {
        let filter_selector = derive_selector(field_key, FieldType::Lookup).primary;
        let clear_selector = lookup_clear_selector(field_key);
        let results_selector = lookup_results_selector(field_key);

        // A visible clear control means the field already holds a value.
        let clear_button = page.query(&clear_selector)?;
        if !overwrite && clear_button.is_some() {
            return Ok(Outcome::skipped());
        }
        if let Some(clear_button) = clear_button {
            clear_button.click()?;
            let reappeared =
                wait_for_element(page, &filter_selector, self.reappear_timeout).await?;
            if reappeared.is_none() {
                return Ok(Outcome::error(
                    "Text input did not appear after clearing existing value",
                ));
            }
        }

        let Some(filter) = page.query(&filter_selector)? else {
            return Ok(Outcome::error(format!(
                "Lookup text input not found: {filter_selector}"
            )));
        };

        filter.focus()?;
        filter.click()?;
        self.simulate_typing(&filter, value).await?;

        let results = wait_for_elements(page, &results_selector, self.result_timeout).await?;
        if results.is_empty() {
            // Leave the field empty rather than half-filled.
            self.simulate_typing(&filter, "").await?;
            return Ok(Outcome::error(format!("No search results found for \"{value}\"")));
        }

        let target = value.trim().to_lowercase();
        let mut matched = None;
        let mut available = Vec::new();
        for item in results {
            let label = item.label()?.unwrap_or_default();
            let primary_name = label.split(',').next().unwrap_or("").trim().to_string();
            if matched.is_none() && primary_name.to_lowercase() == target {
                matched = Some(item);
            }
            available.push(primary_name);
        }

        match matched {
            Some(item) => {
                item.click()?;
                Ok(Outcome::success())
            }
            None => {
                self.simulate_typing(&filter, "").await?;
                Ok(Outcome::warning(format!(
                    "No result matched \"{value}\". Available: {}",
                    available.join(", ")
                )))
            }
        }
    }

    /// Inject `text` so the target page's reactive framework observes a real
    /// input event: select the current contents and attempt a native
    /// insertion first; if the control's value still differs, set the value
    /// through the underlying property and dispatch input/change
    /// notifications explicitly. Ends with the settle delay either way.
    async fn simulate_typing(&self, input: &PageElement, text: &str) -> Result<(), SyncError> {
        input.select_contents()?;
        input.insert_text(text)?;

        if input.value()?.unwrap_or_default() != text {
            input.set_value(text)?;
            input.notify_input()?;
        }

        sleep(self.settle_delay).await;
        Ok(())
    }
}
