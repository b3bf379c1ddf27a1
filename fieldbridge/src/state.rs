//! UI state derivation: one display state per enabled mapping.
//!
//! Recomputed on demand from the persisted capture and the most recent
//! write results. Pure and ephemeral; never persisted, never the source of
//! truth.

use serde::{Deserialize, Serialize};

use crate::types::{CapturedFieldRecord, FieldMapping, ReadStatus, WriteResult, WriteStatus};

/// Which operation ran last in this view session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastOperation {
    Read,
    Write,
}

/// Display state of one field row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiState {
    NotCopied,
    Copied,
    CopyFailed,
    Pasted,
    PasteFailed,
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiFieldState {
    pub field_id: String,
    pub label: String,
    pub state: UiState,
    pub copied_value: Option<String>,
    pub message: Option<String>,
}

impl UiFieldState {
    fn new(
        mapping: &FieldMapping,
        state: UiState,
        copied_value: Option<String>,
        message: Option<String>,
    ) -> Self {
        Self {
            field_id: mapping.id.clone(),
            label: mapping.label.clone(),
            state,
            copied_value,
            message,
        }
    }
}

/// Derive one [`UiFieldState`] per enabled mapping, in mapping order.
///
/// Write results take priority when the last operation was a write; when no
/// write result exists for a mapping, its state falls through to the capture
/// record, and absent both it is `NotCopied`. Pure: identical inputs always
/// yield identical output.
pub fn derive_ui_states(
    enabled_mappings: &[FieldMapping],
    captured: Option<&[CapturedFieldRecord]>,
    last_write_results: Option<&[WriteResult]>,
    last_operation: Option<LastOperation>,
) -> Vec<UiFieldState> {
    enabled_mappings
        .iter()
        .map(|mapping| {
            let record = captured.and_then(|c| c.iter().find(|r| r.field_id == mapping.id));
            let write =
                last_write_results.and_then(|w| w.iter().find(|r| r.field_id == mapping.id));

            if last_operation == Some(LastOperation::Write) {
                if let Some(write) = write {
                    let copied_value = record.map(|r| r.value.clone());
                    return match write.status {
                        WriteStatus::Success => {
                            UiFieldState::new(mapping, UiState::Pasted, copied_value, None)
                        }
                        WriteStatus::Error | WriteStatus::Warning => UiFieldState::new(
                            mapping,
                            UiState::PasteFailed,
                            copied_value,
                            write.message.clone(),
                        ),
                        WriteStatus::Skipped => UiFieldState::new(
                            mapping,
                            UiState::Skipped,
                            copied_value,
                            write.message.clone(),
                        ),
                    };
                }
            }

            if let Some(record) = record {
                return match record.read_status {
                    ReadStatus::Success => UiFieldState::new(
                        mapping,
                        UiState::Copied,
                        Some(record.value.clone()),
                        None,
                    ),
                    ReadStatus::Blank => {
                        UiFieldState::new(mapping, UiState::Copied, Some(String::new()), None)
                    }
                    ReadStatus::Error => UiFieldState::new(
                        mapping,
                        UiState::CopyFailed,
                        None,
                        record.read_message.clone(),
                    ),
                };
            }

            UiFieldState::new(mapping, UiState::NotCopied, None, None)
        })
        .collect()
}

/// Secondary line shown under a field row, derivable from the state alone.
///
/// paste_failed / skipped show whichever of the value and message are
/// non-empty, joined with a separator; copy_failed shows the message only;
/// copied / pasted show the value only; not_copied shows nothing.
pub fn secondary_text(state: &UiFieldState) -> String {
    match state.state {
        UiState::PasteFailed | UiState::Skipped => {
            let mut parts = Vec::new();
            if let Some(value) = state.copied_value.as_deref() {
                if !value.is_empty() {
                    parts.push(value);
                }
            }
            if let Some(message) = state.message.as_deref() {
                if !message.is_empty() {
                    parts.push(message);
                }
            }
            parts.join(" \u{2014} ")
        }
        UiState::CopyFailed => state.message.clone().unwrap_or_default(),
        UiState::Copied | UiState::Pasted => state.copied_value.clone().unwrap_or_default(),
        UiState::NotCopied => String::new(),
    }
}

/// True when the capture holds at least one non-error record.
///
/// An all-error capture means every source selector failed; there is
/// nothing meaningful to write, so callers keep their paste and clear
/// affordances disabled.
pub fn has_captured_data(captured: Option<&[CapturedFieldRecord]>) -> bool {
    captured.is_some_and(|records| records.iter().any(|r| r.read_status != ReadStatus::Error))
}
