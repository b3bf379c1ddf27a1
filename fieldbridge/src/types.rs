//! Core data model shared by the reader, writer, and state deriver.
//!
//! Every wire-visible type serializes camelCase so the JSON matches the
//! versioned configuration record and the persisted capture format.

use serde::{Deserialize, Serialize};

/// Reserved source-selector value meaning "derive the value from the source
/// page's address instead of querying the page".
pub const URL_ID_SENTINEL: &str = "__URL_ID__";

/// Interaction strategy required by a target-page control.
///
/// Dispatch over this enum is an exhaustive match; the `Unknown` arm exists
/// so an unrecognized configuration value degrades to a per-field error
/// instead of a panic or a silent skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Plain text input.
    Text,
    /// Single-select combobox (option set).
    Choice,
    /// Relationship lookup backed by a network search.
    Lookup,
    /// Any unrecognized wire value.
    #[serde(other)]
    Unknown,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Choice => "choice",
            FieldType::Lookup => "lookup",
            FieldType::Unknown => "unknown",
        }
    }
}

/// A user-configured rule pairing a source-page value with a target-page
/// control.
///
/// `id` is unique within a mapping list and order is significant: it
/// determines read, write, and display order. Mappings are created by the
/// configuration UI and consumed read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMapping {
    pub id: String,
    pub label: String,
    /// Lookup expression on the source page, or [`URL_ID_SENTINEL`].
    pub source_selector: String,
    /// Stable field identifier on the target page.
    pub target_field_key: String,
    pub field_type: FieldType,
    pub enabled: bool,
}

/// Outcome classification of a single field read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadStatus {
    Success,
    Blank,
    Error,
}

/// Result of reading one field from the source page.
///
/// Produced fresh on every read invocation, one entry per input mapping, in
/// mapping order. `value` is present iff the status is success; `message`
/// is present for blank and error entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldResult {
    pub field_id: String,
    pub label: String,
    pub status: ReadStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FieldResult {
    pub fn success(mapping: &FieldMapping, value: impl Into<String>) -> Self {
        Self {
            field_id: mapping.id.clone(),
            label: mapping.label.clone(),
            status: ReadStatus::Success,
            value: Some(value.into()),
            message: None,
        }
    }

    pub fn blank(mapping: &FieldMapping, message: impl Into<String>) -> Self {
        Self {
            field_id: mapping.id.clone(),
            label: mapping.label.clone(),
            status: ReadStatus::Blank,
            value: None,
            message: Some(message.into()),
        }
    }

    pub fn error(mapping: &FieldMapping, message: impl Into<String>) -> Self {
        Self {
            field_id: mapping.id.clone(),
            label: mapping.label.clone(),
            status: ReadStatus::Error,
            value: None,
            message: Some(message.into()),
        }
    }
}

/// A [`FieldResult`] reshaped for persistence.
///
/// Error entries are retained, not dropped, so a failed read still shows as
/// failed after a view refresh. `value` is the empty string for blank and
/// error entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedFieldRecord {
    pub field_id: String,
    pub label: String,
    pub value: String,
    pub read_status: ReadStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_message: Option<String>,
}

impl CapturedFieldRecord {
    pub fn from_read(result: &FieldResult) -> Self {
        let (value, read_message) = match result.status {
            ReadStatus::Success => (result.value.clone().unwrap_or_default(), None),
            ReadStatus::Blank | ReadStatus::Error => (String::new(), result.message.clone()),
        };
        Self {
            field_id: result.field_id.clone(),
            label: result.label.clone(),
            value,
            read_status: result.status,
            read_message,
        }
    }
}

/// Outcome classification of a single field write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteStatus {
    Success,
    /// The overwrite policy declined to act on an already-filled control.
    Skipped,
    /// The control was reachable but the value was ambiguous (no match).
    Warning,
    Error,
}

/// Result of attempting to write one field into the target page.
///
/// One entry per enabled mapping, in mapping order. Lives only in memory
/// for the current view session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteResult {
    pub field_id: String,
    pub label: String,
    pub status: WriteStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
