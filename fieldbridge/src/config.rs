//! Versioned export/import of the mapping configuration.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::SyncError;
use crate::types::FieldMapping;

pub const CONFIG_VERSION: &str = "1.0";

/// The export/import configuration record.
///
/// `version` and `exported_at` are optional metadata: ignored on import
/// except for round-tripping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<String>,
    #[serde(default)]
    pub overwrite_mode: bool,
    pub mappings: Vec<FieldMapping>,
}

/// Build an export record from the current configuration, stamped with the
/// schema version and an ISO-8601 timestamp.
pub fn export_config(mappings: &[FieldMapping], overwrite_mode: bool) -> SyncConfig {
    SyncConfig {
        version: Some(CONFIG_VERSION.to_string()),
        exported_at: Some(Utc::now().to_rfc3339()),
        overwrite_mode,
        mappings: mappings.to_vec(),
    }
}

const REQUIRED_FIELDS: [&str; 6] = [
    "id",
    "label",
    "sourceSelector",
    "targetFieldKey",
    "fieldType",
    "enabled",
];
const VALID_FIELD_TYPES: [&str; 3] = ["text", "choice", "lookup"];

/// Validate a parsed import and convert it to a [`SyncConfig`].
///
/// Rules, checked in order with first-failure messages: `mappings` must be
/// a present, non-empty array; every entry must have all six fields
/// present, non-null, and non-empty-string; `fieldType` must be one of the
/// three valid values.
pub fn validate_import(parsed: &Value) -> Result<SyncConfig, SyncError> {
    let mappings = match parsed.get("mappings") {
        Some(Value::Array(entries)) => entries,
        _ => {
            return Err(SyncError::InvalidConfig(
                "Invalid format: 'mappings' array is required.".to_string(),
            ))
        }
    };

    if mappings.is_empty() {
        return Err(SyncError::InvalidConfig(
            "Invalid format: 'mappings' array must not be empty.".to_string(),
        ));
    }

    for entry in mappings {
        for field in REQUIRED_FIELDS {
            let present = match entry.get(field) {
                None | Some(Value::Null) => false,
                Some(Value::String(s)) => !s.is_empty(),
                Some(_) => true,
            };
            if !present {
                return Err(SyncError::InvalidConfig(format!(
                    "Invalid mapping entry: missing required field '{field}'."
                )));
            }
        }

        let field_type = entry.get("fieldType").and_then(Value::as_str).unwrap_or_default();
        if !VALID_FIELD_TYPES.contains(&field_type) {
            let label = entry.get("label").and_then(Value::as_str).unwrap_or_default();
            return Err(SyncError::InvalidConfig(format!(
                "Invalid fieldType in mapping '{label}': must be text, choice, or lookup."
            )));
        }
    }

    serde_json::from_value(parsed.clone()).map_err(|e| SyncError::InvalidConfig(e.to_string()))
}
