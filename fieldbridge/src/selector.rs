//! Selector derivation for target-page form controls.
//!
//! The target page renders each field behind a stable `data-id` control
//! path derived from the field's schema key. These derivations are consumed
//! by the field writer and by external diagnostic tooling (the selector
//! tester), so they live in one place.

use crate::types::FieldType;

/// Candidate lookup expressions for one target-page control.
///
/// The primary expression targets the control's most common rendering;
/// the fallback, when present, targets an alternate rendering of the same
/// field. First match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedSelector {
    pub primary: String,
    pub fallback: Option<String>,
}

/// Matches no element on any page. Returned for unknown field types so
/// callers get an empty query result instead of a panic.
const MATCH_NOTHING: &str = "[data-id=\"__fieldbridge_no_such_control__\"]";

/// Derive the candidate selectors for a target field.
///
/// - text: plain text lines use the text-box control; integer-typed text
///   fields are rendered by a distinct whole-number control that behaves
///   identically, so it is the fallback.
/// - choice: the combobox control only.
/// - lookup: the control renders entirely different markup depending on
///   whether a value is already chosen. Primary is the empty-state filter
///   box, fallback is the filled-state selected chip.
pub fn derive_selector(target_field_key: &str, field_type: FieldType) -> DerivedSelector {
    match field_type {
        FieldType::Text => DerivedSelector {
            primary: format!("[data-id=\"{target_field_key}.fieldControl-text-box-text\"]"),
            fallback: Some(format!(
                "[data-id=\"{target_field_key}.fieldControl-whole-number-text-input\"]"
            )),
        },
        FieldType::Choice => DerivedSelector {
            primary: format!("[data-id=\"{target_field_key}.fieldControl-option-set-select\"]"),
            fallback: None,
        },
        FieldType::Lookup => {
            let prefix = lookup_prefix(target_field_key);
            DerivedSelector {
                primary: format!("[data-id=\"{prefix}_textInputBox_with_filter_new\"]"),
                fallback: Some(format!("[data-id=\"{prefix}_selected_tag\"]")),
            }
        }
        FieldType::Unknown => DerivedSelector {
            primary: MATCH_NOTHING.to_string(),
            fallback: None,
        },
    }
}

/// Control path prefix shared by every lookup sub-control. The field key
/// appears twice because the target page encodes the full control path in
/// the `data-id`.
pub fn lookup_prefix(target_field_key: &str) -> String {
    format!("{target_field_key}.fieldControl-LookupResultsDropdown_{target_field_key}")
}

/// The "clear selection" control of a lookup field. Its presence means a
/// value is already chosen.
pub fn lookup_clear_selector(target_field_key: &str) -> String {
    format!("[data-id=\"{}_selected_tag_delete\"]", lookup_prefix(target_field_key))
}

/// The result items of a lookup field's network-backed search.
pub fn lookup_results_selector(target_field_key: &str) -> String {
    format!("[data-id=\"{}_resultsContainer\"]", lookup_prefix(target_field_key))
}
