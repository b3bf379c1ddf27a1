use crate::selector::{
    derive_selector, lookup_clear_selector, lookup_prefix, lookup_results_selector,
};
use crate::types::FieldType;

#[test]
fn text_has_primary_and_whole_number_fallback() {
    let derived = derive_selector("shg_title", FieldType::Text);
    assert_eq!(
        derived.primary,
        "[data-id=\"shg_title.fieldControl-text-box-text\"]"
    );
    assert_eq!(
        derived.fallback.as_deref(),
        Some("[data-id=\"shg_title.fieldControl-whole-number-text-input\"]")
    );
}

#[test]
fn choice_has_primary_only() {
    let derived = derive_selector("shg_status", FieldType::Choice);
    assert_eq!(
        derived.primary,
        "[data-id=\"shg_status.fieldControl-option-set-select\"]"
    );
    assert!(derived.fallback.is_none());
}

#[test]
fn lookup_targets_filter_box_with_selected_chip_fallback() {
    let derived = derive_selector("shg_owner", FieldType::Lookup);
    // The field key appears twice: the data-id encodes the full control path.
    assert_eq!(
        derived.primary,
        "[data-id=\"shg_owner.fieldControl-LookupResultsDropdown_shg_owner_textInputBox_with_filter_new\"]"
    );
    assert_eq!(
        derived.fallback.as_deref(),
        Some("[data-id=\"shg_owner.fieldControl-LookupResultsDropdown_shg_owner_selected_tag\"]")
    );
}

#[test]
fn lookup_sub_controls_share_the_prefix() {
    let prefix = lookup_prefix("shg_owner");
    assert!(lookup_clear_selector("shg_owner").contains(&format!("{prefix}_selected_tag_delete")));
    assert!(lookup_results_selector("shg_owner").contains(&format!("{prefix}_resultsContainer")));
}

#[test]
fn unknown_field_type_matches_nothing_and_never_panics() {
    let derived = derive_selector("shg_anything", FieldType::Unknown);
    assert!(!derived.primary.is_empty());
    assert!(derived.fallback.is_none());
    // The expression must not be derivable from any real field key.
    assert!(!derived.primary.contains("shg_anything"));
}
