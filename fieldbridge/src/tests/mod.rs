mod selector_tests;

use crate::types::{FieldMapping, FieldType};

/// Build a mapping with the given id; other fields get plausible defaults.
pub(crate) fn mapping(id: &str, field_type: FieldType) -> FieldMapping {
    FieldMapping {
        id: id.to_string(),
        label: format!("Label {id}"),
        source_selector: format!("[data-testid='{id}']"),
        target_field_key: format!("shg_{id}"),
        field_type,
        enabled: true,
    }
}
