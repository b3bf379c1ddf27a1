//! Field synchronization between two independently built web pages.
//!
//! `fieldbridge` reads structured field values from a source record page,
//! persists the capture, and writes the values into a related data-entry
//! form on a target page, driven by a user-maintained list of field
//! mappings. The target UI is uncooperative: controls render in detached
//! overlays with unpredictable timing, so every write strategy waits with
//! explicit bounds and every field is independently guarded so one failure
//! never aborts the rest.
//!
//! The engine is organized around four pieces:
//!
//! - [`read_fields`] extracts one value per mapping from the source page.
//! - [`FieldWriter`] writes captured values into the target page using one
//!   of three type-specific interaction strategies.
//! - [`derive_ui_states`] computes a display state per enabled mapping
//!   from the read/write histories.
//! - [`SyncSession`] owns the state between operations and enforces the
//!   operation-level preconditions.

pub mod config;
pub mod errors;
pub mod page;
pub mod reader;
pub mod selector;
pub mod session;
pub mod state;
pub mod store;
#[cfg(test)]
mod tests;
pub mod types;
pub mod wait;
pub mod writer;

pub use config::{export_config, validate_import, SyncConfig, CONFIG_VERSION};
pub use errors::SyncError;
pub use page::{ElementImpl, Page, PageElement};
pub use reader::read_fields;
pub use selector::{derive_selector, DerivedSelector};
pub use session::{detect_page_type, PageType, SyncSession};
pub use state::{
    derive_ui_states, has_captured_data, secondary_text, LastOperation, UiFieldState, UiState,
};
pub use store::{CaptureStore, MemoryCaptureStore};
pub use types::{
    CapturedFieldRecord, FieldMapping, FieldResult, FieldType, ReadStatus, WriteResult,
    WriteStatus, URL_ID_SENTINEL,
};
pub use wait::{wait_for_element, wait_for_elements};
pub use writer::FieldWriter;
