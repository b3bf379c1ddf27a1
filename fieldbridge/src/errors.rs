use thiserror::Error;

/// Operation-level failures of the sync engine.
///
/// Per-field failures never surface as `SyncError`: they are caught at the
/// field boundary and recorded in the corresponding result entry, so a read
/// or write invocation always yields one visible outcome per field.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Operation timed out: {0}")]
    Timeout(String),

    #[error("Wrong page type: {0}")]
    WrongPageType(String),

    #[error("No captured data available: {0}")]
    NoCapturedData(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Page error: {0}")]
    PageError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
