//! Session-level orchestration: current page type, capture and write
//! cycles, and UI state recomputation.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, instrument};

use crate::errors::SyncError;
use crate::page::Page;
use crate::reader::read_fields;
use crate::state::{derive_ui_states, LastOperation, UiFieldState};
use crate::store::{CaptureStore, MemoryCaptureStore};
use crate::types::{CapturedFieldRecord, FieldMapping, FieldResult, WriteResult};
use crate::writer::FieldWriter;

/// Which side of the sync a page belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageType {
    /// A source record page: values can be captured from it.
    Source,
    /// A target form page: captured values can be written into it.
    Target,
    /// Anything else, including pages whose address cannot be parsed. The
    /// safe default before any navigation has been observed.
    #[default]
    Unsupported,
}

/// Scheme, authority, and path of an address. Query and fragment are
/// irrelevant to classification.
static ADDRESS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://([^/?#]+)([^?#]*)").unwrap());

/// Classify a page address.
///
/// A source page must be a record page, not just any page on the source
/// host, so the path is checked as well. Malformed addresses classify as
/// `Unsupported` rather than erroring.
pub fn detect_page_type(address: &str) -> PageType {
    let Some(caps) = ADDRESS.captures(address) else {
        return PageType::Unsupported;
    };
    let authority = caps.get(1).map_or("", |m| m.as_str());
    let host = authority
        .rsplit('@')
        .next()
        .unwrap_or("")
        .split(':')
        .next()
        .unwrap_or("")
        .to_lowercase();
    let path = caps.get(2).map_or("", |m| m.as_str());

    if path.contains("/_workitems/")
        && (host == "dev.azure.com" || host.ends_with(".visualstudio.com"))
    {
        return PageType::Source;
    }
    if host.ends_with(".powerapps.com") || host.ends_with(".dynamics.com") {
        return PageType::Target;
    }
    PageType::Unsupported
}

#[derive(Debug, Default)]
struct SessionState {
    page_type: PageType,
    overwrite_mode: bool,
    last_write_results: Option<Vec<WriteResult>>,
    last_operation: Option<LastOperation>,
}

/// One user-facing sync session.
///
/// Owns the state the engine needs between operations: the current page
/// type (recomputed on navigation, defaulting to unsupported), the
/// overwrite flag, the persisted capture, and the in-memory write history.
/// Callers run at most one capture or write at a time; the session never
/// assumes it can lock the page against other writers.
pub struct SyncSession {
    store: Arc<dyn CaptureStore>,
    writer: FieldWriter,
    inner: RwLock<SessionState>,
}

impl SyncSession {
    pub fn new(store: Arc<dyn CaptureStore>) -> Self {
        Self {
            store,
            writer: FieldWriter::default(),
            inner: RwLock::new(SessionState::default()),
        }
    }

    /// A session backed by the in-memory capture store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryCaptureStore::default()))
    }

    /// Replace the writer, e.g. to adjust its timing knobs.
    pub fn with_writer(mut self, writer: FieldWriter) -> Self {
        self.writer = writer;
        self
    }

    fn state(&self) -> RwLockReadGuard<'_, SessionState> {
        self.inner.read().unwrap_or_else(|p| p.into_inner())
    }

    fn state_mut(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.inner.write().unwrap_or_else(|p| p.into_inner())
    }

    pub fn page_type(&self) -> PageType {
        self.state().page_type
    }

    /// Record a navigation or activation event and recompute the page type
    /// from the new address. This is the only place the page type changes.
    pub fn note_navigation(&self, address: &str) -> PageType {
        let page_type = detect_page_type(address);
        self.state_mut().page_type = page_type;
        debug!(address, ?page_type, "page type recomputed");
        page_type
    }

    pub fn overwrite_mode(&self) -> bool {
        self.state().overwrite_mode
    }

    pub fn set_overwrite_mode(&self, overwrite: bool) {
        self.state_mut().overwrite_mode = overwrite;
    }

    /// Read every enabled mapping from the source page and persist the
    /// outcome, replacing any previous capture wholesale.
    ///
    /// Error entries are persisted along with successes so failures survive
    /// a view refresh. Fails only on operation-level preconditions (wrong
    /// page type) or storage failure; per-field problems are in the results.
    #[instrument(skip(self, mappings, page))]
    pub async fn capture(
        &self,
        mappings: &[FieldMapping],
        page: &dyn Page,
    ) -> Result<Vec<FieldResult>, SyncError> {
        if self.page_type() != PageType::Source {
            return Err(SyncError::WrongPageType(
                "the current page is not a source record page".to_string(),
            ));
        }

        let enabled: Vec<FieldMapping> = mappings.iter().filter(|m| m.enabled).cloned().collect();
        let results = read_fields(&enabled, page);

        let records: Vec<CapturedFieldRecord> =
            results.iter().map(CapturedFieldRecord::from_read).collect();
        self.store.save(records).await?;

        self.state_mut().last_operation = Some(LastOperation::Read);
        Ok(results)
    }

    /// Write the persisted capture into the target page, one enabled
    /// mapping at a time.
    ///
    /// Fails only on operation-level preconditions (wrong page type, no
    /// captured data at all); per-field problems are in the results.
    #[instrument(skip(self, mappings, page))]
    pub async fn write(
        &self,
        mappings: &[FieldMapping],
        page: &dyn Page,
    ) -> Result<Vec<WriteResult>, SyncError> {
        if self.page_type() != PageType::Target {
            return Err(SyncError::WrongPageType(
                "the current page is not a target form page".to_string(),
            ));
        }
        let Some(captured) = self.store.load().await? else {
            return Err(SyncError::NoCapturedData(
                "capture a record before writing".to_string(),
            ));
        };

        let overwrite = self.overwrite_mode();
        let results = self.writer.write_fields(page, &captured, mappings, overwrite).await;

        let mut state = self.state_mut();
        state.last_write_results = Some(results.clone());
        state.last_operation = Some(LastOperation::Write);
        drop(state);

        Ok(results)
    }

    /// Recompute the display state of every enabled mapping from the
    /// persisted capture and the in-memory write history.
    pub async fn ui_states(
        &self,
        mappings: &[FieldMapping],
    ) -> Result<Vec<UiFieldState>, SyncError> {
        let enabled: Vec<FieldMapping> = mappings.iter().filter(|m| m.enabled).cloned().collect();
        let captured = self.store.load().await?;
        let (last_write_results, last_operation) = {
            let state = self.state();
            (state.last_write_results.clone(), state.last_operation)
        };
        Ok(derive_ui_states(
            &enabled,
            captured.as_deref(),
            last_write_results.as_deref(),
            last_operation,
        ))
    }

    /// Discard the persisted capture and the in-memory write history.
    pub async fn clear_capture(&self) -> Result<(), SyncError> {
        self.store.clear().await?;
        let mut state = self.state_mut();
        state.last_write_results = None;
        state.last_operation = None;
        Ok(())
    }
}
