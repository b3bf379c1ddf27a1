//! Abstraction over a live, uncontrolled web page.
//!
//! The engine never owns the page: it is an external, mutable resource that
//! other writers (including the human user) can change at any time, where
//! elements render in detached overlays with unpredictable timing. Every
//! element operation therefore returns a `Result` and callers treat any
//! failure as a per-field outcome rather than a fatal condition.

use std::fmt::Debug;

use crate::errors::SyncError;

/// A handle to the current source or target page.
///
/// Implementations bridge to whatever executes queries in the real page
/// context (a DOM, a debugging protocol, a scripted test double). Queries
/// are snapshots; a returned element may be detached by the time it is used.
pub trait Page: Send + Sync {
    /// Full address (URL) of the page.
    fn address(&self) -> String;

    /// First element matching `selector`, or `None` when nothing matches.
    fn query(&self, selector: &str) -> Result<Option<PageElement>, SyncError>;

    /// All elements matching `selector`, in document order. Overlay content
    /// rendered outside any particular subtree is still visible here: the
    /// query observes the whole document.
    fn query_all(&self, selector: &str) -> Result<Vec<PageElement>, SyncError>;
}

/// Backend operations on a single page element.
///
/// Mirrors the small set of interactions the write strategies need. No
/// method here can submit or save a form; every interaction is scoped to
/// the element itself.
pub trait ElementImpl: Send + Sync + Debug {
    /// Input-style value property, if the element has one.
    fn value(&self) -> Result<Option<String>, SyncError>;

    /// Rendered text content.
    fn text(&self) -> Result<String, SyncError>;

    /// Displayed title, if any (a combobox shows its current choice here).
    fn title(&self) -> Result<Option<String>, SyncError>;

    /// Accessible label, if any.
    fn label(&self) -> Result<Option<String>, SyncError>;

    fn click(&self) -> Result<(), SyncError>;

    fn focus(&self) -> Result<(), SyncError>;

    /// Select the element's current contents so subsequent insertion
    /// replaces rather than appends.
    fn select_contents(&self) -> Result<(), SyncError>;

    /// Native text-insertion command. Fires a real input event that the
    /// page's reactive framework observes; may be a no-op in some contexts,
    /// which callers detect by re-reading `value`.
    fn insert_text(&self, text: &str) -> Result<(), SyncError>;

    /// Set the value through the underlying property, bypassing any
    /// framework-level interception.
    fn set_value(&self, value: &str) -> Result<(), SyncError>;

    /// Explicitly dispatch input/change notification events.
    fn notify_input(&self) -> Result<(), SyncError>;
}

/// A page element handle.
#[derive(Debug)]
pub struct PageElement {
    inner: Box<dyn ElementImpl>,
}

impl PageElement {
    pub fn new(inner: Box<dyn ElementImpl>) -> Self {
        Self { inner }
    }

    pub fn value(&self) -> Result<Option<String>, SyncError> {
        self.inner.value()
    }

    pub fn text(&self) -> Result<String, SyncError> {
        self.inner.text()
    }

    pub fn title(&self) -> Result<Option<String>, SyncError> {
        self.inner.title()
    }

    pub fn label(&self) -> Result<Option<String>, SyncError> {
        self.inner.label()
    }

    pub fn click(&self) -> Result<(), SyncError> {
        self.inner.click()
    }

    pub fn focus(&self) -> Result<(), SyncError> {
        self.inner.focus()
    }

    pub fn select_contents(&self) -> Result<(), SyncError> {
        self.inner.select_contents()
    }

    pub fn insert_text(&self, text: &str) -> Result<(), SyncError> {
        self.inner.insert_text(text)
    }

    pub fn set_value(&self, value: &str) -> Result<(), SyncError> {
        self.inner.set_value(value)
    }

    pub fn notify_input(&self) -> Result<(), SyncError> {
        self.inner.notify_input()
    }
}
