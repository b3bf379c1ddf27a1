//! Scripted in-memory page double for integration tests.
//!
//! `MockPage` maps selector strings to nodes. Nodes are shared handles, so
//! a test can keep a clone for assertions while the engine interacts with
//! the same node through the page. Click hooks let a test script overlay
//! behavior: a combobox that reveals its options, a clear button that swaps
//! the lookup chip for the filter box.

#![allow(dead_code)]

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use fieldbridge::{ElementImpl, FieldWriter, Page, PageElement, SyncError};

type ClickHook = Box<dyn Fn(&Dom) + Send + Sync>;

/// The mutable selector-to-nodes map behind a page. Cloning shares it.
#[derive(Clone, Default)]
pub struct Dom {
    nodes: Arc<Mutex<HashMap<String, Vec<MockNode>>>>,
}

impl Dom {
    pub fn insert(&self, selector: &str, node: MockNode) {
        self.nodes
            .lock()
            .unwrap()
            .entry(selector.to_string())
            .or_default()
            .push(node);
    }

    pub fn remove(&self, selector: &str) {
        self.nodes.lock().unwrap().remove(selector);
    }

    fn first(&self, selector: &str) -> Option<MockNode> {
        self.nodes
            .lock()
            .unwrap()
            .get(selector)
            .and_then(|nodes| nodes.first().cloned())
    }

    fn all(&self, selector: &str) -> Vec<MockNode> {
        self.nodes
            .lock()
            .unwrap()
            .get(selector)
            .cloned()
            .unwrap_or_default()
    }
}

#[derive(Default)]
struct NodeState {
    value: Option<String>,
    text: String,
    title: Option<String>,
    label: Option<String>,
    /// Whether the native insertion command takes effect; when false the
    /// engine must fall back to the property setter plus event dispatch.
    accepts_insert: bool,
    /// When set, reading the value fails with this message.
    fail_value: Option<String>,
}

#[derive(Default)]
struct NodeInner {
    state: Mutex<NodeState>,
    click_hook: Mutex<Option<ClickHook>>,
    clicks: AtomicUsize,
    input_events: AtomicUsize,
}

/// A shared handle to one scripted element.
#[derive(Clone, Default)]
pub struct MockNode {
    inner: Arc<NodeInner>,
}

impl MockNode {
    pub fn new() -> Self {
        let node = Self::default();
        node.inner.state.lock().unwrap().accepts_insert = true;
        node
    }

    pub fn with_value(self, value: &str) -> Self {
        self.inner.state.lock().unwrap().value = Some(value.to_string());
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.inner.state.lock().unwrap().text = text.to_string();
        self
    }

    pub fn with_title(self, title: &str) -> Self {
        self.inner.state.lock().unwrap().title = Some(title.to_string());
        self
    }

    pub fn with_label(self, label: &str) -> Self {
        self.inner.state.lock().unwrap().label = Some(label.to_string());
        self
    }

    /// Make the native insertion command a no-op for this node.
    pub fn rejecting_insert(self) -> Self {
        self.inner.state.lock().unwrap().accepts_insert = false;
        self
    }

    /// Make value reads fail, as a detached element would.
    pub fn failing_value(self, message: &str) -> Self {
        self.inner.state.lock().unwrap().fail_value = Some(message.to_string());
        self
    }

    pub fn on_click(self, hook: impl Fn(&Dom) + Send + Sync + 'static) -> Self {
        *self.inner.click_hook.lock().unwrap() = Some(Box::new(hook));
        self
    }

    pub fn value(&self) -> Option<String> {
        self.inner.state.lock().unwrap().value.clone()
    }

    pub fn clicks(&self) -> usize {
        self.inner.clicks.load(Ordering::SeqCst)
    }

    pub fn input_events(&self) -> usize {
        self.inner.input_events.load(Ordering::SeqCst)
    }
}

struct MockElement {
    node: MockNode,
    dom: Dom,
}

impl fmt::Debug for MockElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockElement").finish_non_exhaustive()
    }
}

impl ElementImpl for MockElement {
    fn value(&self) -> Result<Option<String>, SyncError> {
        let state = self.node.inner.state.lock().unwrap();
        if let Some(message) = &state.fail_value {
            return Err(SyncError::PageError(message.clone()));
        }
        Ok(state.value.clone())
    }

    fn text(&self) -> Result<String, SyncError> {
        Ok(self.node.inner.state.lock().unwrap().text.clone())
    }

    fn title(&self) -> Result<Option<String>, SyncError> {
        Ok(self.node.inner.state.lock().unwrap().title.clone())
    }

    fn label(&self) -> Result<Option<String>, SyncError> {
        Ok(self.node.inner.state.lock().unwrap().label.clone())
    }

    fn click(&self) -> Result<(), SyncError> {
        self.node.inner.clicks.fetch_add(1, Ordering::SeqCst);
        if let Some(hook) = &*self.node.inner.click_hook.lock().unwrap() {
            hook(&self.dom);
        }
        Ok(())
    }

    fn focus(&self) -> Result<(), SyncError> {
        Ok(())
    }

    fn select_contents(&self) -> Result<(), SyncError> {
        Ok(())
    }

    fn insert_text(&self, text: &str) -> Result<(), SyncError> {
        let mut state = self.node.inner.state.lock().unwrap();
        if state.accepts_insert {
            // The engine selects the contents first, so insertion replaces.
            state.value = Some(text.to_string());
        }
        Ok(())
    }

    fn set_value(&self, value: &str) -> Result<(), SyncError> {
        self.node.inner.state.lock().unwrap().value = Some(value.to_string());
        Ok(())
    }

    fn notify_input(&self) -> Result<(), SyncError> {
        self.node.inner.input_events.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub struct MockPage {
    address: String,
    pub dom: Dom,
}

impl MockPage {
    pub fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
            dom: Dom::default(),
        }
    }

    pub fn insert(&self, selector: &str, node: MockNode) {
        self.dom.insert(selector, node);
    }
}

impl Page for MockPage {
    fn address(&self) -> String {
        self.address.clone()
    }

    fn query(&self, selector: &str) -> Result<Option<PageElement>, SyncError> {
        Ok(self.dom.first(selector).map(|node| {
            PageElement::new(Box::new(MockElement {
                node,
                dom: self.dom.clone(),
            }))
        }))
    }

    fn query_all(&self, selector: &str) -> Result<Vec<PageElement>, SyncError> {
        Ok(self
            .dom
            .all(selector)
            .into_iter()
            .map(|node| {
                PageElement::new(Box::new(MockElement {
                    node,
                    dom: self.dom.clone(),
                }))
            })
            .collect())
    }
}

/// A writer with timing knobs shrunk so timeout paths finish quickly.
pub fn fast_writer() -> FieldWriter {
    FieldWriter {
        settle_delay: Duration::from_millis(1),
        option_timeout: Duration::from_millis(150),
        reappear_timeout: Duration::from_millis(150),
        result_timeout: Duration::from_millis(150),
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_env_filter("debug").try_init();
}
