//! Bounded waits for asynchronous UI appearance.
//!
//! Overlay content (dropdown options, search results) renders with
//! unpredictable timing, so the writer polls the whole document until a
//! selector matches or an explicit timeout expires. Expiry resolves to a
//! defined "not found" value, never an error and never an unbounded block.

use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::errors::SyncError;
use crate::page::{Page, PageElement};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Wait for a single element matching `selector` to appear.
///
/// Returns `Ok(None)` on timeout. Errors only when the page itself fails
/// to execute a query.
pub async fn wait_for_element(
    page: &dyn Page,
    selector: &str,
    timeout: Duration,
) -> Result<Option<PageElement>, SyncError> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(element) = page.query(selector)? {
            return Ok(Some(element));
        }
        if Instant::now() >= deadline {
            debug!(selector, ?timeout, "element did not appear before timeout");
            return Ok(None);
        }
        sleep(POLL_INTERVAL).await;
    }
}

/// Wait for one or more elements matching `selector` to appear.
///
/// Returns whatever matches at expiry, possibly an empty vec.
pub async fn wait_for_elements(
    page: &dyn Page,
    selector: &str,
    timeout: Duration,
) -> Result<Vec<PageElement>, SyncError> {
    let deadline = Instant::now() + timeout;
    loop {
        let found = page.query_all(selector)?;
        if !found.is_empty() {
            return Ok(found);
        }
        if Instant::now() >= deadline {
            debug!(selector, ?timeout, "no elements appeared before timeout");
            return Ok(found);
        }
        sleep(POLL_INTERVAL).await;
    }
}
