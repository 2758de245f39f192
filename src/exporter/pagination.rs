//! Listing pagination — walks the remote catalog page by page

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::store::RemoteStore;
use crate::types::RemoteItem;

/// Stateful walker over the remote catalog listing
///
/// Call [`next_page`](Paginator::next_page) until it returns `Ok(None)`. Any
/// store error is fatal: listing state cannot be reconstructed once a page
/// fails mid-stream, so the error surfaces as [`Error::Pagination`] and the
/// walker refuses further calls.
pub(crate) struct Paginator {
    store: Arc<dyn RemoteStore>,
    page_size: usize,
    next_token: Option<String>,
    exhausted: bool,
}

impl Paginator {
    pub(crate) fn new(store: Arc<dyn RemoteStore>, page_size: usize) -> Self {
        Self {
            store,
            page_size,
            next_token: None,
            exhausted: false,
        }
    }

    /// Fetch the next listing page, or `None` once the catalog is exhausted
    ///
    /// The first call always hits the store; afterwards the walker keeps
    /// fetching while the previous page carried a continuation token.
    pub(crate) async fn next_page(&mut self) -> Result<Option<Vec<RemoteItem>>> {
        if self.exhausted {
            return Ok(None);
        }

        let page = self
            .store
            .next_page(self.next_token.as_deref(), self.page_size)
            .await
            .map_err(|e| {
                self.exhausted = true;
                Error::Pagination(e.to_string())
            })?;

        self.next_token = page.next_page_token;
        if self.next_token.is_none() {
            self.exhausted = true;
        }

        Ok(Some(page.items))
    }
}
