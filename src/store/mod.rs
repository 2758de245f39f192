//! Remote store abstraction and the Drive implementation
//!
//! [`RemoteStore`] is the seam between the export pipeline and the actual
//! cloud service: a paged catalog listing plus two chunked content paths (raw
//! bytes and server-side conversion). The production implementation is
//! [`DriveStore`]; tests substitute in-memory stores.

mod drive;

pub use drive::DriveStore;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

use crate::error::Result;
use crate::types::{ExportFormat, RemoteItem};

/// One page of the remote catalog listing
#[derive(Debug, Clone)]
pub struct ListPage {
    /// Items on this page, in catalog order
    pub items: Vec<RemoteItem>,
    /// Token for the next page; `None` means the listing is exhausted
    pub next_page_token: Option<String>,
}

/// Chunked content stream for one item
pub struct ItemContent {
    /// Total content length in bytes, when the server reports one
    ///
    /// Conversion exports typically omit it, so progress falls back to a
    /// byte count instead of a percentage.
    pub len: Option<u64>,
    /// The chunk stream; each item is one chunk in delivery order
    pub stream: BoxStream<'static, Result<Bytes>>,
}

impl std::fmt::Debug for ItemContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemContent")
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

impl ItemContent {
    /// Wrap a chunk stream with a known total length
    pub fn new(len: Option<u64>, stream: BoxStream<'static, Result<Bytes>>) -> Self {
        Self { len, stream }
    }
}

/// Access to the remote catalog and its content endpoints
///
/// All methods require a live authenticated session; implementations handle
/// token attachment themselves.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetch one listing page
    ///
    /// Pass the token returned by the previous call (or `None` for the first
    /// page). `page_size` caps the number of items returned; the final page
    /// carries no `next_page_token`.
    async fn next_page(&self, page_token: Option<&str>, page_size: usize) -> Result<ListPage>;

    /// Open a chunked stream of the item's raw bytes
    async fn open_content(&self, id: &str) -> Result<ItemContent>;

    /// Request a server-side conversion into `format` and open a chunked
    /// stream of the converted representation
    async fn open_export(&self, id: &str, format: ExportFormat) -> Result<ItemContent>;
}
