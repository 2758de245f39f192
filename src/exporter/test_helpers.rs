//! Shared test helpers: an in-memory remote store with scripted pages and
//! content, plus an exporter factory wired to a temp destination.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use tempfile::tempdir;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::exporter::DriveExporter;
use crate::exporter::classification::{MIME_DOCUMENT, MIME_PDF};
use crate::progress::ProgressReceiver;
use crate::store::{ItemContent, ListPage, RemoteStore};
use crate::types::{ExportFormat, ItemId, RemoteItem};

/// Scripted content behavior for one item
#[derive(Clone)]
pub(crate) enum MockContent {
    /// Chunks delivered successfully, advertising the total length
    Bytes(Vec<Vec<u8>>),
    /// Delivers the given chunks, then errors mid-stream
    FailsAfter(Vec<Vec<u8>>, String),
    /// Opening the stream fails outright
    FailsToOpen(String),
}

/// In-memory [`RemoteStore`] with scripted listing pages and content
pub(crate) struct MockStore {
    pages: Vec<Vec<RemoteItem>>,
    content: HashMap<String, MockContent>,
    /// Page index at which the listing errors, if any
    fail_listing_at: Option<usize>,
    pub(crate) page_calls: AtomicUsize,
    pub(crate) raw_opens: AtomicUsize,
    pub(crate) export_opens: AtomicUsize,
}

impl MockStore {
    pub(crate) fn with_pages(pages: Vec<Vec<RemoteItem>>) -> Self {
        Self {
            pages,
            content: HashMap::new(),
            fail_listing_at: None,
            page_calls: AtomicUsize::new(0),
            raw_opens: AtomicUsize::new(0),
            export_opens: AtomicUsize::new(0),
        }
    }

    pub(crate) fn insert_content(mut self, id: &str, content: MockContent) -> Self {
        self.content.insert(id.to_string(), content);
        self
    }

    pub(crate) fn fail_listing_at(mut self, page_index: usize) -> Self {
        self.fail_listing_at = Some(page_index);
        self
    }

    fn open(&self, id: &str) -> Result<ItemContent> {
        match self.content.get(id) {
            None => Err(Error::Api {
                status: 404,
                body: format!("no content scripted for {id}"),
            }),
            Some(MockContent::FailsToOpen(message)) => Err(Error::Api {
                status: 500,
                body: message.clone(),
            }),
            Some(MockContent::Bytes(chunks)) => {
                let len: u64 = chunks.iter().map(|c| c.len() as u64).sum();
                let items: Vec<Result<Bytes>> = chunks
                    .iter()
                    .map(|c| Ok(Bytes::from(c.clone())))
                    .collect();
                Ok(ItemContent::new(Some(len), Box::pin(stream::iter(items))))
            }
            Some(MockContent::FailsAfter(chunks, message)) => {
                let mut items: Vec<Result<Bytes>> = chunks
                    .iter()
                    .map(|c| Ok(Bytes::from(c.clone())))
                    .collect();
                items.push(Err(Error::Api {
                    status: 500,
                    body: message.clone(),
                }));
                Ok(ItemContent::new(None, Box::pin(stream::iter(items))))
            }
        }
    }
}

#[async_trait]
impl RemoteStore for MockStore {
    async fn next_page(&self, page_token: Option<&str>, _page_size: usize) -> Result<ListPage> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);

        let index = match page_token {
            None => 0,
            Some(token) => token
                .strip_prefix('T')
                .and_then(|n| n.parse::<usize>().ok())
                .unwrap_or_else(|| panic!("unexpected page token {token}")),
        };

        if self.fail_listing_at == Some(index) {
            return Err(Error::Api {
                status: 500,
                body: "listing backend unavailable".to_string(),
            });
        }

        let items = self.pages.get(index).cloned().unwrap_or_default();
        let next_page_token = if index + 1 < self.pages.len() {
            Some(format!("T{}", index + 1))
        } else {
            None
        };

        Ok(ListPage {
            items,
            next_page_token,
        })
    }

    async fn open_content(&self, id: &str) -> Result<ItemContent> {
        self.raw_opens.fetch_add(1, Ordering::SeqCst);
        self.open(id)
    }

    async fn open_export(&self, id: &str, _format: ExportFormat) -> Result<ItemContent> {
        self.export_opens.fetch_add(1, Ordering::SeqCst);
        self.open(id)
    }
}

/// Create an exporter over a mock store, with the destination inside a temp
/// directory. The tempdir must be kept alive for the test's duration.
pub(crate) fn create_test_exporter(
    store: Arc<MockStore>,
) -> (DriveExporter, ProgressReceiver, tempfile::TempDir) {
    let temp_dir = tempdir().unwrap();
    let mut config = Config::default();
    config.export.destination_dir = temp_dir.path().join("exported");

    let (exporter, receiver) = DriveExporter::with_store(config, store);
    (exporter, receiver, temp_dir)
}

/// Drain every event currently reachable from the receiver
///
/// The caller must drop the exporter (the last sender) first, otherwise this
/// never observes end-of-stream.
pub(crate) async fn drain_events(mut receiver: ProgressReceiver) -> Vec<crate::types::Event> {
    let mut events = Vec::new();
    while let Some(event) = receiver.recv().await {
        events.push(event);
    }
    events
}

pub(crate) fn pdf_item(id: &str, name: &str) -> RemoteItem {
    item(id, name, MIME_PDF)
}

pub(crate) fn doc_item(id: &str, name: &str) -> RemoteItem {
    item(id, name, MIME_DOCUMENT)
}

pub(crate) fn item(id: &str, name: &str, content_type: &str) -> RemoteItem {
    RemoteItem {
        id: ItemId::new(id),
        name: name.to_string(),
        content_type: content_type.to_string(),
    }
}
