//! Core types for drive-export

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Opaque identifier for a remote item, assigned by the remote store
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    /// Create a new ItemId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry from the remote catalog listing
///
/// Immutable snapshot of what the listing endpoint reported; identity is the
/// [`ItemId`]. The declared content type drives classification, nothing else
/// about the item is inspected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteItem {
    /// Remote store identifier
    pub id: ItemId,
    /// Display name (becomes the local filename)
    pub name: String,
    /// Declared content type (MIME)
    pub content_type: String,
}

/// Portable format a native online document can be converted into
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Portable Document Format
    Pdf,
}

impl ExportFormat {
    /// MIME type sent to the conversion endpoint
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
        }
    }

    /// Filename extension appended to converted items
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
        }
    }
}

/// How a single item should be transferred, derived purely from its content type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferStrategy {
    /// Fetch the item's bytes as-is
    RawDownload,
    /// Ask the remote store for a server-side conversion, then fetch the result
    ConvertAndExport(ExportFormat),
    /// Content type not in the recognized set; the item is skipped silently
    Unsupported,
}

impl TransferStrategy {
    /// Whether this strategy produces a transfer at all
    pub fn is_supported(&self) -> bool {
        !matches!(self, TransferStrategy::Unsupported)
    }
}

/// Record of one item's transfer failure, retained for end-of-run reporting
///
/// Appended once per failed item, never mutated afterwards. Unsupported items
/// never produce one of these.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    /// Identifier of the item that failed
    pub item_id: ItemId,
    /// Name of the item that failed
    pub item_name: String,
    /// Human-readable description of what went wrong
    pub error: String,
}

/// Final accounting for one export run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    /// Total items returned across all listing pages, including skipped ones
    pub total_items_seen: u64,
    /// Items that completed successfully
    pub transferred: u64,
    /// Items skipped because their content type is not recognized
    pub skipped: u64,
    /// Per-item failures, in the order they occurred
    pub failures: Vec<FailureRecord>,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// When the run finished
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    /// Whether every transferred item completed without a failure
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Which retrieval path a transfer uses
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferKind {
    /// Raw byte download
    Download,
    /// Server-side conversion export
    Export,
}

impl std::fmt::Display for TransferKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransferKind::Download => write!(f, "download"),
            TransferKind::Export => write!(f, "export"),
        }
    }
}

/// Progress and lifecycle events emitted during an export run
///
/// Delivered in FIFO order over the progress channel. The [`Display`]
/// implementation renders each event as the human-readable line an embedding
/// interface appends to its log view.
///
/// [`Display`]: std::fmt::Display
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A listing page was fetched
    PageFetched {
        /// Number of items on the page
        items: usize,
    },

    /// A transfer began for one item
    TransferStarted {
        /// Item identifier
        id: ItemId,
        /// Item name
        name: String,
        /// Download or export
        kind: TransferKind,
    },

    /// One chunk of a transfer was written
    TransferProgress {
        /// Item name
        name: String,
        /// Percentage complete, when the content length is known
        percent: Option<f32>,
        /// Bytes written so far
        bytes_written: u64,
    },

    /// A completed transfer produced a zero-byte file (warning, not a failure)
    EmptyResult {
        /// Item name
        name: String,
    },

    /// A transfer finished successfully
    TransferComplete {
        /// Item identifier
        id: ItemId,
        /// Item name
        name: String,
        /// Download or export
        kind: TransferKind,
    },

    /// A transfer failed; the run continues with the next item
    TransferFailed {
        /// Item identifier
        id: ItemId,
        /// Item name
        name: String,
        /// Human-readable error description
        error: String,
    },

    /// The run finished; emitted exactly once on success or partial failure
    RunComplete {
        /// Total items seen across all pages
        total_items_seen: u64,
        /// Number of per-item failures
        failure_count: usize,
    },

    /// The failure report was written to disk
    ReportWritten {
        /// Location of the report file
        path: PathBuf,
    },

    /// The run aborted on a setup or pagination error
    RunFailed {
        /// Human-readable error description
        error: String,
    },
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::PageFetched { items } => {
                write!(f, "Fetched a page of {items} files")
            }
            Event::TransferStarted { name, kind, .. } => {
                write!(f, "Starting {kind} of file: {name}")
            }
            Event::TransferProgress {
                name,
                percent,
                bytes_written,
            } => match percent {
                Some(p) => write!(f, "Downloading {name}: {}%", *p as u32),
                None => write!(f, "Downloading {name}: {bytes_written} bytes"),
            },
            Event::EmptyResult { name } => {
                write!(f, "downloaded empty file: {name}")
            }
            Event::TransferComplete { name, kind, .. } => {
                write!(f, "Finished {kind} of file: {name}")
            }
            Event::TransferFailed { id, name, error } => {
                write!(f, "Error processing file {name} ({id}): {error}")
            }
            Event::RunComplete {
                total_items_seen, ..
            } => {
                write!(f, "Total number of files processed: {total_items_seen}")
            }
            Event::ReportWritten { path } => {
                write!(f, "Errors logged to {}", path.display())
            }
            Event::RunFailed { error } => {
                write!(f, "Error: {error}")
            }
        }
    }
}
