//! # drive-export
//!
//! Backend library for bulk-exporting a cloud drive into a local folder.
//!
//! Walks the remote catalog page by page, classifies each item by its
//! declared content type, downloads raw PDFs as-is and converts native
//! online documents and spreadsheets into PDF via server-side export.
//! Per-item failures are collected into an end-of-run report instead of
//! aborting the run.
//!
//! ## Design Philosophy
//!
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Event-driven** - Progress arrives over a channel, no polling required
//! - **Partial-failure tolerant** - One bad item never sinks the run
//!
//! ## Quick Start
//!
//! ```no_run
//! use drive_export::{Config, Credentials, DriveExporter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Credentials {
//!         client_id: "client-id".to_string(),
//!         client_secret: "client-secret".to_string(),
//!         refresh_token: Some("refresh-token".to_string()),
//!         ..Default::default()
//!     };
//!
//!     let (exporter, progress) = DriveExporter::new(Config::default(), credentials)?;
//!
//!     // Render progress lines (e.g. append to a log view)
//!     let consumer = progress.spawn_consumer(|line| println!("{line}"));
//!
//!     let summary = exporter.start_run().await??;
//!     println!("processed {} items", summary.total_items_seen);
//!
//!     // Dropping the exporter closes the channel; the consumer drains and exits
//!     drop(exporter);
//!     consumer.await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Core export pipeline (decomposed into focused submodules)
pub mod exporter;
/// Progress channel between run tasks and an observer
pub mod progress;
/// Authenticated session with explicit refresh
pub mod session;
/// Remote store abstraction and the Drive implementation
pub mod store;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use config::{Config, ExportConfig, HttpConfig};
pub use error::{Error, Result, TransferError};
pub use exporter::DriveExporter;
pub use exporter::classification::classify;
pub use progress::{ProgressReceiver, ProgressSender};
pub use session::{Credentials, Session};
pub use store::{DriveStore, ItemContent, ListPage, RemoteStore};
pub use types::{
    Event, ExportFormat, FailureRecord, ItemId, RemoteItem, RunSummary, TransferKind,
    TransferStrategy,
};
