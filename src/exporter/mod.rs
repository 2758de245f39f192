//! Core export pipeline, split into focused submodules
//!
//! The [`DriveExporter`] facade and its run logic are organized by concern:
//! - [`classification`] - Content type to transfer strategy mapping
//! - [`pagination`] - Catalog page walking
//! - [`transfer`] - Chunked transfer execution for one item
//! - [`report`] - End-of-run failure report
//! - [`run`] - Run orchestration (page loop, accounting, summary)

pub mod classification;
mod pagination;
mod report;
mod run;
mod transfer;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::progress::{self, ProgressReceiver, ProgressSender};
use crate::session::{Credentials, Session};
use crate::store::{DriveStore, RemoteStore};

/// Bulk exporter facade (cloneable - all fields are cheaply shared)
///
/// Construction also creates the progress channel; the embedding application
/// keeps the [`ProgressReceiver`] and drains it for its log view while runs
/// execute on background tasks.
#[derive(Clone)]
pub struct DriveExporter {
    /// Remote catalog and content access
    pub(crate) store: Arc<dyn RemoteStore>,
    /// Configuration (shared across run tasks)
    pub(crate) config: Arc<Config>,
    /// Producer half of the progress channel
    pub(crate) progress: ProgressSender,
}

impl DriveExporter {
    /// Create an exporter backed by the Drive API
    ///
    /// Fails with a setup error when the credentials carry no usable token
    /// material, or when the configured base URL is invalid.
    pub fn new(config: Config, credentials: Credentials) -> Result<(Self, ProgressReceiver)> {
        let session = Arc::new(Session::new(credentials, &config.http)?);
        let store: Arc<dyn RemoteStore> = Arc::new(DriveStore::new(&config.http, session)?);
        Ok(Self::with_store(config, store))
    }

    /// Create an exporter over any [`RemoteStore`] implementation
    pub fn with_store(config: Config, store: Arc<dyn RemoteStore>) -> (Self, ProgressReceiver) {
        let (progress, receiver) = progress::channel();
        (
            Self {
                store,
                config: Arc::new(config),
                progress,
            },
            receiver,
        )
    }
}
