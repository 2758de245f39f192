//! Run orchestration — drives pagination, classification, and transfers
//!
//! One run walks the whole catalog: `setup validation -> page loop ->
//! (classify -> transfer)* -> summary -> failure report`. Per-item transfer
//! failures are recorded and the run continues; setup and pagination errors
//! abort it.

use chrono::Utc;

use super::DriveExporter;
use super::classification::classify;
use super::pagination::Paginator;
use super::report::write_failure_report;
use super::transfer::run_transfer;
use crate::error::{Error, Result};
use crate::types::{Event, FailureRecord, RunSummary};

impl DriveExporter {
    /// Execute one export run end-to-end, on the caller's task
    ///
    /// Transfers run strictly one at a time; the observed remote service
    /// rate-limits aggressively enough that serial transfers are the
    /// deliberate trade here.
    ///
    /// # Errors
    ///
    /// [`Error::Setup`] when the destination folder cannot be created,
    /// [`Error::Pagination`] when a listing page fails mid-stream, and I/O
    /// errors from writing the failure report. Per-item transfer failures do
    /// not error; they appear in the returned summary.
    pub async fn run(&self) -> Result<RunSummary> {
        let started_at = Utc::now();
        self.validate_setup().await?;

        let mut paginator = Paginator::new(self.store.clone(), self.config.export.page_size);
        let mut total_items_seen: u64 = 0;
        let mut transferred: u64 = 0;
        let mut skipped: u64 = 0;
        let mut failures: Vec<FailureRecord> = Vec::new();

        while let Some(items) = paginator.next_page().await? {
            self.progress.emit(Event::PageFetched { items: items.len() });
            total_items_seen += items.len() as u64;

            for item in items {
                let strategy = classify(&item.content_type);
                if !strategy.is_supported() {
                    tracing::debug!(
                        item_id = %item.id,
                        content_type = %item.content_type,
                        "skipping unsupported content type"
                    );
                    skipped += 1;
                    continue;
                }

                match run_transfer(
                    self.store.as_ref(),
                    &self.progress,
                    &item,
                    strategy,
                    &self.config.export.destination_dir,
                )
                .await
                {
                    Ok(_) => transferred += 1,
                    Err(e) => {
                        let error = e.to_string();
                        tracing::error!(
                            item_id = %item.id,
                            item_name = %item.name,
                            error = %error,
                            "transfer failed, continuing with next item"
                        );
                        self.progress.emit(Event::TransferFailed {
                            id: item.id.clone(),
                            name: item.name.clone(),
                            error: error.clone(),
                        });
                        failures.push(FailureRecord {
                            item_id: item.id,
                            item_name: item.name,
                            error,
                        });
                    }
                }
            }
        }

        let summary = RunSummary {
            total_items_seen,
            transferred,
            skipped,
            failures,
            started_at,
            finished_at: Utc::now(),
        };

        tracing::info!(
            total = summary.total_items_seen,
            transferred = summary.transferred,
            skipped = summary.skipped,
            failed = summary.failures.len(),
            "export run complete"
        );
        self.progress.emit(Event::RunComplete {
            total_items_seen: summary.total_items_seen,
            failure_count: summary.failures.len(),
        });

        if !summary.failures.is_empty() {
            let report_path = self
                .config
                .export
                .destination_dir
                .join(&self.config.export.report_file_name);
            write_failure_report(&report_path, &summary.failures).await?;
            self.progress.emit(Event::ReportWritten {
                path: report_path.clone(),
            });
            tracing::info!(path = %report_path.display(), "failure report written");
        }

        Ok(summary)
    }

    /// Start an export run on a background task
    ///
    /// Returns immediately; progress arrives over the channel created with
    /// the exporter and a fatal error additionally surfaces as
    /// [`Event::RunFailed`] so an interface can show it without joining the
    /// handle.
    pub fn start_run(&self) -> tokio::task::JoinHandle<Result<RunSummary>> {
        let exporter = self.clone();
        tokio::spawn(async move {
            match exporter.run().await {
                Ok(summary) => Ok(summary),
                Err(e) => {
                    tracing::error!(error = %e, "export run failed");
                    exporter.progress.emit(Event::RunFailed {
                        error: e.to_string(),
                    });
                    Err(e)
                }
            }
        })
    }

    /// Validate run preconditions before touching the remote catalog
    async fn validate_setup(&self) -> Result<()> {
        if self.config.export.page_size == 0 {
            return Err(Error::setup("page_size must be at least 1"));
        }

        let destination = &self.config.export.destination_dir;
        tokio::fs::create_dir_all(destination).await.map_err(|e| {
            Error::setup(format!(
                "destination folder {} is not usable: {e}",
                destination.display()
            ))
        })?;

        Ok(())
    }
}
