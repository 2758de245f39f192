//! Transfer executor — one chunked transfer for a single remote item
//!
//! Streams the item's content (raw or server-converted) to the destination
//! file chunk by chunk, emitting a progress event after each chunk. Every
//! error is caught at this boundary and returned as a [`TransferError`]; it
//! never propagates and never aborts sibling transfers.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use tokio::io::AsyncWriteExt;

use crate::error::TransferError;
use crate::progress::ProgressSender;
use crate::store::RemoteStore;
use crate::types::{Event, ExportFormat, RemoteItem, TransferKind, TransferStrategy};

/// Resolved transfer parameters for one supported item
struct TransferPlan {
    kind: TransferKind,
    dest_path: PathBuf,
    /// `Some` when the item needs server-side conversion first
    format: Option<ExportFormat>,
}

/// Execute one transfer, writing exactly one file at the destination
///
/// Returns the written path, or `Ok(None)` for an unsupported strategy (the
/// orchestrator filters those before dispatch, so this is a no-op guard, not
/// a failure). An existing file at the destination is overwritten silently.
pub(crate) async fn run_transfer(
    store: &dyn RemoteStore,
    progress: &ProgressSender,
    item: &RemoteItem,
    strategy: TransferStrategy,
    destination_dir: &Path,
) -> Result<Option<PathBuf>, TransferError> {
    let plan = match strategy {
        TransferStrategy::RawDownload => TransferPlan {
            kind: TransferKind::Download,
            dest_path: destination_dir.join(&item.name),
            format: None,
        },
        TransferStrategy::ConvertAndExport(format) => TransferPlan {
            kind: TransferKind::Export,
            dest_path: destination_dir.join(format!("{}.{}", item.name, format.extension())),
            format: Some(format),
        },
        TransferStrategy::Unsupported => return Ok(None),
    };

    progress.emit(Event::TransferStarted {
        id: item.id.clone(),
        name: item.name.clone(),
        kind: plan.kind,
    });
    tracing::info!(item_id = %item.id, item_name = %item.name, kind = %plan.kind, "transfer started");

    let content = match plan.format {
        None => store.open_content(item.id.as_str()).await,
        Some(format) => store.open_export(item.id.as_str(), format).await,
    }
    .map_err(|e| TransferError::Open(e.to_string()))?;

    let total_len = content.len;
    let mut stream = content.stream;
    let mut file = tokio::fs::File::create(&plan.dest_path).await?;
    let mut written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let bytes = chunk.map_err(|e| TransferError::Stream(e.to_string()))?;
        file.write_all(&bytes).await?;
        written += bytes.len() as u64;

        let percent = total_len
            .filter(|len| *len > 0)
            .map(|len| (written as f32 / len as f32) * 100.0);
        progress.emit(Event::TransferProgress {
            name: item.name.clone(),
            percent,
            bytes_written: written,
        });
    }

    file.flush().await?;

    if written == 0 {
        // Zero bytes is a diagnostic, not a failure: the transfer completed
        tracing::warn!(item_id = %item.id, item_name = %item.name, "transfer produced an empty file");
        progress.emit(Event::EmptyResult {
            name: item.name.clone(),
        });
    }

    progress.emit(Event::TransferComplete {
        id: item.id.clone(),
        name: item.name.clone(),
        kind: plan.kind,
    });
    tracing::info!(item_id = %item.id, bytes = written, "transfer complete");

    Ok(Some(plan.dest_path))
}
