//! Failure report — tabular end-of-run record of per-item failures

use std::borrow::Cow;
use std::path::Path;

use crate::types::FailureRecord;

/// Column headers, matching the report's historical layout
const HEADER: &str = "File ID,File Name,Error";

/// Write the failure report as CSV, overwriting any prior report
///
/// Callers only invoke this when `failures` is non-empty; an empty slice
/// still produces a valid header-only file.
pub(crate) async fn write_failure_report(
    path: &Path,
    failures: &[FailureRecord],
) -> std::io::Result<()> {
    let mut out = String::with_capacity(64 * (failures.len() + 1));
    out.push_str(HEADER);
    out.push_str("\r\n");

    for failure in failures {
        out.push_str(&csv_field(failure.item_id.as_str()));
        out.push(',');
        out.push_str(&csv_field(&failure.item_name));
        out.push(',');
        out.push_str(&csv_field(&failure.error));
        out.push_str("\r\n");
    }

    tokio::fs::write(path, out).await
}

/// Quote a CSV field when it contains a delimiter, quote, or line break
fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}
