//! File classification — content type to transfer strategy
//!
//! Pure lookup over the fixed set of recognized content types. Anything
//! outside the set is [`Unsupported`] and gets skipped silently before any
//! transfer is attempted; an unrecognized type is not an error.
//!
//! [`Unsupported`]: TransferStrategy::Unsupported

use crate::types::{ExportFormat, TransferStrategy};

/// Raw PDF files, downloaded as-is
pub const MIME_PDF: &str = "application/pdf";

/// Native online documents, exported via server-side conversion
pub const MIME_DOCUMENT: &str = "application/vnd.google-apps.document";

/// Native online spreadsheets, exported via server-side conversion
pub const MIME_SPREADSHEET: &str = "application/vnd.google-apps.spreadsheet";

/// Map a declared content type to its transfer strategy
pub fn classify(content_type: &str) -> TransferStrategy {
    match content_type {
        MIME_PDF => TransferStrategy::RawDownload,
        MIME_DOCUMENT | MIME_SPREADSHEET => TransferStrategy::ConvertAndExport(ExportFormat::Pdf),
        _ => TransferStrategy::Unsupported,
    }
}
