//! Configuration types for drive-export

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Export behavior configuration (destination, paging, failure report)
///
/// Groups settings related to where files land and how the remote catalog is
/// walked. Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Destination folder for exported files (default: "./exported")
    ///
    /// Created at run start if it does not exist.
    #[serde(default = "default_destination_dir")]
    pub destination_dir: PathBuf,

    /// Maximum items requested per listing page (default: 1000)
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Failure report filename, resolved inside the destination folder
    /// (default: "error_log.csv")
    ///
    /// Overwritten on every run that has failures; untouched otherwise.
    #[serde(default = "default_report_file_name")]
    pub report_file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            destination_dir: default_destination_dir(),
            page_size: default_page_size(),
            report_file_name: default_report_file_name(),
        }
    }
}

/// Remote endpoints and HTTP behavior
///
/// The defaults target the Google Drive v3 API; tests point `base_url` at a
/// local mock server instead.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Base URL of the remote catalog API (default: Google Drive v3)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// OAuth token endpoint used for refresh (default: Google OAuth2)
    #[serde(default = "default_token_url")]
    pub token_url: String,

    /// Timeout applied to listing and token requests (default: 30s)
    ///
    /// Content streams are not bounded by this timeout; a large transfer may
    /// legitimately outlive it.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token_url: default_token_url(),
            request_timeout: default_request_timeout(),
        }
    }
}

/// Main configuration for [`DriveExporter`](crate::exporter::DriveExporter)
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Export behavior settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Remote endpoint settings
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_destination_dir() -> PathBuf {
    PathBuf::from("./exported")
}

fn default_page_size() -> usize {
    1000
}

fn default_report_file_name() -> String {
    "error_log.csv".to_string()
}

fn default_base_url() -> String {
    "https://www.googleapis.com/drive/v3".to_string()
}

fn default_token_url() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}
