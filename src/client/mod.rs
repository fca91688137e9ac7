//! Analysis Service Client
//!
//! The seam between the dashboard and the remote analysis service.
//!
//! [`AnalysisService`] is implemented by the native reqwest client
//! ([`HttpAnalysisClient`]), by the browser fetch client in `spendlens-ui`,
//! and by in-memory doubles in tests. Each implementation picks its own
//! upload handle type: file bytes natively, a `web_sys::File` in the browser.

#[cfg(feature = "native")]
mod http;

#[cfg(feature = "native")]
pub use http::{path_candidate, CsvUpload, HttpAnalysisClient};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisError, AnalysisResult};

/// Default analysis service location
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Upload endpoint path
pub const DEFAULT_ANALYZE_PATH: &str = "/api/analyze";

/// Health check path
pub const DEFAULT_HEALTH_PATH: &str = "/health";

/// Multipart field carrying the CSV bytes
pub const UPLOAD_FIELD: &str = "file";

/// Something that can turn an uploaded CSV into an analysis result
///
/// Futures are not required to be `Send`: the dashboard drives requests on a
/// single cooperative thread, natively and in the browser alike.
#[async_trait(?Send)]
pub trait AnalysisService {
    /// Platform handle for the file being uploaded
    type Upload;

    /// Send one file for analysis. Exactly one request per call, no retry.
    async fn analyze(&self, upload: &Self::Upload) -> Result<AnalysisResult, AnalysisError>;
}

/// Where the analysis service lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_analyze_path")]
    pub analyze_path: String,

    #[serde(default = "default_health_path")]
    pub health_path: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_analyze_path() -> String {
    DEFAULT_ANALYZE_PATH.to_string()
}

fn default_health_path() -> String {
    DEFAULT_HEALTH_PATH.to_string()
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            analyze_path: default_analyze_path(),
            health_path: default_health_path(),
        }
    }
}

impl Endpoint {
    /// Endpoint at `base_url` with the default paths
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Full URL of the upload endpoint
    pub fn analyze_url(&self) -> String {
        join_url(&self.base_url, &self.analyze_path)
    }

    /// Full URL of the health check
    pub fn health_url(&self) -> String {
        join_url(&self.base_url, &self.health_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Body of the health check response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}
