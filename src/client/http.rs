//! Native HTTP client for the analysis service

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::path::Path;
use std::time::Duration;

use super::{AnalysisService, Endpoint, HealthStatus, UPLOAD_FIELD};
use crate::analysis::{AnalysisError, AnalysisResult};
use crate::intake::{FileCandidate, CSV_MIME};

/// CSV contents ready to upload
#[derive(Debug, Clone, PartialEq)]
pub struct CsvUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl CsvUpload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a selected local file
    pub async fn read(path: &Path) -> Result<Self, AnalysisError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        Ok(Self { file_name, bytes })
    }
}

/// Describe a local path for the upload surface
///
/// Local files carry no declared type, so the MIME is inferred from the
/// extension the same way a browser would.
pub fn path_candidate<P: AsRef<Path>>(path: P) -> FileCandidate<std::path::PathBuf> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let mime = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => CSV_MIME,
        _ => "",
    };
    FileCandidate::new(name, mime, path.to_path_buf())
}

/// Analysis service client over reqwest
pub struct HttpAnalysisClient {
    client: Client,
    endpoint: Endpoint,
}

impl HttpAnalysisClient {
    /// Create a client for `endpoint`
    ///
    /// With `timeout` unset, requests rely on the transport's own defaults.
    pub fn new(endpoint: Endpoint, timeout: Option<Duration>) -> Result<Self, AnalysisError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(map_reqwest_error)?;

        Ok(Self { client, endpoint })
    }

    /// Get the configured endpoint
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Check the service health endpoint
    pub async fn health(&self) -> Result<HealthStatus, AnalysisError> {
        let response = self
            .client
            .get(self.endpoint.health_url())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        if !response.status().is_success() {
            return Err(AnalysisError::Status(response.status().as_u16()));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait(?Send)]
impl AnalysisService for HttpAnalysisClient {
    type Upload = CsvUpload;

    async fn analyze(&self, upload: &CsvUpload) -> Result<AnalysisResult, AnalysisError> {
        let url = self.endpoint.analyze_url();

        tracing::info!(
            file = %upload.file_name,
            bytes = upload.bytes.len(),
            url = %url,
            "Submitting file for analysis"
        );

        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(CSV_MIME)
            .map_err(map_reqwest_error)?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(file = %upload.file_name, status = status.as_u16(), "Analysis request failed");
            return Err(AnalysisError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        let result: AnalysisResult = serde_json::from_slice(&body)?;

        tracing::info!(
            file = %upload.file_name,
            categories = result.by_category.len(),
            days = result.daily_spending.len(),
            "Analysis received"
        );

        Ok(result)
    }
}

fn map_reqwest_error(e: reqwest::Error) -> AnalysisError {
    if e.is_timeout() {
        AnalysisError::Timeout
    } else if e.is_decode() {
        AnalysisError::Decode(e.to_string())
    } else {
        AnalysisError::Transport(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_path_candidate_infers_csv_mime() {
        let candidate = path_candidate("/tmp/statements/jan.CSV");
        assert_eq!(candidate.name, "jan.CSV");
        assert_eq!(candidate.mime, "text/csv");
        assert_eq!(candidate.handle, PathBuf::from("/tmp/statements/jan.CSV"));

        let candidate = path_candidate("notes.txt");
        assert_eq!(candidate.mime, "");
    }

    #[tokio::test]
    async fn test_read_upload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feb.csv");
        std::fs::write(&path, "Date,Description,Amount\n2024-02-01,Rent,-800\n").unwrap();

        let upload = CsvUpload::read(&path).await.unwrap();
        assert_eq!(upload.file_name, "feb.csv");
        assert!(upload.bytes.starts_with(b"Date,"));
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let err = CsvUpload::read(Path::new("/nonexistent/spendlens.csv"))
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Io(_)));
    }

    #[test]
    fn test_client_keeps_endpoint() {
        let client = HttpAnalysisClient::new(Endpoint::new("http://example.test"), None).unwrap();
        assert_eq!(client.endpoint().base_url, "http://example.test");
    }
}
