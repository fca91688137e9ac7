//! Fetch-based analysis client
//!
//! Uploads the selected `File` as multipart form data with gloo-net.

use async_trait::async_trait;
use gloo_net::http::Request;
use web_sys::{File, FormData};

use spendlens::client::{AnalysisService, Endpoint, DEFAULT_BASE_URL, UPLOAD_FIELD};
use spendlens::{AnalysisError, AnalysisResult};

/// Local storage key holding an alternate service URL
const API_URL_KEY: &str = "spendlens_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    url.trim_end_matches('/').to_string()
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(API_URL_KEY, url);
        }
    }
}

/// Analysis service client over the browser fetch API
#[derive(Debug, Clone)]
pub struct FetchAnalysisClient {
    endpoint: Endpoint,
}

impl FetchAnalysisClient {
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    /// Client for the URL configured in local storage
    pub fn from_storage() -> Self {
        Self::new(Endpoint::new(get_api_base()))
    }
}

#[async_trait(?Send)]
impl AnalysisService for FetchAnalysisClient {
    type Upload = File;

    async fn analyze(&self, file: &File) -> Result<AnalysisResult, AnalysisError> {
        let form = FormData::new().map_err(js_error)?;
        form.append_with_blob_and_filename(UPLOAD_FIELD, file, &file.name())
            .map_err(js_error)?;

        let response = Request::post(&self.endpoint.analyze_url())
            .body(form)
            .map_err(transport_error)?
            .send()
            .await
            .map_err(transport_error)?;

        if !response.ok() {
            web_sys::console::warn_1(
                &format!("Analysis of {} failed with status {}", file.name(), response.status())
                    .into(),
            );
            return Err(AnalysisError::Status(response.status()));
        }

        let body = response.text().await.map_err(transport_error)?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn transport_error(e: gloo_net::Error) -> AnalysisError {
    AnalysisError::Transport(e.to_string())
}

fn js_error(e: wasm_bindgen::JsValue) -> AnalysisError {
    AnalysisError::Transport(e.as_string().unwrap_or_default())
}
