//! API Client
//!
//! Talks to the analysis service from the browser.

pub mod client;

pub use client::{get_api_base, set_api_base, FetchAnalysisClient};
