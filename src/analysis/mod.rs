//! Analysis Results
//!
//! The data returned by the analysis service and the chart projections
//! derived from it.
//!
//! ## Components
//!
//! - **types**: `AnalysisResult` and its parts, decoded from the service JSON
//! - **projection**: pie, bar and line chart record sequences
//! - **error**: `AnalysisError` and the banner messages it maps to

mod error;
mod projection;
mod types;

pub use error::{AnalysisError, FALLBACK_FAILURE_MESSAGE, STATUS_FAILURE_MESSAGE};
pub use projection::{
    bar_records, daily_points, pie_slices, slice_label, slice_shares, BarRecord, PieSlice,
};
pub use types::{AnalysisResult, CategoryTotals, DailyPoint, Summary};
