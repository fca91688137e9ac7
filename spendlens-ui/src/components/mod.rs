//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod charts;
pub mod drop_zone;
pub mod error_banner;
pub mod loading;

pub use charts::{BarChart, LineChart, PieChart};
pub use drop_zone::DropZone;
pub use error_banner::ErrorBanner;
pub use loading::Loading;
