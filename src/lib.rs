//! # SpendLens
//!
//! Upload a CSV of financial transactions to an analysis service and chart
//! the returned spending breakdown.
//!
//! ## Pipeline
//!
//! ```text
//! UploadSurface -> AnalysisService -> Session/RequestState -> projections -> DashboardView
//! ```
//!
//! ## Modules
//!
//! - [`intake`]: drop / browse target accepting exactly one CSV file
//! - [`client`]: the `AnalysisService` seam and the native HTTP client
//! - [`session`]: request state machine and overlap policy
//! - [`analysis`]: result types and chart projections
//! - [`dashboard`]: panel composition and the text renderer
//! - [`config`]: TOML configuration (native only)
//!
//! ## Overlapping Uploads
//!
//! A new drop may start while an earlier request is still in flight. By
//! default ([`session::ResolutionPolicy::LatestIssued`]) the state follows
//! the most recently started request and older completions are discarded.
//! [`session::ResolutionPolicy::LastResolved`] instead lets whichever
//! response arrives last win.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use spendlens::client::{Endpoint, HttpAnalysisClient, CsvUpload};
//! use spendlens::dashboard::{DashboardView, TextRenderer};
//! use spendlens::intake::UploadSurface;
//! use spendlens::session::{run_analysis, Session};
//! use std::cell::RefCell;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpAnalysisClient::new(Endpoint::default(), None)?;
//!     let session = RefCell::new(Session::default());
//!
//!     let upload = CsvUpload::read("transactions.csv".as_ref()).await?;
//!     run_analysis(&session, &client, &upload).await;
//!
//!     let surface = UploadSurface::new();
//!     let mut renderer = TextRenderer::new();
//!     DashboardView::new(session.borrow().state(), &surface).render(&mut renderer);
//!     println!("{}", renderer.finish());
//!
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod client;
#[cfg(feature = "native")]
pub mod config;
pub mod dashboard;
pub mod intake;
pub mod session;

// Re-export top-level types for convenience
pub use analysis::{
    AnalysisError, AnalysisResult, BarRecord, CategoryTotals, DailyPoint, PieSlice, Summary,
};

pub use client::{AnalysisService, Endpoint, HealthStatus};

#[cfg(feature = "native")]
pub use client::{CsvUpload, HttpAnalysisClient};

pub use dashboard::{DashboardRenderer, DashboardView, Panel, TextRenderer};

pub use intake::{AcceptFilter, FileCandidate, IntakeEvent, Rejection, UploadSurface};

pub use session::{
    drive, run_analysis, RequestState, Resolution, ResolutionPolicy, Session, SessionConfig,
    SessionHandle, Ticket,
};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError, LoggingConfig, ServiceConfig};
