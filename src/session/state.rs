//! Request state machine

use crate::analysis::AnalysisResult;

/// What the dashboard is currently showing
///
/// `Ready` and `Failed` last until the next upload starts, which always moves
/// the state back to `Loading`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    /// Nothing uploaded yet
    #[default]
    Idle,
    /// A request is in flight
    Loading,
    /// The latest applied request succeeded
    Ready(AnalysisResult),
    /// The latest applied request failed; holds the banner message
    Failed(String),
}

impl RequestState {
    pub fn is_idle(&self) -> bool {
        matches!(self, RequestState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, RequestState::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RequestState::Failed(_))
    }

    /// The analysis result, when `Ready`
    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            RequestState::Ready(result) => Some(result),
            _ => None,
        }
    }

    /// The failure message, when `Failed`
    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Short name for logs
    pub fn label(&self) -> &'static str {
        match self {
            RequestState::Idle => "idle",
            RequestState::Loading => "loading",
            RequestState::Ready(_) => "ready",
            RequestState::Failed(_) => "failed",
        }
    }
}
