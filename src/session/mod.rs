//! Request Session
//!
//! The request lifecycle behind the dashboard: a single [`RequestState`] cell
//! moved between `Idle`, `Loading`, `Ready` and `Failed` by the drop handler
//! and by request completions.
//!
//! ## Concurrency
//!
//! Requests run on one cooperative thread. The session is only touched in
//! short synchronous sections through a [`SessionHandle`], never across an
//! await, so two uploads in flight interleave safely without locks. Which
//! completion gets to update the state is decided by the
//! [`ResolutionPolicy`]:
//!
//! - `LatestIssued`: each request holds a [`Ticket`]; only the most recently
//!   issued ticket may resolve the state, older completions are discarded.
//! - `LastResolved`: no fencing; whichever request finishes last wins.
//!
//! The default is `LatestIssued`: when a slow upload finishes after a newer
//! one, the newer upload's result stays on screen. Select `LastResolved` in
//! [`SessionConfig`] to let the last response to arrive replace the state.

mod state;

pub use state::RequestState;

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::future::Future;

use crate::analysis::{AnalysisError, AnalysisResult};
use crate::client::AnalysisService;
use crate::intake::{FileCandidate, IntakeEvent, Rejection};

/// Which completion may update the state when requests overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "native", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionPolicy {
    /// Only the most recently started request counts
    #[default]
    LatestIssued,
    /// The most recently finished request counts
    LastResolved,
}

/// Session behaviour settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub policy: ResolutionPolicy,

    /// Show rejected drops in the error banner instead of ignoring them
    #[serde(default)]
    pub report_rejections: bool,
}

/// Sequence number handed out when a request starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

/// What happened to a completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The outcome replaced the current state
    Applied,
    /// A newer request was issued; the outcome was dropped
    Discarded,
}

/// One dashboard session's request state
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: RequestState,
    config: SessionConfig,
    issued: u64,
    in_flight: usize,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Requests started but not yet resolved
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Handle an event from the upload surface
    ///
    /// Returns the selected file when a request should be started. Rejections
    /// never start a request; they only reach the state when
    /// `report_rejections` is set.
    pub fn accept<F>(&mut self, event: IntakeEvent<F>) -> Option<FileCandidate<F>> {
        match event {
            IntakeEvent::FileSelected(file) => Some(file),
            IntakeEvent::FileRejected(rejection) => {
                self.reject(&rejection);
                None
            }
        }
    }

    /// Record a rejected drop
    pub fn reject(&mut self, rejection: &Rejection) {
        if self.config.report_rejections {
            tracing::debug!(reason = %rejection, "Reporting rejected drop");
            self.state = RequestState::Failed(rejection.to_string());
        } else {
            tracing::debug!(reason = %rejection, "Ignoring rejected drop");
        }
    }

    /// Start a request: enter `Loading` and hand out its ticket
    ///
    /// Any previous result or error is cleared immediately.
    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;
        self.in_flight += 1;
        self.state = RequestState::Loading;

        tracing::debug!(ticket = self.issued, in_flight = self.in_flight, "Request started");
        Ticket(self.issued)
    }

    /// Apply a request's outcome according to the resolution policy
    pub fn resolve(
        &mut self,
        ticket: Ticket,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> Resolution {
        self.in_flight = self.in_flight.saturating_sub(1);

        if self.config.policy == ResolutionPolicy::LatestIssued && ticket.0 != self.issued {
            tracing::info!(
                ticket = ticket.0,
                latest = self.issued,
                "Discarding outcome of superseded request"
            );
            return Resolution::Discarded;
        }

        self.state = match outcome {
            Ok(result) => {
                tracing::debug!(ticket = ticket.0, total = result.total(), "Request succeeded");
                RequestState::Ready(result)
            }
            Err(e) => {
                tracing::warn!(ticket = ticket.0, error = %e, "Request failed");
                RequestState::Failed(e.failure_message())
            }
        };

        Resolution::Applied
    }
}

/// Shared access to a session from request tasks
///
/// `with_session` returns `None` once the owner is gone (for example a
/// browser view that has been torn down); the request's outcome is then
/// dropped.
pub trait SessionHandle {
    fn with_session<R>(&self, f: impl FnOnce(&mut Session) -> R) -> Option<R>;
}

impl SessionHandle for RefCell<Session> {
    fn with_session<R>(&self, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

/// Run one request against the session
///
/// Enters `Loading` before `request` is first polled, then resolves the
/// session with its outcome. Returns `None` if the session went away.
pub async fn drive<H, Fut>(handle: &H, request: Fut) -> Option<Resolution>
where
    H: SessionHandle + ?Sized,
    Fut: Future<Output = Result<AnalysisResult, AnalysisError>>,
{
    let ticket = handle.with_session(|session| session.begin())?;
    let outcome = request.await;
    handle.with_session(|session| session.resolve(ticket, outcome))
}

/// Analyze one upload through `service` and resolve the session with it
pub async fn run_analysis<H, S>(handle: &H, service: &S, upload: &S::Upload) -> Option<Resolution>
where
    H: SessionHandle + ?Sized,
    S: AnalysisService + ?Sized,
{
    drive(handle, service.analyze(upload)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::CategoryTotals;
    use crate::analysis::{DailyPoint, Summary};

    fn result(total: f64) -> AnalysisResult {
        AnalysisResult {
            summary: Summary { total },
            by_category: [("Other", total)].into_iter().collect::<CategoryTotals>(),
            daily_spending: vec![DailyPoint::new("2024-01-01", total)],
        }
    }

    fn session(policy: ResolutionPolicy) -> Session {
        Session::new(SessionConfig {
            policy,
            report_rejections: false,
        })
    }

    #[test]
    fn test_initial_state_is_idle() {
        let session = Session::default();
        assert_eq!(session.state(), &RequestState::Idle);
        assert_eq!(session.config().policy, ResolutionPolicy::LatestIssued);
    }

    #[test]
    fn test_success_cycle() {
        let mut session = Session::default();
        let ticket = session.begin();
        assert!(session.state().is_loading());
        assert_eq!(session.in_flight(), 1);

        assert_eq!(session.resolve(ticket, Ok(result(42.5))), Resolution::Applied);
        assert_eq!(session.state().result(), Some(&result(42.5)));
        assert_eq!(session.in_flight(), 0);
    }

    #[test]
    fn test_failure_cycle_and_retry() {
        let mut session = Session::default();
        let ticket = session.begin();
        session.resolve(ticket, Err(AnalysisError::Status(500)));
        assert_eq!(session.state().error(), Some("Failed to analyze file"));

        // A new upload clears the banner right away
        let ticket = session.begin();
        assert_eq!(session.state(), &RequestState::Loading);
        session.resolve(ticket, Ok(result(1.0)));
        assert!(session.state().is_ready());
    }

    #[test]
    fn test_race_last_resolved_wins() {
        let mut session = session(ResolutionPolicy::LastResolved);
        let first = session.begin();
        let second = session.begin();

        assert_eq!(session.resolve(second, Ok(result(2.0))), Resolution::Applied);
        assert_eq!(session.resolve(first, Ok(result(1.0))), Resolution::Applied);

        // The slower, earlier request overwrote the newer one
        assert_eq!(session.state().result().map(|r| r.total()), Some(1.0));
    }

    #[test]
    fn test_race_latest_issued_wins() {
        let mut session = session(ResolutionPolicy::LatestIssued);
        let first = session.begin();
        let second = session.begin();
        assert!(first < second);

        assert_eq!(session.resolve(second, Ok(result(2.0))), Resolution::Applied);
        assert_eq!(session.resolve(first, Ok(result(1.0))), Resolution::Discarded);

        assert_eq!(session.state().result().map(|r| r.total()), Some(2.0));
        assert_eq!(session.in_flight(), 0);
    }

    #[test]
    fn test_default_policy_shows_newest_upload() {
        let mut session = Session::default();
        let first = session.begin();
        let second = session.begin();

        session.resolve(second, Ok(result(2.0)));
        assert_eq!(session.resolve(first, Ok(result(1.0))), Resolution::Discarded);

        assert_eq!(session.state().result().map(|r| r.total()), Some(2.0));
    }

    #[test]
    fn test_stale_completion_keeps_loading() {
        let mut session = session(ResolutionPolicy::LatestIssued);
        let first = session.begin();
        let _second = session.begin();

        session.resolve(first, Err(AnalysisError::Status(502)));
        assert!(session.state().is_loading());
    }

    #[test]
    fn test_rejection_is_silent_by_default() {
        let mut session = Session::default();
        let event: IntakeEvent<()> = IntakeEvent::FileRejected(Rejection::TooManyFiles(2));

        assert!(session.accept(event).is_none());
        assert_eq!(session.state(), &RequestState::Idle);
    }

    #[test]
    fn test_rejection_reported_when_configured() {
        let mut session = Session::new(SessionConfig {
            policy: ResolutionPolicy::LatestIssued,
            report_rejections: true,
        });
        let event: IntakeEvent<()> = IntakeEvent::FileRejected(Rejection::UnsupportedType {
            name: "notes.txt".to_string(),
            mime: "text/plain".to_string(),
        });

        assert!(session.accept(event).is_none());
        assert_eq!(session.state().error(), Some("notes.txt is not a CSV file"));
    }

    #[test]
    fn test_selected_file_passes_through() {
        let mut session = Session::default();
        let file = FileCandidate::new("jan.csv", "text/csv", 7u8);

        let selected = session.accept(IntakeEvent::FileSelected(file.clone()));
        assert_eq!(selected, Some(file));
        // Selection alone does not start a request
        assert_eq!(session.state(), &RequestState::Idle);
    }

    #[test]
    fn test_policy_config_names() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"policy": "last-resolved", "report_rejections": true}"#)
                .unwrap();
        assert_eq!(config.policy, ResolutionPolicy::LastResolved);
        assert!(config.report_rejections);

        let config: SessionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SessionConfig::default());
    }

    #[tokio::test]
    async fn test_drive_enters_loading_before_request_runs() {
        let cell = RefCell::new(Session::default());

        let resolution = drive(&cell, async {
            assert!(cell.borrow().state().is_loading());
            Ok(result(3.0))
        })
        .await;

        assert_eq!(resolution, Some(Resolution::Applied));
        assert_eq!(cell.borrow().state().result().map(|r| r.total()), Some(3.0));
    }

    #[tokio::test]
    async fn test_drive_interleaved_requests() {
        let cell = RefCell::new(session(ResolutionPolicy::LatestIssued));
        let (tx_first, rx_first) = tokio::sync::oneshot::channel();
        let (tx_second, rx_second) = tokio::sync::oneshot::channel();

        let first = drive(&cell, async {
            rx_first.await.unwrap_or(Err(AnalysisError::Timeout))
        });
        let second = drive(&cell, async {
            rx_second.await.unwrap_or(Err(AnalysisError::Timeout))
        });

        // Completions are released only after both requests have started
        let release = async {
            tokio::task::yield_now().await;
            assert_eq!(cell.borrow().in_flight(), 2);
            tx_second.send(Ok(result(2.0))).unwrap();
            tx_first.send(Ok(result(1.0))).unwrap();
        };
        let (first, second, ()) = tokio::join!(first, second, release);

        assert_eq!(first, Some(Resolution::Discarded));
        assert_eq!(second, Some(Resolution::Applied));
        assert_eq!(cell.borrow().state().result().map(|r| r.total()), Some(2.0));
    }
}
