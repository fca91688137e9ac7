//! Global Application State
//!
//! Reactive wrappers around the core [`Session`] and [`UploadSurface`].

use leptos::*;
use web_sys::File;

use spendlens::intake::{IntakeEvent, UploadSurface};
use spendlens::session::{run_analysis, Session, SessionConfig, SessionHandle};

use crate::api::FetchAnalysisClient;

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Request lifecycle behind the dashboard
    pub session: RwSignal<Session>,
    /// Drop target and its drag state
    pub surface: RwSignal<UploadSurface>,
}

/// Session access for request tasks
///
/// Updates stop landing once the signal is disposed, i.e. when the
/// dashboard has been unmounted.
pub struct SessionSignal(pub RwSignal<Session>);

impl SessionHandle for SessionSignal {
    fn with_session<R>(&self, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        self.0.try_update(f)
    }
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    provide_context(GlobalState::new(SessionConfig::default()));
}

impl GlobalState {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            session: create_rw_signal(Session::new(config)),
            surface: create_rw_signal(UploadSurface::new()),
        }
    }

    /// Route an upload surface event into the session
    pub fn handle_intake(&self, event: Option<IntakeEvent<File>>) {
        let Some(event) = event else {
            return;
        };

        let selected = self.session.try_update(|session| session.accept(event)).flatten();
        if let Some(file) = selected {
            self.analyze(file.handle);
        }
    }

    /// Upload `file` in the background and resolve the session with the outcome
    pub fn analyze(&self, file: File) {
        let session = SessionSignal(self.session);
        spawn_local(async move {
            let client = FetchAnalysisClient::from_storage();
            if run_analysis(&session, &client, &file).await.is_none() {
                web_sys::console::log_1(&"Dashboard closed before the analysis finished".into());
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spendlens::session::RequestState;

    #[test]
    fn test_session_signal_updates_state() {
        let runtime = create_runtime();

        let signal = create_rw_signal(Session::default());
        let handle = SessionSignal(signal);

        let ticket = handle.with_session(|session| session.begin());
        assert!(ticket.is_some());
        assert_eq!(signal.with_untracked(|s| s.state().clone()), RequestState::Loading);

        runtime.dispose();
    }
}
