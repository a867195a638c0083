//! Application state composition.
//!
//! ```text
//! AppState
//! ├── session: SessionState   (primary machine: Loading/Anonymous/Authenticated/Error)
//! ├── repos: RepoState        (subordinate machine: Idle/Loading/Ready/Error)
//! ├── task_seq: TaskSeq       (async task id generator)
//! ├── tasks: Tasks            (task lifecycle state)
//! └── notice                  (non-blocking status-line message)
//! ```
//!
//! The two machines are only mutated through the reducer in `update`.
//! Outside the crate they are read through `session()` and `repos()`.

use crate::common::{TaskSeq, Tasks};
use crate::repos::{RepoState, RepoStatus};
use crate::session::{SessionState, SessionStatus};

/// Root state container, owned by a runtime.
#[derive(Debug)]
pub struct AppState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    pub(crate) session: SessionState,
    pub(crate) repos: RepoState,
    /// Task id sequence for async operations.
    pub task_seq: TaskSeq,
    /// Task lifecycle state for async operations.
    pub tasks: Tasks,
    /// Backend URL that starts the OAuth login flow.
    pub login_url: String,
    /// Non-blocking notice shown in the status line.
    pub notice: Option<String>,
}

impl AppState {
    /// Creates state for a page that has not checked its session yet.
    pub fn new(login_url: impl Into<String>) -> Self {
        Self {
            should_quit: false,
            session: SessionState::default(),
            repos: RepoState::default(),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            login_url: login_url.into(),
            notice: None,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn repos(&self) -> &RepoState {
        &self.repos
    }

    /// Repository data may only exist for an authenticated session.
    pub fn invariants_hold(&self) -> bool {
        self.repos.status() == RepoStatus::Idle
            || self.session.status() == SessionStatus::Authenticated
    }
}
