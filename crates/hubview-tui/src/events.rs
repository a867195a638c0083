//! UI events consumed by the reducer.
//!
//! Terminal input, user actions, and async task results all enter the
//! reducer as a `UiEvent`.

use crossterm::event::Event;
use hubview_core::api::{RepositoryRecord, SessionOutcome};

use crate::common::{TaskCompleted, TaskKind, TaskStarted};

/// Events processed by `update::update`.
#[derive(Debug)]
pub enum UiEvent {
    /// A page lifetime begins; issues the one session check it is allowed.
    Init,
    /// Periodic tick (render cadence).
    Tick,
    /// Raw terminal input, mapped to an `Action` by the reducer.
    Terminal(Event),
    /// A user action, independent of the input device.
    Action(Action),
    TaskStarted {
        kind: TaskKind,
        started: TaskStarted,
    },
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<TaskResult>,
    },
}

/// User-initiated actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Open the backend login URL in the browser.
    Connect,
    LoadRepos,
    Logout,
    /// Leave and re-enter the page: new lifetime, new session check.
    Reload,
    SelectNext,
    SelectPrev,
    /// Open the selected repository in the browser.
    OpenSelected,
    Quit,
}

/// Result payload of a finished task.
#[derive(Debug)]
pub enum TaskResult {
    Session(SessionOutcome),
    Repos(Result<Vec<RepositoryRecord>, String>),
    Logout(Result<(), String>),
    /// The task observed its cancel token and produced nothing.
    Cancelled,
}
