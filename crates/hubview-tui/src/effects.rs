//! Side effects requested by the reducer.
//!
//! `update` never performs I/O. It returns `UiEffect`s and the runtime
//! (full-screen or headless) carries them out: opening the browser, spawning
//! backend requests, and firing cancellation tokens handed back in
//! `CancelTask`.

use tokio_util::sync::CancellationToken;

use crate::common::{TaskId, TaskKind};

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Open a URL in the system browser.
    OpenBrowser { url: String },

    /// Ask the backend who is logged in (cancellable).
    FetchSession { task: TaskId },

    /// Fetch the repository list.
    LoadRepos { task: TaskId },

    /// Tell the backend to drop the session (fire-and-forget).
    Logout { task: TaskId },

    /// Cancel an in-progress task.
    CancelTask {
        kind: TaskKind,
        token: Option<CancellationToken>,
    },
}
