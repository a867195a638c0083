//! Session feature reducer.
//!
//! Handles the page-lifetime session check, sign-out, and the connect action.

use tracing::{debug, warn};

use crate::common::{TaskCompleted, TaskKind, TaskSeq, TaskState};
use crate::effects::UiEffect;
use crate::events::TaskResult;
use crate::mutations::{RepoMutation, StateMutation};
use crate::session::SessionState;

/// Starts a page lifetime: back to `Loading` and exactly one session check.
///
/// Any check still in flight from the previous lifetime is cancelled, and its
/// id is forgotten so a late completion cannot resurrect old state.
pub fn start_lifetime(
    session: &mut SessionState,
    task: &mut TaskState,
    seq: &mut TaskSeq,
) -> (Vec<UiEffect>, Vec<StateMutation>) {
    let mut effects = cancel_fetch(task);

    session.restart();
    let id = seq.next_id();
    task.begin(id);
    debug!(task = id.0, "session check issued");
    effects.push(UiEffect::FetchSession { task: id });

    (
        effects,
        vec![
            StateMutation::Repos(RepoMutation::Reset),
            StateMutation::SetNotice(None),
        ],
    )
}

/// Tears down the in-flight session check, if any.
pub fn cancel_fetch(task: &mut TaskState) -> Vec<UiEffect> {
    if !task.is_running() {
        return vec![];
    }
    let token = task.clear();
    vec![UiEffect::CancelTask {
        kind: TaskKind::SessionFetch,
        token,
    }]
}

/// Applies a finished session check.
pub fn handle_fetch_completed(
    session: &mut SessionState,
    task: &mut TaskState,
    completed: TaskCompleted<TaskResult>,
) -> Vec<StateMutation> {
    if !task.finish_if_active(completed.id) {
        debug!(task = completed.id.0, "ignoring stale session result");
        return vec![];
    }

    match completed.result {
        TaskResult::Session(outcome) => {
            if session.resolve(outcome) {
                debug!(status = ?session.status(), "session resolved");
            }
        }
        TaskResult::Cancelled => {}
        other => warn!(?other, "unexpected result for session task"),
    }

    if session.is_authenticated() {
        vec![]
    } else {
        vec![StateMutation::Repos(RepoMutation::Reset)]
    }
}

/// Signs out immediately and fires the backend logout request.
///
/// The outcome of the request never feeds back into session state.
pub fn handle_logout(
    session: &mut SessionState,
    task: &mut TaskState,
    seq: &mut TaskSeq,
) -> (Vec<UiEffect>, Vec<StateMutation>) {
    if !session.sign_out() {
        return (vec![], vec![]);
    }

    let id = seq.next_id();
    task.begin(id);
    (
        vec![UiEffect::Logout { task: id }],
        vec![
            StateMutation::Repos(RepoMutation::Reset),
            StateMutation::SetNotice(None),
        ],
    )
}

/// Surfaces a failed logout request as a notice; nothing else changes.
pub fn handle_logout_completed(
    task: &mut TaskState,
    completed: TaskCompleted<TaskResult>,
) -> Vec<StateMutation> {
    if !task.finish_if_active(completed.id) {
        return vec![];
    }

    match completed.result {
        TaskResult::Logout(Err(message)) => {
            warn!(%message, "logout request failed");
            vec![StateMutation::SetNotice(Some(format!(
                "Sign-out request failed: {message}"
            )))]
        }
        _ => vec![],
    }
}

/// Opens the login flow. Offered only when nobody is signed in.
pub fn handle_connect(session: &SessionState, login_url: &str) -> Vec<UiEffect> {
    match session {
        SessionState::Anonymous | SessionState::Error { .. } => vec![UiEffect::OpenBrowser {
            url: login_url.to_string(),
        }],
        SessionState::Loading | SessionState::Authenticated { .. } => vec![],
    }
}
