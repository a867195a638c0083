//! Repository feature reducer.

use tracing::debug;

use crate::common::{TaskCompleted, TaskSeq, TaskState};
use crate::effects::UiEffect;
use crate::events::TaskResult;
use crate::mutations::RepoMutation;
use crate::repos::RepoState;
use crate::session::SessionState;

/// Starts a repository fetch.
///
/// No-op unless the session is authenticated, and while a fetch is already
/// in flight: at most one request is ever outstanding.
pub fn handle_load(
    repos: &mut RepoState,
    session: &SessionState,
    task: &mut TaskState,
    seq: &mut TaskSeq,
) -> Vec<UiEffect> {
    if !session.is_authenticated() {
        return vec![];
    }
    if !repos.begin_load() {
        debug!("repository load already in flight");
        return vec![];
    }

    let id = seq.next_id();
    task.begin(id);
    vec![UiEffect::LoadRepos { task: id }]
}

/// Applies a finished repository fetch.
pub fn handle_load_completed(
    repos: &mut RepoState,
    session: &SessionState,
    task: &mut TaskState,
    completed: TaskCompleted<TaskResult>,
) {
    if !task.finish_if_active(completed.id) {
        debug!(task = completed.id.0, "ignoring stale repository result");
        return;
    }
    if !session.is_authenticated() {
        return;
    }

    match completed.result {
        TaskResult::Repos(result) => {
            repos.finish_load(result);
        }
        TaskResult::Cancelled => {
            repos.finish_load(Err("Repository request was cancelled".to_string()));
        }
        _ => {}
    }
}

/// Opens the selected repository in the browser.
pub fn handle_open_selected(repos: &RepoState) -> Vec<UiEffect> {
    repos
        .selected_repo()
        .map(|repo| UiEffect::OpenBrowser {
            url: repo.html_url.clone(),
        })
        .into_iter()
        .collect()
}

pub fn apply(repos: &mut RepoState, task: &mut TaskState, mutation: RepoMutation) {
    match mutation {
        RepoMutation::Reset => {
            repos.reset();
            task.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use hubview_core::api::{RepositoryRecord, UserProfile};

    use super::*;
    use crate::common::TaskId;

    fn authed() -> SessionState {
        SessionState::Authenticated {
            user: UserProfile {
                id: 1,
                login: "ada".to_string(),
                name: None,
                avatar_url: "u".to_string(),
                email: None,
            },
        }
    }

    fn repo(id: u64) -> RepositoryRecord {
        RepositoryRecord {
            id,
            full_name: format!("ada/r{id}"),
            html_url: format!("https://github.com/ada/r{id}"),
            private: false,
            visibility: None,
            name: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_load_requires_authenticated_session() {
        let mut repos = RepoState::Idle;
        let mut task = TaskState::default();
        let mut seq = TaskSeq::default();

        let effects = handle_load(&mut repos, &SessionState::Anonymous, &mut task, &mut seq);

        assert!(effects.is_empty());
        assert_eq!(repos, RepoState::Idle);
        assert!(!task.is_running());
    }

    #[test]
    fn test_load_while_loading_is_noop() {
        let session = authed();
        let mut repos = RepoState::Idle;
        let mut task = TaskState::default();
        let mut seq = TaskSeq::default();

        let first = handle_load(&mut repos, &session, &mut task, &mut seq);
        let second = handle_load(&mut repos, &session, &mut task, &mut seq);

        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
        assert_eq!(task.active, Some(TaskId(0)));
    }

    #[test]
    fn test_completion_after_reset_is_ignored() {
        let session = authed();
        let mut repos = RepoState::Idle;
        let mut task = TaskState::default();
        let mut seq = TaskSeq::default();
        handle_load(&mut repos, &session, &mut task, &mut seq);
        apply(&mut repos, &mut task, RepoMutation::Reset);

        handle_load_completed(
            &mut repos,
            &session,
            &mut task,
            TaskCompleted {
                id: TaskId(0),
                result: TaskResult::Repos(Ok(vec![repo(1)])),
            },
        );

        assert_eq!(repos, RepoState::Idle);
    }

    #[test]
    fn test_failure_sets_error() {
        let session = authed();
        let mut repos = RepoState::Idle;
        let mut task = TaskState::default();
        let mut seq = TaskSeq::default();
        handle_load(&mut repos, &session, &mut task, &mut seq);

        handle_load_completed(
            &mut repos,
            &session,
            &mut task,
            TaskCompleted {
                id: TaskId(0),
                result: TaskResult::Repos(Err("Failed to load repositories (HTTP 500)".into())),
            },
        );

        assert_eq!(repos.error(), Some("Failed to load repositories (HTTP 500)"));
        assert!(!task.is_running());
    }

    #[test]
    fn test_open_selected_emits_browser_effect() {
        let repos = RepoState::Ready {
            repos: vec![repo(1), repo(2)],
            selected: 1,
        };
        assert!(matches!(
            handle_open_selected(&repos).as_slice(),
            [UiEffect::OpenBrowser { url }] if url == "https://github.com/ada/r2"
        ));
        assert!(handle_open_selected(&RepoState::Loading).is_empty());
    }
}
