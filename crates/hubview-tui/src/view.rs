//! Render projector.
//!
//! `project` maps the current session and repository state to a `View`.
//! It only reads state: calling it twice on the same state yields equal views.
//! The ratatui renderer and the plain-text output of headless commands both
//! draw from the `View`, so every observable branch is decided here.

use std::fmt::Write as _;

use crate::common::text::sanitize_for_display;
use crate::repos::RepoState;
use crate::session::SessionState;
use crate::state::AppState;

pub const APP_TITLE: &str = "GitHub OAuth App Demo";
pub const LOADING_MESSAGE: &str = "Checking session...";
pub const ANONYMOUS_MESSAGE: &str = "No session found. Start a login flow.";
pub const EMAIL_HIDDEN: &str = "Email hidden";
pub const NO_REPOSITORIES: &str = "No repositories found for this account.";
pub const REPOSITORIES_TITLE: &str = "Repositories";

/// Everything the user can see, derived from `AppState`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub body: Body,
    /// Non-blocking notice (e.g. a failed sign-out request).
    pub notice: Option<String>,
    pub hints: Vec<KeyHint>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Checking {
        message: &'static str,
    },
    SignedOut {
        message: &'static str,
        connect: Control,
    },
    Failed {
        message: String,
        retry: Control,
    },
    SignedIn {
        profile: ProfileView,
        sign_out: Control,
        repos: RepoPanel,
    },
}

/// An actionable control: a key binding, a label, and whether it is live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub key: char,
    pub label: &'static str,
    pub enabled: bool,
    /// Where the control navigates to, for link-like controls.
    pub href: Option<String>,
}

impl Control {
    fn new(key: char, label: &'static str) -> Self {
        Self {
            key,
            label,
            enabled: true,
            href: None,
        }
    }

    fn link(key: char, label: &'static str, href: &str) -> Self {
        Self {
            href: Some(href.to_string()),
            ..Self::new(key, label)
        }
    }

    fn plain(&self) -> String {
        let mut line = format!("[{}] {}", self.key, self.label);
        if !self.enabled {
            line.push_str(" (disabled)");
        }
        if let Some(href) = &self.href {
            let _ = write!(line, " -> {href}");
        }
        line
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub display_name: String,
    /// `@login`.
    pub handle: String,
    /// The email, or `EMAIL_HIDDEN`.
    pub email: String,
    pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoPanel {
    pub load: Control,
    /// Error message, or the empty-list message.
    pub status: Option<String>,
    pub rows: Vec<RepoRow>,
    pub selected: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRow {
    pub full_name: String,
    pub url: String,
    pub private: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyHint {
    pub key: &'static str,
    pub label: &'static str,
}

const fn hint(key: &'static str, label: &'static str) -> KeyHint {
    KeyHint { key, label }
}

/// Projects the application state into a view.
pub fn project(app: &AppState) -> View {
    let body = project_body(app.session(), app.repos(), &app.login_url);
    let hints = hints_for(&body);
    View {
        body,
        notice: app
            .notice
            .as_deref()
            .map(|notice| sanitize_for_display(notice).into_owned()),
        hints,
    }
}

fn project_body(session: &SessionState, repos: &RepoState, login_url: &str) -> Body {
    match session {
        SessionState::Loading => Body::Checking {
            message: LOADING_MESSAGE,
        },
        SessionState::Anonymous => Body::SignedOut {
            message: ANONYMOUS_MESSAGE,
            connect: Control::link('c', "Connect GitHub", login_url),
        },
        SessionState::Error { message } => Body::Failed {
            message: sanitize_for_display(message).into_owned(),
            retry: Control::link('c', "Try again", login_url),
        },
        SessionState::Authenticated { user } => Body::SignedIn {
            profile: ProfileView {
                display_name: sanitize_for_display(user.display_name()).into_owned(),
                handle: format!("@{}", sanitize_for_display(&user.login)),
                email: user
                    .email
                    .as_deref()
                    .filter(|email| !email.is_empty())
                    .map_or_else(
                        || EMAIL_HIDDEN.to_string(),
                        |email| sanitize_for_display(email).into_owned(),
                    ),
                avatar_url: sanitize_for_display(&user.avatar_url).into_owned(),
            },
            sign_out: Control::new('o', "Sign out"),
            repos: project_repo_panel(repos),
        },
    }
}

fn project_repo_panel(repos: &RepoState) -> RepoPanel {
    let load = if repos.is_loading() {
        Control {
            enabled: false,
            ..Control::new('l', "Loading...")
        }
    } else {
        Control::new('l', "Load repositories")
    };

    let status = match repos {
        RepoState::Error { message } => Some(sanitize_for_display(message).into_owned()),
        RepoState::Ready { repos, .. } if repos.is_empty() => Some(NO_REPOSITORIES.to_string()),
        RepoState::Idle | RepoState::Loading | RepoState::Ready { .. } => None,
    };

    let rows = repos
        .repos()
        .iter()
        .map(|repo| RepoRow {
            full_name: sanitize_for_display(&repo.full_name).into_owned(),
            url: sanitize_for_display(&repo.html_url).into_owned(),
            private: repo.private,
        })
        .collect();

    RepoPanel {
        load,
        status,
        rows,
        selected: repos.selected(),
    }
}

fn hints_for(body: &Body) -> Vec<KeyHint> {
    let mut hints = match body {
        Body::Checking { .. } => vec![],
        Body::SignedOut { .. } | Body::Failed { .. } => {
            vec![hint("c", "connect"), hint("r", "reload")]
        }
        Body::SignedIn { repos, .. } => {
            let mut hints = vec![hint("l", "load repos"), hint("o", "sign out")];
            if !repos.rows.is_empty() {
                hints.push(hint("↑/↓", "move"));
                hints.push(hint("enter", "open"));
            }
            hints.push(hint("r", "reload"));
            hints
        }
    };
    hints.push(hint("q", "quit"));
    hints
}

impl View {
    /// Renders the view as plain text lines (headless output).
    pub fn plain_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        match &self.body {
            Body::Checking { message } => lines.push((*message).to_string()),
            Body::SignedOut { message, connect } => {
                lines.push((*message).to_string());
                lines.push(connect.plain());
            }
            Body::Failed { message, retry } => {
                lines.push(message.clone());
                lines.push(retry.plain());
            }
            Body::SignedIn {
                profile,
                sign_out,
                repos,
            } => {
                lines.push(profile.display_name.clone());
                lines.push(profile.handle.clone());
                lines.push(profile.email.clone());
                lines.push(sign_out.plain());
                lines.push(String::new());
                lines.push(REPOSITORIES_TITLE.to_string());
                lines.push(repos.load.plain());
                if let Some(status) = &repos.status {
                    lines.push(status.clone());
                }
                for row in &repos.rows {
                    let mut line = format!("- {}  {}", row.full_name, row.url);
                    if row.private {
                        line.push_str("  [Private]");
                    }
                    lines.push(line);
                }
            }
        }
        if let Some(notice) = &self.notice {
            lines.push(format!("! {notice}"));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use hubview_core::api::{RepositoryRecord, SessionOutcome, UserProfile};

    use super::*;
    use crate::common::{TaskCompleted, TaskKind};
    use crate::events::{Action, TaskResult, UiEvent};
    use crate::update::update;

    const LOGIN_URL: &str = "http://localhost:8000/api/github/login";

    fn ada(email: Option<&str>) -> UserProfile {
        UserProfile {
            id: 1,
            login: "ada".to_string(),
            name: None,
            avatar_url: "u".to_string(),
            email: email.map(ToString::to_string),
        }
    }

    fn repo(id: u64, private: bool) -> RepositoryRecord {
        RepositoryRecord {
            id,
            full_name: format!("ada/r{id}"),
            html_url: format!("https://github.com/ada/r{id}"),
            private,
            visibility: None,
            name: None,
            updated_at: None,
        }
    }

    fn resolved(outcome: SessionOutcome) -> AppState {
        let mut app = AppState::new(LOGIN_URL);
        update(&mut app, UiEvent::Init);
        let id = app.tasks.session_fetch.active.unwrap();
        update(
            &mut app,
            UiEvent::TaskCompleted {
                kind: TaskKind::SessionFetch,
                completed: TaskCompleted {
                    id,
                    result: TaskResult::Session(outcome),
                },
            },
        );
        app
    }

    fn with_repos(result: Result<Vec<RepositoryRecord>, String>) -> AppState {
        let mut app = resolved(SessionOutcome::Authenticated(ada(None)));
        update(&mut app, UiEvent::Action(Action::LoadRepos));
        let id = app.tasks.repo_load.active.unwrap();
        update(
            &mut app,
            UiEvent::TaskCompleted {
                kind: TaskKind::RepoLoad,
                completed: TaskCompleted {
                    id,
                    result: TaskResult::Repos(result),
                },
            },
        );
        app
    }

    fn panel(view: &View) -> &RepoPanel {
        match &view.body {
            Body::SignedIn { repos, .. } => repos,
            other => panic!("expected signed-in body, got {other:?}"),
        }
    }

    #[test]
    fn test_loading_view() {
        let view = project(&AppState::new(LOGIN_URL));
        assert_eq!(
            view.body,
            Body::Checking {
                message: LOADING_MESSAGE
            }
        );
        assert_eq!(view.plain_lines(), vec![LOADING_MESSAGE.to_string()]);
    }

    #[test]
    fn test_anonymous_view_offers_connect() {
        let view = project(&resolved(SessionOutcome::Anonymous));
        let Body::SignedOut { connect, .. } = &view.body else {
            panic!("expected signed-out body");
        };
        assert_eq!(connect.label, "Connect GitHub");
        assert_eq!(connect.href.as_deref(), Some(LOGIN_URL));
        assert!(view.plain_lines().iter().any(|l| l.contains("Connect GitHub")));
    }

    #[test]
    fn test_error_view_offers_retry() {
        let view = project(&resolved(SessionOutcome::Failure(
            "Failed to load user (HTTP 502)".to_string(),
        )));
        let Body::Failed { message, retry } = &view.body else {
            panic!("expected failed body");
        };
        assert_eq!(message, "Failed to load user (HTTP 502)");
        assert_eq!(retry.label, "Try again");
        assert!(retry.enabled);
    }

    #[test]
    fn test_missing_email_shows_hidden() {
        let view = project(&resolved(SessionOutcome::Authenticated(ada(None))));
        let Body::SignedIn { profile, .. } = &view.body else {
            panic!("expected signed-in body");
        };
        assert_eq!(profile.display_name, "ada");
        assert_eq!(profile.handle, "@ada");
        assert_eq!(profile.email, EMAIL_HIDDEN);
    }

    #[test]
    fn test_present_email_is_shown() {
        let view = project(&resolved(SessionOutcome::Authenticated(ada(Some(
            "ada@example.com",
        )))));
        let Body::SignedIn { profile, .. } = &view.body else {
            panic!("expected signed-in body");
        };
        assert_eq!(profile.email, "ada@example.com");
    }

    #[test]
    fn test_loading_disables_load_control() {
        let mut app = resolved(SessionOutcome::Authenticated(ada(None)));
        update(&mut app, UiEvent::Action(Action::LoadRepos));

        let view = project(&app);
        let load = &panel(&view).load;
        assert_eq!(load.label, "Loading...");
        assert!(!load.enabled);
    }

    #[test]
    fn test_empty_list_message() {
        let view = project(&with_repos(Ok(vec![])));
        assert_eq!(panel(&view).status.as_deref(), Some(NO_REPOSITORIES));
        assert!(panel(&view).rows.is_empty());
    }

    #[test]
    fn test_repo_error_keeps_load_enabled() {
        let view = project(&with_repos(Err(
            "Failed to load repositories (HTTP 500)".to_string()
        )));
        let panel = panel(&view);
        assert_eq!(
            panel.status.as_deref(),
            Some("Failed to load repositories (HTTP 500)")
        );
        assert!(panel.load.enabled);
        assert_eq!(panel.load.label, "Load repositories");
    }

    #[test]
    fn test_rows_mark_private_repositories() {
        let view = project(&with_repos(Ok(vec![repo(1, false), repo(2, true)])));
        let panel = panel(&view);
        assert_eq!(panel.rows.len(), 2);
        assert!(panel.rows[1].private);
        assert_eq!(panel.selected, Some(0));
        assert!(view.hints.iter().any(|h| h.key == "enter"));

        let lines = view.plain_lines();
        assert!(lines.contains(&"- ada/r2  https://github.com/ada/r2  [Private]".to_string()));
    }

    #[test]
    fn test_server_strings_are_sanitized() {
        let mut user = ada(None);
        user.avatar_url = "https://a.example/\x1b[2Jx.png".to_string();
        let view = project(&resolved(SessionOutcome::Authenticated(user)));
        let Body::SignedIn { profile, .. } = &view.body else {
            panic!("expected signed-in body");
        };
        assert_eq!(profile.avatar_url, "https://a.example/[2Jx.png");

        let view = project(&resolved(SessionOutcome::Failure(
            "Failed to load user: \x1b]0;pwned\x07".to_string(),
        )));
        let Body::Failed { message, .. } = &view.body else {
            panic!("expected failed body");
        };
        assert_eq!(message, "Failed to load user: ]0;pwned");

        let view = project(&with_repos(Err("bad\x1b[31m gateway".to_string())));
        assert_eq!(panel(&view).status.as_deref(), Some("bad[31m gateway"));

        let mut record = repo(1, false);
        record.html_url = "https://github.com/ada/r1\r\n".to_string();
        let view = project(&with_repos(Ok(vec![record])));
        assert_eq!(panel(&view).rows[0].url, "https://github.com/ada/r1");
        assert!(
            view.plain_lines()
                .iter()
                .all(|line| !line.chars().any(char::is_control))
        );
    }

    #[test]
    fn test_projection_is_repeatable() {
        let app = with_repos(Ok(vec![repo(1, false)]));
        assert_eq!(project(&app), project(&app));
    }

    #[test]
    fn test_notice_is_projected() {
        let mut app = AppState::new(LOGIN_URL);
        app.notice = Some("Sign-out request failed: timeout".to_string());
        assert!(
            project(&app)
                .plain_lines()
                .contains(&"! Sign-out request failed: timeout".to_string())
        );
    }
}
