//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::common::{TaskCompleted, TaskKind};
use crate::effects::UiEffect;
use crate::events::{Action, TaskResult, UiEvent};
use crate::mutations::StateMutation;
use crate::session::SessionState;
use crate::state::AppState;
use crate::{repos, session};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    let effects = match event {
        UiEvent::Init => handle_init(app),
        UiEvent::Tick => vec![],
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::Action(action) => handle_action(app, action),
        UiEvent::TaskStarted { kind, started } => {
            app.tasks.state_mut(kind).on_started(&started);
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => handle_task_completed(app, kind, completed),
    };
    debug_assert!(
        app.invariants_hold(),
        "repository state outlived the session"
    );
    effects
}

fn handle_init(app: &mut AppState) -> Vec<UiEffect> {
    if !matches!(app.session, SessionState::Loading) || app.tasks.session_fetch.is_running() {
        return vec![];
    }
    let (effects, mutations) = session::start_lifetime(
        &mut app.session,
        &mut app.tasks.session_fetch,
        &mut app.task_seq,
    );
    apply_mutations(app, mutations);
    effects
}

fn handle_action(app: &mut AppState, action: Action) -> Vec<UiEffect> {
    match action {
        Action::Connect => session::handle_connect(&app.session, &app.login_url),
        Action::LoadRepos => repos::handle_load(
            &mut app.repos,
            &app.session,
            &mut app.tasks.repo_load,
            &mut app.task_seq,
        ),
        Action::Logout => {
            let (effects, mutations) = session::handle_logout(
                &mut app.session,
                &mut app.tasks.logout,
                &mut app.task_seq,
            );
            apply_mutations(app, mutations);
            effects
        }
        Action::Reload => {
            let (effects, mutations) = session::start_lifetime(
                &mut app.session,
                &mut app.tasks.session_fetch,
                &mut app.task_seq,
            );
            apply_mutations(app, mutations);
            effects
        }
        Action::SelectNext => {
            app.repos.select_next();
            vec![]
        }
        Action::SelectPrev => {
            app.repos.select_prev();
            vec![]
        }
        Action::OpenSelected => repos::handle_open_selected(&app.repos),
        Action::Quit => {
            // Teardown: a session check still in flight must not land.
            let mut effects = session::cancel_fetch(&mut app.tasks.session_fetch);
            effects.push(UiEffect::Quit);
            effects
        }
    }
}

fn handle_task_completed(
    app: &mut AppState,
    kind: TaskKind,
    completed: TaskCompleted<TaskResult>,
) -> Vec<UiEffect> {
    match kind {
        TaskKind::SessionFetch => {
            let mutations = session::handle_fetch_completed(
                &mut app.session,
                &mut app.tasks.session_fetch,
                completed,
            );
            apply_mutations(app, mutations);
        }
        TaskKind::RepoLoad => repos::handle_load_completed(
            &mut app.repos,
            &app.session,
            &mut app.tasks.repo_load,
            completed,
        ),
        TaskKind::Logout => {
            let mutations = session::handle_logout_completed(&mut app.tasks.logout, completed);
            apply_mutations(app, mutations);
        }
    }
    vec![]
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) => match action_for_key(key) {
            Some(action) => handle_action(app, action),
            None => vec![],
        },
        _ => vec![],
    }
}

/// Maps a key press to an action.
pub fn action_for_key(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char('c') => Some(Action::Connect),
        KeyCode::Char('l') => Some(Action::LoadRepos),
        KeyCode::Char('o') => Some(Action::Logout),
        KeyCode::Char('r') => Some(Action::Reload),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectNext),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectPrev),
        KeyCode::Enter => Some(Action::OpenSelected),
        _ => None,
    }
}

fn apply_mutations(app: &mut AppState, mutations: Vec<StateMutation>) {
    for mutation in mutations {
        match mutation {
            StateMutation::Repos(mutation) => {
                repos::apply(&mut app.repos, &mut app.tasks.repo_load, mutation);
            }
            StateMutation::SetNotice(notice) => app.notice = notice,
        }
    }
}
