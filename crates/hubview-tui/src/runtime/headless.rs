//! Headless runtime.
//!
//! Drives the same reducer and handlers as `TuiRuntime` without a terminal.
//! Browser launches are recorded instead of performed. Used by the CLI's
//! non-interactive commands and by integration tests.

use anyhow::Result;
use hubview_core::api::ApiClient;
use tokio::sync::mpsc;
use tracing::debug;

use super::TaskSpawner;
use super::inbox::UiEventReceiver;
use crate::effects::UiEffect;
use crate::events::{Action, UiEvent};
use crate::state::AppState;
use crate::update;
use crate::view::{self, View};

pub struct HeadlessRuntime {
    pub state: AppState,
    spawner: TaskSpawner,
    inbox_rx: UiEventReceiver,
    opened_urls: Vec<String>,
}

impl HeadlessRuntime {
    /// Creates a runtime for a page that has not checked its session yet.
    ///
    /// # Errors
    /// Returns an error if the login URL cannot be built from the client's base URL.
    pub fn new(client: ApiClient) -> Result<Self> {
        let login_url = client.login_url()?.to_string();
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Ok(Self {
            state: AppState::new(login_url),
            spawner: TaskSpawner::new(inbox_tx, client),
            inbox_rx,
            opened_urls: Vec::new(),
        })
    }

    /// Feeds one event through the reducer and executes its effects.
    ///
    /// Request effects are spawned; call `settle` to wait for their results.
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    pub fn action(&mut self, action: Action) {
        self.dispatch(UiEvent::Action(action));
    }

    /// Processes inbox events until no task is in flight.
    pub async fn settle(&mut self) {
        while self.state.tasks.is_any_running() {
            let Some(event) = self.inbox_rx.recv().await else {
                break;
            };
            self.dispatch(event);
        }
        while let Ok(event) = self.inbox_rx.try_recv() {
            self.dispatch(event);
        }
    }

    /// Dispatches an action and waits for everything it started.
    pub async fn run_action(&mut self, action: Action) {
        self.action(action);
        self.settle().await;
    }

    /// Starts the page lifetime and waits for the session check.
    pub async fn start(&mut self) {
        self.dispatch(UiEvent::Init);
        self.settle().await;
    }

    pub fn view(&self) -> View {
        view::project(&self.state)
    }

    /// URLs the reducer asked to open, oldest first.
    pub fn opened_urls(&self) -> &[String] {
        &self.opened_urls
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => self.state.should_quit = true,
            UiEffect::OpenBrowser { url } => self.opened_urls.push(url),
            UiEffect::CancelTask { kind, token } => {
                debug!(?kind, "cancelling task");
                if let Some(cancel) = token {
                    cancel.cancel();
                }
            }
            effect @ (UiEffect::FetchSession { .. }
            | UiEffect::LoadRepos { .. }
            | UiEffect::Logout { .. }) => self.spawner.spawn_effect(effect),
        }
    }
}
