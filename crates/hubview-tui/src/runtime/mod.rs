//! Runtimes: own state, run the event loop, execute effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! - Spawned tasks send `TaskStarted`/`TaskCompleted` events to `inbox_tx`
//! - The runtime drains `inbox_rx` and feeds each event through the reducer
//!
//! Structure:
//! - `mod.rs`: `TuiRuntime` (terminal, event loop) and the shared `TaskSpawner`
//! - `headless.rs`: `HeadlessRuntime` (same reducer and handlers, no terminal)
//! - `inbox.rs`: Inbox channel types
//! - `handlers/`: Async effect handlers

mod handlers;
mod headless;
mod inbox;

use std::future::Future;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
pub use headless::HeadlessRuntime;
use hubview_core::api::ApiClient;
use inbox::{UiEventReceiver, UiEventSender};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::{TaskResult, UiEvent};
use crate::state::AppState;
use crate::terminal::{self, TuiTerminal};
use crate::{render, update};

/// Poll duration while a request is in flight, so results render promptly.
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll duration when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Spawns task effects onto the tokio runtime and reports through the inbox.
#[derive(Clone)]
pub(crate) struct TaskSpawner {
    tx: UiEventSender,
    client: ApiClient,
}

impl TaskSpawner {
    pub(crate) fn new(tx: UiEventSender, client: ApiClient) -> Self {
        Self { tx, client }
    }

    /// Spawns an async task, sending `TaskStarted` immediately and
    /// `TaskCompleted` when the handler returns.
    fn spawn_task<F, Fut>(&self, kind: TaskKind, id: TaskId, cancelable: bool, f: F)
    where
        F: FnOnce(Option<CancellationToken>) -> Fut + Send + 'static,
        Fut: Future<Output = TaskResult> + Send + 'static,
    {
        let tx = self.tx.clone();
        let cancel = cancelable.then(CancellationToken::new);
        let started = TaskStarted {
            id,
            cancel: cancel.clone(),
        };
        let _ = tx.send(UiEvent::TaskStarted { kind, started });
        tokio::spawn(async move {
            let result = f(cancel).await;
            let completed = TaskCompleted { id, result };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }

    /// Spawns the task behind a request effect. Other effects are ignored.
    pub(crate) fn spawn_effect(&self, effect: UiEffect) {
        let client = self.client.clone();
        match effect {
            UiEffect::FetchSession { task } => {
                self.spawn_task(TaskKind::SessionFetch, task, true, move |cancel| {
                    handlers::session_fetch(client, cancel)
                });
            }
            UiEffect::LoadRepos { task } => {
                self.spawn_task(TaskKind::RepoLoad, task, false, move |_| {
                    handlers::repo_load(client)
                });
            }
            UiEffect::Logout { task } => {
                self.spawn_task(TaskKind::Logout, task, false, move |_| {
                    handlers::logout(client)
                });
            }
            other => debug!(?other, "not a task effect"),
        }
    }
}

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is restored on drop and on panic.
pub struct TuiRuntime {
    terminal: TuiTerminal,
    pub state: AppState,
    spawner: TaskSpawner,
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Creates a TUI runtime talking to the backend through `client`.
    ///
    /// # Errors
    /// Returns an error if the login URL cannot be built or the terminal
    /// cannot be set up.
    pub fn new(client: ApiClient) -> Result<Self> {
        let login_url = client.login_url()?.to_string();

        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Ok(Self {
            terminal,
            state: AppState::new(login_url),
            spawner: TaskSpawner::new(inbox_tx, client),
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop until the user quits.
    ///
    /// Must be called from within a tokio runtime.
    pub fn run(&mut self) -> Result<()> {
        self.dispatch_event(UiEvent::Init);
        self.event_loop()
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.should_quit {
            let events = self.collect_events()?;
            if !events.is_empty() {
                dirty = true;
            }
            for event in events {
                self.dispatch_event(event);
                if self.state.should_quit {
                    break;
                }
            }

            if dirty && !self.state.should_quit {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    /// Collects events from the inbox and the terminal.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let tick_interval = if self.state.tasks.is_any_running() {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn dispatch_event(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::OpenBrowser { url } => {
                if let Err(e) = open::that(&url) {
                    warn!(%url, error = %e, "failed to open browser");
                }
            }
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

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
