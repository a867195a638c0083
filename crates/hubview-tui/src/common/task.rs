use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    SessionFetch,
    RepoLoad,
    Logout,
}

#[derive(Debug, Clone)]
pub struct TaskStarted {
    pub id: TaskId,
    pub cancel: Option<CancellationToken>,
}

#[derive(Debug)]
pub struct TaskCompleted<E> {
    pub id: TaskId,
    pub result: E,
}

/// Task lifecycle state (stored in AppState, mutated only by reducer).
///
/// The reducer claims the id with `begin` when it emits the effect, so a
/// completion can be matched even if its `TaskStarted` has not been seen yet.
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
    pub cancel: Option<CancellationToken>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn begin(&mut self, id: TaskId) {
        self.active = Some(id);
        self.cancel = None;
    }

    /// Records the cancel token of a started task.
    ///
    /// A task that is no longer the active one is cancelled immediately.
    pub fn on_started(&mut self, started: &TaskStarted) -> bool {
        if self.active == Some(started.id) {
            self.cancel.clone_from(&started.cancel);
            true
        } else {
            if let Some(cancel) = &started.cancel {
                cancel.cancel();
            }
            false
        }
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
            self.cancel = None;
        }
        ok
    }

    /// Forgets the active task and hands back its cancel token, if known.
    pub fn clear(&mut self) -> Option<CancellationToken> {
        self.active = None;
        self.cancel.take()
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub session_fetch: TaskState,
    pub repo_load: TaskState,
    pub logout: TaskState,
}

impl Tasks {
    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::SessionFetch => &mut self.session_fetch,
            TaskKind::RepoLoad => &mut self.repo_load,
            TaskKind::Logout => &mut self.logout,
        }
    }

    pub fn is_any_running(&self) -> bool {
        self.session_fetch.is_running() || self.repo_load.is_running() || self.logout.is_running()
    }
}
