//! Repository list state.
//!
//! Subordinate to the session: anything other than `Idle` is only valid while
//! the session is authenticated. The root reducer resets it otherwise.

use hubview_core::api::RepositoryRecord;

/// Fieldless view of `RepoState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoStatus {
    Idle,
    Loading,
    Ready,
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RepoState {
    #[default]
    Idle,
    Loading,
    Ready {
        repos: Vec<RepositoryRecord>,
        /// Cursor into `repos`; 0 when the list is empty.
        selected: usize,
    },
    Error {
        message: String,
    },
}

impl RepoState {
    pub fn status(&self) -> RepoStatus {
        match self {
            RepoState::Idle => RepoStatus::Idle,
            RepoState::Loading => RepoStatus::Loading,
            RepoState::Ready { .. } => RepoStatus::Ready,
            RepoState::Error { .. } => RepoStatus::Error,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RepoState::Loading)
    }

    /// The fetched list; empty unless `Ready`.
    pub fn repos(&self) -> &[RepositoryRecord] {
        match self {
            RepoState::Ready { repos, .. } => repos,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RepoState::Error { message } => Some(message),
            _ => None,
        }
    }

    pub fn selected(&self) -> Option<usize> {
        match self {
            RepoState::Ready { repos, selected } if !repos.is_empty() => Some(*selected),
            _ => None,
        }
    }

    pub fn selected_repo(&self) -> Option<&RepositoryRecord> {
        match self {
            RepoState::Ready { repos, selected } => repos.get(*selected),
            _ => None,
        }
    }

    /// Enters `Loading`, clearing any previous list or error.
    /// Refused while already loading.
    pub(crate) fn begin_load(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        *self = RepoState::Loading;
        true
    }

    /// Applies a fetch result. Only `Loading` accepts one.
    pub(crate) fn finish_load(&mut self, result: Result<Vec<RepositoryRecord>, String>) -> bool {
        if !self.is_loading() {
            return false;
        }
        *self = match result {
            Ok(repos) => RepoState::Ready { repos, selected: 0 },
            Err(message) => RepoState::Error { message },
        };
        true
    }

    pub(crate) fn reset(&mut self) {
        *self = RepoState::Idle;
    }

    pub(crate) fn select_next(&mut self) {
        if let RepoState::Ready { repos, selected } = self
            && *selected + 1 < repos.len()
        {
            *selected += 1;
        }
    }

    pub(crate) fn select_prev(&mut self) {
        if let RepoState::Ready { selected, .. } = self {
            *selected = selected.saturating_sub(1);
        }
    }
}
