//! Session state.
//!
//! The primary state machine: who, if anyone, is signed in.

use hubview_core::api::{SessionOutcome, UserProfile};

/// Fieldless view of `SessionState`, for reporting and comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Loading,
    Anonymous,
    Authenticated,
    Error,
}

/// Session state. The profile and error message exist only in their variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the session check of the current page lifetime.
    #[default]
    Loading,
    Anonymous,
    Authenticated {
        user: UserProfile,
    },
    Error {
        message: String,
    },
}

impl SessionState {
    pub fn status(&self) -> SessionStatus {
        match self {
            SessionState::Loading => SessionStatus::Loading,
            SessionState::Anonymous => SessionStatus::Anonymous,
            SessionState::Authenticated { .. } => SessionStatus::Authenticated,
            SessionState::Error { .. } => SessionStatus::Error,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }

    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            SessionState::Authenticated { user } => Some(user),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SessionState::Error { message } => Some(message),
            _ => None,
        }
    }

    /// Applies a session check result. Only `Loading` accepts one.
    pub(crate) fn resolve(&mut self, outcome: SessionOutcome) -> bool {
        if !matches!(self, SessionState::Loading) {
            return false;
        }
        *self = match outcome {
            SessionOutcome::Anonymous => SessionState::Anonymous,
            SessionOutcome::Authenticated(user) => SessionState::Authenticated { user },
            SessionOutcome::Failure(message) => SessionState::Error { message },
        };
        true
    }

    /// Signs out. Only `Authenticated` can sign out.
    pub(crate) fn sign_out(&mut self) -> bool {
        if !self.is_authenticated() {
            return false;
        }
        *self = SessionState::Anonymous;
        true
    }

    /// Starts a new page lifetime.
    pub(crate) fn restart(&mut self) {
        *self = SessionState::Loading;
    }
}
