//! Wire types returned by the backend.

use serde::{Deserialize, Serialize};

/// The signed-in account, as returned by `/api/github/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    pub avatar_url: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserProfile {
    /// Display name, falling back to the login handle when unset or blank.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.login)
    }
}

/// One entry of `/api/github/repos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub id: u64,
    pub full_name: String,
    pub html_url: String,
    #[serde(default)]
    pub private: bool,
    /// Visibility declared by the owner (`public`, `private`, `internal`), when forwarded.
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Body of `/api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}
