//! HTTP client for the OAuth demo backend.
//!
//! Every request carries the backend session cookie through a shared cookie
//! jar, so `Set-Cookie` responses (e.g. the deletion on logout) apply to later
//! requests made with the same client.

mod types;

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use reqwest::StatusCode;
use reqwest::cookie::Jar;
use tracing::{debug, warn};
pub use types::{HealthStatus, RepositoryRecord, UserProfile};
use url::Url;

use crate::config::Config;

pub const SESSION_PATH: &str = "api/github/me";
pub const REPOS_PATH: &str = "api/github/repos";
pub const LOGOUT_PATH: &str = "api/logout";
pub const LOGIN_PATH: &str = "api/github/login";
pub const HEALTH_PATH: &str = "api/health";

/// Classified answer to "who is logged in?".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The backend answered 401: no session. Not an error.
    Anonymous,
    Authenticated(UserProfile),
    /// Any other status, a transport failure or timeout, or an unparsable body.
    Failure(String),
}

/// Client for the backend's session, repository and logout endpoints.
///
/// Cheap to clone; clones share the connection pool and cookie jar.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Builds a client from configuration, seeding the cookie jar with the
    /// configured session cookie.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = config.base_url()?;
        let jar = Arc::new(Jar::default());
        if let Some(value) = config.session_cookie.as_deref() {
            let cookie = format!("{}={}; Path=/", config.session_cookie_name, value.trim());
            jar.add_cookie_str(&cookie, &base_url);
        }

        let http = reqwest::Client::builder()
            .cookie_provider(jar)
            .timeout(config.request_timeout())
            .user_agent(concat!("hubview/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, base_url })
    }

    /// Returns the backend base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("Invalid endpoint path: {path}"))
    }

    /// URL that starts the OAuth redirect flow in a browser.
    ///
    /// # Errors
    /// Returns an error if the URL cannot be built from the base URL.
    pub fn login_url(&self) -> Result<Url> {
        self.endpoint(LOGIN_PATH)
    }

    /// Asks the backend who is logged in and classifies the answer.
    ///
    /// Never fails: every error collapses into `SessionOutcome::Failure`.
    pub async fn fetch_session(&self) -> SessionOutcome {
        match self.try_fetch_session().await {
            Ok(outcome) => outcome,
            Err(err) => {
                let message = format!("{err:#}");
                warn!(error = %message, "session check failed");
                SessionOutcome::Failure(message)
            }
        }
    }

    async fn try_fetch_session(&self) -> Result<SessionOutcome> {
        let url = self.endpoint(SESSION_PATH)?;
        debug!(%url, "checking session");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .context("Failed to load user")?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            debug!("no active session");
            return Ok(SessionOutcome::Anonymous);
        }
        if !status.is_success() {
            bail!("Failed to load user (HTTP {})", status.as_u16());
        }

        let profile: UserProfile = response
            .json()
            .await
            .context("Failed to parse user profile")?;
        debug!(login = %profile.login, "session is authenticated");
        Ok(SessionOutcome::Authenticated(profile))
    }

    /// Fetches the signed-in account's repositories.
    ///
    /// # Errors
    /// Returns an error on transport failure, non-2xx status, or an unparsable body.
    pub async fn fetch_repos(&self) -> Result<Vec<RepositoryRecord>> {
        let url = self.endpoint(REPOS_PATH)?;
        debug!(%url, "loading repositories");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .context("Failed to load repositories")?;

        let status = response.status();
        if !status.is_success() {
            bail!("Failed to load repositories (HTTP {})", status.as_u16());
        }

        let repos: Vec<RepositoryRecord> = response
            .json()
            .await
            .context("Failed to parse repositories")?;
        debug!(count = repos.len(), "repositories loaded");
        Ok(repos)
    }

    /// Asks the backend to drop the session.
    ///
    /// Any HTTP response counts as success; only transport failures are errors.
    ///
    /// # Errors
    /// Returns an error if the request cannot be sent.
    pub async fn logout(&self) -> Result<()> {
        let url = self.endpoint(LOGOUT_PATH)?;
        debug!(%url, "signing out");

        let response = self
            .http
            .post(url)
            .send()
            .await
            .context("Failed to reach logout endpoint")?;

        if !response.status().is_success() {
            warn!(status = response.status().as_u16(), "logout returned non-success status");
        }
        Ok(())
    }

    /// Checks backend liveness.
    ///
    /// # Errors
    /// Returns an error on transport failure, non-2xx status, or an unparsable body.
    pub async fn health(&self) -> Result<HealthStatus> {
        let url = self.endpoint(HEALTH_PATH)?;
        let response = self
            .http
            .get(url)
            .send()
            .await
            .context("Failed to reach backend")?;

        let status = response.status();
        if !status.is_success() {
            bail!("Health check failed (HTTP {})", status.as_u16());
        }
        response
            .json()
            .await
            .context("Failed to parse health response")
    }
}
