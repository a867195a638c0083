use hubview_core::api::ApiClient;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::events::TaskResult;

/// Checks the session, abandoning the request if `cancel` fires first.
pub async fn session_fetch(client: ApiClient, cancel: Option<CancellationToken>) -> TaskResult {
    let Some(cancel) = cancel else {
        return TaskResult::Session(client.fetch_session().await);
    };
    tokio::select! {
        () = cancel.cancelled() => {
            debug!("session check cancelled");
            TaskResult::Cancelled
        }
        outcome = client.fetch_session() => TaskResult::Session(outcome),
    }
}

/// Sends the logout request. Only transport failures are reported.
pub async fn logout(client: ApiClient) -> TaskResult {
    TaskResult::Logout(client.logout().await.map_err(|e| format!("{e:#}")))
}
