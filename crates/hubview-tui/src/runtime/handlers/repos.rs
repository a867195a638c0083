use hubview_core::api::ApiClient;

use crate::events::TaskResult;

/// Fetches the repository list.
pub async fn repo_load(client: ApiClient) -> TaskResult {
    TaskResult::Repos(client.fetch_repos().await.map_err(|e| format!("{e:#}")))
}
