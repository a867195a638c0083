use anyhow::Result;
use hubview_core::api::ApiClient;
use hubview_core::config::Config;

pub async fn run(config: &Config) -> Result<()> {
    let client = ApiClient::new(config)?;
    let health = client.health().await?;
    println!("{} is {}", client.base_url(), health.status);
    Ok(())
}
