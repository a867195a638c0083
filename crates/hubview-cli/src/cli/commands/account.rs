//! Headless account commands.
//!
//! These drive the same reducer as the full-screen view through
//! `HeadlessRuntime` and print the projected view as plain text.

use anyhow::{Context, Result, bail};
use hubview_core::api::ApiClient;
use hubview_core::config::{Config, SESSION_COOKIE_ENV};
use hubview_tui::HeadlessRuntime;
use hubview_tui::events::Action;
use hubview_tui::session::SessionStatus;
use tracing::warn;

/// When set, `login` prints the URL instead of launching a browser.
pub const NO_BROWSER_ENV: &str = "HUBVIEW_NO_BROWSER";

async fn start(config: &Config) -> Result<HeadlessRuntime> {
    let client = ApiClient::new(config)?;
    let mut runtime = HeadlessRuntime::new(client)?;
    runtime.start().await;
    Ok(runtime)
}

fn print_view(runtime: &HeadlessRuntime) {
    for line in runtime.view().plain_lines() {
        println!("{line}");
    }
}

pub async fn status(config: &Config) -> Result<()> {
    let runtime = start(config).await?;
    print_view(&runtime);
    Ok(())
}

pub async fn repos(config: &Config) -> Result<()> {
    let mut runtime = start(config).await?;
    match runtime.state.session().status() {
        SessionStatus::Authenticated => {}
        SessionStatus::Anonymous => {
            print_view(&runtime);
            bail!("Not signed in. Run `hubview login` to connect GitHub.");
        }
        SessionStatus::Loading | SessionStatus::Error => {
            print_view(&runtime);
            bail!("Session check failed");
        }
    }

    runtime.run_action(Action::LoadRepos).await;
    print_view(&runtime);
    if runtime.state.repos().error().is_some() {
        bail!("Repository load failed");
    }
    Ok(())
}

pub fn login(config: &Config) -> Result<()> {
    let client = ApiClient::new(config)?;
    let url = client.login_url()?;
    if std::env::var_os(NO_BROWSER_ENV).is_some() {
        println!("{url}");
        return Ok(());
    }

    println!("Opening {url}");
    if let Err(e) = open::that(url.as_str()) {
        warn!(error = %e, %url, "failed to launch browser");
        return Err(e).with_context(|| format!("open browser for {url}"));
    }
    println!(
        "After the GitHub flow completes, store the `{}` cookie as session_cookie in config.toml or {SESSION_COOKIE_ENV}.",
        config.session_cookie_name
    );
    Ok(())
}

pub async fn logout(config: &Config) -> Result<()> {
    let mut runtime = start(config).await?;
    if runtime.state.session().is_authenticated() {
        runtime.run_action(Action::Logout).await;
    }
    print_view(&runtime);
    Ok(())
}
