//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use hubview_core::config::{self, Config};
use hubview_core::logging::{self, LogTarget};
use tracing::debug;

mod commands;

#[derive(Parser)]
#[command(name = "hubview")]
#[command(version)]
#[command(about = "Terminal client for the GitHub OAuth demo backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Backend base URL (overrides config and HUBVIEW_BASE_URL)
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Check who is signed in and print the result
    Status,
    /// List the signed-in account's repositories
    Repos,
    /// Open the GitHub login flow in the browser
    Login,
    /// Sign out of the backend session
    Logout,
    /// Check that the backend is reachable
    Health,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Config { command }) = &cli.command {
        return match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        };
    }

    let mut config = Config::load().context("load config")?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    // default to the full-screen view
    let Some(command) = cli.command else {
        let _log_guard = logging::init(LogTarget::File(config::paths::logs_dir()))?;
        let _enter = rt.enter();
        return hubview_tui::run_interactive(&config);
    };

    let _log_guard = logging::init(LogTarget::Stderr)?;
    debug!(command = command.name(), base_url = %config.base_url, "dispatching command");
    rt.block_on(async move { dispatch(command, &config).await })
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Repos => "repos",
            Self::Login => "login",
            Self::Logout => "logout",
            Self::Health => "health",
            Self::Config { .. } => "config",
        }
    }
}

async fn dispatch(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Status => commands::account::status(config).await,
        Commands::Repos => commands::account::repos(config).await,
        Commands::Login => commands::account::login(config),
        Commands::Logout => commands::account::logout(config).await,
        Commands::Health => commands::health::run(config).await,
        // handled in run() before the config file is loaded
        Commands::Config { .. } => Ok(()),
    }
}
