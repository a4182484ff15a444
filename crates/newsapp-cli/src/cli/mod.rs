//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use newsapp_core::api::NewsClient;
use newsapp_core::config::{self, Config};
use newsapp_core::forms::Category;
use newsapp_core::logging::{self, LogTarget};

mod commands;

#[derive(Parser)]
#[command(name = "newsapp")]
#[command(version)]
#[command(about = "Sign up and log in to the NewsApp subscription service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Base URL of the news API (overrides the config file)
    #[arg(long, global = true, env = config::API_URL_ENV, value_name = "URL")]
    api_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Register a new subscriber
    Register(RegisterArgs),

    /// Log in and store the session token
    Login {
        #[arg(long, default_value_t)]
        email: String,
        #[arg(long, default_value_t)]
        password: String,
    },

    /// Clear the stored session token
    Logout,

    /// Show whether a session token is stored
    Status,

    /// List the categories and preferences offered at signup
    Options,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct RegisterArgs {
    #[arg(long, default_value_t)]
    pub email: String,
    #[arg(long, default_value_t)]
    pub password: String,
    #[arg(long = "full-name", default_value_t)]
    pub full_name: String,
    /// Category to subscribe to (repeatable)
    #[arg(long = "category", value_name = "CATEGORY")]
    pub categories: Vec<Category>,
    /// One of the listed preferences (repeatable)
    #[arg(long = "preference", value_name = "PREFERENCE")]
    pub preferences: Vec<String>,
    /// A preference of your own (repeatable)
    #[arg(long = "custom-preference", value_name = "PREFERENCE")]
    pub custom_preferences: Vec<String>,
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Store the API base URL in the config file
    SetApiUrl {
        #[arg(value_name = "URL")]
        url: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load().context("load config")?;

    let Cli { command, api_url } = cli;

    let target = if command.is_none() {
        LogTarget::File(config.log.file_path())
    } else {
        LogTarget::Stderr
    };
    let _log_guard = logging::init(&config.log, target)?;

    let client = || -> Result<NewsClient> {
        let base_url = config.api.resolve_base_url(api_url.as_deref())?;
        tracing::debug!(%base_url, "resolved API base URL");
        Ok(NewsClient::new(base_url))
    };

    // default to the interactive client
    let Some(command) = command else {
        return commands::tui::run(client()?);
    };

    match command {
        Commands::Register(args) => commands::register::run(&client()?, args).await,
        Commands::Login { email, password } => {
            commands::auth::login(&client()?, email, password).await
        }
        Commands::Logout => commands::auth::logout(),
        Commands::Status => commands::auth::status(),
        Commands::Options => {
            commands::options::list();
            Ok(())
        }
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::SetApiUrl { url } => commands::config::set_api_url(&url),
        },
    }
}
