//! CLI entry and dispatch.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tdx_core::api::{ApiClient, AuthClient, TaskClient};
use tdx_core::config::Config;
use tdx_core::logging::{self, LogTarget};
use tdx_core::session::{FileSessionStore, SessionStore};
use tdx_core::task::TaskId;

use crate::modes;

mod commands;

#[derive(Parser)]
#[command(name = "tdx")]
#[command(version)]
#[command(about = "Terminal client for a to-do list server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Server base URL (overrides TDX_BASE_URL and the config file)
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in and store the session
    Login {
        #[arg(long)]
        username: Option<String>,
        #[arg(long, env = "TDX_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Create an account
    Register {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long, env = "TDX_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Log out and clear the stored session
    Logout,
    /// Show whether a session is stored
    Status,
    /// Manage tasks
    Tasks {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum TaskCommands {
    /// List all tasks
    List,
    /// Create a task
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
    },
    /// Change a task's title, description, or completion
    Edit {
        #[arg(value_name = "ID")]
        id: u64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_name = "BOOL")]
        completed: Option<bool>,
    },
    /// Delete a task
    Delete {
        #[arg(value_name = "ID")]
        id: u64,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Persist the server base URL
    SetBaseUrl {
        #[arg(value_name = "URL")]
        url: String,
    },
}

/// Clients and the session store for one invocation.
pub struct App {
    pub auth: AuthClient,
    pub tasks: TaskClient,
    pub session: Arc<dyn SessionStore>,
}

impl App {
    fn new(config: &Config, base_url_flag: Option<&str>) -> Result<Self> {
        let base_url = config.effective_base_url(base_url_flag)?;
        tracing::debug!(%base_url, "using server");
        let api = ApiClient::new(&base_url, config.request_timeout())
            .context("create HTTP client")?;
        Ok(Self {
            auth: AuthClient::new(api.clone()),
            tasks: TaskClient::new(api),
            session: Arc::new(FileSessionStore::default()),
        })
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let target = if cli.command.is_some() {
        LogTarget::Stderr
    } else {
        LogTarget::File
    };
    logging::init(target).context("init logging")?;

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli { command, base_url } = cli;

    // Config commands must work even when the config file is broken,
    // so the clients are built per command.
    let app = || -> Result<App> {
        let config = Config::load().context("load config")?;
        App::new(&config, base_url.as_deref())
    };

    // default to the interactive app
    let Some(command) = command else {
        let app = app()?;
        return modes::run_interactive(app.auth, app.tasks, app.session);
    };

    match command {
        Commands::Login { username, password } => {
            commands::auth::login(&app()?, username, password).await
        }
        Commands::Register {
            email,
            username,
            password,
        } => commands::auth::register(&app()?, email, username, password).await,
        Commands::Logout => commands::auth::logout(&app()?).await,
        Commands::Status => commands::auth::status(&app()?),

        Commands::Tasks { command } => {
            let app = app()?;
            match command {
                TaskCommands::List => commands::tasks::list(&app).await,
                TaskCommands::Add { title, description } => {
                    commands::tasks::add(&app, &title, &description).await
                }
                TaskCommands::Edit {
                    id,
                    title,
                    description,
                    completed,
                } => {
                    let changes = commands::tasks::TaskChanges {
                        title,
                        description,
                        completed,
                    };
                    commands::tasks::edit(&app, TaskId(id), changes).await
                }
                TaskCommands::Delete { id } => commands::tasks::delete(&app, TaskId(id)).await,
            }
        }

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::SetBaseUrl { url } => commands::config::set_base_url(&url),
        },
    }
}
