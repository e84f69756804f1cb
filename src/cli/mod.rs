pub mod commands;
pub mod config;
pub mod utils;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::client::{ApiClient, SessionStore};
use crate::config::ClientConfig;

#[derive(Parser)]
#[command(name = "snackctl")]
#[command(about = "snackctl - command-line client for the Snack World admin API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, env = "SNACKWORLD_API_URL", help = "Base URL of the admin API")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Login, logout and account registration")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Catalog box management")]
    Cajas {
        #[command(subcommand)]
        cmd: commands::cajas::CajasCommands,
    },

    #[command(about = "User administration")]
    Usuarios {
        #[command(subcommand)]
        cmd: commands::usuarios::UsuariosCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// What every command needs: the persisted session and a client bound to it.
pub struct Context {
    pub session: Arc<dyn SessionStore>,
    pub api: Arc<ApiClient>,
    pub unit_value: u64,
}

impl Context {
    pub fn new(api_url: Option<String>, session: Arc<dyn SessionStore>) -> anyhow::Result<Self> {
        let settings = crate::config::config();
        let client_config = ClientConfig {
            api_url: api_url.unwrap_or_else(|| settings.client.api_url.clone()),
            ..settings.client.clone()
        };
        let api = ApiClient::new(&client_config, session.clone())?;

        Ok(Self {
            session,
            api: Arc::new(api),
            unit_value: settings.stats.unit_value,
        })
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let session = Arc::new(config::FileSessionStore::in_config_dir()?);
    let ctx = Context::new(cli.api_url, session)?;

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, &ctx, output_format).await,
        Commands::Cajas { cmd } => commands::cajas::handle(cmd, &ctx, output_format).await,
        Commands::Usuarios { cmd } => commands::usuarios::handle(cmd, &ctx, output_format).await,
    }
}
