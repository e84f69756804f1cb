use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::{Context, OutputFormat};
use crate::client::auth;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login to server")]
    Login {
        #[arg(help = "Email")]
        correo: String,
        #[arg(long, env = "SNACKCTL_PASSWORD", hide_env_values = true, help = "Password")]
        password: String,
    },

    #[command(about = "Logout from server")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,

    #[command(about = "Register new user")]
    Register {
        #[arg(help = "Display name")]
        nombre: String,
        #[arg(help = "Email")]
        correo: String,
        #[arg(long, env = "SNACKCTL_PASSWORD", hide_env_values = true, help = "Password")]
        password: String,
        #[arg(long, help = "Password confirmation")]
        confirm: String,
    },
}

pub async fn handle(cmd: AuthCommands, ctx: &Context, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { correo, password } => {
            let token = auth::login(ctx.api.as_ref(), ctx.session.as_ref(), &correo, &password).await?;
            output_success(
                &output_format,
                &format!("Logged in as {}", correo),
                Some(json!({ "token": token })),
            )
        }
        AuthCommands::Logout => {
            auth::logout(ctx.session.as_ref())?;
            output_success(&output_format, "Logged out", None)
        }
        AuthCommands::Status => {
            let session = ctx.session.load().filter(|s| s.is_live());
            match session {
                Some(s) => output_success(
                    &output_format,
                    &format!("Authenticated until {}", s.expires_at.to_rfc3339()),
                    Some(json!({ "authenticated": true, "expires_at": s.expires_at })),
                ),
                None => output_success(
                    &output_format,
                    "Not authenticated",
                    Some(json!({ "authenticated": false })),
                ),
            }
        }
        AuthCommands::Register {
            nombre,
            correo,
            password,
            confirm,
        } => {
            let response = auth::register(ctx.api.as_ref(), &nombre, &correo, &password, &confirm).await?;
            let message = if response.mensaje.is_empty() {
                format!("Registered {}", correo)
            } else {
                response.mensaje
            };
            output_success(&output_format, &message, None)
        }
    }
}
