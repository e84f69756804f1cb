use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{output_stats, output_success};
use crate::cli::{Context, OutputFormat};
use crate::client::{DirectoryCache, Reconcile};

#[derive(Subcommand)]
pub enum UsuariosCommands {
    #[command(about = "List users with subscription totals")]
    List,

    #[command(about = "Delete a user without an active subscription")]
    Delete {
        #[arg(help = "User ID")]
        id: String,
    },
}

pub async fn handle(cmd: UsuariosCommands, ctx: &Context, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut cache = DirectoryCache::mount(ctx.api.clone(), ctx.unit_value, Reconcile::Local).await;
    if let Some(error) = cache.error() {
        anyhow::bail!("Failed to load users: {}", error);
    }

    match cmd {
        UsuariosCommands::List => match cache.stats() {
            Some(stats) => output_stats(&output_format, stats),
            None => Ok(()),
        },
        UsuariosCommands::Delete { id } => {
            cache.delete(&id).await?;
            output_success(
                &output_format,
                &format!("User {} deleted", id),
                Some(json!({ "id": id })),
            )
        }
    }
}
