use clap::{Args, Subcommand};
use serde_json::json;

use crate::cli::utils::{output_caja, output_cajas, output_success};
use crate::cli::{Context, OutputFormat};
use crate::client::{CajaDraft, CatalogCache, RemoteApi};
use crate::database::models::CajaFields;

#[derive(Subcommand)]
pub enum CajasCommands {
    #[command(about = "List every box in the catalog")]
    List,

    #[command(about = "Show one box")]
    Get {
        #[arg(help = "Box ID")]
        id: String,
    },

    #[command(about = "Create a box")]
    Create(CreateArgs),

    #[command(about = "Update fields of a box")]
    Update(UpdateArgs),

    #[command(about = "Delete a box")]
    Delete {
        #[arg(help = "Box ID")]
        id: String,
    },
}

#[derive(Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub nombre: String,
    #[arg(long)]
    pub pais: String,
    #[arg(long)]
    pub descripcion: String,
    #[arg(long)]
    pub imagen: String,
    #[arg(long)]
    pub precio: f64,
    #[arg(long = "producto", help = "Product name, repeat for each product")]
    pub productos: Vec<String>,
}

#[derive(Args)]
pub struct UpdateArgs {
    #[arg(help = "Box ID")]
    pub id: String,
    #[arg(long)]
    pub nombre: Option<String>,
    #[arg(long)]
    pub pais: Option<String>,
    #[arg(long)]
    pub descripcion: Option<String>,
    #[arg(long)]
    pub imagen: Option<String>,
    #[arg(long)]
    pub precio: Option<f64>,
    #[arg(long = "producto", help = "Replaces the product list when given")]
    pub productos: Vec<String>,
}

impl From<CreateArgs> for CajaDraft {
    fn from(args: CreateArgs) -> Self {
        CajaDraft {
            nombre: args.nombre,
            pais: args.pais,
            descripcion: args.descripcion,
            imagen: args.imagen,
            precio: args.precio,
            productos: args.productos,
        }
    }
}

impl UpdateArgs {
    fn patch(&self) -> CajaFields {
        CajaFields {
            nombre: self.nombre.clone(),
            pais: self.pais.clone(),
            descripcion: self.descripcion.clone(),
            imagen: self.imagen.clone(),
            precio: self.precio,
            productos: (!self.productos.is_empty()).then(|| self.productos.clone()),
            ..Default::default()
        }
    }
}

pub async fn handle(cmd: CajasCommands, ctx: &Context, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut cache = CatalogCache::new(ctx.api.clone());

    match cmd {
        CajasCommands::List => {
            cache.load().await;
            if let Some(error) = cache.error() {
                anyhow::bail!("Failed to load boxes: {}", error);
            }
            output_cajas(&output_format, cache.cajas())
        }
        CajasCommands::Get { id } => {
            let caja = ctx.api.get_caja(&id).await?;
            output_caja(&output_format, &caja)
        }
        CajasCommands::Create(args) => {
            let caja = cache.create(&CajaDraft::from(args)).await?;
            output_caja(&output_format, &caja)
        }
        CajasCommands::Update(args) => {
            let patch = args.patch();
            if patch == CajaFields::default() {
                anyhow::bail!("Nothing to update");
            }
            let caja = cache.update(&args.id, &patch).await?;
            output_caja(&output_format, &caja)
        }
        CajasCommands::Delete { id } => {
            cache.delete(&id).await?;
            output_success(
                &output_format,
                &format!("Box {} deleted", id),
                Some(json!({ "id": id })),
            )
        }
    }
}
