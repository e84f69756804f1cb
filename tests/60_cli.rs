mod common;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use snackworld_admin::cli::commands::{auth::AuthCommands, cajas::CajasCommands, usuarios::UsuariosCommands};
use snackworld_admin::cli::config::FileSessionStore;
use snackworld_admin::cli::{commands, Cli, Commands, Context, OutputFormat};
use snackworld_admin::client::SessionStore;

#[test]
fn parses_nested_commands() {
    let cli = Cli::try_parse_from([
        "snackctl",
        "--json",
        "cajas",
        "create",
        "--nombre",
        "Box",
        "--pais",
        "Peru",
        "--descripcion",
        "d",
        "--imagen",
        "i",
        "--precio",
        "12.5",
        "--producto",
        "a",
        "--producto",
        "b",
    ])
    .unwrap();

    assert!(cli.json);
    match cli.command {
        Commands::Cajas {
            cmd: CajasCommands::Create(args),
        } => {
            assert_eq!(args.productos, vec!["a", "b"]);
            assert_eq!(args.precio, 12.5);
        }
        _ => panic!("wrong command"),
    }
}

#[tokio::test]
async fn login_persists_session_file() -> Result<()> {
    let base_url = common::spawn_app(common::test_config()).await?;
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("session.json");

    let store = Arc::new(FileSessionStore::new(&path));
    let ctx = Context::new(Some(base_url.clone()), store)?;

    commands::auth::handle(
        AuthCommands::Login {
            correo: "admin@snackworld.com".to_string(),
            password: "admin123".to_string(),
        },
        &ctx,
        OutputFormat::Json,
    )
    .await?;
    assert!(path.exists());

    // A later invocation picks the token up from disk
    let reopened = Arc::new(FileSessionStore::new(&path));
    assert!(reopened.token().is_some_and(|t| t.starts_with("mock-jwt-token-")));
    let ctx = Context::new(Some(base_url), reopened)?;
    commands::usuarios::handle(UsuariosCommands::List, &ctx, OutputFormat::Json).await?;

    commands::auth::handle(AuthCommands::Logout, &ctx, OutputFormat::Json).await?;
    assert!(!path.exists());
    assert!(commands::usuarios::handle(UsuariosCommands::List, &ctx, OutputFormat::Json)
        .await
        .is_err());
    Ok(())
}

#[tokio::test]
async fn refuses_to_delete_active_subscriber() -> Result<()> {
    let base_url = common::spawn_app(common::test_config()).await?;
    let dir = tempfile::tempdir()?;
    let store = Arc::new(FileSessionStore::new(dir.path().join("session.json")));
    let ctx = Context::new(Some(base_url), store)?;

    commands::auth::handle(
        AuthCommands::Login {
            correo: "admin@snackworld.com".to_string(),
            password: "admin123".to_string(),
        },
        &ctx,
        OutputFormat::Text,
    )
    .await?;

    let err = commands::usuarios::handle(UsuariosCommands::Delete { id: "user1".to_string() }, &ctx, OutputFormat::Text)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("active subscription"));
    Ok(())
}
