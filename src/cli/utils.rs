use serde::Serialize;
use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::client::ClientError;
use crate::database::models::{Caja, DirectoryStats};

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(target), Some(Value::Object(extra))) = (response.as_object_mut(), data) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(output_format: &OutputFormat, message: &str, error_code: Option<&str>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// HTTP status of a failed remote call, for the JSON `error_code` field.
pub fn error_code(err: &anyhow::Error) -> Option<String> {
    err.downcast_ref::<ClientError>()
        .and_then(ClientError::status)
        .map(|status| status.as_u16().to_string())
}

pub fn output_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn output_cajas(output_format: &OutputFormat, cajas: &[Caja]) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => output_json(&cajas),
        OutputFormat::Text if cajas.is_empty() => {
            println!("No boxes in the catalog");
            Ok(())
        }
        OutputFormat::Text => {
            for caja in cajas {
                println!("{}", caja_line(caja));
            }
            Ok(())
        }
    }
}

pub fn output_caja(output_format: &OutputFormat, caja: &Caja) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => output_json(caja),
        OutputFormat::Text => {
            println!("{}", caja_line(caja));
            if !caja.descripcion.is_empty() {
                println!("  {}", caja.descripcion);
            }
            for producto in &caja.productos {
                println!("  - {}", producto);
            }
            Ok(())
        }
    }
}

pub fn output_stats(output_format: &OutputFormat, stats: &DirectoryStats) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => output_json(stats),
        OutputFormat::Text => {
            println!(
                "Users: {}  Active subscriptions: {}  Estimated value: ${}",
                stats.total_users, stats.total_subscriptions, stats.total_value
            );
            for user in &stats.usuarios {
                let marker = if user.suscripcion_activa { "active" } else { "-" };
                println!("{:<10} {:<24} {:<28} {}", user.id, user.nombre, user.correo, marker);
            }
            Ok(())
        }
    }
}

fn caja_line(caja: &Caja) -> String {
    format!("{:<10} {:<32} {:<12} ${:.2}", caja.id, caja.nombre, caja.pais, caja.precio)
}
