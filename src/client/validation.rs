use crate::client::error::ClientError;
use crate::database::models::CajaFields;

pub const MISSING_PRODUCTS: &str = "Please add at least one product";
pub const MISSING_FIELDS: &str = "All fields are required";
pub const INVALID_PRICE: &str = "Price must be a positive number";

/// An unvalidated catalog entry as typed by the admin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CajaDraft {
    pub nombre: String,
    pub pais: String,
    pub descripcion: String,
    pub imagen: String,
    pub precio: f64,
    pub productos: Vec<String>,
}

/// Trim a draft and turn it into a create payload.
///
/// Blank product lines are dropped; order is kept.
pub fn validate_draft(draft: &CajaDraft) -> Result<CajaFields, ClientError> {
    let productos = clean_products(&draft.productos);
    if productos.is_empty() {
        return Err(ClientError::validation(MISSING_PRODUCTS));
    }

    let nombre = draft.nombre.trim();
    let pais = draft.pais.trim();
    let descripcion = draft.descripcion.trim();
    let imagen = draft.imagen.trim();
    if [nombre, pais, descripcion, imagen].iter().any(|s| s.is_empty()) {
        return Err(ClientError::validation(MISSING_FIELDS));
    }

    check_price(draft.precio)?;

    Ok(CajaFields {
        nombre: Some(nombre.to_string()),
        pais: Some(pais.to_string()),
        descripcion: Some(descripcion.to_string()),
        imagen: Some(imagen.to_string()),
        precio: Some(draft.precio),
        productos: Some(productos),
        ..Default::default()
    })
}

/// Validate a partial update. Only the fields present are checked.
pub fn validate_patch(patch: &CajaFields) -> Result<CajaFields, ClientError> {
    let trimmed = |field: &Option<String>| -> Result<Option<String>, ClientError> {
        match field.as_deref().map(str::trim) {
            Some("") => Err(ClientError::validation(MISSING_FIELDS)),
            other => Ok(other.map(str::to_string)),
        }
    };

    let productos = match &patch.productos {
        Some(items) => {
            let items = clean_products(items);
            if items.is_empty() {
                return Err(ClientError::validation(MISSING_PRODUCTS));
            }
            Some(items)
        }
        None => None,
    };

    if let Some(precio) = patch.precio {
        check_price(precio)?;
    }

    Ok(CajaFields {
        nombre: trimmed(&patch.nombre)?,
        pais: trimmed(&patch.pais)?,
        descripcion: trimmed(&patch.descripcion)?,
        imagen: trimmed(&patch.imagen)?,
        precio: patch.precio,
        productos,
        extra: patch.extra.clone(),
    })
}

fn clean_products(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

fn check_price(precio: f64) -> Result<(), ClientError> {
    if precio.is_finite() && precio > 0.0 {
        Ok(())
    } else {
        Err(ClientError::validation(INVALID_PRICE))
    }
}
