use crate::client::error::ClientError;
use crate::client::remote::{RegisterRequest, RegisterResponse, RemoteApi};
use crate::client::session::{SessionStore, StoredSession};
use crate::config::SESSION_MAX_AGE_SECS;

pub const NO_TOKEN: &str = "No token received in response";
pub const PASSWORD_MISMATCH: &str = "Passwords do not match";

/// Log in and keep the returned token for later requests.
pub async fn login(
    api: &dyn RemoteApi,
    store: &dyn SessionStore,
    correo: &str,
    contrasena: &str,
) -> Result<String, ClientError> {
    let response = api.login(correo, contrasena).await?;
    let token = response
        .token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ClientError::Decode(NO_TOKEN.to_string()))?;

    store.save(&StoredSession::new(token.clone(), SESSION_MAX_AGE_SECS))?;
    tracing::info!("Logged in as {}", correo);
    Ok(token)
}

pub fn logout(store: &dyn SessionStore) -> Result<(), ClientError> {
    store.clear()?;
    tracing::info!("Session cleared");
    Ok(())
}

pub fn is_authenticated(store: &dyn SessionStore) -> bool {
    store.is_authenticated()
}

/// Register a new account after checking the password confirmation locally.
pub async fn register(
    api: &dyn RemoteApi,
    nombre: &str,
    correo: &str,
    contrasena: &str,
    confirmacion: &str,
) -> Result<RegisterResponse, ClientError> {
    if contrasena != confirmacion {
        return Err(ClientError::validation(PASSWORD_MISMATCH));
    }

    let request = RegisterRequest {
        nombre: nombre.trim().to_string(),
        correo: correo.trim().to_string(),
        contrasena: contrasena.to_string(),
    };
    api.register(&request).await
}
