use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::client::error::ClientError;
use crate::client::session::SessionStore;
use crate::config::ClientConfig;
use crate::database::models::{Caja, CajaFields, DirectoryStats, Usuario};

/// Admin listing as returned by the remote API: either the full stats object
/// or a bare array of users.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UsuariosPayload {
    Stats(PartialStats),
    List(Vec<Usuario>),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialStats {
    #[serde(default)]
    pub total_users: Option<usize>,
    #[serde(default)]
    pub total_subscriptions: Option<usize>,
    #[serde(default)]
    pub total_value: Option<u64>,
    #[serde(default)]
    pub usuarios: Vec<Usuario>,
}

impl UsuariosPayload {
    /// Complete the aggregate, computing anything the server left out with
    /// `unit_value`.
    pub fn into_stats(self, unit_value: u64) -> DirectoryStats {
        let (usuarios, stats) = match self {
            UsuariosPayload::Stats(mut stats) => (std::mem::take(&mut stats.usuarios), stats),
            UsuariosPayload::List(usuarios) => (usuarios, PartialStats::default()),
        };
        let usuarios: Vec<Usuario> = usuarios.into_iter().map(Usuario::normalized).collect();
        let computed = DirectoryStats::from_users(usuarios, unit_value);

        DirectoryStats {
            total_users: stats.total_users.unwrap_or(computed.total_users),
            total_subscriptions: stats.total_subscriptions.unwrap_or(computed.total_subscriptions),
            total_value: stats.total_value.unwrap_or(computed.total_value),
            usuarios: computed.usuarios,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub nombre: String,
    pub correo: String,
    pub contrasena: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub mensaje: String,
}

/// The remote API as seen by the client caches.
#[async_trait]
pub trait RemoteApi: Send + Sync {
    async fn list_cajas(&self) -> Result<Vec<Caja>, ClientError>;
    async fn get_caja(&self, id: &str) -> Result<Caja, ClientError>;
    async fn create_caja(&self, fields: &CajaFields) -> Result<Caja, ClientError>;
    /// The answer may echo only part of the entry; callers merge it.
    async fn update_caja(&self, id: &str, fields: &CajaFields) -> Result<CajaFields, ClientError>;
    async fn delete_caja(&self, id: &str) -> Result<(), ClientError>;

    async fn list_usuarios(&self) -> Result<UsuariosPayload, ClientError>;
    async fn delete_usuario(&self, id: &str) -> Result<(), ClientError>;

    async fn login(&self, correo: &str, contrasena: &str) -> Result<LoginResponse, ClientError>;
    async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ClientError>;
}

/// `reqwest` implementation. The bearer token is read from the session store
/// on every request, so a login or logout takes effect immediately.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, session: Arc<dyn SessionStore>) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.api_url)
            .map_err(|e| ClientError::validation(format!("Invalid API URL '{}': {}", config.api_url, e)))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    /// Base URL with `segments` appended, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::validation(format!("API URL '{}' cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ClientError> {
        let url = self.endpoint(segments)?;

        tracing::debug!("{} {}", method, url);
        let mut builder = self.http.request(method, url);
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    async fn send(builder: RequestBuilder) -> Result<Response, ClientError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body: Option<Value> = response.json().await.ok();
        let message = body
            .as_ref()
            .and_then(|b| b.get("message").or_else(|| b.get("error")))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());

        tracing::warn!("Remote API answered {}: {}", status, message);
        Err(ClientError::Http { status, message })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let value: Value = response.json().await?;
        serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

const CAJAS: [&str; 2] = ["api", "cajas"];
const USUARIOS: [&str; 3] = ["api", "admin", "usuarios"];

#[async_trait]
impl RemoteApi for ApiClient {
    async fn list_cajas(&self) -> Result<Vec<Caja>, ClientError> {
        let response = Self::send(self.request(Method::GET, &CAJAS)?).await?;
        // Anything other than an array is treated as an empty catalog
        match response.json::<Value>().await? {
            items @ Value::Array(_) => {
                serde_json::from_value(items).map_err(|e| ClientError::Decode(e.to_string()))
            }
            _ => Ok(Vec::new()),
        }
    }

    async fn get_caja(&self, id: &str) -> Result<Caja, ClientError> {
        let response = Self::send(self.request(Method::GET, &["api", "cajas", id])?).await?;
        Self::decode(response).await
    }

    async fn create_caja(&self, fields: &CajaFields) -> Result<Caja, ClientError> {
        let response = Self::send(self.request(Method::POST, &CAJAS)?.json(fields)).await?;
        Self::decode(response).await
    }

    async fn update_caja(&self, id: &str, fields: &CajaFields) -> Result<CajaFields, ClientError> {
        let response = Self::send(self.request(Method::PUT, &["api", "cajas", id])?.json(fields)).await?;
        Self::decode(response).await
    }

    async fn delete_caja(&self, id: &str) -> Result<(), ClientError> {
        Self::send(self.request(Method::DELETE, &["api", "cajas", id])?).await?;
        Ok(())
    }

    async fn list_usuarios(&self) -> Result<UsuariosPayload, ClientError> {
        let response = Self::send(self.request(Method::GET, &USUARIOS)?).await?;
        Self::decode(response).await
    }

    async fn delete_usuario(&self, id: &str) -> Result<(), ClientError> {
        Self::send(self.request(Method::DELETE, &["api", "admin", "usuarios", id])?).await?;
        Ok(())
    }

    async fn login(&self, correo: &str, contrasena: &str) -> Result<LoginResponse, ClientError> {
        let body = serde_json::json!({ "correo": correo, "contrasena": contrasena });
        let response = Self::send(self.request(Method::POST, &["api", "auth", "login"])?.json(&body)).await?;
        Self::decode(response).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ClientError> {
        let response = Self::send(self.request(Method::POST, &["api", "auth", "registro"])?.json(request)).await?;
        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stats_payload_keeps_server_totals() {
        let payload: UsuariosPayload = serde_json::from_value(json!({
            "totalUsers": 10,
            "totalSubscriptions": 4,
            "totalValue": 180,
            "usuarios": [{"_id": "u1", "suscripcionActiva": true}]
        }))
        .unwrap();
        let stats = payload.into_stats(45);
        assert_eq!(stats.total_users, 10);
        assert_eq!(stats.total_value, 180);
        assert_eq!(stats.usuarios.len(), 1);
    }

    #[test]
    fn bare_array_is_aggregated_locally() {
        let payload: UsuariosPayload = serde_json::from_value(json!([
            {"_id": "u1", "suscripcionActiva": true, "createdAt": "2024-01-01T00:00:00Z"},
            {"_id": "u2", "suscripcionActiva": false}
        ]))
        .unwrap();
        let stats = payload.into_stats(45);
        assert_eq!(stats.total_users, 2);
        assert_eq!(stats.total_subscriptions, 1);
        assert_eq!(stats.total_value, 45);
        assert_eq!(stats.usuarios[0].fecha_registro, "2024-01-01T00:00:00Z");
    }

    #[test]
    fn object_without_users_is_empty() {
        let payload: UsuariosPayload = serde_json::from_value(json!({"unexpected": true})).unwrap();
        let stats = payload.into_stats(45);
        assert_eq!(stats.total_users, 0);
        assert!(stats.usuarios.is_empty());
    }

    fn client(api_url: &str) -> ApiClient {
        let config = ClientConfig {
            api_url: api_url.to_string(),
            request_timeout_secs: 5,
        };
        ApiClient::new(&config, Arc::new(crate::client::session::MemorySessionStore::default())).unwrap()
    }

    #[test]
    fn endpoints_append_encoded_segments() {
        let api = client("http://localhost:3000");
        assert_eq!(
            api.endpoint(&["api", "cajas", "a/b"]).unwrap().as_str(),
            "http://localhost:3000/api/cajas/a%2Fb"
        );

        let prefixed = client("http://localhost:3000/proxy/");
        assert_eq!(
            prefixed.endpoint(&USUARIOS).unwrap().as_str(),
            "http://localhost:3000/proxy/api/admin/usuarios"
        );
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let config = ClientConfig {
            api_url: "not a url".to_string(),
            request_timeout_secs: 5,
        };
        let session = Arc::new(crate::client::session::MemorySessionStore::default());
        assert!(matches!(ApiClient::new(&config, session), Err(ClientError::Validation(_))));
    }
}
