// In-memory RemoteApi that records every call, for the cache tests.

use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Map;

use crate::client::error::ClientError;
use crate::client::remote::{LoginResponse, RegisterRequest, RegisterResponse, RemoteApi, UsuariosPayload};
use crate::database::models::{Caja, CajaFields, Usuario};
use crate::database::seed;

#[derive(Default)]
pub struct FakeApi {
    pub cajas: Mutex<Vec<Caja>>,
    pub usuarios: Mutex<Vec<Usuario>>,
    pub calls: Mutex<Vec<String>>,
    pub fail: Mutex<bool>,
    pub token: Option<String>,
    pub next_id: Mutex<u32>,
    /// Answer updates with the patch alone instead of the stored entry.
    pub echo_patch_only: bool,
}

impl FakeApi {
    pub fn seeded() -> Self {
        Self {
            cajas: Mutex::new(seed::cajas()),
            usuarios: Mutex::new(seed::usuarios()),
            token: Some("mock-jwt-token-1".to_string()),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn set_failing(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    fn record(&self, call: impl Into<String>) -> Result<(), ClientError> {
        self.calls.lock().unwrap().push(call.into());
        if *self.fail.lock().unwrap() {
            return Err(ClientError::Http {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Remote failure".to_string(),
            });
        }
        Ok(())
    }

    fn not_found(message: &str) -> ClientError {
        ClientError::Http {
            status: StatusCode::NOT_FOUND,
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl RemoteApi for FakeApi {
    async fn list_cajas(&self) -> Result<Vec<Caja>, ClientError> {
        self.record("list_cajas")?;
        Ok(self.cajas.lock().unwrap().clone())
    }

    async fn get_caja(&self, id: &str) -> Result<Caja, ClientError> {
        self.record(format!("get_caja {id}"))?;
        let cajas = self.cajas.lock().unwrap();
        cajas.iter().find(|c| c.id == id).cloned().ok_or_else(|| Self::not_found("Box not found"))
    }

    async fn create_caja(&self, fields: &CajaFields) -> Result<Caja, ClientError> {
        self.record("create_caja")?;
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        let caja = Caja::from_fields(format!("fake-{}", *next), fields.clone());
        self.cajas.lock().unwrap().push(caja.clone());
        Ok(caja)
    }

    async fn update_caja(&self, id: &str, fields: &CajaFields) -> Result<CajaFields, ClientError> {
        self.record(format!("update_caja {id}"))?;
        let mut cajas = self.cajas.lock().unwrap();
        let caja = cajas.iter_mut().find(|c| c.id == id).ok_or_else(|| Self::not_found("Box not found"))?;
        caja.merge(fields.clone());
        if self.echo_patch_only {
            return Ok(fields.clone());
        }
        Ok(CajaFields::from(Map::from(caja.clone())))
    }

    async fn delete_caja(&self, id: &str) -> Result<(), ClientError> {
        self.record(format!("delete_caja {id}"))?;
        let mut cajas = self.cajas.lock().unwrap();
        let before = cajas.len();
        cajas.retain(|c| c.id != id);
        if cajas.len() == before {
            return Err(Self::not_found("Box not found"));
        }
        Ok(())
    }

    async fn list_usuarios(&self) -> Result<UsuariosPayload, ClientError> {
        self.record("list_usuarios")?;
        Ok(UsuariosPayload::List(self.usuarios.lock().unwrap().clone()))
    }

    async fn delete_usuario(&self, id: &str) -> Result<(), ClientError> {
        self.record(format!("delete_usuario {id}"))?;
        let mut usuarios = self.usuarios.lock().unwrap();
        let before = usuarios.len();
        usuarios.retain(|u| u.id != id);
        if usuarios.len() == before {
            return Err(Self::not_found("User not found"));
        }
        Ok(())
    }

    async fn login(&self, correo: &str, _contrasena: &str) -> Result<LoginResponse, ClientError> {
        self.record(format!("login {correo}"))?;
        Ok(LoginResponse {
            token: self.token.clone(),
        })
    }

    async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ClientError> {
        self.record(format!("register {}", request.correo))?;
        Ok(RegisterResponse {
            mensaje: "Usuario registrado exitosamente".to_string(),
        })
    }
}
