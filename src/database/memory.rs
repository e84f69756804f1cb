// Process-local stores backing the admin API until a real database is wired in.
// Contents do not survive a restart.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::database::models::{Caja, CajaFields, Usuario};
use crate::database::repository::{CatalogRepository, RepositoryError, UserDirectory};
use crate::database::seed;

#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    entries: Arc<RwLock<Vec<Caja>>>,
}

impl InMemoryCatalog {
    pub fn new(entries: Vec<Caja>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    /// Catalog preloaded with the mock boxes.
    pub fn seeded() -> Self {
        Self::new(seed::cajas())
    }

    fn not_found(id: &str) -> RepositoryError {
        RepositoryError::NotFound(format!("caja {id}"))
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalog {
    async fn list(&self) -> Result<Vec<Caja>, RepositoryError> {
        Ok(self.entries.read().await.clone())
    }

    async fn get(&self, id: &str) -> Result<Caja, RepositoryError> {
        self.entries
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    async fn create(&self, fields: CajaFields) -> Result<Caja, RepositoryError> {
        let caja = Caja::from_fields(Uuid::new_v4().simple().to_string(), fields);
        self.entries.write().await.push(caja.clone());
        debug!("Stored caja {}", caja.id);
        Ok(caja)
    }

    async fn replace(&self, id: &str, fields: CajaFields) -> Result<Caja, RepositoryError> {
        let mut entries = self.entries.write().await;
        let caja = entries
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        caja.merge(fields);
        Ok(caja.clone())
    }

    async fn delete(&self, id: &str) -> Result<Caja, RepositoryError> {
        let mut entries = self.entries.write().await;
        let index = entries
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        Ok(entries.remove(index))
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryUsers {
    usuarios: Arc<RwLock<Vec<Usuario>>>,
}

impl InMemoryUsers {
    pub fn new(usuarios: Vec<Usuario>) -> Self {
        Self {
            usuarios: Arc::new(RwLock::new(usuarios)),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed::usuarios())
    }
}

#[async_trait]
impl UserDirectory for InMemoryUsers {
    async fn list(&self) -> Result<Vec<Usuario>, RepositoryError> {
        Ok(self.usuarios.read().await.clone())
    }

    async fn delete(&self, id: &str) -> Result<Usuario, RepositoryError> {
        let mut usuarios = self.usuarios.write().await;
        let index = usuarios
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("usuario {id}")))?;
        Ok(usuarios.remove(index))
    }
}
