use async_trait::async_trait;
use thiserror::Error;

use crate::database::models::{Caja, CajaFields, DirectoryStats, Usuario};

/// Errors surfaced by repository implementations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Persistence port for catalog entries.
///
/// Implementations must preserve insertion order in `list` and never change
/// an entry's id after creation.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Caja>, RepositoryError>;

    async fn get(&self, id: &str) -> Result<Caja, RepositoryError>;

    /// Store a new entry under a freshly generated id and return it.
    async fn create(&self, fields: CajaFields) -> Result<Caja, RepositoryError>;

    /// Shallow-merge `fields` onto the entry and return the merged result.
    async fn replace(&self, id: &str, fields: CajaFields) -> Result<Caja, RepositoryError>;

    /// Remove the entry and hand it back.
    async fn delete(&self, id: &str) -> Result<Caja, RepositoryError>;
}

/// Persistence port for registered users.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn list(&self) -> Result<Vec<Usuario>, RepositoryError>;

    async fn stats(&self, unit_value: u64) -> Result<DirectoryStats, RepositoryError> {
        let usuarios = self.list().await?;
        Ok(DirectoryStats::from_users(usuarios, unit_value))
    }

    /// Remove the user and hand it back. No subscription check happens here.
    async fn delete(&self, id: &str) -> Result<Usuario, RepositoryError>;
}
