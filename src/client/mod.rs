// client - typed wrapper around the remote admin API
//
// RemoteApi is the seam; ApiClient talks HTTP, the caches hold the
// collections the dashboard works on.

pub mod auth;
pub mod catalog;
pub mod directory;
pub mod error;
pub mod remote;
pub mod session;
pub mod validation;

#[cfg(test)]
pub(crate) mod fake;

pub use catalog::CatalogCache;
pub use directory::DirectoryCache;
pub use error::ClientError;
pub use remote::{ApiClient, RemoteApi, UsuariosPayload};
pub use session::{MemorySessionStore, SessionStore, StoredSession};
pub use validation::{validate_draft, validate_patch, CajaDraft};

/// How a cache reflects a successful mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Reconcile {
    /// Apply the change to the cached collection.
    #[default]
    Local,
    /// Reload the whole collection from the server.
    Refetch,
}
