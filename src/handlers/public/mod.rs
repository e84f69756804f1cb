// handlers/public/mod.rs - Public handlers (no bearer token required)
//
// Token acquisition plus the catalog routes. Catalog writes can be moved
// behind the bearer guard by configuration without touching these handlers.

pub mod auth;
pub mod cajas;

pub use auth::*;
