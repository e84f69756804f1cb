pub mod memory;
pub mod models;
pub mod repository;
pub mod seed;

pub use memory::{InMemoryCatalog, InMemoryUsers};
pub use repository::{CatalogRepository, RepositoryError, UserDirectory};
