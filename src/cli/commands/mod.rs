pub mod auth;
pub mod cajas;
pub mod usuarios;
