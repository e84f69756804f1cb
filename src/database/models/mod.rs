pub mod caja;
pub mod usuario;

pub use caja::{Caja, CajaFields};
pub use usuario::{estimated_value, DirectoryStats, Usuario};
