// handlers/public/auth/mod.rs - Public authentication handlers
//
// Token acquisition endpoints that do not require authentication.

pub mod login;    // POST /api/auth/login - authenticate and get bearer token
pub mod register; // POST /api/auth/registro - acknowledge a customer registration

pub use login::login_post;
pub use register::registro_post;
