// handlers/protected/mod.rs - Admin handlers (bearer token required)
//
// Route Prefix: /api/admin/*
// Middleware: require_bearer (applied by the router)

pub mod usuarios;
