/// Middleware modules for the API server
///
/// - `security`: No-store and hardening response headers

pub mod security;
