//! # AI Proxy Shared Library
//!
//! This crate contains the credential bundle, request models and upstream
//! HTTP clients used by the proxy API server.
//!
//! ## Module Organization
//!
//! - `credentials`: Server-held secrets, loaded once at startup
//! - `models`: Request models and the OAuth grant dispatch
//! - `upstream`: Clients for the third-party APIs being proxied

pub mod credentials;
pub mod models;
pub mod upstream;

/// Current version of the shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
