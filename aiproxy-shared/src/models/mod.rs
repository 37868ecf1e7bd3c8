//! Request models shared between the API server and upstream clients
//!
//! - `token_grant`: OAuth token request body and grant dispatch

pub mod token_grant;
