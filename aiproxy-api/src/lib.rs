//! # AI Proxy API Server Library
//!
//! Credentialed pass-through proxy for the audio recognition, generative
//! text and OAuth token APIs used by the client application. Secrets stay
//! on the server; each handler attaches them to exactly one upstream call.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `middleware`: Response header middleware
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
