//! Backend Module
//!
//! Server-side code for the twirl credential service: an Axum HTTP server
//! exposing token check, login and sponsored registration, backed by a
//! secret store and a background founder bootstrap.
//!
//! # Architecture
//!
//! - **`auth`** - Credential lifecycle: store, hashing, tokens, service, founder loop
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`error`** - Error taxonomy and HTTP rendering
//!
//! # Concurrency
//!
//! Every request runs independently and may race with the founder loop.
//! No in-process locks guard account creation; the secret store's
//! uniqueness guarantee is the only serialization point.
//!
//! # Error Handling
//!
//! Recoverable failures become `{status, code, msg}` JSON bodies. Fatal
//! ones (store down, signing failure) are escalated through
//! `FatalSignal` and stop the server.

/// Authentication and account management
pub mod auth;

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

pub use error::AuthError;
pub use server::create_app;
