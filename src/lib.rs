//! twirl - credential service
//!
//! Issues and validates bearer tokens for a small multi-user service:
//! accounts are created by invitation (a currently valid token sponsors
//! each registration), users log in with username and password to get a
//! short-lived signed token, and the token is checked on later requests.
//!
//! # Module Structure
//!
//! - **`shared`** - Pure credential rules (username syntax, password entropy)
//! - **`backend`** - Axum server, secret store, tokens, founder bootstrap
//!
//! # Usage
//!
//! ```rust,no_run
//! use twirl::backend::server::{create_app, FatalSignal, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let (fatal, _fatal_rx) = FatalSignal::channel();
//! let app = create_app(&config, fatal).await?;
//! let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Shared types and pure rules
pub mod shared;

/// Backend server-side code
pub mod backend;
