//! Server Module
//!
//! Startup wiring for the HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and the fatal signal
//! ├── config.rs       - Environment configuration
//! └── init.rs         - Store, service and router assembly
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `ServerConfig::from_env`
//! 2. **Store**: PostgreSQL via sqlx, or in-memory when `DATABASE_URL=memory`
//! 3. **Service**: `AuthService` with the injected `TokenKeys`
//! 4. **Background Tasks**: founder bootstrap loop
//! 5. **Router Creation**: auth routes plus request tracing

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::{ConfigError, ServerConfig, StoreBackend};
pub use init::{create_app, InitError};
pub use state::{AppState, FatalReceiver, FatalSignal};
