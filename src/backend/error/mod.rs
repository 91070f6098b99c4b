//! Backend Error Module
//!
//! Error taxonomy of the credential service and its HTTP rendering.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - AuthError and status/code/message mapping
//! └── conversion.rs - IntoResponse and the uniform JSON body
//! ```
//!
//! Recoverable errors are turned into `{status, code, msg}` bodies at the
//! handler boundary. `Fatal` errors are additionally escalated through
//! [`crate::backend::server::state::FatalSignal`] so the process exits.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use conversion::ErrorBody;
pub use types::{AuthError, LOGIN_FAILED_MESSAGE};
