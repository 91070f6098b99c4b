//! Authentication Module
//!
//! The credential lifecycle: password hashing, signed session tokens,
//! sponsor-gated registration, and the founder bootstrap that seeds the
//! first account.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - Account model and the SecretStore contract
//! ├── store.rs        - PostgreSQL and in-memory stores
//! ├── password.rs     - bcrypt hashing
//! ├── sessions.rs     - JWT issuance and verification
//! ├── service.rs      - check / login / register orchestration
//! ├── founder.rs      - founder bootstrap loop
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── types.rs    - Request/response types
//!     ├── check.rs    - Token check handler
//!     ├── login.rs    - Login handler
//!     └── register.rs - Sponsored registration handler
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Bootstrap**: empty store → founder account seeded from configuration
//! 2. **Login**: username + password → password verified → token returned
//! 3. **Check**: bearer token → signature, expiry and account verified → claims returned
//! 4. **Register**: sponsor token + username + password → account created
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt (cost 10 by default)
//! - Tokens are HS256 JWTs that expire 5 minutes after issuance
//! - A token stops working as soon as its account is deleted
//! - Unknown user and wrong password look the same to clients

/// Account model and store contract
pub mod users;

/// Secret store implementations
pub mod store;

/// Password hashing
pub mod password;

/// JWT token generation and validation
pub mod sessions;

/// Auth service orchestration
pub mod service;

/// Founder account bootstrap
pub mod founder;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use founder::{BootstrapState, FounderBootstrap};
pub use handlers::types::{CredentialsRequest, TokenResponse};
pub use handlers::{check, login, register};
pub use password::PasswordHasher;
pub use service::AuthService;
pub use sessions::{Claims, TokenError, TokenKeys};
pub use store::{MemoryAccountStore, PgAccountStore};
pub use users::{Account, SecretStore, StoreError};
