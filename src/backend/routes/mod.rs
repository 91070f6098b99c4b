//! Routes Module
//!
//! HTTP route configuration.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs         - Module exports and documentation
//! ├── router.rs      - Router assembly, tracing layer, fallback
//! └── api_routes.rs  - /api/v1/auth endpoints
//! ```

/// Main router creation
pub mod router;

/// API routes (auth)
pub mod api_routes;

pub use router::create_router;
