//! Shared Module
//!
//! Types and pure rules that do not depend on the server: credential
//! validation and its error type. Everything here is free of I/O so it can
//! be tested in isolation.

/// Shared error types
pub mod error;

/// Username and password rules
pub mod validators;

pub use error::SharedError;
pub use validators::{validate_password, validate_username, Password, Username};
