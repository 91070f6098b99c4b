//! Common test utilities and helpers
//!
//! This module provides shared utilities for the test suites:
//! - In-memory application fixture and request helpers
//! - PostgreSQL fixtures for the store tests

#![allow(dead_code)]

pub mod auth_helpers;
pub mod database;

pub use auth_helpers::*;
pub use database::*;
