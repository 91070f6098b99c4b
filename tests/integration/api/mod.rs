//! API integration tests

mod auth_test;
