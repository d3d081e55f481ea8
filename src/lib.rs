// ABOUTME: Library root for nephos - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod error;
pub mod provider;
pub mod provision;
pub mod report;
pub mod types;
