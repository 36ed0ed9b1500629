// ABOUTME: Library root for limani - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod error;
pub mod executor;
pub mod output;
pub mod push;
pub mod registry;
pub mod remove;
pub mod scratch;
pub mod types;
