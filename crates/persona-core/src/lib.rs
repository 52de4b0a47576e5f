//! persona-core
//!
//! Pure domain types and storage key conventions. No I/O; this is the
//! shared vocabulary between the API, storage and twin crates.

pub mod error;
pub mod keys;
pub mod models;
