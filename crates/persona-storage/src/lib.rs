//! persona-storage
//!
//! Key/value object storage for results, conversations and profiles.
//! Objects are opaque byte bodies addressed by `/`-separated keys; the
//! JSON helpers in [`objects`] sit on top.

pub mod error;
pub mod fs;
pub mod memory;
pub mod objects;
pub mod store;
