//! Tenant records and the signup hooks that guard them.

pub mod entity;
pub mod error;

pub use error::*;
