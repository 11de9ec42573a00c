//! System orchestration, startup, and shutdown logic.

pub mod config;
pub mod error;
pub mod inventory_system;
pub mod logging;

pub use config::*;
pub use error::*;
pub use inventory_system::*;
pub use logging::*;
