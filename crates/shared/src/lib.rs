//! # Campus ERP Shared
//!
//! Common types used across all ERP client crates: errors, configuration,
//! the role enumeration and the records exchanged with the REST API.

pub mod config;
pub mod error;
pub mod model;
pub mod role;

// Re-exports
pub use config::*;
pub use error::*;
pub use model::*;
pub use role::*;
