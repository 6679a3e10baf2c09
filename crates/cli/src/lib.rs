//! # Campus ERP CLI
//!
//! The `erp` binary: one subcommand per portal screen, plus an interactive
//! mode that keeps a session open between commands.

pub mod commands;
pub mod context;
pub mod interactive;
pub mod output;

pub use context::Context;
