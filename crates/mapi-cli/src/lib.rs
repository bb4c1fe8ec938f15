//! MAPI CLI library.
//!
//! Backs the `mapi` and `mapi-handler` executables. Argument parsing,
//! command execution and output formatting live here so they can be
//! tested without spawning processes.

#![allow(clippy::format_push_string)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::unused_async)]

pub mod cli;
pub mod commands;
pub mod formatters;
pub mod handler;
pub mod runner;

pub use cli::{Cli, Commands};
