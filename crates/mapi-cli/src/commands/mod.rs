//! Command implementations for the MAPI CLI.
//!
//! `split`, `convert` and `auto` share the read, convert and write
//! pipeline in [`common`]; each module picks its converter.

pub mod auto;
pub mod common;
pub mod completions;
pub mod convert;
pub mod split;
