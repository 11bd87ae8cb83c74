//! # CLI Layer
//!
//! One client of the inkpad library, and the only code that knows about
//! stdout, stderr, exit codes and the process environment.
//!
//! - `setup`: clap argument definitions
//! - `commands`: context setup, logging and per-command handlers
//! - `print`: terminal formatting of `CmdResult`s

mod commands;
mod print;
mod setup;

pub use commands::run;
