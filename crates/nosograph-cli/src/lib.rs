//! Nosograph CLI library.
//!
//! This library provides the I/O side of Nosograph: argument parsing, run
//! configuration, source file readers, JSON writers and the build pipeline
//! that wires them to the builders.

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod sources;

pub use cli::{Cli, Command};
pub use config::RunConfig;
pub use error::{CliError, Result};
pub use output::Formatter;
