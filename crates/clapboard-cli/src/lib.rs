//! Clapboard CLI library
//!
//! Command definitions, configuration and handlers behind the `clapboard`
//! binary. Kept in a library so handlers can be tested without spawning the
//! binary.

#![warn(missing_docs)]

pub mod commands;
pub mod config;
mod error;
pub mod handlers;
pub mod manifest;

pub use commands::{
    Cli, Commands, ComposeArgs, DetectArgs, FinishArgs, LogFormat, OutputFormat, PlanArgs,
};
pub use config::{CliConfig, Verbosity};
pub use error::{CliError, CliResult};
pub use manifest::Manifest;
