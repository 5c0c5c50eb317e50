//! Command-line front end for the mathkit calculation engine.

pub mod cli;
pub mod config;

pub use cli::{Cli, Command};
pub use config::MathkitConfig;
