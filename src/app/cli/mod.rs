//! CLI module containing argument parsing, configuration and output tables

pub mod args;
pub mod config;
pub mod display;

pub use args::{Args, Command};
pub use config::{load_config_file, ConfigError, FileConfig, Settings};

#[cfg(test)]
mod tests;
