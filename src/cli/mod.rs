//! CLI module for the ishfields binary

pub mod commands;
pub mod error;
pub mod output;

pub use error::CliError;
