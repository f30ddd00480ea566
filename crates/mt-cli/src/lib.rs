//! Meeting timer CLI library.
//!
//! This crate provides the CLI interface for the meeting timer.

mod cli;
pub mod clipboard;
pub mod commands;
mod config;
pub mod render;

pub use cli::{Cli, Commands};
pub use config::Config;
