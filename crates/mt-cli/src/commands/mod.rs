//! CLI subcommand implementations.

pub mod preview;
pub mod run;
pub mod util;
