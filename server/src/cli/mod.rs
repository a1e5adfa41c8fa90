// server/src/cli/mod.rs

pub mod cli;
pub mod commands;

pub use cli::{resolve_config, run, selected_services, start_cli};
pub use commands::{CliArgs, HealthifyCommands};
