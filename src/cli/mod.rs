pub mod commands;
pub mod output;
mod registry;
mod shell;
mod shell_context;

pub use shell::run_cli;
pub use shell_context::{CliError, CliMode, CommandError, CommandResult, LoopControl, ShellContext};
