use std::io;

use rustyline::error::ReadlineError;
use thiserror::Error;

use crate::{
    config::{Config, ConfigManager},
    core::LedgerManager,
    errors::LedgerError,
    storage::JsonFileStore,
    utils,
};

use super::commands;
use super::output;
use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Failures that stop the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Failures of a single command; reported and the shell keeps running.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error("exit requested")]
    ExitRequested,
}

pub type CommandResult = Result<(), CommandError>;

/// Session state shared by every command handler.
pub struct ShellContext {
    pub mode: CliMode,
    pub running: bool,
    pub(crate) manager: LedgerManager,
    pub(crate) config: Config,
    pub(crate) config_manager: ConfigManager,
    registry: CommandRegistry,
}

impl ShellContext {
    /// Opens the ledger and configuration under the application data directory.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let base = utils::app_data_dir();
        let config_manager = ConfigManager::with_base_dir(base.clone())?;
        let config = config_manager.load()?;
        let store = JsonFileStore::new(utils::store_dir_in(&base))?;
        let manager = LedgerManager::from_config(Box::new(store), &config)?;
        Ok(Self::with_parts(mode, manager, config, config_manager))
    }

    pub fn with_parts(
        mode: CliMode,
        manager: LedgerManager,
        config: Config,
        config_manager: ConfigManager,
    ) -> Self {
        Self {
            mode,
            running: true,
            manager,
            config,
            config_manager,
            registry: commands::registry(),
        }
    }

    pub fn manager(&self) -> &LedgerManager {
        &self.manager
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names()
    }

    pub fn prompt(&self) -> String {
        format!("finplan [{}]> ", self.manager.transactions().len())
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.get(command).map(|entry| entry.handler) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    /// Tokenizes and runs one line of input.
    pub fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match shell_words::split(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(err);
                return Ok(LoopControl::Continue);
            }
        };
        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };
        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        match self.dispatch(&command, raw, &args)? {
            LoopControl::Exit => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            LoopControl::Continue => Ok(LoopControl::Continue),
        }
    }

    fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));
        if let Some(best) = self.registry.suggest(&input.to_lowercase()) {
            output::hint(format!("Did you mean `{best}`?"));
        }
    }

    pub fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::Core(LedgerError::Validation(message)) => {
                output::error(format!("Please complete all fields: {message}"));
            }
            CommandError::Core(other) => output::error(other),
        }
    }
}
