//! cliclack-backed status output and prompts

use crate::error::{Error, Result};
use crate::prompt::Prompter;
use crate::report::{Level, Reporter};

/// Prints status lines as cliclack log entries
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, level: Level, message: &str) {
        // A closed terminal is not worth failing an install over
        let _ = match level {
            Level::Info => cliclack::log::info(message),
            Level::Step => cliclack::log::step(message),
            Level::Success => cliclack::log::success(message),
            Level::Warning => cliclack::log::warning(message),
            Level::Error => cliclack::log::error(message),
        };
    }
}

/// Asks questions inline with cliclack
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsolePrompter;

impl Prompter for ConsolePrompter {
    fn input(&self, message: &str, default: &str) -> Result<String> {
        cliclack::input(message)
            .placeholder(default)
            .default_input(default)
            .interact()
            .map_err(|source| Error::Prompt { source })
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        cliclack::confirm(message)
            .initial_value(default)
            .interact()
            .map_err(|source| Error::Prompt { source })
    }
}
