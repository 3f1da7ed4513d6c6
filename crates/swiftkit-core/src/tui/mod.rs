//! Terminal front end using cliclack (Charm-style inline prompts)
//!
//! This module is optional and only available when the `tui` feature is enabled.

mod commands;
mod console;

pub use commands::{run_add, run_init, run_list, run_reset, AddArgs, ListArgs, RegistryArgs, ResetArgs};
pub use console::{ConsolePrompter, ConsoleReporter};
