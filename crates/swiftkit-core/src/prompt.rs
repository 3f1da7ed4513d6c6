//! Interactive questions asked during `init` and `reset`

use crate::error::Result;

/// Source of answers to interactive questions
pub trait Prompter {
    /// Ask for a line of text, offering `default`
    fn input(&self, message: &str, default: &str) -> Result<String>;

    /// Ask a yes/no question
    fn confirm(&self, message: &str, default: bool) -> Result<bool>;
}

/// Prompter that accepts every default without asking
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptDefaults;

impl Prompter for AcceptDefaults {
    fn input(&self, _message: &str, default: &str) -> Result<String> {
        Ok(default.to_string())
    }

    fn confirm(&self, _message: &str, default: bool) -> Result<bool> {
        Ok(default)
    }
}
