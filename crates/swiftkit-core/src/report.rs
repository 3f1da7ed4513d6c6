//! Status reporting for long-running operations
//!
//! Core operations emit one status line per step through a [`Reporter`]. The
//! `tui` feature prints them with cliclack; tests record them.

/// Severity of a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Step,
    Success,
    Warning,
    Error,
}

/// Sink for human-readable status lines
pub trait Reporter {
    fn report(&self, level: Level, message: &str);

    fn info(&self, message: &str) {
        self.report(Level::Info, message);
    }

    fn step(&self, message: &str) {
        self.report(Level::Step, message);
    }

    fn success(&self, message: &str) {
        self.report(Level::Success, message);
    }

    fn warning(&self, message: &str) {
        self.report(Level::Warning, message);
    }

    fn error(&self, message: &str) {
        self.report(Level::Error, message);
    }
}

/// Reporter that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Reporter for Silent {
    fn report(&self, _level: Level, _message: &str) {}
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{Level, Reporter};
    use std::sync::Mutex;

    /// Collects every status line for assertions
    #[derive(Default)]
    pub struct Recorder {
        lines: Mutex<Vec<(Level, String)>>,
    }

    impl Recorder {
        pub fn lines(&self) -> Vec<(Level, String)> {
            self.lines.lock().unwrap().clone()
        }

        pub fn has(&self, level: Level, needle: &str) -> bool {
            self.lines()
                .iter()
                .any(|(l, m)| *l == level && m.contains(needle))
        }
    }

    impl Reporter for Recorder {
        fn report(&self, level: Level, message: &str) {
            self.lines.lock().unwrap().push((level, message.to_string()));
        }
    }
}
