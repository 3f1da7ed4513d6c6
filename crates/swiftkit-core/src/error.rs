//! Error types for registry, project state, and installation operations

use std::path::PathBuf;

/// Result alias used throughout the core library
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the installer core
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport failure (connection refused, timeout, TLS, ...)
    #[error("Failed to fetch {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The registry answered with a non-success status
    #[error("Failed to fetch {url}: HTTP {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Malformed manifest or configuration document
    #[error("Failed to parse {what}: {message}")]
    Parse { what: String, message: String },

    /// A fetched file could not be interpreted as text
    #[error("File '{path}' is not valid UTF-8")]
    Decode { path: String },

    /// No configuration has been persisted in the project root
    #[error("No configuration found at {}. Run `init` first.", path.display())]
    NotFound { path: PathBuf },

    #[error("Component '{name}' not found in registry")]
    ComponentNotFound { name: String },

    #[error("Style '{name}' not found in registry")]
    StyleNotFound { name: String },

    #[error("Project is already initialized ({}). Use --force to reinitialize.", path.display())]
    AlreadyInitialized { path: PathBuf },

    /// Filesystem failure
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A path escaped the project root or registry base
    #[error("Refusing to use path '{path}': it must point below the project or registry root")]
    UnsafePath { path: String },

    /// A dependency chain loops back on itself
    #[error("Cyclic dependency detected: {}", chain.join(" -> "))]
    CyclicDependency { chain: Vec<String> },

    /// An interactive prompt failed or was interrupted
    #[error("Prompt failed: {source}")]
    Prompt {
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid registry URL '{url}': {reason}")]
    InvalidRegistryUrl { url: String, reason: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(what: impl Into<String>, message: impl ToString) -> Self {
        Self::Parse {
            what: what.into(),
            message: message.to_string(),
        }
    }

    /// Whether this error came from talking to the registry
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::HttpStatus { .. })
    }
}
