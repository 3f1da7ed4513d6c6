//! SwiftKit Core - installs SwiftUI components from a remote registry into a project
//!
//! The library resolves a requested component, installs its dependencies first,
//! writes every file under the project root, and records what was installed in
//! a configuration file next to the project.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Primitives** - registry client, scoped file writer, state store
//! - **Layer 2: Operations** - `Installer`, `Initializer`, `reset`, `Catalog`
//! - **Layer 3: CLI/TUI Interface** - cliclack-based runners (feature-gated)
//!
//! Core operations receive the project root explicitly and never read the
//! process working directory or environment. Each command runs as a single
//! sequential task: every registry request is awaited before the next starts.
//!
//! Concurrent invocations against the same project root are not supported.
//! The configuration file is not locked and the last writer wins.
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based command runners
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use swiftkit_core::{Installer, Project, RegistryClient, report::Silent};
//! use swiftkit_core::registry::ComponentSource;
//!
//! let project = Project::open(&MyConfig, "/path/to/app");
//! let client = RegistryClient::from_config(&MyConfig, None)?;
//! let manifest = client.fetch_manifest().await?;
//! let mut config = project.store.load().await?;
//! Installer::new(&client, &project.files, &project.store, &Silent)
//!     .install(&manifest, &mut config, "Card", false)
//!     .await?;
//! ```

pub mod error;
pub mod init;
pub mod installer;
pub mod list;
pub mod product;
pub mod project;
pub mod prompt;
pub mod registry;
pub mod report;
pub mod reset;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use init::{InitOptions, Initializer};
pub use installer::{InstallSummary, Installer};
pub use product::ProductConfig;
pub use project::{ItemKind, Project, ProjectConfig, ProjectFiles, StateStore};
pub use registry::{ComponentSource, Manifest, RegistryClient, RegistrySource};
