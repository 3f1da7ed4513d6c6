//! Product configuration trait for CLI binaries
//!
//! This trait defines the compiled-in defaults a binary hands to the core:
//! where the registry lives, what the project configuration file is called,
//! and how HTTP requests identify themselves.

use std::time::Duration;

/// Configuration trait for CLI products built on the installer core
///
/// Each binary implements this trait to define:
/// - Product identity (name, display name)
/// - Registry source URL
/// - Project configuration file name
/// - Network behaviour (user agent, timeout)
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, user agent)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Default base URL of the component registry
    fn default_registry_url(&self) -> &'static str;

    /// Path of the manifest document relative to the registry base
    fn manifest_path(&self) -> &'static str {
        "registry.json"
    }

    /// File name of the persisted project configuration, relative to the project root
    fn config_file_name(&self) -> &'static str;

    /// Upgrade/install command shown in version warnings
    fn upgrade_command(&self) -> &'static str;

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }

    /// Upper bound for a single registry request
    fn request_timeout(&self) -> Duration {
        Duration::from_secs(30)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::ProductConfig;

    /// Product config used across unit tests
    #[derive(Clone)]
    pub struct TestProduct;

    impl ProductConfig for TestProduct {
        fn name(&self) -> &'static str {
            "swiftkit-test"
        }

        fn display_name(&self) -> &'static str {
            "SwiftKit (test)"
        }

        fn default_registry_url(&self) -> &'static str {
            "https://registry.invalid/swiftkit"
        }

        fn config_file_name(&self) -> &'static str {
            "swiftkit.json"
        }

        fn upgrade_command(&self) -> &'static str {
            "cargo install swiftkit --force"
        }
    }
}
