//! Local project access: scoped file writes and the persisted configuration

pub mod files;
pub mod state;

pub use files::ProjectFiles;
pub use state::{
    join_relative, to_stable_json, InstalledItem, ItemKind, ProjectConfig, StateStore,
    CONFIG_VERSION,
};

use crate::product::ProductConfig;
use std::path::PathBuf;

/// File writer and state store bound to one project root
#[derive(Debug, Clone)]
pub struct Project {
    pub files: ProjectFiles,
    pub store: StateStore,
}

impl Project {
    /// Open the project rooted at `root` using the product's configuration file name
    pub fn open<C: ProductConfig>(config: &C, root: impl Into<PathBuf>) -> Self {
        let files = ProjectFiles::new(root);
        let store = StateStore::new(files.clone(), config.config_file_name());
        Self { files, store }
    }
}
