//! Persisted project configuration: layout paths and installed items
//!
//! The configuration is a JSON document in the project root. Keys are written
//! in sorted order so the file diffs cleanly under version control.
//!
//! There is no file locking. Two invocations against the same project root
//! race on this file and the last save wins.

use super::files::ProjectFiles;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use tokio::fs;

/// Current configuration document version
pub const CONFIG_VERSION: &str = "1.0.0";

/// Kind of an installed item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Component,
    Style,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Component => "component",
            ItemKind::Style => "style",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record that a name/kind pair has been materialized into the project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledItem {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub installed_at: DateTime<Utc>,
}

/// Project configuration as persisted in the project root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub version: String,
    pub design_system_path: String,
    pub components_path: String,
    pub styles_path: String,
    /// Active style name
    pub style: String,
    #[serde(default)]
    pub installed: Vec<InstalledItem>,
}

impl ProjectConfig {
    /// Fresh configuration rooted at `design_system_path` with nothing installed
    pub fn new(design_system_path: &str, style: &str) -> Self {
        let design_system_path = design_system_path.trim_end_matches('/').to_string();
        Self {
            version: CONFIG_VERSION.to_string(),
            components_path: join_relative(&design_system_path, "Components"),
            styles_path: join_relative(&design_system_path, "Styles"),
            design_system_path,
            style: style.to_string(),
            installed: Vec::new(),
        }
    }

    /// True iff any installed item, of any kind, has this name
    pub fn is_installed(&self, name: &str) -> bool {
        self.installed.iter().any(|item| item.name == name)
    }

    pub fn is_installed_as(&self, name: &str, kind: ItemKind) -> bool {
        self.installed
            .iter()
            .any(|item| item.name == name && item.kind == kind)
    }

    /// Record an installed item with the current timestamp.
    /// Returns false (and changes nothing) if the name/kind pair is already recorded.
    pub fn add_installed_item(&mut self, name: &str, kind: ItemKind) -> bool {
        if self.is_installed_as(name, kind) {
            return false;
        }
        self.installed.push(InstalledItem {
            name: name.to_string(),
            kind,
            installed_at: Utc::now(),
        });
        true
    }

    pub fn installed_of(&self, kind: ItemKind) -> impl Iterator<Item = &InstalledItem> {
        self.installed.iter().filter(move |item| item.kind == kind)
    }
}

/// Join two project-relative paths with `/`, treating an empty base as the root
pub fn join_relative(base: &str, child: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.is_empty() || base == "." {
        child.to_string()
    } else {
        format!("{}/{}", base, child)
    }
}

/// Serialize a configuration with sorted keys, pretty printed, newline terminated
pub fn to_stable_json(config: &ProjectConfig) -> Result<String> {
    // serde_json::Value keeps object keys in a BTreeMap, which sorts them
    let value =
        serde_json::to_value(config).map_err(|e| Error::parse("project configuration", e))?;
    let mut out = serde_json::to_string_pretty(&value)
        .map_err(|e| Error::parse("project configuration", e))?;
    out.push('\n');
    Ok(out)
}

/// Loads and saves the project configuration file
#[derive(Debug, Clone)]
pub struct StateStore {
    files: ProjectFiles,
    file_name: String,
}

impl StateStore {
    pub fn new(files: ProjectFiles, file_name: &str) -> Self {
        Self {
            files,
            file_name: file_name.to_string(),
        }
    }

    /// Absolute path of the configuration file
    pub fn path(&self) -> PathBuf {
        self.files.root().join(&self.file_name)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Whether a configuration has been persisted in the project root
    pub async fn exists(&self) -> Result<bool> {
        self.files.exists(&self.file_name).await
    }

    pub async fn load(&self) -> Result<ProjectConfig> {
        let path = self.path();
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::NotFound { path });
            }
            Err(e) => return Err(Error::io(&path, e)),
        };
        serde_json::from_str(&content).map_err(|e| Error::parse(path.display().to_string(), e))
    }

    /// Atomically overwrite the configuration file
    pub async fn save(&self, config: &ProjectConfig) -> Result<()> {
        let content = to_stable_json(config)?;
        self.files.write(&content, &self.file_name).await?;
        Ok(())
    }

    /// Remove the configuration file. Returns false if there was none.
    pub async fn delete(&self) -> Result<bool> {
        self.files.remove_file(&self.file_name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> StateStore {
        StateStore::new(ProjectFiles::new(dir.path()), "swiftkit.json")
    }

    #[test]
    fn test_new_derives_subpaths() {
        let config = ProjectConfig::new("Sources/DesignSystem/", "default");
        assert_eq!(config.design_system_path, "Sources/DesignSystem");
        assert_eq!(config.components_path, "Sources/DesignSystem/Components");
        assert_eq!(config.styles_path, "Sources/DesignSystem/Styles");
        assert!(config.installed.is_empty());
    }

    #[test]
    fn test_add_installed_item_is_unique_per_kind() {
        let mut config = ProjectConfig::new("DesignSystem", "default");
        assert!(config.add_installed_item("Button", ItemKind::Component));
        assert!(!config.add_installed_item("Button", ItemKind::Component));
        // Same name with another kind is a distinct pair
        assert!(config.add_installed_item("Button", ItemKind::Style));
        assert_eq!(config.installed.len(), 2);
        assert!(config.is_installed("Button"));
        assert!(!config.is_installed("Card"));
        assert_eq!(config.installed_of(ItemKind::Style).count(), 1);
    }

    #[test]
    fn test_serialization_uses_sorted_camel_case_keys() {
        let mut config = ProjectConfig::new("DesignSystem", "default");
        config.add_installed_item("Tokens", ItemKind::Style);
        let json = to_stable_json(&config).unwrap();

        let keys = [
            "\"componentsPath\"",
            "\"designSystemPath\"",
            "\"installed\"",
            "\"style\": ",
            "\"stylesPath\"",
            "\"version\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);

        assert!(json.contains("\"type\": \"style\""));
        assert!(json.contains("\"installedAt\""));
        assert!(json.ends_with('\n'));
    }

    #[tokio::test]
    async fn test_load_missing_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        assert!(!store.exists().await.unwrap());
        assert!(matches!(store.load().await, Err(Error::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_load_malformed_is_parse_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("swiftkit.json"), "{\"version\": 1").unwrap();
        assert!(matches!(store(&dir).load().await, Err(Error::Parse { .. })));
    }

    #[tokio::test]
    async fn test_save_load_round_trip_is_stable() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let mut config = ProjectConfig::new("App/DesignSystem", "default");
        config.add_installed_item("Tokens", ItemKind::Style);
        config.add_installed_item("Button", ItemKind::Component);

        store.save(&config).await.unwrap();
        let first = std::fs::read_to_string(store.path()).unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, config);

        store.save(&loaded).await.unwrap();
        let second = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_delete() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store
            .save(&ProjectConfig::new("DesignSystem", "default"))
            .await
            .unwrap();
        assert!(store.exists().await.unwrap());
        assert!(store.delete().await.unwrap());
        assert!(!store.exists().await.unwrap());
        assert!(!store.delete().await.unwrap());
    }
}
