//! Registry manifest types and parsing

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Name of the style installed by `init`
pub const DEFAULT_STYLE: &str = "default";

/// A named, ordered bundle of foundational files (tokens, base icons)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleEntry {
    /// Display name of the style
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Remote file paths, installed in this order
    pub files: Vec<String>,

    /// Component names this style satisfies. Derived from file stems when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provides: Option<Vec<String>>,
}

impl StyleEntry {
    /// The exact set of component names that count as satisfied by this style
    pub fn provided_names(&self) -> BTreeSet<String> {
        match &self.provides {
            Some(names) => names.iter().cloned().collect(),
            None => self.files.iter().map(|f| file_stem(f).to_string()).collect(),
        }
    }

    /// Check if a dependency name is provided by this style (exact match)
    pub fn provides(&self, name: &str) -> bool {
        match &self.provides {
            Some(names) => names.iter().any(|n| n == name),
            None => self.files.iter().any(|f| file_stem(f) == name),
        }
    }
}

/// A single independently installable component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentEntry {
    /// Remote path of the component's source file
    pub file: String,

    #[serde(default)]
    pub description: String,

    /// Names of components (or style-provided names) this component needs
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// Remote catalog of styles and components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Manifest format version
    pub version: String,

    #[serde(default)]
    pub styles: BTreeMap<String, StyleEntry>,

    #[serde(default)]
    pub components: BTreeMap<String, ComponentEntry>,
}

/// Document formats a manifest can be served in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Json,
    Yaml,
}

impl ManifestFormat {
    /// Pick the format from the manifest path's extension (JSON unless `.yaml`/`.yml`)
    pub fn from_path(path: &str) -> Self {
        let lower = path.to_ascii_lowercase();
        if lower.ends_with(".yaml") || lower.ends_with(".yml") {
            Self::Yaml
        } else {
            Self::Json
        }
    }
}

impl Manifest {
    /// Parse a manifest document in the given format
    pub fn parse(content: &str, format: ManifestFormat) -> Result<Self> {
        match format {
            ManifestFormat::Json => {
                serde_json::from_str(content).map_err(|e| Error::parse("registry manifest", e))
            }
            ManifestFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| Error::parse("registry manifest", e))
            }
        }
    }

    pub fn component(&self, name: &str) -> Option<&ComponentEntry> {
        self.components.get(name)
    }

    pub fn style(&self, name: &str) -> Option<&StyleEntry> {
        self.styles.get(name)
    }
}

/// Last `/`-separated segment of a remote path
pub fn file_base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Base name without its extension (`styles/Tokens.swift` -> `Tokens`)
pub fn file_stem(path: &str) -> &str {
    let base = file_base_name(path);
    match base.rfind('.') {
        Some(idx) if idx > 0 => &base[..idx],
        _ => base,
    }
}
