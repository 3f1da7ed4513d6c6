//! Read-only views of the registry and the project's installed items

use crate::project::ProjectConfig;
use crate::registry::Manifest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleListing {
    pub name: String,
    pub description: String,
    pub file_count: usize,
    /// Dependency names the style satisfies, sorted
    pub provides: Vec<String>,
    /// This is the project's active style
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentListing {
    pub name: String,
    pub description: String,
    pub dependencies: Vec<String>,
    pub installed: bool,
}

/// Everything the registry offers, annotated with project state when available
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub styles: Vec<StyleListing>,
    pub components: Vec<ComponentListing>,
}

impl Catalog {
    /// Build the catalog. Entries come out sorted by name.
    pub fn build(manifest: &Manifest, config: Option<&ProjectConfig>) -> Self {
        let styles = manifest
            .styles
            .iter()
            .map(|(name, style)| StyleListing {
                name: name.clone(),
                description: style.description.clone(),
                file_count: style.files.len(),
                provides: style.provided_names().into_iter().collect(),
                active: config.is_some_and(|c| &c.style == name),
            })
            .collect();

        let components = manifest
            .components
            .iter()
            .map(|(name, component)| ComponentListing {
                name: name.clone(),
                description: component.description.clone(),
                dependencies: component.dependencies.clone(),
                installed: config.is_some_and(|c| c.is_installed(name)),
            })
            .collect();

        Self { styles, components }
    }

    pub fn installed_count(&self) -> usize {
        self.components.iter().filter(|c| c.installed).count()
    }
}
