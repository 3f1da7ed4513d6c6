//! Dependency resolution and component installation
//!
//! Resolution is depth first: every dependency of a component is installed
//! (file written, state saved) before the component's own file is fetched.
//! State is persisted after each component, so an interrupted run leaves the
//! configuration matching what is on disk and a re-run picks up where it left off.

use crate::error::{Error, Result};
use crate::project::{join_relative, ItemKind, ProjectConfig, ProjectFiles, StateStore};
use crate::registry::{file_base_name, ComponentSource, Manifest};
use crate::report::Reporter;

/// Outcome of installing one target component
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallSummary {
    /// Components written during this run, in install order
    pub installed: Vec<String>,
    /// Dependencies that were already installed
    pub satisfied: Vec<String>,
    /// Dependencies covered by the active style
    pub provided_by_style: Vec<String>,
    /// Dependencies that matched nothing in the manifest
    pub unresolved: Vec<String>,
    /// The target itself was already installed and nothing was done
    pub already_installed: bool,
}

/// Installs components and their transitive dependencies into a project
pub struct Installer<'a, S, R> {
    source: &'a S,
    files: &'a ProjectFiles,
    store: &'a StateStore,
    reporter: &'a R,
}

impl<'a, S: ComponentSource, R: Reporter> Installer<'a, S, R> {
    pub fn new(
        source: &'a S,
        files: &'a ProjectFiles,
        store: &'a StateStore,
        reporter: &'a R,
    ) -> Self {
        Self {
            source,
            files,
            store,
            reporter,
        }
    }

    /// Install `name` and everything it depends on.
    ///
    /// With `force`, the target is re-fetched and rewritten even when it is
    /// already installed; its dependencies still take the installed shortcut.
    pub async fn install(
        &self,
        manifest: &Manifest,
        config: &mut ProjectConfig,
        name: &str,
        force: bool,
    ) -> Result<InstallSummary> {
        let mut summary = InstallSummary::default();
        let mut chain = Vec::new();
        self.resolve(manifest, config, name, force, &mut chain, &mut summary)
            .await?;
        Ok(summary)
    }

    async fn resolve(
        &self,
        manifest: &Manifest,
        config: &mut ProjectConfig,
        name: &str,
        force: bool,
        chain: &mut Vec<String>,
        summary: &mut InstallSummary,
    ) -> Result<()> {
        let entry = manifest
            .component(name)
            .ok_or_else(|| Error::ComponentNotFound {
                name: name.to_string(),
            })?;

        if chain.iter().any(|n| n == name) {
            let mut cycle = chain.clone();
            cycle.push(name.to_string());
            return Err(Error::CyclicDependency { chain: cycle });
        }

        if !force && config.is_installed(name) {
            self.reporter
                .info(&format!("{} is already installed", name));
            if chain.is_empty() {
                summary.already_installed = true;
            }
            return Ok(());
        }

        chain.push(name.to_string());
        for dep in &entry.dependencies {
            // Consult live state: a sibling may have just installed this dependency
            if config.is_installed(dep) {
                self.reporter
                    .info(&format!("Dependency {} already satisfied", dep));
                summary.satisfied.push(dep.clone());
            } else if manifest
                .style(&config.style)
                .is_some_and(|style| style.provides(dep))
            {
                self.reporter.info(&format!(
                    "Dependency {} provided by style '{}'",
                    dep, config.style
                ));
                summary.provided_by_style.push(dep.clone());
            } else if manifest.component(dep).is_some() {
                self.reporter
                    .step(&format!("Installing dependency {} for {}", dep, name));
                Box::pin(self.resolve(manifest, config, dep, false, chain, summary)).await?;
            } else {
                self.reporter.warning(&format!(
                    "Dependency {} of {} not found in registry, continuing without it",
                    dep, name
                ));
                summary.unresolved.push(dep.clone());
            }
        }
        chain.pop();

        self.reporter.step(&format!("Fetching {}", entry.file));
        let content = self.source.fetch_file(&entry.file).await?;

        let destination = join_relative(&config.components_path, file_base_name(&entry.file));
        self.files.write(&content, &destination).await?;

        if config.add_installed_item(name, ItemKind::Component) {
            self.store.save(config).await?;
        }

        self.reporter
            .success(&format!("Installed {} -> {}", name, destination));
        summary.installed.push(name.to_string());
        Ok(())
    }
}
