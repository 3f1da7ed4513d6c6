//! First-run project setup
//!
//! Detects where sources live, lays out the design-system directories, and
//! installs the default style's files. A failure while installing style files
//! does not abort setup: whatever succeeded is recorded and saved.

use crate::error::{Error, Result};
use crate::project::{join_relative, ItemKind, ProjectConfig, ProjectFiles, StateStore};
use crate::prompt::Prompter;
use crate::registry::{file_base_name, file_stem, ComponentSource, Manifest, DEFAULT_STYLE};
use crate::report::Reporter;
use std::path::Path;
use walkdir::WalkDir;

/// Folder names that commonly hold Swift sources
const SOURCE_FOLDERS: &[&str] = &["Sources", "App", "src"];

/// Name of the design-system folder created under the detected base
pub const DESIGN_SYSTEM_FOLDER: &str = "DesignSystem";

/// Options for the `init` command
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Explicit design-system path, relative to the project root
    pub path: Option<String>,
    /// Accept the computed default instead of prompting
    pub yes: bool,
    /// Reinitialize even if a configuration exists
    pub force: bool,
}

/// What was found in the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Project-relative folder the design system goes under ("" for the root)
    pub base: String,
    /// The file or folder that identified the layout
    pub marker: Option<String>,
}

impl ProjectLayout {
    /// Default design-system path for this layout
    pub fn default_design_system_path(&self) -> String {
        join_relative(&self.base, DESIGN_SYSTEM_FOLDER)
    }
}

/// Probe the project root (not recursively) for recognizable project markers
pub fn detect_layout(root: &Path) -> ProjectLayout {
    let mut files = Vec::new();
    let mut dirs = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().is_dir() {
            dirs.push(name);
        } else {
            files.push(name);
        }
    }
    let has_dir = |name: &str| dirs.iter().any(|d| d == name);

    if files.iter().any(|f| f == "Package.swift") {
        let base = if has_dir("Sources") { "Sources" } else { "" };
        return ProjectLayout {
            base: base.to_string(),
            marker: Some("Package.swift".to_string()),
        };
    }

    if let Some(project) = dirs.iter().find(|d| d.ends_with(".xcodeproj")) {
        let name = project.trim_end_matches(".xcodeproj");
        let base = if has_dir(name) { name } else { "" };
        return ProjectLayout {
            base: base.to_string(),
            marker: Some(project.clone()),
        };
    }

    for folder in SOURCE_FOLDERS {
        if has_dir(folder) {
            return ProjectLayout {
                base: folder.to_string(),
                marker: Some(format!("{}/", folder)),
            };
        }
    }

    ProjectLayout {
        base: String::new(),
        marker: None,
    }
}

/// Result of initializing a project
#[derive(Debug)]
pub struct InitOutcome {
    pub config: ProjectConfig,
    pub manifest: Manifest,
    /// Style file that could not be installed, with the error, if any
    pub failed: Option<(String, Error)>,
}

/// Sets up a project for component installation
pub struct Initializer<'a, S, R, P> {
    source: &'a S,
    files: &'a ProjectFiles,
    store: &'a StateStore,
    reporter: &'a R,
    prompter: &'a P,
}

impl<'a, S: ComponentSource, R: Reporter, P: Prompter> Initializer<'a, S, R, P> {
    pub fn new(
        source: &'a S,
        files: &'a ProjectFiles,
        store: &'a StateStore,
        reporter: &'a R,
        prompter: &'a P,
    ) -> Self {
        Self {
            source,
            files,
            store,
            reporter,
            prompter,
        }
    }

    pub async fn initialize(&self, options: &InitOptions) -> Result<InitOutcome> {
        if !options.force && self.store.exists().await? {
            return Err(Error::AlreadyInitialized {
                path: self.store.path(),
            });
        }

        let requested = self.design_system_path(options)?;
        // Checked before anything is created. The root itself is refused since
        // reset removes the whole design-system directory.
        let design_system_path = self.files.relativize(&requested)?;
        if design_system_path.is_empty() {
            return Err(Error::UnsafePath { path: requested });
        }

        let mut config = ProjectConfig::new(&design_system_path, DEFAULT_STYLE);
        self.files.ensure_directory(&config.components_path).await?;
        self.files.ensure_directory(&config.styles_path).await?;
        self.reporter.success(&format!(
            "Created {} and {}",
            config.components_path, config.styles_path
        ));

        self.reporter.step("Fetching registry manifest");
        let manifest = self.source.fetch_manifest().await?;
        let style = manifest
            .style(DEFAULT_STYLE)
            .ok_or_else(|| Error::StyleNotFound {
                name: DEFAULT_STYLE.to_string(),
            })?;

        let mut failed = None;
        for file in &style.files {
            match self.install_style_file(&config, file).await {
                Ok(destination) => {
                    config.add_installed_item(file_stem(file), ItemKind::Style);
                    self.reporter
                        .success(&format!("Installed {}", destination));
                }
                Err(e) => {
                    self.reporter
                        .error(&format!("Failed to install {}: {}", file, e));
                    self.reporter.warning(&format!(
                        "Style installation is incomplete. Copy the remaining files of style '{}' into {} manually.",
                        DEFAULT_STYLE, config.styles_path
                    ));
                    failed = Some((file.clone(), e));
                    break;
                }
            }
        }

        self.store.save(&config).await?;
        self.reporter.success(&format!(
            "Saved configuration to {}",
            self.store.file_name()
        ));

        Ok(InitOutcome {
            config,
            manifest,
            failed,
        })
    }

    /// Explicit path > accepted default > prompt
    fn design_system_path(&self, options: &InitOptions) -> Result<String> {
        if let Some(path) = options.path.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            return Ok(path.to_string());
        }

        let layout = detect_layout(self.files.root());
        match &layout.marker {
            Some(marker) => self.reporter.info(&format!("Detected {}", marker)),
            None => self.reporter.warning(
                "No Package.swift, Xcode project, or source folder found. Using the project root.",
            ),
        }

        let default = layout.default_design_system_path();
        if options.yes {
            return Ok(default);
        }

        let answer = self
            .prompter
            .input("Where should the design system live?", &default)?;
        let answer = answer.trim();
        Ok(if answer.is_empty() {
            default
        } else {
            answer.to_string()
        })
    }

    async fn install_style_file(&self, config: &ProjectConfig, file: &str) -> Result<String> {
        let content = self.source.fetch_file(file).await?;
        let destination = join_relative(&config.styles_path, file_base_name(file));
        self.files.write(&content, &destination).await?;
        Ok(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::installer::tests::{component, manifest, FakeSource};
    use crate::prompt::AcceptDefaults;
    use crate::report::testing::Recorder;
    use crate::report::Level;
    use tempfile::TempDir;

    struct FixedAnswer(&'static str);

    impl Prompter for FixedAnswer {
        fn input(&self, _message: &str, _default: &str) -> Result<String> {
            Ok(self.0.to_string())
        }

        fn confirm(&self, _message: &str, default: bool) -> Result<bool> {
            Ok(default)
        }
    }

    fn tokens_and_icons() -> FakeSource {
        FakeSource::new(manifest(
            &[("Button", component("components/Button.swift", &[]))],
            &["Tokens.swift", "Icons.swift"],
        ))
    }

    async fn init_with<P: Prompter>(
        dir: &TempDir,
        source: &FakeSource,
        prompter: &P,
        options: InitOptions,
    ) -> (Result<InitOutcome>, Recorder) {
        let files = ProjectFiles::new(dir.path());
        let store = StateStore::new(files.clone(), "swiftkit.json");
        let reporter = Recorder::default();
        let outcome = Initializer::new(source, &files, &store, &reporter, prompter)
            .initialize(&options)
            .await;
        (outcome, reporter)
    }

    fn yes() -> InitOptions {
        InitOptions {
            yes: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_detect_swift_package() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("Package.swift"), "// swift-tools-version:5.9").unwrap();
        std::fs::create_dir(dir.path().join("Sources")).unwrap();

        let layout = detect_layout(dir.path());
        assert_eq!(layout.base, "Sources");
        assert_eq!(layout.marker.as_deref(), Some("Package.swift"));
        assert_eq!(layout.default_design_system_path(), "Sources/DesignSystem");
    }

    #[test]
    fn test_detect_xcode_project() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("Weather.xcodeproj")).unwrap();
        std::fs::create_dir(dir.path().join("Weather")).unwrap();

        let layout = detect_layout(dir.path());
        assert_eq!(layout.base, "Weather");
        assert_eq!(layout.marker.as_deref(), Some("Weather.xcodeproj"));
    }

    #[test]
    fn test_detect_source_folder() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("App")).unwrap();

        let layout = detect_layout(dir.path());
        assert_eq!(layout.base, "App");
    }

    #[test]
    fn test_detect_nothing_falls_back_to_root() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "hi").unwrap();

        let layout = detect_layout(dir.path());
        assert_eq!(layout.base, "");
        assert!(layout.marker.is_none());
        assert_eq!(layout.default_design_system_path(), "DesignSystem");
    }

    #[tokio::test]
    async fn test_init_yes_installs_default_style() {
        let dir = TempDir::new().unwrap();
        let source = tokens_and_icons();

        let (outcome, reporter) = init_with(&dir, &source, &AcceptDefaults, yes()).await;
        let outcome = outcome.unwrap();

        let installed: Vec<(&str, ItemKind)> = outcome
            .config
            .installed
            .iter()
            .map(|i| (i.name.as_str(), i.kind))
            .collect();
        assert_eq!(
            installed,
            vec![("Tokens", ItemKind::Style), ("Icons", ItemKind::Style)]
        );
        assert!(dir.path().join("DesignSystem/Styles/Tokens.swift").is_file());
        assert!(dir.path().join("DesignSystem/Styles/Icons.swift").is_file());
        assert!(dir.path().join("DesignSystem/Components").is_dir());
        assert!(outcome.failed.is_none());
        // Empty project root: a warning, not an error
        assert!(reporter.has(Level::Warning, "project root"));

        let store = StateStore::new(ProjectFiles::new(dir.path()), "swiftkit.json");
        assert_eq!(store.load().await.unwrap(), outcome.config);
    }

    #[tokio::test]
    async fn test_init_uses_detected_layout() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("Package.swift"), "").unwrap();
        std::fs::create_dir(dir.path().join("Sources")).unwrap();
        let source = tokens_and_icons();

        let (outcome, _) = init_with(&dir, &source, &AcceptDefaults, yes()).await;
        let config = outcome.unwrap().config;

        assert_eq!(config.design_system_path, "Sources/DesignSystem");
        assert!(dir
            .path()
            .join("Sources/DesignSystem/Styles/Tokens.swift")
            .is_file());
    }

    #[tokio::test]
    async fn test_explicit_path_wins_over_prompt() {
        let dir = TempDir::new().unwrap();
        let source = tokens_and_icons();
        let options = InitOptions {
            path: Some("UI/Kit".to_string()),
            ..Default::default()
        };

        let (outcome, _) = init_with(&dir, &source, &FixedAnswer("Ignored"), options).await;
        let config = outcome.unwrap().config;

        assert_eq!(config.components_path, "UI/Kit/Components");
        assert_eq!(config.styles_path, "UI/Kit/Styles");
    }

    #[tokio::test]
    async fn test_prompt_answer_used_without_yes() {
        let dir = TempDir::new().unwrap();
        let source = tokens_and_icons();

        let (outcome, _) =
            init_with(&dir, &source, &FixedAnswer("Shared/Design"), InitOptions::default()).await;

        assert_eq!(outcome.unwrap().config.design_system_path, "Shared/Design");
    }

    #[tokio::test]
    async fn test_already_initialized_requires_force() {
        let dir = TempDir::new().unwrap();
        let source = tokens_and_icons();
        init_with(&dir, &source, &AcceptDefaults, yes()).await.0.unwrap();

        let (second, _) = init_with(&dir, &source, &AcceptDefaults, yes()).await;
        assert!(matches!(second, Err(Error::AlreadyInitialized { .. })));

        let forced = InitOptions {
            yes: true,
            force: true,
            ..Default::default()
        };
        let (third, _) = init_with(&dir, &source, &AcceptDefaults, forced).await;
        assert_eq!(third.unwrap().config.installed.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_default_style() {
        let dir = TempDir::new().unwrap();
        let mut m = manifest(&[], &[]);
        m.styles.clear();
        let source = FakeSource::new(m);

        let (outcome, _) = init_with(&dir, &source, &AcceptDefaults, yes()).await;
        assert!(matches!(outcome, Err(Error::StyleNotFound { name }) if name == "default"));
        assert!(!dir.path().join("swiftkit.json").exists());
    }

    #[tokio::test]
    async fn test_partial_style_failure_still_saves() {
        let dir = TempDir::new().unwrap();
        let source = tokens_and_icons();
        source.fail_on("Icons.swift");

        let (outcome, reporter) = init_with(&dir, &source, &AcceptDefaults, yes()).await;
        let outcome = outcome.unwrap();

        assert_eq!(outcome.failed.as_ref().map(|(f, _)| f.as_str()), Some("Icons.swift"));
        assert_eq!(outcome.config.installed.len(), 1);
        assert!(reporter.has(Level::Error, "Icons.swift"));
        assert!(reporter.has(Level::Warning, "manually"));

        let store = StateStore::new(ProjectFiles::new(dir.path()), "swiftkit.json");
        let saved = store.load().await.unwrap();
        assert!(saved.is_installed_as("Tokens", ItemKind::Style));
        assert!(!saved.is_installed("Icons"));
    }

    #[tokio::test]
    async fn test_unsafe_path_rejected() {
        let dir = TempDir::new().unwrap();
        let source = tokens_and_icons();
        let options = InitOptions {
            path: Some("../outside".to_string()),
            ..Default::default()
        };

        let (outcome, _) = init_with(&dir, &source, &AcceptDefaults, options).await;
        assert!(matches!(outcome, Err(Error::UnsafePath { .. })));
    }

    #[tokio::test]
    async fn test_project_root_rejected_as_design_system() {
        let dir = TempDir::new().unwrap();
        let source = tokens_and_icons();

        for path in [".", "./", "./."] {
            let options = InitOptions {
                path: Some(path.to_string()),
                ..Default::default()
            };
            let (outcome, _) = init_with(&dir, &source, &AcceptDefaults, options).await;
            assert!(matches!(outcome, Err(Error::UnsafePath { .. })), "{path}");
        }

        let (outcome, _) =
            init_with(&dir, &source, &FixedAnswer("."), InitOptions::default()).await;
        assert!(matches!(outcome, Err(Error::UnsafePath { .. })));

        assert!(!dir.path().join("swiftkit.json").exists());
        assert!(!dir.path().join("Components").exists());
        assert!(source.fetched().is_empty());
    }

    #[tokio::test]
    async fn test_initialized_project_can_always_be_reset() {
        let dir = TempDir::new().unwrap();
        let source = tokens_and_icons();
        let options = InitOptions {
            path: Some("./Kit/".to_string()),
            ..Default::default()
        };

        let (outcome, _) = init_with(&dir, &source, &AcceptDefaults, options).await;
        assert_eq!(outcome.unwrap().config.design_system_path, "Kit");

        let files = ProjectFiles::new(dir.path());
        let store = StateStore::new(files.clone(), "swiftkit.json");
        crate::reset::reset(&files, &store, &Recorder::default())
            .await
            .unwrap();

        assert!(!store.exists().await.unwrap());
        assert!(!dir.path().join("Kit").exists());
    }

    #[tokio::test]
    async fn test_absolute_path_inside_root_is_made_relative() {
        let dir = TempDir::new().unwrap();
        let source = tokens_and_icons();
        let absolute = dir.path().join("UI").join("Kit");
        let options = InitOptions {
            path: Some(absolute.to_string_lossy().into_owned()),
            ..Default::default()
        };

        let (outcome, _) = init_with(&dir, &source, &AcceptDefaults, options).await;
        let config = outcome.unwrap().config;

        assert_eq!(config.design_system_path, "UI/Kit");
        assert_eq!(config.components_path, "UI/Kit/Components");
        assert!(dir.path().join("UI/Kit/Styles/Tokens.swift").is_file());
    }

    #[tokio::test]
    async fn test_absolute_path_outside_root_rejected() {
        let dir = TempDir::new().unwrap();
        let other = TempDir::new().unwrap();
        let source = tokens_and_icons();
        let options = InitOptions {
            path: Some(other.path().join("Kit").to_string_lossy().into_owned()),
            ..Default::default()
        };

        let (outcome, _) = init_with(&dir, &source, &AcceptDefaults, options).await;
        assert!(matches!(outcome, Err(Error::UnsafePath { .. })));
    }
}
