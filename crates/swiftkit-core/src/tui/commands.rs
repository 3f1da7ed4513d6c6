//! Command runners: wire the core operations to the terminal

use super::console::{ConsolePrompter, ConsoleReporter};
use crate::init::{InitOptions, Initializer};
use crate::installer::Installer;
use crate::list::Catalog;
use crate::product::ProductConfig;
use crate::project::{ItemKind, Project, ProjectConfig};
use crate::prompt::Prompter;
use crate::registry::{version, ComponentSource, Manifest, RegistryClient, RegistrySource};
use crate::reset;
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

/// Where to load the registry from
#[derive(Debug, Clone, Default)]
pub struct RegistryArgs {
    /// Registry base URL (overrides the product default)
    pub registry_url: Option<String>,

    /// Local registry directory (for development use)
    pub registry_dir: Option<PathBuf>,
}

/// Arguments for the add command
#[derive(Debug, Clone)]
pub struct AddArgs {
    pub component: String,
    pub force: bool,
}

/// Arguments for the list command
#[derive(Debug, Clone, Default)]
pub struct ListArgs {
    /// Only show what the project has installed
    pub installed: bool,
}

/// Arguments for the reset command
#[derive(Debug, Clone, Default)]
pub struct ResetArgs {
    /// Skip the confirmation prompt
    pub yes: bool,
}

fn setup_client<C: ProductConfig>(config: &C, registry: &RegistryArgs) -> Result<RegistryClient> {
    let client = match &registry.registry_dir {
        Some(path) => {
            cliclack::log::info(format!("Using local registry from {}", path.display()))?;
            RegistryClient::with_source(config, RegistrySource::local(path.clone()))
        }
        None => {
            let client = RegistryClient::from_config(config, registry.registry_url.as_deref())?;
            if let RegistrySource::Remote(url) = client.source() {
                cliclack::log::info(format!("Using registry {}", url))?;
            }
            client
        }
    };

    Ok(client)
}

async fn load_manifest<C: ProductConfig>(config: &C, client: &RegistryClient) -> Result<Manifest> {
    let spinner = cliclack::spinner();
    spinner.start("Loading registry...");

    let manifest = match client.fetch_manifest().await {
        Ok(manifest) => manifest,
        Err(e) => {
            spinner.stop("Failed to load registry");
            if e.is_network() {
                cliclack::log::info(
                    "Check your connection, or point --registry-url / --registry-dir at another registry",
                )?;
            }
            return Err(e.into());
        }
    };
    spinner.stop(format!(
        "Registry loaded ({} components, {} styles)",
        manifest.components.len(),
        manifest.styles.len()
    ));

    warn_if_incompatible(config, &manifest)?;
    Ok(manifest)
}

fn warn_if_incompatible<C: ProductConfig>(config: &C, manifest: &Manifest) -> Result<()> {
    if let Some(warning) = version::check_compatibility(&manifest.version, config.upgrade_command())
    {
        cliclack::log::warning(warning)?;
    }
    Ok(())
}

/// Run `init`: lay out the design system and install the default style
pub async fn run_init<C: ProductConfig>(
    config: &C,
    root: PathBuf,
    registry: &RegistryArgs,
    options: InitOptions,
) -> Result<()> {
    cliclack::intro(format!("{} init", config.display_name()))?;

    let project = Project::open(config, root);
    let client = setup_client(config, registry)?;

    let outcome = Initializer::new(
        &client,
        &project.files,
        &project.store,
        &ConsoleReporter,
        &ConsolePrompter,
    )
    .initialize(&options)
    .await?;

    warn_if_incompatible(config, &outcome.manifest)?;

    match outcome.failed {
        Some((file, _)) => cliclack::outro(format!(
            "Initialized with errors: {} and later style files are missing",
            file
        ))?,
        None => cliclack::outro(format!(
            "Ready! Add components with `{} add <component>`",
            config.name()
        ))?,
    }

    Ok(())
}

/// Run `add`: install one component and its dependencies
pub async fn run_add<C: ProductConfig>(
    config: &C,
    root: PathBuf,
    registry: &RegistryArgs,
    args: AddArgs,
) -> Result<()> {
    cliclack::intro(format!("{} add {}", config.display_name(), args.component))?;

    let project = Project::open(config, root);
    let mut project_config = project.store.load().await?;
    let client = setup_client(config, registry)?;
    let manifest = load_manifest(config, &client).await?;

    let summary = Installer::new(&client, &project.files, &project.store, &ConsoleReporter)
        .install(&manifest, &mut project_config, &args.component, args.force)
        .await?;

    if summary.already_installed {
        cliclack::outro(format!(
            "{} is already installed. Use --force to reinstall it.",
            args.component
        ))?;
    } else {
        cliclack::outro(format!(
            "Installed {} component(s) into {}",
            summary.installed.len(),
            project_config.components_path
        ))?;
    }

    Ok(())
}

/// Run `list`: print the registry catalog or the installed items
pub async fn run_list<C: ProductConfig>(
    config: &C,
    root: PathBuf,
    registry: &RegistryArgs,
    args: ListArgs,
) -> Result<()> {
    let project = Project::open(config, root);

    if args.installed {
        let project_config = project.store.load().await?;
        print_installed(&project_config);
        return Ok(());
    }

    let project_config = if project.store.exists().await? {
        Some(project.store.load().await?)
    } else {
        None
    };

    let client = setup_client(config, registry)?;
    let manifest = load_manifest(config, &client).await?;
    print_catalog(&Catalog::build(&manifest, project_config.as_ref()), project_config.is_some());

    Ok(())
}

fn print_installed(project_config: &ProjectConfig) {
    println!();
    if project_config.installed.is_empty() {
        println!("  {}", "Nothing installed yet.".dimmed());
        return;
    }

    for kind in [ItemKind::Style, ItemKind::Component] {
        let items: Vec<_> = project_config.installed_of(kind).collect();
        if items.is_empty() {
            continue;
        }
        let heading = match kind {
            ItemKind::Style => format!("Styles ({})", project_config.style),
            ItemKind::Component => "Components".to_string(),
        };
        println!("{}", heading.cyan().bold());
        for item in items {
            println!(
                "  {} {:<20} {}",
                "✓".green(),
                item.name,
                item.installed_at.format("%Y-%m-%d %H:%M").to_string().dimmed()
            );
        }
        println!();
    }
}

fn print_catalog(catalog: &Catalog, has_project: bool) {
    println!();
    println!("{}", "Styles".cyan().bold());
    for style in &catalog.styles {
        let marker = if style.active { "●".green() } else { "○".dimmed() };
        println!(
            "  {} {:<20} {} {}",
            marker,
            style.name,
            style.description,
            format!("({} files)", style.file_count).dimmed()
        );
        if !style.provides.is_empty() {
            println!(
                "    {:<20} {}",
                "",
                format!("provides {}", style.provides.join(", ")).dimmed()
            );
        }
    }

    println!();
    println!("{}", "Components".cyan().bold());
    for component in &catalog.components {
        let marker = if component.installed {
            "✓".green()
        } else {
            "-".dimmed()
        };
        let deps = if component.dependencies.is_empty() {
            String::new()
        } else {
            format!("[needs {}]", component.dependencies.join(", "))
        };
        println!(
            "  {} {:<20} {} {}",
            marker,
            component.name,
            component.description,
            deps.dimmed()
        );
    }

    println!();
    if has_project {
        println!(
            "{} of {} components installed",
            catalog.installed_count(),
            catalog.components.len()
        );
    } else {
        println!("{}", "Project not initialized. Run `init` to get started.".yellow());
    }
}

/// Run `reset`: delete the design-system directory and configuration
pub async fn run_reset<C: ProductConfig>(config: &C, root: PathBuf, args: ResetArgs) -> Result<()> {
    cliclack::intro(format!("{} reset", config.display_name()))?;

    let project = Project::open(config, root);
    if !project.store.exists().await? {
        cliclack::outro("Nothing to reset: project is not initialized")?;
        return Ok(());
    }

    let project_config = project.store.load().await?;
    if !args.yes {
        let confirmed = ConsolePrompter.confirm(
            &format!(
                "Delete {} and {}? This cannot be undone.",
                project_config.design_system_path,
                project.store.file_name()
            ),
            false,
        )?;
        if !confirmed {
            cliclack::outro_cancel("Reset cancelled")?;
            return Ok(());
        }
    }

    if let Some(outcome) = reset::reset(&project.files, &project.store, &ConsoleReporter).await? {
        cliclack::outro(format!(
            "Reset complete: removed {} files from {}",
            outcome.files_removed, outcome.design_system_path
        ))?;
    }

    Ok(())
}
