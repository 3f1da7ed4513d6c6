//! SwiftKit CLI - add SwiftUI components from the registry to your project

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use swiftkit_core::tui::{AddArgs, ListArgs, RegistryArgs, ResetArgs};
use swiftkit_core::{InitOptions, ProductConfig};

/// SwiftKit product configuration
#[derive(Clone)]
pub struct SwiftKitConfig;

impl ProductConfig for SwiftKitConfig {
    fn name(&self) -> &'static str {
        "swiftkit"
    }

    fn display_name(&self) -> &'static str {
        "SwiftKit"
    }

    fn default_registry_url(&self) -> &'static str {
        "https://raw.githubusercontent.com/swiftkit-ui/swiftkit/main/registry"
    }

    fn config_file_name(&self) -> &'static str {
        "swiftkit.json"
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install swiftkit --force"
    }
}

#[derive(Parser, Debug)]
#[command(name = "swiftkit")]
#[command(about = "Add SwiftUI components from the SwiftKit registry to your project")]
#[command(version)]
pub struct Args {
    /// Registry base URL
    #[arg(long, global = true, env = "SWIFTKIT_REGISTRY_URL")]
    pub registry_url: Option<String>,

    /// Local directory to use as the registry instead of fetching from remote (for development use)
    #[arg(long = "registry-dir", global = true)]
    pub registry_dir: Option<PathBuf>,

    /// Project root (defaults to the current directory)
    #[arg(long, global = true)]
    pub project: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Set up the design-system folders and install the default style
    Init(InitCliArgs),
    /// Add a component and its dependencies
    Add(AddCliArgs),
    /// List available components
    List(ListCliArgs),
    /// Remove the design-system folder and configuration
    Reset(ResetCliArgs),
}

#[derive(Parser, Debug)]
pub struct InitCliArgs {
    /// Design-system folder, relative to the project root
    #[arg(short, long)]
    pub path: Option<String>,

    /// Accept the detected default location without prompting
    #[arg(short, long)]
    pub yes: bool,

    /// Reinitialize even if the project is already set up
    #[arg(short, long)]
    pub force: bool,
}

impl From<InitCliArgs> for InitOptions {
    fn from(args: InitCliArgs) -> Self {
        InitOptions {
            path: args.path,
            yes: args.yes,
            force: args.force,
        }
    }
}

#[derive(Parser, Debug)]
pub struct AddCliArgs {
    /// Component name, as listed by `swiftkit list`
    pub component: String,

    /// Re-fetch and overwrite the component even if it is installed
    #[arg(short, long)]
    pub force: bool,
}

impl From<AddCliArgs> for AddArgs {
    fn from(args: AddCliArgs) -> Self {
        AddArgs {
            component: args.component,
            force: args.force,
        }
    }
}

#[derive(Parser, Debug)]
pub struct ListCliArgs {
    /// Only show what is installed in this project
    #[arg(long)]
    pub installed: bool,
}

#[derive(Parser, Debug)]
pub struct ResetCliArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let config = SwiftKitConfig;

    let root = match args.project {
        Some(path) => path,
        None => std::env::current_dir().context("Failed to determine the current directory")?,
    };
    let registry = RegistryArgs {
        registry_url: args.registry_url,
        registry_dir: args.registry_dir,
    };

    let result = match args.command {
        Command::Init(init_args) => {
            swiftkit_core::tui::run_init(&config, root, &registry, init_args.into()).await
        }
        Command::Add(add_args) => {
            swiftkit_core::tui::run_add(&config, root, &registry, add_args.into()).await
        }
        Command::List(list_args) => {
            let args = ListArgs {
                installed: list_args.installed,
            };
            swiftkit_core::tui::run_list(&config, root, &registry, args).await
        }
        Command::Reset(reset_args) => {
            let args = ResetArgs {
                yes: reset_args.yes,
            };
            swiftkit_core::tui::run_reset(&config, root, args).await
        }
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
