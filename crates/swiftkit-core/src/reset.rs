//! Wholesale removal of everything the installer created

use crate::error::Result;
use crate::project::{ProjectFiles, StateStore};
use crate::report::Reporter;
use walkdir::WalkDir;

/// What a reset removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetOutcome {
    pub design_system_path: String,
    /// Files that were inside the design-system directory
    pub files_removed: usize,
}

/// Count regular files under a directory (0 if it does not exist)
fn count_files(path: &std::path::Path) -> usize {
    WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .count()
}

/// Delete the design-system directory and the configuration file.
///
/// Returns `None` when the project was never initialized.
pub async fn reset<R: Reporter>(
    files: &ProjectFiles,
    store: &StateStore,
    reporter: &R,
) -> Result<Option<ResetOutcome>> {
    if !store.exists().await? {
        reporter.info("Nothing to reset: project is not initialized");
        return Ok(None);
    }

    let config = store.load().await?;
    let directory = files.resolve(&config.design_system_path)?;
    let files_removed = count_files(&directory);

    if files.remove_directory(&config.design_system_path).await? {
        reporter.success(&format!(
            "Removed {} ({} files)",
            config.design_system_path, files_removed
        ));
    } else {
        reporter.info(&format!("{} was already gone", config.design_system_path));
    }

    store.delete().await?;
    reporter.success(&format!("Removed {}", store.file_name()));

    Ok(Some(ResetOutcome {
        design_system_path: config.design_system_path,
        files_removed,
    }))
}
