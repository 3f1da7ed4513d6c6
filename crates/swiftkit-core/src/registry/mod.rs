//! Component registry access
//!
//! This module provides:
//! - Manifest types (Manifest, StyleEntry, ComponentEntry)
//! - Fetching the manifest and raw files from remote URLs or local directories
//! - Manifest format version checking

pub mod client;
pub mod manifest;
pub mod version;

pub use client::{ComponentSource, RegistryClient, RegistrySource};
pub use manifest::{
    file_base_name, file_stem, ComponentEntry, Manifest, ManifestFormat, StyleEntry, DEFAULT_STYLE,
};
pub use version::check_compatibility;
