//! Manifest format version compatibility

use semver::Version;

/// Newest manifest format this build understands
pub const SUPPORTED_MANIFEST_VERSION: &str = "1.0.0";

/// Compare the manifest format version against what this build supports.
/// Returns a warning message if the registry serves a newer format.
pub fn check_compatibility(manifest_version: &str, upgrade_command: &str) -> Option<String> {
    let supported = Version::parse(SUPPORTED_MANIFEST_VERSION).ok()?;
    let served = parse_version(manifest_version)?;

    if served > supported {
        Some(format!(
            "The registry uses manifest format {}, this CLI understands up to {}. \
             Consider updating: {}",
            manifest_version, SUPPORTED_MANIFEST_VERSION, upgrade_command
        ))
    } else {
        None
    }
}

/// Parse version string, accepting a leading 'v' and short `1` / `1.2` forms
pub fn parse_version(version_str: &str) -> Option<Version> {
    let cleaned = version_str.trim().strip_prefix('v').unwrap_or(version_str.trim());
    let padded = match cleaned.matches('.').count() {
        0 => format!("{}.0.0", cleaned),
        1 => format!("{}.0", cleaned),
        _ => cleaned.to_string(),
    };
    Version::parse(&padded).ok()
}
