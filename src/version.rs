//! Release tag computation for CI automation.
//!
//! Release branches are named `release-X.Y`; published tags are
//! `vX.Y.<patch>`. The next tag for a branch is the highest existing patch
//! plus one, or zero when the series is new. The version prefix is later
//! spliced into a `git tag -l` pattern, so its format is validated strictly
//! before any git invocation.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionError {
    #[error("Invalid branch name: {0}. Expected format: release-X.Y")]
    InvalidBranch(String),
    #[error("Invalid version prefix format: {0:?}. Expected format: X.Y (e.g., 1.0, 2.15)")]
    InvalidPrefix(String),
}

/// Result of comparing the crate version against the next release version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionCheck {
    pub valid: bool,
    pub expected: String,
    pub actual: String,
}

fn is_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// True when `prefix` is exactly `X.Y` with numeric components.
pub fn is_valid_prefix(prefix: &str) -> bool {
    let mut parts = prefix.split('.');
    matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(major), Some(minor), None) if is_number(major) && is_number(minor)
    )
}

/// Extract the version prefix from a release branch name.
///
/// `release-1.12` yields `1.12`.
pub fn extract_version_prefix(branch: &str) -> Result<&str, VersionError> {
    let prefix = branch
        .strip_prefix("release-")
        .ok_or_else(|| VersionError::InvalidBranch(branch.to_string()))?;
    if !is_valid_prefix(prefix) {
        return Err(VersionError::InvalidPrefix(prefix.to_string()));
    }
    Ok(prefix)
}

/// Patch number of `tag` when it is exactly `v<prefix>.<patch>`.
///
/// Suffixed tags (snapshots, release candidates) never match.
fn patch_number(tag: &str, prefix: &str) -> Option<u64> {
    let rest = tag
        .strip_prefix('v')?
        .strip_prefix(prefix)?
        .strip_prefix('.')?;
    if is_number(rest) {
        rest.parse().ok()
    } else {
        None
    }
}

/// Existing tags of the series, sorted ascending by patch number.
pub fn release_tags(tags: &[String], prefix: &str) -> Vec<String> {
    let mut matched: Vec<(u64, &String)> = tags
        .iter()
        .filter_map(|tag| patch_number(tag, prefix).map(|patch| (patch, tag)))
        .collect();
    matched.sort_by_key(|(patch, _)| *patch);
    matched.into_iter().map(|(_, tag)| tag.clone()).collect()
}

/// Next patch number for the series: highest existing patch plus one.
pub fn next_patch(tags: &[String], prefix: &str) -> u64 {
    tags.iter()
        .filter_map(|tag| patch_number(tag, prefix))
        .max()
        .map_or(0, |patch| patch + 1)
}

/// Next full version (`X.Y.Z`) for a release branch given the existing tags.
pub fn next_version(branch: &str, tags: &[String]) -> Result<String, VersionError> {
    let prefix = extract_version_prefix(branch)?;
    Ok(format!("{}.{}", prefix, next_patch(tags, prefix)))
}

/// Tag name for a version string.
pub fn tag_for(version: &str) -> String {
    format!("v{version}")
}

/// Compare `actual` (the crate version) against the expected next release
/// version for `branch`.
pub fn validate_version(
    branch: &str,
    tags: &[String],
    actual: &str,
) -> Result<VersionCheck, VersionError> {
    let expected = next_version(branch, tags)?;
    Ok(VersionCheck {
        valid: actual == expected,
        expected,
        actual: actual.to_string(),
    })
}
