//! Narrows tagged versions to a configured allow-list

use crate::version::types::TaggedVersion;

/// Keep only channel entries whose name is in `allowed_names`.
///
/// Names compare case-insensitively. `satisfies` and `latest` always pass,
/// and an empty allow-list returns the input unchanged. Order is preserved.
pub fn filter_tags(tags: Vec<TaggedVersion>, allowed_names: &[String]) -> Vec<TaggedVersion> {
    if allowed_names.is_empty() {
        return tags;
    }

    let allowed: Vec<String> = allowed_names
        .iter()
        .map(|name| name.trim().to_lowercase())
        .collect();

    tags.into_iter()
        .filter(|tag| tag.is_reserved() || allowed.contains(&tag.name.to_lowercase()))
        .collect()
}
