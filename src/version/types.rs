//! Common types for tagged version resolution

use indexmap::IndexMap;
use serde::Serialize;

/// Name of the entry describing what the requested expression resolves to
pub const SATISFIES_TAG: &str = "satisfies";

/// Name of the entry pointing at the newest stable release
pub const LATEST_TAG: &str = "latest";

/// Whether `name` belongs to one of the synthetic entries
pub fn is_reserved_name(name: &str) -> bool {
    name == SATISFIES_TAG || name == LATEST_TAG
}

/// A named pointer to one specific version, ready for display
///
/// Only the `satisfies` entry carries the flags; `latest` and channel
/// entries serialize as just `name` and `version`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaggedVersion {
    pub name: String,
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_newer_than_latest: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_latest_version: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub satisfies_latest: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_invalid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_match_not_found: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_fixed_version: Option<bool>,
}

impl TaggedVersion {
    /// Creates a plain entry without flags
    pub fn new(name: impl Into<String>, version: Option<String>) -> Self {
        Self {
            name: name.into(),
            version,
            ..Default::default()
        }
    }

    /// True for the `satisfies` and `latest` entries
    pub fn is_reserved(&self) -> bool {
        is_reserved_name(&self.name)
    }

    /// `isLatestVersion` flag, false when unset
    pub fn is_latest(&self) -> bool {
        self.is_latest_version.unwrap_or(false)
    }
}

/// Raw versions split into stable releases and pre-release channels
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Stable releases in input order (newest first by caller contract)
    pub stable_releases: Vec<String>,
    /// Channel name -> versions in discovery order
    pub channels: IndexMap<String, Vec<String>>,
}

/// Outcome of matching the requested expression against available versions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Highest available version satisfying the expression
    Found(String),
    /// Expression is valid but nothing satisfies it
    NotFound,
    /// Expression could not be parsed as a range
    InvalidRange,
}

impl MatchOutcome {
    pub fn version(&self) -> Option<&str> {
        match self {
            MatchOutcome::Found(version) => Some(version.as_str()),
            MatchOutcome::NotFound | MatchOutcome::InvalidRange => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_entry_serializes_name_and_version_only() {
        let entry = TaggedVersion::new("beta", Some("2.1.0-beta.1".to_string()));

        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({ "name": "beta", "version": "2.1.0-beta.1" })
        );
    }

    #[test]
    fn flags_serialize_in_camel_case() {
        let entry = TaggedVersion {
            name: SATISFIES_TAG.to_string(),
            version: None,
            is_invalid: Some(true),
            version_match_not_found: Some(true),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({
                "name": "satisfies",
                "version": null,
                "isInvalid": true,
                "versionMatchNotFound": true
            })
        );
    }
}
