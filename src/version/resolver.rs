//! Resolves the requested version expression against published versions

use std::cmp::Ordering;

use tracing::debug;

use crate::version::range::{self, Range, max_satisfying};
use crate::version::semver::{compare_versions, parse_version};
use crate::version::types::{LATEST_TAG, MatchOutcome, SATISFIES_TAG, TaggedVersion};

/// Find the highest valid version in `raw_versions` satisfying `requested`.
///
/// Unparseable versions are ignored; an unparseable expression yields
/// [`MatchOutcome::InvalidRange`] rather than an error.
pub fn match_requested(raw_versions: &[String], requested: &str) -> MatchOutcome {
    let range = match Range::parse(requested) {
        Ok(range) => range,
        Err(e) => {
            debug!("Requested version {:?} is not a range: {}", requested, e);
            return MatchOutcome::InvalidRange;
        }
    };

    match max_satisfying(raw_versions, &range) {
        Some(version) => MatchOutcome::Found(version.to_string()),
        None => MatchOutcome::NotFound,
    }
}

/// True if `requested` names exactly one version (`1.2.3`, `=1.2.3`, `v1.2.3`)
pub fn is_fixed_version(requested: &str) -> bool {
    range::valid_range(requested) && parse_version(requested).is_some()
}

/// Build the `satisfies` entry for `requested`.
///
/// `stable_releases` is expected newest first; its first element is the
/// latest release the flags are computed against.
pub fn resolve(
    raw_versions: &[String],
    requested: &str,
    stable_releases: &[String],
) -> TaggedVersion {
    let outcome = match_requested(raw_versions, requested);
    let matched = outcome.version();
    let latest = stable_releases.first().map(|s| s.as_str());

    let satisfies_latest = match (matched, latest) {
        (Some(matched), Some(latest)) => range::satisfies(matched, latest),
        _ => false,
    };

    let is_newer_than_latest = !satisfies_latest
        && match (matched.and_then(parse_version), latest.and_then(parse_version)) {
            (Some(matched), Some(latest)) => {
                compare_versions(&matched, &latest) == Ordering::Greater
            }
            _ => false,
        };

    let is_latest_version =
        satisfies_latest && latest.is_some_and(|latest| requested.contains(latest));

    debug!("Resolved {:?} to {:?} (latest: {:?})", requested, outcome, latest);

    TaggedVersion {
        name: SATISFIES_TAG.to_string(),
        version: matched.map(|s| s.to_string()),
        is_newer_than_latest: Some(is_newer_than_latest),
        is_latest_version: Some(is_latest_version),
        satisfies_latest: Some(satisfies_latest),
        is_invalid: Some(outcome == MatchOutcome::InvalidRange),
        version_match_not_found: Some(matched.is_none()),
        is_fixed_version: Some(is_fixed_version(requested)),
    }
}

/// The `latest` entry, absent when there is no stable release
pub fn latest_entry(stable_releases: &[String]) -> Option<TaggedVersion> {
    stable_releases
        .first()
        .map(|latest| TaggedVersion::new(LATEST_TAG, Some(latest.clone())))
}
