//! Splits raw version lists into stable releases and pre-release channels

use semver::Version;
use tracing::debug;

use crate::version::range::Range;
use crate::version::semver::{channel_name, is_prerelease, parse_version, strip_prerelease};
use crate::version::types::{Classification, is_reserved_name};

/// Partition `raw_versions` into stable releases and named pre-release channels.
///
/// Input order is kept: stable releases stay in caller order and each channel
/// lists its versions in discovery order. Strings that do not parse as semantic
/// versions have no pre-release and are kept as stable releases.
///
/// Pre-releases are dropped when they are textually the requested expression,
/// when the expression is a valid range and the pre-release is older than it
/// (see [`is_older_version`]), or when their channel would be named `satisfies`
/// or `latest`.
pub fn classify(raw_versions: &[String], requested: &str) -> Classification {
    let requested_range = Range::parse(requested).ok();
    let requested_is_prerelease = parse_version(requested).is_some_and(|v| is_prerelease(&v));

    let mut classification = Classification::default();

    for raw in raw_versions {
        let Some(parsed) = parse_version(raw).filter(is_prerelease) else {
            classification.stable_releases.push(raw.clone());
            continue;
        };

        if raw == requested {
            debug!("Skipping {} (already requested)", raw);
            continue;
        }

        if let Some(range) = &requested_range
            && is_older_version(&parsed, range, requested_is_prerelease)
        {
            debug!("Skipping {} (not newer than {})", raw, requested);
            continue;
        }

        let channel = channel_name(&parsed.pre);
        if is_reserved_name(&channel) {
            debug!("Skipping {} (channel {:?} is reserved)", raw, channel);
            continue;
        }

        classification
            .channels
            .entry(channel)
            .or_default()
            .push(raw.clone());
    }

    classification
}

/// Whether a pre-release candidate should be hidden relative to the requested range.
///
/// Against a pre-release request the candidate is compared as is. Otherwise its
/// pre-release suffix is stripped, and it counts as older when it lies below the
/// range or is not strictly above it.
pub fn is_older_version(
    candidate: &Version,
    requested: &Range,
    requested_is_prerelease: bool,
) -> bool {
    if requested_is_prerelease || !is_prerelease(candidate) {
        return requested.ltr(candidate);
    }

    let stripped = strip_prerelease(candidate);
    requested.ltr(&stripped) || !requested.gtr(&stripped)
}
