use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;
use semver::{BuildMetadata, Prerelease, Version};

/// Leading run of a pre-release identifier that names its channel
/// (`alpha.1` -> `alpha`, `rc2` -> `rc`)
static CHANNEL_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^0-9\-]*").expect("channel name regex is valid"));

/// Parse a raw version string into a semver::Version.
///
/// Tolerates surrounding whitespace and a single leading `v` or `=`.
/// Build metadata is kept but never affects ordering (see [`compare_versions`]).
///
/// Examples:
/// - "1.2.3" -> Version(1, 2, 3)
/// - "v1.2.3-beta.1" -> Version(1, 2, 3, pre = "beta.1")
/// - "1.2" -> None
pub fn parse_version(version: &str) -> Option<Version> {
    let version = version.trim();
    let version = version
        .strip_prefix('v')
        .or_else(|| version.strip_prefix('='))
        .unwrap_or(version);
    Version::parse(version.trim_start()).ok()
}

/// Returns true if the parsed version carries a pre-release identifier
pub fn is_prerelease(version: &Version) -> bool {
    !version.pre.is_empty()
}

/// Compare two versions by semver precedence, ignoring build metadata
pub fn compare_versions(a: &Version, b: &Version) -> Ordering {
    a.major
        .cmp(&b.major)
        .then(a.minor.cmp(&b.minor))
        .then(a.patch.cmp(&b.patch))
        .then_with(|| a.pre.cmp(&b.pre))
}

/// Drop pre-release and build metadata, keeping MAJOR.MINOR.PATCH
pub fn strip_prerelease(version: &Version) -> Version {
    Version {
        pre: Prerelease::EMPTY,
        build: BuildMetadata::EMPTY,
        ..version.clone()
    }
}

/// Derive the normalized channel name from a pre-release identifier.
///
/// Only the first dot-separated identifier is considered and trailing
/// iteration numbers are removed, so `alpha.1`, `alpha2` and `Alpha-3`
/// all collapse to `alpha`. When nothing alphabetic leads the identifier
/// (`0`, `2024.1`) the whole pre-release string names the channel.
pub fn channel_name(pre: &Prerelease) -> String {
    let first = pre.as_str().split('.').next().unwrap_or_default();
    let name = CHANNEL_NAME_RE
        .find(first)
        .map(|m| m.as_str())
        .unwrap_or_default();

    if name.is_empty() {
        pre.as_str().to_lowercase()
    } else {
        name.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1.2.3", Some("1.2.3"))]
    #[case("v1.2.3", Some("1.2.3"))]
    #[case("=1.2.3", Some("1.2.3"))]
    #[case("  1.2.3-beta.1 ", Some("1.2.3-beta.1"))]
    #[case("1.2.3+build.5", Some("1.2.3+build.5"))]
    #[case("1.2", None)]
    #[case("latest", None)]
    #[case("", None)]
    fn parse_version_returns_expected(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(
            parse_version(input).map(|v| v.to_string()),
            expected.map(|s| s.to_string())
        );
    }

    #[rstest]
    #[case("1.0.0", "2.0.0", Ordering::Less)]
    #[case("2.1.0-beta.1", "2.1.0-alpha.1", Ordering::Greater)]
    #[case("2.1.0-alpha.1", "2.1.0", Ordering::Less)]
    #[case("1.0.0+a", "1.0.0+b", Ordering::Equal)]
    #[case("1.0.0-rc.10", "1.0.0-rc.9", Ordering::Greater)]
    fn compare_versions_ignores_build_metadata(
        #[case] a: &str,
        #[case] b: &str,
        #[case] expected: Ordering,
    ) {
        let a = parse_version(a).unwrap();
        let b = parse_version(b).unwrap();
        assert_eq!(compare_versions(&a, &b), expected);
    }

    #[test]
    fn strip_prerelease_keeps_core_version() {
        let version = parse_version("2.1.0-alpha.2+sha.1").unwrap();
        assert_eq!(strip_prerelease(&version).to_string(), "2.1.0");
    }

    #[rstest]
    #[case("alpha.1", "alpha")]
    #[case("alpha2", "alpha")]
    #[case("beta", "beta")]
    #[case("RC.1", "rc")]
    #[case("next-3", "next")]
    #[case("canary.20240101", "canary")]
    #[case("0", "0")]
    #[case("2024.1", "2024.1")]
    fn channel_name_strips_iteration_suffix(#[case] pre: &str, #[case] expected: &str) {
        let pre = Prerelease::new(pre).unwrap();
        assert_eq!(channel_name(&pre), expected);
    }
}
