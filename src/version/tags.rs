//! Assembles and orders the tagged version list

use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::config::TagsConfig;
use crate::version::classifier::classify;
use crate::version::filter::filter_tags;
use crate::version::resolver::{latest_entry, resolve};
use crate::version::semver::{compare_versions, parse_version};
use crate::version::types::TaggedVersion;

/// Combine the satisfies entry, the latest entry and one entry per channel.
///
/// `latest` is skipped when the satisfies entry already is the latest version.
/// Each channel contributes its first discovered version; channel entries are
/// ordered by [`compare_channel_entries`].
pub fn assemble(
    satisfies: TaggedVersion,
    latest: Option<TaggedVersion>,
    channels: &IndexMap<String, Vec<String>>,
) -> Vec<TaggedVersion> {
    let mut channel_entries: Vec<TaggedVersion> = channels
        .iter()
        .map(|(name, versions)| TaggedVersion::new(name.clone(), versions.first().cloned()))
        .collect();
    sort_channel_entries(&mut channel_entries);

    let latest = latest.filter(|_| !satisfies.is_latest());

    std::iter::once(satisfies)
        .chain(latest)
        .chain(channel_entries)
        .collect()
}

/// Sort channel entries, highest version first
pub fn sort_channel_entries(entries: &mut [TaggedVersion]) {
    entries.sort_by(compare_channel_entries);
}

/// Descending semver order of `version`; equal versions fall back to
/// reverse lexicographic `name` order.
///
/// Unparseable versions sort after parseable ones and compare as strings,
/// keeping the order total.
pub fn compare_channel_entries(a: &TaggedVersion, b: &TaggedVersion) -> Ordering {
    let parsed_a = a.version.as_deref().and_then(parse_version);
    let parsed_b = b.version.as_deref().and_then(parse_version);

    let by_version = match (&parsed_a, &parsed_b) {
        (Some(va), Some(vb)) => compare_versions(vb, va),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.version.cmp(&a.version),
    };

    by_version.then_with(|| b.name.cmp(&a.name))
}

/// Run the full pipeline: classify, resolve, assemble and filter.
///
/// `raw_versions` must be ordered newest first; the first stable release
/// becomes `latest`.
pub fn build_tagged_versions(
    raw_versions: &[String],
    requested: &str,
    config: &TagsConfig,
) -> Vec<TaggedVersion> {
    let classification = classify(raw_versions, requested);
    let satisfies = resolve(raw_versions, requested, &classification.stable_releases);
    let latest = latest_entry(&classification.stable_releases);

    let channels = if config.show_prereleases {
        classification.channels
    } else {
        IndexMap::new()
    };

    let tags = assemble(satisfies, latest, &channels);
    filter_tags(tags, &config.allow_list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn entry(name: &str, version: &str) -> TaggedVersion {
        TaggedVersion::new(name, Some(version.to_string()))
    }

    fn satisfies(is_latest_version: bool) -> TaggedVersion {
        TaggedVersion {
            name: "satisfies".to_string(),
            version: Some("2.0.0".to_string()),
            is_latest_version: Some(is_latest_version),
            ..Default::default()
        }
    }

    fn names(tags: &[TaggedVersion]) -> Vec<&str> {
        tags.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn assemble_orders_satisfies_latest_then_channels() {
        let mut channels = IndexMap::new();
        channels.insert("alpha".to_string(), vec!["2.1.0-alpha.1".to_string()]);
        channels.insert("beta".to_string(), vec!["2.1.0-beta.1".to_string()]);

        let tags = assemble(satisfies(false), Some(entry("latest", "2.0.0")), &channels);

        assert_eq!(names(&tags), vec!["satisfies", "latest", "beta", "alpha"]);
    }

    #[test]
    fn assemble_omits_latest_when_satisfies_is_latest() {
        let tags = assemble(satisfies(true), Some(entry("latest", "2.0.0")), &IndexMap::new());

        assert_eq!(names(&tags), vec!["satisfies"]);
    }

    #[test]
    fn assemble_uses_first_version_of_each_channel() {
        let mut channels = IndexMap::new();
        channels.insert(
            "rc".to_string(),
            vec!["3.0.0-rc.1".to_string(), "3.0.0-rc.2".to_string()],
        );

        let tags = assemble(satisfies(false), None, &channels);

        assert_eq!(tags[1], entry("rc", "3.0.0-rc.1"));
    }

    #[rstest]
    #[case(entry("beta", "2.1.0-beta.1"), entry("alpha", "2.1.0-alpha.1"), Ordering::Less)]
    #[case(entry("alpha", "2.1.0-alpha.1"), entry("beta", "2.1.0-beta.1"), Ordering::Greater)]
    #[case(entry("next", "3.0.0-0"), entry("canary", "3.0.0-0"), Ordering::Less)]
    #[case(entry("canary", "3.0.0-0"), entry("next", "3.0.0-0"), Ordering::Greater)]
    #[case(entry("rc", "1.0.0-rc.1+a"), entry("rc", "1.0.0-rc.1+b"), Ordering::Equal)]
    #[case(entry("zzz", "garbage"), entry("rc", "1.0.0-rc.1"), Ordering::Greater)]
    fn compare_channel_entries_returns_expected(
        #[case] a: TaggedVersion,
        #[case] b: TaggedVersion,
        #[case] expected: Ordering,
    ) {
        assert_eq!(compare_channel_entries(&a, &b), expected);
    }

    #[test]
    fn sort_channel_entries_is_descending() {
        let mut entries = vec![
            entry("alpha", "1.0.0-alpha.1"),
            entry("rc", "1.0.0-rc.1"),
            entry("next", "2.0.0-next.0"),
            entry("beta", "1.0.0-beta.3"),
        ];

        sort_channel_entries(&mut entries);

        assert_eq!(names(&entries), vec!["next", "rc", "beta", "alpha"]);
    }

    #[test]
    fn build_tagged_versions_hides_channels_when_prereleases_disabled() {
        let versions: Vec<String> = ["2.0.0", "2.1.0-beta.1"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let config = TagsConfig {
            show_prereleases: false,
            ..Default::default()
        };

        let tags = build_tagged_versions(&versions, "2.0.0", &config);

        assert_eq!(names(&tags), vec!["satisfies"]);
    }
}
