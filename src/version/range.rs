//! npm-style version range expressions
//!
//! Supports the node-semver range grammar:
//! - `1.2.3`, `=1.2.3`, `v1.2.3` - exact match
//! - `^1.2.3` - compatible with version (>=1.2.3 <2.0.0-0)
//! - `~1.2.3` - approximately equivalent (>=1.2.3 <1.3.0-0)
//! - `>=1.2.3`, `>1.2.3`, `<=1.2.3`, `<1.2.3` - comparison operators
//! - `1.2.x`, `1.x`, `1.2`, `1`, `*`, `` - wildcards and partial versions
//! - `1.2.3 - 2.3.4` - hyphen ranges
//! - `>=1.0.0 <2.0.0` - AND (space-separated), `^1.0.0 || ^2.0.0` - OR
//!
//! Every expression is desugared into a disjunction of comparator sets, which
//! keeps satisfaction and the "outside" tests ([`Range::ltr`], [`Range::gtr`]) uniform.

use std::cmp::Ordering;
use std::sync::LazyLock;

use semver::{BuildMetadata, Prerelease, Version};

use crate::version::error::RangeError;
use crate::version::semver::{compare_versions, parse_version};

/// The `-0` pre-release used for exclusive upper bounds (`<2.0.0-0`)
/// Largest accepted version component, matching node-semver's
/// `Number.MAX_SAFE_INTEGER` limit; bounds add 1 to components
const MAX_COMPONENT: u64 = 9_007_199_254_740_991;

static LOWEST_PRE: LazyLock<Prerelease> =
    LazyLock::new(|| Prerelease::new("0").expect("0 is a valid pre-release"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

/// A single primitive comparison such as `>=1.2.3`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparator {
    pub op: Operator,
    pub version: Version,
}

impl Comparator {
    fn new(op: Operator, version: Version) -> Self {
        Self { op, version }
    }

    fn any() -> Self {
        Self::new(Operator::Gte, Version::new(0, 0, 0))
    }

    fn none() -> Self {
        Self::new(Operator::Lt, floor(0, 0, 0))
    }

    fn test(&self, version: &Version) -> bool {
        let ord = compare_versions(version, &self.version);
        match self.op {
            Operator::Eq => ord == Ordering::Equal,
            Operator::Gt => ord == Ordering::Greater,
            Operator::Gte => ord != Ordering::Less,
            Operator::Lt => ord == Ordering::Less,
            Operator::Lte => ord != Ordering::Greater,
        }
    }
}

/// A parsed range: OR of comparator sets, each an AND of comparators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Range {
    sets: Vec<Vec<Comparator>>,
}

impl Range {
    /// Parse a range expression
    pub fn parse(spec: &str) -> Result<Self, RangeError> {
        let sets = spec
            .split("||")
            .map(parse_comparator_set)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { sets })
    }

    /// Check if a version satisfies this range
    ///
    /// A pre-release version only satisfies a comparator set that itself
    /// names a pre-release on the same `MAJOR.MINOR.PATCH`.
    pub fn satisfies(&self, version: &Version) -> bool {
        self.sets.iter().any(|set| test_set(set, version))
    }

    /// True if the version is lower than every version the range admits
    pub fn ltr(&self, version: &Version) -> bool {
        self.outside(version, Direction::Below)
    }

    /// True if the version is higher than every version the range admits
    pub fn gtr(&self, version: &Version) -> bool {
        self.outside(version, Direction::Above)
    }

    fn outside(&self, version: &Version, direction: Direction) -> bool {
        if self.satisfies(version) {
            return false;
        }

        let (comp, ecomp) = direction.operators();

        for set in &self.sets {
            let Some(first) = set.first() else {
                continue;
            };
            let mut high = first;
            let mut low = first;
            for comparator in set {
                if direction.toward(&comparator.version, &high.version) == Ordering::Greater {
                    high = comparator;
                } else if direction.toward(&comparator.version, &low.version) == Ordering::Less {
                    low = comparator;
                }
            }

            // The edge comparator is open toward the version
            if high.op == comp || high.op == ecomp {
                return false;
            }

            let toward_low = direction.toward(version, &low.version);
            if (low.op == Operator::Eq || low.op == comp) && toward_low != Ordering::Greater {
                return false;
            } else if low.op == ecomp && toward_low == Ordering::Less {
                return false;
            }
        }

        true
    }
}

/// Which side of a range `Range::outside` tests
#[derive(Debug, Clone, Copy)]
enum Direction {
    Above,
    Below,
}

impl Direction {
    fn operators(self) -> (Operator, Operator) {
        match self {
            Direction::Above => (Operator::Gt, Operator::Gte),
            Direction::Below => (Operator::Lt, Operator::Lte),
        }
    }

    /// Ordering of `a` relative to `b` as seen from this side
    fn toward(self, a: &Version, b: &Version) -> Ordering {
        match self {
            Direction::Above => compare_versions(a, b),
            Direction::Below => compare_versions(b, a),
        }
    }
}

/// Returns true if the expression parses as a range
pub fn valid_range(spec: &str) -> bool {
    Range::parse(spec).is_ok()
}

/// Check a raw version against a raw range expression.
/// Unparseable input on either side never satisfies.
pub fn satisfies(version: &str, spec: &str) -> bool {
    let (Some(version), Ok(range)) = (parse_version(version), Range::parse(spec)) else {
        return false;
    };
    range.satisfies(&version)
}

/// Highest valid version in `versions` satisfying `range`.
/// On equal precedence the earliest entry wins.
pub fn max_satisfying<'a>(versions: &'a [String], range: &Range) -> Option<&'a str> {
    versions
        .iter()
        .filter_map(|raw| parse_version(raw).map(|parsed| (raw.as_str(), parsed)))
        .filter(|(_, parsed)| range.satisfies(parsed))
        .fold(None, |best: Option<(&str, Version)>, candidate| match best {
            Some(best) if compare_versions(&candidate.1, &best.1) != Ordering::Greater => {
                Some(best)
            }
            _ => Some(candidate),
        })
        .map(|(raw, _)| raw)
}

fn test_set(set: &[Comparator], version: &Version) -> bool {
    if !set.iter().all(|comparator| comparator.test(version)) {
        return false;
    }

    if version.pre.is_empty() {
        return true;
    }

    set.iter().any(|comparator| {
        let allowed = &comparator.version;
        !allowed.pre.is_empty()
            && allowed.major == version.major
            && allowed.minor == version.minor
            && allowed.patch == version.patch
    })
}

fn parse_comparator_set(spec: &str) -> Result<Vec<Comparator>, RangeError> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Ok(vec![Comparator::any()]);
    }

    if let Some((from, to)) = spec.split_once(" - ") {
        return parse_hyphen(from, to);
    }

    let mut comparators = Vec::new();
    for token in split_tokens(spec) {
        comparators.extend(parse_comparator(&token)?);
    }
    Ok(comparators)
}

/// Split on whitespace, re-attaching operators written apart from their
/// version (`>= 1.2.3` -> `>=1.2.3`)
fn split_tokens(spec: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut pending_op = String::new();

    for word in spec.split_whitespace() {
        if word.chars().all(|c| matches!(c, '<' | '>' | '=' | '^' | '~')) {
            pending_op.push_str(word);
            continue;
        }
        tokens.push(format!("{}{}", std::mem::take(&mut pending_op), word));
    }

    if !pending_op.is_empty() {
        tokens.push(pending_op);
    }
    tokens
}

fn parse_hyphen(from: &str, to: &str) -> Result<Vec<Comparator>, RangeError> {
    let from = Partial::parse(from.trim())
        .map_err(|_| RangeError::InvalidHyphenRange(format!("{} - {}", from, to)))?;
    let to = Partial::parse(to.trim())
        .map_err(|_| RangeError::InvalidHyphenRange(format!("{} - {}", from.raw, to)))?;

    let lower = match (from.major, from.minor, from.patch) {
        (None, _, _) => Comparator::any(),
        (Some(major), None, _) => Comparator::new(Operator::Gte, Version::new(major, 0, 0)),
        (Some(major), Some(minor), None) => {
            Comparator::new(Operator::Gte, Version::new(major, minor, 0))
        }
        (Some(_), Some(_), Some(_)) => Comparator::new(Operator::Gte, from.to_version()),
    };

    let upper = match (to.major, to.minor, to.patch) {
        (None, _, _) => None,
        (Some(major), None, _) => Some(Comparator::new(Operator::Lt, floor(major + 1, 0, 0))),
        (Some(major), Some(minor), None) => {
            Some(Comparator::new(Operator::Lt, floor(major, minor + 1, 0)))
        }
        (Some(_), Some(_), Some(_)) => Some(Comparator::new(Operator::Lte, to.to_version())),
    };

    Ok(std::iter::once(lower).chain(upper).collect())
}

fn parse_comparator(token: &str) -> Result<Vec<Comparator>, RangeError> {
    let invalid = || RangeError::InvalidComparator(token.to_string());

    let (op, rest) = if let Some(rest) = token.strip_prefix(">=") {
        (Some(Operator::Gte), rest)
    } else if let Some(rest) = token.strip_prefix("<=") {
        (Some(Operator::Lte), rest)
    } else if let Some(rest) = token.strip_prefix('>') {
        (Some(Operator::Gt), rest)
    } else if let Some(rest) = token.strip_prefix('<') {
        (Some(Operator::Lt), rest)
    } else if let Some(rest) = token.strip_prefix('^') {
        return Partial::parse(rest).map(caret).map_err(|_| invalid());
    } else if let Some(rest) = token.strip_prefix("~>").or_else(|| token.strip_prefix('~')) {
        return Partial::parse(rest).map(tilde).map_err(|_| invalid());
    } else if let Some(rest) = token.strip_prefix('=') {
        (None, rest)
    } else {
        (None, token)
    };

    let partial = Partial::parse(rest).map_err(|_| invalid())?;
    Ok(match op {
        None => x_range(partial),
        Some(op) => primitive(op, partial),
    })
}

/// `^` ranges allow changes that do not modify the left-most non-zero component
fn caret(p: Partial) -> Vec<Comparator> {
    let (Some(major), Some(minor), Some(patch)) = (p.major, p.minor, p.patch) else {
        return match (p.major, p.minor) {
            (None, _) => vec![Comparator::any()],
            (Some(major), None) => bounded(Version::new(major, 0, 0), floor(major + 1, 0, 0)),
            (Some(0), Some(minor)) => bounded(Version::new(0, minor, 0), floor(0, minor + 1, 0)),
            (Some(major), Some(minor)) => {
                bounded(Version::new(major, minor, 0), floor(major + 1, 0, 0))
            }
        };
    };

    let upper = match (major, minor) {
        (0, 0) => floor(0, 0, patch + 1),
        (0, minor) => floor(0, minor + 1, 0),
        (major, _) => floor(major + 1, 0, 0),
    };
    bounded(p.to_version(), upper)
}

/// `~` ranges allow patch-level changes when a minor version is given
fn tilde(p: Partial) -> Vec<Comparator> {
    match (p.major, p.minor, p.patch) {
        (None, _, _) => vec![Comparator::any()],
        (Some(major), None, _) => bounded(Version::new(major, 0, 0), floor(major + 1, 0, 0)),
        (Some(major), Some(minor), None) => {
            bounded(Version::new(major, minor, 0), floor(major, minor + 1, 0))
        }
        (Some(major), Some(minor), Some(_)) => bounded(p.to_version(), floor(major, minor + 1, 0)),
    }
}

/// Bare versions: exact when complete, a wildcard range when partial
fn x_range(p: Partial) -> Vec<Comparator> {
    match (p.major, p.minor, p.patch) {
        (None, _, _) => vec![Comparator::any()],
        (Some(major), None, _) => bounded(Version::new(major, 0, 0), floor(major + 1, 0, 0)),
        (Some(major), Some(minor), None) => {
            bounded(Version::new(major, minor, 0), floor(major, minor + 1, 0))
        }
        (Some(_), Some(_), Some(_)) => vec![Comparator::new(Operator::Eq, p.to_version())],
    }
}

/// Relational operators applied to possibly partial versions
fn primitive(op: Operator, p: Partial) -> Vec<Comparator> {
    let (Some(major), minor, patch) = (p.major, p.minor, p.patch) else {
        return match op {
            Operator::Gt | Operator::Lt => vec![Comparator::none()],
            _ => vec![Comparator::any()],
        };
    };

    if let (Some(_), Some(_)) = (minor, patch) {
        return vec![Comparator::new(op, p.to_version())];
    }

    let minor_given = minor.is_some();
    let minor = minor.unwrap_or(0);
    let version = match op {
        Operator::Gt if minor_given => Version::new(major, minor + 1, 0),
        Operator::Gt => Version::new(major + 1, 0, 0),
        Operator::Lte if minor_given => floor(major, minor + 1, 0),
        Operator::Lte => floor(major + 1, 0, 0),
        Operator::Lt => floor(major, minor, 0),
        Operator::Gte | Operator::Eq => Version::new(major, minor, 0),
    };
    let op = match op {
        Operator::Gt => Operator::Gte,
        Operator::Lte => Operator::Lt,
        other => other,
    };
    vec![Comparator::new(op, version)]
}

fn bounded(lower: Version, upper: Version) -> Vec<Comparator> {
    vec![
        Comparator::new(Operator::Gte, lower),
        Comparator::new(Operator::Lt, upper),
    ]
}

/// `MAJOR.MINOR.PATCH-0`, the lowest version with that core
fn floor(major: u64, minor: u64, patch: u64) -> Version {
    Version {
        pre: LOWEST_PRE.clone(),
        ..Version::new(major, minor, patch)
    }
}

/// A version that may have wildcard or missing components (`1.x`, `1.2`, `*`)
#[derive(Debug)]
struct Partial {
    raw: String,
    major: Option<u64>,
    minor: Option<u64>,
    patch: Option<u64>,
    pre: Prerelease,
    build: BuildMetadata,
}

impl Partial {
    fn parse(raw: &str) -> Result<Self, RangeError> {
        let invalid = || RangeError::InvalidVersion(raw.to_string());
        let input = raw.trim();
        let input = input.strip_prefix('v').unwrap_or(input);
        if input.is_empty() {
            return Err(invalid());
        }

        let (rest, build) = match input.split_once('+') {
            Some((_, "")) => return Err(invalid()),
            Some((rest, build)) => (rest, BuildMetadata::new(build).map_err(|_| invalid())?),
            None => (input, BuildMetadata::EMPTY),
        };
        let (core, pre) = match rest.split_once('-') {
            Some((_, "")) => return Err(invalid()),
            Some((core, pre)) => (core, Prerelease::new(pre).map_err(|_| invalid())?),
            None => (rest, Prerelease::EMPTY),
        };

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() > 3 {
            return Err(invalid());
        }

        let mut numbers = [None; 3];
        let mut wildcard = false;
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            if matches!(*part, "x" | "X" | "*") {
                wildcard = true;
                continue;
            }
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            if !wildcard {
                let number = part.parse::<u64>().map_err(|_| invalid())?;
                if number > MAX_COMPONENT {
                    return Err(invalid());
                }
                *slot = Some(number);
            }
        }

        let [major, minor, patch] = numbers;
        if !pre.is_empty() && patch.is_none() {
            return Err(invalid());
        }

        Ok(Self {
            raw: raw.to_string(),
            major,
            minor,
            patch,
            pre,
            build,
        })
    }

    fn to_version(&self) -> Version {
        Version {
            major: self.major.unwrap_or(0),
            minor: self.minor.unwrap_or(0),
            patch: self.patch.unwrap_or(0),
            pre: self.pre.clone(),
            build: self.build.clone(),
        }
    }
}
