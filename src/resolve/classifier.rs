//! Remote reference classification
//!
//! Turns raw `git ls-remote` output into typed, comparable descriptors:
//! the ref kind, an optional build-prefix (`st3-`, `st4070-`, `4070-`) and
//! an optional parsed version. Classification is total — a tag that parses
//! as nothing in particular still comes out as a valid candidate, it just
//! carries no version.

use std::fmt;

use serde::ser::Serializer;
use serde::Serialize;

use crate::version::Version;

/// Namespace of a remote reference, as reported by the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefNamespace {
    Tags,
    Heads,
    Pull,
}

/// A remote reference before classification
///
/// Produced fresh by the transport on every resolution attempt, never
/// persisted. `sha` is the target reported by `ls-remote`; synthetic refs
/// (a pinned commit hash) have none until classification fills it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRef {
    pub namespace: Option<RefNamespace>,
    pub name: String,
    pub sha: Option<String>,
}

impl RawRef {
    pub fn tag(name: impl Into<String>, sha: impl Into<String>) -> Self {
        Self {
            namespace: Some(RefNamespace::Tags),
            name: name.into(),
            sha: Some(sha.into()),
        }
    }

    pub fn branch(name: impl Into<String>, sha: impl Into<String>) -> Self {
        Self {
            namespace: Some(RefNamespace::Heads),
            name: name.into(),
            sha: Some(sha.into()),
        }
    }

    pub fn pull(name: impl Into<String>, sha: impl Into<String>) -> Self {
        Self {
            namespace: Some(RefNamespace::Pull),
            name: name.into(),
            sha: Some(sha.into()),
        }
    }

    /// A name outside any namespace, e.g. a bare commit hash
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            name: name.into(),
            sha: None,
        }
    }

    /// Parse a full refname like `refs/tags/2.1.0`
    ///
    /// Returns `None` for namespaces the resolver doesn't model
    /// (`refs/notes/…`, `HEAD`, …) so the transport can skip them.
    pub fn from_refname(refname: &str, sha: impl Into<String>) -> Option<Self> {
        let rest = refname.strip_prefix("refs/")?;
        let (namespace, name) = rest.split_once('/')?;
        let namespace = match namespace {
            "tags" => RefNamespace::Tags,
            "heads" => RefNamespace::Heads,
            "pull" => RefNamespace::Pull,
            _ => return None,
        };
        Some(Self {
            namespace: Some(namespace),
            name: name.to_string(),
            sha: Some(sha.into()),
        })
    }
}

/// Kind of a classified reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RefKind {
    Tag,
    Branch,
    PullRequest,
    Commit,
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefKind::Tag => write!(f, "tag"),
            RefKind::Branch => write!(f, "branch"),
            RefKind::PullRequest => write!(f, "pull-request"),
            RefKind::Commit => write!(f, "commit"),
        }
    }
}

/// Decoded build-compatibility prefix of a tag name
///
/// Three conventions circulate among package authors and each means
/// something different, so this is a closed variant set the filter can
/// match exhaustively:
/// - `st3-`       → only builds below 4000
/// - `st<n>-`     → frozen for exactly build n
/// - `<n>-`       → build n is the minimum requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildPrefix {
    None,
    MinBuild(u32),
    MaxExclusiveBuild(u32),
    FrozenBuild(u32),
}

/// Builds at or above this are the "4xxx" series; `st3-` tags cap here
const LEGACY_BUILD_CEILING: u32 = 4000;

impl BuildPrefix {
    /// Decode a prefix token (the part before the first `-`)
    pub fn parse_token(token: &str) -> Option<Self> {
        if token == "st3" {
            return Some(Self::MaxExclusiveBuild(LEGACY_BUILD_CEILING));
        }
        if let Some(digits) = token.strip_prefix("st") {
            return digits.parse().ok().map(Self::FrozenBuild);
        }
        if token.chars().all(|c| c.is_ascii_digit()) && !token.is_empty() {
            return token.parse().ok().map(Self::MinBuild);
        }
        None
    }

    /// Whether a tag carrying this prefix may run on the given build
    pub fn compatible_with(&self, build: u32) -> bool {
        match self {
            Self::None => true,
            Self::MinBuild(n) => build >= *n,
            Self::MaxExclusiveBuild(n) => build < *n,
            Self::FrozenBuild(n) => build == *n,
        }
    }

    /// How tightly this prefix targets the given build; used to break
    /// version ties between equally-new, equally-compatible tags
    pub fn affinity(&self, build: u32) -> u8 {
        match self {
            Self::FrozenBuild(n) if build == *n => 3,
            Self::MinBuild(n) if build >= *n => 2,
            Self::MaxExclusiveBuild(n) if build < *n => 1,
            _ => 0,
        }
    }

    /// The literal token as it appears in tag names (`st3`, `st4070`, `4070`)
    pub fn token(&self) -> Option<String> {
        match self {
            Self::None => None,
            Self::MinBuild(n) => Some(n.to_string()),
            Self::MaxExclusiveBuild(_) => Some("st3".to_string()),
            Self::FrozenBuild(n) => Some(format!("st{}", n)),
        }
    }
}

impl Serialize for BuildPrefix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.token() {
            Some(token) => serializer.serialize_some(&token),
            None => serializer.serialize_none(),
        }
    }
}

/// Derived, immutable view of a remote reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedRef {
    pub kind: RefKind,
    /// Original name within its namespace, preserved for display
    pub raw_name: String,
    /// Target commit, when the transport reported one
    pub sha: Option<String>,
    /// Build-compatibility prefix; only ever set on tags
    pub build_prefix: BuildPrefix,
    /// Parsed version; only set on tags whose suffix parses
    pub version: Option<Version>,
}

impl ClassifiedRef {
    /// A synthetic candidate for a pinned commit hash
    pub fn commit(hash: impl Into<String>) -> Self {
        let hash = hash.into();
        Self {
            kind: RefKind::Commit,
            sha: Some(hash.clone()),
            raw_name: hash,
            build_prefix: BuildPrefix::None,
            version: None,
        }
    }

    /// Stable identity for change detection: the commit when known
    /// (branch tips move under a stable refname), else the raw name
    pub fn identity(&self) -> &str {
        self.sha.as_deref().unwrap_or(&self.raw_name)
    }

    /// Full refname suitable for `git fetch`, if this is a live ref
    pub fn refname(&self) -> Option<String> {
        match self.kind {
            RefKind::Tag => Some(format!("refs/tags/{}", self.raw_name)),
            RefKind::Branch => Some(format!("refs/heads/{}", self.raw_name)),
            RefKind::PullRequest => Some(format!("refs/pull/{}", self.raw_name)),
            RefKind::Commit => None,
        }
    }
}

impl fmt::Display for ClassifiedRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            // Hashes read better short
            RefKind::Commit => write!(f, "commit {:.8}", self.raw_name),
            kind => write!(f, "{} {}", kind, self.raw_name),
        }
    }
}

/// Does this look like a (possibly abbreviated) commit hash?
pub fn is_commit_hash(name: &str) -> bool {
    (7..=64).contains(&name.len()) && name.chars().all(|c| c.is_ascii_hexdigit())
}

/// Classify a single raw reference; total, never fails
pub fn classify(raw: &RawRef) -> ClassifiedRef {
    let kind = match raw.namespace {
        Some(RefNamespace::Tags) => RefKind::Tag,
        Some(RefNamespace::Heads) => RefKind::Branch,
        Some(RefNamespace::Pull) => RefKind::PullRequest,
        None if is_commit_hash(&raw.name) => RefKind::Commit,
        // Anything else the transport hands over is kept as an opaque,
        // name-only tag candidate
        None => RefKind::Tag,
    };

    let (build_prefix, version) = match kind {
        RefKind::Tag => split_tag_name(&raw.name),
        _ => (BuildPrefix::None, None),
    };

    let sha = match kind {
        RefKind::Commit if raw.sha.is_none() => Some(raw.name.clone()),
        _ => raw.sha.clone(),
    };

    ClassifiedRef {
        kind,
        raw_name: raw.name.clone(),
        sha,
        build_prefix,
        version,
    }
}

/// Split a tag name into its build prefix and version suffix
fn split_tag_name(name: &str) -> (BuildPrefix, Option<Version>) {
    if let Some((token, rest)) = name.split_once('-') {
        if let Some(prefix) = BuildPrefix::parse_token(token) {
            return (prefix, Version::parse(rest));
        }
    }
    (BuildPrefix::None, Version::parse(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_to_kind() {
        assert_eq!(classify(&RawRef::tag("2.1.0", "a1".repeat(20))).kind, RefKind::Tag);
        assert_eq!(
            classify(&RawRef::branch("master", "a1".repeat(20))).kind,
            RefKind::Branch
        );
        assert_eq!(
            classify(&RawRef::pull("1909", "a1".repeat(20))).kind,
            RefKind::PullRequest
        );
    }

    #[test]
    fn test_bare_hash_is_commit() {
        let classified = classify(&RawRef::bare("2c18b09a"));
        assert_eq!(classified.kind, RefKind::Commit);
        assert_eq!(classified.sha.as_deref(), Some("2c18b09a"));
        assert_eq!(classified.identity(), "2c18b09a");
    }

    #[test]
    fn test_bare_non_hash_stays_opaque() {
        let classified = classify(&RawRef::bare("not-a-hash"));
        assert_eq!(classified.kind, RefKind::Tag);
        assert!(classified.version.is_none());
    }

    #[test]
    fn test_plain_version_tag() {
        let classified = classify(&RawRef::tag("2.1.0", "a".repeat(40)));
        assert_eq!(classified.build_prefix, BuildPrefix::None);
        assert_eq!(classified.version, Version::parse("2.1.0"));
    }

    #[test]
    fn test_prefix_variants() {
        let classify_tag = |name: &str| classify(&RawRef::tag(name, "a".repeat(40)));

        let st3 = classify_tag("st3-2.0.0");
        assert_eq!(st3.build_prefix, BuildPrefix::MaxExclusiveBuild(4000));
        assert_eq!(st3.version, Version::parse("2.0.0"));

        let frozen = classify_tag("st4070-2.0.0");
        assert_eq!(frozen.build_prefix, BuildPrefix::FrozenBuild(4070));

        let min = classify_tag("4070-2.1.0");
        assert_eq!(min.build_prefix, BuildPrefix::MinBuild(4070));
        assert_eq!(min.version, Version::parse("2.1.0"));
    }

    #[test]
    fn test_same_version_differing_prefixes() {
        let a = classify(&RawRef::tag("4070-2.1.0", "a".repeat(40)));
        let b = classify(&RawRef::tag("2.1.0", "b".repeat(40)));
        assert_eq!(a.version, b.version);
        assert_ne!(a.build_prefix, b.build_prefix);
    }

    #[test]
    fn test_prerelease_dash_is_not_a_prefix() {
        let classified = classify(&RawRef::tag("2.0.0-beta", "a".repeat(40)));
        assert_eq!(classified.build_prefix, BuildPrefix::None);
        assert_eq!(classified.version, Version::parse("2.0.0-beta"));
    }

    #[test]
    fn test_unparseable_tag_is_kept() {
        let classified = classify(&RawRef::tag("latest", "a".repeat(40)));
        assert_eq!(classified.kind, RefKind::Tag);
        assert!(classified.version.is_none());
        assert_eq!(classified.raw_name, "latest");
    }

    #[test]
    fn test_refname_parsing() {
        let raw = RawRef::from_refname("refs/tags/2.1.0", "a".repeat(40)).unwrap();
        assert_eq!(raw.namespace, Some(RefNamespace::Tags));
        assert_eq!(raw.name, "2.1.0");

        let raw = RawRef::from_refname("refs/pull/1909/head", "a".repeat(40)).unwrap();
        assert_eq!(raw.namespace, Some(RefNamespace::Pull));
        assert_eq!(raw.name, "1909/head");

        assert!(RawRef::from_refname("refs/notes/commits", "a".repeat(40)).is_none());
        assert!(RawRef::from_refname("HEAD", "a".repeat(40)).is_none());
    }

    #[test]
    fn test_compatibility() {
        assert!(BuildPrefix::None.compatible_with(3200));
        assert!(BuildPrefix::MinBuild(4070).compatible_with(4200));
        assert!(!BuildPrefix::MinBuild(4070).compatible_with(3200));
        assert!(BuildPrefix::MaxExclusiveBuild(4000).compatible_with(3999));
        assert!(!BuildPrefix::MaxExclusiveBuild(4000).compatible_with(4000));
        assert!(BuildPrefix::FrozenBuild(4070).compatible_with(4070));
        assert!(!BuildPrefix::FrozenBuild(4070).compatible_with(4071));
    }

    #[test]
    fn test_affinity_ranking() {
        let build = 4070;
        let frozen = BuildPrefix::FrozenBuild(4070).affinity(build);
        let min = BuildPrefix::MinBuild(4000).affinity(build);
        let none = BuildPrefix::None.affinity(build);
        assert!(frozen > min && min > none);
    }

    #[test]
    fn test_token_roundtrip() {
        for name in ["st3", "st4070", "4070"] {
            let prefix = BuildPrefix::parse_token(name).unwrap();
            assert_eq!(prefix.token().as_deref(), Some(name));
        }
        assert!(BuildPrefix::parse_token("vst").is_none());
        assert!(BuildPrefix::parse_token("").is_none());
    }
}
