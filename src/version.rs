//! Loose semantic version parsing for git tag names
//!
//! Package authors tag releases in many shapes: `1.2.3`, `v1.2`, `2.0.0-beta.1`.
//! Parsing is deliberately forgiving:
//! - A leading `v`/`V` is stripped
//! - Missing minor/patch components default to 0
//! - Everything after the first `-` is the pre-release identifier
//!
//! A string that still doesn't parse yields `None`; callers keep such tags
//! around as opaque candidates.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// A parsed tag version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Pre-release identifier (e.g. "beta.1"), if any
    pub pre: Option<String>,
}

impl Version {
    /// Parse a version string, returning `None` if it doesn't look like one
    pub fn parse(input: &str) -> Option<Self> {
        let version = input.strip_prefix(['v', 'V']).unwrap_or(input);

        // Split off the pre-release suffix
        let (numeric_part, pre) = match version.split_once('-') {
            Some((v, p)) if !p.is_empty() => (v, Some(p.to_string())),
            Some((v, _)) => (v, None),
            None => (version, None),
        };

        let parts: Vec<&str> = numeric_part.split('.').collect();
        if parts.is_empty() || parts.len() > 3 {
            return None;
        }

        let major = parts.first()?.parse().ok()?;
        let minor = match parts.get(1) {
            Some(s) => s.parse().ok()?,
            None => 0,
        };
        let patch = match parts.get(2) {
            Some(s) => s.parse().ok()?,
            None => 0,
        };

        Some(Version {
            major,
            minor,
            patch,
            pre,
        })
    }

    /// Check if this is a stable release (no pre-release identifier)
    pub fn is_stable(&self) -> bool {
        self.pre.is_none()
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.major.cmp(&other.major) {
            Ordering::Equal => {}
            ord => return ord,
        }
        match self.minor.cmp(&other.minor) {
            Ordering::Equal => {}
            ord => return ord,
        }
        match self.patch.cmp(&other.patch) {
            Ordering::Equal => {}
            ord => return ord,
        }

        // A release outranks its own pre-releases
        match (&self.pre, &other.pre) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.cmp(b),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(ref pre) = self.pre {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}
