//! Version ordering over classified references
//!
//! A pure total order used both for picking the winning tag and for
//! "newest first" listings:
//! 1. Tags without a parseable version sort below every parsed version
//! 2. Parsed versions follow semantic-version precedence
//! 3. Exact version ties (same logical version under different build
//!    prefixes) fall back to the raw name, keeping the order total and
//!    deterministic — disambiguating by build compatibility is the
//!    resolver's job, not the ordering's

use std::cmp::Ordering;

use super::classifier::ClassifiedRef;

/// Compare by version precedence alone
///
/// Distinct refs carrying the same logical version compare `Equal` here;
/// the resolver disambiguates those by build affinity instead.
pub fn precedence(a: &ClassifiedRef, b: &ClassifiedRef) -> Ordering {
    match (&a.version, &b.version) {
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(va), Some(vb)) => va.cmp(vb),
        (None, None) => Ordering::Equal,
    }
}

/// Compare two candidates by version precedence, raw name as tiebreak
pub fn version_cmp(a: &ClassifiedRef, b: &ClassifiedRef) -> Ordering {
    precedence(a, b).then_with(|| a.raw_name.cmp(&b.raw_name))
}

/// Order a candidate list newest first
pub fn sort_newest_first(candidates: &mut [ClassifiedRef]) {
    candidates.sort_by(|a, b| version_cmp(b, a));
}
