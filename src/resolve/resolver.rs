//! Resolution of a selector against a repository's remote refs
//!
//! The resolver is a pure function of its inputs: classify every raw ref,
//! evaluate the selector, drop tags the running build can't use, pick the
//! winner. No network or filesystem access happens here — the caller
//! supplies the raw ref list — so resolutions for independent packages can
//! run in parallel freely.

use serde::Serialize;

use crate::error::{hints, GitpmError};

use super::classifier::{classify, ClassifiedRef, RawRef, RefKind};
use super::ordering::{precedence, sort_newest_first};
use super::selector::Selector;

/// Outcome of a resolution call
///
/// Created fresh per call and handed entirely to the caller; the engine
/// keeps no memory of past resolutions.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    /// The winning reference
    pub chosen: ClassifiedRef,
    /// Every candidate that survived selection and build filtering,
    /// newest first — the pool a "switch version" UI would offer
    pub candidates: Vec<ClassifiedRef>,
    /// Whether `chosen` differs from the previously resolved target
    pub changed: bool,
}

/// Resolve `selector` against `raw_refs` for the given editor build
///
/// `previous` is the `chosen` of an earlier resolution for the same
/// package, if any; `changed` compares against it by identity (commit sha
/// when known, raw name otherwise), never by wall-clock time.
pub fn resolve(
    selector: &Selector,
    build: u32,
    raw_refs: &[RawRef],
    previous: Option<&ClassifiedRef>,
) -> Result<Resolution, GitpmError> {
    let classified: Vec<ClassifiedRef> = raw_refs.iter().map(classify).collect();
    let selected = selector.select(&classified)?;
    if selected.is_empty() {
        return Err(GitpmError::ref_not_found(
            selector.to_string(),
            "the remote has no matching refs",
        ));
    }

    // Build-compatibility filter. Only tags carry a prefix; commits,
    // branches and pull requests pass through unfiltered.
    let mut candidates: Vec<ClassifiedRef> = selected
        .into_iter()
        .filter(|c| c.kind != RefKind::Tag || c.build_prefix.compatible_with(build))
        .collect();
    if candidates.is_empty() {
        // Never fall back to an incompatible version
        return Err(GitpmError::ref_not_found_with_hint(
            selector.to_string(),
            format!("no candidate is compatible with build {}", build),
            hints::BUILD_FILTER,
        ));
    }

    let chosen = candidates
        .iter()
        .max_by(|a, b| {
            precedence(a, b)
                .then_with(|| a.build_prefix.affinity(build).cmp(&b.build_prefix.affinity(build)))
                .then_with(|| a.raw_name.cmp(&b.raw_name))
        })
        .cloned()
        .expect("candidates is non-empty");

    sort_newest_first(&mut candidates);

    let changed = match previous {
        Some(prev) => prev.identity() != chosen.identity(),
        None => true,
    };

    Ok(Resolution {
        chosen,
        candidates,
        changed,
    })
}
