//! Ref and version resolution engine
//!
//! This module answers one question: given a repository's remote refs and a
//! declarative `refs` selector, which reference is "the version to install"
//! for the running editor build?
//!
//! The pipeline:
//!
//! ```text
//! raw refs ──► classifier ──► selector ──► build filter ──► winner
//! ```
//!
//! Everything here is synchronous and side-effect-free; the git transport
//! feeding in raw refs lives in [`crate::git`].

pub mod classifier;
pub mod ordering;
pub mod resolver;
pub mod selector;

pub use classifier::{classify, BuildPrefix, ClassifiedRef, RawRef, RefKind, RefNamespace};
pub use ordering::{sort_newest_first, version_cmp};
pub use resolver::{resolve, Resolution};
pub use selector::Selector;
