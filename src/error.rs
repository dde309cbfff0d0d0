//! Error types and helpers for user-friendly error messages
//!
//! Resolution is all-or-nothing: every failure surfaces as one of the
//! variants below, optionally carrying a hint the CLI prints alongside
//! the message.

use thiserror::Error;

/// Error taxonomy for package resolution
#[derive(Error, Debug)]
pub enum GitpmError {
    /// The selector (or the build-compatibility filter) left no viable candidate
    #[error("no installable version for '{selector}': {message}")]
    RefNotFound {
        selector: String,
        message: String,
        hint: Option<String>,
    },

    /// Malformed or colliding selector
    #[error("selector '{selector}' is ambiguous: {message}")]
    SelectorAmbiguous {
        selector: String,
        message: String,
        hint: Option<String>,
    },

    /// The git transport failed; wraps the underlying cause
    #[error("failed to list refs of '{url}'")]
    Transport {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    /// Package-list configuration errors
    #[error("configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
        hint: Option<String>,
    },
}

impl GitpmError {
    /// Create a not-found error for a selector
    pub fn ref_not_found(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RefNotFound {
            selector: selector.into(),
            message: message.into(),
            hint: None,
        }
    }

    /// Create a not-found error with a hint
    pub fn ref_not_found_with_hint(
        selector: impl Into<String>,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self::RefNotFound {
            selector: selector.into(),
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an ambiguous-selector error
    pub fn selector_ambiguous(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SelectorAmbiguous {
            selector: selector.into(),
            message: message.into(),
            hint: Some(hints::REFS_SYNTAX.to_string()),
        }
    }

    /// Wrap a transport failure
    pub fn transport(url: impl Into<String>, source: anyhow::Error) -> Self {
        Self::Transport {
            url: url.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
            hint: None,
        }
    }

    /// Create a configuration error with a hint
    pub fn config_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
            hint: Some(hint.into()),
        }
    }

    /// Display error with formatting and hints
    pub fn display_with_hints(&self) {
        use console::style;

        eprintln!("\n{} {}", style("ERROR:").red().bold(), self);

        // Walk the source chain so transport causes are never swallowed
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            eprintln!("  {} {}", style("caused by:").dim(), cause);
            source = cause.source();
        }

        let hint = match self {
            GitpmError::RefNotFound { hint, .. }
            | GitpmError::SelectorAmbiguous { hint, .. }
            | GitpmError::Config { hint, .. } => hint.as_deref(),
            GitpmError::Transport { .. } => Some(hints::TRANSPORT),
        };
        if let Some(h) = hint {
            eprintln!("\n{} {}", style("HINT:").yellow().bold(), h);
        }

        eprintln!();
    }
}

/// Common hints shown next to errors
pub mod hints {
    /// The accepted `refs` selector forms
    pub const REFS_SYNTAX: &str = "\
Accepted 'refs' selectors:\n\
 • tags/*            all tags, newest compatible version wins\n\
 • tags/4070-*       all tags with a given build prefix\n\
 • tags/2.1.9        pin an exact tag\n\
 • heads/master      follow a branch tip\n\
 • pull/1909         follow a pull request\n\
 • 2c18b09a          freeze a commit hash";

    /// Transport failures are usually environmental
    pub const TRANSPORT: &str = "\
Check the repository URL and your network connection.\n\
Private repositories need credentials configured for plain `git ls-remote`.";

    /// No version passed the build filter
    pub const BUILD_FILTER: &str = "\
Every candidate version targets a different build of the editor.\n\
Pin a tag explicitly (refs = \"tags/<name>\") to override, at your own risk.";
}
