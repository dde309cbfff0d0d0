//! Git URL shorthand support
//!
//! Package lists accept the GitHub shortname `owner/repo` next to full
//! URLs:
//! - `wbond/package-name` -> `https://github.com/wbond/package-name.git`
//! - Full https/ssh URLs are passed through after a sanity check

use regex::Regex;

use crate::error::GitpmError;

/// Expand a configured `url` value to a full git URL
///
/// Shortnames expand to GitHub; anything else must already look like a URL
/// or an absolute path usable as a git remote.
///
/// # Examples
///
/// ```
/// use gitpm::git::expand_git_url;
///
/// let url = expand_git_url("wbond/package-name").unwrap();
/// assert_eq!(url, "https://github.com/wbond/package-name.git");
///
/// let url = expand_git_url("https://gitlab.com/user/repo.git").unwrap();
/// assert_eq!(url, "https://gitlab.com/user/repo.git");
/// ```
pub fn expand_git_url(url: &str) -> Result<String, GitpmError> {
    if is_shortname(url) {
        return Ok(format!("https://github.com/{}.git", url));
    }

    // Not comprehensive, just catches common typos before git does
    let invalid = Regex::new(r#"[\s<>"'\\^{}|`]"#).ok();
    if invalid.is_some_and(|re| re.is_match(url)) {
        return Err(GitpmError::config(format!(
            "invalid characters in URL: '{}'",
            url
        )));
    }

    if !url.contains('/') {
        return Err(GitpmError::config_with_hint(
            format!("doesn't look like a URL or path: '{}'", url),
            "For local paths, use forward slashes (\"/\").",
        ));
    }

    if url.starts_with('.') {
        return Err(GitpmError::config(format!(
            "no relative paths allowed: '{}'",
            url
        )));
    }

    Ok(url.to_string())
}

/// Is this a GitHub shortname (`owner/repo`)?
pub fn is_shortname(url: &str) -> bool {
    Regex::new(r"^[\w.-]+/[\w.-]+$")
        .ok()
        .is_some_and(|re| re.is_match(url))
}

/// Extract the repository base name from a URL or shortname
///
/// `https://github.com/alexkuz/SublimeLinter-inline-errors.git` and
/// `alexkuz/SublimeLinter-inline-errors` both yield
/// `SublimeLinter-inline-errors`.
pub fn extract_repo_name(url: &str) -> String {
    let name = url.rsplit('/').next().unwrap_or(url);
    name.strip_suffix(".git").unwrap_or(name).to_string()
}

/// Extract the owner/user part of a git URL, if there is one
pub fn extract_user(url: &str) -> Option<String> {
    if let Some(rest) = url.strip_prefix("git@") {
        // git@github.com:owner/repo.git
        return rest
            .split_once(':')
            .and_then(|(_, path)| path.split('/').next())
            .map(str::to_string);
    }
    let mut segments = url.rsplit('/');
    segments.next()?;
    segments.next().map(str::to_string).filter(|s| !s.is_empty())
}

/// Render a URL back to the short form when it is a plain GitHub remote
pub fn to_display_name(url: &str) -> String {
    url.strip_prefix("https://github.com/")
        .map(|rest| rest.strip_suffix(".git").unwrap_or(rest).to_string())
        .unwrap_or_else(|| url.to_string())
}
