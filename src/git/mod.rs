//! Git collaborators: URL shorthand expansion and the ls-remote transport

pub mod shorthand;
pub mod transport;

pub use shorthand::{expand_git_url, extract_repo_name, extract_user, to_display_name};
pub use transport::{parse_ls_remote, GitTransport, RefSource};
