//! Hosting-API abstraction layer
//!
//! This module provides a trait-based abstraction over the source-hosting
//! API operations the tagging workflow needs, allowing for multiple
//! implementations including the real GitHub REST API and a mock
//! implementation for testing.
//!
//! The primary abstraction is the [VersionHost] trait. The concrete
//! implementations are:
//!
//! - [github::GithubHost]: the real implementation using `reqwest`
//! - [mock::MockHost]: an in-memory implementation for testing
//!
//! Most code should depend on the [VersionHost] trait rather than concrete
//! implementations to enable easy testing and flexibility.

pub mod github;
pub mod mock;

pub use github::GithubHost;
pub use mock::MockHost;

use crate::error::Result;

/// A tag as listed by the hosting API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEntry {
    /// The tag name (e.g., "v1.2.3")
    pub name: String,
}

/// A file fetched from the repository through the hosting API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    /// Decoded UTF-8 content
    pub content: String,
    /// Revision id (blob sha) required to update the file in place
    pub sha: String,
}

/// Source-hosting API operations used by the tagging workflow
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// non-success responses to [crate::error::VersionTaggerError::Transport],
/// except a well-formed "not found" for [VersionHost::get_file], which is
/// `Ok(None)`.
pub trait VersionHost: Send + Sync {
    /// List all tags of a repository
    ///
    /// Implementations must follow pagination until an empty page is
    /// returned and concatenate all pages.
    fn list_tags(&self, owner: &str, repo: &str) -> Result<Vec<TagEntry>>;

    /// Fetch a file at a path and ref
    ///
    /// # Returns
    /// * `Ok(Some(RemoteFile))` - The file exists at that ref
    /// * `Ok(None)` - The file does not exist
    /// * `Err` - Any other failure
    fn get_file(&self, owner: &str, repo: &str, path: &str, git_ref: &str)
        -> Result<Option<RemoteFile>>;

    /// Create or update a file, committing it with `message`
    ///
    /// `previous_sha` must be the blob sha of the existing file when
    /// updating, or `None` when creating.
    ///
    /// # Returns
    /// The sha of the resulting commit.
    fn put_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        content: &str,
        message: &str,
        previous_sha: Option<&str>,
    ) -> Result<String>;

    /// Create an annotated tag object pointing at a commit
    ///
    /// # Returns
    /// The sha of the created tag object.
    fn create_tag_object(
        &self,
        owner: &str,
        repo: &str,
        tag: &str,
        target_sha: &str,
        message: &str,
    ) -> Result<String>;

    /// Create the `refs/tags/<tag>` ref pointing at a tag object
    ///
    /// This is deliberately separate from [VersionHost::create_tag_object]:
    /// the two steps are not transactional, and a failure between them
    /// leaves a tag object without a ref.
    fn create_tag_ref(&self, owner: &str, repo: &str, tag: &str, object_sha: &str) -> Result<()>;

    /// Resolve the source branch of a pull request
    fn pull_request_source_branch(&self, owner: &str, repo: &str, number: u64) -> Result<String>;
}
