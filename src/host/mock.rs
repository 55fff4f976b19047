use crate::error::{Result, VersionTaggerError};
use crate::host::{RemoteFile, TagEntry, VersionHost};
use std::collections::HashMap;
use std::sync::Mutex;

/// A file write recorded by [MockHost]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedWrite {
    pub path: String,
    pub content: String,
    pub message: String,
    pub previous_sha: Option<String>,
}

/// A created tag recorded by [MockHost]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedTag {
    pub tag: String,
    pub target_sha: String,
    pub message: String,
}

/// Mock host for testing without network access
///
/// State lives behind mutexes so the mock satisfies the trait's
/// `Send + Sync` bound while still recording writes through `&self`.
pub struct MockHost {
    tags: Vec<String>,
    files: HashMap<String, RemoteFile>,
    pull_requests: HashMap<u64, String>,
    writes: Mutex<Vec<RecordedWrite>>,
    created_tags: Mutex<Vec<RecordedTag>>,
    created_refs: Mutex<Vec<(String, String)>>,
    fail_ref_creation: bool,
}

impl MockHost {
    /// Create a new empty mock host
    pub fn new() -> Self {
        MockHost {
            tags: Vec::new(),
            files: HashMap::new(),
            pull_requests: HashMap::new(),
            writes: Mutex::new(Vec::new()),
            created_tags: Mutex::new(Vec::new()),
            created_refs: Mutex::new(Vec::new()),
            fail_ref_creation: false,
        }
    }

    /// Add an existing tag name
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.push(name.into());
    }

    /// Set the content of a file at a path
    pub fn set_file(&mut self, path: impl Into<String>, content: impl Into<String>, sha: impl Into<String>) {
        self.files.insert(
            path.into(),
            RemoteFile {
                content: content.into(),
                sha: sha.into(),
            },
        );
    }

    /// Register a pull request with its source branch
    pub fn set_pull_request(&mut self, number: u64, source_branch: impl Into<String>) {
        self.pull_requests.insert(number, source_branch.into());
    }

    /// Make ref creation fail, simulating the partial-failure window
    /// after a tag object was already created
    pub fn fail_ref_creation(&mut self) {
        self.fail_ref_creation = true;
    }

    /// File writes performed through the trait
    pub fn writes(&self) -> Vec<RecordedWrite> {
        self.writes.lock().unwrap().clone()
    }

    /// Tag objects created through the trait
    pub fn created_tags(&self) -> Vec<RecordedTag> {
        self.created_tags.lock().unwrap().clone()
    }

    /// Tag refs created through the trait, as (tag, object sha) pairs
    pub fn created_refs(&self) -> Vec<(String, String)> {
        self.created_refs.lock().unwrap().clone()
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionHost for MockHost {
    fn list_tags(&self, _owner: &str, _repo: &str) -> Result<Vec<TagEntry>> {
        Ok(self
            .tags
            .iter()
            .map(|name| TagEntry { name: name.clone() })
            .collect())
    }

    fn get_file(
        &self,
        _owner: &str,
        _repo: &str,
        path: &str,
        _git_ref: &str,
    ) -> Result<Option<RemoteFile>> {
        Ok(self.files.get(path).cloned())
    }

    fn put_file(
        &self,
        _owner: &str,
        _repo: &str,
        path: &str,
        content: &str,
        message: &str,
        previous_sha: Option<&str>,
    ) -> Result<String> {
        let mut writes = self.writes.lock().unwrap();
        writes.push(RecordedWrite {
            path: path.to_string(),
            content: content.to_string(),
            message: message.to_string(),
            previous_sha: previous_sha.map(|s| s.to_string()),
        });
        Ok(format!("commit-{}", writes.len()))
    }

    fn create_tag_object(
        &self,
        _owner: &str,
        _repo: &str,
        tag: &str,
        target_sha: &str,
        message: &str,
    ) -> Result<String> {
        self.created_tags.lock().unwrap().push(RecordedTag {
            tag: tag.to_string(),
            target_sha: target_sha.to_string(),
            message: message.to_string(),
        });
        Ok(format!("tagobj-{}", tag))
    }

    fn create_tag_ref(&self, _owner: &str, _repo: &str, tag: &str, object_sha: &str) -> Result<()> {
        if self.fail_ref_creation {
            return Err(VersionTaggerError::transport(format!(
                "failed to create ref for tag '{}'",
                tag
            )));
        }
        self.created_refs
            .lock()
            .unwrap()
            .push((tag.to_string(), object_sha.to_string()));
        Ok(())
    }

    fn pull_request_source_branch(&self, _owner: &str, _repo: &str, number: u64) -> Result<String> {
        self.pull_requests.get(&number).cloned().ok_or_else(|| {
            VersionTaggerError::transport(format!("pull request #{} not found", number))
        })
    }
}
