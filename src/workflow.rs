//! Tagging workflow orchestration
//!
//! One logical pass over external state: resolve the branch, gather tags and
//! the version-marker file, run the policy engine, then persist the result.
//! Every step is sequential; the first failure aborts the run with no retry
//! and no rollback.

use std::io::Write;
use std::path::Path;

use log::info;

use crate::domain::{extract_versions, BranchClass, TagPrefix, Version};
use crate::error::{Result, VersionTaggerError};
use crate::host::VersionHost;
use crate::policy;

/// Inputs for one tagging run
///
/// Everything the workflow reads is passed in explicitly; there is no
/// ambient repository or ref context.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowArgs {
    /// Repository owner
    pub owner: String,

    /// Repository name
    pub repo: String,

    /// Full git ref that triggered the run (e.g., "refs/heads/main",
    /// "refs/pull/42/merge")
    pub git_ref: String,

    /// Commit to tag when no marker update happens
    pub sha: String,

    /// The major version line being released
    pub major_version: u32,

    /// Namespace prefix for tags of this scheme
    pub tag_prefix: String,

    /// When set, verify this version exists instead of computing a new one
    pub seek_version: Option<String>,

    /// Path of the version-marker file
    pub version_file: String,

    /// Compute only - create no tag and write no file
    pub dry_run: bool,
}

/// Result of a successful tagging run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowResult {
    /// The version as "MAJOR.MINOR.PATCH"
    pub version: String,

    /// The full tag name (prefix + version)
    pub tag: String,
}

/// Resolve the branch name from a git ref.
///
/// Direct branch refs are stripped of their prefix; pull-request refs are
/// resolved to the pull request's source branch through the host. Anything
/// else is an unsupported ref kind.
pub fn resolve_branch_name<H: VersionHost>(
    host: &H,
    owner: &str,
    repo: &str,
    git_ref: &str,
) -> Result<String> {
    if let Some(branch) = git_ref.strip_prefix("refs/heads/") {
        return Ok(branch.to_string());
    }

    if let Some(rest) = git_ref.strip_prefix("refs/pull/") {
        let number = rest
            .split('/')
            .next()
            .and_then(|n| n.parse::<u64>().ok())
            .ok_or_else(|| {
                VersionTaggerError::unsupported_ref(format!("malformed pull ref '{}'", git_ref))
            })?;
        return host.pull_request_source_branch(owner, repo, number);
    }

    Err(VersionTaggerError::unsupported_ref(format!(
        "'{}' is neither a branch ref nor a pull-request ref",
        git_ref
    )))
}

/// Run the complete tagging workflow against a host.
///
/// Steps, in order:
/// 1. Resolve and classify the branch.
/// 2. List all tags and extract the existing versions under the prefix.
/// 3. With a seek version: verify it exists and return it (no writes).
/// 4. Fetch the version-marker file and parse the recorded version.
/// 5. Run the policy engine.
/// 6. On release branches with a changed major.minor, commit the new marker
///    and tag that commit; otherwise tag the supplied sha.
/// 7. Create the tag object, then the tag ref. The two steps are not
///    transactional; a failure in between leaves an orphan tag object.
pub fn run_tagging_workflow<H: VersionHost>(host: &H, args: &WorkflowArgs) -> Result<WorkflowResult> {
    let prefix = TagPrefix::new(args.tag_prefix.clone());

    let branch = resolve_branch_name(host, &args.owner, &args.repo, &args.git_ref)?;
    let class = BranchClass::classify(&branch);
    info!("branch '{}' classified as {:?}", branch, class);

    let tags = host.list_tags(&args.owner, &args.repo)?;
    let tag_names: Vec<String> = tags.into_iter().map(|t| t.name).collect();
    let existing = extract_versions(&tag_names, &prefix);
    info!(
        "{} tags listed, {} versions under prefix '{}'",
        tag_names.len(),
        existing.len(),
        args.tag_prefix
    );

    if let Some(seek) = &args.seek_version {
        info!("verifying version {} exists", seek);
        let version = policy::verify_version_exists(seek, &existing)?;
        return Ok(WorkflowResult {
            version: version.to_string(),
            tag: prefix.format(&version),
        });
    }

    let marker = host.get_file(&args.owner, &args.repo, &args.version_file, &args.git_ref)?;
    let recorded = Version::from_marker(marker.as_ref().map(|f| f.content.as_str()))?;
    info!("recorded version is {}", recorded);

    let next = policy::increment_version(args.major_version, &existing, &recorded, class);
    let tag_name = prefix.format(&next);
    info!("next version is {} (tag {})", next, tag_name);

    if args.dry_run {
        info!("dry run, skipping marker update and tag creation");
        return Ok(WorkflowResult {
            version: next.to_string(),
            tag: tag_name,
        });
    }

    // On release branches the marker commit becomes the tag target, so the
    // tag points at the commit that records its own major.minor.
    let mut target_sha = args.sha.clone();
    if class.updates_marker() && (recorded.major != next.major || recorded.minor != next.minor) {
        let new_marker = next.marker_string();
        info!("updating {} to {}", args.version_file, new_marker);
        target_sha = host.put_file(
            &args.owner,
            &args.repo,
            &args.version_file,
            &new_marker,
            &format!("Update version to {}", new_marker),
            marker.as_ref().map(|f| f.sha.as_str()),
        )?;
    }

    let object_sha = host.create_tag_object(
        &args.owner,
        &args.repo,
        &tag_name,
        &target_sha,
        &format!("New tag {} is created", tag_name),
    )?;
    host.create_tag_ref(&args.owner, &args.repo, &tag_name, &object_sha)?;
    info!("tag {} created", tag_name);

    Ok(WorkflowResult {
        version: next.to_string(),
        tag: tag_name,
    })
}

/// Append the run's named outputs to a GitHub Actions output file.
///
/// The file uses the `name=value` line format of `$GITHUB_OUTPUT`.
pub fn append_outputs(path: &Path, result: &WorkflowResult) -> Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    writeln!(file, "version={}", result.version)?;
    writeln!(file, "tag={}", result.tag)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MockHost;

    #[test]
    fn test_resolve_branch_ref() {
        let host = MockHost::new();
        assert_eq!(
            resolve_branch_name(&host, "octo", "demo", "refs/heads/main").unwrap(),
            "main"
        );
        assert_eq!(
            resolve_branch_name(&host, "octo", "demo", "refs/heads/patch/2.4").unwrap(),
            "patch/2.4"
        );
    }

    #[test]
    fn test_resolve_pull_ref() {
        let mut host = MockHost::new();
        host.set_pull_request(42, "feature/login");
        assert_eq!(
            resolve_branch_name(&host, "octo", "demo", "refs/pull/42/merge").unwrap(),
            "feature/login"
        );
    }

    #[test]
    fn test_resolve_unsupported_ref() {
        let host = MockHost::new();
        let err = resolve_branch_name(&host, "octo", "demo", "refs/notes/commits").unwrap_err();
        assert!(matches!(err, VersionTaggerError::Ref(_)));

        let err = resolve_branch_name(&host, "octo", "demo", "refs/pull/not-a-number/merge")
            .unwrap_err();
        assert!(matches!(err, VersionTaggerError::Ref(_)));
    }

    #[test]
    fn test_append_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outputs");
        let result = WorkflowResult {
            version: "1.2.0".to_string(),
            tag: "v1.2.0".to_string(),
        };

        append_outputs(&path, &result).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "version=1.2.0\ntag=v1.2.0\n");
    }
}
