use crate::domain::Version;

/// Namespace prefix distinguishing this versioning scheme's tags
/// from unrelated tags in the same repository (e.g., "v", "release-")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPrefix {
    prefix: String,
}

impl TagPrefix {
    /// Create a new tag prefix
    pub fn new(prefix: impl Into<String>) -> Self {
        TagPrefix {
            prefix: prefix.into(),
        }
    }

    /// Format a full tag name for a version
    /// Example: prefix="v", version=1.2.3 -> "v1.2.3"
    pub fn format(&self, version: &Version) -> String {
        format!("{}{}", self.prefix, version)
    }

    /// Strip the prefix from a tag name, if it matches
    pub fn strip<'a>(&self, tag: &'a str) -> Option<&'a str> {
        tag.strip_prefix(self.prefix.as_str())
    }
}

/// Extract the set of released versions from raw tag names.
///
/// Keeps only tags that carry the prefix and whose remainder parses as a
/// semantic version; everything else belongs to other tagging schemes and is
/// ignored. Input order is irrelevant, downstream consumers only aggregate
/// by maximum.
pub fn extract_versions(tag_names: &[String], prefix: &TagPrefix) -> Vec<Version> {
    tag_names
        .iter()
        .filter_map(|name| prefix.strip(name))
        .filter_map(|rest| Version::parse(rest).ok())
        .collect()
}
