use crate::error::{Result, VersionTaggerError};
use std::fmt;

/// Semantic version representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Create a new version
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version string (e.g., "1.2.3" -> Version(1,2,3))
    ///
    /// Expects exactly three dot-separated non-negative decimal components.
    /// Any prefix (like "v") must be stripped by the caller before parsing.
    pub fn parse(raw: &str) -> Result<Self> {
        let parts: Vec<&str> = raw.split('.').collect();
        if parts.len() != 3 {
            return Err(VersionTaggerError::version(format!(
                "'{}' - expected MAJOR.MINOR.PATCH",
                raw
            )));
        }

        let major = parts[0]
            .parse::<u32>()
            .map_err(|_| VersionTaggerError::version(format!("invalid major '{}'", parts[0])))?;
        let minor = parts[1]
            .parse::<u32>()
            .map_err(|_| VersionTaggerError::version(format!("invalid minor '{}'", parts[1])))?;
        let patch = parts[2]
            .parse::<u32>()
            .map_err(|_| VersionTaggerError::version(format!("invalid patch '{}'", parts[2])))?;

        Ok(Version {
            major,
            minor,
            patch,
        })
    }

    /// Parse the recorded version from the version-marker file.
    ///
    /// The marker holds exactly "MAJOR.MINOR"; the patch component is implicitly 0.
    /// An absent marker means the repository has never released: 0.0.0.
    ///
    /// # Arguments
    /// * `content` - File content, or `None` when the marker does not exist
    ///
    /// # Returns
    /// * `Ok(Version)` - Recorded version with patch = 0
    /// * `Err` - If the trimmed content is not a valid MAJOR.MINOR pair
    pub fn from_marker(content: Option<&str>) -> Result<Self> {
        let Some(raw) = content else {
            return Ok(Version::new(0, 0, 0));
        };

        // Markers committed on different platforms may end in \n, \r\n or both.
        let trimmed = raw.trim();
        Self::parse(&format!("{}.0", trimmed))
    }

    /// Render the marker form "MAJOR.MINOR" of this version
    pub fn marker_string(&self) -> String {
        format!("{}.{}", self.major, self.minor)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parse() {
        let v = Version::parse("1.2.3").unwrap();
        assert_eq!(v.major, 1);
        assert_eq!(v.minor, 2);
        assert_eq!(v.patch, 3);
    }

    #[test]
    fn test_version_parse_invalid() {
        assert!(Version::parse("1.2").is_err());
        assert!(Version::parse("1.2.3.4").is_err());
        assert!(Version::parse("a.b.c").is_err());
        assert!(Version::parse("1.-2.3").is_err());
        assert!(Version::parse("v1.2.3").is_err());
        assert!(Version::parse("").is_err());
    }

    #[test]
    fn test_version_ordering() {
        assert!(Version::new(2, 0, 0) > Version::new(1, 9, 9));
        assert!(Version::new(1, 2, 0) > Version::new(1, 1, 9));
        assert!(Version::new(1, 1, 2) > Version::new(1, 1, 1));
        assert_eq!(Version::new(1, 1, 1), Version::new(1, 1, 1));
    }

    #[test]
    fn test_version_display() {
        let v = Version::new(1, 2, 3);
        assert_eq!(v.to_string(), "1.2.3");
    }

    #[test]
    fn test_from_marker_absent() {
        assert_eq!(Version::from_marker(None).unwrap(), Version::new(0, 0, 0));
    }

    #[test]
    fn test_from_marker_round_trip() {
        let v = Version::from_marker(Some("5.3")).unwrap();
        assert_eq!(v, Version::new(5, 3, 0));
        assert_eq!(v.marker_string(), "5.3");
    }

    #[test]
    fn test_from_marker_trims_line_endings() {
        assert_eq!(
            Version::from_marker(Some("2.4\n")).unwrap(),
            Version::new(2, 4, 0)
        );
        assert_eq!(
            Version::from_marker(Some("2.4\r\n")).unwrap(),
            Version::new(2, 4, 0)
        );
        assert_eq!(
            Version::from_marker(Some("\n2.4\r\n\r\n")).unwrap(),
            Version::new(2, 4, 0)
        );
    }

    #[test]
    fn test_from_marker_invalid() {
        assert!(Version::from_marker(Some("abc")).is_err());
        assert!(Version::from_marker(Some("1.2.3")).is_err());
        assert!(Version::from_marker(Some("1")).is_err());
        assert!(Version::from_marker(Some("")).is_err());
    }
}
