//! Version policy engine - decides the next version to release.
//!
//! Pure functions over the inputs gathered by the host adapter: the existing
//! released versions, the version recorded in the marker file, the configured
//! major version and the branch class. No I/O happens here.

use crate::domain::{BranchClass, Version};
use crate::error::{Result, VersionTaggerError};

/// Boundary between official patch builds and feature builds within one
/// minor line. Patch branches number 0..20000, feature branches number
/// from 20000 upward, so the two classes never collide.
pub const FEATURE_BUILD_FLOOR: u32 = 20_000;

/// Compute the next version to release.
///
/// - `Release`: bump minor past the highest existing minor for this major
///   and reset patch to 0. The integration branch is authoritative; the
///   recorded version is ignored.
/// - `Patch`: keep the recorded minor (the line the branch was cut from)
///   and bump past the highest official patch build on that line.
/// - `Feature`: keep the recorded minor and bump past the highest feature
///   build on that line, starting at [FEATURE_BUILD_FLOOR].
pub fn increment_version(
    major: u32,
    existing: &[Version],
    recorded: &Version,
    class: BranchClass,
) -> Version {
    match class {
        BranchClass::Release => {
            let minor = existing
                .iter()
                .filter(|v| v.major == major)
                .map(|v| v.minor as i64)
                .fold(-1, i64::max);
            Version::new(major, (minor + 1) as u32, 0)
        }
        BranchClass::Patch => {
            let minor = recorded.minor;
            let build = existing
                .iter()
                .filter(|v| v.major == major && v.minor == minor)
                .filter(|v| v.patch < FEATURE_BUILD_FLOOR)
                .map(|v| v.patch as i64)
                .fold(-1, i64::max);
            Version::new(major, minor, (build + 1) as u32)
        }
        BranchClass::Feature => {
            let minor = recorded.minor;
            let build = existing
                .iter()
                .filter(|v| v.major == major && v.minor == minor)
                .filter(|v| v.patch >= FEATURE_BUILD_FLOOR)
                .map(|v| v.patch as i64)
                .fold(FEATURE_BUILD_FLOOR as i64 - 1, i64::max);
            Version::new(major, minor, (build + 1) as u32)
        }
    }
}

/// Verify that a requested version already exists among the released ones.
///
/// Used to short-circuit the tagging flow when the caller wants to validate
/// and re-emit a specific version rather than compute a new one.
///
/// # Returns
/// * `Ok(Version)` - The parsed version, present in `existing`
/// * `Err(Version(_))` - `seek` is not a valid MAJOR.MINOR.PATCH string
/// * `Err(VersionNotFound(_))` - No existing version compares equal
pub fn verify_version_exists(seek: &str, existing: &[Version]) -> Result<Version> {
    let version = Version::parse(seek)?;

    if existing.iter().any(|v| *v == version) {
        Ok(version)
    } else {
        Err(VersionTaggerError::not_found(seek))
    }
}
