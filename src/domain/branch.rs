/// Classification of a branch for versioning purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchClass {
    /// The primary integration branch ("main" or "master")
    Release,
    /// A maintenance branch ("patch/...") targeting a released minor version
    Patch,
    /// Any other branch, producing pre-release build numbers
    Feature,
}

impl BranchClass {
    /// Classify a branch by name. Total over all strings.
    pub fn classify(branch_name: &str) -> Self {
        if matches!(branch_name, "main" | "master") {
            BranchClass::Release
        } else if branch_name.starts_with("patch/") {
            BranchClass::Patch
        } else {
            BranchClass::Feature
        }
    }

    /// Check whether this branch class writes the version-marker file
    pub fn updates_marker(&self) -> bool {
        matches!(self, BranchClass::Release)
    }
}
