//! Domain logic - pure business rules independent of the hosting API

pub mod branch;
pub mod tag;
pub mod version;

pub use branch::BranchClass;
pub use tag::{extract_versions, TagPrefix};
pub use version::Version;
