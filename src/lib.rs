pub mod config;
pub mod domain;
pub mod error;
pub mod host;
pub mod policy;
pub mod ui;
pub mod workflow;

pub use error::{Result, VersionTaggerError};
