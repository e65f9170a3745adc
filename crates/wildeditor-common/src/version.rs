//! Snapshot schema versions.
//!
//! Versions are written as `"major.minor.patch"` strings so snapshot files
//! stay readable by hand.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// A version string that is not `major.minor.patch`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid schema version '{0}'")]
pub struct VersionParseError(pub String);

/// Map snapshot schema version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SchemaVersion {
    /// Bumped when old readers can no longer load the file
    pub major: u16,
    /// Bumped for added optional fields
    pub minor: u16,
    /// Bumped for fixes with no format change
    pub patch: u16,
}

impl SchemaVersion {
    /// Creates a version.
    #[must_use]
    pub const fn new(major: u16, minor: u16, patch: u16) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Version written by this build.
    pub const SNAPSHOT: Self = Self::new(1, 0, 0);

    /// Returns true if a reader at this version can load `data_version`.
    ///
    /// Only the major version matters; unknown optional fields are ignored
    /// on load.
    #[must_use]
    pub const fn can_read(&self, data_version: &Self) -> bool {
        self.major == data_version.major
    }
}

impl std::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for SchemaVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || VersionParseError(s.to_string());
        let mut parts = s.trim().split('.').map(str::parse::<u16>);
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(Ok(major)), Some(Ok(minor)), Some(Ok(patch)), None) => {
                Ok(Self::new(major, minor, patch))
            },
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for SchemaVersion {
    type Error = VersionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SchemaVersion> for String {
    fn from(version: SchemaVersion) -> Self {
        version.to_string()
    }
}
