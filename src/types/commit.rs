//! Commit hash newtype.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A git commit SHA as reported by the hosting API.
///
/// Only checked to be non-empty hex; GitHub may serve SHA-1 or SHA-256
/// object names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommitSha(String);

/// Error type for commit SHA parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommitShaError {
    #[error("empty commit SHA")]
    Empty,
    #[error("commit SHA is not hexadecimal: {0}")]
    NotHex(String),
}

impl CommitSha {
    /// Get the full hash.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get an abbreviated hash (first 7 characters).
    pub fn short(&self) -> &str {
        &self.0[..self.0.len().min(7)]
    }
}

impl fmt::Display for CommitSha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CommitSha {
    type Err = CommitShaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(CommitShaError::Empty);
        }
        if !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CommitShaError::NotHex(s.to_string()));
        }
        Ok(Self(s.to_ascii_lowercase()))
    }
}

impl TryFrom<String> for CommitSha {
    type Error = CommitShaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CommitSha> for String {
    fn from(sha: CommitSha) -> Self {
        sha.0
    }
}
