//! Repository slug (`owner/name`) with validation and parsing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated `owner/name` pair identifying a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepoSlug {
    owner: String,
    name: String,
}

/// Error type for repository slug parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepoSlugError {
    #[error("expected 'owner/name', got '{0}'")]
    InvalidFormat(String),
    #[error("empty {0}")]
    Empty(&'static str),
    #[error("invalid character in '{0}'")]
    InvalidCharacter(String),
}

impl RepoSlug {
    /// Create a slug from its two parts, validating both.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self, RepoSlugError> {
        let owner = owner.into();
        let name = name.into();
        validate_part(&owner, "owner")?;
        validate_part(&name, "repository name")?;
        Ok(Self { owner, name })
    }

    /// The account or organization owning the repository.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The repository name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// A filesystem-safe form (`owner__name`) for default file names.
    pub fn file_stem(&self) -> String {
        format!("{}__{}", self.owner, self.name)
    }
}

fn validate_part(part: &str, what: &'static str) -> Result<(), RepoSlugError> {
    if part.is_empty() {
        return Err(RepoSlugError::Empty(what));
    }
    if !part
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return Err(RepoSlugError::InvalidCharacter(part.to_string()));
    }
    Ok(())
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoSlug {
    type Err = RepoSlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.split_once('/') {
            Some((owner, name)) if !name.contains('/') => Self::new(owner, name),
            _ => Err(RepoSlugError::InvalidFormat(s.to_string())),
        }
    }
}

impl TryFrom<String> for RepoSlug {
    type Error = RepoSlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RepoSlug> for String {
    fn from(slug: RepoSlug) -> Self {
        slug.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_name() {
        let slug: RepoSlug = "octocat/hello-world".parse().unwrap();
        assert_eq!(slug.owner(), "octocat");
        assert_eq!(slug.name(), "hello-world");
        assert_eq!(slug.to_string(), "octocat/hello-world");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("octocat".parse::<RepoSlug>().is_err());
        assert!("a/b/c".parse::<RepoSlug>().is_err());
        assert!("/repo".parse::<RepoSlug>().is_err());
        assert!("owner/re po".parse::<RepoSlug>().is_err());
    }

    #[test]
    fn test_file_stem() {
        let slug = RepoSlug::new("rust-lang", "rust.vim").unwrap();
        assert_eq!(slug.file_stem(), "rust-lang__rust.vim");
    }

    #[test]
    fn test_serde_as_string() {
        let slug = RepoSlug::new("a", "b").unwrap();
        let json = serde_json::to_string(&slug).unwrap();
        assert_eq!(json, "\"a/b\"");
        let parsed: RepoSlug = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, slug);
    }
}
