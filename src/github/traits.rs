//! Repository API abstraction.
//!
//! Defines the four read-only calls the scan needs and the typed shapes of
//! their responses, so the controller can be driven by a fake in tests.

use crate::error::ApiResult;
use crate::types::{CommitSha, RepoSlug};
use async_trait::async_trait;
use serde::Deserialize;

/// Upstream repository metadata.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositoryInfo {
    /// Branch compared against.
    pub default_branch: String,
    /// Fork count as reported by the API. Display only; pagination decides
    /// when the scan ends.
    pub forks_count: u64,
}

/// One entry of the fork listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ForkSummary {
    /// Full `owner/name` of the fork.
    pub full_name: RepoSlug,
    /// The fork's own default branch.
    pub default_branch: String,
}

/// Divergence between two commits.
///
/// Counts are optional: an error body from the compare endpoint decodes with
/// both absent and is classified as unknown rather than aborting the scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Comparison {
    /// Commits reachable from head but not base.
    #[serde(default)]
    pub ahead_by: Option<i64>,
    /// Commits reachable from base but not head.
    #[serde(default)]
    pub behind_by: Option<i64>,
    /// `ahead`, `behind`, `diverged` or `identical`.
    #[serde(default)]
    pub status: Option<String>,
}

impl Comparison {
    /// Build a comparison from known counts.
    pub fn new(ahead_by: i64, behind_by: i64) -> Self {
        Self {
            ahead_by: Some(ahead_by),
            behind_by: Some(behind_by),
            status: None,
        }
    }
}

/// Read access to a hosting provider's repository API.
///
/// Every method is a single request with no retry. Implementations map
/// responses to the typed structures above and report anything that does not
/// fit as an error.
#[async_trait]
pub trait RepositoryApi: Send + Sync {
    /// Fetch repository metadata.
    async fn get_repository(&self, repo: &RepoSlug) -> ApiResult<RepositoryInfo>;

    /// Resolve the head commit of a branch.
    async fn get_branch_head(&self, repo: &RepoSlug, branch: &str) -> ApiResult<CommitSha>;

    /// List one page of forks, oldest first. An empty page means there are no
    /// more forks.
    async fn list_forks(
        &self,
        repo: &RepoSlug,
        page: u32,
        page_size: u32,
    ) -> ApiResult<Vec<ForkSummary>>;

    /// Compare `head` against `base` within `repo`'s fork network.
    async fn compare(
        &self,
        repo: &RepoSlug,
        base: &CommitSha,
        head: &CommitSha,
    ) -> ApiResult<Comparison>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fork_summary_deserialize() {
        let json = r#"{"id": 1, "full_name": "someone/hello-world", "default_branch": "main", "fork": true}"#;
        let fork: ForkSummary = serde_json::from_str(json).unwrap();
        assert_eq!(fork.full_name.to_string(), "someone/hello-world");
        assert_eq!(fork.default_branch, "main");
    }

    #[test]
    fn test_comparison_with_counts() {
        let json = r#"{"status": "diverged", "ahead_by": 3, "behind_by": 2, "total_commits": 3}"#;
        let comparison: Comparison = serde_json::from_str(json).unwrap();
        assert_eq!(comparison.ahead_by, Some(3));
        assert_eq!(comparison.behind_by, Some(2));
        assert_eq!(comparison.status.as_deref(), Some("diverged"));
    }

    #[test]
    fn test_comparison_from_error_body() {
        let json = r#"{"message": "Not Found", "documentation_url": "https://docs.github.com"}"#;
        let comparison: Comparison = serde_json::from_str(json).unwrap();
        assert_eq!(comparison.ahead_by, None);
        assert_eq!(comparison.behind_by, None);
    }
}
