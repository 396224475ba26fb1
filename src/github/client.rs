//! GitHub REST API client.
//!
//! Thin request/response wrapper over the four endpoints the scan uses.
//! HTTP status codes are not interpreted; bodies are decoded into typed
//! structures and anything that does not decode is an error.

use crate::config::ScanSettings;
use crate::error::{ApiError, ApiResult};
use crate::github::traits::{Comparison, ForkSummary, RepositoryApi, RepositoryInfo};
use crate::types::{CommitSha, RepoSlug};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, trace};

/// GitHub API client carrying the access token on every request.
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: String,
}

/// `{"message": "..."}` error body.
#[derive(Deserialize)]
struct ApiMessage {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GitObject {
    sha: CommitSha,
}

#[derive(Debug, Deserialize)]
struct GitRef {
    #[serde(rename = "ref")]
    ref_name: String,
    object: GitObject,
}

/// The refs endpoint answers with a single object on an exact match and with
/// an array when the name is a prefix of several refs.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RefResponse {
    One(GitRef),
    Many(Vec<GitRef>),
}

impl GitHubClient {
    /// Create a client from scan settings.
    pub fn new(settings: &ScanSettings) -> ApiResult<Self> {
        let base_url = normalize_base_url(&settings.api_url)?;

        let mut auth = HeaderValue::from_str(&format!("token {}", settings.token.trim()))
            .map_err(|_| ApiError::InvalidHeader("access token"))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&settings.user_agent)
                .map_err(|_| ApiError::InvalidHeader("user agent"))?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout)
            .build()?;

        Ok(Self { http, base_url })
    }

    fn repo_url(&self, repo: &RepoSlug) -> String {
        format!("{}/repos/{}/{}", self.base_url, repo.owner(), repo.name())
    }

    /// Issue a GET and decode the body, whatever the status code.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(%url, %status, bytes = body.len(), "GitHub response");
        trace!(%body);

        decode(url, &body)
    }
}

#[async_trait]
impl RepositoryApi for GitHubClient {
    async fn get_repository(&self, repo: &RepoSlug) -> ApiResult<RepositoryInfo> {
        self.get_json(&self.repo_url(repo), &[]).await
    }

    async fn get_branch_head(&self, repo: &RepoSlug, branch: &str) -> ApiResult<CommitSha> {
        let url = format!("{}/git/refs/heads/{}", self.repo_url(repo), branch);
        let refs: RefResponse = self.get_json(&url, &[]).await?;
        select_branch_head(refs, repo, branch)
    }

    async fn list_forks(
        &self,
        repo: &RepoSlug,
        page: u32,
        page_size: u32,
    ) -> ApiResult<Vec<ForkSummary>> {
        let url = format!("{}/forks", self.repo_url(repo));
        let query = [
            ("page", page.to_string()),
            ("per_page", page_size.to_string()),
            ("sort", "oldest".to_string()),
        ];
        self.get_json(&url, &query).await
    }

    async fn compare(
        &self,
        repo: &RepoSlug,
        base: &CommitSha,
        head: &CommitSha,
    ) -> ApiResult<Comparison> {
        let url = format!("{}/compare/{}...{}", self.repo_url(repo), base, head);
        self.get_json(&url, &[]).await
    }
}

/// Validate the API base URL and strip any trailing slash.
fn normalize_base_url(raw: &str) -> ApiResult<String> {
    let url = Url::parse(raw).map_err(|e| ApiError::InvalidBaseUrl(format!("{}: {}", raw, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::InvalidBaseUrl(raw.to_string()));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

/// Decode a response body, preferring the API's own error message when the
/// body is not the expected shape.
fn decode<T: DeserializeOwned>(endpoint: &str, body: &str) -> ApiResult<T> {
    serde_json::from_str(body).map_err(|e| match serde_json::from_str::<ApiMessage>(body) {
        Ok(api) => ApiError::Remote {
            endpoint: endpoint.to_string(),
            message: api.message,
        },
        Err(_) => ApiError::MalformedResponse {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        },
    })
}

fn select_branch_head(refs: RefResponse, repo: &RepoSlug, branch: &str) -> ApiResult<CommitSha> {
    let wanted = format!("refs/heads/{}", branch);
    let found = match refs {
        RefResponse::One(git_ref) => Some(git_ref),
        RefResponse::Many(refs) => refs.into_iter().find(|r| r.ref_name == wanted),
    };

    found.map(|r| r.object.sha).ok_or_else(|| ApiError::MissingRef {
        repo: repo.to_string(),
        branch: branch.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHA: &str = "6dcb09b5b57875f334f61aebed695e2e4193db5e";

    fn repo() -> RepoSlug {
        RepoSlug::new("octocat", "hello-world").unwrap()
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("https://api.github.com/").unwrap(),
            "https://api.github.com"
        );
        assert!(normalize_base_url("not a url").is_err());
        assert!(normalize_base_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_repo_url() {
        let settings = ScanSettings::new(repo(), "tok", "p.json")
            .with_api_url("https://ghe.example.com/api/v3/");
        let client = GitHubClient::new(&settings).unwrap();
        assert_eq!(
            client.repo_url(&repo()),
            "https://ghe.example.com/api/v3/repos/octocat/hello-world"
        );
    }

    #[test]
    fn test_invalid_token_rejected() {
        let settings = ScanSettings::new(repo(), "bad\ntoken", "p.json");
        assert!(matches!(
            GitHubClient::new(&settings),
            Err(ApiError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_decode_repository() {
        let body = r#"{"full_name": "octocat/hello-world", "default_branch": "master", "forks_count": 9}"#;
        let info: RepositoryInfo = decode("repo", body).unwrap();
        assert_eq!(info.default_branch, "master");
        assert_eq!(info.forks_count, 9);
    }

    #[test]
    fn test_decode_error_body() {
        let body = r#"{"message": "API rate limit exceeded", "documentation_url": "x"}"#;
        let err = decode::<Vec<ForkSummary>>("forks", body).unwrap_err();
        match err {
            ApiError::Remote { message, .. } => assert_eq!(message, "API rate limit exceeded"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_garbage() {
        let err = decode::<RepositoryInfo>("repo", "<html>").unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse { .. }));
    }

    #[test]
    fn test_decode_missing_field_is_malformed() {
        let body = r#"{"default_branch": "main"}"#;
        let err = decode::<RepositoryInfo>("repo", body).unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse { .. }));
    }

    #[test]
    fn test_single_ref() {
        let body = format!(
            r#"{{"ref": "refs/heads/main", "object": {{"sha": "{SHA}", "type": "commit"}}}}"#
        );
        let refs: RefResponse = decode("ref", &body).unwrap();
        let sha = select_branch_head(refs, &repo(), "main").unwrap();
        assert_eq!(sha.as_str(), SHA);
    }

    #[test]
    fn test_prefix_match_picks_exact_ref() {
        let body = format!(
            r#"[
                {{"ref": "refs/heads/main-old", "object": {{"sha": "aaaaaaa"}}}},
                {{"ref": "refs/heads/main", "object": {{"sha": "{SHA}"}}}}
            ]"#
        );
        let refs: RefResponse = decode("ref", &body).unwrap();
        let sha = select_branch_head(refs, &repo(), "main").unwrap();
        assert_eq!(sha.as_str(), SHA);
    }

    #[test]
    fn test_prefix_match_without_exact_ref() {
        let body = r#"[{"ref": "refs/heads/main-old", "object": {"sha": "aaaaaaa"}}]"#;
        let refs: RefResponse = decode("ref", body).unwrap();
        assert!(matches!(
            select_branch_head(refs, &repo(), "main"),
            Err(ApiError::MissingRef { .. })
        ));
    }

    #[test]
    fn test_ref_not_found_body() {
        let body = r#"{"message": "Not Found"}"#;
        let err = decode::<RefResponse>("ref", body).unwrap_err();
        assert!(matches!(err, ApiError::Remote { .. }));
    }
}
