//! Application settings and paths.
//!
//! Manages XDG-compliant paths for configuration and data, the optional
//! `settings.json` defaults file, and the per-run scan configuration.

use crate::error::{ConfigError, ConfigResult};
use crate::types::RepoSlug;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default GitHub REST API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Forks requested per listing call. 100 is the API maximum.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Application directory paths following XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/forkscan)
    pub config_dir: PathBuf,
    /// Data directory (~/.local/share/forkscan)
    pub data_dir: PathBuf,
}

impl Paths {
    /// Resolve paths using XDG directories.
    ///
    /// Directories are not created here; writers create what they need.
    pub fn new() -> ConfigResult<Self> {
        let project = ProjectDirs::from("com", "forkscan", "forkscan")
            .ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
            data_dir: project.data_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }

    /// Get the directory holding default progress files.
    pub fn progress_dir(&self) -> PathBuf {
        self.data_dir.join("progress")
    }

    /// Default progress file for a repository.
    pub fn progress_file(&self, repo: &RepoSlug) -> PathBuf {
        self.progress_dir().join(format!("{}.json", repo.file_stem()))
    }
}

/// Application-wide settings loaded from `settings.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Base URL of the GitHub API (GitHub Enterprise installs differ).
    pub api_url: String,
    /// Forks requested per page.
    pub page_size: u32,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: 30,
            user_agent: format!("forkscan/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl AppSettings {
    /// Load settings from the default location, falling back to defaults
    /// when no file exists.
    pub fn load() -> ConfigResult<Self> {
        let file = Paths::new()?.settings_file();

        if !file.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
    }
}

/// Everything one scan run needs, resolved up front.
///
/// Built once at startup from flags, environment and the settings file, then
/// passed to the controller. Business logic never reads the environment.
#[derive(Clone)]
pub struct ScanSettings {
    /// Upstream repository whose forks are scanned.
    pub repo: RepoSlug,
    /// Access token sent as `Authorization: token ...`.
    pub token: String,
    /// Where progress is persisted.
    pub progress_path: PathBuf,
    /// GitHub API base URL.
    pub api_url: String,
    /// Forks per listing page.
    pub page_size: u32,
    /// Stop after this many pages in the current run.
    pub max_pages: Option<u32>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// User-Agent header value.
    pub user_agent: String,
    /// Draw a progress bar on stderr.
    pub show_progress: bool,
}

impl ScanSettings {
    /// Create settings with defaults for everything but the essentials.
    pub fn new(repo: RepoSlug, token: impl Into<String>, progress_path: impl Into<PathBuf>) -> Self {
        let defaults = AppSettings::default();
        Self {
            repo,
            token: token.into(),
            progress_path: progress_path.into(),
            api_url: defaults.api_url,
            page_size: defaults.page_size,
            max_pages: None,
            timeout: Duration::from_secs(defaults.timeout_secs),
            user_agent: defaults.user_agent,
            show_progress: false,
        }
    }

    /// Apply values from a settings file.
    pub fn with_app_settings(mut self, app: &AppSettings) -> Self {
        self.api_url = app.api_url.clone();
        self.page_size = app.page_size;
        self.timeout = Duration::from_secs(app.timeout_secs);
        self.user_agent = app.user_agent.clone();
        self
    }

    /// Set the API base URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Limit the number of pages processed in this run.
    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Enable the progress bar.
    pub fn with_progress(mut self) -> Self {
        self.show_progress = true;
        self
    }

    /// Check values that would otherwise fail deep inside a run.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.token.trim().is_empty() {
            return Err(ConfigError::MissingValue("access token"));
        }
        if self.page_size == 0 || self.page_size > DEFAULT_PAGE_SIZE {
            return Err(ConfigError::InvalidFormat(format!(
                "page size must be between 1 and {}, got {}",
                DEFAULT_PAGE_SIZE, self.page_size
            )));
        }
        if self.max_pages == Some(0) {
            return Err(ConfigError::InvalidFormat(
                "max pages must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for ScanSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanSettings")
            .field("repo", &self.repo)
            .field("token", &"<redacted>")
            .field("progress_path", &self.progress_path)
            .field("api_url", &self.api_url)
            .field("page_size", &self.page_size)
            .field("max_pages", &self.max_pages)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("show_progress", &self.show_progress)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slug() -> RepoSlug {
        RepoSlug::new("octocat", "hello-world").unwrap()
    }

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.api_url, DEFAULT_API_URL);
        assert_eq!(settings.page_size, 100);
        assert!(settings.user_agent.starts_with("forkscan/"));
    }

    #[test]
    fn test_settings_partial_file() {
        let parsed: AppSettings = serde_json::from_str(r#"{"page_size": 50}"#).unwrap();
        assert_eq!(parsed.page_size, 50);
        assert_eq!(parsed.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"api_url": "https://ghe.example.com/api/v3"}"#).unwrap();

        let settings = AppSettings::load_from(&path).unwrap();
        assert_eq!(settings.api_url, "https://ghe.example.com/api/v3");
    }

    #[test]
    fn test_load_from_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(
            AppSettings::load_from(&path),
            Err(ConfigError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_scan_settings_validation() {
        let settings = ScanSettings::new(slug(), "tok", "progress.json");
        assert!(settings.validate().is_ok());

        let empty_token = ScanSettings::new(slug(), "  ", "progress.json");
        assert!(matches!(
            empty_token.validate(),
            Err(ConfigError::MissingValue(_))
        ));

        let big_page = ScanSettings::new(slug(), "tok", "p.json").with_page_size(101);
        assert!(big_page.validate().is_err());

        let zero_pages = ScanSettings::new(slug(), "tok", "p.json").with_max_pages(Some(0));
        assert!(zero_pages.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let settings = ScanSettings::new(slug(), "ghp_secret", "progress.json");
        let debug = format!("{:?}", settings);
        assert!(!debug.contains("ghp_secret"));
    }

    #[test]
    fn test_progress_file_name() {
        let paths = Paths {
            config_dir: PathBuf::from("/cfg"),
            data_dir: PathBuf::from("/data"),
        };
        assert_eq!(
            paths.progress_file(&slug()),
            PathBuf::from("/data/progress/octocat__hello-world.json")
        );
    }
}
