//! JSON-based scan progress storage.
//!
//! The whole scan state lives in one pretty-printed JSON file that is
//! rewritten after every fork. Key names are part of the file format: older
//! files without the checkpoint or timestamp fields still load.

use crate::error::{StorageError, StorageResult};
use crate::scan::Bucket;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A fork with commits not present upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForkAhead {
    /// Full `owner/name` of the fork.
    #[serde(rename = "fork")]
    pub fork_name: String,
    /// Number of commits the fork has that upstream lacks.
    pub commits_ahead: u64,
}

impl ForkAhead {
    /// Create a new entry.
    pub fn new(fork_name: impl Into<String>, commits_ahead: u64) -> Self {
        Self {
            fork_name: fork_name.into(),
            commits_ahead,
        }
    }
}

/// Forks already recorded on the page currently being processed.
///
/// A page only enters `searched_pages` once it is complete. If the process
/// dies halfway through, the page is fetched again on resume and the forks
/// listed here are skipped instead of being counted twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCheckpoint {
    /// Page number in flight.
    pub page: u32,
    /// Full names of forks recorded so far, in listing order.
    pub completed_forks: Vec<String>,
}

/// Persistent state of a fork scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanProgress {
    /// Pages whose forks have all been classified and saved.
    #[serde(default)]
    pub searched_pages: BTreeSet<u32>,
    /// Forks both ahead of and behind upstream.
    #[serde(default)]
    pub forks_with_commits_ahead: Vec<ForkAhead>,
    /// Forks ahead of upstream and not behind.
    #[serde(default)]
    pub forks_with_commits_ahead_but_not_behind: Vec<ForkAhead>,
    /// Forks with nothing upstream lacks.
    #[serde(default)]
    pub forks_identical_or_behind: Vec<String>,
    /// Forks encountered across all runs.
    #[serde(default)]
    pub total_forks_processed: u64,
    /// Forks whose comparison could not be classified.
    #[serde(default)]
    pub errors: u64,
    /// Partial progress through the page in flight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_checkpoint: Option<PageCheckpoint>,
    /// When the file was last written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ScanProgress {
    /// The page to fetch next: one past the highest searched page.
    pub fn next_page(&self) -> u32 {
        self.searched_pages.last().map_or(1, |last| last + 1)
    }

    /// Count a newly encountered fork. Called before its outcome is known.
    pub fn count_fork(&mut self) {
        self.total_forks_processed += 1;
    }

    /// Record a fork's classification in the matching list.
    ///
    /// `Unknown` only bumps the error counter.
    pub fn record(&mut self, fork_name: &str, bucket: Bucket, commits_ahead: u64) {
        match bucket {
            Bucket::AheadOnly => self
                .forks_with_commits_ahead_but_not_behind
                .push(ForkAhead::new(fork_name, commits_ahead)),
            Bucket::AheadAndBehind => self
                .forks_with_commits_ahead
                .push(ForkAhead::new(fork_name, commits_ahead)),
            Bucket::IdenticalOrBehind => self.forks_identical_or_behind.push(fork_name.to_string()),
            Bucket::Unknown => self.errors += 1,
        }
    }

    /// Note that `fork_name` on `page` has been fully recorded.
    pub fn complete_fork(&mut self, page: u32, fork_name: &str) {
        if let Some(checkpoint) = self.page_checkpoint.as_mut().filter(|c| c.page == page) {
            if !checkpoint.completed_forks.iter().any(|f| f == fork_name) {
                checkpoint.completed_forks.push(fork_name.to_string());
            }
            return;
        }

        self.page_checkpoint = Some(PageCheckpoint {
            page,
            completed_forks: vec![fork_name.to_string()],
        });
    }

    /// Whether `fork_name` was already recorded on `page` by an earlier,
    /// interrupted run.
    pub fn is_fork_completed(&self, page: u32, fork_name: &str) -> bool {
        self.page_checkpoint.as_ref().is_some_and(|checkpoint| {
            checkpoint.page == page && checkpoint.completed_forks.iter().any(|f| f == fork_name)
        })
    }

    /// Mark a page as fully searched and drop its checkpoint.
    ///
    /// Returns `false` if the page was already marked.
    pub fn mark_page_searched(&mut self, page: u32) -> bool {
        if self
            .page_checkpoint
            .as_ref()
            .is_some_and(|checkpoint| checkpoint.page == page)
        {
            self.page_checkpoint = None;
        }
        self.searched_pages.insert(page)
    }

    /// Counters for display.
    pub fn summary(&self) -> ProgressSummary {
        ProgressSummary {
            pages_searched: self.searched_pages.len(),
            last_page: self.searched_pages.last().copied(),
            total_forks_processed: self.total_forks_processed,
            ahead_only: self.forks_with_commits_ahead_but_not_behind.len(),
            ahead_and_behind: self.forks_with_commits_ahead.len(),
            identical_or_behind: self.forks_identical_or_behind.len(),
            errors: self.errors,
            in_flight_forks: self
                .page_checkpoint
                .as_ref()
                .map_or(0, |checkpoint| checkpoint.completed_forks.len()),
            updated_at: self.updated_at,
        }
    }
}

/// Snapshot of progress counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressSummary {
    pub pages_searched: usize,
    pub last_page: Option<u32>,
    pub total_forks_processed: u64,
    pub ahead_only: usize,
    pub ahead_and_behind: usize,
    pub identical_or_behind: usize,
    pub errors: u64,
    pub in_flight_forks: usize,
    pub updated_at: Option<DateTime<Utc>>,
}

/// JSON file-backed progress store.
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    /// Create a store for the given file. Nothing is read until [`load`](Self::load).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the progress file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read saved progress without modifying anything on disk.
    pub fn read(&self) -> StorageResult<ScanProgress> {
        let content = fs::read(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::NotFound(self.path.clone()),
            _ => StorageError::ReadFailed {
                path: self.path.clone(),
                reason: e.to_string(),
            },
        })?;

        serde_json::from_slice(&content).map_err(|e| StorageError::Corrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    /// Load saved progress for a scan.
    ///
    /// A missing file yields an empty [`ScanProgress`]. A file that cannot be
    /// read or parsed also yields an empty one, and is moved aside to
    /// `<file>.corrupt` so the next save does not destroy it.
    pub fn load(&self) -> ScanProgress {
        match self.read() {
            Ok(progress) => progress,
            Err(StorageError::NotFound(_)) => {
                debug!(path = %self.path.display(), "no saved progress, starting fresh");
                ScanProgress::default()
            }
            Err(e) => {
                warn!(error = %e, "starting fresh");
                let backup = self.sibling("corrupt");
                if let Err(e) = fs::rename(&self.path, &backup) {
                    warn!(path = %backup.display(), error = %e, "could not keep a copy of the corrupt file");
                }
                ScanProgress::default()
            }
        }
    }

    /// Persist progress, replacing the previous file.
    ///
    /// Writes to `<file>.tmp` and renames it into place, so readers see either
    /// the old state or the new one.
    pub fn save(&self, progress: &mut ScanProgress) -> StorageResult<()> {
        progress.updated_at = Some(Utc::now());
        let content = serde_json::to_string_pretty(progress)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StorageError::DirectoryError(e.to_string()))?;
        }

        let tmp = self.sibling("tmp");
        fs::write(&tmp, content).map_err(|e| self.save_failed(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.save_failed(e))
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".");
        name.push(suffix);
        PathBuf::from(name)
    }

    fn save_failed(&self, e: std::io::Error) -> StorageError {
        StorageError::SaveFailed {
            path: self.path.clone(),
            reason: e.to_string(),
        }
    }
}
