//! Scan controller.
//!
//! Walks the fork listing page by page, compares each fork's head against
//! the upstream head, classifies the result and persists progress after
//! every fork. Runs strictly sequentially: each request completes before the
//! next is issued.
//!
//! ```text
//! Init -> Resume -> FetchPage -> ProcessFork* -> PageDone -> FetchPage | Done
//! ```
//!
//! A page is only marked searched once all its forks are saved. Forks saved
//! on a page that was interrupted are listed in the page checkpoint and
//! skipped when the page is fetched again.

use crate::config::ScanSettings;
use crate::error::ScanResult;
use crate::github::{ForkSummary, RepositoryApi, RepositoryInfo};
use crate::scan::classifier::{classify_counts, Bucket};
use crate::storage::{ForkAhead, ProgressStore, ScanProgress};
use crate::types::CommitSha;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

/// Result of a scan run.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Upstream metadata resolved at start.
    pub upstream: RepositoryInfo,
    /// Upstream head commit every fork was compared against.
    pub upstream_head: CommitSha,
    /// Final persisted state.
    pub progress: ScanProgress,
    /// Pages completed during this run.
    pub pages_processed: u32,
    /// Forks classified during this run.
    pub forks_processed: u64,
    /// `false` when the run stopped at the page limit before the listing
    /// was exhausted.
    pub completed: bool,
}

impl ScanOutcome {
    /// Forks both ahead of and behind upstream.
    pub fn forks_with_commits_ahead(&self) -> &[ForkAhead] {
        &self.progress.forks_with_commits_ahead
    }
}

/// Drives one resumable scan of a repository's forks.
pub struct ScanController<A> {
    api: A,
    settings: ScanSettings,
    store: ProgressStore,
}

impl<A: RepositoryApi> ScanController<A> {
    /// Create a controller persisting to `settings.progress_path`.
    pub fn new(api: A, settings: ScanSettings) -> Self {
        let store = ProgressStore::new(&settings.progress_path);
        Self {
            api,
            settings,
            store,
        }
    }

    /// The progress store in use.
    pub fn store(&self) -> &ProgressStore {
        &self.store
    }

    /// The API implementation in use.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Run the scan until the fork listing is exhausted or the page limit is
    /// reached.
    ///
    /// Any API or storage error aborts the run. Everything recorded up to
    /// that point is already on disk, so running again resumes.
    pub async fn run(&self) -> ScanResult<ScanOutcome> {
        let repo = &self.settings.repo;

        let upstream = self.api.get_repository(repo).await?;
        let upstream_head = self
            .api
            .get_branch_head(repo, &upstream.default_branch)
            .await?;
        info!(
            repo = %repo,
            branch = %upstream.default_branch,
            head = %upstream_head.short(),
            "Found {} forks",
            upstream.forks_count
        );

        let mut progress = self.store.load();
        let mut page = progress.next_page();
        if page > 1 {
            info!(
                page,
                processed = progress.total_forks_processed,
                path = %self.store.path().display(),
                "Resuming from saved progress"
            );
        }

        let bar = self.progress_bar(upstream.forks_count, progress.total_forks_processed);
        let mut pages_processed = 0;
        let mut forks_processed = 0;
        let mut completed = true;

        loop {
            if self.settings.max_pages.is_some_and(|max| pages_processed >= max) {
                completed = false;
                break;
            }

            debug!(page, "Processing page");
            bar.set_message(format!("page {}", page));
            let forks = self
                .api
                .list_forks(repo, page, self.settings.page_size)
                .await?;
            if forks.is_empty() {
                break;
            }

            for fork in &forks {
                if progress.is_fork_completed(page, &fork.full_name.to_string()) {
                    debug!(fork = %fork.full_name, page, "Already recorded, skipping");
                    continue;
                }
                self.process_fork(&mut progress, page, fork, &upstream, &upstream_head, &bar)
                    .await?;
                forks_processed += 1;
            }

            if !progress.mark_page_searched(page) {
                warn!(page, "Page was already marked as searched");
            }
            self.store.save(&mut progress)?;
            pages_processed += 1;
            page += 1;
        }

        if completed {
            bar.finish_with_message("scan complete");
        } else {
            bar.abandon_with_message(format!("stopped before page {}", page));
        }
        info!(
            pages = pages_processed,
            forks = forks_processed,
            errors = progress.errors,
            completed,
            "Scan finished"
        );

        Ok(ScanOutcome {
            upstream,
            upstream_head,
            progress,
            pages_processed,
            forks_processed,
            completed,
        })
    }

    async fn process_fork(
        &self,
        progress: &mut ScanProgress,
        page: u32,
        fork: &ForkSummary,
        upstream: &RepositoryInfo,
        upstream_head: &CommitSha,
        bar: &ProgressBar,
    ) -> ScanResult<()> {
        let repo = &self.settings.repo;
        let name = fork.full_name.to_string();

        progress.count_fork();
        let seen = progress.total_forks_processed;

        let fork_head = self
            .api
            .get_branch_head(&fork.full_name, &fork.default_branch)
            .await?;
        let comparison = self.api.compare(repo, upstream_head, &fork_head).await?;
        debug!(fork = %name, ?comparison, "Comparison");

        let bucket = classify_counts(comparison.ahead_by, comparison.behind_by);
        let ahead = comparison
            .ahead_by
            .and_then(|n| u64::try_from(n).ok())
            .unwrap_or(0);
        let behind = comparison.behind_by.unwrap_or(0);
        let of = format!("({}/{})", seen, upstream.forks_count);

        bar.suspend(|| match bucket {
            Bucket::AheadOnly => info!(
                "{} is ahead of {} by {} commits but not behind {}",
                name, repo, ahead, of
            ),
            Bucket::AheadAndBehind => info!(
                "{} is ahead of {} by {} commits and behind by {} commits {}",
                name, repo, ahead, behind, of
            ),
            Bucket::IdenticalOrBehind => info!("{} is identical or behind {} {}", name, repo, of),
            Bucket::Unknown => warn!(
                fork = %name,
                ahead_by = ?comparison.ahead_by,
                behind_by = ?comparison.behind_by,
                "Could not classify fork"
            ),
        });

        progress.record(&name, bucket, ahead);
        progress.complete_fork(page, &name);
        self.store.save(progress)?;

        bar.set_length(upstream.forks_count.max(seen));
        bar.set_position(seen);
        Ok(())
    }

    fn progress_bar(&self, total: u64, position: u64) -> ProgressBar {
        if !self.settings.show_progress {
            return ProgressBar::hidden();
        }

        let bar = ProgressBar::new(total.max(position));
        if let Ok(style) = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        ) {
            bar.set_style(style.progress_chars("=>-"));
        }
        bar.set_position(position);
        bar
    }
}
