//! Scan progress persistence.
//!
//! Provides the JSON progress file that makes fork scans resumable.

mod progress_store;

pub use progress_store::{ForkAhead, PageCheckpoint, ProgressStore, ProgressSummary, ScanProgress};
