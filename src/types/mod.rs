//! Core type definitions using newtype patterns for type safety.
//!
//! Repository names and commit hashes travel through the whole pipeline;
//! wrapping them keeps an owner string from being passed where a SHA is due.

mod commit;
mod repo;

pub use commit::{CommitSha, CommitShaError};
pub use repo::{RepoSlug, RepoSlugError};
