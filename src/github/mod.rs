//! GitHub API access.
//!
//! [`RepositoryApi`] is the seam between the scan controller and the network;
//! [`GitHubClient`] is the production implementation.

mod client;
pub mod traits;

pub use client::GitHubClient;
pub use traits::{Comparison, ForkSummary, RepositoryApi, RepositoryInfo};
