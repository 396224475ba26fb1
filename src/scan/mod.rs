//! Fork scanning: divergence classification and the resumable scan loop.

pub mod classifier;
mod controller;

pub use classifier::{classify, classify_counts, Bucket};
pub use controller::{ScanController, ScanOutcome};
