//! Configuration management for forkscan.
//!
//! Provides XDG-compliant paths, the optional settings file, and the
//! explicit [`ScanSettings`] handed to the scan controller.

mod settings;

pub use settings::{AppSettings, Paths, ScanSettings, DEFAULT_API_URL, DEFAULT_PAGE_SIZE};
