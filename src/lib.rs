//! Desktop screen-time tracker. Samples the foreground window once per second, attributes the
//! time to the owning process and keeps per-day totals in a single JSON file.
//!
//! Tracking pauses on request and by itself while a private browsing window is focused.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod fs;
pub mod report;
pub mod storage;
pub mod tracker;
pub mod utils;
pub mod window_api;
