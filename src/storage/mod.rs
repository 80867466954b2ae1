//! Storage is organized through [json_store::JsonFileStore].
//! The basic idea is:
//!  - All the history lives in a single JSON document.
//!  - The document maps a calendar day (`YYYY-MM-DD`) to the seconds spent in every process.
//!  - Saving a day replaces that day's entry wholesale; entries are never merged.

pub mod json_store;

use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::utils::time::date_to_record_name;

/// Process name (for example `chrome.exe`) to accumulated seconds.
pub type AppTimeMap = BTreeMap<String, f64>;

/// Calendar day (`YYYY-MM-DD`) to the [AppTimeMap] recorded on that day.
pub type DailyLog = BTreeMap<String, AppTimeMap>;

/// Interface for abstracting storage of daily usage.
///
/// There is a single writer, the tracking engine, so the read-modify-write helpers are not
/// isolated from other writers.
#[async_trait]
pub trait UsageStore: Send + Sync {
    /// Reads the whole log. Missing or unreadable data is an empty log.
    async fn load(&self) -> DailyLog;

    /// Replaces the whole persisted log.
    async fn save(&self, log: &DailyLog) -> Result<()>;

    /// Day that `today` and `save_today` refer to.
    fn current_date(&self) -> NaiveDate;

    async fn date_entry(&self, date: &str) -> AppTimeMap {
        self.load().await.remove(date).unwrap_or_default()
    }

    async fn today(&self) -> AppTimeMap {
        self.date_entry(&date_to_record_name(self.current_date()))
            .await
    }

    async fn save_date(&self, date: NaiveDate, times: &AppTimeMap) -> Result<()> {
        let mut log = self.load().await;
        log.insert(date_to_record_name(date), times.clone());
        self.save(&log).await
    }

    async fn save_today(&self, times: &AppTimeMap) -> Result<()> {
        self.save_date(self.current_date(), times).await
    }

    /// All recorded days, newest first.
    async fn all_dates(&self) -> Vec<String> {
        self.load().await.into_keys().rev().collect()
    }
}
