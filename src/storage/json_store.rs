use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, instrument, warn};

use crate::{
    fs::operations::write_atomically,
    utils::{clock::Clock, time::date_to_record_name},
};

use super::{AppTimeMap, DailyLog, UsageStore};

pub const DEFAULT_DATA_FILE: &str = "tracking_data.json";

/// The main realization of [UsageStore]. Every call opens, reads or writes, and closes the file,
/// so no handle outlives a single operation.
pub struct JsonFileStore {
    path: PathBuf,
    date_provider: Box<dyn Clock>,
}

impl JsonFileStore {
    pub fn new(path: PathBuf, date_provider: Box<dyn Clock>) -> Self {
        Self {
            path,
            date_provider,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file is `None`. Any other I/O failure is an error.
    async fn read_bytes(&self) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {:?}", self.path)),
        }
    }

    async fn read_log(&self) -> Result<Option<DailyLog>> {
        match self.read_bytes().await? {
            Some(bytes) => Ok(Some(parse_log(&bytes)?)),
            None => Ok(None),
        }
    }
}

fn parse_log(bytes: &[u8]) -> Result<DailyLog> {
    let log: DailyLog = serde_json::from_slice(bytes)?;
    for (date, times) in &log {
        if let Some((process, seconds)) = times
            .iter()
            .find(|(_, seconds)| !seconds.is_finite() || **seconds < 0.)
        {
            return Err(anyhow!(
                "Entry {date} has an invalid duration {seconds} for {process}"
            ));
        }
    }
    Ok(log)
}

#[async_trait]
impl UsageStore for JsonFileStore {
    #[instrument(skip(self), fields(path = ?self.path))]
    async fn load(&self) -> DailyLog {
        match self.read_log().await {
            Ok(Some(log)) => log,
            Ok(None) => {
                debug!("No data file yet, starting with an empty log");
                DailyLog::new()
            }
            Err(e) => {
                // A corrupt file can appear after a crash or a manual edit. It is not fatal.
                warn!("Data file is unreadable, treating it as empty: {e:?}");
                DailyLog::new()
            }
        }
    }

    #[instrument(skip_all, fields(path = ?self.path, days = log.len()))]
    async fn save(&self, log: &DailyLog) -> Result<()> {
        let buffer = serde_json::to_vec_pretty(log)?;
        write_atomically(&self.path, &buffer)
            .await
            .with_context(|| format!("Failed to write {:?}", self.path))?;
        debug!("Saved daily log");
        Ok(())
    }

    /// Unlike [UsageStore::load], a file that exists but can't be read is an error here. Only
    /// missing or corrupt data may be replaced.
    #[instrument(skip(self, times), fields(path = ?self.path))]
    async fn save_date(&self, date: NaiveDate, times: &AppTimeMap) -> Result<()> {
        let mut log = match self.read_bytes().await? {
            Some(bytes) => parse_log(&bytes).unwrap_or_else(|e| {
                warn!("Replacing corrupt data file: {e:?}");
                DailyLog::new()
            }),
            None => DailyLog::new(),
        };
        log.insert(date_to_record_name(date), times.clone());
        self.save(&log).await
    }

    fn current_date(&self) -> NaiveDate {
        self.date_provider.date()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use anyhow::Result;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    use crate::{
        storage::{AppTimeMap, DailyLog, UsageStore},
        utils::{clock::test_clock::TestClock, logging::TEST_LOGGING},
    };

    use super::{JsonFileStore, DEFAULT_DATA_FILE};

    const TEST_DATE: NaiveDate = NaiveDate::from_ymd_opt(2018, 7, 4).unwrap();

    fn store_in(dir: &std::path::Path) -> JsonFileStore {
        JsonFileStore::new(
            dir.join(DEFAULT_DATA_FILE),
            Box::new(TestClock::new(TEST_DATE)),
        )
    }

    fn times(entries: &[(&str, f64)]) -> AppTimeMap {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() -> Result<()> {
        *TEST_LOGGING;
        let dir = tempdir()?;
        let store = store_in(dir.path());

        assert!(store.load().await.is_empty());
        assert!(store.today().await.is_empty());
        assert!(store.all_dates().await.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_load_corrupt_file_is_empty() -> Result<()> {
        *TEST_LOGGING;
        let dir = tempdir()?;
        let store = store_in(dir.path());
        std::fs::write(store.path(), b"{\"2018-07-04\": {\"a.exe\": 1")?;

        assert!(store.load().await.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_load_negative_duration_is_corrupt() -> Result<()> {
        let dir = tempdir()?;
        let store = store_in(dir.path());
        std::fs::write(store.path(), br#"{"2018-07-04": {"a.exe": -4}}"#)?;

        assert!(store.load().await.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_reads_files_written_by_older_versions() -> Result<()> {
        let dir = tempdir()?;
        let store = store_in(dir.path());
        std::fs::write(
            store.path(),
            br#"{
  "2018-07-03": {"code.exe": 120.25},
  "2018-07-04": {"chrome.exe": 3605, "Process not found": 2.5}
}"#,
        )?;

        let today = store.today().await;
        assert_eq!(today, times(&[("chrome.exe", 3605.), ("Process not found", 2.5)]));
        assert_eq!(
            store.date_entry("2018-07-03").await,
            times(&[("code.exe", 120.25)])
        );
        assert!(store.date_entry("1999-01-01").await.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_save_load_is_idempotent() -> Result<()> {
        let dir = tempdir()?;
        let store = store_in(dir.path());
        std::fs::write(
            store.path(),
            br#"{"2018-07-04": {"b.exe": 1.5, "a.exe": 10}, "2018-07-01": {}}"#,
        )?;

        let log = store.load().await;
        store.save(&log).await?;
        let first = std::fs::read(store.path())?;

        store.save(&store.load().await).await?;
        let second = std::fs::read(store.path())?;

        assert_eq!(store.load().await, log);
        assert_eq!(first, second);
        Ok(())
    }

    #[tokio::test]
    async fn test_save_today_keeps_other_dates() -> Result<()> {
        let dir = tempdir()?;
        let store = store_in(dir.path());
        let mut previous = DailyLog::new();
        previous.insert("2018-07-03".into(), times(&[("code.exe", 50.)]));
        previous.insert("2018-07-04".into(), times(&[("old.exe", 1.)]));
        store.save(&previous).await?;

        store.save_today(&times(&[("a.exe", 10.)])).await?;

        let log = store.load().await;
        assert_eq!(log["2018-07-04"], times(&[("a.exe", 10.)]));
        assert_eq!(log["2018-07-03"], times(&[("code.exe", 50.)]));
        assert_eq!(log.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_save_today_overwrites_corrupt_file() -> Result<()> {
        let dir = tempdir()?;
        let store = store_in(dir.path());
        std::fs::write(store.path(), b"not json")?;

        store.save_today(&times(&[("a.exe", 10.)])).await?;

        let expected = BTreeMap::from([("2018-07-04".to_string(), times(&[("a.exe", 10.)]))]);
        assert_eq!(store.load().await, expected);
        Ok(())
    }

    #[tokio::test]
    async fn test_all_dates_descending() -> Result<()> {
        let dir = tempdir()?;
        let store = store_in(dir.path());
        for date in ["2018-07-02", "2018-07-04", "2017-12-31", "2018-07-03"] {
            store
                .save_date(date.parse()?, &times(&[("a.exe", 1.)]))
                .await?;
        }

        assert_eq!(
            store.all_dates().await,
            vec!["2018-07-04", "2018-07-03", "2018-07-02", "2017-12-31"]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_file_format_is_plain_nested_object() -> Result<()> {
        let dir = tempdir()?;
        let store = store_in(dir.path());
        store.save_today(&times(&[("a.exe", 10.)])).await?;

        let value: serde_json::Value = serde_json::from_slice(&std::fs::read(store.path())?)?;
        assert_eq!(value, serde_json::json!({"2018-07-04": {"a.exe": 10.0}}));
        Ok(())
    }

    #[tokio::test]
    async fn test_unreadable_file_is_not_overwritten() -> Result<()> {
        *TEST_LOGGING;
        let dir = tempdir()?;
        let store = store_in(dir.path());
        // A directory in place of the file fails to read with something other than NotFound.
        std::fs::create_dir(store.path())?;
        std::fs::write(store.path().join("keep"), b"history")?;

        let error = store
            .save_today(&times(&[("a.exe", 10.)]))
            .await
            .unwrap_err();

        assert!(format!("{error:#}").contains("Failed to read"), "{error:#}");
        assert_eq!(std::fs::read(store.path().join("keep"))?, b"history");
        Ok(())
    }
}
