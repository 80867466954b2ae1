use std::cmp::Ordering;

use crate::{
    storage::AppTimeMap,
    utils::percentage::{seconds_percentage, Percentage},
};

/// Applications used for less than this many seconds don't count as used.
const MIN_COUNTED_SECONDS: f64 = 1.;

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessUsage {
    pub process_name: String,
    pub seconds: f64,
    pub share: Percentage,
}

/// Statistics shown for a day (or a range of days).
#[derive(Debug, Clone, PartialEq)]
pub struct UsageSummary {
    pub total_seconds: f64,
    pub app_count: usize,
    /// Processes ordered by time spent, longest first. Ties are ordered by name.
    pub entries: Vec<ProcessUsage>,
}

impl UsageSummary {
    pub fn from_map(times: &AppTimeMap) -> Self {
        let total_seconds = times.values().sum::<f64>();
        let app_count = times
            .values()
            .filter(|v| **v >= MIN_COUNTED_SECONDS)
            .count();

        let mut entries = times
            .iter()
            .map(|(process_name, seconds)| ProcessUsage {
                process_name: process_name.clone(),
                seconds: *seconds,
                share: seconds_percentage(*seconds, total_seconds),
            })
            .collect::<Vec<_>>();
        entries.sort_by(|a, b| {
            b.seconds
                .partial_cmp(&a.seconds)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.process_name.cmp(&b.process_name))
        });

        Self {
            total_seconds,
            app_count,
            entries,
        }
    }

    pub fn most_used(&self) -> Option<&ProcessUsage> {
        self.entries.first()
    }

    /// Drops entries whose share is below `min_share`. Totals are left untouched.
    pub fn with_min_share(mut self, min_share: Percentage) -> Self {
        self.entries.retain(|v| v.share >= min_share);
        self
    }
}

/// Sums the totals of several days.
pub fn merge_maps<'a>(maps: impl IntoIterator<Item = &'a AppTimeMap>) -> AppTimeMap {
    let mut merged = AppTimeMap::new();
    for map in maps {
        for (process, seconds) in map {
            *merged.entry(process.clone()).or_insert(0.) += seconds;
        }
    }
    merged
}
