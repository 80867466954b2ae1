use std::fmt::Display;

use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerStatus {
    Running,
    /// Paused by the user. Only an explicit resume leaves this state.
    Paused,
    /// Paused automatically because a private browsing window has focus.
    PrivacyPaused,
    Stopped,
}

impl Display for TrackerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackerStatus::Running => write!(f, "running"),
            TrackerStatus::Paused => write!(f, "paused"),
            TrackerStatus::PrivacyPaused => write!(f, "privacy paused"),
            TrackerStatus::Stopped => write!(f, "stopped"),
        }
    }
}

/// Live state of a tracking session. Owned by a single engine and changed only through the
/// methods below.
#[derive(Debug)]
pub struct TrackingState {
    /// Process active during the last accounted tick. Empty before the first sample.
    pub current_process: String,
    pub window_title: String,
    /// Moment up to which time has already been attributed (or deliberately dropped).
    pub last_tick: Instant,
    pub is_paused: bool,
    pub is_private_browsing_active: bool,
    pub is_stopped: bool,
}

impl TrackingState {
    pub fn new(now: Instant) -> Self {
        Self {
            current_process: String::new(),
            window_title: String::new(),
            last_tick: now,
            is_paused: false,
            is_private_browsing_active: false,
            is_stopped: false,
        }
    }

    pub fn status(&self) -> TrackerStatus {
        if self.is_stopped {
            TrackerStatus::Stopped
        } else if self.is_paused {
            TrackerStatus::Paused
        } else if self.is_private_browsing_active {
            TrackerStatus::PrivacyPaused
        } else {
            TrackerStatus::Running
        }
    }

    /// Time since `last_tick` belongs to nobody. Used while paused.
    pub fn skip_until(&mut self, now: Instant) {
        self.last_tick = self.last_tick.max(now);
    }

    /// Closes the interval ending at `now`. Returns the process the interval belongs to and its
    /// length in seconds, or `None` when nothing was active or no time passed.
    pub fn close_interval(&mut self, now: Instant) -> Option<(String, f64)> {
        let elapsed = now.saturating_duration_since(self.last_tick).as_secs_f64();
        self.skip_until(now);
        if self.current_process.is_empty() || elapsed <= 0. {
            return None;
        }
        Some((self.current_process.clone(), elapsed))
    }

    /// Makes `process` the active one. Returns true when this is a switch.
    pub fn switch_to(&mut self, process: String, window_title: String) -> bool {
        let switched = self.current_process != process;
        self.current_process = process;
        self.window_title = window_title;
        switched
    }
}
