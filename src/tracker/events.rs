use std::fmt::Display;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::trace;

use crate::storage::AppTimeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    Paused,
    Resumed,
    Stopped,
    PrivateBrowsingDetected,
    PrivateBrowsingEnded,
}

impl StatusChange {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusChange::Paused => "paused",
            StatusChange::Resumed => "resumed",
            StatusChange::Stopped => "stopped",
            StatusChange::PrivateBrowsingDetected => "private_browsing_detected",
            StatusChange::PrivateBrowsingEnded => "private_browsing_ended",
        }
    }
}

impl Display for StatusChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notifications consumed by whatever presents the data.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerEvent {
    ActivityChanged {
        process_name: String,
        window_title: String,
    },
    /// Copy of the day's totals taken right after they changed.
    TimeUpdated(AppTimeMap),
    StatusChanged(StatusChange),
}

/// Sending side of the notification queue. Never blocks and never fails: a consumer that went
/// away simply stops receiving.
#[derive(Clone)]
pub struct EventSender {
    inner: UnboundedSender<TrackerEvent>,
}

impl EventSender {
    pub fn emit(&self, event: TrackerEvent) {
        if let Err(e) = self.inner.send(event) {
            trace!("Nobody listens to tracker events, dropping {:?}", e.0);
        }
    }
}

pub fn event_channel() -> (EventSender, UnboundedReceiver<TrackerEvent>) {
    let (inner, receiver) = mpsc::unbounded_channel();
    (EventSender { inner }, receiver)
}
