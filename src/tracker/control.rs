use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::{
    storage::{AppTimeMap, UsageStore},
    utils::{clock::Clock, time::date_to_record_name},
};

use super::{
    events::{EventSender, StatusChange, TrackerEvent},
    state::{TrackerStatus, TrackingState},
};

/// Everything guarded by the tracker lock. Totals and state change together, so they share it.
pub(crate) struct Session {
    pub state: TrackingState,
    pub times: AppTimeMap,
    /// Day the totals belong to.
    pub date: NaiveDate,
}

pub(crate) struct Shared {
    session: Mutex<Session>,
    pub events: EventSender,
    pub shutdown: CancellationToken,
    pub clock: Arc<dyn Clock>,
    pub store: Arc<dyn UsageStore>,
}

impl Shared {
    pub fn new(
        session: Session,
        events: EventSender,
        clock: Arc<dyn Clock>,
        store: Arc<dyn UsageStore>,
    ) -> Self {
        Self {
            session: Mutex::new(session),
            events,
            shutdown: CancellationToken::new(),
            clock,
            store,
        }
    }

    /// A panic while holding the lock leaves the session usable, so poisoning is ignored.
    pub fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit_status(&self, status: StatusChange) {
        info!("Tracker {status}");
        self.events.emit(TrackerEvent::StatusChanged(status));
    }
}

/// Cloneable control surface of a running tracker. Used by the presentation layer and the
/// shortcut listener; every method is safe to call from any thread.
#[derive(Clone)]
pub struct TrackerHandle {
    shared: Arc<Shared>,
}

impl TrackerHandle {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    pub fn status(&self) -> TrackerStatus {
        self.shared.lock().state.status()
    }

    /// Returns false when the tracker was already paused or stopped.
    pub fn pause(&self) -> bool {
        let mut session = self.shared.lock();
        let state = &mut session.state;
        if state.is_stopped || state.is_paused {
            return false;
        }
        state.is_paused = true;
        self.shared.emit_status(StatusChange::Paused);
        true
    }

    /// Returns false when the tracker wasn't paused by the user.
    pub fn resume(&self) -> bool {
        let now = self.shared.clock.instant();
        let mut session = self.shared.lock();
        let state = &mut session.state;
        if state.is_stopped || !state.is_paused {
            return false;
        }
        state.is_paused = false;
        state.skip_until(now);
        self.shared.emit_status(StatusChange::Resumed);
        true
    }

    pub fn toggle_pause(&self) -> TrackerStatus {
        if !self.pause() {
            self.resume();
        }
        self.status()
    }

    /// Requests the end of tracking. The engine performs the final save when it observes the
    /// request. Calling it again does nothing.
    pub fn stop(&self) {
        let mut session = self.shared.lock();
        if session.state.is_stopped {
            return;
        }
        session.state.is_stopped = true;
        self.shared.emit_status(StatusChange::Stopped);
        self.shared.shutdown.cancel();
    }

    /// Resolves once [TrackerHandle::stop] has been requested.
    pub async fn stopped(&self) {
        self.shared.shutdown.cancelled().await
    }

    /// Snapshot of the totals accumulated today.
    pub fn get_today(&self) -> AppTimeMap {
        self.shared.lock().times.clone()
    }

    /// Process and window title of the last sample, if any.
    pub fn current_activity(&self) -> Option<(String, String)> {
        let session = self.shared.lock();
        let state = &session.state;
        (!state.current_process.is_empty())
            .then(|| (state.current_process.clone(), state.window_title.clone()))
    }

    /// Totals of a past day. The current day is served from memory, as the file lags behind
    /// by up to one autosave interval.
    pub async fn get_date(&self, date: &str) -> AppTimeMap {
        {
            let session = self.shared.lock();
            if date_to_record_name(session.date) == date {
                return session.times.clone();
            }
        }
        self.shared.store.date_entry(date).await
    }

    /// Days with recorded data, newest first. Includes today even before the first autosave.
    pub async fn get_all_dates(&self) -> Vec<String> {
        let mut dates = self.shared.store.all_dates().await;
        let today = date_to_record_name(self.shared.lock().date);
        if !dates.contains(&today) {
            dates.push(today);
            dates.sort_unstable_by(|a, b| b.cmp(a));
        }
        dates
    }
}
