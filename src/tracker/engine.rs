use std::{
    panic::{catch_unwind, AssertUnwindSafe},
    sync::Arc,
    time::Duration,
};

use anyhow::Result;
use tokio::{sync::mpsc::UnboundedReceiver, task::JoinHandle, time::Instant};
use tracing::{debug, error, info, info_span, instrument, trace, Instrument};

use crate::{
    storage::{AppTimeMap, UsageStore},
    utils::{clock::Clock, time::date_to_record_name},
    window_api::{process::ProcessResolver, ForegroundInspector, ForegroundWindow},
};

use super::{
    control::{Session, Shared, TrackerHandle},
    events::{event_channel, EventSender, StatusChange, TrackerEvent},
    privacy::is_private,
    state::{TrackerStatus, TrackingState},
};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_AUTOSAVE_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    pub poll_interval: Duration,
    pub autosave_interval: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            autosave_interval: DEFAULT_AUTOSAVE_INTERVAL,
        }
    }
}

/// Polls the foreground window once per interval and turns the samples into per-process totals.
///
/// Accounting is continuous: every tick that resolves a process closes the interval since the
/// previous tick and credits it to the process that was active during it. A switch therefore
/// never credits the newcomer with time it wasn't used for. Paused and privacy-paused time is
/// skipped, never credited.
pub struct TrackingEngine {
    inspector: Box<dyn ForegroundInspector>,
    resolver: Box<dyn ProcessResolver>,
    settings: EngineSettings,
    shared: Arc<Shared>,
}

impl TrackingEngine {
    /// Creates an engine that resumes today's totals from `store`.
    pub async fn new(
        inspector: Box<dyn ForegroundInspector>,
        resolver: Box<dyn ProcessResolver>,
        store: Arc<dyn UsageStore>,
        clock: Arc<dyn Clock>,
        settings: EngineSettings,
    ) -> (Self, UnboundedReceiver<TrackerEvent>) {
        let (events, receiver) = event_channel();
        let date = clock.date();
        let times = store.date_entry(&date_to_record_name(date)).await;
        info!(
            "Resuming {} with {} tracked applications",
            date_to_record_name(date),
            times.len()
        );
        let session = Session {
            state: TrackingState::new(clock.instant()),
            times,
            date,
        };
        let shared = Arc::new(Shared::new(session, events, clock, store));
        (
            Self {
                inspector,
                resolver,
                settings,
                shared,
            },
            receiver,
        )
    }

    pub fn handle(&self) -> TrackerHandle {
        TrackerHandle::new(self.shared.clone())
    }

    /// Spawns the polling loop onto the current tokio runtime.
    pub fn start(self) -> JoinHandle<Result<()>> {
        tokio::spawn(self.run())
    }

    /// Executes the polling loop until a stop is requested, then saves the day.
    pub async fn run(mut self) -> Result<()> {
        self.emit_times(self.shared.lock().times.clone());

        let clock = self.shared.clock.clone();
        let shutdown = self.shared.shutdown.clone();
        let mut tick_point = clock.instant();
        let mut autosave_point = tick_point + self.settings.autosave_interval;

        while !shutdown.is_cancelled() {
            let now = clock.instant();
            let span = info_span!("Tracking tick");
            if let Err(e) = self.tick(now).instrument(span).await {
                error!("Encountered an error during a tick {e:?}");
            }

            if now >= autosave_point {
                self.autosave().await;
                autosave_point = now + self.settings.autosave_interval;
            }

            tick_point += self.settings.poll_interval;
            if tick_point < now {
                // The machine was suspended or a tick stalled. Don't try to catch up.
                tick_point = now + self.settings.poll_interval;
            }

            tokio::select! {
                _ = shutdown.cancelled() => (),
                _ = clock.sleep_until(tick_point) => ()
            }
        }

        self.finalize().await
    }

    /// One poll cycle at `now`.
    pub(crate) async fn tick(&mut self, now: Instant) -> Result<()> {
        self.roll_over_day().await;

        {
            let mut session = self.shared.lock();
            let state = &mut session.state;
            if state.is_stopped {
                return Ok(());
            }
            if state.is_paused {
                state.skip_until(now);
                return Ok(());
            }
        }

        let Some(window) = self.sample_foreground() else {
            trace!("Unknown Window");
            return Ok(());
        };

        if !self.update_privacy(now, &window.title) {
            return Ok(());
        }

        let Some(pid) = window.process_id else {
            debug!("Window {} has no owning process", window.window_id);
            return Ok(());
        };
        let process_name = self.resolve(pid);

        self.account(now, process_name, window.title);
        Ok(())
    }

    /// Queries the inspector. A panicking backend is treated like a missing window.
    fn sample_foreground(&mut self) -> Option<ForegroundWindow> {
        catch_unwind(AssertUnwindSafe(|| self.inspector.current_foreground()))
            .inspect_err(|_| error!("Foreground inspector panicked"))
            .ok()
            .flatten()
    }

    fn resolve(&mut self, pid: u32) -> String {
        catch_unwind(AssertUnwindSafe(|| self.resolver.resolve_process_name(pid)))
            .unwrap_or_else(|_| {
                error!("Process resolver panicked for {pid}");
                format!("Error: failed to resolve process {pid}")
            })
    }

    /// Moves in or out of the privacy pause. Returns true when the tick may be accounted.
    fn update_privacy(&self, now: Instant, title: &str) -> bool {
        let private = is_private(title);
        let mut session = self.shared.lock();
        let state = &mut session.state;
        if state.is_stopped || state.is_paused {
            return false;
        }

        match (private, state.is_private_browsing_active) {
            (true, was_private) => {
                state.skip_until(now);
                if !was_private {
                    state.is_private_browsing_active = true;
                    self.emit_status(StatusChange::PrivateBrowsingDetected);
                }
                false
            }
            (false, true) => {
                state.is_private_browsing_active = false;
                state.skip_until(now);
                self.emit_status(StatusChange::PrivateBrowsingEnded);
                true
            }
            (false, false) => true,
        }
    }

    fn account(&self, now: Instant, process_name: String, window_title: String) {
        let mut session = self.shared.lock();
        // The user may have paused while the process was being resolved.
        if session.state.status() != TrackerStatus::Running {
            return;
        }

        if let Some((process, elapsed)) = session.state.close_interval(now) {
            *session.times.entry(process).or_insert(0.) += elapsed;
            self.emit_times(session.times.clone());
        }

        if session
            .state
            .switch_to(process_name.clone(), window_title.clone())
        {
            debug!("Switched to {process_name}");
            self.shared.events.emit(TrackerEvent::ActivityChanged {
                process_name,
                window_title,
            });
        }
    }

    /// Stores the finished day and starts a new one when the calendar day changed. The old day
    /// stays in memory until it is written, so a failed save is retried on the next tick.
    async fn roll_over_day(&mut self) {
        let today = self.shared.clock.date();
        let (previous_date, previous_times) = {
            let session = self.shared.lock();
            if session.date == today {
                return;
            }
            (session.date, session.times.clone())
        };

        if let Err(e) = self
            .shared
            .store
            .save_date(previous_date, &previous_times)
            .await
        {
            error!(
                "Failed to save {}, keeping it open {e:?}",
                date_to_record_name(previous_date)
            );
            return;
        }

        let mut session = self.shared.lock();
        session.times = AppTimeMap::new();
        session.date = today;
        self.emit_times(AppTimeMap::new());
        info!(
            "Day changed from {} to {}",
            date_to_record_name(previous_date),
            date_to_record_name(today)
        );
    }

    #[instrument(skip(self))]
    async fn autosave(&mut self) {
        let (date, times) = {
            let session = self.shared.lock();
            (session.date, session.times.clone())
        };
        match self.shared.store.save_date(date, &times).await {
            Ok(()) => debug!("Autosaved {} applications", times.len()),
            Err(e) => error!("Autosave failed, tracking continues {e:?}"),
        }
    }

    /// Credits the interval in progress and writes the day. Runs once, after a stop request.
    #[instrument(skip(self))]
    async fn finalize(&mut self) -> Result<()> {
        let now = self.shared.clock.instant();
        let (date, times) = {
            let mut session = self.shared.lock();
            let state = &mut session.state;
            let counting = !state.is_paused && !state.is_private_browsing_active;
            let pending = state.close_interval(now);
            if let Some((process, elapsed)) = pending.filter(|_| counting) {
                *session.times.entry(process).or_insert(0.) += elapsed;
                self.emit_times(session.times.clone());
            }
            (session.date, session.times.clone())
        };
        self.shared
            .store
            .save_date(date, &times)
            .await
            .inspect_err(|e| error!("Failed to save on stop {e:?}"))?;
        info!("Tracking stopped, saved {} applications", times.len());
        Ok(())
    }

    fn emit_times(&self, times: AppTimeMap) {
        self.events().emit(TrackerEvent::TimeUpdated(times));
    }

    fn emit_status(&self, status: StatusChange) {
        info!("Tracker {status}");
        self.events().emit(TrackerEvent::StatusChanged(status));
    }

    fn events(&self) -> &EventSender {
        &self.shared.events
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use chrono::NaiveDate;
    use tokio::{sync::mpsc::UnboundedReceiver, time::Instant};

    use crate::{
        storage::{memory::MemoryStore, AppTimeMap, DailyLog},
        tracker::{
            control::TrackerHandle,
            events::{StatusChange, TrackerEvent},
            state::TrackerStatus,
        },
        utils::{clock::test_clock::TestClock, logging::TEST_LOGGING},
        window_api::{
            process::{MockProcessResolver, ProcessResolver, PROCESS_NOT_FOUND},
            ForegroundWindow, MockForegroundInspector,
        },
    };

    use super::{EngineSettings, TrackingEngine};

    const TEST_DATE: NaiveDate = NaiveDate::from_ymd_opt(2018, 7, 4).unwrap();

    fn window(pid: u32, title: &str) -> Option<ForegroundWindow> {
        Some(ForegroundWindow {
            window_id: pid as u64 * 10,
            process_id: Some(pid),
            title: title.into(),
        })
    }

    fn inspector(samples: Vec<Option<ForegroundWindow>>) -> MockForegroundInspector {
        let mut inspector = MockForegroundInspector::new();
        let mut samples = samples.into_iter();
        inspector
            .expect_current_foreground()
            .returning(move || samples.next().flatten());
        inspector
    }

    fn resolver() -> MockProcessResolver {
        let mut resolver = MockProcessResolver::new();
        resolver
            .expect_resolve_process_name()
            .returning(|pid| match pid {
                1 => "x.exe".into(),
                2 => "y.exe".into(),
                _ => PROCESS_NOT_FOUND.into(),
            });
        resolver
    }

    struct Fixture {
        engine: TrackingEngine,
        handle: TrackerHandle,
        events: UnboundedReceiver<TrackerEvent>,
        store: Arc<MemoryStore>,
        clock: TestClock,
    }

    impl Fixture {
        async fn new(samples: Vec<Option<ForegroundWindow>>) -> Self {
            Self::with_parts(Box::new(inspector(samples)), Box::new(resolver()), DailyLog::new())
                .await
        }

        async fn with_parts(
            inspector: Box<MockForegroundInspector>,
            resolver: Box<dyn ProcessResolver>,
            log: DailyLog,
        ) -> Self {
            *TEST_LOGGING;
            let store = Arc::new(MemoryStore::new(TEST_DATE, log));
            let clock = TestClock::new(TEST_DATE);
            let (engine, events) = TrackingEngine::new(
                inspector,
                resolver,
                store.clone(),
                Arc::new(clock.clone()),
                EngineSettings::default(),
            )
            .await;
            let handle = engine.handle();
            Self {
                engine,
                handle,
                events,
                store,
                clock,
            }
        }

        /// Lets `seconds` pass and runs one tick.
        async fn tick_after(&mut self, seconds: u64) {
            tokio::time::advance(Duration::from_secs(seconds)).await;
            self.engine.tick(Instant::now()).await.unwrap();
        }

        fn drain(&mut self) -> Vec<TrackerEvent> {
            let mut events = vec![];
            while let Ok(event) = self.events.try_recv() {
                events.push(event);
            }
            events
        }

        fn total(&self) -> f64 {
            self.handle.get_today().values().sum()
        }
    }

    fn times(entries: &[(&str, f64)]) -> AppTimeMap {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn activity(process_name: &str, window_title: &str) -> TrackerEvent {
        TrackerEvent::ActivityChanged {
            process_name: process_name.into(),
            window_title: window_title.into(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_switch_attributes_time_to_previous_process() {
        let mut fixture =
            Fixture::new(vec![window(1, "x"), window(1, "x"), window(2, "y")]).await;

        fixture.tick_after(0).await;
        assert!(fixture.handle.get_today().is_empty());
        assert_eq!(fixture.drain(), vec![activity("x.exe", "x")]);

        fixture.tick_after(1).await;
        assert_eq!(fixture.handle.get_today(), times(&[("x.exe", 1.)]));
        assert_eq!(
            fixture.drain(),
            vec![TrackerEvent::TimeUpdated(times(&[("x.exe", 1.)]))]
        );

        fixture.tick_after(1).await;
        assert_eq!(fixture.handle.get_today(), times(&[("x.exe", 2.)]));
        assert_eq!(
            fixture.drain(),
            vec![
                TrackerEvent::TimeUpdated(times(&[("x.exe", 2.)])),
                activity("y.exe", "y"),
            ]
        );
        assert_eq!(
            fixture.handle.current_activity(),
            Some(("y.exe".to_string(), "y".to_string()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_total_matches_running_time() {
        let samples = vec![
            window(1, "x"),
            window(2, "y"),
            window(2, "y 2"),
            window(1, "x"),
            window(3, "gone"),
            window(2, "y"),
        ];
        let mut fixture = Fixture::new(samples).await;

        fixture.tick_after(0).await;
        for seconds in [2, 1, 3, 1, 4] {
            fixture.tick_after(seconds).await;
        }

        assert_eq!(fixture.total(), 11.);
        assert_eq!(
            fixture.handle.get_today(),
            times(&[("x.exe", 3.), ("y.exe", 4.), (PROCESS_NOT_FOUND, 4.)])
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_resumes_saved_totals() {
        let mut log = DailyLog::new();
        log.insert("2018-07-04".into(), times(&[("x.exe", 100.)]));
        log.insert("2018-07-03".into(), times(&[("y.exe", 5.)]));
        let mut fixture = Fixture::with_parts(
            Box::new(inspector(vec![window(1, "x"), window(1, "x")])),
            Box::new(resolver()),
            log,
        )
        .await;

        fixture.tick_after(0).await;
        fixture.tick_after(2).await;

        assert_eq!(fixture.handle.get_today(), times(&[("x.exe", 102.)]));
        assert_eq!(
            fixture.handle.get_date("2018-07-03").await,
            times(&[("y.exe", 5.)])
        );
        assert_eq!(
            fixture.handle.get_all_dates().await,
            vec!["2018-07-04", "2018-07-03"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_does_not_count() {
        let mut inspector = MockForegroundInspector::new();
        // Only the two running ticks may touch the OS.
        inspector
            .expect_current_foreground()
            .times(3)
            .returning(|| window(1, "x"));
        let mut fixture =
            Fixture::with_parts(Box::new(inspector), Box::new(resolver()), DailyLog::new()).await;

        fixture.tick_after(0).await;
        fixture.tick_after(1).await;
        assert_eq!(fixture.total(), 1.);

        assert!(fixture.handle.pause());
        assert!(!fixture.handle.pause());
        assert_eq!(fixture.handle.status(), TrackerStatus::Paused);
        let before = fixture.handle.get_today();
        for _ in 0..5 {
            fixture.tick_after(1).await;
            assert_eq!(fixture.handle.get_today(), before);
        }

        tokio::time::advance(Duration::from_millis(500)).await;
        assert_eq!(fixture.handle.toggle_pause(), TrackerStatus::Running);
        fixture.tick_after(1).await;

        assert_eq!(fixture.handle.get_today(), times(&[("x.exe", 2.)]));
        let statuses = fixture
            .drain()
            .into_iter()
            .filter_map(|v| match v {
                TrackerEvent::StatusChanged(status) => Some(status),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(statuses, vec![StatusChange::Paused, StatusChange::Resumed]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_private_browsing_pauses_automatically() {
        let samples = vec![
            window(1, "x"),
            window(1, "x"),
            window(2, "New Tab - Incognito"),
            window(2, "Another tab - Incognito"),
            window(1, "x"),
            window(1, "x"),
        ];
        let mut fixture = Fixture::new(samples).await;

        fixture.tick_after(0).await;
        fixture.tick_after(1).await;
        assert_eq!(fixture.total(), 1.);
        fixture.drain();

        fixture.tick_after(1).await;
        assert_eq!(fixture.handle.status(), TrackerStatus::PrivacyPaused);
        assert_eq!(
            fixture.drain(),
            vec![TrackerEvent::StatusChanged(
                StatusChange::PrivateBrowsingDetected
            )]
        );

        fixture.tick_after(1).await;
        assert!(fixture.drain().is_empty());

        fixture.tick_after(1).await;
        assert_eq!(fixture.handle.status(), TrackerStatus::Running);
        assert_eq!(
            fixture.drain(),
            vec![TrackerEvent::StatusChanged(StatusChange::PrivateBrowsingEnded)]
        );
        assert_eq!(fixture.total(), 1.);

        fixture.tick_after(1).await;
        assert_eq!(fixture.handle.get_today(), times(&[("x.exe", 2.)]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_window_keeps_previous_process() {
        let samples = vec![
            window(1, "x"),
            None,
            Some(ForegroundWindow {
                window_id: 5,
                process_id: None,
                title: "tooltip".into(),
            }),
            window(1, "x"),
        ];
        let mut fixture = Fixture::new(samples).await;

        fixture.tick_after(0).await;
        fixture.tick_after(1).await;
        fixture.tick_after(1).await;
        assert!(fixture.handle.get_today().is_empty());

        fixture.tick_after(1).await;
        assert_eq!(fixture.handle.get_today(), times(&[("x.exe", 3.)]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_day_rollover_saves_previous_day() {
        let mut fixture =
            Fixture::new(vec![window(1, "x"), window(1, "x"), window(1, "x")]).await;

        fixture.tick_after(0).await;
        fixture.tick_after(5).await;
        fixture.drain();

        let next_day = TEST_DATE.succ_opt().unwrap();
        fixture.clock.set_date(next_day);
        fixture.tick_after(2).await;

        let stored = fixture.store.snapshot();
        assert_eq!(stored["2018-07-04"], times(&[("x.exe", 5.)]));
        assert_eq!(fixture.handle.get_today(), times(&[("x.exe", 2.)]));
        assert_eq!(
            fixture.drain()[0],
            TrackerEvent::TimeUpdated(AppTimeMap::new())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_rollover_save_keeps_previous_day() {
        let mut fixture = Fixture::new(vec![
            window(1, "x"),
            window(1, "x"),
            window(1, "x"),
            window(1, "x"),
        ])
        .await;

        fixture.tick_after(0).await;
        fixture.tick_after(20).await;

        fixture.clock.set_date(TEST_DATE.succ_opt().unwrap());
        fixture.store.set_fail_saves(true);
        fixture.tick_after(2).await;

        assert!(fixture.store.snapshot().is_empty());
        assert_eq!(fixture.handle.get_today(), times(&[("x.exe", 22.)]));
        assert_eq!(
            fixture.handle.get_date("2018-07-04").await,
            times(&[("x.exe", 22.)])
        );

        fixture.store.set_fail_saves(false);
        fixture.tick_after(1).await;

        assert_eq!(
            fixture.store.snapshot()["2018-07-04"],
            times(&[("x.exe", 22.)])
        );
        assert_eq!(fixture.handle.get_today(), times(&[("x.exe", 1.)]));
        assert_eq!(
            fixture.handle.get_all_dates().await,
            vec!["2018-07-05", "2018-07-04"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_while_paused_credits_nothing() {
        let mut fixture = Fixture::new(vec![window(1, "x"), window(1, "x")]).await;

        fixture.tick_after(0).await;
        fixture.tick_after(1).await;
        assert!(fixture.handle.pause());
        tokio::time::advance(Duration::from_secs(5)).await;
        fixture.handle.stop();
        fixture.engine.finalize().await.unwrap();

        assert_eq!(
            fixture.store.snapshot()["2018-07-04"],
            times(&[("x.exe", 1.)])
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_while_private_credits_nothing() {
        let mut fixture = Fixture::new(vec![
            window(1, "x"),
            window(1, "x"),
            window(2, "Secret - InPrivate"),
        ])
        .await;

        fixture.tick_after(0).await;
        fixture.tick_after(1).await;
        fixture.tick_after(1).await;
        assert_eq!(fixture.handle.status(), TrackerStatus::PrivacyPaused);
        tokio::time::advance(Duration::from_secs(5)).await;
        fixture.handle.stop();
        fixture.engine.finalize().await.unwrap();

        assert_eq!(
            fixture.store.snapshot()["2018-07-04"],
            times(&[("x.exe", 1.)])
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_while_running_credits_pending_time() {
        let mut fixture = Fixture::new(vec![window(1, "x")]).await;

        fixture.tick_after(0).await;
        tokio::time::advance(Duration::from_secs(3)).await;
        fixture.handle.stop();
        fixture.engine.finalize().await.unwrap();

        assert_eq!(
            fixture.store.snapshot()["2018-07-04"],
            times(&[("x.exe", 3.)])
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_panicking_resolver_does_not_break_tick() {
        struct PanickingResolver;

        impl ProcessResolver for PanickingResolver {
            fn resolve_process_name(&mut self, _pid: u32) -> String {
                panic!("resolver exploded")
            }
        }

        let mut fixture = Fixture::with_parts(
            Box::new(inspector(vec![window(1, "x"), window(1, "x")])),
            Box::new(PanickingResolver),
            DailyLog::new(),
        )
        .await;

        fixture.tick_after(0).await;
        fixture.tick_after(1).await;

        assert_eq!(
            fixture.handle.get_today(),
            times(&[("Error: failed to resolve process 1", 1.)])
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_save_keeps_tracking() {
        *TEST_LOGGING;
        let store = MemoryStore::new(TEST_DATE, DailyLog::new());
        store.set_fail_saves(true);
        let (mut engine, _events) = TrackingEngine::new(
            Box::new(inspector(vec![window(1, "x"), window(1, "x")])),
            Box::new(resolver()),
            Arc::new(store),
            Arc::new(TestClock::new(TEST_DATE)),
            EngineSettings::default(),
        )
        .await;
        let handle = engine.handle();

        engine.tick(Instant::now()).await.unwrap();
        engine.autosave().await;
        tokio::time::advance(Duration::from_secs(1)).await;
        engine.tick(Instant::now()).await.unwrap();

        assert_eq!(handle.get_today(), times(&[("x.exe", 1.)]));
        assert!(engine.finalize().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_engine_ignores_ticks_and_controls() {
        let mut fixture = Fixture::new(vec![window(1, "x"), window(1, "x")]).await;

        fixture.tick_after(0).await;
        fixture.handle.stop();
        fixture.handle.stop();
        fixture.tick_after(1).await;

        assert!(!fixture.handle.pause());
        assert_eq!(fixture.handle.toggle_pause(), TrackerStatus::Stopped);
        assert!(fixture.handle.get_today().is_empty());
        let stops = fixture
            .drain()
            .into_iter()
            .filter(|v| *v == TrackerEvent::StatusChanged(StatusChange::Stopped))
            .count();
        assert_eq!(stops, 1);
    }
}
