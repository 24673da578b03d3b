//! Display engine: one object owning every piece of mutable display state.
//!
//! A tick runs, in order: poll (when due) and reconcile, layout, compose,
//! scroll advance. The caller flushes [`Engine::surface`] to the panel and
//! sleeps before the next tick.

use std::time::{Duration, Instant};
use subcount_hw::Surface;
use tracing::{info, warn};

use crate::config::{Config, ScrollMode};
use crate::rendering::{compose, digit_len, layout, Scroller};
use crate::stats::{
    MetricSnapshot, MetricSource, PersistedState, Persistence, Reconciliation, SnapshotStore,
};

/// What happened during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// A fetch was attempted.
    pub polled: bool,
    /// The fetch failed; nothing was reconciled.
    pub fetch_failed: bool,
    /// Result of reconciling a successful fetch.
    pub reconciliation: Option<Reconciliation>,
    /// The scroll offset wrapped back to its start value.
    pub wrapped: bool,
}

impl TickReport {
    /// Returns true if the indicator should pulse.
    pub fn should_flash(&self) -> bool {
        self.reconciliation.is_some_and(|r| r.should_flash)
    }
}

/// Display-and-update engine.
pub struct Engine {
    /// Credentials written back alongside every persisted snapshot
    api_key: String,
    channel_id: String,

    store: SnapshotStore,
    scroller: Scroller,
    scroll_mode: ScrollMode,
    surface: Surface,

    poll_interval: Duration,
    last_poll: Instant,
}

impl Engine {
    /// Creates an engine showing the persisted snapshot.
    ///
    /// The poll interval is counted from `start`, so the first fetch happens
    /// one full interval after startup.
    pub fn new(config: &Config, persisted: PersistedState, start: Instant) -> Self {
        let scroll = &config.scroll;
        Self {
            api_key: persisted.api_key,
            channel_id: persisted.channel_id,
            store: SnapshotStore::new(persisted.snapshot),
            scroller: Scroller::new(scroll.reset_x, scroll.step, scroll.cell_width),
            scroll_mode: scroll.mode,
            surface: Surface::for_modules(config.panel.modules),
            poll_interval: Duration::from_millis(config.poll),
            last_poll: start,
        }
    }

    /// Returns the composed surface from the last tick.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Returns the snapshot on the panel.
    pub fn displayed(&self) -> MetricSnapshot {
        self.store.displayed()
    }

    /// Returns the current scroll offset.
    pub fn scroll_x(&self) -> i32 {
        self.scroller.x()
    }

    /// Returns true if provisioning has supplied an API key.
    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Returns the state as it would be persisted now.
    pub fn persisted_state(&self) -> PersistedState {
        PersistedState {
            api_key: self.api_key.clone(),
            channel_id: self.channel_id.clone(),
            snapshot: self.store.displayed(),
        }
    }

    /// Returns true if a fetch should be attempted at `now`.
    ///
    /// A fetch is due once strictly more than the poll interval has passed
    /// since the last attempt (or since startup).
    pub fn poll_due(&self, now: Instant) -> bool {
        if !self.has_credentials() {
            return false;
        }
        now.saturating_duration_since(self.last_poll) > self.poll_interval
    }

    /// Runs one tick at time `now`.
    pub fn tick<S, P>(&mut self, now: Instant, source: &mut S, persistence: &mut P) -> TickReport
    where
        S: MetricSource,
        P: Persistence,
    {
        let mut report = TickReport::default();

        if self.poll_due(now) {
            report.polled = true;
            self.last_poll = now;

            match source.fetch(&self.channel_id) {
                Ok(fetched) => {
                    info!("Fetched stats from {}: {}", source.name(), fetched);
                    let reconciliation = self.store.reconcile(fetched);
                    if reconciliation.should_persist {
                        info!("Displayed stats updated, saving state");
                        if let Err(e) = persistence.persist(&self.persisted_state()) {
                            warn!("Failed to save state: {}", e);
                        }
                    }
                    report.reconciliation = Some(reconciliation);
                }
                Err(e) => {
                    warn!("Failed to fetch stats from {}: {}", source.name(), e);
                    report.fetch_failed = true;
                }
            }
        }

        let value = self.store.displayed().subscribers;
        let origin_x = match self.scroll_mode {
            ScrollMode::Fixed => 0,
            ScrollMode::Marquee => self.scroller.x(),
        };
        compose(&mut self.surface, &layout(value), origin_x);
        report.wrapped = self.scroller.advance(digit_len(value));

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{FetchError, PersistError};
    use std::collections::VecDeque;

    /// Source that replays canned results, then fails.
    struct ScriptedSource {
        results: VecDeque<Result<MetricSnapshot, FetchError>>,
        calls: Vec<String>,
    }

    impl ScriptedSource {
        fn new(results: Vec<Result<MetricSnapshot, FetchError>>) -> Self {
            Self {
                results: results.into(),
                calls: Vec::new(),
            }
        }
    }

    impl MetricSource for ScriptedSource {
        fn name(&self) -> &str {
            "scripted"
        }

        fn fetch(&mut self, channel_id: &str) -> Result<MetricSnapshot, FetchError> {
            self.calls.push(channel_id.to_string());
            self.results.pop_front().unwrap_or_else(|| {
                Err(FetchError::Io(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    "script exhausted",
                )))
            })
        }
    }

    #[derive(Default)]
    struct RecordingPersistence {
        saved: Vec<PersistedState>,
        fail: bool,
    }

    impl Persistence for RecordingPersistence {
        fn persist(&mut self, state: &PersistedState) -> Result<(), PersistError> {
            self.saved.push(state.clone());
            if self.fail {
                return Err(PersistError::Io(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only",
                )));
            }
            Ok(())
        }
    }

    fn timeout() -> FetchError {
        FetchError::Io(std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out"))
    }

    fn persisted(snapshot: MetricSnapshot) -> PersistedState {
        PersistedState {
            api_key: "key".to_string(),
            channel_id: "UC123".to_string(),
            snapshot,
        }
    }

    const START: MetricSnapshot = MetricSnapshot::new(1_000, 5_000, 10, 2);

    /// First instant at which a default-config engine polls.
    const FIRST_POLL: Duration = Duration::from_millis(60_001);

    fn engine_at(start: Instant, snapshot: MetricSnapshot) -> Engine {
        Engine::new(&Config::default(), persisted(snapshot), start)
    }

    #[test]
    fn test_end_to_end_increase() {
        let start = Instant::now();
        let mut engine = engine_at(start, START);
        let fetched = MetricSnapshot::new(1_001, 5_000, 10, 2);
        let mut source = ScriptedSource::new(vec![Ok(fetched)]);
        let mut persistence = RecordingPersistence::default();

        let report = engine.tick(start + FIRST_POLL, &mut source, &mut persistence);

        let reconciliation = report.reconciliation.unwrap();
        assert!(reconciliation.updated);
        assert!(reconciliation.should_flash);
        assert!(report.should_flash());
        assert_eq!(engine.displayed(), fetched);
        assert_eq!(persistence.saved, vec![persisted(fetched)]);
        assert_eq!(source.calls, vec!["UC123".to_string()]);
    }

    #[test]
    fn test_first_poll_waits_one_interval() {
        let start = Instant::now();
        let mut engine = engine_at(start, START);
        let mut source = ScriptedSource::new(vec![Ok(START)]);
        let mut persistence = RecordingPersistence::default();

        assert!(!engine.tick(start, &mut source, &mut persistence).polled);
        let at_interval = start + Duration::from_millis(60_000);
        assert!(!engine.tick(at_interval, &mut source, &mut persistence).polled);
        assert!(source.calls.is_empty());
        // The persisted value is on the panel before any fetch
        assert!(engine.surface().lit_count() > 0);

        assert!(engine.tick(start + FIRST_POLL, &mut source, &mut persistence).polled);
        assert_eq!(source.calls.len(), 1);
    }

    #[test]
    fn test_fetch_failure_leaves_display_unchanged() {
        let start = Instant::now();
        let mut engine = engine_at(start, START);
        let mut source = ScriptedSource::new(vec![Err(timeout())]);
        let mut persistence = RecordingPersistence::default();

        engine.tick(start, &mut source, &mut persistence);
        let before = engine.surface().clone();

        let report = engine.tick(start + FIRST_POLL, &mut source, &mut persistence);

        assert!(report.polled);
        assert!(report.fetch_failed);
        assert!(report.reconciliation.is_none());
        assert_eq!(engine.displayed(), START);
        assert_eq!(engine.surface(), &before);
        assert!(persistence.saved.is_empty());
        assert_eq!(source.calls.len(), 1);
    }

    #[test]
    fn test_poll_cadence() {
        let start = Instant::now();
        let mut engine = engine_at(start, START);
        let mut source = ScriptedSource::new(vec![Ok(START), Ok(START), Ok(START)]);
        let mut persistence = RecordingPersistence::default();
        let at = |ms| start + Duration::from_millis(ms);

        assert!(engine.tick(at(60_001), &mut source, &mut persistence).polled);
        assert!(!engine.tick(at(60_101), &mut source, &mut persistence).polled);
        // Exactly one interval after the last attempt is not yet due
        assert!(!engine.tick(at(120_001), &mut source, &mut persistence).polled);
        assert!(engine.tick(at(120_002), &mut source, &mut persistence).polled);
        assert_eq!(source.calls.len(), 2);
        assert!(persistence.saved.is_empty());
    }

    #[test]
    fn test_failed_fetch_resets_poll_timer() {
        let start = Instant::now();
        let mut engine = engine_at(start, START);
        let mut source = ScriptedSource::new(vec![Err(timeout())]);
        let mut persistence = RecordingPersistence::default();
        let failed_at = start + FIRST_POLL;

        assert!(engine.tick(failed_at, &mut source, &mut persistence).fetch_failed);
        assert!(!engine.poll_due(failed_at + Duration::from_millis(1_000)));
        assert!(engine.poll_due(failed_at + FIRST_POLL));
    }

    #[test]
    fn test_no_credentials_skips_polling() {
        let start = Instant::now();
        let mut engine = Engine::new(&Config::default(), PersistedState::default(), start);
        let mut source = ScriptedSource::new(vec![Ok(START)]);
        let mut persistence = RecordingPersistence::default();

        let report = engine.tick(start + FIRST_POLL, &mut source, &mut persistence);
        assert!(!report.polled);
        assert!(source.calls.is_empty());
        assert_eq!(engine.displayed(), MetricSnapshot::default());
        // Zero still renders its units digit
        assert!(engine.surface().lit_count() > 0);
    }

    #[test]
    fn test_persist_failure_still_updates() {
        let start = Instant::now();
        let mut engine = engine_at(start, START);
        let fetched = MetricSnapshot::new(900, 5_000, 10, 2);
        let mut source = ScriptedSource::new(vec![Ok(fetched)]);
        let mut persistence = RecordingPersistence {
            fail: true,
            ..Default::default()
        };

        let report = engine.tick(start + FIRST_POLL, &mut source, &mut persistence);
        assert!(!report.should_flash());
        assert_eq!(engine.displayed(), fetched);
        assert_eq!(persistence.saved.len(), 1);
    }

    #[test]
    fn test_scroll_wraps_on_value_length() {
        let now = Instant::now();
        let mut engine = engine_at(now, MetricSnapshot::new(123, 0, 0, 0));
        let mut source = ScriptedSource::new(vec![]);
        let mut persistence = RecordingPersistence::default();

        for _ in 0..24 {
            assert!(!engine.tick(now, &mut source, &mut persistence).wrapped);
        }
        assert_eq!(engine.scroll_x(), -24);
        assert!(engine.tick(now, &mut source, &mut persistence).wrapped);
        assert_eq!(engine.scroll_x(), 31);
    }

    #[test]
    fn test_marquee_moves_counter() {
        let now = Instant::now();
        let mut config = Config::default();
        config.scroll.mode = ScrollMode::Marquee;
        let mut engine = Engine::new(&config, persisted(MetricSnapshot::new(7, 0, 0, 0)), now);
        let mut source = ScriptedSource::new(vec![]);
        let mut persistence = RecordingPersistence::default();

        engine.tick(now, &mut source, &mut persistence);
        let first = engine.surface().clone();
        engine.tick(now, &mut source, &mut persistence);
        assert_ne!(engine.surface(), &first);
    }

    #[test]
    fn test_fixed_mode_frames_are_stable() {
        let now = Instant::now();
        let mut engine = engine_at(now, START);
        let mut source = ScriptedSource::new(vec![]);
        let mut persistence = RecordingPersistence::default();

        engine.tick(now, &mut source, &mut persistence);
        let first = engine.surface().clone();
        for _ in 0..50 {
            engine.tick(now, &mut source, &mut persistence);
            assert_eq!(engine.surface(), &first);
        }
    }
}
