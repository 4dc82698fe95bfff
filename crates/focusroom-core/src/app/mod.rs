//! Application composition root.
//!
//! [`FocusApp`] owns the subject registry, the session log and the timer
//! engine, and is the only code that mutates them. It also owns the tick
//! driver, the celebration banner and the persister, and keeps the three
//! in step with the engine: the driver is armed exactly while the engine
//! runs, and every mutating operation queues a save of what it changed.

mod celebration;
mod load;
mod persist;

pub use celebration::Celebration;
pub use persist::Persister;

use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::error::Result;
use crate::events::Event;
use crate::session::SessionLog;
use crate::stats::StatsAggregator;
use crate::storage::{keys, Config, KvStore};
use crate::subject::{Subject, SubjectId, SubjectRegistry};
use crate::timer::{
    CustomDuration, DurationRef, Phase, SchedulingMode, Signal, TaskHandle, TimerEngine,
    TimerSnapshot, TICK_PERIOD,
};

/// Startup options taken from [`Config`].
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub default_mode: SchedulingMode,
    pub celebration: Duration,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for AppOptions {
    fn from(config: &Config) -> Self {
        Self {
            default_mode: config.timer.default_mode,
            celebration: Duration::from_secs(config.timer.celebration_secs),
        }
    }
}

pub struct FocusApp {
    subjects: SubjectRegistry,
    sessions: SessionLog,
    engine: TimerEngine,
    ticker: TaskHandle,
    celebration: Celebration,
    persister: Persister,
    signal_tx: UnboundedSender<Signal>,
    signal_rx: UnboundedReceiver<Signal>,
    /// Events produced alongside another one, handed out by `next_event`.
    pending: VecDeque<Event>,
}

impl FocusApp {
    /// Load state from `store`, then hand the store to the background
    /// writer. Starting the timer spawns tokio tasks, so the app must be
    /// driven from within a runtime.
    pub fn open<S: KvStore>(store: S, options: AppOptions) -> Self {
        let loaded = load::load_all(&store, options.default_mode);
        let (signal_tx, signal_rx) = mpsc::unbounded_channel();
        tracing::debug!(
            subjects = loaded.subjects.len(),
            sessions = loaded.sessions.len(),
            mode = loaded.engine.mode().as_str(),
            "state loaded"
        );
        Self {
            subjects: loaded.subjects,
            sessions: loaded.sessions,
            engine: loaded.engine,
            ticker: TaskHandle::new(),
            celebration: Celebration::new(options.celebration),
            persister: Persister::spawn(store),
            signal_tx,
            signal_rx,
            pending: VecDeque::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn subjects(&self) -> &SubjectRegistry {
        &self.subjects
    }

    pub fn sessions(&self) -> &SessionLog {
        &self.sessions
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.engine.snapshot()
    }

    pub fn stats(&self) -> StatsAggregator<'_> {
        StatsAggregator::new(&self.subjects, &self.sessions)
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebration.is_visible()
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_armed()
    }

    // ── Subjects ─────────────────────────────────────────────────────

    pub fn add_subject(&mut self, name: &str, color: &str) -> Result<SubjectId> {
        let id = self.subjects.add(name, color)?;
        self.persist_subjects();
        Ok(id)
    }

    pub fn edit_subject(&mut self, id: SubjectId, name: &str, color: &str) -> Result<()> {
        self.subjects.edit(id, name, color)?;
        self.persist_subjects();
        Ok(())
    }

    pub fn remove_subject(&mut self, id: SubjectId) -> Result<Subject> {
        let removed = self.subjects.remove(id)?;
        self.persist_subjects();
        Ok(removed)
    }

    pub fn select_subject(&mut self, id: SubjectId) -> Result<()> {
        self.subjects.select(id)?;
        self.persist_subjects();
        Ok(())
    }

    // ── Timer ────────────────────────────────────────────────────────

    pub fn toggle_running(&mut self) -> Option<Event> {
        let event = self.engine.toggle_running()?;
        self.sync_ticker();
        self.persist_timer();
        Some(event)
    }

    pub fn reset(&mut self) -> Event {
        let event = self.engine.reset();
        self.sync_ticker();
        self.persist_timer();
        event
    }

    pub fn reset_cycle(&mut self) -> Option<Event> {
        let event = self.engine.reset_cycle()?;
        self.sync_ticker();
        self.persist_timer();
        Some(event)
    }

    pub fn select_duration(&mut self, reference: DurationRef) -> Result<Event> {
        let event = self.engine.select_duration(reference)?;
        self.persist_timer();
        Ok(event)
    }

    pub fn add_custom_duration(&mut self, label: &str, minutes: i64) -> Result<u32> {
        let id = self.engine.add_custom_duration(label, minutes)?;
        self.persist_timer();
        Ok(id)
    }

    pub fn remove_custom_duration(&mut self, id: u32) -> Result<CustomDuration> {
        let removed = self.engine.remove_custom_duration(id)?;
        self.persist_timer();
        Ok(removed)
    }

    pub fn toggle_scheduling_mode(&mut self) -> Event {
        let event = self.engine.toggle_scheduling_mode();
        self.sync_ticker();
        self.persist_timer();
        event
    }

    pub fn set_scheduling_mode(&mut self, mode: SchedulingMode) -> Option<Event> {
        let event = self.engine.set_scheduling_mode(mode)?;
        self.sync_ticker();
        self.persist_timer();
        Some(event)
    }

    // ── Driving ──────────────────────────────────────────────────────

    /// Wait for the next scheduled signal (tick or celebration timeout).
    pub async fn next_signal(&mut self) -> Option<Signal> {
        self.signal_rx.recv().await
    }

    /// Apply a signal. Stale signals from a cancelled task are ignored.
    ///
    /// A focus completion also queues `CelebrationStarted`, which the next
    /// call to [`next_event`](Self::next_event) returns.
    pub fn handle(&mut self, signal: Signal) -> Option<Event> {
        match signal {
            Signal::Tick { generation } => {
                if !self.ticker.is_current(generation) {
                    return None;
                }
                let event = self.engine.tick(&mut self.subjects, &mut self.sessions);
                if !self.engine.is_running() {
                    self.ticker.cancel();
                }
                if let Some(Event::IntervalCompleted { finished, .. }) = &event {
                    if *finished == Phase::Focus {
                        self.celebration.show(self.signal_tx.clone());
                        self.pending.push_back(Event::CelebrationStarted {
                            at: chrono::Utc::now(),
                        });
                    }
                    self.persist_subjects();
                    self.persist_sessions();
                    self.persist_timer();
                }
                event
            }
            Signal::CelebrationElapsed { generation } => self
                .celebration
                .on_elapsed(generation)
                .then(|| Event::CelebrationCleared {
                    at: chrono::Utc::now(),
                }),
        }
    }

    /// Return a queued event, or wait for and apply signals until one
    /// produces an event.
    pub async fn next_event(&mut self) -> Option<Event> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }
        loop {
            let signal = self.next_signal().await?;
            if let Some(event) = self.handle(signal) {
                return Some(event);
            }
        }
    }

    /// Stop all scheduled tasks and wait for pending saves.
    pub async fn shutdown(mut self) {
        self.ticker.cancel();
        self.celebration.cancel();
        self.persister.flush().await;
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Arm the driver while the engine runs, cancel it otherwise.
    fn sync_ticker(&mut self) {
        match (self.engine.is_running(), self.ticker.is_armed()) {
            (true, false) => {
                self.ticker
                    .arm_every(TICK_PERIOD, self.signal_tx.clone(), |generation| {
                        Signal::Tick { generation }
                    });
            }
            (false, true) => self.ticker.cancel(),
            _ => {}
        }
    }

    fn persist_subjects(&self) {
        self.persister.save_json(keys::SUBJECTS, self.subjects.list());
        self.persister
            .save(keys::NEXT_SUBJECT_ID, self.subjects.next_id().to_string());
    }

    fn persist_sessions(&self) {
        self.persister
            .save_json(keys::SESSION_HISTORY, self.sessions.as_slice());
    }

    fn persist_timer(&self) {
        let engine = &self.engine;
        self.persister
            .save(keys::SCHEDULING_MODE, engine.mode().as_str().to_string());
        self.persister
            .save_json(keys::CUSTOM_DURATIONS, engine.catalog().customs());
        self.persister
            .save(keys::COMPLETED_SESSIONS, engine.completed_sessions().to_string());
        self.persister
            .save(keys::TOTAL_POMODOROS, engine.total_pomodoros().to_string());
        self.persister.save_json(keys::TIMER_STATE, &engine.state());
    }
}

impl Drop for FocusApp {
    fn drop(&mut self) {
        self.ticker.cancel();
    }
}
