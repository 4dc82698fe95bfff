//! Timer engine implementation.
//!
//! The engine is a plain state machine with no internal threads or clocks:
//! the owner calls `tick()` once per elapsed second while it is running
//! (see [`super::driver`]).
//!
//! ## State Transitions
//!
//! ```text
//! pomodoro:  Focus -> Break -> Focus -> ... -> Focus (4th) -> LongBreak -> Focus
//! flexible:  Focus -> Break -> Focus
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new();
//! engine.toggle_running();
//! // Once per second:
//! if let Some(event) = engine.tick(&mut subjects, &mut log) { /* interval done */ }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::{CatalogEntry, CustomDuration, DurationCatalog, DurationRef};
use super::schedule::{self, Phase, SchedulingMode, CYCLE_LENGTH};
use crate::error::{CoreError, Result};
use crate::events::Event;
use crate::session::{SessionDraft, SessionLog};
use crate::subject::SubjectActions;

/// The persisted part of the engine that is not covered by its own key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub phase: Phase,
    pub remaining_secs: u64,
    #[serde(default)]
    pub cycle_index: u32,
    pub selected_minutes: u64,
    pub active: DurationRef,
}

/// Read-only view for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerSnapshot {
    pub mode: SchedulingMode,
    pub phase: Phase,
    pub banner: &'static str,
    pub running: bool,
    pub remaining_secs: u64,
    pub total_secs: u64,
    /// `remaining_secs` as `MM:SS`.
    pub display: String,
    pub progress: f64,
    pub selected_minutes: u64,
    pub cycle_index: u32,
    pub total_pomodoros: u64,
    pub completed_sessions: u64,
    pub active_duration: DurationRef,
}

/// Core timer engine.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    mode: SchedulingMode,
    phase: Phase,
    running: bool,
    remaining_secs: u64,
    /// Focus length in flexible mode; remembered while in pomodoro mode.
    selected_minutes: u64,
    cycle_index: u32,
    total_pomodoros: u64,
    /// Focus completions in either mode.
    completed_sessions: u64,
    catalog: DurationCatalog,
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerEngine {
    /// A stopped pomodoro engine at the start of a 25-minute focus.
    pub fn new() -> Self {
        let catalog = DurationCatalog::default();
        let selected_minutes = catalog.active_minutes();
        Self {
            mode: SchedulingMode::Pomodoro,
            phase: Phase::Focus,
            running: false,
            remaining_secs: schedule::FOCUS_MINUTES * 60,
            selected_minutes,
            cycle_index: 0,
            total_pomodoros: 0,
            completed_sessions: 0,
            catalog,
        }
    }

    // ── Restoring ────────────────────────────────────────────────────

    /// Switch to `mode` as if the engine had been created in it.
    pub fn with_mode(mut self, mode: SchedulingMode) -> Self {
        self.mode = mode;
        self.restart_focus();
        self
    }

    pub fn with_custom_durations(mut self, customs: Vec<CustomDuration>) -> Self {
        let active = self.catalog.active();
        self.catalog = DurationCatalog::with_customs(customs);
        self.catalog.restore_active(active);
        self.selected_minutes = self.catalog.active_minutes();
        self
    }

    pub fn with_counters(mut self, completed_sessions: u64, total_pomodoros: u64) -> Self {
        self.completed_sessions = completed_sessions;
        self.total_pomodoros = total_pomodoros;
        self
    }

    /// Resume a stored interval, stopped. Out-of-range values are clamped
    /// back into a valid state rather than rejected.
    pub fn with_state(mut self, state: TimerState) -> Self {
        self.catalog.restore_active(state.active);
        self.selected_minutes = self.catalog.active_minutes();
        self.cycle_index = state.cycle_index % CYCLE_LENGTH;
        self.phase = match (self.mode, state.phase) {
            (SchedulingMode::Flexible, Phase::LongBreak) => Phase::Break,
            (_, phase) => phase,
        };
        let full = self.phase_duration_secs();
        self.remaining_secs = if state.remaining_secs == 0 || state.remaining_secs > full {
            full
        } else {
            state.remaining_secs
        };
        self.running = false;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> SchedulingMode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn selected_minutes(&self) -> u64 {
        self.selected_minutes
    }

    pub fn cycle_index(&self) -> u32 {
        self.cycle_index
    }

    pub fn total_pomodoros(&self) -> u64 {
        self.total_pomodoros
    }

    pub fn completed_sessions(&self) -> u64 {
        self.completed_sessions
    }

    pub fn catalog(&self) -> &DurationCatalog {
        &self.catalog
    }

    pub fn catalog_entries(&self) -> Vec<CatalogEntry> {
        self.catalog.entries()
    }

    /// Length of `phase` in the current mode, in minutes.
    pub fn phase_duration_minutes(&self, phase: Phase) -> u64 {
        schedule::phase_duration_minutes(phase, self.mode, self.selected_minutes)
    }

    pub fn total_secs(&self) -> u64 {
        self.phase_duration_secs()
    }

    /// 0.0 .. 1.0 progress within the current interval.
    pub fn progress_fraction(&self) -> f64 {
        let total = self.phase_duration_secs();
        if total == 0 {
            return 0.0;
        }
        (1.0 - self.remaining_secs as f64 / total as f64).clamp(0.0, 1.0)
    }

    pub fn state(&self) -> TimerState {
        TimerState {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            cycle_index: self.cycle_index,
            selected_minutes: self.selected_minutes,
            active: self.catalog.active(),
        }
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            mode: self.mode,
            phase: self.phase,
            banner: self.phase.banner(),
            running: self.running,
            remaining_secs: self.remaining_secs,
            total_secs: self.phase_duration_secs(),
            display: schedule::format_time(self.remaining_secs),
            progress: self.progress_fraction(),
            selected_minutes: self.selected_minutes,
            cycle_index: self.cycle_index,
            total_pomodoros: self.total_pomodoros,
            completed_sessions: self.completed_sessions,
            active_duration: self.catalog.active(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start or pause. A running pomodoro interval cannot be paused; that
    /// toggle is ignored and returns `None`.
    pub fn toggle_running(&mut self) -> Option<Event> {
        if self.running {
            if self.mode == SchedulingMode::Pomodoro {
                tracing::debug!("pause rejected: pomodoro intervals run to completion");
                return None;
            }
            self.running = false;
            return Some(Event::TimerPaused {
                remaining_secs: self.remaining_secs,
                at: Utc::now(),
            });
        }

        if self.remaining_secs == 0 {
            self.remaining_secs = self.phase_duration_secs();
        }
        self.running = true;
        Some(Event::TimerStarted {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop and rewind the current focus interval. The pomodoro cycle
    /// position is kept.
    pub fn reset(&mut self) -> Event {
        self.restart_focus();
        Event::TimerReset {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        }
    }

    /// Restart the whole pomodoro cycle. Does nothing in flexible mode.
    pub fn reset_cycle(&mut self) -> Option<Event> {
        if self.mode != SchedulingMode::Pomodoro {
            return None;
        }
        self.cycle_index = 0;
        self.restart_focus();
        Some(Event::CycleReset { at: Utc::now() })
    }

    /// Pick the flexible focus length. Only allowed while stopped in
    /// flexible mode.
    pub fn select_duration(&mut self, reference: DurationRef) -> Result<Event> {
        if self.running {
            return Err(CoreError::invariant(
                "cannot change the duration while the timer is running",
            ));
        }
        if self.mode != SchedulingMode::Flexible {
            return Err(CoreError::invariant(
                "durations can only be selected in flexible mode",
            ));
        }
        let minutes = self.catalog.activate(reference)?;
        self.selected_minutes = minutes;
        self.restart_focus();
        Ok(Event::DurationSelected {
            reference,
            minutes,
            at: Utc::now(),
        })
    }

    pub fn add_custom_duration(&mut self, label: &str, minutes: i64) -> Result<u32> {
        let id = self.catalog.add_custom(label, minutes)?;
        tracing::debug!(id, minutes, "custom duration added");
        Ok(id)
    }

    /// Remove a custom duration. When it was the active one the 25-minute
    /// preset takes over; in flexible mode that also rewinds the timer.
    pub fn remove_custom_duration(&mut self, id: u32) -> Result<CustomDuration> {
        let reference = DurationRef::Custom(id);
        if self.catalog.is_active(reference)
            && self.running
            && self.mode == SchedulingMode::Flexible
        {
            return Err(CoreError::invariant(
                "cannot remove the duration of the running interval",
            ));
        }
        let (removed, was_active) = self.catalog.remove_custom(id)?;
        if was_active {
            self.selected_minutes = self.catalog.active_minutes();
            if self.mode == SchedulingMode::Flexible {
                self.restart_focus();
            }
        }
        Ok(removed)
    }

    pub fn toggle_scheduling_mode(&mut self) -> Event {
        self.switch_mode(self.mode.toggled())
    }

    /// Like [`toggle_scheduling_mode`](Self::toggle_scheduling_mode) but
    /// targeted; `None` when already in `mode`.
    pub fn set_scheduling_mode(&mut self, mode: SchedulingMode) -> Option<Event> {
        (mode != self.mode).then(|| self.switch_mode(mode))
    }

    /// Advance one second. Returns `Some(Event::IntervalCompleted)` when the
    /// interval reaches zero.
    pub fn tick<A: SubjectActions>(
        &mut self,
        subjects: &mut A,
        log: &mut SessionLog,
    ) -> Option<Event> {
        self.tick_at(subjects, log, Utc::now())
    }

    /// [`tick`](Self::tick) with an explicit completion timestamp.
    pub fn tick_at<A: SubjectActions>(
        &mut self,
        subjects: &mut A,
        log: &mut SessionLog,
        now: DateTime<Utc>,
    ) -> Option<Event> {
        if !self.running || self.remaining_secs == 0 {
            return None;
        }
        self.remaining_secs -= 1;
        if self.remaining_secs > 0 {
            return None;
        }
        Some(self.complete(subjects, log, now))
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn phase_duration_secs(&self) -> u64 {
        self.phase_duration_minutes(self.phase).saturating_mul(60)
    }

    fn restart_focus(&mut self) {
        self.running = false;
        self.phase = Phase::Focus;
        self.remaining_secs = self.phase_duration_secs();
    }

    fn switch_mode(&mut self, mode: SchedulingMode) -> Event {
        self.mode = mode;
        match mode {
            SchedulingMode::Pomodoro => self.cycle_index = 0,
            SchedulingMode::Flexible => self.selected_minutes = self.catalog.active_minutes(),
        }
        self.restart_focus();
        tracing::debug!(mode = mode.as_str(), "scheduling mode changed");
        Event::ModeChanged {
            mode,
            at: Utc::now(),
        }
    }

    fn complete<A: SubjectActions>(
        &mut self,
        subjects: &mut A,
        log: &mut SessionLog,
        now: DateTime<Utc>,
    ) -> Event {
        self.running = false;
        let finished = self.phase;
        let mut session = None;

        if finished == Phase::Focus {
            let minutes = self.phase_duration_minutes(Phase::Focus);
            self.completed_sessions += 1;
            if self.mode == SchedulingMode::Pomodoro {
                self.total_pomodoros += 1;
            }

            let draft = subjects
                .selected_subject()
                .map(|subject| SessionDraft::completed_focus(subject, minutes, now));
            match draft {
                Some(draft) => {
                    let recorded = log.append(draft).clone();
                    if let Err(e) = subjects.record_minutes(recorded.subject_id, recorded.duration)
                    {
                        tracing::warn!(error = %e, "failed to update subject minutes");
                    }
                    tracing::info!(
                        subject = %recorded.subject_name,
                        minutes = recorded.duration,
                        "focus session recorded"
                    );
                    session = Some(recorded);
                }
                None => tracing::warn!("no subject selected, focus interval not recorded"),
            }
        }

        let next = match (self.mode, finished) {
            (SchedulingMode::Pomodoro, Phase::Focus) => {
                self.cycle_index = (self.cycle_index + 1) % CYCLE_LENGTH;
                if self.cycle_index == 0 {
                    Phase::LongBreak
                } else {
                    Phase::Break
                }
            }
            (SchedulingMode::Flexible, Phase::Focus) => Phase::Break,
            (_, Phase::Break | Phase::LongBreak) => Phase::Focus,
        };
        self.phase = next;
        self.remaining_secs = self.phase_duration_secs();

        Event::IntervalCompleted {
            finished,
            next_phase: next,
            next_duration_secs: self.remaining_secs,
            session,
            at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subject::SubjectRegistry;

    fn run_to_completion(
        engine: &mut TimerEngine,
        subjects: &mut SubjectRegistry,
        log: &mut SessionLog,
    ) -> Event {
        if !engine.is_running() {
            engine.toggle_running();
        }
        loop {
            if let Some(event) = engine.tick(subjects, log) {
                return event;
            }
        }
    }

    #[test]
    fn new_engine_is_stopped_pomodoro_focus() {
        let engine = TimerEngine::new();
        assert_eq!(engine.mode(), SchedulingMode::Pomodoro);
        assert_eq!(engine.phase(), Phase::Focus);
        assert!(!engine.is_running());
        assert_eq!(engine.remaining_secs(), 1500);
        assert_eq!(engine.selected_minutes(), 25);
    }

    #[test]
    fn tick_only_decrements_while_running() {
        let mut engine = TimerEngine::new();
        let mut subjects = SubjectRegistry::with_defaults();
        let mut log = SessionLog::new();

        assert!(engine.tick(&mut subjects, &mut log).is_none());
        assert_eq!(engine.remaining_secs(), 1500);

        engine.toggle_running();
        engine.tick(&mut subjects, &mut log);
        assert_eq!(engine.remaining_secs(), 1499);
        assert_eq!(engine.phase(), Phase::Focus);
        assert_eq!(engine.cycle_index(), 0);
    }

    #[test]
    fn pomodoro_pause_is_rejected() {
        let mut engine = TimerEngine::new();
        assert!(engine.toggle_running().is_some());
        let before = engine.snapshot();
        assert!(engine.toggle_running().is_none());
        assert!(engine.toggle_running().is_none());
        assert_eq!(engine.snapshot(), before);
        assert!(engine.is_running());
    }

    #[test]
    fn flexible_toggle_pauses_and_resumes() {
        let mut engine = TimerEngine::new().with_mode(SchedulingMode::Flexible);
        assert!(matches!(engine.toggle_running(), Some(Event::TimerStarted { .. })));
        assert!(matches!(engine.toggle_running(), Some(Event::TimerPaused { .. })));
        assert!(!engine.is_running());
    }

    #[test]
    fn focus_completion_records_session_and_moves_to_break() {
        let mut engine = TimerEngine::new();
        let mut subjects = SubjectRegistry::with_defaults();
        let mut log = SessionLog::new();

        let event = run_to_completion(&mut engine, &mut subjects, &mut log);
        match event {
            Event::IntervalCompleted {
                finished,
                next_phase,
                next_duration_secs,
                session,
                ..
            } => {
                assert_eq!(finished, Phase::Focus);
                assert_eq!(next_phase, Phase::Break);
                assert_eq!(next_duration_secs, 300);
                let session = session.expect("session recorded");
                assert_eq!(session.duration, 25);
                assert_eq!(session.subject_id, 1);
            }
            other => panic!("Expected IntervalCompleted, got {other:?}"),
        }
        assert!(!engine.is_running());
        assert_eq!(engine.total_pomodoros(), 1);
        assert_eq!(engine.completed_sessions(), 1);
        assert_eq!(subjects.get(1).unwrap().total_minutes, 25);
    }

    #[test]
    fn break_completion_returns_to_focus_without_session() {
        let mut engine = TimerEngine::new();
        let mut subjects = SubjectRegistry::with_defaults();
        let mut log = SessionLog::new();
        run_to_completion(&mut engine, &mut subjects, &mut log);

        let event = run_to_completion(&mut engine, &mut subjects, &mut log);
        assert!(matches!(
            event,
            Event::IntervalCompleted { finished: Phase::Break, next_phase: Phase::Focus, session: None, .. }
        ));
        assert_eq!(engine.remaining_secs(), 1500);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn completion_without_subject_still_advances() {
        let mut engine = TimerEngine::new();
        let mut subjects = SubjectRegistry::new();
        let mut log = SessionLog::new();
        let event = run_to_completion(&mut engine, &mut subjects, &mut log);
        assert!(matches!(event, Event::IntervalCompleted { session: None, .. }));
        assert_eq!(engine.phase(), Phase::Break);
        assert!(log.is_empty());
    }

    #[test]
    fn flexible_mode_does_not_count_pomodoros() {
        let mut engine = TimerEngine::new().with_mode(SchedulingMode::Flexible);
        let mut subjects = SubjectRegistry::with_defaults();
        let mut log = SessionLog::new();
        run_to_completion(&mut engine, &mut subjects, &mut log);
        assert_eq!(engine.total_pomodoros(), 0);
        assert_eq!(engine.completed_sessions(), 1);
        assert_eq!(engine.cycle_index(), 0);
    }

    #[test]
    fn flexible_break_returns_to_selected_focus() {
        let mut engine = TimerEngine::new().with_mode(SchedulingMode::Flexible);
        engine.select_duration(DurationRef::Preset(5)).unwrap();
        let mut subjects = SubjectRegistry::with_defaults();
        let mut log = SessionLog::new();

        run_to_completion(&mut engine, &mut subjects, &mut log);
        assert_eq!(engine.phase(), Phase::Break);
        assert_eq!(engine.remaining_secs(), 12 * 60);

        run_to_completion(&mut engine, &mut subjects, &mut log);
        assert_eq!(engine.phase(), Phase::Focus);
        assert_eq!(engine.remaining_secs(), 60 * 60);
    }

    #[test]
    fn reset_keeps_cycle_but_reset_cycle_clears_it() {
        let mut engine = TimerEngine::new();
        let mut subjects = SubjectRegistry::with_defaults();
        let mut log = SessionLog::new();
        run_to_completion(&mut engine, &mut subjects, &mut log);
        assert_eq!(engine.cycle_index(), 1);

        engine.reset();
        assert_eq!(engine.phase(), Phase::Focus);
        assert_eq!(engine.remaining_secs(), 1500);
        assert_eq!(engine.cycle_index(), 1);

        assert!(engine.reset_cycle().is_some());
        assert_eq!(engine.cycle_index(), 0);
        assert_eq!(engine.remaining_secs(), 1500);
    }

    #[test]
    fn reset_stops_a_running_pomodoro() {
        let mut engine = TimerEngine::new();
        engine.toggle_running();
        engine.reset();
        assert!(!engine.is_running());
    }

    #[test]
    fn reset_cycle_is_noop_in_flexible_mode() {
        let mut engine = TimerEngine::new().with_mode(SchedulingMode::Flexible);
        assert!(engine.reset_cycle().is_none());
    }

    #[test]
    fn flexible_reset_restores_selected_duration() {
        let mut engine = TimerEngine::new().with_mode(SchedulingMode::Flexible);
        engine.select_duration(DurationRef::Preset(3)).unwrap();
        let mut subjects = SubjectRegistry::with_defaults();
        let mut log = SessionLog::new();
        run_to_completion(&mut engine, &mut subjects, &mut log);
        assert_eq!(engine.phase(), Phase::Break);

        engine.reset();
        assert_eq!(engine.phase(), Phase::Focus);
        assert_eq!(engine.remaining_secs(), 30 * 60);
    }

    #[test]
    fn select_duration_requires_stopped_flexible_engine() {
        let mut engine = TimerEngine::new();
        assert!(matches!(
            engine.select_duration(DurationRef::Preset(1)),
            Err(CoreError::InvariantViolation(_))
        ));

        engine.toggle_scheduling_mode();
        engine.toggle_running();
        assert!(engine.select_duration(DurationRef::Preset(1)).is_err());
        assert_eq!(engine.selected_minutes(), 25);
    }

    #[test]
    fn select_unknown_duration_is_not_found() {
        let mut engine = TimerEngine::new().with_mode(SchedulingMode::Flexible);
        assert!(matches!(
            engine.select_duration(DurationRef::Custom(4)),
            Err(CoreError::NotFound { .. })
        ));
    }

    #[test]
    fn removing_active_custom_duration_falls_back_to_25() {
        let mut engine = TimerEngine::new().with_mode(SchedulingMode::Flexible);
        let id = engine.add_custom_duration("Deep work", 90).unwrap();
        engine.select_duration(DurationRef::Custom(id)).unwrap();
        assert_eq!(engine.remaining_secs(), 90 * 60);

        engine.remove_custom_duration(id).unwrap();
        assert_eq!(engine.catalog().active(), DurationRef::Preset(2));
        assert_eq!(engine.selected_minutes(), 25);
        assert_eq!(engine.remaining_secs(), 1500);
    }

    #[test]
    fn removing_running_interval_duration_is_rejected() {
        let mut engine = TimerEngine::new().with_mode(SchedulingMode::Flexible);
        let id = engine.add_custom_duration("", 40).unwrap();
        engine.select_duration(DurationRef::Custom(id)).unwrap();
        engine.toggle_running();
        assert!(matches!(
            engine.remove_custom_duration(id),
            Err(CoreError::InvariantViolation(_))
        ));
        assert_eq!(engine.catalog().customs().len(), 1);
    }

    #[test]
    fn mode_toggle_round_trip_restores_selection() {
        let mut engine = TimerEngine::new().with_mode(SchedulingMode::Flexible);
        engine.select_duration(DurationRef::Preset(4)).unwrap();

        engine.toggle_scheduling_mode();
        assert_eq!(engine.mode(), SchedulingMode::Pomodoro);
        assert_eq!(engine.remaining_secs(), 1500);
        assert_eq!(engine.cycle_index(), 0);

        engine.toggle_scheduling_mode();
        assert_eq!(engine.mode(), SchedulingMode::Flexible);
        assert_eq!(engine.selected_minutes(), 45);
        assert_eq!(engine.remaining_secs(), 45 * 60);
        assert_eq!(engine.phase(), Phase::Focus);
    }

    #[test]
    fn mode_toggle_stops_running_timer() {
        let mut engine = TimerEngine::new();
        engine.toggle_running();
        engine.toggle_scheduling_mode();
        assert!(!engine.is_running());
        assert!(engine.set_scheduling_mode(SchedulingMode::Flexible).is_none());
    }

    #[test]
    fn progress_tracks_remaining_time() {
        let mut engine = TimerEngine::new();
        let mut subjects = SubjectRegistry::with_defaults();
        let mut log = SessionLog::new();
        assert_eq!(engine.progress_fraction(), 0.0);
        engine.toggle_running();
        for _ in 0..750 {
            engine.tick(&mut subjects, &mut log);
        }
        assert!((engine.progress_fraction() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn restore_clamps_corrupt_state() {
        let engine = TimerEngine::new()
            .with_mode(SchedulingMode::Flexible)
            .with_state(TimerState {
                phase: Phase::LongBreak,
                remaining_secs: 999_999,
                cycle_index: 9,
                selected_minutes: 0,
                active: DurationRef::Custom(12),
            });
        assert_eq!(engine.phase(), Phase::Break);
        assert_eq!(engine.selected_minutes(), 25);
        assert_eq!(engine.remaining_secs(), 300);
        assert_eq!(engine.cycle_index(), 1);
        assert!(!engine.is_running());
    }

    #[test]
    fn restore_keeps_valid_state() {
        let state = TimerState {
            phase: Phase::Break,
            remaining_secs: 120,
            cycle_index: 2,
            selected_minutes: 25,
            active: DurationRef::Preset(2),
        };
        let engine = TimerEngine::new().with_state(state.clone());
        assert_eq!(engine.state(), state);
    }

    #[test]
    fn snapshot_formats_display() {
        let snap = TimerEngine::new().snapshot();
        assert_eq!(snap.display, "25:00");
        assert_eq!(snap.total_secs, 1500);
        assert_eq!(snap.banner, "Time to focus");
    }
}
