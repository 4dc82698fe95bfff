//! Reading persisted state at startup.
//!
//! A missing key means "use the default". A key that cannot be read or
//! parsed is logged and treated as missing, so a corrupt value never stops
//! the app from starting.

use serde::de::DeserializeOwned;

use crate::session::{Session, SessionLog};
use crate::storage::{keys, KvStore};
use crate::subject::{Subject, SubjectRegistry};
use crate::timer::{CustomDuration, SchedulingMode, TimerEngine, TimerState};

/// Everything restored from storage.
pub struct Loaded {
    pub subjects: SubjectRegistry,
    pub sessions: SessionLog,
    pub engine: TimerEngine,
}

pub fn load_all<S: KvStore>(store: &S, default_mode: SchedulingMode) -> Loaded {
    let sessions = SessionLog::from_sessions(
        read_json::<Vec<Session>>(store, keys::SESSION_HISTORY).unwrap_or_default(),
    );

    // Ids handed out before (and ids history still points at) stay retired.
    let min_subject_id = sessions
        .max_subject_id()
        .map_or(1, |id| id + 1)
        .max(read_counter(store, keys::NEXT_SUBJECT_ID));
    let mut subjects = match read_json::<Vec<Subject>>(store, keys::SUBJECTS) {
        Some(stored) if !stored.is_empty() => SubjectRegistry::from_subjects(stored, min_subject_id),
        _ => SubjectRegistry::with_defaults_from(min_subject_id),
    };
    subjects.rebuild_totals(&sessions);

    let mode = read_raw(store, keys::SCHEDULING_MODE)
        .and_then(|raw| match raw.trim_matches('"').parse::<SchedulingMode>() {
            Ok(mode) => Some(mode),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring stored scheduling mode");
                None
            }
        })
        .unwrap_or(default_mode);

    let mut engine = TimerEngine::new()
        .with_mode(mode)
        .with_custom_durations(
            read_json::<Vec<CustomDuration>>(store, keys::CUSTOM_DURATIONS).unwrap_or_default(),
        )
        .with_counters(
            read_counter(store, keys::COMPLETED_SESSIONS),
            read_counter(store, keys::TOTAL_POMODOROS),
        );
    if let Some(state) = read_json::<TimerState>(store, keys::TIMER_STATE) {
        engine = engine.with_state(state);
    }

    Loaded {
        subjects,
        sessions,
        engine,
    }
}

fn read_raw<S: KvStore>(store: &S, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read stored value, using default");
            None
        }
    }
}

fn read_json<T: DeserializeOwned>(store: &impl KvStore, key: &str) -> Option<T> {
    let raw = read_raw(store, key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "stored value is corrupt, using default");
            None
        }
    }
}

fn read_counter<S: KvStore>(store: &S, key: &str) -> u64 {
    read_raw(store, key)
        .and_then(|raw| match raw.trim().parse::<u64>() {
            Ok(n) => Some(n),
            Err(e) => {
                tracing::warn!(key, error = %e, "stored counter is corrupt, using 0");
                None
            }
        })
        .unwrap_or(0)
}
