use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::Session;
use crate::timer::{DurationRef, Phase, SchedulingMode};

/// Every state change of the timer produces an Event.
/// The UI renders them; the CLI prints them as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// An interval ran down to zero.
    IntervalCompleted {
        finished: Phase,
        next_phase: Phase,
        next_duration_secs: u64,
        /// The recorded session, for focus intervals with a selected subject.
        session: Option<Session>,
        at: DateTime<Utc>,
    },
    TimerReset {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    CycleReset {
        at: DateTime<Utc>,
    },
    DurationSelected {
        reference: DurationRef,
        minutes: u64,
        at: DateTime<Utc>,
    },
    ModeChanged {
        mode: SchedulingMode,
        at: DateTime<Utc>,
    },
    CelebrationStarted {
        at: DateTime<Utc>,
    },
    CelebrationCleared {
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn is_completion(&self) -> bool {
        matches!(self, Event::IntervalCompleted { .. })
    }
}
