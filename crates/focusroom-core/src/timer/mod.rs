mod catalog;
pub mod driver;
mod engine;
mod schedule;

pub use catalog::{CatalogEntry, CustomDuration, DurationCatalog, DurationRef, PresetDuration, CANONICAL_PRESET};
pub use driver::{Signal, TaskHandle, TICK_PERIOD};
pub use engine::{TimerEngine, TimerSnapshot, TimerState};
pub use schedule::{
    flexible_break_minutes, format_time, phase_duration_minutes, Phase, SchedulingMode,
    BREAK_MINUTES, CYCLE_LENGTH, FOCUS_MINUTES, LONG_BREAK_MINUTES,
};
