//! Storage keys. Each maps to one JSON value.

/// `Vec<Subject>`
pub const SUBJECTS: &str = "subjects";
/// `Vec<Session>`, most recent first
pub const SESSION_HISTORY: &str = "session_history";
/// `Vec<CustomDuration>`
pub const CUSTOM_DURATIONS: &str = "custom_durations";
/// Focus completions in either mode, as a bare integer
pub const COMPLETED_SESSIONS: &str = "completed_sessions";
/// Pomodoro-mode focus completions, as a bare integer
pub const TOTAL_POMODOROS: &str = "total_pomodoros";
/// `"pomodoro"` or `"flexible"`
pub const SCHEDULING_MODE: &str = "scheduling_mode";
/// Id the next added subject gets, as a bare integer
pub const NEXT_SUBJECT_ID: &str = "next_subject_id";
/// `TimerState`
pub const TIMER_STATE: &str = "timer_state";
