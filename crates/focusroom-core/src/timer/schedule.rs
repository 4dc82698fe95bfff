use serde::{Deserialize, Serialize};

/// Pomodoro focus length in minutes.
pub const FOCUS_MINUTES: u64 = 25;
/// Pomodoro short break in minutes.
pub const BREAK_MINUTES: u64 = 5;
/// Pomodoro long break in minutes.
pub const LONG_BREAK_MINUTES: u64 = 15;
/// Focus intervals per Pomodoro cycle; the last one is followed by a long break.
pub const CYCLE_LENGTH: u32 = 4;
/// Floor for the break that follows a flexible focus interval.
pub const MIN_FLEXIBLE_BREAK_MINUTES: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Focus,
    Break,
    LongBreak,
}

impl Phase {
    /// Banner text shown above the clock.
    pub fn banner(self) -> &'static str {
        match self {
            Phase::Focus => "Time to focus",
            Phase::Break | Phase::LongBreak => "Time to rest",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulingMode {
    /// Fixed 25/5/15 cycle; running intervals cannot be paused.
    #[default]
    Pomodoro,
    /// Focus length picked from the duration catalog; pausable.
    Flexible,
}

impl SchedulingMode {
    pub fn toggled(self) -> Self {
        match self {
            SchedulingMode::Pomodoro => SchedulingMode::Flexible,
            SchedulingMode::Flexible => SchedulingMode::Pomodoro,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SchedulingMode::Pomodoro => "pomodoro",
            SchedulingMode::Flexible => "flexible",
        }
    }
}

impl std::str::FromStr for SchedulingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pomodoro" => Ok(SchedulingMode::Pomodoro),
            "flexible" => Ok(SchedulingMode::Flexible),
            other => Err(format!("unknown scheduling mode: {other}")),
        }
    }
}

/// Break following a flexible focus interval: a fifth of it, rounded half
/// up, never shorter than five minutes.
pub fn flexible_break_minutes(focus_minutes: u64) -> u64 {
    ((focus_minutes + 2) / 5).max(MIN_FLEXIBLE_BREAK_MINUTES)
}

/// Length of `phase` in minutes, never less than one.
pub fn phase_duration_minutes(phase: Phase, mode: SchedulingMode, selected_minutes: u64) -> u64 {
    let minutes = match (mode, phase) {
        (SchedulingMode::Pomodoro, Phase::Focus) => FOCUS_MINUTES,
        (SchedulingMode::Pomodoro, Phase::Break) => BREAK_MINUTES,
        (SchedulingMode::Pomodoro, Phase::LongBreak) => LONG_BREAK_MINUTES,
        (SchedulingMode::Flexible, Phase::Focus) => selected_minutes,
        (SchedulingMode::Flexible, Phase::Break | Phase::LongBreak) => {
            flexible_break_minutes(selected_minutes)
        }
    };
    minutes.max(1)
}

/// `MM:SS`, zero-padded. Minutes keep counting past 59.
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flexible_break_rounds_and_floors() {
        assert_eq!(flexible_break_minutes(30), 6);
        assert_eq!(flexible_break_minutes(35), 7);
        assert_eq!(flexible_break_minutes(24), 5);
        assert_eq!(flexible_break_minutes(26), 5);
        assert_eq!(flexible_break_minutes(60), 12);
        assert_eq!(flexible_break_minutes(33), 7);
        assert_eq!(flexible_break_minutes(1), 5);
    }

    #[test]
    fn pomodoro_durations_are_fixed() {
        let mode = SchedulingMode::Pomodoro;
        assert_eq!(phase_duration_minutes(Phase::Focus, mode, 60), 25);
        assert_eq!(phase_duration_minutes(Phase::Break, mode, 60), 5);
        assert_eq!(phase_duration_minutes(Phase::LongBreak, mode, 60), 15);
    }

    #[test]
    fn flexible_focus_is_clamped_to_one_minute() {
        assert_eq!(
            phase_duration_minutes(Phase::Focus, SchedulingMode::Flexible, 0),
            1
        );
    }

    #[test]
    fn format_time_pads_without_hour_rollover() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(1500), "25:00");
        assert_eq!(format_time(3600), "60:00");
        assert_eq!(format_time(6001), "100:01");
    }

    #[test]
    fn mode_parses_and_toggles() {
        assert_eq!("Flexible".parse::<SchedulingMode>(), Ok(SchedulingMode::Flexible));
        assert!("other".parse::<SchedulingMode>().is_err());
        assert_eq!(SchedulingMode::Pomodoro.toggled(), SchedulingMode::Flexible);
    }
}
