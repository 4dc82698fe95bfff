use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};

/// `45min`, `2h` or `1h 30min`.
pub fn format_total_time(minutes: u64) -> String {
    if minutes < 60 {
        return format!("{minutes}min");
    }
    let hours = minutes / 60;
    let mins = minutes % 60;
    if mins > 0 {
        format!("{hours}h {mins}min")
    } else {
        format!("{hours}h")
    }
}

/// History timestamp relative to `now`: `Today, 9:05` or `3/11, 14:30`
/// (day/month), both in the local timezone of `now`.
pub fn format_history_time<Tz: TimeZone>(at: DateTime<Tz>, now: DateTime<Tz>) -> String {
    let at = at.with_timezone(&Local);
    let now = now.with_timezone(&Local);
    let clock = format!("{}:{:02}", at.hour(), at.minute());
    if at.date_naive() == now.date_naive() {
        format!("Today, {clock}")
    } else {
        format!("{}/{}, {clock}", at.day(), at.month())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn total_time_formats() {
        assert_eq!(format_total_time(0), "0min");
        assert_eq!(format_total_time(45), "45min");
        assert_eq!(format_total_time(60), "1h");
        assert_eq!(format_total_time(90), "1h 30min");
        assert_eq!(format_total_time(605), "10h 5min");
    }

    #[test]
    fn history_time_marks_today() {
        let now = Local::now();
        assert!(format_history_time(now, now).starts_with("Today, "));
        let earlier = now - Duration::days(3);
        let text = format_history_time(earlier, now);
        assert!(!text.starts_with("Today"));
        assert!(text.starts_with(&format!("{}/{}", earlier.day(), earlier.month())));
    }
}
