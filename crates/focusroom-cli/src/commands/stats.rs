use chrono::Local;
use clap::Subcommand;
use focusroom_core::stats::{format_history_time, format_total_time};
use focusroom_core::{Config, FocusApp};
use serde_json::json;

use super::{open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Session counts and focus time, all-time and today
    Overall,
    /// Per-subject breakdown, most studied first
    Subjects,
    /// Most recent sessions
    History {
        /// Number of sessions to show
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

pub async fn run(action: StatsAction, config: &Config) -> CliResult {
    let app = open_app(config)?;
    let result = report(&app, action);
    app.shutdown().await;
    result
}

fn report(app: &FocusApp, action: StatsAction) -> CliResult {
    let stats = app.stats();
    match action {
        StatsAction::Overall => {
            let overall = stats.overall_stats();
            print_json(&json!({
                "total_sessions": overall.total_sessions,
                "today_sessions": overall.today_sessions,
                "focus_minutes": overall.focus_minutes,
                "focus_time": format_total_time(overall.focus_minutes),
                "today_focus_minutes": overall.today_focus_minutes,
                "average_per_session": overall.average_per_session,
                "completed_sessions": app.engine().completed_sessions(),
                "total_pomodoros": app.engine().total_pomodoros(),
            }))?;
        }
        StatsAction::Subjects => {
            for mismatch in stats.cache_mismatches() {
                tracing::warn!(
                    subject = mismatch.subject_id,
                    cached = mismatch.cached,
                    actual = mismatch.actual,
                    "cached subject minutes disagree with history"
                );
            }
            let rows: Vec<_> = stats
                .ranking()
                .into_iter()
                .map(|ranked| {
                    json!({
                        "subject_id": ranked.stats.subject_id,
                        "name": ranked.stats.name,
                        "color": ranked.stats.color,
                        "total_minutes": ranked.stats.total_minutes,
                        "time": format_total_time(ranked.stats.total_minutes),
                        "sessions_count": ranked.stats.sessions_count,
                        "percentage": ranked.percentage,
                    })
                })
                .collect();
            print_json(&rows)?;
        }
        StatsAction::History { limit } => {
            let now = Local::now();
            let rows: Vec<_> = stats
                .history(limit)
                .iter()
                .map(|session| {
                    json!({
                        "id": session.id,
                        "subject": session.subject_name,
                        "color": session.subject_color,
                        "duration": session.duration,
                        "when": format_history_time(session.timestamp.with_timezone(&Local), now),
                    })
                })
                .collect();
            print_json(&rows)?;
        }
    }
    Ok(())
}
