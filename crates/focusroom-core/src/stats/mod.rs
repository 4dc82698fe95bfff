//! Statistics over the subject registry and session log.
//!
//! Everything here is read-only: the aggregator borrows both stores and
//! recomputes figures from the session log on demand.

mod format;

pub use format::{format_history_time, format_total_time};

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;

use crate::session::{Session, SessionLog};
use crate::subject::{Color, SubjectId, SubjectRegistry};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectStats {
    pub subject_id: SubjectId,
    pub name: String,
    pub color: Color,
    pub total_minutes: u64,
    pub sessions_count: u64,
}

/// A subject's line in the ranked breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedSubject {
    #[serde(flatten)]
    pub stats: SubjectStats,
    /// Share of all focused minutes, 0..=100.
    pub percentage: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OverallStats {
    pub total_sessions: u64,
    pub today_sessions: u64,
    pub focus_minutes: u64,
    pub today_focus_minutes: u64,
    pub average_per_session: u64,
}

/// A subject whose cached minutes disagree with the session log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheMismatch {
    pub subject_id: SubjectId,
    pub cached: u64,
    pub actual: u64,
}

pub struct StatsAggregator<'a> {
    subjects: &'a SubjectRegistry,
    log: &'a SessionLog,
}

impl<'a> StatsAggregator<'a> {
    pub fn new(subjects: &'a SubjectRegistry, log: &'a SessionLog) -> Self {
        Self { subjects, log }
    }

    /// One entry per subject, in registry order.
    pub fn per_subject_stats(&self) -> Vec<SubjectStats> {
        self.subjects
            .list()
            .iter()
            .map(|subject| {
                let (total_minutes, sessions_count) = self
                    .log
                    .focus_completed()
                    .filter(|s| s.subject_id == subject.id)
                    .fold((0, 0), |(minutes, count), s| (minutes + s.duration, count + 1));
                SubjectStats {
                    subject_id: subject.id,
                    name: subject.name.clone(),
                    color: subject.color.clone(),
                    total_minutes,
                    sessions_count,
                }
            })
            .collect()
    }

    pub fn overall_stats(&self) -> OverallStats {
        self.overall_stats_at(Local::now())
    }

    /// Overall figures, with "today" meaning the local calendar day of `now`.
    pub fn overall_stats_at<Tz: TimeZone>(&self, now: DateTime<Tz>) -> OverallStats {
        let today = now.with_timezone(&Local).date_naive();
        let mut stats = OverallStats::default();
        for session in self.log.focus_completed() {
            stats.total_sessions += 1;
            stats.focus_minutes += session.duration;
            if is_on_day(session, today) {
                stats.today_sessions += 1;
                stats.today_focus_minutes += session.duration;
            }
        }
        stats.average_per_session = if stats.total_sessions == 0 {
            0
        } else {
            round_div(stats.focus_minutes, stats.total_sessions)
        };
        stats
    }

    /// Subjects with focused time, most minutes first. Ties keep registry
    /// order.
    pub fn ranking(&self) -> Vec<RankedSubject> {
        let per_subject = self.per_subject_stats();
        let sum: u64 = per_subject.iter().map(|s| s.total_minutes).sum();
        let mut ranked: Vec<RankedSubject> = per_subject
            .into_iter()
            .filter(|s| s.total_minutes > 0)
            .map(|stats| RankedSubject {
                percentage: percentage_of(stats.total_minutes, sum),
                stats,
            })
            .collect();
        // Stable sort keeps insertion order for equal totals.
        ranked.sort_by(|a, b| b.stats.total_minutes.cmp(&a.stats.total_minutes));
        ranked
    }

    /// Subjects whose cached `total_minutes` differs from the log.
    pub fn cache_mismatches(&self) -> Vec<CacheMismatch> {
        self.per_subject_stats()
            .into_iter()
            .filter_map(|stats| {
                let cached = self.subjects.get(stats.subject_id)?.total_minutes;
                (cached != stats.total_minutes).then_some(CacheMismatch {
                    subject_id: stats.subject_id,
                    cached,
                    actual: stats.total_minutes,
                })
            })
            .collect()
    }

    /// The most recent `limit` sessions.
    pub fn history(&self, limit: usize) -> &'a [Session] {
        self.log.recent(limit)
    }
}

/// `round(minutes / max(total, 1) * 100)`.
pub fn percentage_of(minutes: u64, total: u64) -> u64 {
    round_div(minutes * 100, total.max(1))
}

/// Integer division rounding half up.
fn round_div(numerator: u64, denominator: u64) -> u64 {
    (numerator * 2 + denominator) / (denominator * 2)
}

fn is_on_day(session: &Session, day: chrono::NaiveDate) -> bool {
    session.timestamp.with_timezone(&Local).date_naive() == day
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionDraft;
    use crate::timer::Phase;
    use chrono::{Duration, Utc};

    fn record(
        subjects: &mut SubjectRegistry,
        log: &mut SessionLog,
        subject_id: SubjectId,
        minutes: u64,
        at: DateTime<Utc>,
    ) {
        let subject = subjects.get(subject_id).unwrap().clone();
        let session = log.append(SessionDraft::completed_focus(&subject, minutes, at)).clone();
        subjects.record_minutes(subject_id, session.duration).unwrap();
    }

    #[test]
    fn empty_log_gives_zeroes() {
        let subjects = SubjectRegistry::with_defaults();
        let log = SessionLog::new();
        let stats = StatsAggregator::new(&subjects, &log);
        assert_eq!(stats.overall_stats(), OverallStats::default());
        assert!(stats.ranking().is_empty());
        assert_eq!(stats.per_subject_stats().len(), 4);
    }

    #[test]
    fn per_subject_matches_cached_totals() {
        let mut subjects = SubjectRegistry::with_defaults();
        let mut log = SessionLog::new();
        let now = Utc::now();
        record(&mut subjects, &mut log, 1, 25, now);
        record(&mut subjects, &mut log, 1, 30, now);
        record(&mut subjects, &mut log, 3, 45, now);

        let stats = StatsAggregator::new(&subjects, &log);
        for s in stats.per_subject_stats() {
            assert_eq!(s.total_minutes, subjects.get(s.subject_id).unwrap().total_minutes);
        }
        assert!(stats.cache_mismatches().is_empty());
        let math = &stats.per_subject_stats()[0];
        assert_eq!((math.total_minutes, math.sessions_count), (55, 2));
    }

    #[test]
    fn non_focus_and_incomplete_sessions_are_ignored() {
        let subjects = SubjectRegistry::with_defaults();
        let mut log = SessionLog::new();
        let subject = subjects.get(1).unwrap().clone();
        let mut draft = SessionDraft::completed_focus(&subject, 5, Utc::now());
        draft.mode = Phase::Break;
        log.append(draft);
        let mut draft = SessionDraft::completed_focus(&subject, 10, Utc::now());
        draft.completed = false;
        log.append(draft);

        let stats = StatsAggregator::new(&subjects, &log);
        assert_eq!(stats.overall_stats().total_sessions, 0);
        assert_eq!(stats.per_subject_stats()[0].sessions_count, 0);
    }

    #[test]
    fn overall_counts_today_and_average() {
        let mut subjects = SubjectRegistry::with_defaults();
        let mut log = SessionLog::new();
        let now = Local::now();
        let now_utc = now.with_timezone(&Utc);
        record(&mut subjects, &mut log, 1, 25, now_utc);
        record(&mut subjects, &mut log, 2, 30, now_utc);
        record(&mut subjects, &mut log, 2, 30, now_utc - Duration::days(2));

        let overall = StatsAggregator::new(&subjects, &log).overall_stats_at(now);
        assert_eq!(overall.total_sessions, 3);
        assert_eq!(overall.today_sessions, 2);
        assert_eq!(overall.focus_minutes, 85);
        assert_eq!(overall.today_focus_minutes, 55);
        // 85 / 3 = 28.33
        assert_eq!(overall.average_per_session, 28);
    }

    #[test]
    fn local_midnight_is_inclusive() {
        let mut subjects = SubjectRegistry::with_defaults();
        let mut log = SessionLog::new();
        let midnight = Local::now()
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_local_timezone(Local)
            .earliest()
            .unwrap();
        record(&mut subjects, &mut log, 1, 25, midnight.with_timezone(&Utc));
        record(
            &mut subjects,
            &mut log,
            1,
            25,
            (midnight - Duration::seconds(1)).with_timezone(&Utc),
        );

        let overall = StatsAggregator::new(&subjects, &log).overall_stats_at(midnight);
        assert_eq!(overall.today_sessions, 1);
    }

    #[test]
    fn ranking_sorts_by_minutes_with_stable_ties() {
        let mut subjects = SubjectRegistry::with_defaults();
        let mut log = SessionLog::new();
        let now = Utc::now();
        record(&mut subjects, &mut log, 4, 30, now);
        record(&mut subjects, &mut log, 2, 30, now);
        record(&mut subjects, &mut log, 3, 40, now);

        let ranking = StatsAggregator::new(&subjects, &log).ranking();
        let order: Vec<_> = ranking.iter().map(|r| r.stats.subject_id).collect();
        assert_eq!(order, vec![3, 2, 4]);
        let percentages: Vec<_> = ranking.iter().map(|r| r.percentage).collect();
        assert_eq!(percentages, vec![40, 30, 30]);
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage_of(1, 3), 33);
        assert_eq!(percentage_of(2, 3), 67);
        assert_eq!(percentage_of(1, 8), 13);
        assert_eq!(percentage_of(0, 0), 0);
    }

    #[test]
    fn mismatch_is_reported() {
        let mut subjects = SubjectRegistry::with_defaults();
        let log = SessionLog::new();
        subjects.record_minutes(2, 10).unwrap();
        let mismatches = StatsAggregator::new(&subjects, &log).cache_mismatches();
        assert_eq!(
            mismatches,
            vec![CacheMismatch { subject_id: 2, cached: 10, actual: 0 }]
        );
    }
}
