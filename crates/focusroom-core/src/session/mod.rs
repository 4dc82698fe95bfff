//! Session history.
//!
//! The log is append-only and ordered most-recent-first. Records carry a
//! snapshot of the subject's name and colour taken when they were written,
//! so history stays readable after the subject is edited or removed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::subject::{Color, Subject, SubjectId};
use crate::timer::Phase;

pub type SessionId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    /// May dangle once the subject is removed.
    pub subject_id: SubjectId,
    pub subject_name: String,
    #[serde(deserialize_with = "Color::deserialize_or_default")]
    pub subject_color: Color,
    /// Minutes, always at least 1.
    pub duration: u64,
    pub mode: Phase,
    pub completed: bool,
    pub timestamp: DateTime<Utc>,
}

impl Session {
    /// Whether this session counts toward subject totals and daily counters.
    pub fn counts_as_focus(&self) -> bool {
        self.mode == Phase::Focus && self.completed
    }
}

/// A session that has not been assigned an id yet.
#[derive(Debug, Clone)]
pub struct SessionDraft {
    pub subject_id: SubjectId,
    pub subject_name: String,
    pub subject_color: Color,
    pub duration: u64,
    pub mode: Phase,
    pub completed: bool,
    pub timestamp: DateTime<Utc>,
}

impl SessionDraft {
    /// A completed focus interval for `subject`, snapshotting its name and colour.
    pub fn completed_focus(subject: &Subject, duration: u64, timestamp: DateTime<Utc>) -> Self {
        Self {
            subject_id: subject.id,
            subject_name: subject.name.clone(),
            subject_color: subject.color.clone(),
            duration,
            mode: Phase::Focus,
            completed: true,
            timestamp,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionLog {
    /// Most recent first.
    sessions: Vec<Session>,
    next_id: SessionId,
}

impl SessionLog {
    pub fn new() -> Self {
        Self {
            sessions: Vec::new(),
            next_id: 1,
        }
    }

    /// Restore a stored history, keeping the stored ids and order.
    pub fn from_sessions(sessions: Vec<Session>) -> Self {
        let next_id = sessions.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        Self { sessions, next_id }
    }

    /// Prepend a new session and return the stored record.
    pub fn append(&mut self, draft: SessionDraft) -> &Session {
        let session = Session {
            id: self.next_id,
            subject_id: draft.subject_id,
            subject_name: draft.subject_name,
            subject_color: draft.subject_color,
            duration: draft.duration.max(1),
            mode: draft.mode,
            completed: draft.completed,
            timestamp: draft.timestamp,
        };
        self.next_id += 1;
        self.sessions.insert(0, session);
        &self.sessions[0]
    }

    /// Sessions matching `predicate`, most recent first.
    pub fn query<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = &'a Session> + 'a
    where
        P: Fn(&Session) -> bool + 'a,
    {
        self.sessions.iter().filter(move |s| predicate(s))
    }

    /// Completed focus sessions only.
    pub fn focus_completed(&self) -> impl Iterator<Item = &Session> {
        self.query(Session::counts_as_focus)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Session> {
        self.sessions.iter()
    }

    pub fn recent(&self, limit: usize) -> &[Session] {
        &self.sessions[..limit.min(self.sessions.len())]
    }

    pub fn as_slice(&self) -> &[Session] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Highest subject id any session refers to.
    pub fn max_subject_id(&self) -> Option<SubjectId> {
        self.sessions.iter().map(|s| s.subject_id).max()
    }
}
