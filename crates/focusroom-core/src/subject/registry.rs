//! Subject registry.
//!
//! Owns the subject list in insertion order. Ids are handed out from a
//! counter that only moves forward, so an id is never reused after the
//! subject is removed (sessions may still reference it).

use serde::{Deserialize, Serialize};

use super::Color;
use crate::error::{CoreError, Result, ValidationError};
use crate::session::SessionLog;

pub type SubjectId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    #[serde(deserialize_with = "Color::deserialize_or_default")]
    pub color: Color,
    #[serde(default)]
    pub selected: bool,
    /// Cached sum of completed focus minutes for this subject.
    #[serde(default)]
    pub total_minutes: u64,
}

/// What the timer engine needs from the subject side.
pub trait SubjectActions {
    fn selected_subject(&self) -> Option<&Subject>;
    fn record_minutes(&mut self, id: SubjectId, minutes: u64) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct SubjectRegistry {
    subjects: Vec<Subject>,
    next_id: SubjectId,
}

impl SubjectRegistry {
    /// An empty registry. The first subject added becomes selected.
    pub fn new() -> Self {
        Self {
            subjects: Vec::new(),
            next_id: 1,
        }
    }

    /// The starter subjects used when nothing has been stored yet.
    pub fn with_defaults() -> Self {
        Self::with_defaults_from(1)
    }

    /// The starter subjects, numbered from `first_id` so they cannot
    /// collide with ids still referenced by stored history.
    pub fn with_defaults_from(first_id: SubjectId) -> Self {
        let mut registry = Self::new();
        registry.next_id = first_id.max(1);
        for (i, name) in ["Mathematics", "Programming", "Physics", "English"]
            .into_iter()
            .enumerate()
        {
            registry.push(name.to_string(), Color::from_palette(i));
        }
        registry
    }

    /// Rebuild a registry from stored subjects.
    ///
    /// Repairs the selection (first subject wins when none or several are
    /// selected) and starts the id counter past both the stored subjects and
    /// `min_next_id`, which callers derive from the session log.
    pub fn from_subjects(mut subjects: Vec<Subject>, min_next_id: SubjectId) -> Self {
        let mut seen_selected = false;
        for subject in &mut subjects {
            if subject.selected && !seen_selected {
                seen_selected = true;
            } else {
                subject.selected = false;
            }
        }
        if !seen_selected {
            if let Some(first) = subjects.first_mut() {
                first.selected = true;
            }
        }

        let max_id = subjects.iter().map(|s| s.id).max().unwrap_or(0);
        Self {
            subjects,
            next_id: (max_id + 1).max(min_next_id).max(1),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn list(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn get(&self, id: SubjectId) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    /// The id the next added subject will get.
    pub fn next_id(&self) -> SubjectId {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// The selected subject; `None` only when the registry is empty.
    pub fn get_selected(&self) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.selected)
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn add(&mut self, name: &str, color: &str) -> Result<SubjectId> {
        let name = validate_name(name)?;
        let color = Color::parse(color)?;
        Ok(self.push(name, color))
    }

    pub fn edit(&mut self, id: SubjectId, name: &str, color: &str) -> Result<()> {
        let index = self.index_of(id)?;
        let name = validate_name(name)?;
        let color = Color::parse(color)?;
        let subject = &mut self.subjects[index];
        subject.name = name;
        subject.color = color;
        Ok(())
    }

    pub fn remove(&mut self, id: SubjectId) -> Result<Subject> {
        let index = self.index_of(id)?;
        if self.subjects.len() == 1 {
            return Err(CoreError::invariant(
                "cannot remove the last subject; at least one must remain",
            ));
        }
        let removed = self.subjects.remove(index);
        if removed.selected {
            // Non-empty: the guard above keeps at least one subject.
            self.subjects[0].selected = true;
        }
        tracing::debug!(id, name = %removed.name, "subject removed");
        Ok(removed)
    }

    pub fn select(&mut self, id: SubjectId) -> Result<()> {
        self.index_of(id)?;
        for subject in &mut self.subjects {
            subject.selected = subject.id == id;
        }
        Ok(())
    }

    pub fn record_minutes(&mut self, id: SubjectId, minutes: u64) -> Result<()> {
        let index = self.index_of(id)?;
        let subject = &mut self.subjects[index];
        subject.total_minutes = subject.total_minutes.saturating_add(minutes);
        Ok(())
    }

    /// Recompute every cached total from `log`.
    ///
    /// Returns the number of subjects whose cache had drifted.
    pub fn rebuild_totals(&mut self, log: &SessionLog) -> usize {
        let mut repaired = 0;
        for subject in &mut self.subjects {
            let actual: u64 = log
                .focus_completed()
                .filter(|s| s.subject_id == subject.id)
                .map(|s| s.duration)
                .sum();
            if actual != subject.total_minutes {
                tracing::warn!(
                    id = subject.id,
                    cached = subject.total_minutes,
                    actual,
                    "subject minutes out of sync with session log, repairing"
                );
                subject.total_minutes = actual;
                repaired += 1;
            }
        }
        repaired
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn push(&mut self, name: String, color: Color) -> SubjectId {
        let id = self.next_id;
        self.next_id += 1;
        let selected = self.subjects.is_empty();
        self.subjects.push(Subject {
            id,
            name,
            color,
            selected,
            total_minutes: 0,
        });
        id
    }

    fn index_of(&self, id: SubjectId) -> Result<usize> {
        self.subjects
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| CoreError::not_found("Subject", id))
    }
}

impl SubjectActions for SubjectRegistry {
    fn selected_subject(&self) -> Option<&Subject> {
        self.get_selected()
    }

    fn record_minutes(&mut self, id: SubjectId, minutes: u64) -> Result<()> {
        SubjectRegistry::record_minutes(self, id, minutes)
    }
}

fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty {
            field: "name".into(),
        });
    }
    Ok(trimmed.to_string())
}
