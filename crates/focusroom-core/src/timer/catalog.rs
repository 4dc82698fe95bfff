//! Focus-length catalog for flexible mode.
//!
//! Presets are fixed; custom entries are added and removed by the user.
//! Exactly one entry across both lists is active at any time.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum DurationRef {
    Preset(u32),
    Custom(u32),
}

/// The 25-minute preset, used whenever the active entry disappears.
pub const CANONICAL_PRESET: DurationRef = DurationRef::Preset(2);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetDuration {
    pub id: u32,
    pub minutes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomDuration {
    pub id: u32,
    pub label: String,
    pub minutes: u64,
}

/// A flattened view of one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub reference: DurationRef,
    pub label: String,
    pub minutes: u64,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct DurationCatalog {
    presets: Vec<PresetDuration>,
    customs: Vec<CustomDuration>,
    active: DurationRef,
}

impl Default for DurationCatalog {
    fn default() -> Self {
        let presets = [15, 25, 30, 45, 60]
            .into_iter()
            .zip(1..)
            .map(|(minutes, id)| PresetDuration { id, minutes })
            .collect();
        Self {
            presets,
            customs: Vec::new(),
            active: CANONICAL_PRESET,
        }
    }
}

impl DurationCatalog {
    /// Default presets plus stored custom entries. Entries with a zero length
    /// are dropped.
    pub fn with_customs(customs: Vec<CustomDuration>) -> Self {
        let customs = customs.into_iter().filter(|c| c.minutes > 0).collect();
        Self {
            customs,
            ..Self::default()
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn presets(&self) -> &[PresetDuration] {
        &self.presets
    }

    pub fn customs(&self) -> &[CustomDuration] {
        &self.customs
    }

    pub fn active(&self) -> DurationRef {
        self.active
    }

    pub fn is_active(&self, reference: DurationRef) -> bool {
        self.active == reference
    }

    pub fn minutes_of(&self, reference: DurationRef) -> Option<u64> {
        match reference {
            DurationRef::Preset(id) => self.presets.iter().find(|p| p.id == id).map(|p| p.minutes),
            DurationRef::Custom(id) => self.customs.iter().find(|c| c.id == id).map(|c| c.minutes),
        }
    }

    pub fn active_minutes(&self) -> u64 {
        self.minutes_of(self.active)
            .or_else(|| self.minutes_of(CANONICAL_PRESET))
            .unwrap_or(super::schedule::FOCUS_MINUTES)
    }

    /// Presets first, then custom entries, each in insertion order.
    pub fn entries(&self) -> Vec<CatalogEntry> {
        let presets = self.presets.iter().map(|p| {
            let reference = DurationRef::Preset(p.id);
            CatalogEntry {
                reference,
                label: format!("{}min", p.minutes),
                minutes: p.minutes,
                active: self.is_active(reference),
            }
        });
        let customs = self.customs.iter().map(|c| {
            let reference = DurationRef::Custom(c.id);
            CatalogEntry {
                reference,
                label: c.label.clone(),
                minutes: c.minutes,
                active: self.is_active(reference),
            }
        });
        presets.chain(customs).collect()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Mark `reference` active and return its length.
    pub fn activate(&mut self, reference: DurationRef) -> Result<u64> {
        let minutes = self
            .minutes_of(reference)
            .ok_or_else(|| CoreError::not_found("Duration", describe(reference)))?;
        self.active = reference;
        Ok(minutes)
    }

    /// Restore a stored active entry, falling back to the canonical preset
    /// when it no longer exists.
    pub fn restore_active(&mut self, reference: DurationRef) {
        if self.minutes_of(reference).is_some() {
            self.active = reference;
        } else {
            tracing::warn!(?reference, "stored duration selection no longer exists");
            self.active = CANONICAL_PRESET;
        }
    }

    pub fn add_custom(&mut self, label: &str, minutes: i64) -> Result<u32> {
        if minutes <= 0 {
            return Err(ValidationError::NonPositiveDuration { minutes }.into());
        }
        let minutes = minutes as u64;
        let label = match label.trim() {
            "" => format!("{minutes}min"),
            trimmed => trimmed.to_string(),
        };
        let id = self.customs.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        self.customs.push(CustomDuration { id, label, minutes });
        Ok(id)
    }

    /// Remove a custom entry. Returns the removed entry and whether it was
    /// the active one; in that case the canonical preset becomes active.
    pub fn remove_custom(&mut self, id: u32) -> Result<(CustomDuration, bool)> {
        let index = self
            .customs
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| CoreError::not_found("Duration", describe(DurationRef::Custom(id))))?;
        let removed = self.customs.remove(index);
        let was_active = self.active == DurationRef::Custom(id);
        if was_active {
            self.active = CANONICAL_PRESET;
        }
        Ok((removed, was_active))
    }
}

fn describe(reference: DurationRef) -> String {
    match reference {
        DurationRef::Preset(id) => format!("preset:{id}"),
        DurationRef::Custom(id) => format!("custom:{id}"),
    }
}

impl std::str::FromStr for DurationRef {
    type Err = String;

    /// Parses `preset:2` or `custom:1`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (kind, id) = s
            .split_once(':')
            .ok_or_else(|| format!("expected preset:<id> or custom:<id>, got '{s}'"))?;
        let id: u32 = id.trim().parse().map_err(|_| format!("invalid id in '{s}'"))?;
        match kind.trim() {
            "preset" => Ok(DurationRef::Preset(id)),
            "custom" => Ok(DurationRef::Custom(id)),
            other => Err(format!("unknown catalog kind '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_twenty_five_active() {
        let catalog = DurationCatalog::default();
        assert_eq!(catalog.presets().len(), 5);
        assert_eq!(catalog.active(), CANONICAL_PRESET);
        assert_eq!(catalog.active_minutes(), 25);
    }

    #[test]
    fn blank_label_defaults_to_minutes() {
        let mut catalog = DurationCatalog::default();
        let id = catalog.add_custom("  ", 45).unwrap();
        assert_eq!(catalog.customs()[0].label, "45min");
        assert_eq!(catalog.customs()[0].id, id);
        assert!(!catalog.is_active(DurationRef::Custom(id)));
    }

    #[test]
    fn non_positive_minutes_are_rejected() {
        let mut catalog = DurationCatalog::default();
        assert!(catalog.add_custom("", 0).is_err());
        assert!(catalog.add_custom("nope", -10).is_err());
        assert!(catalog.customs().is_empty());
    }

    #[test]
    fn custom_ids_increase() {
        let mut catalog = DurationCatalog::default();
        assert_eq!(catalog.add_custom("a", 10).unwrap(), 1);
        assert_eq!(catalog.add_custom("b", 20).unwrap(), 2);
    }

    #[test]
    fn activation_is_exclusive_across_lists() {
        let mut catalog = DurationCatalog::default();
        let id = catalog.add_custom("Deep", 90).unwrap();
        assert_eq!(catalog.activate(DurationRef::Custom(id)).unwrap(), 90);
        let active: Vec<_> = catalog.entries().into_iter().filter(|e| e.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].reference, DurationRef::Custom(id));
    }

    #[test]
    fn activating_unknown_entry_is_not_found() {
        let mut catalog = DurationCatalog::default();
        assert!(matches!(
            catalog.activate(DurationRef::Preset(9)),
            Err(CoreError::NotFound { .. })
        ));
        assert_eq!(catalog.active(), CANONICAL_PRESET);
    }

    #[test]
    fn removing_active_custom_falls_back() {
        let mut catalog = DurationCatalog::default();
        let id = catalog.add_custom("", 50).unwrap();
        catalog.activate(DurationRef::Custom(id)).unwrap();
        let (removed, was_active) = catalog.remove_custom(id).unwrap();
        assert_eq!(removed.minutes, 50);
        assert!(was_active);
        assert_eq!(catalog.active(), CANONICAL_PRESET);
    }

    #[test]
    fn reference_parses_and_serializes() {
        assert_eq!("preset:2".parse::<DurationRef>(), Ok(DurationRef::Preset(2)));
        assert_eq!("custom:7".parse::<DurationRef>(), Ok(DurationRef::Custom(7)));
        assert!("bogus".parse::<DurationRef>().is_err());
        let json = serde_json::to_string(&DurationRef::Custom(3)).unwrap();
        assert_eq!(json, r#"{"kind":"custom","id":3}"#);
    }
}
