use std::collections::HashMap;

use chrono::NaiveDate;
use color_eyre::Result;
use serde::{Deserialize, Serialize};

/// Jurisdiction/origin of a calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scope {
    National,
    State,
    Municipality,
    Popular,
    Custom,
}

impl Scope {
    /// Tag used in exports, identical to the serialized form.
    pub fn tag(self) -> &'static str {
        match self {
            Scope::National => "national",
            Scope::State => "state",
            Scope::Municipality => "municipality",
            Scope::Popular => "popular",
            Scope::Custom => "custom",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Scope::National => "Nacional",
            Scope::State => "Estadual",
            Scope::Municipality => "Municipal",
            Scope::Popular => "Popular",
            Scope::Custom => "Especial",
        }
    }
}

/// Legal/civic weight of a calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    Holiday,
    OptionalObservance,
    Commemorative,
}

impl EventKind {
    pub fn tag(self) -> &'static str {
        match self {
            EventKind::Holiday => "holiday",
            EventKind::OptionalObservance => "optional-observance",
            EventKind::Commemorative => "commemorative",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EventKind::Holiday => "Feriado",
            EventKind::OptionalObservance => "Facultativo",
            EventKind::Commemorative => "Comemorativa",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    pub summary: String,
    pub scope: Scope,
    #[serde(rename = "type")]
    pub kind: EventKind,
}

const EVENTS_2026: &str = include_str!("../../data/events_2026.json");

/// The immutable 2026 event dataset, indexed by date once at load.
pub struct Dataset {
    events: Vec<Event>,
    by_date: HashMap<NaiveDate, Vec<usize>>,
}

impl Dataset {
    /// Parse the dataset shipped with the binary. A parse failure here is a
    /// build defect, surfaced at startup rather than papered over.
    pub fn load() -> Result<Self> {
        Self::from_json(EVENTS_2026)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let events: Vec<Event> = serde_json::from_str(json)?;
        Ok(Self::new(events))
    }

    pub fn new(events: Vec<Event>) -> Self {
        let mut by_date: HashMap<NaiveDate, Vec<usize>> = HashMap::new();
        for (i, event) in events.iter().enumerate() {
            by_date.entry(event.date).or_default().push(i);
        }
        Self { events, by_date }
    }

    /// Dataset events falling on `date`, in file order.
    pub fn events_on(&self, date: NaiveDate) -> Vec<&Event> {
        match self.by_date.get(&date) {
            Some(indices) => indices.iter().map(|&i| &self.events[i]).collect(),
            None => Vec::new(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_dataset_parses_and_stays_in_2026() {
        let dataset = Dataset::load().unwrap();
        assert!(!dataset.is_empty());
        for event in dataset.iter() {
            assert_eq!(event.date.format("%Y").to_string(), "2026", "{}", event.id);
        }
    }

    #[test]
    fn events_on_returns_file_order() {
        let dataset = Dataset::load().unwrap();
        // Oct 12 carries both the national holiday and Dia das Crianças.
        let date = NaiveDate::from_ymd_opt(2026, 10, 12).unwrap();
        let events = dataset.events_on(date);
        assert!(events.len() >= 2);
        assert_eq!(events[0].id, "br-aparecida");
        assert_eq!(events[0].kind, EventKind::Holiday);
    }

    #[test]
    fn events_on_empty_for_unlisted_date() {
        let dataset = Dataset::new(Vec::new());
        let date = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();
        assert!(dataset.events_on(date).is_empty());
    }

    #[test]
    fn kind_tags_match_serialized_form() {
        let json = serde_json::to_string(&EventKind::OptionalObservance).unwrap();
        assert_eq!(json, "\"optional-observance\"");
        assert_eq!(EventKind::OptionalObservance.tag(), "optional-observance");
        assert_eq!(
            serde_json::to_string(&Scope::Municipality).unwrap(),
            "\"municipality\""
        );
    }
}
