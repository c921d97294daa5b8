use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One task-tracking record for a date.
///
/// A date may hold several: the implicit default entry plus one per
/// user-created custom event. Optional fields on previously stored entries
/// deserialize to empty defaults rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    #[serde(default)]
    pub make_art: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done_at: Option<String>,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default)]
    pub custom_title: String,
    #[serde(default)]
    pub custom_summary: String,
}

impl DayEntry {
    /// A fresh user-defined ad-hoc event, not backed by the dataset.
    pub fn custom() -> Self {
        Self {
            is_custom: true,
            ..Self::default()
        }
    }
}

/// The entire persisted state: ISO date string -> entry list. Sparse; only
/// dates the user touched appear. An ordered map keeps the blob diff-stable.
pub type CalendarStorage = BTreeMap<String, Vec<DayEntry>>;

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_optional_fields_default_to_empty() {
        let entry: DayEntry =
            serde_json::from_str(r#"{"make_art": true, "description": "x", "done": false}"#)
                .unwrap();
        assert!(entry.make_art);
        assert_eq!(entry.updated_at, None);
        assert_eq!(entry.done_at, None);
        assert!(!entry.is_custom);
        assert_eq!(entry.custom_title, "");
    }

    #[test]
    fn roundtrip_keeps_every_field() {
        let entry = DayEntry {
            make_art: true,
            description: "rascunho da arte".to_string(),
            done: true,
            updated_at: Some("2026-02-16T10:00:00-03:00".to_string()),
            done_at: Some("2026-02-16T12:00:00-03:00".to_string()),
            is_custom: true,
            custom_title: "Feira de rua".to_string(),
            custom_summary: "edição de verão".to_string(),
        };
        let json = serde_json::to_string(&entry).unwrap();
        let back: DayEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn date_key_is_iso() {
        let d = NaiveDate::from_ymd_opt(2026, 2, 3).unwrap();
        assert_eq!(date_key(d), "2026-02-03");
    }
}
