use std::fs;
use std::path::PathBuf;

use color_eyre::Result;
use serde::Serialize;

use super::entry::{date_key, CalendarStorage};
use super::event::{Dataset, EventKind, Scope};

pub const JSON_EXPORT_FILE: &str = "artes_santafe_2026.json";
pub const CSV_EXPORT_FILE: &str = "artes_santafe_2026.csv";

const CSV_HEADERS: [&str; 10] = [
    "date",
    "title",
    "scope",
    "type",
    "make_art",
    "done",
    "description",
    "is_custom",
    "updated_at",
    "done_at",
];

/// One flat row per (date, entry) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRecord {
    pub date: String,
    pub title: String,
    pub scope: Scope,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub make_art: bool,
    pub done: bool,
    pub description: String,
    pub is_custom: bool,
    pub updated_at: String,
    pub done_at: String,
}

/// Flatten the dataset merged with stored task-state, plus every stored
/// custom entry. For a dataset event the FIRST stored entry of its date
/// stands in for the day's task state; extra non-custom entries are not
/// distinguished (kept as-is from the original exporter, see DESIGN.md).
pub fn build_records(
    dataset: &Dataset,
    storage: &CalendarStorage,
    only_marked: bool,
) -> Vec<ExportRecord> {
    let mut records = Vec::new();

    for event in dataset.iter() {
        let key = date_key(event.date);
        let first = storage.get(&key).and_then(|entries| entries.first());

        let (make_art, done, description, updated_at, done_at) = match first {
            Some(e) => (
                e.make_art,
                e.done,
                e.description.clone(),
                e.updated_at.clone().unwrap_or_default(),
                e.done_at.clone().unwrap_or_default(),
            ),
            None => (false, false, String::new(), String::new(), String::new()),
        };

        if only_marked && !make_art {
            continue;
        }

        records.push(ExportRecord {
            date: key,
            title: event.title.clone(),
            scope: event.scope,
            kind: event.kind,
            make_art,
            done,
            description,
            is_custom: false,
            updated_at,
            done_at,
        });
    }

    for (date, entries) in storage {
        for entry in entries.iter().filter(|e| e.is_custom) {
            if only_marked && !entry.make_art {
                continue;
            }
            records.push(ExportRecord {
                date: date.clone(),
                title: entry.custom_title.clone(),
                scope: Scope::Custom,
                kind: EventKind::Commemorative,
                make_art: entry.make_art,
                done: entry.done,
                description: entry.description.clone(),
                is_custom: true,
                updated_at: entry.updated_at.clone().unwrap_or_default(),
                done_at: entry.done_at.clone().unwrap_or_default(),
            });
        }
    }

    records
}

pub fn to_json(records: &[ExportRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Header row plus one row per record, every value quote-enclosed with
/// embedded quotes doubled.
pub fn to_csv(records: &[ExportRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(
        CSV_HEADERS
            .iter()
            .map(|h| csv_quote(h))
            .collect::<Vec<_>>()
            .join(","),
    );
    for r in records {
        let fields = [
            r.date.as_str(),
            r.title.as_str(),
            r.scope.tag(),
            r.kind.tag(),
            if r.make_art { "true" } else { "false" },
            if r.done { "true" } else { "false" },
            r.description.as_str(),
            if r.is_custom { "true" } else { "false" },
            r.updated_at.as_str(),
            r.done_at.as_str(),
        ];
        lines.push(
            fields
                .iter()
                .map(|f| csv_quote(f))
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    lines.join("\n")
}

fn csv_quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Write the JSON artifact under its fixed name in the working directory.
pub fn write_json(records: &[ExportRecord]) -> Result<PathBuf> {
    let path = PathBuf::from(JSON_EXPORT_FILE);
    fs::write(&path, to_json(records)?)?;
    Ok(path)
}

/// Write the CSV artifact under its fixed name in the working directory.
pub fn write_csv(records: &[ExportRecord]) -> Result<PathBuf> {
    let path = PathBuf::from(CSV_EXPORT_FILE);
    fs::write(&path, to_csv(records))?;
    Ok(path)
}
