use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use color_eyre::Result;

use super::entry::{date_key, CalendarStorage, DayEntry};

/// Versioned, namespaced file name for the single persisted blob.
const STORAGE_FILE: &str = "santa_fe_arts_calendar_2026.json";

/// Local store adapter over one JSON file. The path is an explicit handle so
/// tests can point it anywhere.
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new() -> Self {
        let dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            path: dir.join("arte-tui").join(STORAGE_FILE),
        }
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full mapping. A missing file, an unreadable file, or an
    /// unparsable blob all read as empty; this never fails.
    pub fn read(&self) -> CalendarStorage {
        let Ok(blob) = fs::read_to_string(&self.path) else {
            return CalendarStorage::new();
        };
        serde_json::from_str(&blob).unwrap_or_default()
    }

    /// Replace the entire entry list for `date` and persist the full mapping
    /// in a single serialize + write. There is no partial-entry update path;
    /// callers read-modify-write the whole list.
    pub fn write_day(&self, date: NaiveDate, entries: Vec<DayEntry>) -> Result<()> {
        let mut storage = self.read();
        storage.insert(date_key(date), entries);
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let blob = serde_json::to_string(&storage)?;
        fs::write(&self.path, blob)?;
        Ok(())
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> Store {
        let path = std::env::temp_dir()
            .join("arte-tui-tests")
            .join(format!("{}-{}.json", name, std::process::id()));
        let _ = fs::remove_file(&path);
        Store::at(path)
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    #[test]
    fn read_missing_file_is_empty() {
        let store = temp_store("missing");
        assert!(store.read().is_empty());
    }

    #[test]
    fn read_corrupt_blob_is_empty() {
        let store = temp_store("corrupt");
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{not json at all").unwrap();
        assert!(store.read().is_empty());
    }

    #[test]
    fn write_day_roundtrips_entries_exactly() {
        let store = temp_store("roundtrip");
        let entries = vec![
            DayEntry {
                make_art: true,
                description: "cartaz do feriado".to_string(),
                done: true,
                updated_at: Some("2026-02-16T10:00:00-03:00".to_string()),
                done_at: Some("2026-02-16T12:00:00-03:00".to_string()),
                ..DayEntry::default()
            },
            DayEntry {
                custom_title: "Sarau".to_string(),
                ..DayEntry::custom()
            },
        ];
        store.write_day(date(2, 16), entries.clone()).unwrap();
        assert_eq!(store.read().get("2026-02-16"), Some(&entries));
    }

    #[test]
    fn write_day_replaces_the_whole_list() {
        let store = temp_store("replace");
        let first = vec![DayEntry { make_art: true, ..DayEntry::default() }];
        store.write_day(date(5, 1), first).unwrap();

        // An empty list is a valid state, not a delete-refusal.
        store.write_day(date(5, 1), Vec::new()).unwrap();
        assert_eq!(store.read().get("2026-05-01"), Some(&Vec::new()));
    }

    #[test]
    fn write_day_keeps_other_dates() {
        let store = temp_store("other-dates");
        let a = vec![DayEntry { make_art: true, ..DayEntry::default() }];
        let b = vec![DayEntry::custom()];
        store.write_day(date(1, 1), a.clone()).unwrap();
        store.write_day(date(12, 25), b.clone()).unwrap();

        let storage = store.read();
        assert_eq!(storage.get("2026-01-01"), Some(&a));
        assert_eq!(storage.get("2026-12-25"), Some(&b));
    }
}
