use chrono::NaiveDate;

use super::entry::{date_key, CalendarStorage};
use super::event::{Dataset, Event, EventKind, Scope};

/// Display title for a custom entry whose title was left blank.
pub const CUSTOM_TITLE_PLACEHOLDER: &str = "Evento Especial";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayStatus {
    pub has_task: bool,
    pub is_done: bool,
}

/// Dataset events for `date` followed by one synthesized event per stored
/// custom entry, in storage order. Pure read of the snapshot.
pub fn events_for_day(
    date: NaiveDate,
    dataset: &Dataset,
    storage: &CalendarStorage,
) -> Vec<Event> {
    let key = date_key(date);
    let mut events: Vec<Event> = dataset.events_on(date).into_iter().cloned().collect();

    if let Some(entries) = storage.get(&key) {
        for (idx, entry) in entries.iter().filter(|e| e.is_custom).enumerate() {
            let title = if entry.custom_title.is_empty() {
                CUSTOM_TITLE_PLACEHOLDER.to_string()
            } else {
                entry.custom_title.clone()
            };
            events.push(Event {
                id: format!("custom-{key}-{idx}"),
                date,
                title,
                summary: entry.custom_summary.clone(),
                scope: Scope::Custom,
                kind: EventKind::Commemorative,
            });
        }
    }

    events
}

/// Aggregate task state for `date`. `has_task` iff any entry is marked
/// make_art; `is_done` only when `has_task` holds and every marked entry is
/// done. Entries without make_art never affect `is_done`.
pub fn status_for_day(date: NaiveDate, storage: &CalendarStorage) -> DayStatus {
    let Some(entries) = storage.get(&date_key(date)) else {
        return DayStatus::default();
    };
    let has_task = entries.iter().any(|e| e.make_art);
    let is_done = has_task && entries.iter().filter(|e| e.make_art).all(|e| e.done);
    DayStatus { has_task, is_done }
}

/// Case-insensitive substring match against title and summary.
pub fn matches_query(event: &Event, query: &str) -> bool {
    let q = query.to_lowercase();
    event.title.to_lowercase().contains(&q) || event.summary.to_lowercase().contains(&q)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::entry::DayEntry;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn holiday_on(d: NaiveDate) -> Dataset {
        Dataset::new(vec![Event {
            id: "test-holiday".to_string(),
            date: d,
            title: "Feriado de Teste".to_string(),
            summary: "Um feriado para os testes.".to_string(),
            scope: Scope::National,
            kind: EventKind::Holiday,
        }])
    }

    #[test]
    fn status_is_false_false_without_entries() {
        let storage = CalendarStorage::new();
        let status = status_for_day(date(2026, 5, 1), &storage);
        assert_eq!(status, DayStatus { has_task: false, is_done: false });
    }

    #[test]
    fn all_unmarked_entries_gate_is_done_off() {
        // "every marked entry is done" is vacuously true here; has_task must
        // still gate is_done to false.
        let d = date(2026, 3, 10);
        let mut storage = CalendarStorage::new();
        storage.insert(date_key(d), vec![DayEntry::default(), DayEntry::custom()]);
        let status = status_for_day(d, &storage);
        assert!(!status.has_task);
        assert!(!status.is_done);
    }

    #[test]
    fn done_requires_every_marked_entry_done() {
        let d = date(2026, 3, 11);
        let marked_done = DayEntry { make_art: true, done: true, ..DayEntry::default() };
        let marked_open = DayEntry { make_art: true, ..DayEntry::default() };
        let unmarked = DayEntry::default();

        let mut storage = CalendarStorage::new();
        storage.insert(
            date_key(d),
            vec![marked_done.clone(), marked_open, unmarked.clone()],
        );
        let status = status_for_day(d, &storage);
        assert!(status.has_task);
        assert!(!status.is_done);

        // The unmarked entry must not block completion.
        storage.insert(date_key(d), vec![marked_done, unmarked]);
        let status = status_for_day(d, &storage);
        assert_eq!(status, DayStatus { has_task: true, is_done: true });
    }

    #[test]
    fn custom_entries_become_events_after_dataset_ones() {
        let d = date(2026, 2, 16);
        let dataset = holiday_on(d);

        let named = DayEntry {
            custom_title: "Feira de artesanato".to_string(),
            custom_summary: "praça central".to_string(),
            ..DayEntry::custom()
        };
        let unnamed = DayEntry::custom();

        let mut storage = CalendarStorage::new();
        storage.insert(date_key(d), vec![DayEntry::default(), named, unnamed]);

        let events = events_for_day(d, &dataset, &storage);
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].id, "test-holiday");
        assert_eq!(events[1].title, "Feira de artesanato");
        assert_eq!(events[1].scope, Scope::Custom);
        assert_eq!(events[1].id, "custom-2026-02-16-0");
        // Blank title falls back to the placeholder, display-time only.
        assert_eq!(events[2].title, CUSTOM_TITLE_PLACEHOLDER);
        assert_eq!(events[2].id, "custom-2026-02-16-1");
    }

    #[test]
    fn plan_then_finish_scenario() {
        // Dataset has one holiday on 2026-02-16. The user marks make_art,
        // saves, then later marks done.
        let d = date(2026, 2, 16);
        let dataset = holiday_on(d);
        let mut storage = CalendarStorage::new();

        assert!(!events_for_day(d, &dataset, &storage).is_empty());

        let mut entry = DayEntry { make_art: true, ..DayEntry::default() };
        storage.insert(date_key(d), vec![entry.clone()]);
        assert_eq!(
            status_for_day(d, &storage),
            DayStatus { has_task: true, is_done: false }
        );

        entry.done = true;
        storage.insert(date_key(d), vec![entry]);
        assert_eq!(
            status_for_day(d, &storage),
            DayStatus { has_task: true, is_done: true }
        );
    }

    #[test]
    fn query_match_ignores_case_and_checks_summary() {
        let d = date(2026, 2, 16);
        let dataset = holiday_on(d);
        let storage = CalendarStorage::new();
        let events = events_for_day(d, &dataset, &storage);

        assert!(matches_query(&events[0], "FERIADO"));
        assert!(matches_query(&events[0], "testes"));
        assert!(!matches_query(&events[0], "carnaval"));
    }
}
