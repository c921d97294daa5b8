use chrono::{Datelike, Local, NaiveDate};
use color_eyre::Result;

use crate::calendar::export;
use crate::calendar::{
    date_key, events_for_day, matches_query, status_for_day, CalendarStorage, Dataset, DayEntry,
    DayStatus, Event, Store,
};
use crate::components::day_editor::DayEditorState;
use crate::components::DayCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Editor,
}

pub struct App {
    pub running: bool,
    pub input_mode: InputMode,
    pub selected_date: NaiveDate,
    pub today: NaiveDate,
    pub search_query: String,
    pub only_marked: bool,
    pub editor: Option<DayEditorState>,
    pub status_message: Option<String>,
    pub show_help: bool,
    pub day_scroll: usize,
    pub dataset: Dataset,
    pub storage: CalendarStorage,
    store: Store,
}

impl App {
    pub fn new() -> Result<Self> {
        let dataset = Dataset::load()?;
        Ok(Self::with_parts(dataset, Store::new()))
    }

    pub fn with_parts(dataset: Dataset, store: Store) -> Self {
        let today = Local::now().date_naive();
        // The planner targets 2026; outside that year it opens on January
        // 2026 for planning ahead.
        let selected_date = if today.year() == 2026 {
            today
        } else {
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
        };
        let storage = store.read();

        Self {
            running: true,
            input_mode: InputMode::Normal,
            selected_date,
            today,
            search_query: String::new(),
            only_marked: false,
            editor: None,
            status_message: None,
            show_help: false,
            day_scroll: 0,
            dataset,
            storage,
            store,
        }
    }

    // ── aggregation over the current snapshot ──

    pub fn day_events(&self, date: NaiveDate) -> Vec<Event> {
        events_for_day(date, &self.dataset, &self.storage)
    }

    pub fn day_status(&self, date: NaiveDate) -> DayStatus {
        status_for_day(date, &self.storage)
    }

    pub fn selected_entries(&self) -> Vec<DayEntry> {
        self.storage
            .get(&date_key(self.selected_date))
            .cloned()
            .unwrap_or_default()
    }

    /// A day is suppressed when a non-empty query matches none of its events,
    /// or when the only-marked switch is on and it has no task. Suppressed
    /// days stay in the grid dimmed.
    pub fn is_suppressed(&self, date: NaiveDate) -> bool {
        if self.only_marked && !self.day_status(date).has_task {
            return true;
        }
        if !self.search_query.is_empty() {
            let events = self.day_events(date);
            return !events
                .iter()
                .any(|e| matches_query(e, &self.search_query));
        }
        false
    }

    /// One cell per day of the displayed month; length tracks the month, not
    /// the filters, so grid geometry is stable.
    pub fn month_cells(&self) -> Vec<DayCell> {
        let year = self.selected_date.year();
        let month = self.selected_date.month();
        (1..=days_in_month(year, month))
            .map(|day| {
                let date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
                DayCell {
                    status: self.day_status(date),
                    has_events: !self.day_events(date).is_empty(),
                    suppressed: self.is_suppressed(date),
                }
            })
            .collect()
    }

    // ── navigation ──

    pub fn next_day(&mut self) {
        self.selected_date = self.selected_date.succ_opt().unwrap_or(self.selected_date);
        self.day_scroll = 0;
    }

    pub fn prev_day(&mut self) {
        self.selected_date = self.selected_date.pred_opt().unwrap_or(self.selected_date);
        self.day_scroll = 0;
    }

    pub fn next_month(&mut self) {
        let month = self.selected_date.month();
        let year = self.selected_date.year();
        let (new_year, new_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
        let day = self.selected_date.day().min(days_in_month(new_year, new_month));
        self.selected_date = NaiveDate::from_ymd_opt(new_year, new_month, day).unwrap();
        self.day_scroll = 0;
    }

    pub fn prev_month(&mut self) {
        let month = self.selected_date.month();
        let year = self.selected_date.year();
        let (new_year, new_month) = if month == 1 { (year - 1, 12) } else { (year, month - 1) };
        let day = self.selected_date.day().min(days_in_month(new_year, new_month));
        self.selected_date = NaiveDate::from_ymd_opt(new_year, new_month, day).unwrap();
        self.day_scroll = 0;
    }

    pub fn go_to_today(&mut self) {
        self.today = Local::now().date_naive();
        self.selected_date = if self.today.year() == 2026 {
            self.today
        } else {
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
        };
        self.day_scroll = 0;
    }

    pub fn scroll_day_up(&mut self) {
        self.day_scroll = self.day_scroll.saturating_sub(1);
    }

    pub fn scroll_day_down(&mut self) {
        self.day_scroll += 1;
    }

    // ── filters ──

    pub fn toggle_only_marked(&mut self) {
        self.only_marked = !self.only_marked;
    }

    pub fn enter_search(&mut self) {
        self.input_mode = InputMode::Search;
    }

    pub fn leave_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
    }

    // ── editor lifecycle ──

    /// Filtered-out days open all the same; suppression is visual only.
    pub fn open_editor(&mut self) {
        let stored = self.selected_entries();
        self.editor = Some(DayEditorState::new(self.selected_date, stored));
        self.input_mode = InputMode::Editor;
    }

    pub fn cancel_editor(&mut self) {
        self.editor = None;
        self.input_mode = InputMode::Normal;
    }

    /// Persist the working list as the date's full entry list and re-read
    /// the snapshot.
    pub fn commit_editor(&mut self) {
        let Some(editor) = self.editor.take() else {
            return;
        };
        let date = editor.date;
        match self.store.write_day(date, editor.into_entries()) {
            Ok(()) => self.storage = self.store.read(),
            Err(err) => self.status_message = Some(format!("Save failed: {err}")),
        }
        self.input_mode = InputMode::Normal;
    }

    // ── export ──

    pub fn export_csv(&mut self) {
        let records = export::build_records(&self.dataset, &self.store.read(), self.only_marked);
        self.status_message = match export::write_csv(&records) {
            Ok(path) => Some(format!("{} records -> {}", records.len(), path.display())),
            Err(err) => Some(format!("Export failed: {err}")),
        };
    }

    pub fn export_json(&mut self) {
        let records = export::build_records(&self.dataset, &self.store.read(), self.only_marked);
        self.status_message = match export::write_json(&records) {
            Ok(path) => Some(format!("{} records -> {}", records.len(), path.display())),
            Err(err) => Some(format!("Export failed: {err}")),
        };
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .unwrap()
    .signed_duration_since(NaiveDate::from_ymd_opt(year, month, 1).unwrap())
    .num_days() as u32
}
