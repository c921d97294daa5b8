use chrono::{Local, NaiveDate, SecondsFormat};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::calendar::day::CUSTOM_TITLE_PLACEHOLDER;
use crate::calendar::{DayEntry, Event, Scope};
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorField {
    MakeArt,
    Done,
    Description,
    CustomTitle,
    CustomSummary,
}

const DEFAULT_FIELDS: [EditorField; 3] =
    [EditorField::MakeArt, EditorField::Done, EditorField::Description];
const CUSTOM_FIELDS: [EditorField; 5] = [
    EditorField::CustomTitle,
    EditorField::CustomSummary,
    EditorField::MakeArt,
    EditorField::Done,
    EditorField::Description,
];

/// Working copy of one date's entry list. Nothing here touches the store;
/// the caller persists the list on commit and drops it on cancel.
#[derive(Debug, Clone)]
pub struct DayEditorState {
    pub date: NaiveDate,
    pub entries: Vec<DayEntry>,
    pub cursor: usize,
    pub field: EditorField,
}

impl DayEditorState {
    /// Seed from storage; an untouched date starts with a single blank entry.
    pub fn new(date: NaiveDate, stored: Vec<DayEntry>) -> Self {
        let entries = if stored.is_empty() {
            vec![DayEntry::default()]
        } else {
            stored
        };
        let field = first_field(&entries[0]);
        Self {
            date,
            entries,
            cursor: 0,
            field,
        }
    }

    fn fields(&self) -> &'static [EditorField] {
        match self.entries.get(self.cursor) {
            Some(e) if e.is_custom => &CUSTOM_FIELDS,
            _ => &DEFAULT_FIELDS,
        }
    }

    pub fn next_field(&mut self) {
        let fields = self.fields();
        let pos = fields.iter().position(|f| *f == self.field).unwrap_or(0);
        self.field = fields[(pos + 1) % fields.len()];
    }

    pub fn prev_field(&mut self) {
        let fields = self.fields();
        let pos = fields.iter().position(|f| *f == self.field).unwrap_or(0);
        self.field = fields[(pos + fields.len() - 1) % fields.len()];
    }

    pub fn next_entry(&mut self) {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
            self.field = first_field(&self.entries[self.cursor]);
        }
    }

    pub fn prev_entry(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.field = first_field(&self.entries[self.cursor]);
        }
    }

    /// Toggle the entry's make_art flag. Turning it off forces done off in
    /// the same update: done implies make_art.
    pub fn toggle_make_art(&mut self) {
        let Some(entry) = self.entries.get_mut(self.cursor) else {
            return;
        };
        entry.make_art = !entry.make_art;
        if !entry.make_art {
            entry.done = false;
        }
        entry.updated_at = Some(now_stamp());
    }

    /// Toggle done. Meaningless without make_art; the transition to done
    /// stamps done_at.
    pub fn toggle_done(&mut self) {
        let Some(entry) = self.entries.get_mut(self.cursor) else {
            return;
        };
        if !entry.make_art {
            return;
        }
        entry.done = !entry.done;
        let stamp = now_stamp();
        if entry.done {
            entry.done_at = Some(stamp.clone());
        }
        entry.updated_at = Some(stamp);
    }

    /// Space toggles on the flag fields and types on the text fields.
    pub fn input_char(&mut self, c: char) {
        match self.field {
            EditorField::MakeArt => {
                if c == ' ' {
                    self.toggle_make_art();
                }
            }
            EditorField::Done => {
                if c == ' ' {
                    self.toggle_done();
                }
            }
            _ => {
                let field = self.field;
                if let Some(entry) = self.entries.get_mut(self.cursor) {
                    text_field_mut(entry, field).push(c);
                    entry.updated_at = Some(now_stamp());
                }
            }
        }
    }

    pub fn backspace(&mut self) {
        let field = self.field;
        if matches!(field, EditorField::MakeArt | EditorField::Done) {
            return;
        }
        if let Some(entry) = self.entries.get_mut(self.cursor) {
            if text_field_mut(entry, field).pop().is_some() {
                entry.updated_at = Some(now_stamp());
            }
        }
    }

    /// Append a custom ad-hoc event entry and move the cursor onto it.
    pub fn add_custom(&mut self) {
        self.entries.push(DayEntry::custom());
        self.cursor = self.entries.len() - 1;
        self.field = EditorField::CustomTitle;
    }

    /// Delete the cursored entry. An empty list is a valid outcome: no task
    /// and no custom events for the date.
    pub fn remove_entry(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.entries.remove(self.cursor);
        if self.cursor >= self.entries.len() && self.cursor > 0 {
            self.cursor -= 1;
        }
        if let Some(entry) = self.entries.get(self.cursor) {
            self.field = first_field(entry);
        }
    }

    /// The full working list, handed to `Store::write_day` on commit.
    pub fn into_entries(self) -> Vec<DayEntry> {
        self.entries
    }
}

fn first_field(entry: &DayEntry) -> EditorField {
    if entry.is_custom {
        EditorField::CustomTitle
    } else {
        EditorField::MakeArt
    }
}

fn text_field_mut(entry: &mut DayEntry, field: EditorField) -> &mut String {
    match field {
        EditorField::Description => &mut entry.description,
        EditorField::CustomTitle => &mut entry.custom_title,
        EditorField::CustomSummary => &mut entry.custom_summary,
        EditorField::MakeArt | EditorField::Done => unreachable!("not a text field"),
    }
}

fn now_stamp() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Secs, false)
}

pub struct DayEditor;

impl DayEditor {
    /// Centered modal overlay: the day's official events on top, then the
    /// editable entry list.
    pub fn render(frame: &mut Frame, area: Rect, state: &DayEditorState, events: &[Event]) {
        let popup_w = area.width.min(64).max(34);
        let popup_h = area.height.min(26).max(12);
        let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
        let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
        let popup_area = Rect::new(x, y, popup_w, popup_h);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(format!(" {} ", state.date.format("%A, %d/%m/%Y")))
            .title_style(theme::current().header)
            .borders(Borders::ALL)
            .border_style(theme::current().accent);

        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let mut lines: Vec<Line> = Vec::new();

        let official: Vec<&Event> = events.iter().filter(|e| e.scope != Scope::Custom).collect();
        if official.is_empty() {
            lines.push(Line::from(Span::styled(
                "No official events on this date.",
                theme::current().dim,
            )));
        } else {
            for event in official {
                lines.push(Line::from(vec![
                    Span::styled(event.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(
                        format!("  {} · {}", event.scope.label(), event.kind.label()),
                        theme::current().dim,
                    ),
                ]));
            }
        }
        lines.push(Line::from(""));

        if state.entries.is_empty() {
            lines.push(Line::from(Span::styled(
                "No entries. Enter saves the empty list; Ctrl-N adds a custom event.",
                theme::current().dim,
            )));
        }

        for (idx, entry) in state.entries.iter().enumerate() {
            let is_current = idx == state.cursor;
            let marker = if is_current { ">" } else { " " };
            let head = if entry.is_custom {
                let title = if entry.custom_title.is_empty() {
                    CUSTOM_TITLE_PLACEHOLDER
                } else {
                    entry.custom_title.as_str()
                };
                format!("{marker} Custom: {title}")
            } else {
                format!("{marker} Day plan")
            };
            let head_style = if is_current {
                theme::current().accent.add_modifier(Modifier::BOLD)
            } else {
                theme::current().header
            };
            lines.push(Line::from(Span::styled(head, head_style)));

            if entry.is_custom {
                lines.push(field_line(
                    "Title",
                    &entry.custom_title,
                    is_current && state.field == EditorField::CustomTitle,
                ));
                lines.push(field_line(
                    "Summary",
                    &entry.custom_summary,
                    is_current && state.field == EditorField::CustomSummary,
                ));
            }
            lines.push(flag_line(
                "Make art",
                entry.make_art,
                is_current && state.field == EditorField::MakeArt,
            ));
            lines.push(flag_line(
                "Done",
                entry.done,
                is_current && state.field == EditorField::Done,
            ));
            lines.push(field_line(
                "Briefing",
                &entry.description,
                is_current && state.field == EditorField::Description,
            ));
            lines.push(Line::from(""));
        }

        lines.push(Line::from(vec![
            Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Field ", theme::current().dim),
            Span::styled("\u{2191}\u{2193}", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Entry ", theme::current().dim),
            Span::styled("^N", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Custom ", theme::current().dim),
            Span::styled("^D", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Remove ", theme::current().dim),
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Save ", theme::current().dim),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Cancel", theme::current().dim),
        ]));

        let para = Paragraph::new(lines).wrap(Wrap { trim: false });
        frame.render_widget(para, inner);
    }
}

fn field_line(label: &str, value: &str, active: bool) -> Line<'static> {
    let cursor = if active { "_" } else { "" };
    let style = if active {
        theme::current().accent
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(format!("   {:<9}", format!("{label}:")), theme::current().dim),
        Span::styled(format!("{value}{cursor}"), style),
    ])
}

fn flag_line(label: &str, value: bool, active: bool) -> Line<'static> {
    let mark = if value { "[x]" } else { "[ ]" };
    let style = if active {
        theme::current().accent
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled("   ", Style::default()),
        Span::styled(format!("{mark} {label}"), style),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor(entries: Vec<DayEntry>) -> DayEditorState {
        let date = NaiveDate::from_ymd_opt(2026, 2, 16).unwrap();
        DayEditorState::new(date, entries)
    }

    #[test]
    fn empty_storage_seeds_one_blank_entry() {
        let state = editor(Vec::new());
        assert_eq!(state.entries, vec![DayEntry::default()]);
        assert_eq!(state.field, EditorField::MakeArt);
    }

    #[test]
    fn toggling_make_art_stamps_updated_at() {
        let mut state = editor(Vec::new());
        assert!(state.entries[0].updated_at.is_none());
        state.toggle_make_art();
        assert!(state.entries[0].make_art);
        assert!(state.entries[0].updated_at.is_some());
    }

    #[test]
    fn unmarking_make_art_forces_done_off() {
        let mut state = editor(vec![DayEntry {
            make_art: true,
            done: true,
            ..DayEntry::default()
        }]);
        state.toggle_make_art();
        assert!(!state.entries[0].make_art);
        assert!(!state.entries[0].done);
    }

    #[test]
    fn done_needs_make_art_and_stamps_done_at_on_transition() {
        let mut state = editor(Vec::new());
        state.toggle_done();
        assert!(!state.entries[0].done, "done without make_art is ignored");

        state.toggle_make_art();
        state.toggle_done();
        assert!(state.entries[0].done);
        assert!(state.entries[0].done_at.is_some());

        // Untoggling keeps the historical done_at.
        let stamp = state.entries[0].done_at.clone();
        state.toggle_done();
        assert!(!state.entries[0].done);
        assert_eq!(state.entries[0].done_at, stamp);
    }

    #[test]
    fn add_custom_appends_and_focuses_title() {
        let mut state = editor(Vec::new());
        state.add_custom();
        assert_eq!(state.entries.len(), 2);
        assert!(state.entries[1].is_custom);
        assert_eq!(state.cursor, 1);
        assert_eq!(state.field, EditorField::CustomTitle);

        state.input_char('F');
        state.input_char('é');
        assert_eq!(state.entries[1].custom_title, "Fé");
    }

    #[test]
    fn remove_entry_may_leave_the_list_empty() {
        let mut state = editor(Vec::new());
        state.remove_entry();
        assert!(state.entries.is_empty());
        // Further edits on the empty list are no-ops, not panics.
        state.toggle_make_art();
        state.backspace();
        state.remove_entry();
        assert!(state.into_entries().is_empty());
    }

    #[test]
    fn field_cycle_depends_on_entry_kind() {
        let mut state = editor(Vec::new());
        assert_eq!(state.field, EditorField::MakeArt);
        state.next_field();
        assert_eq!(state.field, EditorField::Done);
        state.next_field();
        assert_eq!(state.field, EditorField::Description);
        state.next_field();
        assert_eq!(state.field, EditorField::MakeArt);

        state.add_custom();
        state.prev_field();
        assert_eq!(state.field, EditorField::Description);
    }

    #[test]
    fn typing_in_description_stamps_updated_at() {
        let mut state = editor(Vec::new());
        state.next_field();
        state.next_field();
        assert_eq!(state.field, EditorField::Description);
        state.input_char('o');
        state.input_char('i');
        assert_eq!(state.entries[0].description, "oi");
        assert!(state.entries[0].updated_at.is_some());

        state.backspace();
        assert_eq!(state.entries[0].description, "o");
    }
}
