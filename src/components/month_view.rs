use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::calendar::DayStatus;
use crate::theme;

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// Per-day render input for the displayed month, indexed by day - 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct DayCell {
    pub status: DayStatus,
    pub has_events: bool,
    /// Filtered out by search or the only-marked switch. The day stays in
    /// the grid dimmed; geometry never changes.
    pub suppressed: bool,
}

pub struct MonthView;

impl MonthView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        selected_date: NaiveDate,
        today: NaiveDate,
        cells: &[DayCell],
    ) {
        let year = selected_date.year();
        let month = selected_date.month();

        let title = format!(" {} {} ", MONTH_NAMES[(month - 1) as usize], year);

        let block = Block::default()
            .title(title)
            .title_style(theme::current().header)
            .borders(Borders::ALL)
            .border_style(theme::current().border);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let header_cells: Vec<Span> = DAY_NAMES
            .iter()
            .map(|d| Span::styled(format!("{:^5}", d), theme::current().header))
            .collect();
        let header = Line::from(header_cells);

        let first_day = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
        let first_weekday = first_day.weekday().num_days_from_sunday() as usize;
        let days_in_month = cells.len() as i32;

        let mut weeks: Vec<Line> = Vec::new();
        let mut current_day: i32 = 1 - first_weekday as i32;

        while current_day <= days_in_month {
            let mut row: Vec<Span> = Vec::new();
            for _ in 0..7 {
                if current_day < 1 || current_day > days_in_month {
                    row.push(Span::raw("     "));
                } else {
                    let day = current_day as u32;
                    let date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
                    let cell = cells[(day - 1) as usize];

                    let marker = if cell.status.is_done {
                        '✓'
                    } else if cell.status.has_task {
                        '*'
                    } else if cell.has_events {
                        '·'
                    } else {
                        ' '
                    };

                    let style = if date == today && date == selected_date {
                        theme::current().today.add_modifier(Modifier::BOLD)
                    } else if date == selected_date {
                        theme::current().selected
                    } else if date == today {
                        theme::current().today
                    } else if cell.suppressed {
                        theme::current().dim
                    } else if cell.status.is_done {
                        theme::current().done
                    } else if cell.status.has_task {
                        theme::current().marked
                    } else {
                        Style::default()
                    };

                    row.push(Span::styled(format!(" {:>2}{} ", day, marker), style));
                }
                current_day += 1;
            }
            weeks.push(Line::from(row));
        }

        let mut constraints = vec![Constraint::Length(1)];
        for _ in &weeks {
            constraints.push(Constraint::Length(1));
        }
        constraints.push(Constraint::Min(0));

        let rows = Layout::vertical(constraints).split(inner);

        frame.render_widget(Paragraph::new(header), rows[0]);
        for (i, week) in weeks.iter().enumerate() {
            frame.render_widget(Paragraph::new(week.clone()), rows[i + 1]);
        }
    }
}
