use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::calendar::day::CUSTOM_TITLE_PLACEHOLDER;
use crate::calendar::{DayEntry, DayStatus, Event, EventKind};
use crate::theme;

pub struct DayView;

impl DayView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        date: NaiveDate,
        events: &[Event],
        entries: &[DayEntry],
        status: DayStatus,
        scroll: usize,
    ) {
        let w = area.width as usize;

        let title = if w >= 30 {
            format!(" {} ", date.format("%A, %d %B %Y"))
        } else {
            format!(" {} ", date.format("%d/%m"))
        };

        let badge = if status.is_done {
            " feito ✓ "
        } else if status.has_task {
            " fazer arte * "
        } else {
            ""
        };
        let badge_style = if status.is_done {
            theme::current().done
        } else {
            theme::current().marked
        };

        let block = Block::default()
            .title(title)
            .title_style(theme::current().header)
            .title_bottom(Line::from(Span::styled(badge, badge_style)))
            .borders(Borders::ALL)
            .border_style(theme::current().border);

        if events.is_empty() && entries.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let msg = Paragraph::new("No events. Enter to plan this day.")
                .style(theme::current().dim);
            frame.render_widget(msg, inner);
            return;
        }

        let mut items: Vec<ListItem> = Vec::new();

        if !events.is_empty() {
            items.push(ListItem::new(Line::from(Span::styled(
                "Events",
                Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ))));
            for event in events {
                items.push(format_event(event));
                if !event.summary.is_empty() && w >= 40 {
                    items.push(ListItem::new(Line::from(Span::styled(
                        format!("    {}", event.summary),
                        theme::current().dim,
                    ))));
                }
            }
        }

        if !entries.is_empty() {
            if !events.is_empty() {
                items.push(ListItem::new(Line::from("")));
            }
            items.push(ListItem::new(Line::from(Span::styled(
                "Planning",
                Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ))));
            for entry in entries {
                items.push(format_entry(entry));
            }
        }

        let visible: Vec<ListItem> = items.into_iter().skip(scroll).collect();
        let list = List::new(visible).block(block);
        frame.render_widget(list, area);
    }
}

fn format_event(event: &Event) -> ListItem<'static> {
    let title_style = if event.kind == EventKind::Holiday {
        theme::current().holiday
    } else {
        Style::default()
    };
    ListItem::new(Line::from(vec![
        Span::styled(format!("  {}", event.title), title_style),
        Span::styled(
            format!(" ({} · {})", event.scope.label(), event.kind.label()),
            theme::current().dim,
        ),
    ]))
}

fn format_entry(entry: &DayEntry) -> ListItem<'static> {
    let checkbox = if !entry.make_art {
        " [ ] "
    } else if entry.done {
        " [x] "
    } else {
        " [*] "
    };

    let label = if entry.is_custom {
        if entry.custom_title.is_empty() {
            CUSTOM_TITLE_PLACEHOLDER.to_string()
        } else {
            entry.custom_title.clone()
        }
    } else {
        "fazer arte".to_string()
    };

    let label_style = if entry.done {
        Style::default().add_modifier(Modifier::DIM | Modifier::CROSSED_OUT)
    } else {
        Style::default()
    };

    let mut spans = vec![
        Span::styled(checkbox.to_string(), Style::default()),
        Span::styled(label, label_style),
    ];

    if !entry.description.is_empty() {
        spans.push(Span::styled(
            format!(" · {}", entry.description),
            theme::current().dim,
        ));
    }

    ListItem::new(Line::from(spans))
}
