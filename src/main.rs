mod app;
mod calendar;
mod components;
mod theme;
mod tui;

use std::time::Duration;

use app::{App, InputMode};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};

fn main() -> Result<()> {
    color_eyre::install()?;

    let mut app = App::new()?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore();
        original_hook(panic_info);
    }));

    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app);
    tui::restore()?;
    result
}

fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

            let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);
            let content_area = layout[0];

            render_calendar_layout(frame, content_area, app);

            if let Some(ref editor) = app.editor {
                let events = app.day_events(editor.date);
                components::DayEditor::render(frame, area, editor, &events);
            }

            if app.show_help {
                render_help(frame, area);
            }

            render_status_bar(frame, layout[1], app);
        })?;

        if let Some(key) = tui::next_key_event(Duration::from_millis(100))? {
            // Clear status message on any key
            app.status_message = None;

            if app.show_help {
                if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
                    app.show_help = false;
                }
                continue;
            }

            match app.input_mode {
                InputMode::Normal => handle_normal_input(app, key.code, key.modifiers),
                InputMode::Search => handle_search_input(app, key.code, key.modifiers),
                InputMode::Editor => handle_editor_input(app, key.code, key.modifiers),
            }
        }
    }

    Ok(())
}

fn handle_normal_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.running = false;
        }
        (KeyCode::Char('t'), _) => app.go_to_today(),
        (KeyCode::Enter, _) => app.open_editor(),
        (KeyCode::Char('/'), _) => app.enter_search(),
        (KeyCode::Char('m'), _) => app.toggle_only_marked(),
        (KeyCode::Char('e'), _) => app.export_csv(),
        (KeyCode::Char('E'), _) => app.export_json(),
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) => app.prev_day(),
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => app.next_day(),
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.scroll_day_up(),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.scroll_day_down(),
        (KeyCode::Char('['), _) => app.prev_month(),
        (KeyCode::Char(']'), _) => app.next_month(),
        (KeyCode::Char('?'), _) => app.show_help = true,
        _ => {}
    }
}

fn handle_search_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match (code, modifiers) {
        (KeyCode::Esc, _) | (KeyCode::Enter, _) => app.leave_search(),
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => app.clear_search(),
        (KeyCode::Backspace, _) => {
            app.search_query.pop();
        }
        (KeyCode::Char(c), _) => app.search_query.push(c),
        _ => {}
    }
}

fn handle_editor_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match (code, modifiers) {
        (KeyCode::Esc, _) => app.cancel_editor(),
        (KeyCode::Enter, _) => app.commit_editor(),
        (KeyCode::Char('n'), KeyModifiers::CONTROL) => {
            if let Some(editor) = app.editor.as_mut() {
                editor.add_custom();
            }
        }
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => {
            if let Some(editor) = app.editor.as_mut() {
                editor.remove_entry();
            }
        }
        (KeyCode::Tab, _) => {
            if let Some(editor) = app.editor.as_mut() {
                editor.next_field();
            }
        }
        (KeyCode::BackTab, _) => {
            if let Some(editor) = app.editor.as_mut() {
                editor.prev_field();
            }
        }
        (KeyCode::Up, _) => {
            if let Some(editor) = app.editor.as_mut() {
                editor.prev_entry();
            }
        }
        (KeyCode::Down, _) => {
            if let Some(editor) = app.editor.as_mut() {
                editor.next_entry();
            }
        }
        (KeyCode::Backspace, _) => {
            if let Some(editor) = app.editor.as_mut() {
                editor.backspace();
            }
        }
        (KeyCode::Char(c), _) => {
            if let Some(editor) = app.editor.as_mut() {
                editor.input_char(c);
            }
        }
        _ => {}
    }
}

fn render_calendar_layout(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let cells = app.month_cells();

    if area.width < 60 {
        components::MonthView::render(frame, area, app.selected_date, app.today, &cells);
        return;
    }

    let month_w = if area.width >= 100 { 44 } else { 38 };
    let content =
        Layout::horizontal([Constraint::Length(month_w), Constraint::Min(20)]).split(area);

    components::MonthView::render(frame, content[0], app.selected_date, app.today, &cells);

    let events = app.day_events(app.selected_date);
    let entries = app.selected_entries();
    let status = app.day_status(app.selected_date);
    components::DayView::render(
        frame,
        content[1],
        app.selected_date,
        &events,
        &entries,
        status,
        app.day_scroll,
    );
}

fn render_status_bar(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    use ratatui::text::{Line, Span};
    use ratatui::widgets::Paragraph;

    let w = area.width as usize;

    let mode_str = match app.input_mode {
        InputMode::Normal => "Arte 2026",
        InputMode::Search => "[Search]",
        InputMode::Editor => "[Edit]",
    };

    let mut left = format!(" {} ", mode_str);
    if !app.search_query.is_empty() || app.input_mode == InputMode::Search {
        left.push_str(&format!("/{} ", app.search_query));
    }
    if app.only_marked {
        left.push_str("[marked] ");
    }

    let right_text = if let Some(ref msg) = app.status_message {
        format!(" {} ", msg)
    } else {
        match app.input_mode {
            InputMode::Search => " type to filter  Esc:Done ^U:Clear".to_string(),
            InputMode::Editor => " Tab:Field Enter:Save Esc:Cancel".to_string(),
            InputMode::Normal if w >= 90 => {
                " hjkl:Nav [/]:Mon t:Today Enter:Edit /:Search m:Marked e/E:Export ?:Help q:Quit"
                    .to_string()
            }
            InputMode::Normal if w >= 50 => {
                " Enter:Edit /:Search m:Marked q:Quit".to_string()
            }
            InputMode::Normal => " ?:Help q:Quit".to_string(),
        }
    };

    let padding_len = w.saturating_sub(left.chars().count() + right_text.chars().count());
    let padding = " ".repeat(padding_len);

    let line = Line::from(vec![
        Span::styled(left, theme::current().status),
        Span::styled(padding, theme::current().status),
        Span::styled(right_text, theme::current().status),
    ]);

    frame.render_widget(Paragraph::new(line).style(theme::current().status), area);
}

fn render_help(frame: &mut ratatui::Frame, area: Rect) {
    use ratatui::style::{Modifier, Style};
    use ratatui::text::{Line, Span};
    use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

    let popup_w = area.width.min(52).max(30);
    let popup_h = area.height.min(22).max(12);
    let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keybindings ")
        .title_style(theme::current().header)
        .borders(Borders::ALL)
        .border_style(theme::current().accent);

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = theme::current().accent.add_modifier(Modifier::BOLD);
    let desc_style = Style::default();
    let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    let lines = vec![
        Line::from(Span::styled("Navigation", section_style)),
        Line::from(vec![
            Span::styled("  h/l ", key_style),
            Span::styled("or ", theme::current().dim),
            Span::styled("\u{2190}/\u{2192}  ", key_style),
            Span::styled("Previous/next day", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  [/]       ", key_style),
            Span::styled("Previous/next month", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  t         ", key_style),
            Span::styled("Jump to today", desc_style),
        ]),
        Line::from(""),
        Line::from(Span::styled("Filters", section_style)),
        Line::from(vec![
            Span::styled("  /         ", key_style),
            Span::styled("Search titles and summaries", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  m         ", key_style),
            Span::styled("Only days marked for art", desc_style),
        ]),
        Line::from(""),
        Line::from(Span::styled("Planning", section_style)),
        Line::from(vec![
            Span::styled("  Enter     ", key_style),
            Span::styled("Edit the selected day", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  ^N / ^D   ", key_style),
            Span::styled("Add / remove a custom event (in editor)", desc_style),
        ]),
        Line::from(""),
        Line::from(Span::styled("Export", section_style)),
        Line::from(vec![
            Span::styled("  e / E     ", key_style),
            Span::styled("Write the CSV / JSON artifact", desc_style),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  q", key_style),
            Span::styled(" / ", theme::current().dim),
            Span::styled("Esc     ", key_style),
            Span::styled("Quit / close popup", desc_style),
        ]),
    ];

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}
