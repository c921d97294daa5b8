use std::path::PathBuf;
use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Get the active theme (loaded once on first call).
pub fn current() -> &'static Theme {
    THEME.get_or_init(|| Theme::load().unwrap_or_default())
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub dim: Style,
    pub border: Style,
    pub status: Style,
    pub selected: Style,
    pub today: Style,
    pub marked: Style,
    pub done: Style,
    pub holiday: Style,
    pub accent: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::DarkGray),
            border: Style::default().fg(Color::Gray),
            status: Style::default().fg(Color::White).bg(Color::DarkGray),
            selected: Style::default().fg(Color::Black).bg(Color::Cyan),
            today: Style::default().fg(Color::Black).bg(Color::Yellow),
            marked: Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            done: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            holiday: Style::default().fg(Color::Red),
            accent: Style::default().fg(Color::Cyan),
        }
    }
}

impl Theme {
    fn load() -> Option<Self> {
        let path = config_path()?;
        if !path.exists() {
            return None;
        }
        let content = std::fs::read_to_string(&path).ok()?;
        let config: ThemeConfig = toml::from_str(&content).ok()?;
        Some(config.into_theme())
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("arte-tui").join("theme.toml"))
}

/// Flat color overrides; anything absent keeps the default.
#[derive(Debug, Deserialize, Default)]
struct ThemeConfig {
    header: Option<String>,
    dim: Option<String>,
    border: Option<String>,
    status_fg: Option<String>,
    status_bg: Option<String>,
    selected_bg: Option<String>,
    today_bg: Option<String>,
    marked: Option<String>,
    done: Option<String>,
    holiday: Option<String>,
    accent: Option<String>,
}

impl ThemeConfig {
    fn into_theme(self) -> Theme {
        let mut theme = Theme::default();
        if let Some(c) = self.header.as_deref().and_then(parse_color) {
            theme.header = theme.header.fg(c);
        }
        if let Some(c) = self.dim.as_deref().and_then(parse_color) {
            theme.dim = theme.dim.fg(c);
        }
        if let Some(c) = self.border.as_deref().and_then(parse_color) {
            theme.border = theme.border.fg(c);
        }
        if let Some(c) = self.status_fg.as_deref().and_then(parse_color) {
            theme.status = theme.status.fg(c);
        }
        if let Some(c) = self.status_bg.as_deref().and_then(parse_color) {
            theme.status = theme.status.bg(c);
        }
        if let Some(c) = self.selected_bg.as_deref().and_then(parse_color) {
            theme.selected = theme.selected.bg(c);
        }
        if let Some(c) = self.today_bg.as_deref().and_then(parse_color) {
            theme.today = theme.today.bg(c);
        }
        if let Some(c) = self.marked.as_deref().and_then(parse_color) {
            theme.marked = theme.marked.fg(c);
        }
        if let Some(c) = self.done.as_deref().and_then(parse_color) {
            theme.done = theme.done.fg(c);
        }
        if let Some(c) = self.holiday.as_deref().and_then(parse_color) {
            theme.holiday = theme.holiday.fg(c);
        }
        if let Some(c) = self.accent.as_deref().and_then(parse_color) {
            theme.accent = theme.accent.fg(c);
        }
        theme
    }
}

/// Parse a color string: hex "#rrggbb" or a named terminal color.
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() == 6 {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some(Color::Rgb(r, g, b));
        }
        return None;
    }
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_and_named_colors_parse() {
        assert_eq!(parse_color("#ff8000"), Some(Color::Rgb(255, 128, 0)));
        assert_eq!(parse_color("magenta"), Some(Color::Magenta));
        assert_eq!(parse_color("#zzz"), None);
        assert_eq!(parse_color("chartreuse"), None);
    }

    #[test]
    fn overrides_apply_on_top_of_defaults() {
        let config: ThemeConfig = toml::from_str("marked = \"#112233\"\ndone = \"green\"").unwrap();
        let theme = config.into_theme();
        assert_eq!(theme.marked.fg, Some(Color::Rgb(0x11, 0x22, 0x33)));
        assert_eq!(theme.done.fg, Some(Color::Green));
        assert_eq!(theme.border.fg, Theme::default().border.fg);
    }
}
