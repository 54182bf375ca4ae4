//! UI theme and styling
//!
//! Light and dark palettes for the editor, the completion popup, and the
//! status line. `Host` leaves foregrounds/backgrounds at the terminal
//! defaults so the widget blends into whatever the host application uses.

use ratatui::style::{Color, Modifier, Style};

/// Which palette to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    Light,
    Dark,
    /// Follow the host terminal's default colors
    #[default]
    Host,
}

impl ThemeKind {
    /// Parse a settings value. Unrecognized names follow the host.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "light" => ThemeKind::Light,
            "dark" => ThemeKind::Dark,
            _ => ThemeKind::Host,
        }
    }
}

/// Resolved styles for every widget element.
#[derive(Debug, Clone)]
pub struct Theme {
    // Editor text
    pub text: Style,
    pub keyword: Style,
    pub string: Style,
    pub number: Style,
    pub comment: Style,
    pub line_number: Style,

    // Borders
    pub border_focused: Style,
    pub border_unfocused: Style,

    // Completion popup
    pub popup: Style,
    pub popup_selected: Style,
    pub popup_detail: Style,

    // Status line
    pub status_info: Style,
    pub status_warning: Style,
    pub status_error: Style,
    pub status_hint: Style,
}

impl Theme {
    pub fn new(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::Light => Self::light(),
            ThemeKind::Dark => Self::dark(),
            ThemeKind::Host => Self::host(),
        }
    }

    /// Border style based on focus.
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            self.border_focused
        } else {
            self.border_unfocused
        }
    }

    fn dark() -> Self {
        Self {
            text: Style::default().fg(Color::White),
            keyword: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            string: Style::default().fg(Color::Green),
            number: Style::default().fg(Color::Magenta),
            comment: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            line_number: Style::default().fg(Color::DarkGray),

            border_focused: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            border_unfocused: Style::default().fg(Color::DarkGray),

            popup: Style::default().fg(Color::White).bg(Color::Black),
            popup_selected: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            popup_detail: Style::default().fg(Color::DarkGray),

            status_info: Style::default().fg(Color::Blue),
            status_warning: Style::default().fg(Color::Yellow),
            status_error: Style::default().fg(Color::Red),
            status_hint: Style::default().fg(Color::DarkGray),
        }
    }

    fn light() -> Self {
        Self {
            text: Style::default().fg(Color::Black),
            keyword: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            string: Style::default().fg(Color::Rgb(0, 128, 0)),
            number: Style::default().fg(Color::Rgb(160, 32, 160)),
            comment: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
            line_number: Style::default().fg(Color::Gray),

            border_focused: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            border_unfocused: Style::default().fg(Color::Gray),

            popup: Style::default().fg(Color::Black).bg(Color::White),
            popup_selected: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            popup_detail: Style::default().fg(Color::Gray),

            status_info: Style::default().fg(Color::Blue),
            status_warning: Style::default().fg(Color::Rgb(160, 110, 0)),
            status_error: Style::default().fg(Color::Red),
            status_hint: Style::default().fg(Color::Gray),
        }
    }

    fn host() -> Self {
        Self {
            text: Style::default(),
            keyword: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            string: Style::default().fg(Color::Green),
            number: Style::default().fg(Color::Magenta),
            comment: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            line_number: Style::default().fg(Color::DarkGray),

            border_focused: Style::default().add_modifier(Modifier::BOLD),
            border_unfocused: Style::default().fg(Color::DarkGray),

            popup: Style::default().add_modifier(Modifier::REVERSED),
            popup_selected: Style::default()
                .add_modifier(Modifier::BOLD)
                .add_modifier(Modifier::UNDERLINED)
                .add_modifier(Modifier::REVERSED),
            popup_detail: Style::default()
                .add_modifier(Modifier::DIM)
                .add_modifier(Modifier::REVERSED),

            status_info: Style::default(),
            status_warning: Style::default().fg(Color::Yellow),
            status_error: Style::default().fg(Color::Red),
            status_hint: Style::default().add_modifier(Modifier::DIM),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeKind::Host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_from_name() {
        assert_eq!(ThemeKind::from_name("light"), ThemeKind::Light);
        assert_eq!(ThemeKind::from_name("DARK"), ThemeKind::Dark);
        assert_eq!(ThemeKind::from_name("host"), ThemeKind::Host);
        assert_eq!(ThemeKind::from_name("solarized"), ThemeKind::Host);
    }

    #[test]
    fn border_style_tracks_focus() {
        let theme = Theme::new(ThemeKind::Dark);
        assert_eq!(theme.border_style(true), theme.border_focused);
        assert_eq!(theme.border_style(false), theme.border_unfocused);
    }
}
