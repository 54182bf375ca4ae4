//! Top-level render function
//!
//! Lays out the widget frame for the demo shell: the editor (bordered or
//! not, fixed height or fill) above a one-row status line.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{App, StatusLevel};
use crate::ui::Component;

/// Render the whole demo frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());

    render_editor(frame, chunks[0], app);
    render_status_line(frame, chunks[1], app);
}

fn render_editor(frame: &mut Frame, area: Rect, app: &App) {
    // A fixed height pins the widget to the top of the available space.
    let area = match app.settings.height {
        Some(height) => Rect {
            height: height.min(area.height),
            ..area
        },
        None => area,
    };

    if app.settings.show_border {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" SQL ")
            .border_style(app.theme.border_style(true));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        app.editor.render(frame, inner, true, &app.theme);
    } else {
        app.editor.render(frame, area, true, &app.theme);
    }
}

fn render_status_line(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans: Vec<Span> = Vec::new();

    if app.settings.show_schema_status {
        spans.push(Span::styled(
            format!("[{}] ", app.schema_status()),
            app.theme.status_hint,
        ));
    }

    if let Some(status) = &app.status_message {
        let style = match status.level {
            StatusLevel::Info => app.theme.status_info,
            StatusLevel::Warning => app.theme.status_warning,
            StatusLevel::Error => app.theme.status_error,
        };
        spans.push(Span::styled(status.message.clone(), style));
    } else {
        spans.push(Span::styled(
            "Ctrl+Space complete | Ctrl+F format | Ctrl+Q quit",
            app.theme.status_hint,
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default());
    frame.render_widget(paragraph, area);
}
