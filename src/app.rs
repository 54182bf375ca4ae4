//! Demo shell state and event handling
//!
//! A minimal host application around the editor widget, standing in for
//! the platform that would normally embed it. Events come in, state
//! updates, actions go out; the event loop in `main.rs` stays dumb.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::Value;

use crate::complete::{CompletionProvider, CompletionRequest};
use crate::config::Settings;
use crate::format::format_sql;
use crate::schema;
use crate::ui::editor::SqlEditor;
use crate::ui::theme::{Theme, ThemeKind};
use crate::ui::{Component, ComponentAction};

/// Characters that trigger the completion popup without a partial word.
const TRIGGER_CHARS: [char; 4] = ['.', ' ', '\n', '\t'];

/// Application events from the event loop.
pub enum AppEvent {
    /// Keyboard input
    Key(KeyEvent),
    /// Bracketed paste
    Paste(String),
    /// Terminal resize
    Resize,
    /// The host delivered a (possibly null) schema payload
    SchemaChanged(Value),
}

/// Actions returned to the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    None,
}

/// Status message with severity level.
pub struct StatusMessage {
    pub message: String,
    pub level: StatusLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Demo shell state: the widget, its completion provider, and a status line.
pub struct App {
    pub editor: SqlEditor,
    pub theme: Theme,
    pub settings: Settings,
    pub status_message: Option<StatusMessage>,
    pub running: bool,

    /// The registered completion provider. Replaced wholesale whenever the
    /// schema changes, so nothing stale survives a swap.
    provider: CompletionProvider,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let mut editor = SqlEditor::new();
        editor.configure(settings.line_numbers, settings.word_wrap);
        let theme = Theme::new(ThemeKind::from_name(&settings.theme));
        let mut app = Self {
            editor,
            theme,
            settings,
            status_message: None,
            running: true,
            provider: CompletionProvider::register(Vec::new()),
        };
        if app.settings.suggest_on_focus {
            app.update_completions(true);
        }
        app
    }

    /// Human-readable schema indicator for the status line.
    pub fn schema_status(&self) -> String {
        let count = self.provider.tables().len();
        if count == 0 {
            "No schema".to_string()
        } else {
            format!("Schema: {} table(s)", count)
        }
    }

    /// Handle an application event and return the resulting action.
    pub fn handle_event(&mut self, event: AppEvent) -> Action {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Paste(data) => {
                self.editor.insert_text(&data);
                self.update_completions(false);
                Action::None
            }
            AppEvent::Resize => Action::None,
            AppEvent::SchemaChanged(value) => {
                self.set_schema(&value);
                Action::None
            }
        }
    }

    /// Re-register the completion provider over a fresh snapshot.
    pub fn set_schema(&mut self, value: &Value) {
        self.provider = CompletionProvider::register(schema::normalize(value));
        self.editor.clear_completions();
        self.set_status(self.schema_status(), StatusLevel::Info);
    }

    /// Same, for schema supplied as JSON text. Unparseable text counts as
    /// no schema.
    pub fn set_schema_text(&mut self, text: &str) {
        self.provider = CompletionProvider::register(schema::normalize_str(text));
        self.editor.clear_completions();
        self.set_status(self.schema_status(), StatusLevel::Info);
    }

    pub fn set_status(&mut self, message: String, level: StatusLevel) {
        self.status_message = Some(StatusMessage { message, level });
    }

    fn handle_key(&mut self, key: KeyEvent) -> Action {
        self.status_message = None;

        // Global bindings first.
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('q') => return Action::Quit,
                KeyCode::Char(' ') => {
                    self.update_completions(true);
                    return Action::None;
                }
                KeyCode::Char('f') => {
                    self.format_buffer();
                    return Action::None;
                }
                _ => {}
            }
        }

        match self.editor.handle_key(key) {
            ComponentAction::Edited => self.update_completions(false),
            ComponentAction::Moved | ComponentAction::CompletionAccepted => {
                // Moving away or accepting ends the session; the next edit
                // starts a fresh one.
                self.editor.clear_completions();
            }
            ComponentAction::Consumed | ComponentAction::Ignored => {}
        }
        Action::None
    }

    fn format_buffer(&mut self) {
        let content = self.editor.content();
        if content.trim().is_empty() {
            return;
        }
        self.editor.set_content(&format_sql(&content));
        self.set_status("Formatted".to_string(), StatusLevel::Info);
    }

    /// Run the completion pipeline against the live buffer and decide
    /// whether the popup should show.
    fn update_completions(&mut self, forced: bool) {
        let (line_idx, col) = self.editor.cursor();
        let Some(line) = self.editor.line(line_idx).map(str::to_string) else {
            self.editor.clear_completions();
            return;
        };

        let before = self.editor.text_before_cursor();
        let request = CompletionRequest {
            line: &line,
            col,
            before_cursor: &before,
        };
        let candidates = self.provider.complete(&request);

        let partial = self.editor.partial_word();
        let triggered = before.is_empty()
            || before.ends_with(TRIGGER_CHARS)
            || !partial.is_empty();
        if forced || triggered {
            self.editor.show_completions(candidates);
        } else {
            self.editor.clear_completions();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app_with_schema() -> App {
        let mut app = App::new(Settings::default());
        app.set_schema(&json!({
            "tables": [
                { "name": "users", "columns": [
                    { "name": "id", "type": "int" },
                    { "name": "email", "type": "text" }
                ]}
            ]
        }));
        app
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            let code = if c == '\n' {
                KeyCode::Enter
            } else {
                KeyCode::Char(c)
            };
            app.handle_event(AppEvent::Key(key(code)));
        }
    }

    // ── Status line ─────────────────────────────────────────

    #[test]
    fn schema_status_reports_table_count() {
        let mut app = App::new(Settings::default());
        assert_eq!(app.schema_status(), "No schema");
        app.set_schema(&json!({ "tables": [{ "name": "users" }, { "name": "orders" }] }));
        assert_eq!(app.schema_status(), "Schema: 2 table(s)");
    }

    #[test]
    fn null_schema_is_no_schema() {
        let mut app = App::new(Settings::default());
        app.set_schema(&Value::Null);
        assert_eq!(app.schema_status(), "No schema");
    }

    #[test]
    fn unparseable_schema_text_is_no_schema() {
        let mut app = App::new(Settings::default());
        app.set_schema_text("{oops");
        assert_eq!(app.schema_status(), "No schema");
    }

    // ── Quit and format ─────────────────────────────────────

    #[test]
    fn ctrl_q_quits() {
        let mut app = App::new(Settings::default());
        assert_eq!(app.handle_event(AppEvent::Key(ctrl('q'))), Action::Quit);
    }

    #[test]
    fn format_rewrites_buffer() {
        let mut app = App::new(Settings::default());
        type_text(&mut app, "select 1");
        app.handle_event(AppEvent::Key(ctrl('f')));
        assert!(app.editor.content().contains("SELECT"));
    }

    #[test]
    fn format_skips_empty_buffer() {
        let mut app = App::new(Settings::default());
        app.handle_event(AppEvent::Key(ctrl('f')));
        assert_eq!(app.editor.content(), "");
        assert!(app.status_message.is_none());
    }

    // ── Completion wiring ───────────────────────────────────

    #[test]
    fn typing_a_word_opens_popup() {
        let mut app = app_with_schema();
        type_text(&mut app, "SEL");
        assert!(app.editor.completions_visible());
    }

    #[test]
    fn dot_after_alias_offers_columns() {
        let mut app = app_with_schema();
        type_text(&mut app, "SELECT * FROM users u WHERE u.");
        assert!(app.editor.completions_visible());
        // Accept the first candidate: the `id` column.
        app.handle_event(AppEvent::Key(key(KeyCode::Tab)));
        assert_eq!(app.editor.content(), "SELECT * FROM users u WHERE u.id");
    }

    #[test]
    fn accepting_suppresses_immediate_reopen() {
        let mut app = app_with_schema();
        type_text(&mut app, "SEL");
        app.handle_event(AppEvent::Key(key(KeyCode::Tab)));
        assert_eq!(app.editor.content(), "SELECT");
        assert!(!app.editor.completions_visible());
    }

    #[test]
    fn cursor_move_dismisses_popup() {
        let mut app = app_with_schema();
        type_text(&mut app, "SEL");
        assert!(app.editor.completions_visible());
        // Arrow keys only navigate the popup while it is open; dismiss
        // first, then move.
        app.handle_event(AppEvent::Key(key(KeyCode::Esc)));
        app.handle_event(AppEvent::Key(key(KeyCode::Left)));
        assert!(!app.editor.completions_visible());
    }

    #[test]
    fn ctrl_space_forces_popup() {
        let mut app = app_with_schema();
        type_text(&mut app, "SELECT *");
        app.handle_event(AppEvent::Key(key(KeyCode::Esc)));
        assert!(!app.editor.completions_visible());
        app.handle_event(AppEvent::Key(ctrl(' ')));
        assert!(app.editor.completions_visible());
    }

    #[test]
    fn paste_refreshes_completions() {
        let mut app = app_with_schema();
        app.handle_event(AppEvent::Paste("SELECT * FROM users u WHERE u.".to_string()));
        assert!(app.editor.completions_visible());
    }

    #[test]
    fn schema_swap_clears_stale_popup() {
        let mut app = app_with_schema();
        type_text(&mut app, "SELECT * FROM users u WHERE u.");
        assert!(app.editor.completions_visible());
        app.handle_event(AppEvent::SchemaChanged(Value::Null));
        assert!(!app.editor.completions_visible());
    }

    #[test]
    fn suggest_on_focus_opens_popup_at_start() {
        let settings = Settings {
            suggest_on_focus: true,
            ..Settings::default()
        };
        let app = App::new(settings);
        assert!(app.editor.completions_visible());
    }
}
