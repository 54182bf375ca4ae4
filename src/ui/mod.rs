//! Terminal UI components
//!
//! The editor widget and its supporting pieces, rendered with ratatui.

pub mod editor;
pub mod highlight;
pub mod render;
pub mod theme;

use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

use crate::ui::theme::Theme;

/// What a key event did to a component. Components never reach into the
/// shell; they report, and the shell decides what follows (e.g. whether
/// to refresh completions).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentAction {
    /// Buffer text changed
    Edited,
    /// Cursor moved without a text change
    Moved,
    /// A completion candidate was inserted
    CompletionAccepted,
    /// Consumed with no buffer effect (e.g. popup dismissed)
    Consumed,
    /// Not handled, the shell should try
    Ignored,
}

/// Trait for embeddable UI components.
pub trait Component {
    /// Handle a key event, reporting what it did.
    fn handle_key(&mut self, key: KeyEvent) -> ComponentAction;

    /// Render into `area`.
    fn render(&self, frame: &mut Frame, area: Rect, focused: bool, theme: &Theme);
}
