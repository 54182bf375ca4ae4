//! SQL editor widget
//!
//! Multi-line editor with syntax highlighting, optional line numbers and
//! soft wrap, and an inline completion popup. The widget owns the text
//! buffer and cursor; the shell owns the completion provider and pushes
//! candidate lists into the popup after each edit.

use std::cell::Cell;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Clear;
use unicode_width::UnicodeWidthChar;

use crate::complete::{Completion, word_before_cursor};
use crate::ui::theme::Theme;
use crate::ui::{Component, ComponentAction, highlight};

/// Maximum rows the completion popup occupies.
const POPUP_ROWS: usize = 8;

/// One visible row: a byte range of one logical line. With wrap off there
/// is exactly one row per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DisplayRow {
    line: usize,
    start: usize,
    end: usize,
}

/// Completion popup state.
struct Popup {
    items: Vec<Completion>,
    selected: usize,
}

/// The editor widget.
pub struct SqlEditor {
    lines: Vec<String>,
    cursor_line: usize,
    /// Byte offset within the cursor's line
    cursor_col: usize,

    line_numbers: bool,
    word_wrap: bool,

    // Render-time state; adjusted during `render`, which takes `&self`.
    scroll: Cell<usize>,
    h_scroll: Cell<usize>,
    viewport: Cell<(u16, u16)>,

    popup: Option<Popup>,
}

impl SqlEditor {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor_line: 0,
            cursor_col: 0,
            line_numbers: true,
            word_wrap: false,
            scroll: Cell::new(0),
            h_scroll: Cell::new(0),
            viewport: Cell::new((0, 0)),
            popup: None,
        }
    }

    pub fn configure(&mut self, line_numbers: bool, word_wrap: bool) {
        self.line_numbers = line_numbers;
        self.word_wrap = word_wrap;
    }

    // ── Buffer access ───────────────────────────────────────

    /// The full buffer text.
    pub fn content(&self) -> String {
        self.lines.join("\n")
    }

    /// Replace the buffer, clamping the cursor into the new text.
    pub fn set_content(&mut self, content: &str) {
        self.lines = content.split('\n').map(str::to_string).collect();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.cursor_line = self.cursor_line.min(self.lines.len() - 1);
        self.cursor_col = floor_boundary(&self.lines[self.cursor_line], self.cursor_col);
        self.popup = None;
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Cursor as (line, byte column).
    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_line, self.cursor_col)
    }

    /// Everything from the start of the buffer up to the cursor.
    pub fn text_before_cursor(&self) -> String {
        let mut out = String::new();
        for line in &self.lines[..self.cursor_line] {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&self.lines[self.cursor_line][..self.cursor_col]);
        out
    }

    /// The partial word at the cursor.
    pub fn partial_word(&self) -> &str {
        word_before_cursor(&self.lines[self.cursor_line], self.cursor_col)
    }

    // ── Completion popup ────────────────────────────────────

    /// Show candidates (replacing any previous list). An empty list closes
    /// the popup.
    pub fn show_completions(&mut self, items: Vec<Completion>) {
        if items.is_empty() {
            self.popup = None;
        } else {
            self.popup = Some(Popup { items, selected: 0 });
        }
    }

    pub fn clear_completions(&mut self) {
        self.popup = None;
    }

    pub fn completions_visible(&self) -> bool {
        self.popup.is_some()
    }

    /// Insert the selected candidate over the partial word at the cursor.
    fn accept_completion(&mut self) -> ComponentAction {
        let Some(popup) = self.popup.take() else {
            return ComponentAction::Consumed;
        };
        let label = popup.items[popup.selected].label.clone();
        let partial_len = self.partial_word().len();
        let start = self.cursor_col - partial_len;
        self.lines[self.cursor_line].replace_range(start..self.cursor_col, &label);
        self.cursor_col = start + label.len();
        ComponentAction::CompletionAccepted
    }

    // ── Editing ─────────────────────────────────────────────

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' {
            self.insert_newline();
            return;
        }
        self.lines[self.cursor_line].insert(self.cursor_col, c);
        self.cursor_col += c.len_utf8();
    }

    /// Insert a chunk of text (paste), honoring embedded newlines.
    pub fn insert_text(&mut self, text: &str) {
        for c in text.chars() {
            if c != '\r' {
                self.insert_char(c);
            }
        }
    }

    fn insert_newline(&mut self) {
        let rest = self.lines[self.cursor_line].split_off(self.cursor_col);
        self.lines.insert(self.cursor_line + 1, rest);
        self.cursor_line += 1;
        self.cursor_col = 0;
    }

    fn backspace(&mut self) -> bool {
        if self.cursor_col > 0 {
            let prev = prev_boundary(&self.lines[self.cursor_line], self.cursor_col);
            self.lines[self.cursor_line].remove(prev);
            self.cursor_col = prev;
            true
        } else if self.cursor_line > 0 {
            let current = self.lines.remove(self.cursor_line);
            self.cursor_line -= 1;
            self.cursor_col = self.lines[self.cursor_line].len();
            self.lines[self.cursor_line].push_str(&current);
            true
        } else {
            false
        }
    }

    fn delete_forward(&mut self) -> bool {
        if self.cursor_col < self.lines[self.cursor_line].len() {
            self.lines[self.cursor_line].remove(self.cursor_col);
            true
        } else if self.cursor_line + 1 < self.lines.len() {
            let next = self.lines.remove(self.cursor_line + 1);
            self.lines[self.cursor_line].push_str(&next);
            true
        } else {
            false
        }
    }

    // ── Cursor movement ─────────────────────────────────────

    fn move_left(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col = prev_boundary(&self.lines[self.cursor_line], self.cursor_col);
        } else if self.cursor_line > 0 {
            self.cursor_line -= 1;
            self.cursor_col = self.lines[self.cursor_line].len();
        }
    }

    fn move_right(&mut self) {
        let line = &self.lines[self.cursor_line];
        if self.cursor_col < line.len() {
            self.cursor_col = next_boundary(line, self.cursor_col);
        } else if self.cursor_line + 1 < self.lines.len() {
            self.cursor_line += 1;
            self.cursor_col = 0;
        }
    }

    fn move_vertical(&mut self, delta: isize) {
        let target = self.cursor_line.saturating_add_signed(delta);
        self.cursor_line = target.min(self.lines.len() - 1);
        self.cursor_col = floor_boundary(
            &self.lines[self.cursor_line],
            self.cursor_col.min(self.lines[self.cursor_line].len()),
        );
    }

    fn page_height(&self) -> isize {
        let (_, h) = self.viewport.get();
        (h.max(1)) as isize
    }
}

impl Default for SqlEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for SqlEditor {
    fn handle_key(&mut self, key: KeyEvent) -> ComponentAction {
        // Popup keys take priority while candidates are showing.
        if let Some(popup) = &mut self.popup {
            match key.code {
                KeyCode::Down => {
                    popup.selected = (popup.selected + 1) % popup.items.len();
                    return ComponentAction::Consumed;
                }
                KeyCode::Up => {
                    popup.selected = popup
                        .selected
                        .checked_sub(1)
                        .unwrap_or(popup.items.len() - 1);
                    return ComponentAction::Consumed;
                }
                KeyCode::Tab | KeyCode::Enter => return self.accept_completion(),
                KeyCode::Esc => {
                    self.popup = None;
                    return ComponentAction::Consumed;
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(c);
                ComponentAction::Edited
            }
            KeyCode::Enter => {
                self.insert_newline();
                ComponentAction::Edited
            }
            KeyCode::Tab => {
                // No popup showing: plain indentation.
                self.insert_char(' ');
                self.insert_char(' ');
                ComponentAction::Edited
            }
            KeyCode::Backspace => {
                if self.backspace() {
                    ComponentAction::Edited
                } else {
                    ComponentAction::Consumed
                }
            }
            KeyCode::Delete => {
                if self.delete_forward() {
                    ComponentAction::Edited
                } else {
                    ComponentAction::Consumed
                }
            }
            KeyCode::Left => {
                self.move_left();
                ComponentAction::Moved
            }
            KeyCode::Right => {
                self.move_right();
                ComponentAction::Moved
            }
            KeyCode::Up => {
                self.move_vertical(-1);
                ComponentAction::Moved
            }
            KeyCode::Down => {
                self.move_vertical(1);
                ComponentAction::Moved
            }
            KeyCode::PageUp => {
                self.move_vertical(-self.page_height());
                ComponentAction::Moved
            }
            KeyCode::PageDown => {
                self.move_vertical(self.page_height());
                ComponentAction::Moved
            }
            KeyCode::Home => {
                self.cursor_col = 0;
                ComponentAction::Moved
            }
            KeyCode::End => {
                self.cursor_col = self.lines[self.cursor_line].len();
                ComponentAction::Moved
            }
            _ => ComponentAction::Ignored,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, focused: bool, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let gutter = if self.line_numbers {
            digit_count(self.lines.len()) as u16 + 1
        } else {
            0
        };
        let text_width = area.width.saturating_sub(gutter).max(1) as usize;
        let height = area.height as usize;
        self.viewport.set((text_width as u16, area.height));

        let rows = self.display_rows(text_width);
        let cursor_row = self.cursor_display_row(&rows);

        // Keep the cursor row inside the viewport.
        let mut scroll = self.scroll.get().min(rows.len().saturating_sub(1));
        if cursor_row < scroll {
            scroll = cursor_row;
        }
        if cursor_row >= scroll + height {
            scroll = cursor_row + 1 - height;
        }
        self.scroll.set(scroll);

        // Horizontal scroll only applies without wrap.
        let cursor_x = self.cursor_display_x(&rows, cursor_row);
        let mut h_scroll = self.h_scroll.get();
        if self.word_wrap {
            h_scroll = 0;
        } else {
            if cursor_x < h_scroll {
                h_scroll = cursor_x;
            }
            if cursor_x >= h_scroll + text_width {
                h_scroll = cursor_x + 1 - text_width;
            }
        }
        self.h_scroll.set(h_scroll);

        // Block-comment state entering the first visible row.
        let first_line = rows.get(scroll).map(|r| r.line).unwrap_or(0);
        let mut in_comment = false;
        for line in &self.lines[..first_line] {
            in_comment = highlight::carry_comment_state(line, in_comment);
        }

        let mut styled_line = first_line;
        let mut styled = styled_chars(&self.lines[first_line], &mut in_comment, theme);

        for (y, row) in rows.iter().enumerate().skip(scroll).take(height) {
            if row.line != styled_line {
                // Rows are in line order; advance comment state across any
                // lines the viewport skipped (none today, but cheap).
                for line in &self.lines[styled_line + 1..row.line] {
                    in_comment = highlight::carry_comment_state(line, in_comment);
                }
                styled_line = row.line;
                styled = styled_chars(&self.lines[row.line], &mut in_comment, theme);
            }

            let mut spans: Vec<Span> = Vec::new();
            if gutter > 0 {
                let number = if row.start == 0 {
                    format!("{:>width$} ", row.line + 1, width = gutter as usize - 1)
                } else {
                    " ".repeat(gutter as usize)
                };
                spans.push(Span::styled(number, theme.line_number));
            }

            // Chars of this row, clipped by h_scroll and the text width.
            let mut skipped = 0usize;
            let mut used = 0usize;
            let mut run = String::new();
            let mut run_style: Option<Style> = None;
            for (offset, c, style) in &styled {
                if *offset < row.start || *offset >= row.end {
                    continue;
                }
                let w = c.width().unwrap_or(0);
                if skipped < h_scroll {
                    skipped += w;
                    continue;
                }
                if used + w > text_width {
                    break;
                }
                used += w;
                if run_style != Some(*style) {
                    if let Some(style) = run_style {
                        spans.push(Span::styled(std::mem::take(&mut run), style));
                    }
                    run_style = Some(*style);
                }
                run.push(*c);
            }
            if let Some(style) = run_style {
                if !run.is_empty() {
                    spans.push(Span::styled(run, style));
                }
            }

            let y = area.y + (y - scroll) as u16;
            frame.render_widget(
                Line::from(spans),
                Rect::new(area.x, y, area.width, 1),
            );
        }

        if focused {
            let screen_x = area.x + gutter + (cursor_x.saturating_sub(h_scroll)) as u16;
            let screen_y = area.y + (cursor_row - scroll) as u16;
            frame.set_cursor_position((screen_x.min(area.right().saturating_sub(1)), screen_y));

            if self.popup.is_some() {
                self.render_popup(
                    frame,
                    area,
                    screen_x.min(area.right().saturating_sub(1)),
                    screen_y,
                    theme,
                );
            }
        }
    }
}

impl SqlEditor {
    /// Break the buffer into visible rows for the given text width.
    fn display_rows(&self, text_width: usize) -> Vec<DisplayRow> {
        let mut rows = Vec::new();
        for (idx, line) in self.lines.iter().enumerate() {
            if !self.word_wrap {
                rows.push(DisplayRow {
                    line: idx,
                    start: 0,
                    end: line.len(),
                });
                continue;
            }
            let mut start = 0;
            let mut used = 0;
            for (offset, c) in line.char_indices() {
                let w = c.width().unwrap_or(0);
                if used + w > text_width && offset > start {
                    rows.push(DisplayRow {
                        line: idx,
                        start,
                        end: offset,
                    });
                    start = offset;
                    used = 0;
                }
                used += w;
            }
            rows.push(DisplayRow {
                line: idx,
                start,
                end: line.len(),
            });
        }
        rows
    }

    fn cursor_display_row(&self, rows: &[DisplayRow]) -> usize {
        rows.iter()
            .position(|r| {
                r.line == self.cursor_line
                    && self.cursor_col >= r.start
                    && (self.cursor_col < r.end || r.end == self.lines[r.line].len())
            })
            .unwrap_or(0)
    }

    /// Display column of the cursor within its row (before h-scroll).
    fn cursor_display_x(&self, rows: &[DisplayRow], cursor_row: usize) -> usize {
        let Some(row) = rows.get(cursor_row) else {
            return 0;
        };
        self.lines[row.line][row.start..self.cursor_col]
            .chars()
            .map(|c| c.width().unwrap_or(0))
            .sum()
    }

    fn render_popup(
        &self,
        frame: &mut Frame,
        area: Rect,
        cursor_x: u16,
        cursor_y: u16,
        theme: &Theme,
    ) {
        let Some(popup) = &self.popup else {
            return;
        };

        let rows = popup.items.len().min(POPUP_ROWS);
        let width = popup
            .items
            .iter()
            .map(|item| {
                let detail = item.detail.as_deref().map(str::len).unwrap_or(0);
                item.label.len() + if detail > 0 { detail + 2 } else { 0 }
            })
            .max()
            .unwrap_or(10)
            .max(8)
            .min(area.width.saturating_sub(1) as usize) as u16;
        if width == 0 {
            return;
        }

        // Prefer below the cursor, flip above when there is no room.
        let below = area.bottom().saturating_sub(cursor_y + 1) as usize;
        let (y, rows) = if below >= rows {
            (cursor_y + 1, rows)
        } else if cursor_y.saturating_sub(area.y) as usize >= rows {
            (cursor_y - rows as u16, rows)
        } else {
            (cursor_y + 1, below.max(1))
        };
        let x = cursor_x.min(area.right().saturating_sub(width));
        let popup_area = Rect::new(x, y, width, rows as u16);
        frame.render_widget(Clear, popup_area);

        // Scroll the window so the selection stays visible.
        let first = popup.selected.saturating_sub(rows.saturating_sub(1));
        for (i, item) in popup.items.iter().enumerate().skip(first).take(rows) {
            let selected = i == popup.selected;
            let base = if selected {
                theme.popup_selected
            } else {
                theme.popup
            };
            let mut spans = vec![Span::styled(item.label.clone(), base)];
            if let Some(detail) = &item.detail {
                spans.push(Span::styled(
                    format!("  {detail}"),
                    if selected { base } else { theme.popup_detail },
                ));
            }
            let mut line = Line::from(spans);
            line = line.style(base);
            frame.render_widget(
                line,
                Rect::new(popup_area.x, popup_area.y + (i - first) as u16, width, 1),
            );
        }
    }
}

fn digit_count(mut n: usize) -> usize {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

/// Style every char of a line via the tokenizer, updating `in_comment`
/// across the line. Returns (byte offset, char, style) triples.
fn styled_chars(line: &str, in_comment: &mut bool, theme: &Theme) -> Vec<(usize, char, Style)> {
    let (tokens, next) = highlight::tokenize(line, *in_comment);
    *in_comment = next;

    let mut out = Vec::with_capacity(line.len());
    for token in tokens {
        let style = match token.kind {
            highlight::TokenKind::Keyword => theme.keyword,
            highlight::TokenKind::String => theme.string,
            highlight::TokenKind::Number => theme.number,
            highlight::TokenKind::Comment => theme.comment,
            highlight::TokenKind::Normal => theme.text,
        };
        for (offset, c) in line[token.span.clone()].char_indices() {
            out.push((token.span.start + offset, c, style));
        }
    }
    out
}

fn floor_boundary(s: &str, index: usize) -> usize {
    let mut i = index.min(s.len());
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn prev_boundary(s: &str, index: usize) -> usize {
    let mut i = index.min(s.len());
    loop {
        i -= 1;
        if s.is_char_boundary(i) {
            return i;
        }
    }
}

fn next_boundary(s: &str, index: usize) -> usize {
    let mut i = (index + 1).min(s.len());
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}
