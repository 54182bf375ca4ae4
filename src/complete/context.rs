//! Cursor context classification
//!
//! Decides what the user is completing from the text around the cursor: a
//! table name, a column of a specific table, or anything at all. This is a
//! lexical heuristic evaluated in order with the first rule winning; text
//! that matches no rule falls through to [`CursorContext::Default`], so
//! classification never fails on malformed or partial SQL.

use std::sync::LazyLock;

use regex::Regex;

use crate::schema::Table;

use super::alias::AliasMap;

/// What the cursor position calls for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorContext {
    /// Completing a table name (the token just typed is FROM or JOIN)
    Table,
    /// Completing a column of the named table (`alias.` or `table.`)
    Column { table: String },
    /// Anything: keywords, tables, qualified columns
    Default,
}

/// `<identifier> . <partial-or-empty>` immediately before the cursor,
/// with optional whitespace around the dot.
static DOT_QUALIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z_][A-Za-z0-9_$]*)\s*\.\s*([A-Za-z_][A-Za-z0-9_$]*)?$")
        .expect("qualifier pattern is valid")
});

/// Classify the completion context at the cursor.
///
/// `line` and `col` address the cursor within its line; `before_cursor` is
/// the whole buffer up to the cursor and is used for dot-qualifier
/// detection, which may span a line break.
pub fn classify(
    line: &str,
    col: usize,
    before_cursor: &str,
    aliases: &AliasMap,
    tables: &[Table],
) -> CursorContext {
    // Rule 1: the token immediately preceding the cursor is FROM or JOIN.
    let head = &line[..floor_char_boundary(line, col)];
    if let Some(last) = head.split_whitespace().next_back() {
        if last.eq_ignore_ascii_case("from") || last.eq_ignore_ascii_case("join") {
            return CursorContext::Table;
        }
    }

    // Rule 2: alias- or table-qualified column position.
    if let Some(caps) = DOT_QUALIFIER.captures(before_cursor) {
        let ident = &caps[1];
        if let Some(table) = aliases.resolve(ident) {
            return CursorContext::Column {
                table: table.to_string(),
            };
        }
        // Not an alias: accept a known table name, spelled exactly or in
        // any case. The identifier is carried as typed; the suggestion
        // engine resolves it case-insensitively.
        if tables
            .iter()
            .any(|t| t.name == ident || t.name.eq_ignore_ascii_case(ident))
        {
            return CursorContext::Column {
                table: ident.to_string(),
            };
        }
    }

    CursorContext::Default
}

/// The partial word immediately before the cursor, for prefix filtering.
pub fn word_before_cursor(line: &str, col: usize) -> &str {
    let col = floor_char_boundary(line, col);
    let bytes = line.as_bytes();
    let mut start = col;
    while start > 0 {
        let b = bytes[start - 1];
        if b.is_ascii_alphanumeric() || b == b'_' || b == b'$' {
            start -= 1;
        } else {
            break;
        }
    }
    &line[start..col]
}

/// Largest char boundary at or below `index`, clamped to the string length.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    let mut i = index.min(s.len());
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Table;

    fn tables() -> Vec<Table> {
        vec![
            Table {
                name: "users".to_string(),
                columns: None,
            },
            Table {
                name: "Orders".to_string(),
                columns: None,
            },
        ]
    }

    fn classify_at_end(buffer: &str, aliases: &AliasMap, tables: &[Table]) -> CursorContext {
        let line = buffer.rsplit('\n').next().unwrap_or(buffer);
        classify(line, line.len(), buffer, aliases, tables)
    }

    // ── Rule 1: table position ──────────────────────────────

    #[test]
    fn after_from_is_table_context() {
        let ctx = classify_at_end("SELECT * FROM ", &AliasMap::default(), &tables());
        assert_eq!(ctx, CursorContext::Table);
    }

    #[test]
    fn after_join_is_table_context() {
        let ctx = classify_at_end("SELECT * FROM users JOIN ", &AliasMap::default(), &tables());
        assert_eq!(ctx, CursorContext::Table);
    }

    #[test]
    fn from_is_matched_case_insensitively() {
        let ctx = classify_at_end("select * from ", &AliasMap::default(), &tables());
        assert_eq!(ctx, CursorContext::Table);
    }

    #[test]
    fn cursor_directly_after_from_keyword() {
        // No trailing space: the last token is still exactly FROM.
        let ctx = classify_at_end("SELECT * FROM", &AliasMap::default(), &tables());
        assert_eq!(ctx, CursorContext::Table);
    }

    #[test]
    fn partial_from_token_is_default() {
        let ctx = classify_at_end("SELECT * FR", &AliasMap::default(), &tables());
        assert_eq!(ctx, CursorContext::Default);
    }

    #[test]
    fn from_on_previous_line_does_not_leak() {
        // Rule 1 looks at the cursor's line only.
        let buffer = "SELECT * FROM\nusers";
        let ctx = classify("users", 5, buffer, &AliasMap::default(), &tables());
        assert_eq!(ctx, CursorContext::Default);
    }

    // ── Rule 2: column position ─────────────────────────────

    #[test]
    fn alias_dot_resolves_through_map() {
        let aliases = AliasMap::scan("SELECT * FROM users u WHERE u.");
        let ctx = classify_at_end("SELECT * FROM users u WHERE u.", &aliases, &tables());
        assert_eq!(
            ctx,
            CursorContext::Column {
                table: "users".to_string()
            }
        );
    }

    #[test]
    fn alias_dot_with_partial_column() {
        let aliases = AliasMap::scan("SELECT * FROM users u WHERE u.em");
        let ctx = classify_at_end("SELECT * FROM users u WHERE u.em", &aliases, &tables());
        assert_eq!(
            ctx,
            CursorContext::Column {
                table: "users".to_string()
            }
        );
    }

    #[test]
    fn table_name_dot_without_alias() {
        let ctx = classify_at_end("SELECT users.", &AliasMap::default(), &tables());
        assert_eq!(
            ctx,
            CursorContext::Column {
                table: "users".to_string()
            }
        );
    }

    #[test]
    fn table_name_dot_matches_case_insensitively() {
        // Identifier carried as typed, not canonicalized.
        let ctx = classify_at_end("SELECT ORDERS.", &AliasMap::default(), &tables());
        assert_eq!(
            ctx,
            CursorContext::Column {
                table: "ORDERS".to_string()
            }
        );
    }

    #[test]
    fn whitespace_around_dot_tolerated() {
        let aliases = AliasMap::scan("SELECT * FROM users u WHERE u . ");
        let ctx = classify_at_end("SELECT * FROM users u WHERE u . ", &aliases, &tables());
        assert_eq!(
            ctx,
            CursorContext::Column {
                table: "users".to_string()
            }
        );
    }

    #[test]
    fn qualifier_spanning_line_break() {
        let buffer = "SELECT * FROM users u WHERE u.\n";
        let aliases = AliasMap::scan(buffer);
        let ctx = classify("", 0, buffer, &aliases, &tables());
        assert_eq!(
            ctx,
            CursorContext::Column {
                table: "users".to_string()
            }
        );
    }

    #[test]
    fn unknown_qualifier_falls_through() {
        let ctx = classify_at_end("SELECT x.", &AliasMap::default(), &tables());
        assert_eq!(ctx, CursorContext::Default);
    }

    // ── Rule 3: default ─────────────────────────────────────

    #[test]
    fn empty_buffer_is_default() {
        let ctx = classify_at_end("", &AliasMap::default(), &tables());
        assert_eq!(ctx, CursorContext::Default);
    }

    #[test]
    fn plain_select_is_default() {
        let ctx = classify_at_end("SELECT ", &AliasMap::default(), &tables());
        assert_eq!(ctx, CursorContext::Default);
    }

    #[test]
    fn numeric_literal_dot_is_default() {
        // `3.` must not look like a column qualifier.
        let ctx = classify_at_end("SELECT 3.", &AliasMap::default(), &tables());
        assert_eq!(ctx, CursorContext::Default);
    }

    // ── word_before_cursor ──────────────────────────────────

    #[test]
    fn word_at_end_of_line() {
        assert_eq!(word_before_cursor("SELECT", 6), "SELECT");
    }

    #[test]
    fn word_after_space() {
        assert_eq!(word_before_cursor("SELECT us", 9), "us");
    }

    #[test]
    fn word_after_dot() {
        assert_eq!(word_before_cursor("u.em", 4), "em");
    }

    #[test]
    fn empty_word_after_dot() {
        assert_eq!(word_before_cursor("u.", 2), "");
    }

    #[test]
    fn empty_word_at_line_start() {
        assert_eq!(word_before_cursor("abc", 0), "");
    }

    #[test]
    fn col_beyond_line_length_clamped() {
        assert_eq!(word_before_cursor("abc", 10), "abc");
    }

    #[test]
    fn col_inside_multibyte_char() {
        // 'é' is two bytes; an offset inside it must not panic.
        let line = "café";
        assert_eq!(word_before_cursor(line, 4), "caf");
    }
}
