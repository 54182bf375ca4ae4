//! FROM/JOIN clause scanning
//!
//! A tolerant, regex-driven scan over the text before the cursor that maps
//! aliases and bare table references to table names. This is deliberately
//! not a SQL parser: the buffer is usually mid-keystroke and rarely valid,
//! so anything the pattern does not capture is simply skipped.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// Clause heads (`FROM`, `JOIN`, compound joins) followed by an optional
/// table identifier and an optional `AS`-prefixed or bare alias.
static CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:from|(?:left\s+outer|right\s+outer|left|right|inner|outer|cross)\s+join|join)\s+([A-Za-z_][A-Za-z0-9_$]*)(?:\s+(?:as\s+)?([A-Za-z_][A-Za-z0-9_$]*))?",
    )
    .expect("clause pattern is valid")
});

/// Block comments, including across line breaks. Line comments (`--`) are
/// intentionally left in place; see the module tests.
static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("comment pattern is valid"));

/// Words that terminate a clause and therefore cannot be a table reference
/// or an alias.
const CLAUSE_STOP_WORDS: &[&str] = &[
    "where", "on", "and", "or", "not", "join", "inner", "left", "right", "outer", "cross", "full",
    "group", "order", "having", "limit", "offset", "union", "set", "as", "using", "values",
    "select", "by",
];

fn is_stop_word(word: &str) -> bool {
    CLAUSE_STOP_WORDS
        .iter()
        .any(|stop| word.eq_ignore_ascii_case(stop))
}

/// Alias and table-reference lookup built from one scan of the buffer.
///
/// Every table reference maps to itself and every alias maps to its table,
/// each under both its original spelling and its lowercased spelling, so
/// resolution is a constant-time lookup either way. Later clauses overwrite
/// earlier ones for the same key.
#[derive(Debug, Default)]
pub struct AliasMap {
    entries: HashMap<String, String>,
}

impl AliasMap {
    /// Scan `text` (buffer start up to the cursor) for clause references.
    ///
    /// Never fails: text with no clause matches produces an empty map,
    /// which is a normal outcome.
    pub fn scan(text: &str) -> Self {
        let cleaned = BLOCK_COMMENT.replace_all(text, " ");
        let cleaned = collapse_whitespace(&cleaned);

        let mut entries = HashMap::new();
        let mut pos = 0;
        while let Some(caps) = CLAUSE.captures_at(&cleaned, pos) {
            let Some(table_match) = caps.get(1) else {
                break;
            };
            // Resume after the table identifier, not the full match: the
            // alias slot may have swallowed the head of the next clause
            // (e.g. `FROM users JOIN ...`), which still needs scanning.
            pos = table_match.end();

            let table = table_match.as_str();
            if is_stop_word(table) {
                continue;
            }
            entries.insert(table.to_string(), table.to_string());
            entries.insert(table.to_lowercase(), table.to_string());

            if let Some(alias) = caps.get(2).map(|m| m.as_str()) {
                if !is_stop_word(alias) {
                    entries.insert(alias.to_string(), table.to_string());
                    entries.insert(alias.to_lowercase(), table.to_string());
                }
            }
        }
        Self { entries }
    }

    /// Resolve a reference by exact spelling, then lowercased.
    pub fn resolve(&self, reference: &str) -> Option<&str> {
        self.entries
            .get(reference)
            .or_else(|| self.entries.get(&reference.to_lowercase()))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collapse whitespace runs (spaces, tabs, newlines) to single spaces so the
/// clause pattern sees `FROM` and its table on one "line".
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !prev_space {
                out.push(' ');
            }
            prev_space = true;
        } else {
            out.push(c);
            prev_space = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Basic clause forms ──────────────────────────────────

    #[test]
    fn from_bare_table() {
        let map = AliasMap::scan("SELECT * FROM users");
        assert_eq!(map.resolve("users"), Some("users"));
    }

    #[test]
    fn from_with_bare_alias() {
        let map = AliasMap::scan("SELECT * FROM users u");
        assert_eq!(map.resolve("u"), Some("users"));
        assert_eq!(map.resolve("users"), Some("users"));
    }

    #[test]
    fn from_with_as_alias() {
        let map = AliasMap::scan("SELECT * FROM users AS u");
        assert_eq!(map.resolve("u"), Some("users"));
    }

    #[test]
    fn join_with_alias() {
        let map = AliasMap::scan("SELECT * FROM users u JOIN orders o ON o.user_id = u.id");
        assert_eq!(map.resolve("o"), Some("orders"));
    }

    #[test]
    fn compound_join_forms() {
        for form in [
            "LEFT JOIN",
            "RIGHT JOIN",
            "INNER JOIN",
            "OUTER JOIN",
            "CROSS JOIN",
            "LEFT OUTER JOIN",
            "RIGHT OUTER JOIN",
        ] {
            let sql = format!("SELECT * FROM a {form} orders o");
            let map = AliasMap::scan(&sql);
            assert_eq!(map.resolve("o"), Some("orders"), "form: {form}");
        }
    }

    // ── Case handling ───────────────────────────────────────

    #[test]
    fn keywords_matched_case_insensitively() {
        let map = AliasMap::scan("select * from Users u");
        assert_eq!(map.resolve("u"), Some("Users"));
    }

    #[test]
    fn alias_resolves_by_either_case() {
        let map = AliasMap::scan("SELECT * FROM users AS U");
        assert_eq!(map.resolve("U"), Some("users"));
        assert_eq!(map.resolve("u"), Some("users"));
    }

    #[test]
    fn table_reference_preserves_original_case() {
        let map = AliasMap::scan("FROM Accounts a");
        assert_eq!(map.resolve("a"), Some("Accounts"));
        assert_eq!(map.resolve("accounts"), Some("Accounts"));
    }

    // ── Overwrite semantics ─────────────────────────────────

    #[test]
    fn later_clause_wins_for_reused_alias() {
        let map = AliasMap::scan("SELECT * FROM users c; SELECT * FROM chargebacks c WHERE");
        assert_eq!(map.resolve("c"), Some("chargebacks"));
    }

    // ── Tolerance ───────────────────────────────────────────

    #[test]
    fn no_clauses_is_empty_map() {
        assert!(AliasMap::scan("SELECT 1 + 1").is_empty());
        assert!(AliasMap::scan("").is_empty());
    }

    #[test]
    fn trailing_from_without_table() {
        let map = AliasMap::scan("SELECT * FROM ");
        assert!(map.is_empty());
    }

    #[test]
    fn clause_keyword_not_captured_as_alias() {
        let map = AliasMap::scan("SELECT * FROM users WHERE id = 1");
        assert_eq!(map.resolve("users"), Some("users"));
        assert!(map.resolve("WHERE").is_none());
    }

    #[test]
    fn dangling_as_not_captured_as_alias() {
        let map = AliasMap::scan("SELECT * FROM users AS ");
        assert_eq!(map.resolve("users"), Some("users"));
        assert!(map.resolve("as").is_none());
    }

    #[test]
    fn rejected_alias_does_not_swallow_next_clause() {
        // `JOIN` lands in the alias slot of the FROM clause; the scan must
        // still pick up the join that follows.
        let map = AliasMap::scan("SELECT * FROM users JOIN orders o ON 1=1");
        assert_eq!(map.resolve("users"), Some("users"));
        assert_eq!(map.resolve("o"), Some("orders"));
    }

    #[test]
    fn newlines_between_clause_and_table() {
        let map = AliasMap::scan("SELECT *\nFROM\n    users\n    u");
        assert_eq!(map.resolve("u"), Some("users"));
    }

    // ── Comment handling ────────────────────────────────────

    #[test]
    fn block_comment_stripped_before_scan() {
        let map = AliasMap::scan("SELECT * /* FROM fake f */ FROM users u");
        assert_eq!(map.resolve("u"), Some("users"));
        assert!(map.resolve("f").is_none());
    }

    #[test]
    fn multiline_block_comment_stripped() {
        let map = AliasMap::scan("/* comment\nFROM fake f\n*/ SELECT * FROM users");
        assert!(map.resolve("fake").is_none());
        assert_eq!(map.resolve("users"), Some("users"));
    }

    #[test]
    fn line_comment_is_still_scanned() {
        // Known asymmetry: `--` comments are not stripped, so a clause
        // inside one is still captured.
        let map = AliasMap::scan("-- FROM ghosts g\nSELECT * FROM users");
        assert_eq!(map.resolve("g"), Some("ghosts"));
        assert_eq!(map.resolve("users"), Some("users"));
    }
}
