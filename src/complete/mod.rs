//! Schema-aware SQL completion
//!
//! The completion pipeline runs on every keystroke and cursor move:
//!
//! 1. [`alias::AliasMap`] scans the text before the cursor for `FROM`/`JOIN`
//!    clauses and maps aliases to table names;
//! 2. [`context::classify`] decides what the user is completing;
//! 3. [`suggest::candidates`] emits a deduplicated candidate list.
//!
//! A [`CompletionProvider`] ties the stages to a schema snapshot. The host
//! registers a fresh provider whenever the schema changes (dropping the old
//! one), so an in-flight request always sees the snapshot it started with.

pub mod alias;
pub mod context;
pub mod suggest;

pub use alias::AliasMap;
pub use context::{CursorContext, word_before_cursor};

use crate::schema::Table;

/// A single completion candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// The text shown and inserted
    pub label: String,
    pub kind: CompletionKind,
    /// Extra text shown beside the label, e.g. `users.id (int)`
    pub detail: Option<String>,
}

/// Kind of completion candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionKind {
    Keyword,
    Table,
    Column,
}

/// One completion request: the live buffer state at the moment of the
/// keystroke. Borrowed, not owned; a request never outlives its event.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    /// Content of the cursor's line
    pub line: &'a str,
    /// Cursor column within `line`, as a byte offset
    pub col: usize,
    /// Full buffer text from the start up to (not including) the cursor
    pub before_cursor: &'a str,
}

/// A registered schema snapshot that answers completion requests.
///
/// Replacing the provider is the schema-change protocol: the old instance
/// is dropped and nothing stale can observe the new schema.
pub struct CompletionProvider {
    tables: Vec<Table>,
}

impl CompletionProvider {
    /// Register a provider over a schema snapshot.
    pub fn register(tables: Vec<Table>) -> Self {
        Self { tables }
    }

    /// The registered snapshot.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Produce candidates for a request.
    ///
    /// Pure function of the request and the registered snapshot; tolerates
    /// arbitrarily malformed or partial SQL and never fails.
    pub fn complete(&self, request: &CompletionRequest) -> Vec<Completion> {
        let aliases = AliasMap::scan(request.before_cursor);
        let ctx = context::classify(
            request.line,
            request.col,
            request.before_cursor,
            &aliases,
            &self.tables,
        );
        let partial = word_before_cursor(request.line, request.col);
        suggest::candidates(&ctx, &self.tables, partial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::normalize_str;

    fn provider() -> CompletionProvider {
        CompletionProvider::register(normalize_str(
            r#"{"tables":[{"name":"users","columns":[{"name":"id","type":"int"}]}]}"#,
        ))
    }

    fn request_at_end(buffer: &'static str) -> CompletionRequest<'static> {
        let line = buffer.rsplit('\n').next().unwrap_or(buffer);
        CompletionRequest {
            line,
            col: line.len(),
            before_cursor: buffer,
        }
    }

    #[test]
    fn pipeline_resolves_alias_to_columns() {
        let out = provider().complete(&request_at_end("SELECT * FROM users u WHERE u."));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].label, "id");
        assert_eq!(out[0].detail.as_deref(), Some("users.id (int)"));
    }

    #[test]
    fn replacing_provider_swaps_snapshot() {
        let old = provider();
        let new = CompletionProvider::register(normalize_str(
            r#"{"tables":[{"name":"orders"}]}"#,
        ));
        let request = request_at_end("SELECT * FROM ");
        let old_labels: Vec<_> = old.complete(&request).into_iter().map(|c| c.label).collect();
        let new_labels: Vec<_> = new.complete(&request).into_iter().map(|c| c.label).collect();
        assert!(old_labels.contains(&"users".to_string()));
        assert!(new_labels.contains(&"orders".to_string()));
        assert!(!new_labels.contains(&"users".to_string()));
    }

    #[test]
    fn empty_snapshot_still_offers_keywords() {
        let provider = CompletionProvider::register(Vec::new());
        let out = provider.complete(&request_at_end("SELECT "));
        assert!(!out.is_empty());
        assert!(out.iter().all(|c| c.kind == CompletionKind::Keyword));
    }
}
