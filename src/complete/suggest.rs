//! Candidate generation
//!
//! Builds the flat completion list for a classified context, filters
//! keywords by the typed partial word, and deduplicates by label + detail.
//! Table and column candidates are never filtered here; narrowing them
//! further is the host editor's job.

use std::collections::HashSet;

use crate::schema::{Table, find_table};

use super::context::CursorContext;
use super::{Completion, CompletionKind};

/// Keyword candidates offered in the default context.
pub const KEYWORDS: &[&str] = &[
    "SELECT",
    "FROM",
    "WHERE",
    "JOIN",
    "LEFT JOIN",
    "RIGHT JOIN",
    "INNER JOIN",
    "OUTER JOIN",
    "CROSS JOIN",
    "ON",
    "AND",
    "OR",
    "NOT",
    "IN",
    "EXISTS",
    "BETWEEN",
    "LIKE",
    "IS",
    "NULL",
    "AS",
    "DISTINCT",
    "GROUP BY",
    "ORDER BY",
    "HAVING",
    "LIMIT",
    "OFFSET",
    "UNION",
    "INSERT INTO",
    "VALUES",
    "UPDATE",
    "SET",
    "DELETE",
    "CASE",
    "WHEN",
    "THEN",
    "ELSE",
    "END",
];

/// Clause-continuation keywords offered right after FROM/JOIN.
const TABLE_CONTEXT_KEYWORDS: &[&str] = &["ON", "WHERE", "AND", "OR"];

/// Produce the candidate list for a context.
pub fn candidates(context: &CursorContext, tables: &[Table], partial: &str) -> Vec<Completion> {
    let mut out = Vec::new();
    match context {
        CursorContext::Table => {
            push_keywords(&mut out, TABLE_CONTEXT_KEYWORDS, partial);
            for table in tables {
                out.push(table_completion(table));
            }
        }
        CursorContext::Column { table } => {
            if let Some(table) = find_table(tables, table) {
                push_columns(&mut out, table);
            }
        }
        CursorContext::Default => {
            push_keywords(&mut out, KEYWORDS, partial);
            for table in tables {
                out.push(table_completion(table));
            }
            for table in tables {
                push_columns(&mut out, table);
            }
        }
    }
    dedup(out)
}

/// Tolerant bidirectional prefix match, case-insensitive: either side may
/// be a prefix of the other.
fn matches_partial(candidate: &str, partial: &str) -> bool {
    if partial.is_empty() {
        return true;
    }
    let c = candidate.to_ascii_lowercase();
    let p = partial.to_ascii_lowercase();
    c.starts_with(&p) || p.starts_with(&c)
}

fn push_keywords(out: &mut Vec<Completion>, keywords: &[&str], partial: &str) {
    for kw in keywords {
        if matches_partial(kw, partial) {
            out.push(Completion {
                label: kw.to_string(),
                kind: CompletionKind::Keyword,
                detail: None,
            });
        }
    }
}

fn table_completion(table: &Table) -> Completion {
    Completion {
        label: table.name.clone(),
        kind: CompletionKind::Table,
        detail: None,
    }
}

/// Push one candidate per column, annotated `<table>.<column> (<type>)`
/// when the type is known. Tables with unknown columns contribute nothing.
fn push_columns(out: &mut Vec<Completion>, table: &Table) {
    let Some(columns) = &table.columns else {
        return;
    };
    for col in columns {
        let detail = match &col.ty {
            Some(ty) => format!("{}.{} ({})", table.name, col.name, ty),
            None => format!("{}.{}", table.name, col.name),
        };
        out.push(Completion {
            label: col.name.clone(),
            kind: CompletionKind::Column,
            detail: Some(detail),
        });
    }
}

/// Collapse candidates sharing the same label and detail; the first
/// occurrence wins, so the operation is idempotent.
fn dedup(candidates: Vec<Completion>) -> Vec<Completion> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let key = (candidate.label.clone(), candidate.detail.clone());
        if seen.insert(key) {
            out.push(candidate);
        }
    }
    out
}
