//! SQL formatting
//!
//! Formats the editor buffer using the sqlformat crate.

use sqlformat::{FormatOptions, Indent, QueryParams, format};

/// Format a SQL query string with the widget defaults (two-space indent,
/// uppercased keywords).
pub fn format_sql(sql: &str) -> String {
    let options = FormatOptions {
        indent: Indent::Spaces(2),
        uppercase: Some(true),
        lines_between_queries: 2,
        ignore_case_convert: None,
        ..Default::default()
    };

    format(sql, &QueryParams::None, &options)
}
