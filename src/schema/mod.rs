//! Canonical schema model
//!
//! The host hands the widget schema data in a handful of loosely compatible
//! JSON shapes; [`normalize`] collapses them into this model. The schema is
//! always a full snapshot: it is rebuilt from the raw payload on every
//! change and has no identity across edits.

mod normalize;

pub use normalize::{normalize, normalize_str};

/// A table column.
///
/// Names are not required to be unique within a table; duplicates are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    /// Declared type, when the payload carried one
    pub ty: Option<String>,
}

/// A database table.
///
/// `columns` distinguishes "unknown" from "confirmed empty": `None` means
/// the payload did not describe the columns, `Some(vec![])` means it
/// described a table with no columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    pub columns: Option<Vec<Column>>,
}

/// Find a table by name: exact spelling first, then ASCII case-insensitive.
pub fn find_table<'a>(tables: &'a [Table], name: &str) -> Option<&'a Table> {
    tables
        .iter()
        .find(|t| t.name == name)
        .or_else(|| tables.iter().find(|t| t.name.eq_ignore_ascii_case(name)))
}
