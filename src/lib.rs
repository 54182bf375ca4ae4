//! querypad - an embeddable, schema-aware SQL editor widget
//!
//! querypad provides a terminal SQL editor with syntax highlighting and
//! schema-aware autocomplete, designed to be embedded in a host
//! application that supplies the schema and owns the event loop.
//!
//! # Architecture
//!
//! - [`schema`]: canonical table/column model and payload normalization
//! - [`complete`]: the completion pipeline: alias resolution, cursor
//!   context classification, suggestion generation
//! - [`ui`]: the editor widget, syntax highlighting, and themes
//! - [`config`]: widget options loaded from TOML
//! - [`app`]: a demo shell standing in for the host application
//! - [`error`]: error types and result aliases (shell only; the
//!   completion core never fails)
//!
//! # Example
//!
//! ```
//! use querypad::complete::{CompletionProvider, CompletionRequest};
//! use querypad::schema::normalize_str;
//!
//! let tables = normalize_str(
//!     r#"{"tables":[{"name":"users","columns":[{"name":"id","type":"int"}]}]}"#,
//! );
//! let provider = CompletionProvider::register(tables);
//!
//! let buffer = "SELECT * FROM users u WHERE u.";
//! let request = CompletionRequest {
//!     line: buffer,
//!     col: buffer.len(),
//!     before_cursor: buffer,
//! };
//! let candidates = provider.complete(&request);
//! assert_eq!(candidates[0].label, "id");
//! ```

pub mod app;
pub mod complete;
pub mod config;
pub mod error;
pub mod format;
pub mod schema;
pub mod ui;

pub use error::{ConfigError, QuerypadError, Result};
