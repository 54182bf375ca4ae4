//! Widget configuration
//!
//! Settings the host exposes upward: theme, gutter, wrap, border,
//! completion behavior. Loaded from `~/.querypad/config.toml`.

pub mod settings;

pub use settings::{Settings, load_settings};
