//! Options consumed by the catalog parsers.

use serde::{Deserialize, Serialize};

/// Separator used when no other is configured.
pub const DEFAULT_SEPARATOR: &str = ".";

/// Parser behavior options for [`crate::StringsFileParser`] and [`crate::StringsParser`].
///
/// Deserializable so that front ends can load it from a config file section;
/// missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Splits a flat key into its hierarchical path (see [`crate::Entry::key_structure`]).
    pub separator: String,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl ParserOptions {
    /// Creates default parser options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the key-structure separator.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}
