//! Parser configuration.

use serde::{Deserialize, Serialize};

/// Default recursion limit for nested expressions and statement blocks.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Knobs that change how a script is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Surface the first recorded diagnostic instead of dropping it.
    pub strict: bool,
    /// Nesting limit; exceeding it is a parse error.
    pub max_depth: usize,
    /// Batch separator word, compared case-insensitively.
    pub batch_separator: String,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            strict: false,
            max_depth: DEFAULT_MAX_DEPTH,
            batch_separator: "GO".to_string(),
        }
    }
}

impl ParserOptions {
    /// Lenient defaults with `strict` turned on.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    /// Returns these options with a different recursion limit.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
