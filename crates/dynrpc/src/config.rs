//! Knobs shared by schema parsing, encoding and decoding.

/// Codec configuration.
///
/// The default parses schema documents leniently and
/// bounds recursion at [`Config::DEFAULT_MAX_DEPTH`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Maximum nesting depth walked by the encoder and decoder. Schema
    /// documents nested deeper are rejected when parsed.
    pub max_depth: usize,
    /// Reject duplicate ids/names, non-positive ids and empty objects when parsing.
    pub strict_schema: bool,
}

impl Config {
    pub const DEFAULT_MAX_DEPTH: usize = 64;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_strict_schema(mut self, strict: bool) -> Self {
        self.strict_schema = strict;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            strict_schema: false,
        }
    }
}
