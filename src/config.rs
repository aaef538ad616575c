/// Nesting limit used unless overridden.
pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DecoderConfig {
    /// Deepest container nesting accepted. The top-level value sits at depth 0.
    pub max_depth: usize,
    /// Reject non-canonical input: leading zeros, negative zero, unsorted or
    /// duplicate dictionary keys.
    pub strict: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        DecoderConfig { max_depth: DEFAULT_MAX_DEPTH, strict: false }
    }
}

impl DecoderConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }
}
