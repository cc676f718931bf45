//! Encoder and decoder configuration.

/// Largest array index the decoder accepts by default.
pub const DEFAULT_MAX_INDEX: usize = 65_535;

/// Placeholder slots one decode may pad into arrays by default.
///
/// Sparse indices are padded with placeholders. The per-index limit alone
/// still lets every fragment add `max_index + 1` slots, so the total across
/// all fragments of one input is bounded separately.
pub const DEFAULT_MAX_PLACEHOLDERS: usize = 131_072;

/// How the encoder treats `null` leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullPolicy {
    /// Emit nothing for the leaf. Array positions are kept, so a skipped
    /// element decodes as an empty-object placeholder.
    #[default]
    Skip,
    /// Emit the literal string `null`, as JavaScript string coercion does.
    Literal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Percent-encode each top-level group a second time.
    pub percent_encode: bool,
    /// Path key prepended to every emitted key.
    pub prefix: String,
    pub nulls: NullPolicy,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            percent_encode: true,
            prefix: String::new(),
            nulls: NullPolicy::Skip,
        }
    }
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_percent_encode(mut self, percent_encode: bool) -> Self {
        self.percent_encode = percent_encode;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_nulls(mut self, nulls: NullPolicy) -> Self {
        self.nulls = nulls;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Undo the encoder's outer percent-encoding layer first.
    pub double_decode: bool,
    pub max_index: usize,
    /// Total array slots padding may add during one decode.
    pub max_placeholders: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            double_decode: true,
            max_index: DEFAULT_MAX_INDEX,
            max_placeholders: DEFAULT_MAX_PLACEHOLDERS,
        }
    }
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_double_decode(mut self, double_decode: bool) -> Self {
        self.double_decode = double_decode;
        self
    }

    pub fn with_max_index(mut self, max_index: usize) -> Self {
        self.max_index = max_index;
        self
    }

    pub fn with_max_placeholders(mut self, max_placeholders: usize) -> Self {
        self.max_placeholders = max_placeholders;
        self
    }
}
