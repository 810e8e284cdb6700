//! Codec configuration.

/// Default document field name for the synthetic identity field.
pub const RESERVED_ID_FIELD: &str = "$$database_id$$";

/// Configuration for an [`EntityCodec`](crate::EntityCodec).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Whether JSON output is indented.
    pub pretty: bool,

    /// Whether attributes whose document value is null are left out on write.
    ///
    /// The identity field is always written.
    pub skip_nulls: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            skip_nulls: false,
        }
    }
}

impl CodecConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether JSON output is indented.
    #[must_use]
    pub const fn pretty(mut self, value: bool) -> Self {
        self.pretty = value;
        self
    }

    /// Sets whether null attributes are omitted on write.
    #[must_use]
    pub const fn skip_nulls(mut self, value: bool) -> Self {
        self.skip_nulls = value;
        self
    }
}
