//! Limits on sequence sizes, shared by encoding and decoding.

use serde::{Deserialize, Serialize};

/// Bounds on what a sequence serializer will produce or accept.
///
/// Encoding a sequence beyond these bounds is an encode error, so every
/// successful encoding decodes under the same limits. When decoding,
/// headers beyond the bounds are rejected as malformed before any
/// allocation is made for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeLimits {
    /// Maximum number of elements in one sequence (default: 16Mi).
    pub max_elements: u32,

    /// Maximum byte length of one variable-width element (default: 64MiB).
    pub max_element_len: u32,
}

impl DecodeLimits {
    /// The default limits, usable in `const` contexts.
    pub const DEFAULT: Self = Self { max_elements: 16 * 1024 * 1024, max_element_len: 64 * 1024 * 1024 };

    /// Sets the maximum element count.
    #[must_use]
    pub const fn with_max_elements(mut self, max_elements: u32) -> Self {
        self.max_elements = max_elements;
        self
    }

    /// Sets the maximum length of a single variable-width element.
    #[must_use]
    pub const fn with_max_element_len(mut self, max_element_len: u32) -> Self {
        self.max_element_len = max_element_len;
        self
    }
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self::DEFAULT
    }
}
