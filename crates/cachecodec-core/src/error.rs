//! Error types for transformers and serializers.

use std::fmt;

use thiserror::Error;

/// Which way a transformer was being applied when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Value to representation (`forward` / `to`).
    Forward,
    /// Representation back to value (`backward` / `from`).
    Backward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => f.write_str("forward"),
            Self::Backward => f.write_str("backward"),
        }
    }
}

/// Malformed or truncated byte input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Fewer bytes were available than the format requires.
    #[error("buffer underrun: needed {needed} bytes, {available} available")]
    BufferUnderrun {
        /// Bytes the decoder needed to continue.
        needed: usize,
        /// Bytes that were actually left.
        available: usize,
    },

    /// The input continued past the end of the decoded value.
    #[error("trailing bytes: {remaining} bytes left after decoding")]
    TrailingBytes {
        /// Number of unread bytes.
        remaining: usize,
    },

    /// Text payload was not valid UTF-8.
    #[error("invalid UTF-8: {0}")]
    InvalidUtf8(String),

    /// An element count or length header cannot be right for this input.
    #[error("malformed count: {0}")]
    MalformedCount(String),

    /// The structured envelope could not be parsed.
    #[error("malformed envelope: {0}")]
    Envelope(String),
}

/// Errors produced by transformers and serializers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The forward direction (`to`) failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// The input bytes could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// One stage of a composed transformer failed.
    #[error("stage {stage} failed ({direction}): {source}")]
    Composition {
        /// 0 for the first transformer of the pair, 1 for the second.
        stage: usize,
        /// Direction the composition was being applied in.
        direction: Direction,
        /// The failure reported by that stage.
        source: Box<CodecError>,
    },
}

impl CodecError {
    /// Creates an encode error from any displayable message.
    #[must_use]
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode(message.into())
    }

    /// Wraps `self` as the failure of `stage` within a composition.
    #[must_use]
    pub fn at_stage(self, stage: usize, direction: Direction) -> Self {
        Self::Composition { stage, direction, source: Box::new(self) }
    }

    /// Returns the innermost error, looking through composition wrappers.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        let mut current = self;
        while let Self::Composition { source, .. } = current {
            current = &**source;
        }
        current
    }

    /// Returns the stage indices from the outermost composition inwards.
    ///
    /// Empty when the error did not come from a composition.
    #[must_use]
    pub fn stage_path(&self) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = self;
        while let Self::Composition { stage, source, .. } = current {
            path.push(*stage);
            current = &**source;
        }
        path
    }

    /// Returns the decode error at the root of this failure, if any.
    #[must_use]
    pub fn as_decode(&self) -> Option<&DecodeError> {
        match self.root_cause() {
            Self::Decode(err) => Some(err),
            _ => None,
        }
    }

    /// True when the root cause is malformed input.
    #[must_use]
    pub fn is_decode(&self) -> bool {
        self.as_decode().is_some()
    }

    /// True when the root cause is an encode failure.
    #[must_use]
    pub fn is_encode(&self) -> bool {
        matches!(self.root_cause(), Self::Encode(_))
    }
}

/// Result type used throughout the crate.
pub type CodecResult<T> = Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_cause_skips_compositions() {
        let err = CodecError::from(DecodeError::TrailingBytes { remaining: 3 })
            .at_stage(1, Direction::Backward)
            .at_stage(0, Direction::Backward);

        assert_eq!(err.stage_path(), vec![0, 1]);
        assert_eq!(err.as_decode(), Some(&DecodeError::TrailingBytes { remaining: 3 }));
        assert!(err.is_decode());
        assert!(!err.is_encode());
    }

    #[test]
    fn display_names_stage_and_direction() {
        let err = CodecError::encode("too long").at_stage(1, Direction::Forward);
        assert_eq!(err.to_string(), "stage 1 failed (forward): encode error: too long");
    }

    #[test]
    fn plain_errors_have_no_stage_path() {
        let err = CodecError::from(DecodeError::BufferUnderrun { needed: 4, available: 1 });
        assert!(err.stage_path().is_empty());
        assert_eq!(err.root_cause(), &err);
    }
}
