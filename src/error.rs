//! Codec error types.

use thiserror::Error;

/// Result type for codec operations.
pub type PackResult<T> = Result<T, PackError>;

/// Errors raised while encoding or decoding PackStream values.
///
/// Every error is raised at the point of detection and propagated to the
/// caller; the codec performs no recovery or default-value substitution. A
/// partially written buffer after a failed encode is the caller's to discard.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackError {
    /// Input ended in the middle of a value.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// Marker byte outside the closed PackStream enumeration.
    #[error("unknown marker byte 0x{0:02X}")]
    UnknownMarker(u8),

    /// String payload was not valid UTF-8.
    #[error("invalid UTF-8 in string payload: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// Dictionary key on the wire was not a string.
    #[error("dictionary keys must be strings")]
    InvalidDictKey,

    /// Payload exceeds the largest length prefix for its kind.
    #[error("{what} too large to encode: {size}")]
    ValueTooLarge {
        /// Kind of payload that overflowed ("string", "list", ...).
        what: &'static str,
        /// Offending length.
        size: usize,
    },

    /// Structure tag absent from the extension registry.
    #[error("unknown structure tag 0x{0:02X}")]
    UnknownStructTag(u8),

    /// Structure field count does not match the tag's declared arity.
    #[error("structure 0x{tag:02X} has {actual} fields, expected {expected:?}")]
    ArityMismatch {
        /// Structure tag.
        tag: u8,
        /// Field counts the registry accepts for this tag.
        expected: &'static [usize],
        /// Field count found on the wire.
        actual: usize,
    },

    /// Structure field was present but had the wrong shape.
    #[error("structure 0x{tag:02X} field {index} must be {expected}")]
    FieldType {
        /// Structure tag.
        tag: u8,
        /// Zero-based field index.
        index: usize,
        /// Expected wire shape.
        expected: &'static str,
    },

    /// Point coordinate count was neither 2 nor 3.
    #[error("point must have 2 or 3 coordinates, got {0}")]
    InvalidPointArity(usize),

    /// Temporal or numeric field outside the representable range.
    #[error("{0} out of representable range")]
    OutOfRange(&'static str),

    /// Value kind with no wire mapping (graph entities are server-owned).
    #[error("{0} values cannot be encoded")]
    Unsupported(&'static str),
}
