//! Error types for state construction, layout conversion, and heralding.

use thiserror::Error;

/// Errors arising from state construction, layout conversion, or heralding.
///
/// All variants are local to the failing call; no partial result is returned
/// alongside any of them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// A character outside the permitted alphabet of a specification string.
    #[error("invalid character '{ch}' in {context}")]
    InvalidDigit { ch: char, context: &'static str },

    /// A Fock occupation number at or above the truncation.
    #[error("occupation number {n} exceeds cutoff {cutoff}")]
    InvalidOccupation { n: usize, cutoff: usize },

    /// A specification string containing zero terms.
    #[error("state specification contains no terms")]
    EmptySpec,

    /// Terms of one specification expanding to unequal mode counts.
    #[error("specification terms expand to unequal mode counts: \
        expected {expected}, got {got}")]
    ModeCountMismatch { expected: usize, got: usize },

    /// An array argument whose shape does not match the `cutoff`/mode-count
    /// contract of the operation.
    #[error("array shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: String, got: String },

    /// A mode count outside the single-letter label alphabet.
    #[error("mode count {n} outside the label alphabet (1 ..= 26)")]
    TooManyModes { n: usize },

    /// An unrecognized tensor-product mode selector.
    #[error("combine mode must be \"tensor\" or \"kron\", got \"{0}\"")]
    InvalidCombine(String),

    /// A smoothing window incompatible with the data length.
    #[error("smoothing window {window} invalid for data of length {len}")]
    InvalidWindow { window: usize, len: usize },
}

pub type StateResult<T> = Result<T, StateError>;
