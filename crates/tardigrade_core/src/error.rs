use alloc::string::String;
use core::fmt;

/// Errors raised by the walk engine.
///
/// Every variant indicates a broken constant or configuration rather than bad
/// input data: a run that hits one of them is aborted as a whole and no partial
/// history is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkError {
    /// A neuron received an input vector whose length differs from its weights
    DimensionMismatch { expected: usize, got: usize },
    /// The digest is too short to be cut into the requested number of segments
    DegenerateHashSegment { digest_len: usize, segments: usize },
    /// A digest segment contained a non-hexadecimal character
    InvalidHex(String),
    /// Batch size of zero
    InvalidBatchSize,
    /// Motor parameter shape that cannot produce a weight vector plus a bias
    InvalidMotorShape { weights: usize, biases: usize },
}

impl fmt::Display for WalkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalkError::DimensionMismatch { expected, got } => write!(
                f,
                "Input and weight vectors must be of the same length (expected {}, got {})",
                expected, got
            ),
            WalkError::DegenerateHashSegment {
                digest_len,
                segments,
            } => write!(
                f,
                "Digest of {} hex chars cannot be split into {} non-empty segments",
                digest_len, segments
            ),
            WalkError::InvalidHex(segment) => write!(f, "Invalid hex segment: {:?}", segment),
            WalkError::InvalidBatchSize => write!(f, "Batch size must be at least 1"),
            WalkError::InvalidMotorShape { weights, biases } => write!(
                f,
                "Motor neuron needs at least one weight and one bias (got {} weights, {} biases)",
                weights, biases
            ),
        }
    }
}

#[cfg(any(feature = "std", test))]
impl std::error::Error for WalkError {}
