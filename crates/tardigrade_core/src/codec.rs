//! Hash → float codec.
//!
//! Signatures are digested with SHA-256 and rendered as lowercase hex. Slices of
//! that hex string are then read as unsigned integers and scaled into [-1, 1].

use alloc::string::{String, ToString};
use sha2::{Digest, Sha256};

use crate::WalkError;

/// Length of a SHA-256 digest rendered as hex.
pub const DIGEST_HEX_LEN: usize = 64;

/// SHA-256 of `signature`, as 64 lowercase hex characters.
pub fn digest(signature: &str) -> String {
    hex::encode(Sha256::digest(signature.as_bytes()))
}

/// Longest slice that fits the 128-bit accumulator (half a digest).
pub const MAX_SLICE_HEX_LEN: usize = 32;

/// Map a hex slice to a float in [-1, 1].
///
/// The slice is read as a base-16 unsigned integer `n` and scaled as
/// `n / (16^len - 1) * 2 - 1`, so all-zero maps to -1.0 and all-`f` to 1.0.
/// `n` is accumulated exactly and rounded to f64 once, so slices longer than
/// 13 digits still round to the nearest representable value.
pub fn hex_slice_to_unit_float(slice: &str) -> Result<f64, WalkError> {
    if slice.is_empty() || slice.len() > MAX_SLICE_HEX_LEN {
        return Err(WalkError::DegenerateHashSegment {
            digest_len: slice.len(),
            segments: 1,
        });
    }

    let mut value: u128 = 0;
    for c in slice.chars() {
        let digit = c
            .to_digit(16)
            .ok_or_else(|| WalkError::InvalidHex(slice.to_string()))?;
        value = (value << 4) | digit as u128;
    }

    let max = libm::pow(16.0, slice.len() as f64) - 1.0;
    let normalized = value as f64 / max;
    Ok(normalized * 2.0 - 1.0)
}
