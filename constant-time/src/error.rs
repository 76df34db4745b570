//! Errors reported by the checked front-ends
//!
//! Only public parameters (buffer lengths, the bounds of an offset range) are ever validated.
//! Secret values are never checked outside of debug assertions.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
/// Public-parameter validation failures of the `try_*` functions
pub enum Error {
    #[error("Length mismatch: expected {expected} bytes, got {actual}")]
    /// Two buffers that must have the same length do not
    LengthMismatch {
        /// Length of the reference buffer
        expected: usize,
        /// Length of the offending buffer
        actual: usize,
    },
    #[error("Offset range {min}..={max} is empty")]
    /// The lower bound of an offset range lies above its upper bound
    InvertedRange {
        /// Lower bound
        min: usize,
        /// Upper bound
        max: usize,
    },
    #[error("Source too short: {needed} bytes needed at the largest offset, {available} available")]
    /// Copying from the largest candidate offset would read past the end of the source
    SourceTooShort {
        /// Bytes needed to read `len` bytes from `offset_max`
        needed: usize,
        /// Length of the source
        available: usize,
    },
}

/// Checks a condition is true and returns an error if not.
pub(crate) fn ensure_or(b: bool, err: Error) -> Result<(), Error> {
    match b {
        true => Ok(()),
        false => {
            log::debug!("rejecting constant-time operation: {err}");
            Err(err)
        }
    }
}

/// Both buffers have the same length
pub(crate) fn ensure_same_len(expected: &[u8], actual: &[u8]) -> Result<(), Error> {
    ensure_or(
        expected.len() == actual.len(),
        Error::LengthMismatch {
            expected: expected.len(),
            actual: actual.len(),
        },
    )
}

/// `src` can supply `len` bytes from every offset in `offset_min..=offset_max`
pub(crate) fn ensure_offset_range(
    src_len: usize,
    len: usize,
    offset_min: usize,
    offset_max: usize,
) -> Result<(), Error> {
    ensure_or(
        offset_min <= offset_max,
        Error::InvertedRange {
            min: offset_min,
            max: offset_max,
        },
    )?;
    let needed = offset_max.checked_add(len);
    ensure_or(
        matches!(needed, Some(n) if n <= src_len),
        Error::SourceTooShort {
            needed: needed.unwrap_or(usize::MAX),
            available: src_len,
        },
    )
}
