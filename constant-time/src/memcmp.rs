//! memcmp

use crate::access::{load_u32_volatile, load_u8_volatile, WORD, WORD_ACCESS};
use crate::error::{ensure_same_len, Error};
use crate::{uint_ge, uint_lt, Condition};

/// Compares two slices of memory and returns zero iff their contents are equal.
///
/// Every byte of both slices is read, through volatile loads, and the differences are OR-ed
/// into an accumulator that is never inspected inside the loop. Without the volatile loads the
/// compiler would be free to exit as soon as the accumulator becomes non-zero, which would leak
/// the position of the first differing byte.
///
/// The exact non-zero value carries no meaning. Use [memeq] to get a [Condition] instead.
///
/// ## Panics
/// If the two slices have different lengths. Lengths are public.
///
/// ## Leaks
/// The execution time of the function grows approx. linear with the length of the input. This
/// is considered safe.
///
/// ## Examples
///
/// ```rust
/// use ctbuf_constant_time::memcmp;
/// let a = [0, 0, 0, 0];
/// let b = [0, 0, 0, 1];
/// assert_eq!(memcmp(&a, &a), 0);
/// assert_ne!(memcmp(&a, &b), 0);
/// assert_eq!(memcmp(&[], &[]), 0);
/// ```
#[inline]
pub fn memcmp(a: &[u8], b: &[u8]) -> u32 {
    assert!(a.len() == b.len(), "memcmp: slices differ in length");
    memcmp_unchecked(a, b)
}

/// Like [memcmp], but reports a length mismatch as an [Error] instead of panicking.
///
/// ```rust
/// use ctbuf_constant_time::{try_memcmp, Error};
/// assert_eq!(try_memcmp(b"abc", b"abc"), Ok(0));
/// assert_eq!(
///     try_memcmp(b"abc", b"ab"),
///     Err(Error::LengthMismatch { expected: 3, actual: 2 })
/// );
/// ```
pub fn try_memcmp(a: &[u8], b: &[u8]) -> Result<u32, Error> {
    ensure_same_len(a, b)?;
    Ok(memcmp_unchecked(a, b))
}

/// [memcmp] without the length check; reads `a.len()` bytes of both slices
#[inline(always)]
fn memcmp_unchecked(a: &[u8], b: &[u8]) -> u32 {
    let n = a.len();
    let mut diff = 0u32;
    let mut i = 0;

    if WORD_ACCESS {
        while i + WORD <= n {
            let x = load_u32_volatile(a, i);
            let y = load_u32_volatile(b, i);
            diff |= x ^ y;
            i += WORD;
        }
    }

    while i < n {
        // Both volatile loads happen, in order, before the difference is taken
        let x = load_u8_volatile(a, i);
        let y = load_u8_volatile(b, i);
        diff |= (x ^ y) as u32;
        i += 1;
    }

    diff
}

/// Constant-time equality of two slices as a [Condition].
///
/// ## Panics
/// If the two slices have different lengths.
///
/// ```rust
/// use ctbuf_constant_time::memeq;
/// assert!(memeq(b"secret", b"secret").declassify());
/// assert!(!memeq(b"secret", b"secreT").declassify());
/// ```
#[inline]
pub fn memeq(a: &[u8], b: &[u8]) -> Condition {
    !Condition::from_nonzero(memcmp(a, b) as usize)
}

/// Compares the window `[skip_head, n - skip_tail)` of two slices, reading all `n` bytes.
///
/// `skip_head` and `skip_tail` may be secret: whether a position lies inside the window is
/// computed as a [Condition], and every position is read and folded into the accumulator
/// either way. Returns zero iff the windows are equal; an empty window compares equal.
///
/// ## Panics
/// If the two slices have different lengths. `skip_head + skip_tail > n` is a contract
/// violation that is only caught by a debug assertion.
///
/// ```rust
/// use ctbuf_constant_time::memcmp_partial;
/// let a = *b"XXpayloadYY";
/// let b = *b"__payload__";
/// assert_eq!(memcmp_partial(&a, &b, 2, 2), 0);
/// assert_ne!(memcmp_partial(&a, &b, 1, 2), 0);
/// ```
pub fn memcmp_partial(a: &[u8], b: &[u8], skip_head: usize, skip_tail: usize) -> u32 {
    assert!(a.len() == b.len(), "memcmp_partial: slices differ in length");
    let n = a.len();
    debug_assert!(skip_head <= n && skip_tail <= n - skip_head);

    let valid_end = n.wrapping_sub(skip_tail);
    let mut diff = 0u32;
    for i in 0..n {
        let x = load_u8_volatile(a, i);
        let y = load_u8_volatile(b, i);
        let valid = uint_ge(i, skip_head) & uint_lt(i, valid_end);
        diff |= valid.select_or_zero((x ^ y) as u32);
    }
    diff
}
