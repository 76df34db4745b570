//! Optimization barriers

use core::hint::black_box;
use core::ptr::read_volatile;

use crate::Word;

lazy_static::lazy_static! {
    /// A zero the optimizer cannot see through.
    ///
    /// Written exactly once on first use and never again; every read goes through
    /// [read_volatile] so the value is reloaded rather than constant-folded.
    static ref OPAQUE_ZERO: usize = black_box(0);
}

/// Returns zero, in a way the compiler cannot prove to be zero.
///
/// Mixing this value into a computation keeps the optimizer from folding the computation into
/// a constant, and thus from reasoning about which of two complementary masks is set.
///
/// # Examples
///
/// ```
/// use ctbuf_constant_time::opaque_zero;
/// assert_eq!(opaque_zero(), 0);
/// ```
#[inline]
pub fn opaque_zero() -> usize {
    let zero: &usize = &OPAQUE_ZERO;
    // SAFETY: `zero` is a valid, aligned reference to an initialized usize
    black_box(unsafe { read_volatile(zero) })
}

/// Identity function the compiler must not optimize across.
///
/// Used to break the provable relationship between a condition and its complement, which
/// would otherwise allow the optimizer to turn a masked select back into a branch.
///
/// # Examples
///
/// ```
/// use ctbuf_constant_time::opaque;
/// assert_eq!(opaque(0xa5u8), 0xa5);
/// assert_eq!(opaque(usize::MAX), usize::MAX);
/// ```
#[inline]
pub fn opaque<T: Word>(x: T) -> T {
    black_box(black_box(x) ^ T::truncate(opaque_zero()))
}
