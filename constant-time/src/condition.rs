//! Secret booleans and the branch-free comparisons producing them

use core::hint::black_box;
use core::ops::{BitAnd, BitOr, BitXor, Not};

use static_assertions::const_assert;

use crate::opaque;

// Masks are narrowed to 32 bits for the word-wide kernels
const_assert!(usize::BITS >= u32::BITS);

mod sealed {
    /// Restricts [super::Word] to the primitive unsigned integers
    pub trait Sealed {}
}

/// Unsigned machine words a [Condition] can be turned into a mask for.
///
/// Implemented for `u8`, `u16`, `u32`, `u64` and `usize`. The trait is sealed.
pub trait Word:
    Copy
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
    + sealed::Sealed
{
    /// Keeps the low bits of `v` that fit into `Self`
    fn truncate(v: usize) -> Self;

    /// Widens or narrows an all-ones/all-zeros mask, preserving the all-ones pattern
    fn from_mask(mask: usize) -> Self;
}

/// Implements [Word] for the given primitive integers
macro_rules! impl_word {
    ($($t:ty),*) => {$(
        impl sealed::Sealed for $t {}

        impl Word for $t {
            #[inline(always)]
            fn truncate(v: usize) -> Self {
                v as $t
            }

            #[inline(always)]
            fn from_mask(mask: usize) -> Self {
                // Sign extension turns all ones into all ones in every width
                mask as isize as i64 as $t
            }
        }
    )*};
}

impl_word!(u8, u16, u32, u64, usize);

/// A secret boolean.
///
/// Internally a machine word that is either all ones (true) or all zeros (false). A condition
/// is consumed only through bitwise arithmetic: masking ([Condition::mask]), selecting
/// ([Condition::select]) and combining with `!`, `&`, `|` and `^`. There is deliberately no
/// `PartialEq` implementation; turning a condition into a `bool` is an explicit
/// [Condition::declassify].
///
/// # Examples
///
/// ```
/// use ctbuf_constant_time::{uint_eq, uint_lt, Condition};
///
/// let c = uint_eq(3, 3) & uint_lt(1, 2);
/// assert_eq!(c.select(0xaau8, 0x55), 0xaa);
/// assert_eq!((!c).mask32(), 0);
/// assert!(c.declassify());
/// assert!(!Condition::from_nonzero(0).declassify());
/// ```
#[derive(Clone, Copy, Debug)]
#[must_use]
pub struct Condition(usize);

impl Condition {
    /// The condition that holds
    pub const TRUE: Self = Condition(usize::MAX);
    /// The condition that does not hold
    pub const FALSE: Self = Condition(0);

    /// Lifts a public `bool` into a condition.
    #[inline]
    pub fn from_bool(b: bool) -> Self {
        Condition(opaque(b as usize).wrapping_neg())
    }

    /// True iff `x` is non-zero.
    ///
    /// The most significant bit of `x | -x` is set exactly when `x != 0`; it is spread over the
    /// whole word by negation.
    #[inline]
    pub fn from_nonzero(x: usize) -> Self {
        let xo = opaque(x);
        let msb = (xo | xo.wrapping_neg()) >> (usize::BITS - 1);
        Condition(msb.wrapping_neg())
    }

    /// The condition as a mask of the requested width
    #[inline]
    pub fn mask<T: Word>(self) -> T {
        T::from_mask(self.0)
    }

    /// The condition as a 32 bit mask, `0xffff_ffff` for true and `0` for false
    #[inline]
    pub fn mask32(self) -> u32 {
        self.mask()
    }

    /// Returns `if_true` when the condition holds and `if_false` otherwise, without branching.
    ///
    /// The complement mask is derived through [opaque] so the compiler cannot prove the two
    /// masks complementary and rewrite the select as a branch.
    #[inline]
    pub fn select<T: Word>(self, if_true: T, if_false: T) -> T {
        let mask: T = self.mask();
        let not_mask = !opaque(mask);
        (if_true & mask) | (if_false & not_mask)
    }

    /// Returns `x` when the condition holds and zero otherwise.
    #[inline]
    pub fn select_or_zero<T: Word>(self, x: T) -> T {
        x & self.mask()
    }

    /// Turns the condition into a plain `bool`.
    ///
    /// This is where the secret stops being secret. Only call it on values that are allowed to
    /// become public, such as the final verdict of a MAC check.
    #[inline]
    pub fn declassify(self) -> bool {
        black_box(self.0) != 0
    }
}

impl Not for Condition {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        Condition(!self.0)
    }
}

impl BitAnd for Condition {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Condition(self.0 & rhs.0)
    }
}

impl BitOr for Condition {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Condition(self.0 | rhs.0)
    }
}

impl BitXor for Condition {
    type Output = Self;

    #[inline]
    fn bitxor(self, rhs: Self) -> Self {
        Condition(self.0 ^ rhs.0)
    }
}

/// `x != y`
#[inline]
pub fn uint_ne(x: usize, y: usize) -> Condition {
    Condition::from_nonzero(x ^ opaque(y))
}

/// `x == y`
///
/// ```
/// use ctbuf_constant_time::uint_eq;
/// assert!(uint_eq(7, 7).declassify());
/// assert!(!uint_eq(7, 8).declassify());
/// ```
#[inline]
pub fn uint_eq(x: usize, y: usize) -> Condition {
    !uint_ne(x, y)
}

/// `x < y`
///
/// If the most significant bits of `x` and `y` differ, the operand with the bit set is the
/// larger one. Otherwise `x - y` wraps around, setting its most significant bit, exactly when
/// `x < y`.
#[inline]
pub fn uint_lt(x: usize, y: usize) -> Condition {
    let xo = opaque(x);
    let yo = opaque(y);
    let msb_differ = Condition::from_nonzero((xo ^ yo) >> (usize::BITS - 1));
    let ret = msb_differ.select(yo, xo.wrapping_sub(yo));
    Condition::from_nonzero(ret >> (usize::BITS - 1))
}

/// `x > y`
///
/// ```
/// use ctbuf_constant_time::uint_gt;
/// assert!(uint_gt(usize::MAX, 0).declassify());
/// assert!(!uint_gt(5, 5).declassify());
/// ```
#[inline]
pub fn uint_gt(x: usize, y: usize) -> Condition {
    uint_lt(y, x)
}

/// `x <= y`
#[inline]
pub fn uint_le(x: usize, y: usize) -> Condition {
    !uint_gt(x, y)
}

/// `x >= y`
#[inline]
pub fn uint_ge(x: usize, y: usize) -> Condition {
    !uint_lt(x, y)
}
