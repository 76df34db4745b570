//! Shifting by a secret amount

use crate::access::{load_u8_volatile, store_u8_volatile};
use crate::{uint_gt, uint_le};

/// Shifts the contents of `buf` left by a secret `offset`, filling the vacated tail with zeros.
///
/// A direct shift would load `buf[n + offset]`, an address depending on the secret. Instead the
/// function makes `buf.len()` passes over the whole buffer; each pass either leaves the buffer
/// as it is or shifts it left by one byte and zeroes the last byte, decided by a [Condition].
/// The first `len - offset` passes are no-ops, the remaining `offset` passes shift. Every pass
/// loads and stores every byte, so the work is `O(len²)` and the access pattern depends only on
/// `buf.len()`.
///
/// ## Leaks
/// The execution time grows quadratically with `buf.len()`. It does not depend on `offset`.
///
/// An `offset` larger than `buf.len()` is a contract violation, caught by a debug assertion
/// only.
///
/// # Examples
///
/// ```
/// use ctbuf_constant_time::memmove_left;
///
/// let mut buf = [1, 2, 3, 4, 5, 6, 7, 8];
/// memmove_left(&mut buf, 3);
/// assert_eq!(buf, [4, 5, 6, 7, 8, 0, 0, 0]);
/// ```
///
/// [Condition]: crate::Condition
pub fn memmove_left(buf: &mut [u8], offset: usize) {
    let total = buf.len();
    debug_assert!(
        uint_le(offset, total).declassify(),
        "memmove_left: secret offset exceeds the buffer length"
    );
    if total == 0 {
        return;
    }

    for i in 0..total {
        let no_op = uint_gt(total.wrapping_sub(offset), i);
        for n in 0..total - 1 {
            let current = load_u8_volatile(buf, n);
            let next = load_u8_volatile(buf, n + 1);
            store_u8_volatile(buf, n, no_op.select(current, next));
        }
        let last = load_u8_volatile(buf, total - 1);
        store_u8_volatile(buf, total - 1, no_op.select_or_zero(last));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::trace;

    fn naive(buf: &[u8], offset: usize) -> Vec<u8> {
        let mut out = buf[offset..].to_vec();
        out.resize(buf.len(), 0);
        out
    }

    #[test]
    fn shifts_by_three() {
        let mut buf = [1, 2, 3, 4, 5, 6, 7, 8];
        memmove_left(&mut buf, 3);
        assert_eq!(buf, [4, 5, 6, 7, 8, 0, 0, 0]);
    }

    #[test]
    fn zero_offset_is_identity() {
        let mut buf = [1, 2, 3, 4, 5, 6, 7, 8];
        memmove_left(&mut buf, 0);
        assert_eq!(buf, [1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn full_offset_clears() {
        let mut buf = [1, 2, 3, 4, 5, 6, 7, 8];
        memmove_left(&mut buf, 8);
        assert_eq!(buf, [0; 8]);
    }

    #[test]
    fn degenerate_lengths() {
        let mut empty: [u8; 0] = [];
        memmove_left(&mut empty, 0);

        let mut one = [9u8];
        memmove_left(&mut one, 0);
        assert_eq!(one, [9]);
        memmove_left(&mut one, 1);
        assert_eq!(one, [0]);
    }

    #[test]
    fn matches_naive_shift() {
        for total in 1..20usize {
            let buf = (1..=total as u8).collect::<Vec<_>>();
            for offset in 0..=total {
                let mut shifted = buf.clone();
                memmove_left(&mut shifted, offset);
                assert_eq!(shifted, naive(&buf, offset), "total = {total}, offset = {offset}");
            }
        }
    }

    #[test]
    fn access_pattern_independent_of_offset() {
        // (kind, position within the buffer) of every access
        fn pattern(offset: usize) -> Vec<(trace::Kind, usize)> {
            let mut buf = [0xa5u8; 12];
            let base = buf.as_ptr() as usize;
            trace::capture(|| memmove_left(&mut buf, offset))
                .into_iter()
                .map(|a| (a.kind, a.addr - base))
                .collect()
        }

        let reference = pattern(0);
        // Every pass loads two bytes and stores one per adjacent pair, then handles the last byte
        assert_eq!(reference.len(), 12 * (11 * 3 + 2));
        for offset in 1..=12 {
            assert_eq!(pattern(offset), reference, "offset = {offset}");
        }
    }

    #[cfg(feature = "constant_time_tests")]
    #[test]
    /// The secret shift width does not influence the run time of memmove_left
    fn memmove_left_runs_in_constant_time() {
        use crate::timing::{assert_uncorrelated, time};
        use core::hint::black_box;

        let mut buf = [0x33u8; 64];
        assert_uncorrelated("memmove_left", |class| {
            let offset = match class {
                true => 0,
                false => 63,
            };
            time(|| memmove_left(black_box(&mut buf), black_box(offset)))
        });
    }
}
