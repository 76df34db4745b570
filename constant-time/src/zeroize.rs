//! Conditional zeroize

use crate::access::{load_u32, load_u8, store_u32, store_u8, WORD, WORD_ACCESS};
use crate::Condition;

/// Zeroes `buf` if `condition` holds and leaves its contents untouched otherwise.
///
/// Every byte is loaded, masked with `!condition` and stored back in both cases; only the
/// effect of the store differs.
///
/// # Examples
///
/// ```
/// use ctbuf_constant_time::{uint_eq, zeroize_if};
///
/// let mut key = [0x42u8; 16];
/// zeroize_if(uint_eq(0, 1), &mut key);
/// assert_eq!(key, [0x42; 16]);
/// zeroize_if(uint_eq(1, 1), &mut key);
/// assert_eq!(key, [0; 16]);
/// ```
#[inline]
pub fn zeroize_if(condition: Condition, buf: &mut [u8]) {
    let mask = (!condition).mask32();
    let len = buf.len();
    let mut i = 0;

    if WORD_ACCESS {
        while i + WORD <= len {
            let v = load_u32(buf, i);
            store_u32(buf, i, v & mask);
            i += WORD;
        }
    }

    while i < len {
        let v = load_u8(buf, i);
        store_u8(buf, i, v & mask as u8);
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::trace;
    use rand::RngCore;

    #[test]
    fn zeroes_when_true() {
        for len in 0..20 {
            let mut buf = vec![0u8; len];
            rand::thread_rng().fill_bytes(&mut buf);
            zeroize_if(Condition::TRUE, &mut buf);
            assert!(buf.iter().all(|&b| b == 0), "len = {len}");
        }
    }

    #[test]
    fn untouched_when_false() {
        for len in 0..20 {
            let mut buf = vec![0u8; len];
            rand::thread_rng().fill_bytes(&mut buf);
            let original = buf.clone();
            zeroize_if(Condition::FALSE, &mut buf);
            assert_eq!(buf, original);
        }
    }

    #[test]
    fn idempotent() {
        let mut once = *b"some secret material";
        zeroize_if(Condition::TRUE, &mut once);
        let mut twice = *b"some secret material";
        zeroize_if(Condition::TRUE, &mut twice);
        zeroize_if(Condition::TRUE, &mut twice);
        assert_eq!(once, twice);
        assert_eq!(once, [0; 20]);
    }

    #[test]
    fn write_pattern_independent_of_condition() {
        let mut buf = [0x77u8; 19];
        let t = trace::capture(|| zeroize_if(Condition::TRUE, &mut buf));
        let f = trace::capture(|| zeroize_if(Condition::FALSE, &mut buf));
        assert_eq!(t, f);
        let written: usize = trace::stores(&t).iter().map(|a| a.width).sum();
        assert_eq!(written, buf.len());
    }

    #[cfg(feature = "constant_time_tests")]
    #[test]
    /// Zeroing takes as long as not zeroing
    fn zeroize_if_runs_in_constant_time() {
        use crate::timing::{assert_uncorrelated, time};
        use core::hint::black_box;

        let mut buf = [0x44u8; 1024];
        assert_uncorrelated("zeroize_if", |class| {
            buf.fill(0x44);
            let c = Condition::from_bool(class);
            time(|| zeroize_if(black_box(c), black_box(&mut buf)))
        });
    }
}
