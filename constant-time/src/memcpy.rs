//! Conditional copy and copy from a secret offset

use crate::access::{load_u32, load_u8, store_u32, store_u8, WORD, WORD_ACCESS};
use crate::error::{ensure_offset_range, ensure_same_len, Error};
use crate::{opaque, uint_eq, uint_ge, uint_le, Condition};

/// Copies `src1` into `dest` if `condition` holds and `src2` otherwise.
///
/// With `src2 == None` the "otherwise" case reads from `dest` itself, turning the call into a
/// no-op that still performs every load and store. Each byte of `dest` is written exactly once,
/// in the same order, whatever the value of `condition`.
///
/// Copying into a buffer that also serves as `src1` is written as
/// `memcpy_if(!condition, dest, src2, None)`.
///
/// ## Panics
/// If `src1` or `src2` differ in length from `dest`. Lengths are public.
///
/// # Examples
///
/// ```
/// use ctbuf_constant_time::{memcpy_if, uint_eq};
///
/// let mut dest = *b"keep";
/// memcpy_if(uint_eq(1, 2), &mut dest, b"swap", None);
/// assert_eq!(&dest, b"keep");
/// memcpy_if(uint_eq(2, 2), &mut dest, b"swap", None);
/// assert_eq!(&dest, b"swap");
/// memcpy_if(uint_eq(1, 2), &mut dest, b"abcd", Some(&b"wxyz"[..]));
/// assert_eq!(&dest, b"wxyz");
/// ```
#[inline]
pub fn memcpy_if(condition: Condition, dest: &mut [u8], src1: &[u8], src2: Option<&[u8]>) {
    assert_eq!(src1.len(), dest.len(), "memcpy_if: src1 and dest differ in length");
    if let Some(src2) = src2 {
        assert_eq!(src2.len(), dest.len(), "memcpy_if: src2 and dest differ in length");
    }
    memcpy_if_unchecked(condition, dest, src1, src2)
}

/// Like [memcpy_if], but reports a length mismatch as an [Error] instead of panicking.
pub fn try_memcpy_if(
    condition: Condition,
    dest: &mut [u8],
    src1: &[u8],
    src2: Option<&[u8]>,
) -> Result<(), Error> {
    ensure_same_len(dest, src1)?;
    if let Some(src2) = src2 {
        ensure_same_len(dest, src2)?;
    }
    memcpy_if_unchecked(condition, dest, src1, src2);
    Ok(())
}

/// [memcpy_if] after the lengths have been checked
#[inline(always)]
fn memcpy_if_unchecked(condition: Condition, dest: &mut [u8], src1: &[u8], src2: Option<&[u8]>) {
    let mask = condition.mask32();
    let not_mask = !opaque(condition.mask32());

    let len = dest.len();
    let mut i = 0;

    if WORD_ACCESS {
        while i + WORD <= len {
            let a = load_u32(src1, i) & mask;
            let b = match src2 {
                Some(src2) => load_u32(src2, i),
                None => load_u32(dest, i),
            };
            store_u32(dest, i, a | (b & not_mask));
            i += WORD;
        }
    }

    while i < len {
        let a = load_u8(src1, i) & mask as u8;
        let b = match src2 {
            Some(src2) => load_u8(src2, i),
            None => load_u8(dest, i),
        };
        store_u8(dest, i, a | (b & not_mask as u8));
        i += 1;
    }
}

/// Copies `dest.len()` bytes from `src[offset..]` into `dest`, where `offset` is secret and
/// only known to lie in `offset_min..=offset_max`.
///
/// Every candidate offset is visited in ascending order and copied with [memcpy_if] under the
/// condition `candidate == offset`, so the memory read from `src` is the same for every
/// `offset` in range. The cost is `O((offset_max - offset_min + 1) * dest.len())`; keep the
/// range tight.
///
/// ## Panics
/// If `offset_min > offset_max` or `src` is shorter than `offset_max + dest.len()`. These
/// bounds are public.
///
/// An `offset` outside `offset_min..=offset_max` is a contract violation: debug builds
/// assert, release builds leave `dest` unchanged, which must be treated as an undefined
/// result.
///
/// # Examples
///
/// ```
/// use ctbuf_constant_time::memcpy_offset;
///
/// let record = *b"....payload....";
/// let mut payload = [0u8; 7];
/// memcpy_offset(&mut payload, &record, 4, 2, 8);
/// assert_eq!(&payload, b"payload");
/// ```
pub fn memcpy_offset(
    dest: &mut [u8],
    src: &[u8],
    offset: usize,
    offset_min: usize,
    offset_max: usize,
) {
    assert!(offset_min <= offset_max, "memcpy_offset: empty offset range");
    assert!(
        matches!(offset_max.checked_add(dest.len()), Some(end) if end <= src.len()),
        "memcpy_offset: source too short for offset_max"
    );
    memcpy_offset_unchecked(dest, src, offset, offset_min, offset_max)
}

/// Like [memcpy_offset], but reports invalid public bounds as an [Error] instead of panicking.
///
/// ```
/// use ctbuf_constant_time::{try_memcpy_offset, Error};
///
/// let mut dest = [0u8; 4];
/// assert_eq!(
///     try_memcpy_offset(&mut dest, &[0u8; 8], 1, 0, 5),
///     Err(Error::SourceTooShort { needed: 9, available: 8 })
/// );
/// assert_eq!(try_memcpy_offset(&mut dest, &[7u8; 8], 1, 0, 4), Ok(()));
/// assert_eq!(dest, [7; 4]);
/// ```
pub fn try_memcpy_offset(
    dest: &mut [u8],
    src: &[u8],
    offset: usize,
    offset_min: usize,
    offset_max: usize,
) -> Result<(), Error> {
    ensure_offset_range(src.len(), dest.len(), offset_min, offset_max)?;
    memcpy_offset_unchecked(dest, src, offset, offset_min, offset_max);
    Ok(())
}

/// [memcpy_offset] after the public bounds have been checked
fn memcpy_offset_unchecked(
    dest: &mut [u8],
    src: &[u8],
    offset: usize,
    offset_min: usize,
    offset_max: usize,
) {
    debug_assert!(
        (uint_ge(offset, offset_min) & uint_le(offset, offset_max)).declassify(),
        "memcpy_offset: secret offset outside of offset_min..=offset_max"
    );

    let len = dest.len();
    for candidate in offset_min..=offset_max {
        memcpy_if_unchecked(
            uint_eq(candidate, offset),
            dest,
            &src[candidate..candidate + len],
            None,
        );
    }
}
