//! Loads and stores at public indices
//!
//! All kernels touch buffer memory exclusively through these helpers. That keeps the
//! word-wide fast path in one place and lets the unit tests record every access.

use core::ptr::{read_volatile, write_volatile};

/// Whether the kernels process four bytes at a time.
///
/// Words are read and written as `[u8; 4]`, which has alignment one, so this is purely a
/// performance switch: unaligned access is well defined on every target, it is just not cheap
/// on every target.
pub(crate) const WORD_ACCESS: bool = cfg!(all(
    feature = "word_access",
    any(
        target_arch = "x86",
        target_arch = "x86_64",
        target_arch = "arm",
        target_arch = "aarch64"
    )
));

/// Width in bytes of a word access
pub(crate) const WORD: usize = 4;

/// Copies `buf[i..i + 4]` into an array
#[inline(always)]
fn word_at(buf: &[u8], i: usize) -> [u8; WORD] {
    let mut w = [0u8; WORD];
    w.copy_from_slice(&buf[i..i + WORD]);
    w
}

/// Byte load
#[inline(always)]
pub(crate) fn load_u8(buf: &[u8], i: usize) -> u8 {
    let v = buf[i];
    #[cfg(test)]
    trace::record(trace::Kind::Load, &buf[i], 1);
    v
}

/// Byte store
#[inline(always)]
pub(crate) fn store_u8(buf: &mut [u8], i: usize, v: u8) {
    buf[i] = v;
    #[cfg(test)]
    trace::record(trace::Kind::Store, &buf[i], 1);
}

/// Load of four bytes starting at `i`, in native byte order
#[inline(always)]
pub(crate) fn load_u32(buf: &[u8], i: usize) -> u32 {
    let v = u32::from_ne_bytes(word_at(buf, i));
    #[cfg(test)]
    trace::record(trace::Kind::Load, &buf[i], WORD);
    v
}

/// Store of four bytes starting at `i`, in native byte order
#[inline(always)]
pub(crate) fn store_u32(buf: &mut [u8], i: usize, v: u32) {
    buf[i..i + WORD].copy_from_slice(&v.to_ne_bytes());
    #[cfg(test)]
    trace::record(trace::Kind::Store, &buf[i], WORD);
}

/// Volatile byte load; the compiler must perform it and may not reorder it with other
/// volatile accesses
#[inline(always)]
pub(crate) fn load_u8_volatile(buf: &[u8], i: usize) -> u8 {
    let p: *const u8 = &buf[i];
    #[cfg(test)]
    trace::record(trace::Kind::Load, &buf[i], 1);
    // SAFETY: `p` is derived from a live shared reference to an initialized byte
    unsafe { read_volatile(p) }
}

/// Volatile byte store
#[inline(always)]
pub(crate) fn store_u8_volatile(buf: &mut [u8], i: usize, v: u8) {
    let p: *mut u8 = &mut buf[i];
    // SAFETY: `p` is derived from a live unique reference to a byte
    unsafe { write_volatile(p, v) };
    #[cfg(test)]
    trace::record(trace::Kind::Store, &buf[i], 1);
}

/// Volatile load of four bytes starting at `i`, in native byte order
#[inline(always)]
pub(crate) fn load_u32_volatile(buf: &[u8], i: usize) -> u32 {
    let chunk = &buf[i..i + WORD];
    let p = chunk.as_ptr() as *const [u8; WORD];
    #[cfg(test)]
    trace::record(trace::Kind::Load, &buf[i], WORD);
    // SAFETY: `chunk` is exactly `WORD` initialized bytes and `[u8; WORD]` has alignment 1
    u32::from_ne_bytes(unsafe { read_volatile(p) })
}
