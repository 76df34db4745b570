#![no_main]
extern crate arbitrary;

use libfuzzer_sys::fuzz_target;

use ctbuf_constant_time::{memcpy_offset, try_memcpy_offset};

#[derive(arbitrary::Arbitrary, Debug)]
pub struct Input {
    pub src: Box<[u8]>,
    pub len: u8,
    pub offset: u8,
    pub offset_min: u8,
    pub offset_max: u8,
}

fuzz_target!(|input: Input| {
    let len = input.len as usize;
    let (min, max) = (input.offset_min as usize, input.offset_max as usize);
    let mut dest = vec![0u8; len];

    // Public bounds are validated, never panicked on, by the checked variant
    let valid = min <= max && max + len <= input.src.len();
    assert_eq!(
        try_memcpy_offset(&mut dest, &input.src, min, min, max).is_ok(),
        valid
    );
    if !valid {
        return;
    }

    let offset = min + input.offset as usize % (max - min + 1);
    memcpy_offset(&mut dest, &input.src, offset, min, max);
    assert_eq!(&dest[..], &input.src[offset..offset + len]);
});
