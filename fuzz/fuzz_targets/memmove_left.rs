#![no_main]
extern crate arbitrary;

use libfuzzer_sys::fuzz_target;

use ctbuf_constant_time::memmove_left;

#[derive(arbitrary::Arbitrary, Debug)]
pub struct Input {
    pub offset: u16,
    pub buf: Box<[u8]>,
}

fuzz_target!(|input: Input| {
    // The shift is quadratic in the buffer length
    let buf = &input.buf[..input.buf.len().min(512)];
    let offset = input.offset as usize % (buf.len() + 1);

    let mut shifted = buf.to_vec();
    memmove_left(&mut shifted, offset);

    let mut expected = buf[offset..].to_vec();
    expected.resize(buf.len(), 0);
    assert_eq!(shifted, expected);
});
