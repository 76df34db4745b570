#![no_main]
extern crate arbitrary;

use libfuzzer_sys::fuzz_target;

use ctbuf_constant_time::{memcpy_if, Condition};

#[derive(arbitrary::Arbitrary, Debug)]
pub struct Input {
    pub condition: bool,
    pub use_src2: bool,
    pub dest: Box<[u8]>,
    pub src1: Box<[u8]>,
    pub src2: Box<[u8]>,
}

fuzz_target!(|input: Input| {
    let n = input.dest.len().min(input.src1.len()).min(input.src2.len());
    let mut dest = input.dest[..n].to_vec();
    let src1 = &input.src1[..n];
    let src2 = input.use_src2.then_some(&input.src2[..n]);

    memcpy_if(Condition::from_bool(input.condition), &mut dest, src1, src2);

    let expected = match (input.condition, src2) {
        (true, _) => src1,
        (false, Some(src2)) => src2,
        (false, None) => &input.dest[..n],
    };
    assert_eq!(&dest[..], expected);
});
