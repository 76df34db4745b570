#![no_main]
extern crate arbitrary;

use libfuzzer_sys::fuzz_target;

use ctbuf_constant_time::{zeroize_if, Condition};

#[derive(arbitrary::Arbitrary, Debug)]
pub struct Input {
    pub condition: bool,
    pub buf: Box<[u8]>,
}

fuzz_target!(|input: Input| {
    let mut wiped = input.buf.to_vec();
    zeroize_if(Condition::from_bool(input.condition), &mut wiped);
    match input.condition {
        true => assert!(wiped.iter().all(|&b| b == 0)),
        false => assert_eq!(&wiped[..], &input.buf[..]),
    }
});
