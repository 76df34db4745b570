#![no_main]
extern crate arbitrary;

use libfuzzer_sys::fuzz_target;

use ctbuf_constant_time::{memcmp, memcmp_partial, memeq};

#[derive(arbitrary::Arbitrary, Debug)]
pub struct Input {
    pub a: Box<[u8]>,
    pub b: Box<[u8]>,
    pub skip_head: u8,
    pub skip_tail: u8,
}

fuzz_target!(|input: Input| {
    let n = input.a.len().min(input.b.len());
    let (a, b) = (&input.a[..n], &input.b[..n]);

    assert_eq!(memcmp(a, b) == 0, a == b);
    assert_eq!(memeq(a, b).declassify(), a == b);

    let head = (input.skip_head as usize).min(n);
    let tail = (input.skip_tail as usize).min(n - head);
    assert_eq!(
        memcmp_partial(a, b, head, tail) == 0,
        a[head..n - tail] == b[head..n - tail]
    );
});
