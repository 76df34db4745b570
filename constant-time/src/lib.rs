#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
//! constant-time buffer primitives
//!
//! Internal library providing the data-movement building blocks that padding checks, record
//! processing and MAC verification need when the data they move is secret: comparison,
//! conditional copy, copy from a secret offset, shift by a secret amount and conditional
//! zeroize.
//!
//! None of these functions branch on, or index memory with, a secret value. Secret booleans
//! travel as [Condition]s, words that are either all ones or all zeros and that are only ever
//! combined with bitwise arithmetic.
//!
//! # Examples
//!
//! ```rust
//! use ctbuf_constant_time::{memcmp, memcpy_if, memeq, zeroize_if, Condition};
//!
//! let a = [1, 2, 3, 4];
//! let b = [1, 2, 3, 5];
//!
//! // Compare for equality
//! assert_eq!(memcmp(&a, &a), 0);
//! assert_ne!(memcmp(&a, &b), 0);
//! assert!(!memeq(&a, &b).declassify());
//!
//! // Select without branching
//! let mut dst = [0u8; 4];
//! memcpy_if(Condition::TRUE, &mut dst, &a, Some(&b[..]));
//! assert_eq!(dst, a);
//! memcpy_if(Condition::FALSE, &mut dst, &a, Some(&b[..]));
//! assert_eq!(dst, b);
//!
//! // Wipe only if the secret condition holds
//! zeroize_if(memeq(&a, &b), &mut dst);
//! assert_eq!(dst, b);
//! ```
//!
//! # Security Notes
//!
//! The functions aim to be constant-time with respect to buffer contents, secret offsets and
//! conditions. They still leak:
//!
//! - buffer lengths and the bounds of offset ranges, which are public parameters
//! - whatever the caller does with the result of [Condition::declassify]
//!
//! Contract violations involving secrets (an offset outside its declared range, a shift wider
//! than the buffer) are only caught by `debug_assert!`; release builds produce an undefined
//! result instead of branching on the secret.
//!
//! For discussion on how to ensure the constant-time execution of these functions, see
//! <https://github.com/rosenpass/rosenpass/issues/232>

#[cfg(doctest)]
doc_comment::doctest!("../readme.md");

mod access;
mod barrier;
mod condition;
mod error;
mod memcmp;
mod memcpy;
mod memmove;
#[cfg(all(test, feature = "constant_time_tests"))]
mod timing;
mod zeroize;

pub use barrier::{opaque, opaque_zero};
pub use condition::{uint_eq, uint_ge, uint_gt, uint_le, uint_lt, uint_ne, Condition, Word};
pub use error::Error;
pub use memcmp::{memcmp, memcmp_partial, memeq, try_memcmp};
pub use memcpy::{memcpy_if, memcpy_offset, try_memcpy_if, try_memcpy_offset};
pub use memmove::memmove_left;
pub use zeroize::zeroize_if;
