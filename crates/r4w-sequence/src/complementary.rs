//! Complementary Codes — Golay complementary sequence pairs
//!
//! A Golay pair (a, b) has aperiodic autocorrelations that cancel at every
//! non-zero lag: R_a(k) + R_b(k) = 0 for k != 0, and 2n at k = 0. Pairs are
//! built by the doubling recursion
//!
//! ```text
//! a' = a | b
//! b' = a | !b
//! ```
//!
//! starting from a = b = [1]. Used for channel sounding and radar pulse
//! compression where sidelobe-free correlation matters.
//!
//! ## Example
//!
//! ```rust
//! use r4w_sequence::complementary::complementary_pair;
//!
//! let (a, b) = complementary_pair(8).unwrap();
//! assert_eq!(a.to_bits(), vec![1, 1, 1, 0, 1, 1, 0, 1]);
//! assert_eq!(b.to_bits(), vec![1, 1, 1, 0, 0, 0, 1, 0]);
//! ```

use crate::bsequence::{BitSequence, MAX_CAPACITY};
use crate::types::{Bit, SequenceError, SequenceResult};

/// Build a Golay complementary pair of length `n` (a power of two, at least 2).
pub fn complementary_pair(n: usize) -> SequenceResult<(BitSequence, BitSequence)> {
    if n < 2 || !n.is_power_of_two() || n > MAX_CAPACITY {
        return Err(SequenceError::invalid(format!(
            "complementary code length {} must be a power of two in 2-{}",
            n, MAX_CAPACITY
        )));
    }

    let mut a: Vec<Bit> = vec![1];
    let mut b: Vec<Bit> = vec![1];
    while a.len() < n {
        let next_a: Vec<Bit> = a.iter().chain(b.iter()).copied().collect();
        let next_b: Vec<Bit> = a.iter().copied().chain(b.iter().map(|&x| x ^ 1)).collect();
        a = next_a;
        b = next_b;
    }

    tracing::debug!(n, "complementary pair created");
    Ok((BitSequence::from_bits(&a)?, BitSequence::from_bits(&b)?))
}
