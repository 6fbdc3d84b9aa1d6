//! Binary Sequence — Sliding bit window with correlation
//!
//! A fixed-capacity FIFO of bits used as either a reference code (filled
//! once from an [`MSequence`]) or a receive window (fed one chip at a time
//! from a demodulator). Two windows of equal capacity can be correlated to
//! test alignment against a known code.
//!
//! ## Storage
//!
//! ```text
//!  bits:  [ b3 | b4 | b0 | b1 | b2 ]      capacity = 5
//!                   ▲
//!                  head (oldest bit, next write position)
//!
//!  logical window (oldest → newest): b0 b1 b2 b3 b4
//! ```
//!
//! Pushing overwrites the slot under `head` and advances it, so insertion
//! never shifts memory. Slots that have not been written yet hold 0 and take
//! part in correlation as zeros.
//!
//! ## Example
//!
//! ```rust
//! use r4w_sequence::bsequence::BitSequence;
//! use r4w_sequence::msequence::MSequence;
//!
//! let mut ms = MSequence::with_width(4).unwrap();
//! let n = ms.length() as usize;
//!
//! let mut reference = BitSequence::new(n).unwrap();
//! reference.init_msequence(&mut ms);
//! let mut rx = BitSequence::new(n).unwrap();
//! rx.init_msequence(&mut ms);
//!
//! // Aligned: every position agrees
//! assert_eq!(reference.correlate(&rx).unwrap(), 15);
//!
//! // One chip late: (n - 1) / 2 agreements
//! rx.push(ms.advance());
//! assert_eq!(reference.correlate(&rx).unwrap(), 7);
//! assert_eq!(reference.bipolar_correlate(&rx).unwrap(), -1);
//! ```

use std::fmt;

use crate::msequence::MSequence;
use crate::types::{Bit, SequenceError, SequenceResult};

/// Largest capacity accepted by [`BitSequence::new`].
pub const MAX_CAPACITY: usize = 1 << 24;

/// Fixed-capacity sliding window of bits.
#[derive(Debug, Clone)]
pub struct BitSequence {
    /// Ring storage, always `capacity` slots.
    bits: Vec<Bit>,
    /// Oldest slot and next write position.
    head: usize,
    /// Number of bits pushed, capped at capacity.
    len: usize,
}

impl BitSequence {
    /// Create an empty window holding up to `capacity` bits.
    pub fn new(capacity: usize) -> SequenceResult<Self> {
        if capacity == 0 || capacity > MAX_CAPACITY {
            return Err(SequenceError::invalid(format!(
                "bit sequence capacity {} not in range 1-{}",
                capacity, MAX_CAPACITY
            )));
        }
        tracing::debug!(capacity, "bit sequence created");
        Ok(Self {
            bits: vec![0; capacity],
            head: 0,
            len: 0,
        })
    }

    /// Create a full window from unpacked bits (oldest first).
    pub fn from_bits(bits: &[Bit]) -> SequenceResult<Self> {
        let mut seq = Self::new(bits.len())?;
        for (slot, &bit) in seq.bits.iter_mut().zip(bits) {
            *slot = bit & 1;
        }
        seq.len = bits.len();
        Ok(seq)
    }

    /// Fill the window with `capacity` consecutive outputs of `ms`.
    ///
    /// The generator keeps its advanced state.
    pub fn init_msequence(&mut self, ms: &mut MSequence) {
        for slot in self.bits.iter_mut() {
            *slot = ms.advance();
        }
        self.head = 0;
        self.len = self.bits.len();
        tracing::trace!(capacity = self.len, generator = %ms, "bit sequence initialized");
    }

    /// Load packed bytes, MSB first. Only the last `capacity` bits remain.
    pub fn init_bytes(&mut self, bytes: &[u8]) {
        self.clear();
        for &byte in bytes {
            for k in (0..8).rev() {
                self.push((byte >> k) & 1);
            }
        }
    }

    /// Append a bit, evicting the oldest bit once the window is full.
    #[inline]
    pub fn push(&mut self, bit: Bit) {
        self.bits[self.head] = bit & 1;
        self.head += 1;
        if self.head == self.bits.len() {
            self.head = 0;
        }
        if self.len < self.bits.len() {
            self.len += 1;
        }
    }

    /// Reset to an empty, all-zero window.
    pub fn clear(&mut self) {
        self.bits.fill(0);
        self.head = 0;
        self.len = 0;
    }

    /// Count positions where both windows hold the same bit.
    ///
    /// Result is in `[0, capacity]`. For an m-sequence of length n against a
    /// copy of itself shifted by any non-zero lag, `2 * result - n == -1`.
    pub fn correlate(&self, other: &BitSequence) -> SequenceResult<i64> {
        self.check_capacity(other)?;
        let matches = self
            .slots()
            .zip(other.slots())
            .filter(|(a, b)| a == b)
            .count();
        Ok(matches as i64)
    }

    /// Dot product of the windows with bits mapped to ±1.
    ///
    /// Equal to `2 * correlate - capacity`, in `[-capacity, capacity]`.
    pub fn bipolar_correlate(&self, other: &BitSequence) -> SequenceResult<i64> {
        let matches = self.correlate(other)?;
        Ok(2 * matches - self.capacity() as i64)
    }

    /// Bitwise XOR of two windows.
    pub fn xor(&self, other: &BitSequence) -> SequenceResult<BitSequence> {
        self.combine(other, |a, b| a ^ b)
    }

    /// Bitwise AND of two windows.
    pub fn and(&self, other: &BitSequence) -> SequenceResult<BitSequence> {
        self.combine(other, |a, b| a & b)
    }

    /// Bitwise OR of two windows.
    pub fn or(&self, other: &BitSequence) -> SequenceResult<BitSequence> {
        self.combine(other, |a, b| a | b)
    }

    /// Number of one bits in the window.
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b != 0).count()
    }

    /// Bit at `index` within the window, 0 being the oldest.
    pub fn get(&self, index: usize) -> Option<Bit> {
        if index >= self.len {
            return None;
        }
        let capacity = self.bits.len();
        let offset = capacity - self.len + index;
        Some(self.bits[(self.head + offset) % capacity])
    }

    /// Iterate over the window, oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = Bit> + '_ {
        self.slots().skip(self.bits.len() - self.len)
    }

    /// Copy the window out, oldest to newest.
    pub fn to_bits(&self) -> Vec<Bit> {
        self.iter().collect()
    }

    /// Number of bits currently in the window.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if nothing has been pushed since creation or `clear`.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True once the window holds `capacity` bits.
    pub fn is_full(&self) -> bool {
        self.len == self.bits.len()
    }

    /// Fixed window capacity.
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// All slots in logical order, unwritten slots included as zeros.
    fn slots(&self) -> impl Iterator<Item = Bit> + '_ {
        self.bits[self.head..]
            .iter()
            .chain(self.bits[..self.head].iter())
            .copied()
    }

    fn check_capacity(&self, other: &BitSequence) -> SequenceResult<()> {
        if self.capacity() != other.capacity() {
            return Err(SequenceError::DimensionMismatch {
                expected: self.capacity(),
                actual: other.capacity(),
            });
        }
        Ok(())
    }

    fn combine(
        &self,
        other: &BitSequence,
        op: impl Fn(Bit, Bit) -> Bit,
    ) -> SequenceResult<BitSequence> {
        self.check_capacity(other)?;
        let bits = self
            .slots()
            .zip(other.slots())
            .map(|(a, b)| op(a, b))
            .collect();
        Ok(BitSequence {
            bits,
            head: 0,
            len: self.len.max(other.len),
        })
    }
}

impl PartialEq for BitSequence {
    fn eq(&self, other: &Self) -> bool {
        self.capacity() == other.capacity()
            && self.len == other.len
            && self.slots().eq(other.slots())
    }
}

impl Eq for BitSequence {}

impl fmt::Display for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitSequence(n={}): ", self.capacity())?;
        for bit in self.iter() {
            write!(f, "{}", bit)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn autocorrelation(width: u32) {
        let mut ms = MSequence::with_width(width).unwrap();
        let n = ms.length() as usize;

        let mut bs1 = BitSequence::new(n).unwrap();
        bs1.init_msequence(&mut ms);
        let mut bs2 = BitSequence::new(n).unwrap();
        bs2.init_msequence(&mut ms);

        assert_eq!(bs1.len(), n);
        assert_eq!(bs2.len(), n);

        assert_eq!(bs1.correlate(&bs2).unwrap(), n as i64);

        for lag in 1..n {
            bs2.push(ms.advance());
            let rxy = 2 * bs1.correlate(&bs2).unwrap() - n as i64;
            assert_eq!(rxy, -1, "width {} lag {}", width, lag);
        }
    }

    #[test]
    fn test_autocorrelation_widths() {
        for width in 2..=12 {
            autocorrelation(width);
        }
    }

    #[test]
    fn test_init_msequence_length() {
        let mut ms = MSequence::with_width(4).unwrap();
        let mut bs = BitSequence::new(ms.length() as usize).unwrap();
        assert!(bs.is_empty());
        bs.init_msequence(&mut ms);
        assert_eq!(bs.len(), ms.length() as usize);
        assert!(bs.is_full());
        assert!(!bs.to_string().is_empty());
    }

    #[test]
    fn test_width_4_scenario() {
        let mut ms = MSequence::with_width(4).unwrap();
        let mut a = BitSequence::new(15).unwrap();
        a.init_msequence(&mut ms);
        assert_eq!(ms.state(), 0b1000);

        let mut b = BitSequence::new(15).unwrap();
        b.init_msequence(&mut ms);
        assert_eq!(a.correlate(&b).unwrap(), 15);
        assert_eq!(a.bipolar_correlate(&b).unwrap(), 15);

        b.push(ms.advance());
        assert_eq!(a.correlate(&b).unwrap(), 7);
        assert_eq!(a.bipolar_correlate(&b).unwrap(), -1);
    }

    #[test]
    fn test_independent_generators_align() {
        let mut ms1 = MSequence::new(7, 0x89, 0x15).unwrap();
        let mut ms2 = MSequence::new(7, 0x89, 0x15).unwrap();
        let mut a = BitSequence::new(127).unwrap();
        let mut b = BitSequence::new(127).unwrap();
        a.init_msequence(&mut ms1);
        b.init_msequence(&mut ms2);
        assert_eq!(a.correlate(&b).unwrap(), 127);
        assert_eq!(a, b);
    }

    #[test]
    fn test_init_advances_generator() {
        let mut ms = MSequence::with_width(5).unwrap();
        let mut reference = ms.clone();
        let mut bs = BitSequence::new(10).unwrap();
        bs.init_msequence(&mut ms);
        assert_eq!(bs.to_bits(), reference.generate_bits(10));
        assert_eq!(ms.state(), reference.state());
    }

    #[test]
    fn test_capacity_beyond_period() {
        let mut ms = MSequence::with_width(3).unwrap();
        let mut bs = BitSequence::new(14).unwrap();
        bs.init_msequence(&mut ms);
        let bits = bs.to_bits();
        assert_eq!(bits[..7], bits[7..]);
    }

    #[test]
    fn test_invalid_capacity() {
        assert!(BitSequence::new(0).is_err());
        assert!(BitSequence::new(MAX_CAPACITY + 1).is_err());
        assert!(BitSequence::new(MAX_CAPACITY).is_ok());
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = BitSequence::from_bits(&[1, 0, 1]).unwrap();
        let b = BitSequence::from_bits(&[1, 0, 1, 1]).unwrap();
        assert_eq!(
            a.correlate(&b),
            Err(SequenceError::DimensionMismatch {
                expected: 3,
                actual: 4
            })
        );
        assert!(a.bipolar_correlate(&b).is_err());
        assert!(a.xor(&b).is_err());
        assert_eq!(a.to_bits(), vec![1, 0, 1]);
        assert_eq!(b.to_bits(), vec![1, 0, 1, 1]);
    }

    #[test]
    fn test_push_evicts_oldest() {
        let mut bs = BitSequence::new(4).unwrap();
        for bit in [1, 1, 0, 1] {
            bs.push(bit);
        }
        assert_eq!(bs.to_bits(), vec![1, 1, 0, 1]);
        bs.push(0);
        bs.push(0);
        assert_eq!(bs.to_bits(), vec![0, 1, 0, 0]);
        assert_eq!(bs.len(), 4);
        assert_eq!(bs.get(0), Some(0));
        assert_eq!(bs.get(1), Some(1));
        assert_eq!(bs.get(4), None);
    }

    #[test]
    fn test_push_masks_bit() {
        let mut bs = BitSequence::new(2).unwrap();
        bs.push(0xFF);
        bs.push(0x02);
        assert_eq!(bs.to_bits(), vec![1, 0]);
    }

    #[test]
    fn test_partial_window() {
        let mut bs = BitSequence::new(8).unwrap();
        bs.push(1);
        bs.push(0);
        bs.push(1);
        assert_eq!(bs.len(), 3);
        assert!(!bs.is_full());
        assert_eq!(bs.to_bits(), vec![1, 0, 1]);
        assert_eq!(bs.get(2), Some(1));

        // Unwritten slots correlate as zeros
        let reference = BitSequence::from_bits(&[0, 0, 0, 0, 0, 1, 0, 1]).unwrap();
        assert_eq!(bs.correlate(&reference).unwrap(), 8);
    }

    #[test]
    fn test_clear() {
        let mut bs = BitSequence::from_bits(&[1, 1, 1]).unwrap();
        bs.clear();
        assert!(bs.is_empty());
        assert_eq!(bs.count_ones(), 0);
        assert_eq!(bs.capacity(), 3);
    }

    #[test]
    fn test_init_bytes() {
        let mut bs = BitSequence::new(12).unwrap();
        bs.init_bytes(&[0xA5, 0x3C]);
        // Last 12 bits of 1010_0101 0011_1100
        assert_eq!(bs.to_bits(), vec![0, 1, 0, 1, 0, 0, 1, 1, 1, 1, 0, 0]);

        let mut bs = BitSequence::new(16).unwrap();
        bs.init_bytes(&[0xF0]);
        assert_eq!(bs.len(), 8);
        assert_eq!(bs.to_bits(), vec![1, 1, 1, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_bitwise_ops() {
        let a = BitSequence::from_bits(&[1, 1, 0, 0]).unwrap();
        let b = BitSequence::from_bits(&[1, 0, 1, 0]).unwrap();
        assert_eq!(a.xor(&b).unwrap().to_bits(), vec![0, 1, 1, 0]);
        assert_eq!(a.and(&b).unwrap().to_bits(), vec![1, 0, 0, 0]);
        assert_eq!(a.or(&b).unwrap().to_bits(), vec![1, 1, 1, 0]);
    }

    #[test]
    fn test_xor_with_shifted_msequence() {
        // Shift-and-add: an m-sequence XOR a shift of itself is another shift
        let mut ms = MSequence::with_width(5).unwrap();
        let mut a = BitSequence::new(31).unwrap();
        a.init_msequence(&mut ms);
        let mut b = a.clone();
        b.push(ms.advance());
        let c = a.xor(&b).unwrap();
        assert_eq!(c.count_ones(), 16);
    }

    #[test]
    fn test_count_ones() {
        let mut ms = MSequence::with_width(8).unwrap();
        let mut bs = BitSequence::new(255).unwrap();
        bs.init_msequence(&mut ms);
        assert_eq!(bs.count_ones(), 128);
    }

    #[test]
    fn test_equality_ignores_ring_position() {
        let mut a = BitSequence::new(3).unwrap();
        for bit in [0, 1, 1, 0, 1] {
            a.push(bit);
        }
        let b = BitSequence::from_bits(&[1, 0, 1]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_display() {
        let bs = BitSequence::from_bits(&[1, 0, 0, 1]).unwrap();
        assert_eq!(bs.to_string(), "BitSequence(n=4): 1001");
    }
}
