//! M-Sequence — Maximal-length LFSR sequence generator
//!
//! Generates pseudo-random binary sequences with period 2^m - 1 from a
//! Fibonacci linear-feedback shift register driven by a primitive
//! polynomial. M-sequences have a two-valued periodic autocorrelation
//! (n at zero lag, -1 everywhere else), which makes them the standard
//! choice for spreading codes, ranging and frame synchronization.
//!
//! ## Register Convention
//!
//! ```text
//!   feedback = parity(state & taps)
//!        │
//!        ▼
//!   ┌──────┬──────┬─────┬──────┐
//!   │ m-1  │ m-2  │ ... │  0   │──► output (tap-out)
//!   └──────┴──────┴─────┴──────┘
//!        shift right by one each step
//! ```
//!
//! The LSB is shifted out as the output bit and the feedback bit enters at
//! the MSB. The default starting state has only the MSB set.
//!
//! ## Example
//!
//! ```rust
//! use r4w_sequence::msequence::MSequence;
//!
//! let mut ms = MSequence::with_width(4).unwrap();
//! assert_eq!(ms.length(), 15);
//! assert_eq!(ms.state(), 0b1000);
//!
//! let bits = ms.generate_bits(15);
//! assert_eq!(bits.iter().filter(|&&b| b == 1).count(), 8);
//! assert_eq!(ms.state(), 0b1000); // back where it started
//! ```

use std::fmt;

use crate::genpoly::{default_polynomial, GenPoly};
use crate::types::{Bit, SequenceError, SequenceResult};

/// Smallest supported register width.
pub const MIN_WIDTH: u32 = 2;

/// Largest supported register width.
pub const MAX_WIDTH: u32 = 32;

/// Maximal-length sequence generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MSequence {
    /// Register width in bits (m).
    width: u32,
    /// Generator polynomial, x^m and constant terms included.
    polynomial: u64,
    /// Feedback taps: the polynomial without its x^m term.
    taps: u32,
    /// State supplied at construction, restored by `reset`.
    initial_state: u32,
    /// Current register state.
    state: u32,
}

impl MSequence {
    /// Create a generator from an explicit polynomial and starting state.
    ///
    /// - `width`: register width, 2-32
    /// - `polynomial`: generator polynomial with bit `width` set
    /// - `state`: initial register value, `0 < state < 2^width`
    ///
    /// The constant term is always part of the feedback network, so it is
    /// added to `polynomial` if missing.
    pub fn new(width: u32, polynomial: u64, state: u32) -> SequenceResult<Self> {
        if !(MIN_WIDTH..=MAX_WIDTH).contains(&width) {
            return Err(SequenceError::invalid(format!(
                "m-sequence width {} not in range {}-{}",
                width, MIN_WIDTH, MAX_WIDTH
            )));
        }
        if polynomial == 0 {
            return Err(SequenceError::invalid(
                "m-sequence polynomial must be non-zero",
            ));
        }
        if polynomial >> width != 1 {
            return Err(SequenceError::invalid(format!(
                "m-sequence polynomial 0x{:x} must have degree {}",
                polynomial, width
            )));
        }
        check_state(width, state)?;

        let polynomial = polynomial | 1;
        let taps = (polynomial & register_mask(width) as u64) as u32;

        tracing::debug!(width, polynomial, state, "m-sequence created");

        Ok(Self {
            width,
            polynomial,
            taps,
            initial_state: state,
            state,
        })
    }

    /// Create a generator from the built-in default polynomial for `width`.
    ///
    /// Fails for widths without a default table entry (including 16).
    pub fn with_width(width: u32) -> SequenceResult<Self> {
        let polynomial = default_polynomial(width).ok_or_else(|| {
            SequenceError::invalid(format!(
                "no default m-sequence polynomial for width {}",
                width
            ))
        })?;
        Self::new(width, polynomial, default_state(width))
    }

    /// Create a generator from a catalog entry.
    pub fn from_genpoly(genpoly: GenPoly) -> SequenceResult<Self> {
        let width = genpoly.degree();
        Self::new(width, genpoly.polynomial() as u64, default_state(width))
    }

    /// Create a generator from a raw catalog identifier (the polynomial value).
    pub fn from_genpoly_id(id: u32) -> SequenceResult<Self> {
        GenPoly::try_from(id).and_then(Self::from_genpoly)
    }

    /// Create a generator from any polynomial, inferring the width from its
    /// most-significant set bit.
    pub fn from_polynomial(polynomial: u64) -> SequenceResult<Self> {
        if polynomial == 0 {
            return Err(SequenceError::invalid(
                "m-sequence polynomial must be non-zero",
            ));
        }
        let width = 63 - polynomial.leading_zeros();
        if width < MIN_WIDTH {
            return Err(SequenceError::invalid(format!(
                "m-sequence polynomial 0x{:x} has degree {} (minimum {})",
                polynomial, width, MIN_WIDTH
            )));
        }
        if width > MAX_WIDTH {
            return Err(SequenceError::invalid(format!(
                "m-sequence polynomial 0x{:x} has degree {} (maximum {})",
                polynomial, width, MAX_WIDTH
            )));
        }
        Self::new(width, polynomial, default_state(width))
    }

    /// Advance the register one step and return the bit shifted out (0 or 1).
    #[inline]
    pub fn advance(&mut self) -> Bit {
        let output = (self.state & 1) as Bit;
        let feedback = (self.state & self.taps).count_ones() & 1;
        self.state = (self.state >> 1) | (feedback << (self.width - 1));
        output
    }

    /// Advance `bps` times and pack the output bits MSB-first.
    pub fn generate_symbol(&mut self, bps: u32) -> SequenceResult<u32> {
        if !(1..=32).contains(&bps) {
            return Err(SequenceError::invalid(format!(
                "bits per symbol {} not in range 1-32",
                bps
            )));
        }
        let mut symbol = 0u32;
        for _ in 0..bps {
            symbol = (symbol << 1) | self.advance() as u32;
        }
        Ok(symbol)
    }

    /// Generate N bits.
    pub fn generate_bits(&mut self, n: usize) -> Vec<Bit> {
        (0..n).map(|_| self.advance()).collect()
    }

    /// Generate N bipolar samples (+1.0 for a one, -1.0 for a zero).
    pub fn generate_bipolar(&mut self, n: usize) -> Vec<f64> {
        (0..n)
            .map(|_| if self.advance() != 0 { 1.0 } else { -1.0 })
            .collect()
    }

    /// Count steps until the current state recurs.
    ///
    /// Runs on a copy, so `self` is untouched. The count stops at
    /// `length() + 1`, which can only happen if the polynomial is reducible
    /// in a way that never revisits the start.
    pub fn measure_period(&self) -> u64 {
        let mut probe = self.clone();
        let limit = self.length() as u64 + 1;
        let mut period = 0u64;
        while period < limit {
            probe.advance();
            period += 1;
            if probe.state == self.state {
                break;
            }
        }
        period
    }

    /// Get current register state.
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Overwrite the register state. Must satisfy `0 < state < 2^width`.
    pub fn set_state(&mut self, state: u32) -> SequenceResult<()> {
        check_state(self.width, state)?;
        self.state = state;
        Ok(())
    }

    /// Restore the state supplied at construction.
    pub fn reset(&mut self) {
        self.state = self.initial_state;
    }

    /// Sequence period, 2^width - 1.
    pub fn length(&self) -> u32 {
        register_mask(self.width)
    }

    /// Register width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Generator polynomial, x^m term included.
    pub fn polynomial(&self) -> u64 {
        self.polynomial
    }

    /// State supplied at construction.
    pub fn initial_state(&self) -> u32 {
        self.initial_state
    }
}

impl Iterator for MSequence {
    type Item = Bit;

    fn next(&mut self) -> Option<Bit> {
        Some(self.advance())
    }
}

impl fmt::Display for MSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MSequence(m={}, n={}, g=0x{:x}, state=0x{:x})",
            self.width,
            self.length(),
            self.polynomial,
            self.state
        )
    }
}

/// Starting state used when none is given: only the MSB set.
pub fn default_state(width: u32) -> u32 {
    1u32 << (width - 1)
}

fn register_mask(width: u32) -> u32 {
    ((1u64 << width) - 1) as u32
}

fn check_state(width: u32, state: u32) -> SequenceResult<()> {
    if state == 0 {
        return Err(SequenceError::invalid("m-sequence state must be non-zero"));
    }
    if state as u64 > register_mask(width) as u64 {
        return Err(SequenceError::invalid(format!(
            "m-sequence state 0x{:x} exceeds {}-bit register",
            state, width
        )));
    }
    Ok(())
}
