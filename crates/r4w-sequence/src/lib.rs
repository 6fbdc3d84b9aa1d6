//! # Binary Sequence Library
//!
//! Maximal-length sequence (m-sequence) generators and sliding binary
//! sequence correlators for spread-spectrum synchronization, ranging and
//! spreading-code generation.
//!
//! ## Overview
//!
//! - **M-Sequences**: Fibonacci LFSRs driven by primitive polynomials,
//!   period 2^m - 1 for register widths 2-32
//! - **Polynomial Catalog**: standard primitive polynomials for degrees 2-31
//! - **Binary Sequences**: fixed-capacity bit windows with O(1) push and
//!   pairwise correlation
//! - **Complementary Codes**: Golay complementary pairs
//!
//! ## Signal Flow
//!
//! ```text
//! MSequence ──advance()──► BitSequence (reference)
//!                                 │
//! RX chips ──push()──► BitSequence ┴─ correlate() ──► peak = alignment
//! ```
//!
//! ## Example
//!
//! ```rust
//! use r4w_sequence::prelude::*;
//!
//! let mut ms = MSequence::from_genpoly(GenPoly::M5).unwrap();
//! let n = ms.length() as usize;
//!
//! let mut reference = BitSequence::new(n).unwrap();
//! reference.init_msequence(&mut ms);
//!
//! let mut rx = BitSequence::new(n).unwrap();
//! rx.init_msequence(&mut ms);
//! assert_eq!(reference.correlate(&rx).unwrap(), n as i64);
//!
//! // Slip one chip: the correlation drops to (n - 1) / 2 agreements
//! rx.push(ms.advance());
//! assert_eq!(2 * reference.correlate(&rx).unwrap() - n as i64, -1);
//! ```

pub mod bsequence;
pub mod complementary;
pub mod config;
pub mod genpoly;
pub mod logging;
pub mod msequence;
pub mod types;

pub use bsequence::BitSequence;
pub use complementary::complementary_pair;
pub use config::{ConfigError, SequenceConfig};
pub use genpoly::GenPoly;
pub use msequence::MSequence;
pub use types::{Bit, SequenceError, SequenceResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::bsequence::BitSequence;
    pub use crate::complementary::complementary_pair;
    pub use crate::genpoly::{default_polynomial, GenPoly};
    pub use crate::msequence::MSequence;
    pub use crate::types::{Bit, SequenceError, SequenceResult};
}
