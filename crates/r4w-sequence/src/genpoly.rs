//! Generator Polynomial Catalog — Primitive polynomials for m-sequences
//!
//! Each entry is a primitive polynomial over GF(2) written as a bit mask,
//! leading term included: bit `m` is x^m and bit 0 is the constant term.
//! An LFSR of width `m` driven by one of these visits all 2^m - 1 non-zero
//! states before repeating.
//!
//! ```text
//! M4 = 0x13 = 1_0011  →  x^4 + x + 1
//! M11 = 0x805 = 1000_0000_0101  →  x^11 + x^2 + 1
//! ```
//!
//! ## Example
//!
//! ```rust
//! use r4w_sequence::genpoly::{default_polynomial, GenPoly};
//!
//! assert_eq!(GenPoly::M11.polynomial(), 0x805);
//! assert_eq!(GenPoly::M11.degree(), 11);
//! assert_eq!(GenPoly::try_from(0x13u32).unwrap(), GenPoly::M4);
//!
//! // Width 16 has a catalog entry but no default
//! assert!(GenPoly::for_degree(16).is_some());
//! assert!(default_polynomial(16).is_none());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::SequenceError;

/// Catalog of standard generator polynomials, keyed by degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenPoly {
    M2,
    M3,
    M4,
    M5,
    M6,
    M7,
    M8,
    M9,
    M10,
    M11,
    M12,
    M13,
    M14,
    M15,
    M16,
    M17,
    M18,
    M19,
    M20,
    M21,
    M22,
    M23,
    M24,
    M25,
    M26,
    M27,
    M28,
    M29,
    M30,
    M31,
}

impl GenPoly {
    /// Every catalog entry in ascending degree.
    pub const ALL: [GenPoly; 30] = [
        GenPoly::M2,
        GenPoly::M3,
        GenPoly::M4,
        GenPoly::M5,
        GenPoly::M6,
        GenPoly::M7,
        GenPoly::M8,
        GenPoly::M9,
        GenPoly::M10,
        GenPoly::M11,
        GenPoly::M12,
        GenPoly::M13,
        GenPoly::M14,
        GenPoly::M15,
        GenPoly::M16,
        GenPoly::M17,
        GenPoly::M18,
        GenPoly::M19,
        GenPoly::M20,
        GenPoly::M21,
        GenPoly::M22,
        GenPoly::M23,
        GenPoly::M24,
        GenPoly::M25,
        GenPoly::M26,
        GenPoly::M27,
        GenPoly::M28,
        GenPoly::M29,
        GenPoly::M30,
        GenPoly::M31,
    ];

    /// Polynomial bit mask, x^m term included.
    pub const fn polynomial(self) -> u32 {
        match self {
            GenPoly::M2 => 0x0000_0007,
            GenPoly::M3 => 0x0000_000B,
            GenPoly::M4 => 0x0000_0013,
            GenPoly::M5 => 0x0000_0025,
            GenPoly::M6 => 0x0000_0043,
            GenPoly::M7 => 0x0000_0089,
            GenPoly::M8 => 0x0000_011D,
            GenPoly::M9 => 0x0000_0211,
            GenPoly::M10 => 0x0000_0409,
            GenPoly::M11 => 0x0000_0805,
            GenPoly::M12 => 0x0000_1053,
            GenPoly::M13 => 0x0000_201B,
            GenPoly::M14 => 0x0000_402B,
            GenPoly::M15 => 0x0000_8003,
            GenPoly::M16 => 0x0001_002D,
            GenPoly::M17 => 0x0002_0009,
            GenPoly::M18 => 0x0004_0027,
            GenPoly::M19 => 0x0008_0027,
            GenPoly::M20 => 0x0010_0009,
            GenPoly::M21 => 0x0020_0005,
            GenPoly::M22 => 0x0040_0003,
            GenPoly::M23 => 0x0080_0021,
            GenPoly::M24 => 0x0100_001B,
            GenPoly::M25 => 0x0200_0009,
            GenPoly::M26 => 0x0400_0047,
            GenPoly::M27 => 0x0800_0027,
            GenPoly::M28 => 0x1000_0009,
            GenPoly::M29 => 0x2000_0005,
            GenPoly::M30 => 0x4000_0053,
            GenPoly::M31 => 0x8000_0009,
        }
    }

    /// Degree of the polynomial, i.e. the register width it drives.
    pub const fn degree(self) -> u32 {
        31 - self.polynomial().leading_zeros()
    }

    /// Sequence period for this polynomial (2^m - 1).
    pub const fn length(self) -> u32 {
        ((1u64 << self.degree()) - 1) as u32
    }

    /// Look up the catalog entry for a degree.
    pub fn for_degree(degree: u32) -> Option<GenPoly> {
        Self::ALL.iter().copied().find(|g| g.degree() == degree)
    }
}

impl TryFrom<u32> for GenPoly {
    type Error = SequenceError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|g| g.polynomial() == value)
            .ok_or_else(|| {
                SequenceError::invalid(format!(
                    "generator polynomial id 0x{:x} is not in the catalog",
                    value
                ))
            })
    }
}

impl fmt::Display for GenPoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M{} (0x{:x})", self.degree(), self.polynomial())
    }
}

/// Default polynomial for a register width.
///
/// Covers every catalog degree except 16, which must be requested from the
/// catalog explicitly.
pub fn default_polynomial(width: u32) -> Option<u64> {
    match width {
        16 => None,
        w => GenPoly::for_degree(w).map(|g| g.polynomial() as u64),
    }
}

/// Widths accepted by [`default_polynomial`].
pub fn default_widths() -> impl Iterator<Item = u32> {
    (2..=31).filter(|&w| default_polynomial(w).is_some())
}
