//! Bit-level value types shared by both codecs.
//!
//! `Bit` is a single binary digit and `Bitstring` an ordered sequence of them.
//! Huffman codes, the compressed stream, and Hamming data blocks are all
//! expressed in these types so that no stage ever has to guess whether a
//! `u8` holds a bit, a byte, or a character.
//!
//! # Text Form
//! A `Bitstring` displays as a run of `0`/`1` characters with no delimiters
//! and parses back from the same form.
//!
//! # Packing
//! `to_packed_bytes` packs bits MSB-first, padding the final byte with
//! trailing zeros. The caller must track the exact bit count; padding is not
//! distinguishable from data.
//!
//! # Example
//! ```
//! use tandem_sim_core::bits::Bitstring;
//!
//! let bits: Bitstring = "10111".parse().unwrap();
//! assert_eq!(bits.len(), 5);
//! assert_eq!(bits.to_packed_bytes(), vec![0b1011_1000]);
//! assert_eq!(bits.to_string(), "10111");
//! ```

use crate::error::{BitsError, Error};
use std::fmt;
use std::ops::{BitXor, BitXorAssign};
use std::str::FromStr;

/// A single binary digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Bit {
    #[default]
    Zero,
    One,
}

impl Bit {
    /// Return the opposite bit.
    pub fn flipped(self) -> Self {
        match self {
            Bit::Zero => Bit::One,
            Bit::One => Bit::Zero,
        }
    }

    /// Numeric value (0 or 1).
    pub fn as_u8(self) -> u8 {
        match self {
            Bit::Zero => 0,
            Bit::One => 1,
        }
    }

    pub fn is_one(self) -> bool {
        self == Bit::One
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        if value {
            Bit::One
        } else {
            Bit::Zero
        }
    }
}

impl From<Bit> for bool {
    fn from(bit: Bit) -> Self {
        bit.is_one()
    }
}

impl BitXor for Bit {
    type Output = Bit;

    fn bitxor(self, rhs: Bit) -> Bit {
        Bit::from(self != rhs)
    }
}

impl BitXorAssign for Bit {
    fn bitxor_assign(&mut self, rhs: Bit) {
        *self = *self ^ rhs;
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

impl TryFrom<char> for Bit {
    type Error = char;

    fn try_from(ch: char) -> std::result::Result<Self, char> {
        match ch {
            '0' => Ok(Bit::Zero),
            '1' => Ok(Bit::One),
            other => Err(other),
        }
    }
}

/// An ordered sequence of bits with no delimiters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "String", try_from = "String")
)]
pub struct Bitstring {
    bits: Vec<Bit>,
}

impl Bitstring {
    pub fn new() -> Self {
        Self { bits: Vec::new() }
    }

    /// Append a single bit.
    pub fn push(&mut self, bit: Bit) {
        self.bits.push(bit);
    }

    /// Remove and return the last bit.
    pub fn pop(&mut self) -> Option<Bit> {
        self.bits.pop()
    }

    /// Append every bit of `other`, in order.
    pub fn append(&mut self, other: &Bitstring) {
        self.bits.extend_from_slice(&other.bits);
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn as_slice(&self) -> &[Bit] {
        &self.bits
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bit> {
        self.bits.iter()
    }

    /// True if `self` begins with every bit of `prefix`.
    pub fn starts_with(&self, prefix: &Bitstring) -> bool {
        self.bits.starts_with(&prefix.bits)
    }

    /// Pack bits MSB-first into bytes, zero-padding the final byte.
    pub fn to_packed_bytes(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |byte, (i, bit)| byte | (bit.as_u8() << (7 - i)))
            })
            .collect()
    }

    pub fn into_vec(self) -> Vec<Bit> {
        self.bits
    }
}

impl From<Vec<Bit>> for Bitstring {
    fn from(bits: Vec<Bit>) -> Self {
        Self { bits }
    }
}

impl From<&[Bit]> for Bitstring {
    fn from(bits: &[Bit]) -> Self {
        Self {
            bits: bits.to_vec(),
        }
    }
}

impl FromIterator<Bit> for Bitstring {
    fn from_iter<I: IntoIterator<Item = Bit>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

impl Extend<Bit> for Bitstring {
    fn extend<I: IntoIterator<Item = Bit>>(&mut self, iter: I) {
        self.bits.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Bitstring {
    type Item = &'a Bit;
    type IntoIter = std::slice::Iter<'a, Bit>;

    fn into_iter(self) -> Self::IntoIter {
        self.bits.iter()
    }
}

impl IntoIterator for Bitstring {
    type Item = Bit;
    type IntoIter = std::vec::IntoIter<Bit>;

    fn into_iter(self) -> Self::IntoIter {
        self.bits.into_iter()
    }
}

impl fmt::Display for Bitstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            write!(f, "{}", bit)?;
        }
        Ok(())
    }
}

impl FromStr for Bitstring {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Error> {
        s.chars()
            .enumerate()
            .map(|(position, ch)| {
                Bit::try_from(ch).map_err(|ch| BitsError::InvalidBitChar { ch, position }.into())
            })
            .collect()
    }
}

impl From<Bitstring> for String {
    fn from(bits: Bitstring) -> Self {
        bits.to_string()
    }
}

impl TryFrom<String> for Bitstring {
    type Error = Error;

    fn try_from(s: String) -> std::result::Result<Self, Error> {
        s.parse()
    }
}
