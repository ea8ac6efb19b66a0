//! Hamming(7,4) single-error-correcting codec.
//!
//! # Codeword Layout
//!
//! ```text
//! index:  0   1   2   3   4   5   6
//! bit:   p0  p1  d0  p2  d1  d2  d3
//!
//! p0 = d0 ^ d1 ^ d3
//! p1 = d0 ^ d2 ^ d3
//! p2 = d1 ^ d2 ^ d3
//! ```
//!
//! Parity bits sit at the power-of-two positions (1, 2, 4 counting from one),
//! so the syndrome read back at decode time is the 1-based position of a
//! single flipped bit.
//!
//! # Limitations
//!
//! - Input that is not a multiple of 4 bits is zero-padded. Padding decodes
//!   as ordinary zero bits; callers that know the original length should
//!   truncate with [`DecodeOutcome::data_truncated`].
//! - Two flips in one block produce a nonzero syndrome pointing at a third
//!   bit, which is "corrected" into wrong data with no signal. That is a
//!   property of the code, not an error condition.

use crate::bits::Bit;
use std::fmt;

/// Number of data bits per block.
pub const DATA_BITS: usize = 4;

/// Number of bits per codeword.
pub const CODEWORD_BITS: usize = 7;

/// Codeword indices holding d0..d3.
const DATA_POSITIONS: [usize; DATA_BITS] = [2, 4, 5, 6];

/// A 7-bit parity-protected block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Codeword([Bit; CODEWORD_BITS]);

impl Codeword {
    /// Encode one group of four data bits.
    pub fn encode(data: [Bit; DATA_BITS]) -> Self {
        let [d0, d1, d2, d3] = data;
        let p0 = d0 ^ d1 ^ d3;
        let p1 = d0 ^ d2 ^ d3;
        let p2 = d1 ^ d2 ^ d3;
        Self([p0, p1, d0, p2, d1, d2, d3])
    }

    pub fn bits(&self) -> &[Bit; CODEWORD_BITS] {
        &self.0
    }

    /// Return a copy with the bit at `index` (0-based) flipped.
    ///
    /// # Panics
    /// If `index >= CODEWORD_BITS`.
    pub fn with_flipped(mut self, index: usize) -> Self {
        self.flip(index);
        self
    }

    pub(crate) fn flip(&mut self, index: usize) {
        self.0[index] = self.0[index].flipped();
    }

    /// Recompute the parity checks over the received word.
    ///
    /// Returns 0 when every check passes, otherwise the 1-based position of
    /// the bit assumed flipped.
    pub fn syndrome(&self) -> u8 {
        let c = &self.0;
        let s1 = c[0] ^ c[2] ^ c[4] ^ c[6];
        let s2 = c[1] ^ c[2] ^ c[5] ^ c[6];
        let s3 = c[3] ^ c[4] ^ c[5] ^ c[6];
        s1.as_u8() | (s2.as_u8() << 1) | (s3.as_u8() << 2)
    }

    /// The four data bits, read from their fixed positions.
    pub fn data_bits(&self) -> [Bit; DATA_BITS] {
        DATA_POSITIONS.map(|i| self.0[i])
    }

    /// Correct at most one flipped bit.
    ///
    /// Returns the corrected word and whether a correction was applied.
    pub fn corrected(self) -> (Self, bool) {
        match self.syndrome() {
            0 => (self, false),
            position => (self.with_flipped(position as usize - 1), true),
        }
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, bit) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", bit)?;
        }
        write!(f, "]")
    }
}

/// Encode a bit sequence into codewords, zero-padding the final group.
pub fn encode(bits: &[Bit]) -> Vec<Codeword> {
    bits.chunks(DATA_BITS)
        .map(|chunk| {
            let mut group = [Bit::Zero; DATA_BITS];
            group[..chunk.len()].copy_from_slice(chunk);
            Codeword::encode(group)
        })
        .collect()
}

/// Result of decoding a run of (possibly corrupted) codewords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOutcome {
    /// Recovered data bits, four per block, padding included
    pub data: Vec<Bit>,

    /// Number of blocks in which a correction was applied
    pub errors_corrected: usize,

    /// Per block: true if the syndrome was nonzero and a bit was flipped back
    pub block_flags: Vec<bool>,
}

impl DecodeOutcome {
    /// Recovered data with zero padding removed.
    ///
    /// `len` is the number of data bits originally encoded; values larger
    /// than the decoded data return everything.
    pub fn data_truncated(&self, len: usize) -> &[Bit] {
        &self.data[..len.min(self.data.len())]
    }

    /// Indices of blocks where a correction was applied.
    pub fn flagged_blocks(&self) -> impl Iterator<Item = usize> + '_ {
        self.block_flags
            .iter()
            .enumerate()
            .filter_map(|(i, &flag)| flag.then_some(i))
    }
}

/// Decode codewords, correcting a single flipped bit per block.
///
/// The input is left untouched; corrections are applied to copies.
pub fn decode(codewords: &[Codeword]) -> DecodeOutcome {
    let mut data = Vec::with_capacity(codewords.len() * DATA_BITS);
    let mut block_flags = Vec::with_capacity(codewords.len());
    let mut errors_corrected = 0;

    for (block, &received) in codewords.iter().enumerate() {
        let syndrome = received.syndrome();
        let (word, was_corrected) = received.corrected();
        if was_corrected {
            errors_corrected += 1;
            tracing::trace!(block, position = syndrome, "corrected single-bit error");
        }
        block_flags.push(was_corrected);
        data.extend_from_slice(&word.data_bits());
    }

    tracing::debug!(
        blocks = codewords.len(),
        errors_corrected,
        "hamming decode complete"
    );

    DecodeOutcome {
        data,
        errors_corrected,
        block_flags,
    }
}
