//! Error types for the tandem-sim system.
//!
//! All operations return structured errors rather than panicking. Every
//! condition here is local and deterministic: the same input always produces
//! the same outcome, so nothing is retried.

use thiserror::Error;

/// Top-level error type for all operations in the system.
///
/// Each variant corresponds to a specific failure domain:
/// - Bits: parsing a bitstring from its text form
/// - Huffman: code construction, encode or decode failures
/// - Channel: noise injection requests that cannot be satisfied
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Bitstring parsing failed
    #[error("bitstring error: {0}")]
    Bits(#[from] BitsError),

    /// Huffman codec error (e.g., empty alphabet, undecodable stream)
    #[error("huffman codec error: {0}")]
    Huffman(#[from] HuffmanError),

    /// Noisy channel error (e.g., more flips requested than bits exist)
    #[error("channel error: {0}")]
    Channel(#[from] ChannelError),
}

impl Error {
    /// True for the conditions caused by unusable caller input: an empty
    /// alphabet or an error count exceeding the available bits.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Error::Huffman(HuffmanError::EmptyAlphabet)
                | Error::Channel(ChannelError::TooManyErrors { .. })
        )
    }
}

/// Bitstring text-form errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitsError {
    /// A character other than '0' or '1' was found
    #[error("invalid bit character {ch:?} at position {position}")]
    InvalidBitChar { ch: char, position: usize },
}

/// Huffman codec errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HuffmanError {
    /// Input text is empty (no alphabet to build a tree from)
    #[error("invalid input: empty text has no alphabet to build a code from")]
    EmptyAlphabet,

    /// Two symbols share a code, or a code is empty
    #[error("ambiguous code table: code {code:?} is not unique")]
    AmbiguousCode { code: String },

    /// Bits left over at end of input that match no code
    #[error("corrupt stream: {trailing_bits} trailing bits match no code")]
    CorruptStream { trailing_bits: usize },

    /// Symbol missing from the code table used for encoding
    #[error("unknown symbol {symbol:?} at position {position}")]
    UnknownSymbol { symbol: char, position: usize },
}

/// Noisy channel errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChannelError {
    /// More bit flips requested than the codewords contain
    #[error("invalid input: requested {requested} bit errors but only {available} bits exist")]
    TooManyErrors { requested: usize, available: usize },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
