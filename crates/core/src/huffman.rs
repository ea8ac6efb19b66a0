//! Huffman codec: code table derivation, encoding and greedy decoding.
//!
//! # Pipeline
//!
//! ```text
//! text -> FrequencyTable -> tree (min-heap merge) -> CodeTable -> Bitstring
//! ```
//!
//! Codes are derived by a depth-first walk of the tree, appending `0` when
//! descending left and `1` when descending right. A one-leaf tree (single
//! distinct symbol) gets the code `0` so that no code is ever empty.
//!
//! # Decoding
//!
//! Bits are accumulated left to right; whenever the buffer exactly matches a
//! code the symbol is emitted and the buffer reset. The prefix-free property
//! of tables produced here means no backtracking is ever needed.
//!
//! # Example
//! ```
//! use tandem_sim_core::huffman::{build_codes, decompress};
//!
//! let text: Vec<char> = "aabbbcc".chars().collect();
//! let (codes, bits) = build_codes(&text).unwrap();
//! assert!(codes.is_prefix_free());
//! assert_eq!(decompress(&bits, &codes).unwrap(), text);
//! ```

use crate::bits::{Bit, Bitstring};
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::tree::{build_tree, Node};
use std::collections::{BTreeMap, HashMap};

/// Mapping symbol -> code. Tables built by this module are prefix-free.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodeTable {
    codes: BTreeMap<char, Bitstring>,
}

impl CodeTable {
    /// Derive codes from a Huffman tree.
    pub fn from_tree(root: &Node) -> Self {
        let mut codes = BTreeMap::new();
        match root {
            Node::Leaf { symbol, .. } => {
                codes.insert(*symbol, Bitstring::from(vec![Bit::Zero]));
            }
            Node::Internal { .. } => {
                let mut path = Bitstring::new();
                collect_codes(root, &mut path, &mut codes);
            }
        }
        Self { codes }
    }

    /// Build codes for the symbols counted in `frequencies`.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        let root = build_tree(frequencies)?;
        Ok(Self::from_tree(&root))
    }

    pub fn get(&self, symbol: char) -> Option<&Bitstring> {
        self.codes.get(&symbol)
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterate (symbol, code) pairs, sorted by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (char, &Bitstring)> + '_ {
        self.codes.iter().map(|(&s, c)| (s, c))
    }

    /// True if no code is a prefix of another code in this table.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Bitstring> = self.codes.values().collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !b.starts_with(a))
        })
    }

    /// Total bits needed to encode a text with these frequencies.
    ///
    /// Symbols missing from the table contribute nothing.
    pub fn encoded_len(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .iter()
            .filter_map(|(s, n)| self.get(s).map(|code| code.len() as u64 * n))
            .sum()
    }

    /// Frequency-weighted mean code length in bits per symbol.
    pub fn average_code_length(&self, frequencies: &FrequencyTable) -> f64 {
        if frequencies.total() == 0 {
            0.0
        } else {
            self.encoded_len(frequencies) as f64 / frequencies.total() as f64
        }
    }

    /// Build the code -> symbol mapping used for decoding.
    ///
    /// # Errors
    /// `HuffmanError::AmbiguousCode` if a code is empty or shared by two symbols.
    fn inverse(&self) -> Result<HashMap<&Bitstring, char>> {
        let mut inverse = HashMap::with_capacity(self.codes.len());
        for (&symbol, code) in &self.codes {
            if code.is_empty() || inverse.insert(code, symbol).is_some() {
                return Err(HuffmanError::AmbiguousCode {
                    code: code.to_string(),
                }
                .into());
            }
        }
        Ok(inverse)
    }
}

impl FromIterator<(char, Bitstring)> for CodeTable {
    fn from_iter<I: IntoIterator<Item = (char, Bitstring)>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().collect(),
        }
    }
}

fn collect_codes(node: &Node, path: &mut Bitstring, codes: &mut BTreeMap<char, Bitstring>) {
    match node {
        Node::Leaf { symbol, .. } => {
            codes.insert(*symbol, path.clone());
        }
        Node::Internal { left, right, .. } => {
            path.push(Bit::Zero);
            collect_codes(left, path, codes);
            path.pop();

            path.push(Bit::One);
            collect_codes(right, path, codes);
            path.pop();
        }
    }
}

/// Build a code table for `text` and encode it.
///
/// # Errors
/// `HuffmanError::EmptyAlphabet` if `text` is empty.
pub fn build_codes(text: &[char]) -> Result<(CodeTable, Bitstring)> {
    let frequencies = FrequencyTable::from_symbols(text);
    let codes = CodeTable::from_frequencies(&frequencies)?;
    let bits = encode_with(text, &codes)?;
    Ok((codes, bits))
}

/// Encode `text` by concatenating each symbol's code in order.
///
/// # Errors
/// `HuffmanError::UnknownSymbol` if a symbol has no code in `codes`.
pub fn encode_with(text: &[char], codes: &CodeTable) -> Result<Bitstring> {
    let mut bits = Bitstring::new();
    for (position, &symbol) in text.iter().enumerate() {
        let code = codes
            .get(symbol)
            .ok_or(HuffmanError::UnknownSymbol { symbol, position })?;
        bits.append(code);
    }
    Ok(bits)
}

/// Decode a bitstring produced with `codes`.
///
/// # Errors
/// - `HuffmanError::AmbiguousCode` if the table maps two symbols to one code
/// - `HuffmanError::CorruptStream` if bits remain that match no code
pub fn decompress(bits: &Bitstring, codes: &CodeTable) -> Result<Vec<char>> {
    let inverse = codes.inverse()?;
    let mut text = Vec::new();
    let mut buffer = Bitstring::new();

    for &bit in bits {
        buffer.push(bit);
        if let Some(&symbol) = inverse.get(&buffer) {
            text.push(symbol);
            buffer = Bitstring::new();
        }
    }

    if !buffer.is_empty() {
        return Err(HuffmanError::CorruptStream {
            trailing_bits: buffer.len(),
        }
        .into());
    }

    Ok(text)
}

/// Everything produced by compressing one text.
#[derive(Debug, Clone)]
pub struct Compressed {
    pub frequencies: FrequencyTable,
    pub codes: CodeTable,
    pub bits: Bitstring,
}

impl Compressed {
    /// Decode `bits` back into a string.
    pub fn decompress(&self) -> Result<String> {
        Ok(decompress(&self.bits, &self.codes)?.into_iter().collect())
    }
}

/// Compress a string, keeping the frequency table alongside the result.
pub fn compress(text: &str) -> Result<Compressed> {
    let symbols: Vec<char> = text.chars().collect();
    let frequencies = FrequencyTable::from_symbols(&symbols);
    let codes = CodeTable::from_frequencies(&frequencies)?;
    let bits = encode_with(&symbols, &codes)?;
    tracing::debug!(
        symbols = symbols.len(),
        distinct = codes.len(),
        bits = bits.len(),
        "compressed text"
    );
    Ok(Compressed {
        frequencies,
        codes,
        bits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn bits(s: &str) -> Bitstring {
        s.parse().unwrap()
    }

    #[test]
    fn test_round_trip() {
        let text = chars("informationtechnologiesarerapidlydeveloping");
        let (codes, encoded) = build_codes(&text).unwrap();
        assert_eq!(decompress(&encoded, &codes).unwrap(), text);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(
            build_codes(&[]),
            Err(Error::Huffman(HuffmanError::EmptyAlphabet))
        );
        assert!(compress("").unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_single_symbol() {
        let text = chars("aaaaa");
        let (codes, encoded) = build_codes(&text).unwrap();
        assert_eq!(codes.len(), 1);
        assert_eq!(codes.get('a'), Some(&bits("0")));
        assert_eq!(encoded.len(), text.len());
        assert_eq!(decompress(&encoded, &codes).unwrap(), text);
    }

    #[test]
    fn test_aabbbcc() {
        let compressed = compress("aabbbcc").unwrap();
        let freqs = &compressed.frequencies;
        assert_eq!((freqs.get('a'), freqs.get('b'), freqs.get('c')), (2, 3, 2));

        let codes = &compressed.codes;
        let len = |s| codes.get(s).unwrap().len();
        assert!(len('b') < len('a'));
        assert!(len('b') < len('c'));
        assert_eq!(
            compressed.bits.len(),
            2 * len('a') + 3 * len('b') + 2 * len('c')
        );
        assert_eq!(compressed.decompress().unwrap(), "aabbbcc");
    }

    #[test]
    fn test_exact_codes_for_aabbbcc() {
        // a(2,seq0) + c(2,seq2) merge first -> node(4); then b(3) + node(4)
        let (codes, _) = build_codes(&chars("aabbbcc")).unwrap();
        assert_eq!(codes.get('b'), Some(&bits("0")));
        assert_eq!(codes.get('a'), Some(&bits("10")));
        assert_eq!(codes.get('c'), Some(&bits("11")));
    }

    #[test]
    fn test_prefix_free() {
        let (codes, _) = build_codes(&chars("the quick brown fox jumps over the lazy dog")).unwrap();
        assert!(codes.is_prefix_free());

        let bad: CodeTable = [('x', bits("0")), ('y', bits("01"))].into_iter().collect();
        assert!(!bad.is_prefix_free());
    }

    #[test]
    fn test_unknown_symbol() {
        let (codes, _) = build_codes(&chars("abc")).unwrap();
        let result = encode_with(&chars("abd"), &codes);
        assert_eq!(
            result,
            Err(Error::Huffman(HuffmanError::UnknownSymbol {
                symbol: 'd',
                position: 2
            }))
        );
    }

    #[test]
    fn test_ambiguous_code() {
        let table: CodeTable = [('x', bits("01")), ('y', bits("01"))].into_iter().collect();
        assert!(matches!(
            decompress(&bits("01"), &table),
            Err(Error::Huffman(HuffmanError::AmbiguousCode { .. }))
        ));

        let empty_code: CodeTable = [('x', bits(""))].into_iter().collect();
        assert!(decompress(&bits("0"), &empty_code).is_err());
    }

    #[test]
    fn test_corrupt_stream() {
        let table: CodeTable = [('a', bits("0")), ('b', bits("10")), ('c', bits("11"))]
            .into_iter()
            .collect();
        assert_eq!(decompress(&bits("01011"), &table).unwrap(), chars("abc"));
        assert_eq!(
            decompress(&bits("0101"), &table),
            Err(Error::Huffman(HuffmanError::CorruptStream { trailing_bits: 1 }))
        );
    }

    #[test]
    fn test_empty_bits_decode_to_empty_text() {
        let (codes, _) = build_codes(&chars("ab")).unwrap();
        assert!(decompress(&Bitstring::new(), &codes).unwrap().is_empty());
    }

    #[test]
    fn test_encoded_len_matches_stream() {
        let compressed = compress("mississippi").unwrap();
        assert_eq!(
            compressed.codes.encoded_len(&compressed.frequencies),
            compressed.bits.len() as u64
        );
        let avg = compressed.codes.average_code_length(&compressed.frequencies);
        assert!(avg > 1.0 && avg < 2.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_code_table_serde() {
        let (codes, _) = build_codes(&chars("aabbbcc")).unwrap();
        let json = serde_json::to_string(&codes).unwrap();
        assert!(json.contains("\"b\":\"0\""));
        let back: CodeTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, codes);

        let bad: serde_json::Result<CodeTable> = serde_json::from_str(r#"{"codes":{"a":"01x"}}"#);
        assert!(bad.is_err());
    }
}
