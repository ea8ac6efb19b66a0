//! Input text preparation.
//!
//! The codec works on whatever symbols it is given; the driver narrows input
//! to lowercase ASCII letters first, so the alphabet is at most 26 symbols.
//!
//! When asked for a sample, we generate letters with English-like skewed
//! frequencies so the Huffman code has something to exploit.

use rand::distributions::{Distribution, WeightedError, WeightedIndex};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Approximate English letter frequencies (per mille), 'a'..='z'.
const LETTER_WEIGHTS: [u32; 26] = [
    82, 15, 28, 43, 127, 22, 20, 61, 70, 2, 8, 40, 24, 67, 75, 19, 1, 60, 63, 91, 28, 10, 24, 2,
    20, 1,
];

/// Lowercase the text and drop everything that is not an ASCII letter.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Generate `len` lowercase letters with English-like frequencies.
///
/// Same seed, same text.
pub fn generate_sample_text(seed: u64, len: usize) -> Result<String, WeightedError> {
    sample_with_weights(seed, len, &LETTER_WEIGHTS)
}

/// Generate `len` letters drawn from `weights`, where index 0 is 'a'.
///
/// # Errors
/// Any `WeightedError` from building the distribution, e.g. an empty or
/// all-zero weight list. Weights past 'z' are ignored.
fn sample_with_weights(seed: u64, len: usize, weights: &[u32]) -> Result<String, WeightedError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let dist = WeightedIndex::new(weights.iter().take(26))?;

    Ok((0..len)
        .map(|_| char::from(b'a' + dist.sample(&mut rng) as u8))
        .collect())
}
