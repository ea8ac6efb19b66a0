//! Noisy channel simulation: flips a chosen number of bits in a run of
//! codewords.
//!
//! # Bit Space
//!
//! All codewords are treated as one flat space of `7 * blocks` bits. Position
//! `p` refers to bit `p % 7` of block `p / 7`. The requested number of
//! distinct positions is drawn uniformly without replacement, so a request for
//! every bit flips each one exactly once.
//!
//! # Determinism
//!
//! Randomness is always an explicit argument. [`inject_noise`] takes any
//! `Rng`; [`NoisyChannel`] owns a ChaCha8 RNG seeded from its config. Given
//! the same seed and inputs, the error pattern is bit-identical.

use crate::error::{ChannelError, Result};
use crate::hamming::{Codeword, CODEWORD_BITS};
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration for the noisy channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Number of bits to flip per transmission
    pub error_count: usize,

    /// Random seed for determinism
    pub seed: u64,
}

impl ChannelConfig {
    /// A channel that never flips anything.
    pub fn noiseless(seed: u64) -> Self {
        Self {
            error_count: 0,
            seed,
        }
    }

    /// The demo default: ten flipped bits.
    pub fn default_with_seed(seed: u64) -> Self {
        Self {
            error_count: 10,
            seed,
        }
    }
}

/// Corrupted copies of the input plus where the flips landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoiseOutcome {
    /// Copies of the input codewords with the chosen bits flipped
    pub corrupted: Vec<Codeword>,

    /// Flat bit positions that were flipped, ascending
    pub flipped_positions: Vec<usize>,
}

impl NoiseOutcome {
    /// Number of flipped bits landing in each block.
    pub fn flips_per_block(&self) -> Vec<usize> {
        let mut counts = vec![0; self.corrupted.len()];
        for &pos in &self.flipped_positions {
            counts[pos / CODEWORD_BITS] += 1;
        }
        counts
    }
}

/// Flip `error_count` distinct, uniformly chosen bits across `codewords`.
///
/// The input is never modified.
///
/// # Errors
/// `ChannelError::TooManyErrors` if `error_count` exceeds `7 * codewords.len()`.
pub fn inject_noise<R: Rng + ?Sized>(
    codewords: &[Codeword],
    error_count: usize,
    rng: &mut R,
) -> Result<NoiseOutcome> {
    let available = codewords.len() * CODEWORD_BITS;
    if error_count > available {
        return Err(ChannelError::TooManyErrors {
            requested: error_count,
            available,
        }
        .into());
    }

    let mut flipped_positions = index::sample(rng, available, error_count).into_vec();
    flipped_positions.sort_unstable();

    let mut corrupted = codewords.to_vec();
    for &pos in &flipped_positions {
        corrupted[pos / CODEWORD_BITS].flip(pos % CODEWORD_BITS);
    }

    tracing::debug!(
        blocks = codewords.len(),
        flipped = error_count,
        "injected channel noise"
    );

    Ok(NoiseOutcome {
        corrupted,
        flipped_positions,
    })
}

/// A seeded channel that corrupts every transmission with a fixed number of
/// flips.
///
/// # Thread Safety
/// Not thread-safe; use one instance per thread.
pub struct NoisyChannel {
    config: ChannelConfig,
    rng: ChaCha8Rng,

    // Statistics
    transmissions: u64,
    bits_sent: u64,
    bits_flipped: u64,
}

impl NoisyChannel {
    /// Create a new channel with the given configuration.
    pub fn new(config: ChannelConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);

        Self {
            config,
            rng,
            transmissions: 0,
            bits_sent: 0,
            bits_flipped: 0,
        }
    }

    /// Send codewords through the channel, returning corrupted copies.
    ///
    /// # Errors
    /// `ChannelError::TooManyErrors` if the configured error count exceeds
    /// the bits in `codewords`. Statistics are not updated on failure.
    pub fn transmit(&mut self, codewords: &[Codeword]) -> Result<NoiseOutcome> {
        let outcome = inject_noise(codewords, self.config.error_count, &mut self.rng)?;

        self.transmissions += 1;
        self.bits_sent += (codewords.len() * CODEWORD_BITS) as u64;
        self.bits_flipped += outcome.flipped_positions.len() as u64;

        Ok(outcome)
    }

    /// Get statistics about channel behavior.
    pub fn stats(&self) -> ChannelStats {
        ChannelStats {
            transmissions: self.transmissions,
            bits_sent: self.bits_sent,
            bits_flipped: self.bits_flipped,
        }
    }
}

/// Statistics about noisy channel behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelStats {
    /// Successful transmissions
    pub transmissions: u64,

    /// Total bits carried
    pub bits_sent: u64,

    /// Total bits flipped
    pub bits_flipped: u64,
}

impl ChannelStats {
    /// Fraction of carried bits that were flipped.
    pub fn bit_error_rate(&self) -> f64 {
        if self.bits_sent == 0 {
            0.0
        } else {
            self.bits_flipped as f64 / self.bits_sent as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::Bit;
    use crate::error::Error;
    use crate::hamming::encode;

    fn words(blocks: usize) -> Vec<Codeword> {
        encode(&vec![Bit::One; blocks * 4])
    }

    fn differing_bits(a: &[Codeword], b: &[Codeword]) -> usize {
        a.iter()
            .zip(b)
            .map(|(x, y)| x.bits().iter().zip(y.bits()).filter(|(p, q)| p != q).count())
            .sum()
    }

    #[test]
    fn test_flip_count() {
        let original = words(10);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let outcome = inject_noise(&original, 10, &mut rng).unwrap();

        assert_eq!(outcome.flipped_positions.len(), 10);
        assert_eq!(differing_bits(&original, &outcome.corrupted), 10);
        assert!(outcome.flipped_positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_original_untouched() {
        let original = words(3);
        let snapshot = original.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let _ = inject_noise(&original, 5, &mut rng).unwrap();
        assert_eq!(original, snapshot);
    }

    #[test]
    fn test_flip_every_bit() {
        let original = words(4);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let outcome = inject_noise(&original, 28, &mut rng).unwrap();

        assert_eq!(outcome.flipped_positions, (0..28).collect::<Vec<_>>());
        for (a, b) in original.iter().zip(&outcome.corrupted) {
            for (x, y) in a.bits().iter().zip(b.bits()) {
                assert_eq!(x.flipped(), *y);
            }
        }
    }

    #[test]
    fn test_too_many_errors() {
        let original = words(2);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let result = inject_noise(&original, 15, &mut rng);
        assert_eq!(
            result,
            Err(Error::Channel(ChannelError::TooManyErrors {
                requested: 15,
                available: 14
            }))
        );
        assert!(result.unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_zero_errors_and_empty_input() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let outcome = inject_noise(&words(2), 0, &mut rng).unwrap();
        assert_eq!(outcome.corrupted, words(2));

        let outcome = inject_noise(&[], 0, &mut rng).unwrap();
        assert!(outcome.corrupted.is_empty());
        assert!(inject_noise(&[], 1, &mut rng).is_err());
    }

    #[test]
    fn test_determinism() {
        let original = words(20);
        let mut ch1 = NoisyChannel::new(ChannelConfig::default_with_seed(12345));
        let mut ch2 = NoisyChannel::new(ChannelConfig::default_with_seed(12345));

        assert_eq!(
            ch1.transmit(&original).unwrap(),
            ch2.transmit(&original).unwrap()
        );
    }

    #[test]
    fn test_unseeded_counts() {
        let original = words(8);
        let outcome = inject_noise(&original, 6, &mut rand::thread_rng()).unwrap();
        assert_eq!(outcome.flips_per_block().iter().sum::<usize>(), 6);
        assert_eq!(differing_bits(&original, &outcome.corrupted), 6);
    }

    #[test]
    fn test_stats() {
        let mut channel = NoisyChannel::new(ChannelConfig {
            error_count: 7,
            seed: 9,
        });
        channel.transmit(&words(10)).unwrap();
        channel.transmit(&words(10)).unwrap();
        assert!(channel.transmit(&words(0)).is_err());

        let stats = channel.stats();
        assert_eq!(stats.transmissions, 2);
        assert_eq!(stats.bits_sent, 140);
        assert_eq!(stats.bits_flipped, 14);
        assert_eq!(stats.bit_error_rate(), 0.1);
    }

    #[test]
    fn test_noiseless_channel() {
        let original = words(5);
        let mut channel = NoisyChannel::new(ChannelConfig::noiseless(3));
        let outcome = channel.transmit(&original).unwrap();
        assert_eq!(outcome.corrupted, original);
        assert!(outcome.flipped_positions.is_empty());
    }
}
