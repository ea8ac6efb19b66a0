//! tandem-sim-core: Huffman compression followed by Hamming(7,4) forward
//! error correction over a simulated noisy channel.
//!
//! This library provides the core components for a learning-focused system that:
//! - Compresses text with an optimal prefix-free (Huffman) code
//! - Protects the compressed bits with a single-error-correcting Hamming(7,4) code
//! - Flips a chosen number of channel bits using seeded randomness
//! - Corrects what it can and decodes the text back
//!
//! # Architecture
//!
//! - `bits`: `Bit` and `Bitstring` value types
//! - `frequency`: symbol frequency analysis
//! - `tree`: Huffman tree construction (deterministic min-heap merge)
//! - `huffman`: code table derivation, encode and decode
//! - `hamming`: Hamming(7,4) block encode and syndrome decode
//! - `channel`: noise injection with an explicit RNG
//! - `metrics`: observable pipeline behavior
//!
//! # Example
//! ```
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use tandem_sim_core::{channel, hamming, huffman, Bitstring};
//!
//! let compressed = huffman::compress("informationtechnologies").unwrap();
//! let codewords = hamming::encode(compressed.bits.as_slice());
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let noise = channel::inject_noise(&codewords, 1, &mut rng).unwrap();
//!
//! let decoded = hamming::decode(&noise.corrupted);
//! assert_eq!(decoded.errors_corrected, 1);
//!
//! let bits: Bitstring = decoded.data_truncated(compressed.bits.len()).into();
//! let text: String = huffman::decompress(&bits, &compressed.codes).unwrap().into_iter().collect();
//! assert_eq!(text, "informationtechnologies");
//! ```
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and recoverable
//! - **Value semantics**: corruption and correction return new data; inputs stay untouched
//! - **Deterministic**: Seeded randomness makes runs reproducible

pub mod bits;
pub mod channel;
pub mod error;
pub mod frequency;
pub mod hamming;
pub mod huffman;
pub mod metrics;
pub mod tree;

// Re-export commonly used types
pub use bits::{Bit, Bitstring};
pub use error::{Error, Result};
pub use hamming::Codeword;
pub use huffman::CodeTable;
