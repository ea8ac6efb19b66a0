//! The driver: wires compression, channel coding, noise and decoding
//! together and reports each stage.

use crate::config::{Config, InputSource};
use crate::{report, text};
use tandem_sim_core::channel::NoisyChannel;
use tandem_sim_core::metrics::PipelineMetrics;
use tandem_sim_core::{hamming, huffman, Bitstring};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to generate sample text: {0}")]
    Sample(#[from] rand::distributions::WeightedError),

    #[error(transparent)]
    Core(#[from] tandem_sim_core::Error),
}

/// Resolve the configured input into raw text.
fn load_input(config: &Config) -> Result<String, RunError> {
    match &config.input {
        InputSource::Text(text) => Ok(text.clone()),
        InputSource::File(path) => std::fs::read_to_string(path).map_err(|source| RunError::Read {
            path: path.display().to_string(),
            source,
        }),
        InputSource::Sample { len } => Ok(text::generate_sample_text(config.channel.seed, *len)?),
    }
}

/// Run one text through the whole pipeline.
///
/// # Errors
/// - input file cannot be read
/// - normalized text is empty (no alphabet)
/// - more bit errors requested than the channel carries
///
/// A text that fails to decode after noise is reported, not returned as an
/// error: miscorrection is an expected outcome of the code.
pub fn run(config: &Config) -> Result<PipelineMetrics, RunError> {
    let mut metrics = PipelineMetrics::new();

    let raw = load_input(config)?;
    let normalized = text::normalize(&raw);
    tracing::info!(
        raw_chars = raw.chars().count(),
        symbols = normalized.len(),
        "normalized input"
    );

    let compressed = huffman::compress(&normalized)?;
    metrics.input_symbols = compressed.frequencies.total();
    metrics.distinct_symbols = compressed.frequencies.distinct() as u64;
    metrics.compressed_bits = compressed.bits.len() as u64;
    metrics.compressed_bytes = compressed.bits.to_packed_bytes().len() as u64;

    let codewords = hamming::encode(compressed.bits.as_slice());
    metrics.codewords = codewords.len() as u64;

    let mut channel = NoisyChannel::new(config.channel);
    let noise = channel.transmit(&codewords)?;
    let stats = channel.stats();
    metrics.bits_flipped = stats.bits_flipped;
    tracing::info!(
        bits_sent = stats.bits_sent,
        bits_flipped = stats.bits_flipped,
        bit_error_rate = stats.bit_error_rate(),
        "transmitted codewords"
    );
    metrics.record_flips_per_block(&noise.flips_per_block());

    let decoded = hamming::decode(&noise.corrupted);
    metrics.errors_corrected = decoded.errors_corrected as u64;

    let payload = decoded.data_truncated(compressed.bits.len());
    metrics.record_residual(compressed.bits.as_slice(), payload);

    let recovered = huffman::decompress(&Bitstring::from(payload), &compressed.codes)
        .map(|chars| chars.into_iter().collect::<String>());
    match &recovered {
        Ok(text) => metrics.text_recovered = *text == normalized,
        Err(err) => tracing::warn!(%err, "recovered bits do not decode"),
    }
    if metrics.blocks_multi_error > 0 {
        tracing::warn!(
            blocks = metrics.blocks_multi_error,
            "blocks took two or more flips; corrections there are unreliable"
        );
    }
    metrics.complete();

    report::print_correction(&decoded, config.print_stages);
    report::print_original(&raw, &normalized);
    if config.print_stages {
        report::print_codes(&compressed);
        report::print_compressed(&compressed);
        report::print_blocks("Encoded Data after Hamming Coding", &codewords);
        report::print_blocks("Data with Random Errors", &noise.corrupted);
        report::print_flips(&noise.flipped_positions);
    }
    report::print_recovered(recovered.as_deref().map_err(ToString::to_string));

    Ok(metrics)
}
