//! Metrics collection and reporting for a pipeline run.
//!
//! This module provides observable insights into system behavior:
//! - Compression (symbols in, bits out, ratio against a fixed-width code)
//! - Channel coding (codewords, carried bits, effective code rate)
//! - Noise and correction (bits flipped, blocks corrected, residual errors)
//!
//! # Design
//!
//! Metrics are collected in a plain struct with explicit updates at each
//! pipeline stage. Not thread-safe.

use crate::bits::Bit;
use crate::hamming::{CODEWORD_BITS, DATA_BITS};
use std::time::{Duration, Instant};

/// Counts and timing across all pipeline stages.
#[derive(Debug, Clone)]
pub struct PipelineMetrics {
    // === Timing ===
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    // === Compression ===
    /// Symbols in the normalized input text
    pub input_symbols: u64,

    /// Distinct symbols in the input
    pub distinct_symbols: u64,

    /// Length of the Huffman bitstring
    pub compressed_bits: u64,

    /// Bytes the Huffman bitstring occupies once packed
    pub compressed_bytes: u64,

    // === Channel coding ===
    /// Hamming codewords produced
    pub codewords: u64,

    // === Noise and correction ===
    /// Bits flipped by the channel
    pub bits_flipped: u64,

    /// Blocks in which the decoder applied a correction
    pub errors_corrected: u64,

    /// Blocks that received two or more flips
    pub blocks_multi_error: u64,

    /// Data bits that still differ from the original after correction
    pub residual_bit_errors: u64,

    /// Whether the decompressed text equals the input text
    pub text_recovered: bool,
}

impl PipelineMetrics {
    /// Create new metrics with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            input_symbols: 0,
            distinct_symbols: 0,
            compressed_bits: 0,
            compressed_bytes: 0,
            codewords: 0,
            bits_flipped: 0,
            errors_corrected: 0,
            blocks_multi_error: 0,
            residual_bit_errors: 0,
            text_recovered: false,
        }
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Bits per symbol of the smallest fixed-width code for this alphabet.
    ///
    /// A single-symbol alphabet still needs one bit.
    pub fn fixed_width_bits_per_symbol(&self) -> u64 {
        if self.distinct_symbols <= 1 {
            1
        } else {
            u64::from(64 - (self.distinct_symbols - 1).leading_zeros())
        }
    }

    /// Bits the same text would take with a fixed-width code.
    pub fn fixed_width_bits(&self) -> u64 {
        self.input_symbols * self.fixed_width_bits_per_symbol()
    }

    /// Compute compression ratio (huffman bits / fixed-width bits).
    ///
    /// Returns 0.0 if nothing was compressed.
    pub fn compression_ratio(&self) -> f64 {
        let baseline = self.fixed_width_bits();
        if baseline == 0 {
            0.0
        } else {
            self.compressed_bits as f64 / baseline as f64
        }
    }

    /// Mean Huffman code length in bits per symbol.
    pub fn average_code_length(&self) -> f64 {
        if self.input_symbols == 0 {
            0.0
        } else {
            self.compressed_bits as f64 / self.input_symbols as f64
        }
    }

    /// Bits carried by the channel.
    pub fn channel_bits(&self) -> u64 {
        self.codewords * CODEWORD_BITS as u64
    }

    /// Payload bits per channel bit, counting zero padding as overhead.
    pub fn effective_code_rate(&self) -> f64 {
        let carried = self.channel_bits();
        if carried == 0 {
            0.0
        } else {
            self.compressed_bits as f64 / carried as f64
        }
    }

    /// Fraction of channel bits flipped.
    pub fn channel_bit_error_rate(&self) -> f64 {
        let carried = self.channel_bits();
        if carried == 0 {
            0.0
        } else {
            self.bits_flipped as f64 / carried as f64
        }
    }

    /// Fraction of payload bits still wrong after correction.
    pub fn residual_bit_error_rate(&self) -> f64 {
        if self.compressed_bits == 0 {
            0.0
        } else {
            self.residual_bit_errors as f64 / self.compressed_bits as f64
        }
    }

    /// Count data bits that differ between `original` and `decoded`.
    ///
    /// Bits present in only one of the two sequences count as errors.
    pub fn record_residual(&mut self, original: &[Bit], decoded: &[Bit]) {
        let mismatched = original
            .iter()
            .zip(decoded)
            .filter(|(a, b)| a != b)
            .count();
        let length_gap = original.len().abs_diff(decoded.len());
        self.residual_bit_errors = (mismatched + length_gap) as u64;
    }

    /// Record how many blocks took two or more flips.
    pub fn record_flips_per_block(&mut self, flips_per_block: &[usize]) {
        self.blocks_multi_error = flips_per_block.iter().filter(|&&n| n >= 2).count() as u64;
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Run Summary ===");
        println!("Duration: {} us", self.duration().as_micros());
        println!();

        println!("=== Compression ===");
        println!("Symbols: {} ({} distinct)", self.input_symbols, self.distinct_symbols);
        println!(
            "Fixed-width: {} bits ({} bits/symbol)",
            self.fixed_width_bits(),
            self.fixed_width_bits_per_symbol()
        );
        println!(
            "Huffman: {} bits ({:.3} bits/symbol, {} bytes packed)",
            self.compressed_bits,
            self.average_code_length(),
            self.compressed_bytes
        );
        println!("Ratio: {:.1}%", self.compression_ratio() * 100.0);
        println!();

        println!("=== Channel Coding ===");
        println!("Codewords: {}", self.codewords);
        println!("Channel bits: {}", self.channel_bits());
        println!(
            "Code rate: {:.3} (nominal {:.3})",
            self.effective_code_rate(),
            DATA_BITS as f64 / CODEWORD_BITS as f64
        );
        println!();

        println!("=== Noise ===");
        println!(
            "Bits flipped: {} ({:.2}%)",
            self.bits_flipped,
            self.channel_bit_error_rate() * 100.0
        );
        println!("Blocks corrected: {}", self.errors_corrected);
        println!("Blocks with 2+ flips: {}", self.blocks_multi_error);
        println!(
            "Residual bit errors: {} ({:.2}%)",
            self.residual_bit_errors,
            self.residual_bit_error_rate() * 100.0
        );
        println!();
    }

    /// Print just the final result (pass/fail).
    pub fn print_result(&self) {
        if self.text_recovered {
            println!("✓ Text recovered exactly");
            println!(
                "  {} flips, {} corrected, in {} us",
                self.bits_flipped,
                self.errors_corrected,
                self.duration().as_micros()
            );
        } else if self.blocks_multi_error > 0 {
            println!(
                "✗ Text not recovered: {} blocks took 2+ flips and were miscorrected",
                self.blocks_multi_error
            );
        } else {
            println!(
                "✗ Text not recovered: {} residual bit errors",
                self.residual_bit_errors
            );
        }
    }

    /// Export metrics as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "duration_us={}\n\
             input_symbols={}\n\
             distinct_symbols={}\n\
             compressed_bits={}\n\
             compressed_bytes={}\n\
             compression_ratio={:.4}\n\
             codewords={}\n\
             channel_bits={}\n\
             bits_flipped={}\n\
             errors_corrected={}\n\
             blocks_multi_error={}\n\
             residual_bit_errors={}\n\
             text_recovered={}\n",
            self.duration().as_micros(),
            self.input_symbols,
            self.distinct_symbols,
            self.compressed_bits,
            self.compressed_bytes,
            self.compression_ratio(),
            self.codewords,
            self.channel_bits(),
            self.bits_flipped,
            self.errors_corrected,
            self.blocks_multi_error,
            self.residual_bit_errors,
            self.text_recovered,
        )
    }
}

impl Default for PipelineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = PipelineMetrics::new();
        assert!(metrics.end_time.is_none());
        assert!(metrics.duration().as_millis() < 100);
        assert_eq!(metrics.compression_ratio(), 0.0);
        assert_eq!(metrics.effective_code_rate(), 0.0);
    }

    #[test]
    fn test_fixed_width_baseline() {
        let mut metrics = PipelineMetrics::new();
        for (distinct, width) in [(1, 1), (2, 1), (3, 2), (4, 2), (5, 3), (19, 5), (32, 5), (33, 6)] {
            metrics.distinct_symbols = distinct;
            assert_eq!(metrics.fixed_width_bits_per_symbol(), width, "distinct {distinct}");
        }
    }

    #[test]
    fn test_compression_ratio() {
        let mut metrics = PipelineMetrics::new();
        metrics.input_symbols = 100;
        metrics.distinct_symbols = 16;
        metrics.compressed_bits = 300;

        assert_eq!(metrics.fixed_width_bits(), 400);
        assert_eq!(metrics.compression_ratio(), 0.75);
        assert_eq!(metrics.average_code_length(), 3.0);
    }

    #[test]
    fn test_code_rate() {
        let mut metrics = PipelineMetrics::new();
        metrics.compressed_bits = 8;
        metrics.codewords = 2;
        assert_eq!(metrics.channel_bits(), 14);
        assert!((metrics.effective_code_rate() - 4.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_residual() {
        let mut metrics = PipelineMetrics::new();
        metrics.record_residual(&[Bit::One, Bit::Zero, Bit::One], &[Bit::One, Bit::One, Bit::One]);
        assert_eq!(metrics.residual_bit_errors, 1);

        metrics.record_residual(&[Bit::One, Bit::Zero], &[Bit::One]);
        assert_eq!(metrics.residual_bit_errors, 1);
    }

    #[test]
    fn test_flips_per_block() {
        let mut metrics = PipelineMetrics::new();
        metrics.record_flips_per_block(&[0, 1, 2, 0, 3]);
        assert_eq!(metrics.blocks_multi_error, 2);
    }

    #[test]
    fn test_export_text() {
        let mut metrics = PipelineMetrics::new();
        metrics.input_symbols = 112;
        metrics.compressed_bits = 473;
        metrics.compressed_bytes = 60;
        metrics.codewords = 120;
        metrics.text_recovered = true;

        let text = metrics.export_text();
        assert!(text.contains("input_symbols=112"));
        assert!(text.contains("compressed_bits=473\ncompressed_bytes=60\n"));
        assert!(text.contains("channel_bits=840"));
        assert!(text.contains("text_recovered=true"));
    }
}
