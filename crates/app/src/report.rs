//! Human-readable printing of each pipeline stage.

use tandem_sim_core::hamming::{DecodeOutcome, CODEWORD_BITS};
use tandem_sim_core::huffman::Compressed;
use tandem_sim_core::{Bit, Codeword};

const RULE: &str = "==================================================";

fn section(title: &str) {
    println!("\n{}", RULE);
    println!("== {} ==", title);
}

fn bit_list(bits: &[Bit]) -> String {
    let items: Vec<String> = bits.iter().map(Bit::to_string).collect();
    format!("[{}]", items.join(", "))
}

fn flag_list(flags: &[bool]) -> String {
    let items: Vec<&str> = flags.iter().map(|&f| if f { "1" } else { "0" }).collect();
    format!("[{}]", items.join(", "))
}

pub fn print_correction(outcome: &DecodeOutcome, show_data: bool) {
    println!("== Error Detection and Correction ==");
    println!(
        "Number of detected and corrected errors: {}",
        outcome.errors_corrected
    );
    println!(
        "Number of errors occurred in each block: {}",
        flag_list(&outcome.block_flags)
    );
    if show_data {
        println!("Decoded data after error correction:");
        println!("{}", bit_list(&outcome.data));
    }
}

pub fn print_original(text: &str, normalized: &str) {
    section("Original Message Text");
    println!("{}", text);
    if text != normalized {
        println!("(normalized: {})", normalized);
    }
}

/// One line per symbol, sorted by symbol.
pub fn print_codes(compressed: &Compressed) {
    section("Huffman Code Table");
    for (symbol, code) in compressed.codes.iter() {
        println!(
            "  {:?}  freq {:>4}  code {}",
            symbol,
            compressed.frequencies.get(symbol),
            code
        );
    }
}

pub fn print_compressed(compressed: &Compressed) {
    section("Compressed Text using Huffman Coding");
    println!("{}", compressed.bits);
}

pub fn print_blocks(title: &str, blocks: &[Codeword]) {
    section(title);
    for block in blocks {
        println!("{}", block);
    }
}

pub fn print_flips(flipped_positions: &[usize]) {
    println!(
        "Flipped bit positions (block:bit): {}",
        flipped_positions
            .iter()
            .map(|p| format!("{}:{}", p / CODEWORD_BITS, p % CODEWORD_BITS))
            .collect::<Vec<_>>()
            .join(" ")
    );
}

pub fn print_recovered(recovered: Result<&str, String>) {
    section("Recovered Text");
    match recovered {
        Ok(text) => println!("{}", text),
        Err(reason) => println!("(could not decode: {})", reason),
    }
}
