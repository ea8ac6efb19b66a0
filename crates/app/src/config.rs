//! Configuration for the tandem-sim application.
//!
//! Command-line arguments are parsed with clap and resolved into a `Config`
//! with every default filled in (including a time-based seed when none is
//! given). The resolved config can be printed so any run can be reproduced.

use clap::Parser;
use std::path::PathBuf;
use tandem_sim_core::channel::ChannelConfig;

/// The demo sentence used when no input is given.
pub const DEFAULT_TEXT: &str = "Information technologies are rapidly developing, opening up new \
                                opportunities for process automation and business improvement.";

/// Default number of flipped channel bits.
pub const DEFAULT_ERRORS: usize = 10;

#[derive(Parser, Debug)]
#[command(
    name = "tandem-sim",
    version,
    about = "Huffman compression + Hamming(7,4) error correction over a noisy channel",
    after_help = "EXAMPLES:\n    \
        tandem-sim                               # Demo sentence, random seed\n    \
        tandem-sim --seed 42                     # Deterministic run\n    \
        tandem-sim --text \"hello world\" --errors 3\n    \
        tandem-sim --sample 2000 --errors 40 --quiet"
)]
pub struct Args {
    /// Input text (default: the demo sentence)
    #[arg(long, conflicts_with_all = ["input", "sample"])]
    pub text: Option<String>,

    /// Read input text from a file
    #[arg(long = "in", value_name = "PATH", conflicts_with = "sample")]
    pub input: Option<PathBuf>,

    /// Generate N letters of seeded sample text
    #[arg(long, value_name = "N")]
    pub sample: Option<usize>,

    /// Number of channel bits to flip
    #[arg(long, value_name = "N", default_value_t = DEFAULT_ERRORS)]
    pub errors: usize,

    /// Random seed for determinism (default: time-based)
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Print resolved configuration
    #[arg(long)]
    pub print_config: bool,

    /// Don't print metrics summary
    #[arg(long)]
    pub no_metrics: bool,

    /// Don't print per-stage dumps (bitstrings and codeword blocks)
    #[arg(long, short)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Where the input text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Text(String),
    File(PathBuf),
    Sample { len: usize },
}

/// Complete configuration for a run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Input text source
    pub input: InputSource,

    /// Noisy channel config (error count + seed)
    pub channel: ChannelConfig,

    /// Whether to print detailed config
    pub print_config: bool,

    /// Whether to print metrics summary
    pub print_metrics: bool,

    /// Whether to print per-stage dumps
    pub print_stages: bool,

    /// Log verbosity requested on the command line
    pub verbosity: u8,
}

impl Config {
    /// Resolve parsed arguments into a complete configuration.
    ///
    /// If no seed is given, one is derived from the system clock.
    pub fn from_args(args: Args) -> Self {
        let seed = args.seed.unwrap_or_else(time_seed);

        let input = match (args.text, args.input, args.sample) {
            (Some(text), _, _) => InputSource::Text(text),
            (None, Some(path), _) => InputSource::File(path),
            (None, None, Some(len)) => InputSource::Sample { len },
            (None, None, None) => InputSource::Text(DEFAULT_TEXT.to_string()),
        };

        Config {
            input,
            channel: ChannelConfig {
                error_count: args.errors,
                seed,
            },
            print_config: args.print_config,
            print_metrics: !args.no_metrics,
            print_stages: !args.quiet,
            verbosity: args.verbose,
        }
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        match &self.input {
            InputSource::Text(text) => println!("Input: text ({} chars)", text.chars().count()),
            InputSource::File(path) => println!("Input: file {}", path.display()),
            InputSource::Sample { len } => println!("Input: generated sample ({} letters)", len),
        }
        println!("Seed: {}", self.channel.seed);
        println!("Bit errors: {}", self.channel.error_count);
        println!();
    }
}

fn time_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
