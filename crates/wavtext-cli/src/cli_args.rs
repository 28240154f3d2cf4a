//! CLI argument definitions for the wavtext command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Parser, Subcommand};

/// wavtext - Read PCM WAV files and dump their samples as text
#[derive(Parser)]
#[command(name = "wavtext")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Log chunk and format details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Print the header fields and data chunk summary of a WAV file
    Info {
        /// Path to the WAV file
        input: String,

        /// Include a BLAKE3 hash of the sample bytes
        #[arg(long)]
        hash: bool,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List the chunks between the fmt chunk and the data chunk
    Chunks {
        /// Path to the WAV file
        input: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Decode samples and write them as text, one frame per line
    Export {
        /// Path to the WAV file
        input: String,

        /// Output text file (default: stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// JSON file with export options
        #[arg(long)]
        config: Option<String>,

        /// Separator between channel values
        #[arg(long, value_parser = ["tab", "newline", "comma"])]
        separator: Option<String>,

        /// Line terminator
        #[arg(long, value_parser = ["lf", "crlf"])]
        line_ending: Option<String>,

        /// Write a first line naming the channels (L/R for stereo)
        #[arg(long)]
        header: bool,

        /// Interpretation of 8-bit samples
        #[arg(long, value_parser = ["unsigned", "signed"])]
        eight_bit: Option<String>,
    },
}
