//! Quince CLI - Q15 AXPY precision and performance tool
//!
//! # Commands
//!
//! - `bench` - Run the built-in benchmark suite
//! - `info` - Show version, SIMD backend, and kernel variants

use clap::{Parser, Subcommand};
use quince::cli;

/// Quince - Q15 fixed-point AXPY kernel suite
///
/// Cross-validates vectorized kernel variants against a scalar reference
/// for bit-exactness and reports cycle costs.
#[derive(Parser)]
#[command(name = "quince")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the benchmark suite over the built-in buffer sizes
    Bench,
    /// Show version, detected SIMD backend, and kernel variants
    Info,
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Commands::Bench => cli::run_bench(),
        Commands::Info => cli::run_info(),
    }
}
