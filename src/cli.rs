//! CLI command implementations
//!
//! Report rendering lives here, out of the library types: the driver
//! produces [`SizeReport`] values and this module turns them into the
//! two-line-per-variant console format. Failed rounds go to stderr.

use std::io::Write;

use crate::bench::{BenchConfig, BenchmarkDriver, SizeOutcome, SizeReport};
use crate::kernel::{available_kernels, SimdBackend};
use crate::timer;

/// Run the built-in benchmark suite and print the report to stdout
pub fn run_bench() {
    println!("Q15 AXPY Performance & Precision Tool");
    println!("=====================================");

    let driver = BenchmarkDriver::new(BenchConfig::default());
    for outcome in driver.run() {
        match outcome {
            SizeOutcome::Completed(report) => {
                let stdout = std::io::stdout();
                let mut sink = stdout.lock();
                // Console output failure has nowhere better to go
                let _ = write_report(&mut sink, &report);
            }
            SizeOutcome::Failed { n, error } => {
                eprintln!("Benchmark round N = {n} abandoned: {error}");
            }
        }
    }
}

/// Render one size's rows in the report format
///
/// # Errors
///
/// Propagates sink write failures.
pub fn write_report(sink: &mut impl Write, report: &SizeReport) -> std::io::Result<()> {
    writeln!(sink, "\n--- Benchmark Suite: N = {} ---", report.n)?;

    for row in &report.variants {
        writeln!(sink, "{:<20} | {}", row.name, row.audit)?;
        if let (Some(cycles), Some(cpe)) = (row.cycles, row.cycles_per_element) {
            writeln!(sink, "  -> {:<20}: {cycles:>8} cycles ({cpe:>6.2} c/e)", row.name)?;
        }
    }

    if !report.timing_supported {
        writeln!(sink, "Performance tracking unsupported on this target.")?;
    }

    Ok(())
}

/// Print version, detected backend, and registered kernel variants
pub fn run_info() {
    let backend = SimdBackend::detect();
    println!("quince {}", crate::VERSION);
    println!("SIMD backend: {backend} ({} x i16 lanes)", backend.lanes_i16());
    println!(
        "Cycle counter: {}",
        if timer::detect().is_some() {
            "available"
        } else {
            "unavailable"
        }
    );
    println!("Kernel variants:");
    for kernel in available_kernels() {
        println!("  {}", kernel.name());
    }
}
