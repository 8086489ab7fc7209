//! Benchmark driver for kernel precision and performance
//!
//! Orchestrates every registered kernel variant over a fixed sequence of
//! buffer sizes. Per size: allocate aligned buffers, fill the inputs with
//! seeded pseudo-random Q15 samples, run the scalar reference once to
//! obtain ground truth, then time and audit each variant against it.
//!
//! An allocation failure abandons only the affected size (buffers already
//! allocated are released on drop) and the run continues with the next
//! size. A missing cycle counter degrades the report to audit-only rows.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::audit::{audit, AuditResult};
use crate::buffer::Q15Buffer;
use crate::error::{QuinceError, Result};
use crate::kernel::{available_kernels, axpy_ref, AxpyKernel};
use crate::timer::{self, CycleCounter};

/// Benchmark suite configuration
///
/// The defaults are the whole story for the CLI: the size sequence and
/// alpha are built in, not flags. The type exists so tests can run small
/// or pathological suites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Buffer sizes, one benchmark round each
    pub sizes: Vec<usize>,
    /// Q15 scalar multiplier shared by every variant in a round
    pub alpha: i16,
    /// Seed for the pseudo-random input fill
    pub seed: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sizes: vec![1024, 4096, 65536],
            alpha: 16384,
            seed: 42,
        }
    }
}

/// One report row: a kernel variant audited (and optionally timed) once
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantReport {
    /// Kernel variant name
    pub name: String,
    /// Divergence from the scalar reference
    pub audit: AuditResult,
    /// Elapsed cycles bracketing the kernel call, when timing is available
    pub cycles: Option<u64>,
    /// Cycles divided by buffer length
    pub cycles_per_element: Option<f64>,
}

/// All variant rows for one buffer size
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizeReport {
    /// Buffer length for this round
    pub n: usize,
    /// Whether cycle timing was available
    pub timing_supported: bool,
    /// One row per kernel variant, reference first
    pub variants: Vec<VariantReport>,
}

/// Outcome of one configured size
#[derive(Debug)]
pub enum SizeOutcome {
    /// The round ran to completion
    Completed(SizeReport),
    /// The round was abandoned; the error belongs on the error channel
    Failed {
        /// Buffer length that failed
        n: usize,
        /// What went wrong (allocation, in practice)
        error: QuinceError,
    },
}

/// Runs the configured suite over the registered kernel variants
pub struct BenchmarkDriver {
    config: BenchConfig,
    counter: Option<Box<dyn CycleCounter>>,
    kernels: Vec<Box<dyn AxpyKernel>>,
}

impl BenchmarkDriver {
    /// Driver with the platform cycle counter and the full kernel registry
    #[must_use]
    pub fn new(config: BenchConfig) -> Self {
        Self {
            config,
            counter: timer::detect(),
            kernels: available_kernels(),
        }
    }

    /// Replace the cycle counter (tests inject a fake; `None` simulates a
    /// target without one)
    #[must_use]
    pub fn with_counter(mut self, counter: Option<Box<dyn CycleCounter>>) -> Self {
        self.counter = counter;
        self
    }

    /// Run every configured size, skipping rounds that fail to allocate
    #[must_use]
    pub fn run(&self) -> Vec<SizeOutcome> {
        self.config
            .sizes
            .iter()
            .map(|&n| match self.run_size(n) {
                Ok(report) => SizeOutcome::Completed(report),
                Err(error) => SizeOutcome::Failed { n, error },
            })
            .collect()
    }

    /// One benchmark round at buffer length `n`
    ///
    /// # Errors
    ///
    /// Returns the first allocation failure; buffers allocated before the
    /// failure are released by drop.
    #[allow(clippy::cast_precision_loss)] // cycles-per-element is approximate
    pub fn run_size(&self, n: usize) -> Result<SizeReport> {
        let mut a = Q15Buffer::zeroed(n)?;
        let mut b = Q15Buffer::zeroed(n)?;
        let mut y_ref = Q15Buffer::zeroed(n)?;
        let mut y_var = Q15Buffer::zeroed(n)?;

        // Uniform samples over the full Q15 range, reproducible per size
        let mut rng = StdRng::seed_from_u64(self.config.seed ^ n as u64);
        for sample in a.iter_mut() {
            *sample = rng.gen();
        }
        for sample in b.iter_mut() {
            *sample = rng.gen();
        }

        axpy_ref(&a, &b, &mut y_ref, self.config.alpha);

        let mut variants = Vec::with_capacity(self.kernels.len());
        for kernel in &self.kernels {
            y_var.fill(0);

            let cycles = match &self.counter {
                Some(counter) => {
                    let t0 = counter.now();
                    kernel.run(&a, &b, &mut y_var, self.config.alpha);
                    Some(counter.now().saturating_sub(t0))
                }
                None => {
                    kernel.run(&a, &b, &mut y_var, self.config.alpha);
                    None
                }
            };

            let audit = audit(&y_ref, &y_var)?;
            let cycles_per_element = cycles.map(|c| {
                if n == 0 {
                    0.0
                } else {
                    c as f64 / n as f64
                }
            });
            variants.push(VariantReport {
                name: kernel.name().to_string(),
                audit,
                cycles,
                cycles_per_element,
            });
        }

        Ok(SizeReport {
            n,
            timing_supported: self.counter.is_some(),
            variants,
        })
    }
}
