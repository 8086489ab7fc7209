//! # Quince
//!
//! Q15 fixed-point AXPY (`y = a + alpha * b`) kernel suite with runtime
//! SIMD dispatch and bit-exactness auditing.
//!
//! Quince (Spanish: "fifteen", for the 15 fractional bits of the Q15
//! format) provides one canonical scalar reference kernel, vectorized
//! variants that reproduce it under different precision trade-offs, and
//! the audit and benchmark harnesses that cross-validate them.
//!
//! ## Features
//!
//! - **One numeric contract**: widen, shift, round-to-nearest, saturate —
//!   shared by every kernel via [`fixed`]
//! - **Vector-length agnostic**: kernels are strip-mined under a lane
//!   policy and produce identical output for every partitioning
//! - **Always auditable**: the portable path is available on every target;
//!   SIMD only changes the inner dispatch, never the result contract
//!
//! ## Example
//!
//! ```rust
//! use quince::kernel::{axpy_ref, Grouping, WideningKernel, AxpyKernel};
//!
//! let a = [16384i16, -16384, 0, 32767];
//! let b = [32767i16, 32767, -1, 0];
//! let alpha = 16384; // 0.5 in Q15
//!
//! let mut y_ref = [0i16; 4];
//! axpy_ref(&a, &b, &mut y_ref, alpha);
//!
//! let mut y = [0i16; 4];
//! WideningKernel::new(Grouping::M1).run(&a, &b, &mut y, alpha);
//! assert_eq!(y, y_ref);
//! ```
//!
//! ## Architecture
//!
//! - [`fixed`]: Q15 arithmetic primitives and the rounding context
//! - [`kernel`]: reference and vectorized kernels, lane policies, SIMD
//!   backend detection
//! - [`audit`]: element-wise divergence reports
//! - [`bench`]: the benchmark driver over the built-in size sequence
//! - [`buffer`], [`timer`]: aligned allocations and the injected cycle
//!   counter the driver consumes

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]

/// Element-wise divergence audit of kernel outputs
pub mod audit;
/// Benchmark driver over the built-in size sequence
pub mod bench;
/// 128-byte-aligned Q15 sample buffers
pub mod buffer;
/// CLI command implementations (extracted for testability)
pub mod cli;
pub mod error;
pub mod fixed;
pub mod kernel;
/// Injected cycle-counter capability
pub mod timer;

// Re-exports for convenience
pub use error::{QuinceError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
