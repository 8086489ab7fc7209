//! AXPY kernel variants and runtime capability detection
//!
//! Every kernel computes `y = a + alpha * b` over Q15 buffers with the
//! signature of [`AxpyKernel::run`]. The scalar reference defines the
//! correct output for every input; the vectorized variants reproduce it
//! under two precision strategies:
//!
//! - [`WideningKernel`]: full-precision widened accumulate, bit-exact with
//!   the reference for every input and every lane width
//! - [`SaturatingKernel`]: single-width saturating multiply then saturating
//!   add, cheaper but only equal to within one output unit
//!
//! Variant availability is a runtime question answered by
//! [`SimdBackend::detect`]; the portable path is always present, so every
//! variant in [`available_kernels`] runs on every target.

pub mod lanes;
pub mod reference;
pub mod saturating;
pub mod widening;

pub use lanes::{for_each_strip, FixedLanes, Grouping, LanePolicy, NativeLanes};
pub use reference::{axpy_ref, ScalarReference};
pub use saturating::SaturatingKernel;
pub use widening::WideningKernel;

/// SIMD backend detected at runtime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SimdBackend {
    /// AVX2 (256-bit)
    Avx2,
    /// ARM NEON (128-bit)
    Neon,
    /// Scalar fallback
    #[default]
    Scalar,
}

impl std::fmt::Display for SimdBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimdBackend::Avx2 => write!(f, "AVX2"),
            SimdBackend::Neon => write!(f, "NEON"),
            SimdBackend::Scalar => write!(f, "Scalar"),
        }
    }
}

impl SimdBackend {
    /// Detect the best available SIMD backend
    #[must_use]
    pub fn detect() -> Self {
        #[cfg(target_arch = "x86_64")]
        {
            if is_x86_feature_detected!("avx2") {
                return SimdBackend::Avx2;
            }
        }

        #[cfg(target_arch = "aarch64")]
        {
            return SimdBackend::Neon;
        }

        #[allow(unreachable_code)]
        SimdBackend::Scalar
    }

    /// Base number of i16 lanes per vector register
    #[must_use]
    pub fn lanes_i16(&self) -> usize {
        match self {
            SimdBackend::Avx2 => 16,
            SimdBackend::Neon => 8,
            SimdBackend::Scalar => 4,
        }
    }
}

/// A Q15 AXPY kernel variant
///
/// `run` writes exactly `y.len()` values into `y` and has no other
/// observable effect. `a`, `b`, and `y` must all be the same length; `y`
/// cannot alias the inputs (enforced by the borrow checker).
pub trait AxpyKernel {
    /// Variant name as it appears in benchmark reports
    fn name(&self) -> &'static str;

    /// Compute `y = a + alpha * b` element-wise
    fn run(&self, a: &[i16], b: &[i16], y: &mut [i16], alpha: i16);
}

/// Kernel variants runnable on the current execution target
///
/// The scalar reference is always first so benchmark reports lead with the
/// ground truth. Every vectorized variant carries a portable path, so the
/// list does not shrink on targets without SIMD; only the inner dispatch
/// changes.
#[must_use]
pub fn available_kernels() -> Vec<Box<dyn AxpyKernel>> {
    vec![
        Box::new(ScalarReference),
        Box::new(WideningKernel::new(Grouping::M1)),
        Box::new(WideningKernel::new(Grouping::M4)),
        Box::new(SaturatingKernel::new(Grouping::M1)),
        Box::new(SaturatingKernel::new(Grouping::M4)),
        Box::new(SaturatingKernel::new(Grouping::M8)),
    ]
}
