//! Saturating-multiply AXPY kernel
//!
//! The cheaper, approximate strategy: a single-width Q15 rounding multiply
//! that saturates to 16 bits, followed by a saturating add of the
//! accumuland. This reorders the reference's single rounding step into two
//! narrow rounding/saturating steps and is **not** bit-equivalent to the
//! reference.
//!
//! The divergence is tightly bounded. Because `a << 15` is an exact
//! multiple of the narrowing divisor, splitting the rounding changes
//! nothing when no intermediate value saturates; the only source of
//! difference is the product clamp, and that costs at most one output
//! unit. Tests pin the `|variant - reference| <= 1` bound.

use crate::fixed::{saturating_mul, KernelContext};
use crate::kernel::lanes::{for_each_strip, Grouping, LanePolicy, NativeLanes};
use crate::kernel::{AxpyKernel, SimdBackend};

/// Narrow saturating AXPY
#[derive(Debug, Clone, Copy)]
pub struct SaturatingKernel {
    policy: NativeLanes,
    name: &'static str,
}

impl SaturatingKernel {
    /// Create a variant with the given lane grouping factor
    #[must_use]
    pub fn new(grouping: Grouping) -> Self {
        let name = match grouping {
            Grouping::M1 => "Sat m1",
            Grouping::M4 => "Sat m4",
            Grouping::M8 => "Sat m8",
        };
        Self {
            policy: NativeLanes::new(SimdBackend::detect(), grouping),
            name,
        }
    }

    /// Run under an explicit lane policy
    pub fn run_with_policy<P: LanePolicy>(
        a: &[i16],
        b: &[i16],
        y: &mut [i16],
        alpha: i16,
        policy: &P,
    ) {
        debug_assert_eq!(a.len(), y.len());
        debug_assert_eq!(b.len(), y.len());

        let ctx = KernelContext::default();

        #[cfg(target_arch = "x86_64")]
        {
            if is_x86_feature_detected!("avx2") {
                for_each_strip(y.len(), policy, |offset, len| {
                    // SAFETY: AVX2 is available
                    unsafe {
                        axpy_strip_avx2(
                            &a[offset..offset + len],
                            &b[offset..offset + len],
                            &mut y[offset..offset + len],
                            alpha,
                            &ctx,
                        );
                    }
                });
                return;
            }
        }

        for_each_strip(y.len(), policy, |offset, len| {
            axpy_strip_portable(
                &a[offset..offset + len],
                &b[offset..offset + len],
                &mut y[offset..offset + len],
                alpha,
                &ctx,
            );
        });
    }
}

impl AxpyKernel for SaturatingKernel {
    fn name(&self) -> &'static str {
        self.name
    }

    fn run(&self, a: &[i16], b: &[i16], y: &mut [i16], alpha: i16) {
        Self::run_with_policy(a, b, y, alpha, &self.policy);
    }
}

/// Portable strip body: saturating multiply, saturating add
fn axpy_strip_portable(a: &[i16], b: &[i16], y: &mut [i16], alpha: i16, ctx: &KernelContext) {
    for ((out, &av), &bv) in y.iter_mut().zip(a).zip(b) {
        *out = av.saturating_add(saturating_mul(alpha, bv, ctx));
    }
}

/// AVX2 strip body: 16 elements per iteration
///
/// `_mm256_mulhrs_epi16` computes exactly `(alpha * b + 2^14) >> 15` but
/// wraps the single `+32768` result (`-1.0 * -1.0`) to `-32768` instead of
/// clamping. No legitimate rounded product reaches `-32768` (the true
/// minimum is `-32767`), so any `-32768` lane is a wrap and is flipped to
/// `+32767` before the saturating add.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
#[allow(unsafe_op_in_unsafe_fn)]
unsafe fn axpy_strip_avx2(a: &[i16], b: &[i16], y: &mut [i16], alpha: i16, ctx: &KernelContext) {
    #[allow(clippy::wildcard_imports)]
    use std::arch::x86_64::*;

    let len = y.len();
    let chunks = len / 16;
    let valpha = _mm256_set1_epi16(alpha);
    let vmin = _mm256_set1_epi16(i16::MIN);

    for i in 0..chunks {
        let off = i * 16;
        let va = _mm256_loadu_si256(a.as_ptr().add(off).cast::<__m256i>());
        let vb = _mm256_loadu_si256(b.as_ptr().add(off).cast::<__m256i>());

        let prod = _mm256_mulhrs_epi16(vb, valpha);
        let wrapped = _mm256_cmpeq_epi16(prod, vmin);
        let prod = _mm256_xor_si256(prod, wrapped);

        let result = _mm256_adds_epi16(va, prod);
        _mm256_storeu_si256(y.as_mut_ptr().add(off).cast::<__m256i>(), result);
    }

    let tail = chunks * 16;
    axpy_strip_portable(&a[tail..], &b[tail..], &mut y[tail..], alpha, ctx);
}
