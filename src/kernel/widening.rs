//! Widening-accumulate AXPY kernel
//!
//! Vectorizes the reference semantics at full precision: per strip, the
//! product and the shifted accumuland are computed in 32-bit lanes, summed,
//! and narrowed once with round-to-nearest and signed saturation. Output is
//! bit-exact with [`axpy_ref`](crate::kernel::axpy_ref) for every input and
//! every lane width, with zero tolerance.
//!
//! Uses AVX2 when the CPU supports it and falls back to a portable strip
//! body otherwise. The 32-bit lanes are sufficient: the widest accumulator
//! plus rounding bias is `2^31 - 2^15 + 2^14` (see the headroom test in
//! [`crate::fixed`]).

use crate::fixed::{round_narrow, widen_mul, widen_shift, KernelContext};
use crate::kernel::lanes::{for_each_strip, Grouping, LanePolicy, NativeLanes};
use crate::kernel::{AxpyKernel, SimdBackend};

/// Full-precision vectorized AXPY
#[derive(Debug, Clone, Copy)]
pub struct WideningKernel {
    policy: NativeLanes,
    name: &'static str,
}

impl WideningKernel {
    /// Create a variant with the given lane grouping factor
    #[must_use]
    pub fn new(grouping: Grouping) -> Self {
        let name = match grouping {
            Grouping::M1 => "Wide m1",
            Grouping::M4 => "Wide m4",
            Grouping::M8 => "Wide m8",
        };
        Self {
            policy: NativeLanes::new(SimdBackend::detect(), grouping),
            name,
        }
    }

    /// Run under an explicit lane policy
    ///
    /// The output does not depend on the policy; tests use this to prove
    /// partitioning invariance.
    pub fn run_with_policy<P: LanePolicy>(
        a: &[i16],
        b: &[i16],
        y: &mut [i16],
        alpha: i16,
        policy: &P,
    ) {
        debug_assert_eq!(a.len(), y.len());
        debug_assert_eq!(b.len(), y.len());

        // Rounding configuration is established once per invocation and
        // shared by every strip; it is not lane-count-dependent.
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

impl AxpyKernel for WideningKernel {
    fn name(&self) -> &'static str {
        self.name
    }

    fn run(&self, a: &[i16], b: &[i16], y: &mut [i16], alpha: i16) {
        Self::run_with_policy(a, b, y, alpha, &self.policy);
    }
}

/// Portable strip body over the widened accumulator
fn axpy_strip_portable(a: &[i16], b: &[i16], y: &mut [i16], alpha: i16, ctx: &KernelContext) {
    for ((out, &av), &bv) in y.iter_mut().zip(a).zip(b) {
        let acc = widen_mul(alpha, bv) + widen_shift(av);
        *out = round_narrow(acc, ctx);
    }
}

/// AVX2 strip body: 16 elements per iteration in 32-bit lanes
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
#[allow(unsafe_op_in_unsafe_fn)]
#[allow(clippy::cast_possible_truncation)] // round bias fits i32
unsafe fn axpy_strip_avx2(a: &[i16], b: &[i16], y: &mut [i16], alpha: i16, ctx: &KernelContext) {
    #[allow(clippy::wildcard_imports)]
    use std::arch::x86_64::*;

    let len = y.len();
    let chunks = len / 16;
    let valpha = _mm256_set1_epi32(i32::from(alpha));
    let vbias = _mm256_set1_epi32(ctx.round_bias() as i32);

    for i in 0..chunks {
        let off = i * 16;
        let va = _mm256_loadu_si256(a.as_ptr().add(off).cast::<__m256i>());
        let vb = _mm256_loadu_si256(b.as_ptr().add(off).cast::<__m256i>());

        // Widen both halves to i32
        let b_lo = _mm256_cvtepi16_epi32(_mm256_castsi256_si128(vb));
        let b_hi = _mm256_cvtepi16_epi32(_mm256_extracti128_si256(vb, 1));
        let a_lo = _mm256_cvtepi16_epi32(_mm256_castsi256_si128(va));
        let a_hi = _mm256_cvtepi16_epi32(_mm256_extracti128_si256(va, 1));

        // acc = alpha * b + (a << 15) + bias
        let acc_lo = _mm256_add_epi32(
            _mm256_add_epi32(_mm256_mullo_epi32(b_lo, valpha), _mm256_slli_epi32(a_lo, 15)),
            vbias,
        );
        let acc_hi = _mm256_add_epi32(
            _mm256_add_epi32(_mm256_mullo_epi32(b_hi, valpha), _mm256_slli_epi32(a_hi, 15)),
            vbias,
        );

        // Arithmetic shift, then pack with signed saturation. packs
        // interleaves 128-bit lanes, so restore element order afterwards.
        let narrowed = _mm256_packs_epi32(
            _mm256_srai_epi32(acc_lo, 15),
            _mm256_srai_epi32(acc_hi, 15),
        );
        let ordered = _mm256_permute4x64_epi64(narrowed, 0b1101_1000);

        _mm256_storeu_si256(y.as_mut_ptr().add(off).cast::<__m256i>(), ordered);
    }

    // Remaining elements of the strip
    let tail = chunks * 16;
    axpy_strip_portable(&a[tail..], &b[tail..], &mut y[tail..], alpha, ctx);
}
