//! Canonical scalar AXPY reference
//!
//! Defines the correct output for every input: each element is computed in
//! a widened accumulator and narrowed once, with round-to-nearest and
//! saturation at the Q15 boundaries. Every other kernel is audited against
//! this one.

use crate::fixed::{round_narrow, widen_mul, widen_shift, KernelContext};
use crate::kernel::AxpyKernel;

/// Compute `y[i] = round(a[i] + alpha * b[i])` in full precision
///
/// Pure function of `(a, b, alpha)`; writes every element of `y` and
/// nothing else. All three slices must be the same length.
pub fn axpy_ref(a: &[i16], b: &[i16], y: &mut [i16], alpha: i16) {
    debug_assert_eq!(a.len(), y.len());
    debug_assert_eq!(b.len(), y.len());

    let ctx = KernelContext::default();
    for ((out, &av), &bv) in y.iter_mut().zip(a).zip(b) {
        let acc = widen_mul(alpha, bv) + widen_shift(av);
        *out = round_narrow(acc, &ctx);
    }
}

/// The reference kernel as a benchmark variant
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarReference;

impl AxpyKernel for ScalarReference {
    fn name(&self) -> &'static str {
        "Scalar Reference"
    }

    fn run(&self, a: &[i16], b: &[i16], y: &mut [i16], alpha: i16) {
        axpy_ref(a, b, y, alpha);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_alpha_rounds_accumuland_through() {
        let a = [100, -200, i16::MAX, i16::MIN];
        let b = [1, 2, 3, 4];
        let mut y = [0i16; 4];
        axpy_ref(&a, &b, &mut y, 0);
        assert_eq!(y, a);
    }

    #[test]
    fn test_half_alpha_tie_rounds_exactly() {
        // alpha=0.5, b=32767: product 536_854_528, plus bias 16_384 is
        // 536_870_912, which shifts to exactly 16_384
        let mut y = [0i16; 1];
        axpy_ref(&[0], &[32767], &mut y, 16384);
        assert_eq!(y, [16384]);
    }

    #[test]
    fn test_max_accumuland_survives() {
        let mut y = [0i16; 1];
        axpy_ref(&[32767], &[0], &mut y, 16384);
        assert_eq!(y, [32767]);
    }

    #[test]
    fn test_positive_saturation() {
        // product 2^30 plus shifted 32767 overflows the Q15 range
        let mut y = [0i16; 1];
        axpy_ref(&[i16::MAX], &[i16::MIN], &mut y, i16::MIN);
        assert_eq!(y, [i16::MAX]);
    }

    #[test]
    fn test_negative_saturation() {
        let mut y = [0i16; 1];
        axpy_ref(&[i16::MIN], &[i16::MAX], &mut y, i16::MIN);
        assert_eq!(y, [i16::MIN]);
    }

    #[test]
    fn test_negative_half_rounds_up_to_zero() {
        // alpha=0.5, b=-1: accumulator is -16_384, a -0.5 tie, which
        // rounds toward positive infinity
        let mut y = [0i16; 1];
        axpy_ref(&[0], &[-1], &mut y, 16384);
        assert_eq!(y, [0]);
    }

    #[test]
    fn test_empty_buffers_are_a_no_op() {
        let mut y: [i16; 0] = [];
        axpy_ref(&[], &[], &mut y, 16384);
    }
}
