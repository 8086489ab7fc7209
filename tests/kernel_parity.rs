//! Cross-kernel parity suite
//!
//! Property tests over the public kernel API:
//! - the widening kernel reproduces the scalar reference bit-for-bit for
//!   every input and every strip partitioning
//! - the saturating kernel stays within one output unit of the reference
//! - audits of a buffer against itself are always exact

use proptest::prelude::*;

use quince::audit::audit;
use quince::kernel::{
    axpy_ref, AxpyKernel, FixedLanes, Grouping, SaturatingKernel, WideningKernel,
};

fn reference(a: &[i16], b: &[i16], alpha: i16) -> Vec<i16> {
    let mut y = vec![0i16; a.len()];
    axpy_ref(a, b, &mut y, alpha);
    y
}

/// Paired input buffers of equal length, plus alpha
fn axpy_inputs() -> impl Strategy<Value = (Vec<i16>, Vec<i16>, i16)> {
    (0usize..200).prop_flat_map(|n| {
        (
            prop::collection::vec(any::<i16>(), n..=n),
            prop::collection::vec(any::<i16>(), n..=n),
            any::<i16>(),
        )
    })
}

/// Inputs biased toward the saturation corners
fn corner_inputs() -> impl Strategy<Value = (Vec<i16>, Vec<i16>, i16)> {
    let corner = prop_oneof![
        Just(i16::MIN),
        Just(i16::MAX),
        Just(-1i16),
        Just(0i16),
        Just(1i16),
        any::<i16>(),
    ];
    (1usize..64).prop_flat_map(move |n| {
        (
            prop::collection::vec(corner.clone(), n..=n),
            prop::collection::vec(corner.clone(), n..=n),
            corner.clone(),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn widening_matches_reference((a, b, alpha) in axpy_inputs()) {
        let y_ref = reference(&a, &b, alpha);
        let mut y = vec![0i16; a.len()];
        WideningKernel::new(Grouping::M1).run(&a, &b, &mut y, alpha);
        prop_assert_eq!(&y, &y_ref);
    }

    #[test]
    fn widening_matches_reference_at_corners((a, b, alpha) in corner_inputs()) {
        let y_ref = reference(&a, &b, alpha);
        let mut y = vec![0i16; a.len()];
        WideningKernel::new(Grouping::M4).run(&a, &b, &mut y, alpha);
        prop_assert_eq!(&y, &y_ref);
    }

    #[test]
    fn widening_is_partitioning_invariant(
        (a, b, alpha) in axpy_inputs(),
        lanes_x in 1usize..48,
        lanes_y in 1usize..48,
    ) {
        let mut y_x = vec![0i16; a.len()];
        let mut y_y = vec![0i16; a.len()];
        WideningKernel::run_with_policy(&a, &b, &mut y_x, alpha, &FixedLanes(lanes_x));
        WideningKernel::run_with_policy(&a, &b, &mut y_y, alpha, &FixedLanes(lanes_y));
        prop_assert_eq!(&y_x, &y_y);
    }

    #[test]
    fn saturating_is_partitioning_invariant(
        (a, b, alpha) in corner_inputs(),
        lanes_x in 1usize..48,
        lanes_y in 1usize..48,
    ) {
        let mut y_x = vec![0i16; a.len()];
        let mut y_y = vec![0i16; a.len()];
        SaturatingKernel::run_with_policy(&a, &b, &mut y_x, alpha, &FixedLanes(lanes_x));
        SaturatingKernel::run_with_policy(&a, &b, &mut y_y, alpha, &FixedLanes(lanes_y));
        prop_assert_eq!(&y_x, &y_y);
    }

    #[test]
    fn saturating_within_one_of_reference((a, b, alpha) in corner_inputs()) {
        let y_ref = reference(&a, &b, alpha);
        let mut y = vec![0i16; a.len()];
        SaturatingKernel::new(Grouping::M8).run(&a, &b, &mut y, alpha);
        for (i, (&v, &r)) in y.iter().zip(&y_ref).enumerate() {
            let diff = (i32::from(v) - i32::from(r)).abs();
            prop_assert!(diff <= 1, "index {} diverged by {}", i, diff);
        }
    }

    #[test]
    fn audit_of_reference_against_itself_is_exact((a, b, alpha) in axpy_inputs()) {
        let y_ref = reference(&a, &b, alpha);
        let result = audit(&y_ref, &y_ref).expect("equal lengths");
        prop_assert!(result.is_exact());
        prop_assert_eq!(result.max_abs_diff, 0);
    }

    #[test]
    fn audit_counts_injected_mismatches(
        (a, b, alpha) in axpy_inputs(),
        flip in any::<prop::sample::Index>(),
    ) {
        prop_assume!(!a.is_empty());
        let y_ref = reference(&a, &b, alpha);
        let mut variant = y_ref.clone();
        let i = flip.index(variant.len());
        variant[i] = variant[i].wrapping_add(1);
        let result = audit(&y_ref, &variant).expect("equal lengths");
        prop_assert_eq!(result.mismatch_count, 1);
        prop_assert!(!result.is_exact());
    }
}

#[test]
fn zero_length_buffers_run_and_audit_exact() {
    let mut y: [i16; 0] = [];
    for kernel in quince::kernel::available_kernels() {
        kernel.run(&[], &[], &mut y, 16384);
    }
    let result = audit(&[], &[]).expect("equal lengths");
    assert!(result.is_exact());
    assert_eq!(result.mismatch_count, 0);
}

#[test]
fn all_registered_variants_respect_their_contracts() {
    let a: Vec<i16> = (0..1000).map(|i| (i * 37 % 65536 - 32768) as i16).collect();
    let b: Vec<i16> = (0..1000).map(|i| (i * 101 % 65536 - 32768) as i16).collect();
    let alpha = -27000;
    let y_ref = reference(&a, &b, alpha);

    for kernel in quince::kernel::available_kernels() {
        let mut y = vec![0i16; a.len()];
        kernel.run(&a, &b, &mut y, alpha);
        let result = audit(&y_ref, &y).expect("equal lengths");
        if kernel.name().starts_with("Sat") {
            assert!(result.max_abs_diff <= 1, "{} out of bound", kernel.name());
        } else {
            assert!(result.is_exact(), "{} diverged", kernel.name());
        }
    }
}
