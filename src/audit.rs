//! Bit-exactness audit of kernel outputs
//!
//! Compares a variant's output buffer against the reference buffer
//! element-wise and reports the divergence: maximum absolute difference,
//! number of differing elements, and the mismatch percentage. A variant is
//! `EXACT` iff no element differs.

use serde::{Deserialize, Serialize};

use crate::error::{QuinceError, Result};

/// Divergence report for one (reference, variant) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditResult {
    /// Largest absolute element-wise difference
    pub max_abs_diff: i32,
    /// Number of elements that differ
    pub mismatch_count: usize,
    /// Differing elements as a percentage of the buffer length
    pub mismatch_pct: f64,
}

impl AuditResult {
    /// Whether the variant reproduced the reference bit-for-bit
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.mismatch_count == 0
    }

    /// Report label: `EXACT` or `APPROX`
    #[must_use]
    pub fn label(&self) -> &'static str {
        if self.is_exact() {
            "EXACT"
        } else {
            "APPROX"
        }
    }
}

impl std::fmt::Display for AuditResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Max Diff: {:<3} | Bits off: {:<5.2}% | {}",
            self.max_abs_diff,
            self.mismatch_pct,
            self.label()
        )
    }
}

/// Compare `variant` against `reference` element-wise
///
/// Pure; neither buffer is mutated. Empty buffers audit as `EXACT`.
///
/// # Errors
///
/// Returns [`QuinceError::LengthMismatch`] if the buffers differ in length.
#[allow(clippy::cast_precision_loss)] // mismatch percentage is approximate
pub fn audit(reference: &[i16], variant: &[i16]) -> Result<AuditResult> {
    if reference.len() != variant.len() {
        return Err(QuinceError::LengthMismatch {
            left: reference.len(),
            right: variant.len(),
        });
    }

    let mut max_abs_diff = 0i32;
    let mut mismatch_count = 0usize;
    for (&r, &v) in reference.iter().zip(variant) {
        let d = (i32::from(r) - i32::from(v)).abs();
        if d > 0 {
            mismatch_count += 1;
        }
        max_abs_diff = max_abs_diff.max(d);
    }

    let mismatch_pct = if reference.is_empty() {
        0.0
    } else {
        mismatch_count as f64 / reference.len() as f64 * 100.0
    };

    Ok(AuditResult {
        max_abs_diff,
        mismatch_count,
        mismatch_pct,
    })
}
