//! Linear operators between scalar and vector grids.
//!
//! Overview
//! - [`LinearOperator`] is the capability set every operator provides:
//!   `apply_forward` (L), `apply_backward` (Lᵗ), a lazily cached norm and an
//!   adjoint self-check. The forward/backward pair must satisfy
//!   `<L x, y> == <x, Lᵗ y>` for every `x`, `y` of matching shape, otherwise
//!   primal-dual schemes built on top converge to the wrong fixed point.
//! - [`GradientOperator`] is the forward-difference gradient with its exact
//!   adjoint, the negative divergence.
//! - [`dense`] materialises an operator as a matrix for exact verification on
//!   small grids.
//!
//! Operators never mutate their inputs; each call allocates a fresh output.

pub mod dense;
pub mod gradient;
pub mod norm;

pub use gradient::{GradientOperator, GRADIENT_NORM_BOUND};
pub use norm::{NormCache, NormState};

use crate::error::{OperatorError, Result};
use crate::field::{GridShape, ScalarField, VectorField};
use crate::sampling::GridSampler;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TOLERANCE: f64 = 1e-5;

/// Options for [`LinearOperator::self_check`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfCheckOptions {
    pub height: usize,
    pub width: usize,
    /// Largest accepted `|<L x, y> - <x, Lᵗ y>|`.
    pub tolerance: f64,
    /// Sampler seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SelfCheckOptions {
    fn default() -> Self {
        Self {
            height: 10,
            width: 20,
            tolerance: DEFAULT_TOLERANCE,
            seed: None,
        }
    }
}

impl SelfCheckOptions {
    pub fn with_shape(mut self, shape: GridShape) -> Self {
        self.height = shape.height;
        self.width = shape.width;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn shape(&self) -> GridShape {
        GridShape::new(self.height, self.width)
    }

    fn sampler(&self) -> GridSampler {
        match self.seed {
            Some(seed) => GridSampler::new(seed),
            None => GridSampler::from_entropy(),
        }
    }
}

/// Both sides of a passed adjoint check.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjointReport {
    pub shape: GridShape,
    /// `<L x, y>` in the vector space
    pub lhs: f64,
    /// `<x, Lᵗ y>` in the scalar space
    pub rhs: f64,
    pub defect: f64,
    pub tolerance: f64,
}

pub trait LinearOperator {
    /// `L x`: maps an `H × W` field to an `H × W × 2` field.
    fn apply_forward(&self, x: &ScalarField) -> Result<VectorField>;

    /// `Lᵗ y`: maps an `H × W × 2` field back to `H × W`.
    fn apply_backward(&self, y: &VectorField) -> Result<ScalarField>;

    /// Variant-specific norm, called at most once per instance via [`get_norm`](Self::get_norm).
    fn compute_norm(&self) -> f64;

    fn norm_cache(&self) -> &NormCache;

    /// Operator norm as `max_{||x|| <= 1} <L x, L x>`, computed on first use.
    fn get_norm(&self) -> f64 {
        self.norm_cache().get_or_compute(|| {
            let norm = self.compute_norm();
            debug!("LinearOperator::get_norm computed norm={norm}");
            norm
        })
    }

    /// Compare `<L x, y>` against `<x, Lᵗ y>` for the given pair.
    fn check_adjoint_pair(
        &self,
        x: &ScalarField,
        y: &VectorField,
        tolerance: f64,
    ) -> Result<AdjointReport> {
        let lx = self.apply_forward(x)?;
        let lty = self.apply_backward(y)?;
        let lhs = lx.dot(y)?;
        let rhs = x.dot(&lty)?;
        let defect = (lhs - rhs).abs();
        if defect.is_nan() || defect > tolerance {
            warn!(
                "adjoint check failed on {}: lhs={lhs} rhs={rhs} defect={defect:.3e}",
                x.shape()
            );
            return Err(OperatorError::AdjointMismatch {
                lhs,
                rhs,
                tolerance,
            });
        }
        debug!(
            "adjoint check passed on {}: lhs={lhs} rhs={rhs} defect={defect:.3e}",
            x.shape()
        );
        Ok(AdjointReport {
            shape: x.shape(),
            lhs,
            rhs,
            defect,
            tolerance,
        })
    }

    /// Verify the adjoint identity on random fields of the configured shape.
    fn self_check(&self, options: &SelfCheckOptions) -> Result<AdjointReport> {
        let shape = options.shape();
        let mut sampler = options.sampler();
        let x = sampler.random_scalar_sample(shape)?;
        let y = sampler.random_vector_sample(shape.with_components())?;
        self.check_adjoint_pair(&x, &y, options.tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Wrong on purpose: the backward pass ignores the vertical component.
    struct HorizontalOnlyAdjoint {
        inner: GradientOperator,
        norm_calls: Cell<usize>,
        cache: NormCache,
    }

    impl HorizontalOnlyAdjoint {
        fn new() -> Self {
            Self {
                inner: GradientOperator::new(),
                norm_calls: Cell::new(0),
                cache: NormCache::new(),
            }
        }
    }

    impl LinearOperator for HorizontalOnlyAdjoint {
        fn apply_forward(&self, x: &ScalarField) -> Result<VectorField> {
            self.inner.apply_forward(x)
        }

        fn apply_backward(&self, y: &VectorField) -> Result<ScalarField> {
            let mut horizontal_only = y.clone();
            for p in horizontal_only.data.iter_mut() {
                p[1] = 0.0;
            }
            self.inner.apply_backward(&horizontal_only)
        }

        fn compute_norm(&self) -> f64 {
            self.norm_calls.set(self.norm_calls.get() + 1);
            4.0
        }

        fn norm_cache(&self) -> &NormCache {
            &self.cache
        }
    }

    #[test]
    fn self_check_reports_both_products_on_mismatch() {
        let op = HorizontalOnlyAdjoint::new();
        let err = op
            .self_check(&SelfCheckOptions::default().with_seed(3))
            .unwrap_err();
        match err {
            OperatorError::AdjointMismatch {
                lhs,
                rhs,
                tolerance,
            } => {
                assert!((lhs - rhs).abs() > tolerance, "lhs={lhs} rhs={rhs}");
                assert_eq!(tolerance, DEFAULT_TOLERANCE);
            }
            other => panic!("expected adjoint mismatch, got {other:?}"),
        }
    }

    #[test]
    fn norm_is_computed_once() {
        let op = HorizontalOnlyAdjoint::new();
        assert_eq!(op.norm_cache().state(), NormState::Uncomputed);
        let a = op.get_norm();
        let b = op.get_norm();
        let c = op.get_norm();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(op.norm_calls.get(), 1);
        assert_eq!(op.norm_cache().state(), NormState::Computed(4.0));
    }

    #[test]
    fn self_check_rejects_empty_shape() {
        let op = GradientOperator::new();
        let opts = SelfCheckOptions::default().with_shape(GridShape::new(0, 4));
        assert!(matches!(
            op.self_check(&opts),
            Err(OperatorError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let opts: SelfCheckOptions = serde_json::from_str(r#"{ "height": 7 }"#).unwrap();
        assert_eq!(opts.height, 7);
        assert_eq!(opts.width, 20);
        assert_eq!(opts.tolerance, DEFAULT_TOLERANCE);
        assert_eq!(opts.seed, None);
    }
}
