#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod field;
pub mod matcher;
pub mod operator;
pub mod sampling;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{OperatorError, Result};
pub use crate::field::{GridShape, ScalarField, VectorField, VectorShape};
pub use crate::matcher::{Matcher, MatcherKind, MatcherParams, Solver, SolverKind};
pub use crate::operator::{
    AdjointReport, GradientOperator, LinearOperator, SelfCheckOptions, GRADIENT_NORM_BOUND,
};
pub use crate::sampling::GridSampler;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use optima_register::prelude::*;
///
/// let op = GradientOperator::new();
/// let mut x = ScalarField::new(3, 3);
/// x.set(1, 1, 1.0);
/// let g = op.apply_forward(&x).unwrap();
/// assert_eq!(g.get(0, 1, 0), 1.0);
/// assert_eq!(op.get_norm(), 8.0);
/// op.self_check(&SelfCheckOptions::default()).unwrap();
/// ```
pub mod prelude {
    pub use crate::field::{GridShape, GridView, ScalarField, VectorField, VectorShape};
    pub use crate::operator::{GradientOperator, LinearOperator, SelfCheckOptions};
}
