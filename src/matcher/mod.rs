//! Two-image matching pipeline built around a pluggable [`Solver`].
//!
//! A [`Matcher`] owns the reference and moving images, a solver and its
//! parameters, and exposes a single [`Matcher::solve`] entry point. No solver
//! ships with the crate; the matcher only fixes the call shape.
mod solver;

pub use solver::{MatchProblem, Solver, SolverKind};

use crate::error::{OperatorError, Result};
use crate::field::ScalarField;
use log::debug;
use serde::{Deserialize, Serialize};

/// Matching model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MatcherKind {
    /// Rudin–Osher–Fatemi total-variation model
    #[default]
    Rof,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherParams {
    pub kind: MatcherKind,
    /// Weight of the data term against total variation.
    pub lambda: f64,
    pub max_iterations: usize,
    /// Stop once the relative primal change falls below this value.
    pub tolerance: f64,
}

impl Default for MatcherParams {
    fn default() -> Self {
        Self {
            kind: MatcherKind::Rof,
            lambda: 8.0,
            max_iterations: 100,
            tolerance: 1e-4,
        }
    }
}

pub struct Matcher<S: Solver> {
    reference: ScalarField,
    moving: ScalarField,
    solver: S,
    params: MatcherParams,
}

impl<S: Solver> Matcher<S> {
    /// Fails with [`OperatorError::ShapeMismatch`] unless both images share a
    /// non-empty shape.
    pub fn new(
        reference: ScalarField,
        moving: ScalarField,
        solver: S,
        params: MatcherParams,
    ) -> Result<Self> {
        reference.shape().ensure_non_empty()?;
        if reference.shape() != moving.shape() {
            return Err(OperatorError::shape(
                reference.shape().to_string(),
                moving.shape().to_string(),
            ));
        }
        Ok(Self {
            reference,
            moving,
            solver,
            params,
        })
    }

    pub fn matcher_type(&self) -> MatcherKind {
        self.params.kind
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    pub fn solver_mut(&mut self) -> &mut S {
        &mut self.solver
    }

    /// Swap in another solver of the same type, returning the previous one.
    pub fn set_solver(&mut self, solver: S) -> S {
        std::mem::replace(&mut self.solver, solver)
    }

    pub fn params(&self) -> &MatcherParams {
        &self.params
    }

    pub fn images(&self) -> (&ScalarField, &ScalarField) {
        (&self.reference, &self.moving)
    }

    pub fn solve(&mut self) -> std::result::Result<S::Output, S::Error> {
        debug!(
            "Matcher::solve kind={:?} solver={:?} shape={}",
            self.params.kind,
            self.solver.solver_type(),
            self.reference.shape()
        );
        let problem = MatchProblem {
            reference: &self.reference,
            moving: &self.moving,
            params: &self.params,
        };
        self.solver.solve(&problem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::{GradientOperator, LinearOperator};

    /// Runs one fixed-step gradient pass of the TV dual through the operator.
    struct OneStepDual {
        op: GradientOperator,
        calls: usize,
    }

    impl Solver for OneStepDual {
        type Output = ScalarField;
        type Error = OperatorError;

        fn solver_type(&self) -> SolverKind {
            SolverKind::PrimalDual
        }

        fn solve(&mut self, problem: &MatchProblem<'_>) -> Result<ScalarField> {
            self.calls += 1;
            let step = 1.0 / self.op.get_norm();
            let diff = problem.moving.sub(problem.reference)?;
            let dual = self.op.apply_forward(&diff)?;
            let update = self.op.apply_backward(&dual)?;
            Ok(diff.sub(&update.map(|v| v * step))?)
        }
    }

    fn solver() -> OneStepDual {
        OneStepDual {
            op: GradientOperator::new(),
            calls: 0,
        }
    }

    #[test]
    fn rejects_images_of_different_shape() {
        let err = Matcher::new(
            ScalarField::new(4, 3),
            ScalarField::new(3, 4),
            solver(),
            MatcherParams::default(),
        )
        .err()
        .unwrap();
        assert!(matches!(err, OperatorError::ShapeMismatch { .. }));
    }

    #[test]
    fn solve_delegates_to_solver() {
        let mut moving = ScalarField::new(4, 4);
        moving.set(2, 2, 1.0);
        let mut matcher = Matcher::new(
            ScalarField::new(4, 4),
            moving,
            solver(),
            MatcherParams::default(),
        )
        .unwrap();
        assert_eq!(matcher.matcher_type(), MatcherKind::Rof);
        assert_eq!(matcher.solver().solver_type(), SolverKind::PrimalDual);

        let out = matcher.solve().unwrap();
        assert_eq!(out.shape(), matcher.images().0.shape());
        // Lᵗ L of an impulse is 4 at the centre; one step of size 1/8 leaves 0.5
        assert!((out.get(2, 2) - 0.5).abs() < 1e-12, "got {}", out.get(2, 2));
        assert_eq!(matcher.solver().calls, 1);

        let previous = matcher.set_solver(solver());
        assert_eq!(previous.calls, 1);
        assert_eq!(matcher.solver().calls, 0);
    }

    #[test]
    fn params_deserialize_with_defaults() {
        let params: MatcherParams = serde_json::from_str(r#"{ "kind": "ROF", "lambda": 2.5 }"#).unwrap();
        assert_eq!(params.kind, MatcherKind::Rof);
        assert_eq!(params.lambda, 2.5);
        assert_eq!(params.max_iterations, 100);
    }
}
