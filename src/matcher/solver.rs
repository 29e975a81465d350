use crate::field::ScalarField;
use crate::matcher::MatcherParams;
use serde::{Deserialize, Serialize};

/// Family of optimisation scheme a [`Solver`] implements.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverKind {
    /// Primal-dual scheme alternating `apply_forward` / `apply_backward`.
    PrimalDual,
    Custom(String),
}

/// Inputs handed to a solver by [`Matcher::solve`](super::Matcher::solve).
#[derive(Clone, Copy, Debug)]
pub struct MatchProblem<'a> {
    pub reference: &'a ScalarField,
    pub moving: &'a ScalarField,
    pub params: &'a MatcherParams,
}

/// An iterative scheme consuming a [`LinearOperator`](crate::operator::LinearOperator).
///
/// Implementations are expected to call `get_norm` once during setup to size
/// their step lengths, then alternate `apply_forward` / `apply_backward` per
/// iteration.
pub trait Solver {
    type Output;
    type Error: std::error::Error;

    fn solver_type(&self) -> SolverKind;

    fn solve(&mut self, problem: &MatchProblem<'_>) -> Result<Self::Output, Self::Error>;
}
