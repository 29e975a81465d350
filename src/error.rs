//! Errors raised by the operator kernels and their helpers.

/// Reasons why an operator call or a self-check may fail.
#[derive(Clone, Debug, PartialEq)]
pub enum OperatorError {
    /// `<L x, y>` and `<x, Lᵗ y>` disagree by more than `tolerance`.
    AdjointMismatch { lhs: f64, rhs: f64, tolerance: f64 },
    /// A grid had zero rows/columns, a buffer length did not match its shape,
    /// or two grids that must agree in shape did not.
    ShapeMismatch { expected: String, found: String },
}

impl OperatorError {
    pub(crate) fn shape(expected: impl Into<String>, found: impl Into<String>) -> Self {
        OperatorError::ShapeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Absolute gap between both inner products, if this is an adjoint failure.
    pub fn adjoint_defect(&self) -> Option<f64> {
        match self {
            OperatorError::AdjointMismatch { lhs, rhs, .. } => Some((lhs - rhs).abs()),
            OperatorError::ShapeMismatch { .. } => None,
        }
    }
}

impl std::fmt::Display for OperatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperatorError::AdjointMismatch {
                lhs,
                rhs,
                tolerance,
            } => write!(
                f,
                "adjoint check failed: <L x, y>_Y={lhs}, <x, L^t y>_X={rhs} (|diff| = {:.3e} > {tolerance:.1e})",
                (lhs - rhs).abs()
            ),
            OperatorError::ShapeMismatch { expected, found } => {
                write!(f, "shape mismatch (expected {expected}, found {found})")
            }
        }
    }
}

impl std::error::Error for OperatorError {}

pub type Result<T> = std::result::Result<T, OperatorError>;
