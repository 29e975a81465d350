//! Dense matrix views of an operator for small grids.
//!
//! Scalar fields are vectorised row-major (`k = y * W + x`), vector fields as
//! `(H, W, 2)` interleaved (`k = 2 * (y * W + x) + c`). Each column of the
//! result is the operator applied to one basis field, so the cost is
//! `O((H·W)^2)`; intended for verification, not for solving.
use super::LinearOperator;
use crate::error::Result;
use crate::field::{GridShape, ScalarField, VectorField, VECTOR_COMPONENTS};
use nalgebra::DMatrix;

/// `L` as a `(2·H·W) × (H·W)` matrix.
pub fn forward_matrix<O: LinearOperator + ?Sized>(op: &O, shape: GridShape) -> Result<DMatrix<f64>> {
    shape.ensure_non_empty()?;
    let n = shape.len();
    let mut m = DMatrix::zeros(VECTOR_COMPONENTS * n, n);
    let mut basis = ScalarField::new(shape.width, shape.height);
    for k in 0..n {
        basis.data[k] = 1.0;
        let column = op.apply_forward(&basis)?.to_interleaved();
        basis.data[k] = 0.0;
        m.set_column(k, &nalgebra::DVector::from_vec(column));
    }
    Ok(m)
}

/// `Lᵗ` as a `(H·W) × (2·H·W)` matrix.
pub fn backward_matrix<O: LinearOperator + ?Sized>(op: &O, shape: GridShape) -> Result<DMatrix<f64>> {
    shape.ensure_non_empty()?;
    let n = shape.len();
    let mut m = DMatrix::zeros(n, VECTOR_COMPONENTS * n);
    let mut basis = VectorField::new(shape.width, shape.height);
    for k in 0..VECTOR_COMPONENTS * n {
        let (pixel, c) = (k / VECTOR_COMPONENTS, k % VECTOR_COMPONENTS);
        basis.data[pixel][c] = 1.0;
        let column = op.apply_backward(&basis)?;
        basis.data[pixel][c] = 0.0;
        m.set_column(k, &nalgebra::DVector::from_vec(column.data));
    }
    Ok(m)
}

/// Largest absolute entry of `Lᵗ - Lᵀ`; zero for an exact adjoint pair.
pub fn adjoint_defect<O: LinearOperator + ?Sized>(op: &O, shape: GridShape) -> Result<f64> {
    let forward = forward_matrix(op, shape)?;
    let backward = backward_matrix(op, shape)?;
    Ok((backward - forward.transpose()).amax())
}

/// `σ_max(L)^2`, the tight value of `max_{||x|| <= 1} <L x, L x>` on this grid.
pub fn squared_spectral_norm<O: LinearOperator + ?Sized>(op: &O, shape: GridShape) -> Result<f64> {
    let forward = forward_matrix(op, shape)?;
    let gram = forward.transpose() * &forward;
    let max_eig = gram
        .symmetric_eigenvalues()
        .iter()
        .fold(0.0_f64, |acc, &v| acc.max(v));
    Ok(max_eig)
}
