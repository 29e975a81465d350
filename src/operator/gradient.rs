//! Forward-difference gradient and its adjoint (negative divergence).
//!
//! Forward, for an `H × W` field `x`:
//!
//! ```text
//! g[i, j, 0] = x[i, j+1] - x[i, j]   if j < W-1 else 0
//! g[i, j, 1] = x[i+1, j] - x[i, j]   if i < H-1 else 0
//! ```
//!
//! The last column/row is zero (Neumann boundary), never a one-sided
//! estimate. The matching divergence takes, per axis, `y[0]` on the first
//! entry, `-y[W-2]` on the last and `y[j] - y[j-1]` in between. Under
//! `sum(a * b)` the exact transpose of the gradient is the *negative* of that
//! divergence, which is what `apply_backward` returns. Along an axis of
//! length 1 the forward difference is identically zero, and so is its
//! transpose.
//!
//! Complexity: O(W·H) per call, one output allocation.
use super::{LinearOperator, NormCache};
use crate::error::Result;
use crate::field::{GridView, GridViewMut, ScalarField, VectorField};

/// Bound on `<L x, L x>` for `||x|| <= 1`, i.e. the squared spectral norm.
pub const GRADIENT_NORM_BOUND: f64 = 8.0;

/// Discrete gradient `L` / negative divergence `Lᵗ` on single-channel grids.
#[derive(Clone, Debug, Default)]
pub struct GradientOperator {
    norm: NormCache,
}

impl GradientOperator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backward-difference divergence `div y = -Lᵗ y`.
    pub fn divergence(&self, y: &VectorField) -> Result<ScalarField> {
        y.grid_shape().ensure_non_empty()?;
        let (w, h) = (y.w, y.h);
        let mut div = ScalarField::new(w, h);
        for r in 0..h {
            let row = y.row(r);
            let above = (r >= 1).then(|| y.row(r - 1));
            let last_row = r + 1 == h;
            let out = div.row_mut(r);
            for (i, d) in out.iter_mut().enumerate() {
                let mut horizontal = if i + 1 < w { row[i][0] } else { 0.0 };
                if i >= 1 {
                    horizontal -= row[i - 1][0];
                }
                let mut vertical = if last_row { 0.0 } else { row[i][1] };
                if let Some(a) = above {
                    vertical -= a[i][1];
                }
                *d = horizontal + vertical;
            }
        }
        Ok(div)
    }
}

impl LinearOperator for GradientOperator {
    fn apply_forward(&self, x: &ScalarField) -> Result<VectorField> {
        x.shape().ensure_non_empty()?;
        let (w, h) = (x.w, x.h);
        let mut grad = VectorField::new(w, h);
        for y in 0..h {
            let row = x.row(y);
            let below = (y + 1 < h).then(|| x.row(y + 1));
            let out = grad.row_mut(y);
            for (i, px) in out.iter_mut().enumerate() {
                px[0] = if i + 1 < w { row[i + 1] - row[i] } else { 0.0 };
                px[1] = below.map_or(0.0, |b| b[i] - row[i]);
            }
        }
        Ok(grad)
    }

    fn apply_backward(&self, y: &VectorField) -> Result<ScalarField> {
        let mut out = self.divergence(y)?;
        for v in out.as_mut_slice() {
            *v = -*v;
        }
        Ok(out)
    }

    fn compute_norm(&self) -> f64 {
        GRADIENT_NORM_BOUND
    }

    fn norm_cache(&self) -> &NormCache {
        &self.norm
    }
}
