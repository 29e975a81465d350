//! Owned `H × W × 2` grid of `[horizontal, vertical]` pairs in row-major layout.
//!
//! This is the dual space of the gradient operator: component 0 holds
//! horizontal differences, component 1 vertical differences.
use super::scalar::ensure_same_shape;
use super::traits::{GridView, GridViewMut};
use super::{GridShape, ScalarField, VectorShape, VECTOR_COMPONENTS};
use crate::error::{OperatorError, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct VectorField {
    pub w: usize,
    pub h: usize,
    /// Row-major pixels, `w * h` entries
    pub data: Vec<[f64; 2]>,
}

impl VectorField {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![[0.0; 2]; w * h],
        }
    }

    pub fn from_vec(w: usize, h: usize, data: Vec<[f64; 2]>) -> Result<Self> {
        if data.len() != w * h {
            return Err(OperatorError::shape(
                format!("{} pixels for {}", w * h, GridShape::new(h, w)),
                format!("{} pixels", data.len()),
            ));
        }
        Ok(Self { w, h, data })
    }

    /// Wrap a flat `(H, W, C)` buffer, the layout numpy uses for `y[i, j, c]`.
    ///
    /// Fails unless `shape.components == 2` and the buffer length matches.
    pub fn from_interleaved(shape: VectorShape, values: &[f64]) -> Result<Self> {
        let grid = shape.grid()?;
        let expected = grid.len() * VECTOR_COMPONENTS;
        if values.len() != expected {
            return Err(OperatorError::shape(
                format!("{expected} values for {shape}"),
                format!("{} values", values.len()),
            ));
        }
        let data = values
            .chunks_exact(VECTOR_COMPONENTS)
            .map(|c| [c[0], c[1]])
            .collect();
        Ok(Self {
            w: grid.width,
            h: grid.height,
            data,
        })
    }

    /// Stack per-component planes; exactly two planes of equal shape are accepted.
    pub fn from_components(components: &[ScalarField]) -> Result<Self> {
        let [horizontal, vertical] = components else {
            return Err(OperatorError::shape(
                format!("{VECTOR_COMPONENTS} components"),
                format!("{} components", components.len()),
            ));
        };
        ensure_same_shape(horizontal.shape(), vertical.shape())?;
        let data = horizontal
            .data
            .iter()
            .zip(vertical.data.iter())
            .map(|(&a, &b)| [a, b])
            .collect();
        Ok(Self {
            w: horizontal.w,
            h: horizontal.h,
            data,
        })
    }

    pub fn shape(&self) -> VectorShape {
        self.grid_shape().with_components()
    }

    pub fn grid_shape(&self) -> GridShape {
        GridShape::new(self.h, self.w)
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }
    #[inline]
    pub fn get(&self, x: usize, y: usize, c: usize) -> f64 {
        self.data[self.idx(x, y)][c]
    }
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, c: usize, v: f64) {
        let i = self.idx(x, y);
        self.data[i][c] = v;
    }

    /// Copy out one component plane (0 = horizontal, 1 = vertical).
    pub fn component(&self, c: usize) -> ScalarField {
        ScalarField {
            w: self.w,
            h: self.h,
            data: self.data.iter().map(|p| p[c]).collect(),
        }
    }

    /// Flatten back into the `(H, W, 2)` layout.
    pub fn to_interleaved(&self) -> Vec<f64> {
        self.data.iter().flat_map(|p| p.iter().copied()).collect()
    }

    /// Discrete inner product `sum(a * b)` over every pixel and component.
    pub fn dot(&self, other: &VectorField) -> Result<f64> {
        ensure_same_shape(self.grid_shape(), other.grid_shape())?;
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a[0] * b[0] + a[1] * b[1])
            .sum())
    }

    pub fn norm_sq(&self) -> f64 {
        self.data.iter().map(|p| p[0] * p[0] + p[1] * p[1]).sum()
    }

    /// Per-pixel Euclidean length `sqrt(g0^2 + g1^2)`.
    pub fn magnitude(&self) -> ScalarField {
        ScalarField {
            w: self.w,
            h: self.h,
            data: self.data.iter().map(|p| p[0].hypot(p[1])).collect(),
        }
    }
}

impl GridView for VectorField {
    type Pixel = [f64; 2];

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[[f64; 2]] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> &[[f64; 2]] {
        &self.data
    }
}

impl GridViewMut for VectorField {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [[f64; 2]] {
        let start = y * self.w;
        let end = start + self.w;
        &mut self.data[start..end]
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [[f64; 2]] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interleaved_layout_matches_hw2_indexing() {
        // y[i, j, c] with i = row, j = column
        let values: Vec<f64> = (0..12).map(|v| v as f64).collect();
        let f = VectorField::from_interleaved(VectorShape::new(2, 3, 2), &values).unwrap();
        assert_eq!(f.get(0, 1, 0), 6.0);
        assert_eq!(f.get(2, 1, 1), 11.0);
        assert_eq!(f.to_interleaved(), values);
    }

    #[test]
    fn last_dimension_must_be_two() {
        let err = VectorField::from_interleaved(VectorShape::new(2, 3, 3), &[0.0; 18]).unwrap_err();
        assert!(matches!(err, OperatorError::ShapeMismatch { .. }));

        let plane = ScalarField::new(3, 2);
        let three = [plane.clone(), plane.clone(), plane];
        assert!(VectorField::from_components(&three).is_err());
        assert!(VectorField::from_components(&three[..2]).is_ok());
    }

    #[test]
    fn magnitude_is_pixelwise_length() {
        let f = VectorField::from_vec(2, 1, vec![[3.0, 4.0], [0.0, -2.0]]).unwrap();
        let m = f.magnitude();
        assert!((m.get(0, 0) - 5.0).abs() < 1e-12);
        assert!((m.get(1, 0) - 2.0).abs() < 1e-12);
        assert_eq!(f.norm_sq(), 29.0);
    }
}
