//! Owned single-channel `f64` grid in row-major layout.
//!
//! Represents an image or a primal variable of the TV model. Indexing follows
//! the image convention `(x, y)` = (column, row).
use super::traits::{GridView, GridViewMut};
use super::GridShape;
use crate::error::{OperatorError, Result};
use nalgebra::DMatrix;

#[derive(Clone, Debug, PartialEq)]
pub struct ScalarField {
    /// Grid width (number of columns)
    pub w: usize,
    /// Grid height (number of rows)
    pub h: usize,
    /// Backing storage in row-major order, `w * h` entries
    pub data: Vec<f64>,
}

impl ScalarField {
    /// Construct a zero-initialized field of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self::filled(w, h, 0.0)
    }

    pub fn filled(w: usize, h: usize, value: f64) -> Self {
        Self {
            w,
            h,
            data: vec![value; w * h],
        }
    }

    /// Wrap a row-major buffer, checking its length against `w × h`.
    pub fn from_vec(w: usize, h: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != w * h {
            return Err(OperatorError::shape(
                format!("{} values for {}", w * h, GridShape::new(h, w)),
                format!("{} values", data.len()),
            ));
        }
        Ok(Self { w, h, data })
    }

    /// Build from a `rows × cols` matrix, row `i` becoming grid row `y = i`.
    pub fn from_matrix(m: &DMatrix<f64>) -> Self {
        let (h, w) = m.shape();
        let mut out = Self::new(w, h);
        for y in 0..h {
            for x in 0..w {
                out.set(x, y, m[(y, x)]);
            }
        }
        out
    }

    pub fn to_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_row_slice(self.h, self.w, &self.data)
    }

    pub fn shape(&self) -> GridShape {
        GridShape::new(self.h, self.w)
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.data[self.idx(x, y)]
    }
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: f64) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// Discrete inner product `sum(a * b)` over all entries.
    pub fn dot(&self, other: &ScalarField) -> Result<f64> {
        ensure_same_shape(self.shape(), other.shape())?;
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a * b)
            .sum())
    }

    pub fn norm_sq(&self) -> f64 {
        self.data.iter().map(|v| v * v).sum()
    }

    pub fn map(&self, f: impl Fn(f64) -> f64) -> ScalarField {
        ScalarField {
            w: self.w,
            h: self.h,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Entry-wise `self - other`.
    pub fn sub(&self, other: &ScalarField) -> Result<ScalarField> {
        ensure_same_shape(self.shape(), other.shape())?;
        Ok(ScalarField {
            w: self.w,
            h: self.h,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| a - b)
                .collect(),
        })
    }

    pub fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
    }
}

pub(crate) fn ensure_same_shape(expected: GridShape, found: GridShape) -> Result<()> {
    if expected != found {
        return Err(OperatorError::shape(expected.to_string(), found.to_string()));
    }
    Ok(())
}

impl GridView for ScalarField {
    type Pixel = f64;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[f64] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

impl GridViewMut for ScalarField {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [f64] {
        let start = y * self.w;
        let end = start + self.w;
        &mut self.data[start..end]
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }
}
