//! Random grids for probing operators.
//!
//! Values are drawn i.i.d. from `[0, 1)`. Shapes are always explicit: a
//! vector sample takes the full `(H, W, 2)` shape and rejects any other
//! component count.
use crate::error::Result;
use crate::field::{GridShape, ScalarField, VectorField, VectorShape};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct GridSampler {
    rng: StdRng,
}

impl GridSampler {
    /// Reproducible sampler.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn random_scalar_sample(&mut self, shape: GridShape) -> Result<ScalarField> {
        shape.ensure_non_empty()?;
        let data = (0..shape.len()).map(|_| self.rng.gen::<f64>()).collect();
        ScalarField::from_vec(shape.width, shape.height, data)
    }

    pub fn random_vector_sample(&mut self, shape: VectorShape) -> Result<VectorField> {
        let grid = shape.grid()?;
        let data = (0..grid.len())
            .map(|_| [self.rng.gen::<f64>(), self.rng.gen::<f64>()])
            .collect();
        VectorField::from_vec(grid.width, grid.height, data)
    }
}

impl Default for GridSampler {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OperatorError;

    #[test]
    fn samples_have_requested_shape_and_range() {
        let mut sampler = GridSampler::new(7);
        let x = sampler.random_scalar_sample(GridShape::new(10, 20)).unwrap();
        assert_eq!((x.h, x.w), (10, 20));
        assert!(x.data.iter().all(|v| (0.0..1.0).contains(v)));

        let y = sampler
            .random_vector_sample(VectorShape::new(10, 20, 2))
            .unwrap();
        assert_eq!(y.shape(), VectorShape::new(10, 20, 2));
        assert!(y
            .data
            .iter()
            .flatten()
            .all(|v| (0.0..1.0).contains(v)));
    }

    #[test]
    fn same_seed_same_samples() {
        let shape = GridShape::new(4, 6);
        let a = GridSampler::new(11).random_scalar_sample(shape).unwrap();
        let b = GridSampler::new(11).random_scalar_sample(shape).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_shapes_are_rejected() {
        let mut sampler = GridSampler::new(0);
        assert!(matches!(
            sampler.random_scalar_sample(GridShape::new(0, 5)),
            Err(OperatorError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            sampler.random_vector_sample(VectorShape::new(3, 5, 1)),
            Err(OperatorError::ShapeMismatch { .. })
        ));
    }
}
