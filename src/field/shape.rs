use crate::error::{OperatorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of components carried by every vector-field pixel (horizontal, vertical).
pub const VECTOR_COMPONENTS: usize = 2;

/// Height × width of a 2D grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridShape {
    pub height: usize,
    pub width: usize,
}

impl GridShape {
    pub fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.height * self.width
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.height == 0 || self.width == 0
    }

    /// Fails unless the grid has at least one row and one column.
    pub fn ensure_non_empty(&self) -> Result<()> {
        if self.is_empty() {
            return Err(OperatorError::shape(
                "at least 1 row and 1 column",
                self.to_string(),
            ));
        }
        Ok(())
    }

    /// Shape of the gradient of a field with this shape, `(H, W, 2)`.
    pub fn with_components(&self) -> VectorShape {
        VectorShape {
            height: self.height,
            width: self.width,
            components: VECTOR_COMPONENTS,
        }
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.height, self.width)
    }
}

/// Height × width × components, as handed to the vector sampler.
///
/// Only `components == 2` describes a valid vector field; the extra dimension
/// exists so callers can pass a shape through unchanged and get a
/// [`OperatorError::ShapeMismatch`] instead of a silently reshaped grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorShape {
    pub height: usize,
    pub width: usize,
    pub components: usize,
}

impl VectorShape {
    pub fn new(height: usize, width: usize, components: usize) -> Self {
        Self {
            height,
            width,
            components,
        }
    }

    /// Drops the component axis after validating it.
    pub fn grid(&self) -> Result<GridShape> {
        if self.components != VECTOR_COMPONENTS {
            return Err(OperatorError::shape(
                format!("(_, _, {VECTOR_COMPONENTS})"),
                self.to_string(),
            ));
        }
        let grid = GridShape::new(self.height, self.width);
        grid.ensure_non_empty()?;
        Ok(grid)
    }
}

impl fmt::Display for VectorShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.height, self.width, self.components)
    }
}

impl From<GridShape> for VectorShape {
    fn from(shape: GridShape) -> Self {
        shape.with_components()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_shape_rejects_wrong_component_count() {
        let err = VectorShape::new(4, 5, 3).grid().unwrap_err();
        assert!(matches!(err, OperatorError::ShapeMismatch { .. }));
        assert_eq!(
            VectorShape::new(4, 5, 2).grid().unwrap(),
            GridShape::new(4, 5)
        );
    }

    #[test]
    fn empty_shapes_are_rejected() {
        assert!(GridShape::new(0, 3).ensure_non_empty().is_err());
        assert!(GridShape::new(3, 0).ensure_non_empty().is_err());
        assert!(VectorShape::new(0, 3, 2).grid().is_err());
        assert!(GridShape::new(1, 1).ensure_non_empty().is_ok());
    }
}
