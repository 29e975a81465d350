//! Scalar and vector grids the operators act on.
//!
//! A [`ScalarField`] is an `H × W` grid (an image or primal variable); a
//! [`VectorField`] is the matching `H × W × 2` grid of horizontal/vertical
//! pairs (a gradient or dual variable). Both are row-major and owned; every
//! operator call allocates its output instead of writing into caller buffers.
pub mod io;
pub mod scalar;
pub mod shape;
pub mod traits;
pub mod vector;

pub use self::scalar::ScalarField;
pub use self::shape::{GridShape, VectorShape, VECTOR_COMPONENTS};
pub use self::traits::{GridView, GridViewMut, Rows};
pub use self::vector::VectorField;
