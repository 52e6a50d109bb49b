use std::fmt::{Display, Formatter};

use itertools::Itertools;
use nullarray_error::{NullArrayResult, nullarray_bail};

/// The extents of an N-dimensional array.
///
/// Elements are addressed either by a linear index in `0..len()` or by one index per dimension.
/// Linear order is column-major: the first dimension varies fastest.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Shape(Vec<usize>);

impl Shape {
    /// Create a shape from its dimension extents. At least one dimension is required.
    pub fn new(dims: impl Into<Vec<usize>>) -> NullArrayResult<Self> {
        let dims = dims.into();
        if dims.is_empty() {
            nullarray_bail!(ShapeMismatch: "a shape needs at least one dimension");
        }
        if dims.iter().try_fold(1usize, |acc, d| acc.checked_mul(*d)).is_none() {
            nullarray_bail!(
                ShapeMismatch: "shape ({}) overflows usize",
                dims.iter().join(", ")
            );
        }
        Ok(Self(dims))
    }

    /// A one-dimensional shape.
    pub fn vector(len: usize) -> Self {
        Self(vec![len])
    }

    /// A two-dimensional shape.
    pub fn matrix(rows: usize, cols: usize) -> NullArrayResult<Self> {
        Self::new([rows, cols])
    }

    /// The extent of every dimension, first dimension first.
    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    /// The number of dimensions.
    pub fn ndims(&self) -> usize {
        self.0.len()
    }

    /// The total number of elements.
    pub fn len(&self) -> usize {
        self.0.iter().product()
    }

    /// Returns true if any dimension has extent zero.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The last valid linear index, or `None` if the shape holds no elements.
    pub fn last_index(&self) -> Option<usize> {
        self.len().checked_sub(1)
    }

    /// Convert one index per dimension into a linear index.
    pub fn linear_index(&self, index: &[usize]) -> NullArrayResult<usize> {
        if index.len() != self.ndims() {
            nullarray_bail!(
                ShapeMismatch: "index has {} dimensions, shape {} has {}",
                index.len(),
                self,
                self.ndims()
            );
        }

        let mut linear = 0;
        let mut step = 1;
        for (&idx, &extent) in index.iter().zip_eq(self.0.iter()) {
            if idx >= extent {
                nullarray_bail!(OutOfBounds: idx, 0, extent);
            }
            linear += idx * step;
            step *= extent;
        }
        Ok(linear)
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.0.iter().join(", "))
    }
}
