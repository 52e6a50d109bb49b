use nullarray_error::{NullArrayResult, nullarray_bail};
use nullarray_mask::NullMask;

use crate::element::{Element, Payload};
use crate::shape::Shape;

/// An N-dimensional array where every position is either valid, holding a `T`, or null.
///
/// The array is made of two congruent parts: a value buffer and a [`NullMask`]. The value stored
/// at a null position is unspecified and is never read as meaningful. Elements are addressed by
/// column-major linear index, see [`Shape`].
#[derive(Clone, Debug)]
pub struct NullableArray<T> {
    shape: Shape,
    values: Vec<T>,
    nulls: NullMask,
}

impl<T> NullableArray<T> {
    /// Create an array from a value buffer, a null mask and a shape, checking that all three
    /// agree on the number of elements.
    pub fn try_new(values: Vec<T>, nulls: NullMask, shape: Shape) -> NullArrayResult<Self> {
        if values.len() != shape.len() {
            nullarray_bail!(
                ShapeMismatch: "value buffer has {} elements, shape {} needs {}",
                values.len(),
                shape,
                shape.len()
            );
        }
        if nulls.len() != shape.len() {
            nullarray_bail!(
                ShapeMismatch: "null mask has {} elements, shape {} needs {}",
                nulls.len(),
                shape,
                shape.len()
            );
        }
        Ok(Self {
            shape,
            values,
            nulls,
        })
    }

    /// Create a one-dimensional array from a value buffer and a null mask of the same length.
    pub fn try_from_parts(values: Vec<T>, nulls: NullMask) -> NullArrayResult<Self> {
        let shape = Shape::vector(values.len());
        Self::try_new(values, nulls, shape)
    }

    /// Create an array whose positions are all valid.
    pub fn try_from_values(values: Vec<T>, shape: Shape) -> NullArrayResult<Self> {
        let nulls = NullMask::new_valid(values.len());
        Self::try_new(values, nulls, shape)
    }

    /// The extents of the array.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// The number of elements, null or not.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The number of dimensions.
    pub fn ndims(&self) -> usize {
        self.shape.ndims()
    }

    /// The last linear index, `None` for an empty array.
    pub fn last_index(&self) -> Option<usize> {
        self.shape.last_index()
    }

    /// The raw value buffer, including unspecified values at null positions.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// The null mask, congruent with the value buffer.
    pub fn nulls(&self) -> &NullMask {
        &self.nulls
    }

    /// The number of null positions.
    pub fn null_count(&self) -> usize {
        self.nulls.null_count()
    }

    /// The number of valid positions.
    pub fn valid_count(&self) -> usize {
        self.nulls.valid_count()
    }

    /// Returns whether the position at a linear index is null.
    pub fn is_null(&self, index: usize) -> NullArrayResult<bool> {
        if index >= self.len() {
            nullarray_bail!(OutOfBounds: index, 0, self.len());
        }
        Ok(self.nulls.is_null(index))
    }

    /// Read the element at a linear index as a nullable scalar.
    pub fn get(&self, index: usize) -> NullArrayResult<Option<&T>> {
        if self.is_null(index)? {
            return Ok(None);
        }
        Ok(Some(&self.values[index]))
    }

    /// Read the element at a per-dimension index as a nullable scalar.
    pub fn get_at(&self, index: &[usize]) -> NullArrayResult<Option<&T>> {
        self.get(self.shape.linear_index(index)?)
    }

    /// Write a value, or a null, at a linear index.
    ///
    /// Writing a null leaves the stored payload in place; it is masked from then on.
    pub fn set(&mut self, index: usize, value: impl Into<Option<T>>) -> NullArrayResult<()> {
        if index >= self.len() {
            nullarray_bail!(OutOfBounds: index, 0, self.len());
        }
        match value.into() {
            Some(value) => {
                self.values[index] = value;
                self.nulls.set(index, false)
            }
            None => self.nulls.set(index, true),
        }
    }

    /// Apply a batch of writes, each a linear index and a value or a null.
    ///
    /// Every index is checked before anything is written, and the null mask is rebuilt at most
    /// once. Prefer this over repeated [`set`](Self::set) calls when editing many positions.
    pub fn set_many<I, V>(&mut self, edits: I) -> NullArrayResult<()>
    where
        I: IntoIterator<Item = (usize, V)>,
        V: Into<Option<T>>,
    {
        let edits = edits
            .into_iter()
            .map(|(idx, value)| (idx, value.into()))
            .collect::<Vec<_>>();
        self.nulls
            .set_many(edits.iter().map(|(idx, value)| (*idx, value.is_none())))?;
        for (idx, value) in edits {
            if let Some(value) = value {
                self.values[idx] = value;
            }
        }
        Ok(())
    }

    /// Iterate over the elements in linear order as nullable scalars.
    pub fn iter(&self) -> impl Iterator<Item = Option<&T>> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(idx, value)| (!self.nulls.is_null(idx)).then_some(value))
    }

    /// Split the array into its shape, value buffer and null mask.
    pub fn into_parts(self) -> (Shape, Vec<T>, NullMask) {
        (self.shape, self.values, self.nulls)
    }

    pub(crate) fn values_mut(&mut self) -> &mut Vec<T> {
        &mut self.values
    }

    pub(crate) fn nulls_mut(&mut self) -> &mut NullMask {
        &mut self.nulls
    }

    pub(crate) fn set_shape(&mut self, shape: Shape) {
        debug_assert_eq!(shape.len(), self.values.len());
        debug_assert_eq!(shape.len(), self.nulls.len());
        self.shape = shape;
    }
}

impl<T: Element> NullableArray<T> {
    /// Allocate an array of the given shape with every position null.
    pub fn new_null(shape: Shape) -> Self {
        let len = shape.len();
        Self {
            values: vec![T::default(); len],
            nulls: NullMask::new_null(len),
            shape,
        }
    }

    /// Allocate a new array with element type `P` and the given shape.
    ///
    /// No values are carried over from `self`. Every position of the new array is null, and a
    /// request for `Option<U>` allocates an array of `U`.
    pub fn similar<P: Payload>(&self, shape: Shape) -> NullableArray<P::Inner> {
        NullableArray::new_null(shape)
    }

    /// Allocate a new, all-null array with the element type and shape of `self`.
    pub fn similar_like(&self) -> Self {
        Self::new_null(self.shape.clone())
    }
}

impl<T: PartialEq> PartialEq for NullableArray<T> {
    /// Two arrays are equal when they have the same shape, the same null positions and equal
    /// values at every valid position.
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape
            && self.nulls == other.nulls
            && self
                .values
                .iter()
                .zip(other.values.iter())
                .enumerate()
                .all(|(idx, (lhs, rhs))| self.nulls.is_null(idx) || lhs == rhs)
    }
}

impl<T: Eq> Eq for NullableArray<T> {}

impl<T> From<Vec<T>> for NullableArray<T> {
    fn from(values: Vec<T>) -> Self {
        let len = values.len();
        Self {
            shape: Shape::vector(len),
            values,
            nulls: NullMask::new_valid(len),
        }
    }
}

impl<T: Element> FromIterator<Option<T>> for NullableArray<T> {
    fn from_iter<I: IntoIterator<Item = Option<T>>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut values = Vec::with_capacity(iter.size_hint().0);
        let mut nulls = Vec::with_capacity(iter.size_hint().0);

        for item in iter {
            match item {
                Some(value) => {
                    values.push(value);
                    nulls.push(false);
                }
                None => {
                    values.push(T::default());
                    nulls.push(true);
                }
            }
        }

        let len = values.len();
        Self {
            shape: Shape::vector(len),
            values,
            nulls: NullMask::from_iter(nulls),
        }
    }
}
