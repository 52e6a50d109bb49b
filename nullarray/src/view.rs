//! Strided, borrowed views over a [`NullableArray`].

use std::ops::Range;

use nullarray_error::{NullArrayResult, nullarray_bail};

use crate::NullableArray;
use crate::element::Element;
use crate::scalar::AnyNull;

/// A one-dimensional view of `len` elements of a parent array, starting at linear index `offset`
/// and stepping by `stride`.
///
/// Positions in the view map to `offset + i * stride` in the parent. Null queries answer for the
/// viewed positions only, whatever the rest of the parent holds.
#[derive(Clone, Debug)]
pub struct StridedView<'a, T> {
    parent: &'a NullableArray<T>,
    offset: usize,
    stride: usize,
    len: usize,
}

impl<T> NullableArray<T> {
    /// View `len` elements starting at `offset`, stepping by `stride`.
    ///
    /// Fails if `stride` is zero or if the last viewed position falls outside the array.
    pub fn strided(
        &self,
        offset: usize,
        stride: usize,
        len: usize,
    ) -> NullArrayResult<StridedView<'_, T>> {
        if stride == 0 {
            nullarray_bail!("view stride must be at least 1");
        }
        if len > 0 {
            let last = (len - 1)
                .checked_mul(stride)
                .and_then(|span| span.checked_add(offset));
            match last {
                Some(last) if last < self.len() => {}
                Some(last) => nullarray_bail!(OutOfBounds: last, 0, self.len()),
                None => nullarray_bail!(OutOfBounds: usize::MAX, 0, self.len()),
            }
        } else if offset > self.len() {
            nullarray_bail!(OutOfBounds: offset, 0, self.len());
        }
        Ok(StridedView {
            parent: self,
            offset,
            stride,
            len,
        })
    }

    /// View a contiguous range of linear indices.
    pub fn slice(&self, range: Range<usize>) -> NullArrayResult<StridedView<'_, T>> {
        if range.start > range.end {
            nullarray_bail!(
                "slice start {} is after its end {}",
                range.start,
                range.end
            );
        }
        self.strided(range.start, 1, range.end - range.start)
    }
}

impl<'a, T> StridedView<'a, T> {
    /// The number of viewed elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the view covers no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The array this view borrows from.
    pub fn parent(&self) -> &'a NullableArray<T> {
        self.parent
    }

    /// The parent's linear index for a position of the view.
    #[inline]
    pub fn parent_index(&self, index: usize) -> usize {
        self.offset + index * self.stride
    }

    /// Returns whether the viewed position `index` is null in the parent.
    pub fn is_null(&self, index: usize) -> NullArrayResult<bool> {
        if index >= self.len {
            nullarray_bail!(OutOfBounds: index, 0, self.len);
        }
        Ok(self.parent.nulls().is_null(self.parent_index(index)))
    }

    /// Read the viewed position `index` as a nullable scalar.
    pub fn get(&self, index: usize) -> NullArrayResult<Option<&'a T>> {
        if index >= self.len {
            nullarray_bail!(OutOfBounds: index, 0, self.len);
        }
        self.parent.get(self.parent_index(index))
    }

    /// Returns true if every viewed position is null. An empty view is all null.
    pub fn all_null(&self) -> bool {
        let nulls = self.parent.nulls();
        if self.is_empty() || nulls.all_null() {
            return true;
        }
        if !nulls.any_null() {
            return false;
        }
        (0..self.len).all(|idx| nulls.is_null(self.parent_index(idx)))
    }

    /// Iterate over the viewed elements as nullable scalars.
    pub fn iter(&self) -> impl Iterator<Item = Option<&'a T>> + 'a {
        let (parent, offset, stride) = (self.parent, self.offset, self.stride);
        (0..self.len).map(move |idx| {
            let pos = offset + idx * stride;
            (!parent.nulls().is_null(pos)).then(|| &parent.values()[pos])
        })
    }
}

impl<T: Element> StridedView<'_, T> {
    /// Copy the viewed elements into a new one-dimensional array.
    pub fn to_owned_array(&self) -> NullableArray<T> {
        self.iter().map(|value| value.cloned()).collect()
    }
}

impl<T> AnyNull for StridedView<'_, T> {
    /// Checks the viewed positions only, stopping at the first null.
    fn any_null(&self) -> bool {
        let nulls = self.parent.nulls();
        if self.is_empty() || !nulls.any_null() {
            return false;
        }
        if nulls.all_null() {
            return true;
        }
        (0..self.len).any(|idx| nulls.is_null(self.parent_index(idx)))
    }
}
