use nullarray_error::{NullArrayResult, nullarray_bail};

use crate::element::Element;
use crate::{NullableArray, Shape};

/// Grow or shrink a one-dimensional array to `len` elements.
///
/// Positions added by growing are null; growth never produces valid data. Shrinking discards
/// trailing values together with their null flags.
pub fn resize<T: Element>(array: &mut NullableArray<T>, len: usize) -> NullArrayResult<()> {
    if array.ndims() != 1 {
        nullarray_bail!(
            ShapeMismatch: "resize requires a one-dimensional array, got shape {}",
            array.shape()
        );
    }

    log::debug!("resizing {} array from {} to {len}", T::type_name(), array.len());
    array.values_mut().resize(len, T::default());
    array.nulls_mut().resize(len);
    array.set_shape(Shape::vector(len));
    Ok(())
}
