//! Conversion between one-dimensional nullable arrays and Arrow arrays.
//!
//! Arrow records *validity*, the inverse of a null mask, so the bitmaps are negated on the way
//! through.

use arrow_array::{Array, ArrowPrimitiveType, BooleanArray, PrimitiveArray};
use arrow_buffer::{BooleanBuffer, ScalarBuffer};
use nullarray_error::{NullArrayExpect, NullArrayResult, nullarray_bail};
use nullarray_mask::NullMask;

use crate::NullableArray;

/// Export a one-dimensional array as an Arrow [`PrimitiveArray`].
pub fn to_arrow<P: ArrowPrimitiveType>(
    array: &NullableArray<P::Native>,
) -> NullArrayResult<PrimitiveArray<P>> {
    check_vector(array.ndims())?;
    Ok(PrimitiveArray::<P>::new(
        ScalarBuffer::from(array.values().to_vec()),
        array.nulls().to_null_buffer(),
    ))
}

/// Import an Arrow [`PrimitiveArray`] as a one-dimensional nullable array.
pub fn from_arrow<P: ArrowPrimitiveType>(array: &PrimitiveArray<P>) -> NullableArray<P::Native> {
    let nulls = NullMask::from_validity(array.len(), array.nulls());
    NullableArray::try_from_parts(array.values().to_vec(), nulls)
        .nullarray_expect("arrow values and validity have the same length")
}

/// Export a one-dimensional boolean array as an Arrow [`BooleanArray`].
pub fn to_arrow_boolean(array: &NullableArray<bool>) -> NullArrayResult<BooleanArray> {
    check_vector(array.ndims())?;
    Ok(BooleanArray::new(
        BooleanBuffer::from(array.values()),
        array.nulls().to_null_buffer(),
    ))
}

/// Import an Arrow [`BooleanArray`] as a one-dimensional nullable array.
pub fn from_arrow_boolean(array: &BooleanArray) -> NullableArray<bool> {
    let nulls = NullMask::from_validity(array.len(), array.nulls());
    NullableArray::try_from_parts(array.values().iter().collect(), nulls)
        .nullarray_expect("arrow values and validity have the same length")
}

fn check_vector(ndims: usize) -> NullArrayResult<()> {
    if ndims != 1 {
        nullarray_bail!(
            ShapeMismatch: "only one-dimensional arrays convert to arrow, got {} dimensions",
            ndims
        );
    }
    Ok(())
}
