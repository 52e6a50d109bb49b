use num_traits::NumCast;
use nullarray_error::{NullArrayExpect, NullArrayResult, nullarray_bail, nullarray_err};

use crate::element::{Element, Numeric};
use crate::{NullableArray, Shape};

/// Convert to a plain vector in linear order, failing if any position is null.
///
/// The error is [`ContainsNulls`](nullarray_error::NullArrayError::ContainsNulls), so callers can
/// tell "has nulls" apart from shape problems.
pub fn to_plain<T: Element>(array: &NullableArray<T>) -> NullArrayResult<Vec<T>> {
    if array.nulls().any_null() {
        nullarray_bail!(ContainsNulls: array.null_count());
    }
    Ok(array.values().to_vec())
}

/// Convert to a plain vector in linear order, substituting `replacement` at every null position.
pub fn to_plain_or<T: Element>(array: &NullableArray<T>, replacement: T) -> Vec<T> {
    if array.nulls().any_null() {
        log::debug!(
            "replacing {} nulls while converting {} array",
            array.null_count(),
            T::type_name()
        );
    }
    map_positions(
        array,
        || Ok(replacement.clone()),
        |_, value| Ok(value.clone()),
    )
    .nullarray_expect("cloning values is infallible")
}

/// Convert to a plain vector of `U` in linear order, failing if any position is null.
pub fn to_plain_as<T: Numeric, U: Numeric>(array: &NullableArray<T>) -> NullArrayResult<Vec<U>> {
    if array.nulls().any_null() {
        nullarray_bail!(ContainsNulls: array.null_count());
    }
    array
        .values()
        .iter()
        .enumerate()
        .map(|(idx, value)| cast_value(idx, *value))
        .collect()
}

/// Convert to a plain vector of `U` in linear order, substituting `replacement` at every null
/// position.
///
/// Nulls never cause a failure. The replacement is converted to `U` once; the conversion of it,
/// or of a valid value, can still fail when the value does not fit in `U`.
#[allow(clippy::use_debug)]
pub fn to_plain_as_or<T: Numeric, U: Numeric, R: Numeric>(
    array: &NullableArray<T>,
    replacement: R,
) -> NullArrayResult<Vec<U>> {
    let replacement: U = <U as NumCast>::from(replacement).ok_or_else(|| {
        nullarray_err!(
            InvalidCast: "replacement {:?} does not fit in {}",
            replacement,
            U::type_name()
        )
    })?;
    if array.nulls().any_null() {
        log::debug!(
            "replacing {} nulls while converting {} array to {}",
            array.null_count(),
            T::type_name(),
            U::type_name()
        );
    }
    map_positions(array, || Ok(replacement), |idx, value| cast_value(idx, *value))
}

/// Convert the element type of an array. Null positions stay null.
///
/// Only valid values are converted; the payload under a null becomes `U::default()`.
pub fn cast<T: Numeric, U: Numeric>(array: &NullableArray<T>) -> NullArrayResult<NullableArray<U>> {
    let values = map_positions(array, || Ok(U::default()), |idx, value| cast_value(idx, *value))?;
    NullableArray::try_new(values, array.nulls().clone(), array.shape().clone())
}

/// Build an all-valid nullable array of `U` from plain values of `T` laid out in `shape`.
pub fn cast_values<T: Numeric, U: Numeric>(
    values: &[T],
    shape: Shape,
) -> NullArrayResult<NullableArray<U>> {
    if values.len() != shape.len() {
        nullarray_bail!(
            ShapeMismatch: "{} values cannot fill shape {}",
            values.len(),
            shape
        );
    }
    let values = values
        .iter()
        .enumerate()
        .map(|(idx, value)| cast_value(idx, *value))
        .collect::<NullArrayResult<Vec<U>>>()?;
    NullableArray::try_from_values(values, shape)
}

/// Convert a flat element type to `f64`. Null positions stay null.
///
/// Fails before doing any work if the element type is not flat.
#[allow(clippy::use_debug)]
pub fn float<T: Element>(array: &NullableArray<T>) -> NullArrayResult<NullableArray<f64>> {
    if !T::FLAT {
        nullarray_bail!(NotImplemented: "float", T::type_name());
    }
    let values = map_positions(
        array,
        || Ok(0.0),
        |idx, value| {
            value.to_f64().ok_or_else(|| {
                nullarray_err!(
                    InvalidCast: "value {:?} at index {} has no floating point representation",
                    value,
                    idx
                )
            })
        },
    )?;
    NullableArray::try_new(values, array.nulls().clone(), array.shape().clone())
}

#[allow(clippy::use_debug)]
fn cast_value<T: Numeric, U: Numeric>(idx: usize, value: T) -> NullArrayResult<U> {
    <U as NumCast>::from(value).ok_or_else(|| {
        nullarray_err!(
            InvalidCast: "value {:?} at index {} does not fit in {}",
            value,
            idx,
            U::type_name()
        )
    })
}

/// Map every position of `array`, calling `on_null` for null positions and `on_valid` with the
/// linear index and value for valid ones.
fn map_positions<T, U, N, V>(
    array: &NullableArray<T>,
    mut on_null: N,
    mut on_valid: V,
) -> NullArrayResult<Vec<U>>
where
    N: FnMut() -> NullArrayResult<U>,
    V: FnMut(usize, &T) -> NullArrayResult<U>,
{
    array.nulls().iter_bools(|nulls| {
        array
            .values()
            .iter()
            .zip(nulls)
            .enumerate()
            .map(|(idx, (value, is_null))| {
                if is_null {
                    on_null()
                } else {
                    on_valid(idx, value)
                }
            })
            .collect()
    })
}
