use nullarray_error::NullArrayExpect;
use nullarray_mask::AllOr;

use crate::NullableArray;
use crate::element::Numeric;

/// Elementwise NaN test. The result has the shape and the null positions of `array`.
///
/// The predicate is evaluated at every position, null ones included; numeric payloads are always
/// safe to test.
pub fn is_nan<T: Numeric>(array: &NullableArray<T>) -> NullableArray<bool> {
    let values = array.values().iter().map(Numeric::is_nan).collect();
    NullableArray::try_new(values, array.nulls().clone(), array.shape().clone())
        .nullarray_expect("predicate output matches input shape")
}

/// Elementwise finiteness test. The result has the shape and the null positions of `array`.
///
/// Unlike [`is_nan`], the predicate is only evaluated at valid positions; the payload at null
/// positions is left `false`.
pub fn is_finite<T: Numeric>(array: &NullableArray<T>) -> NullableArray<bool> {
    let src = array.values();
    let values = match array.nulls().boolean_buffer() {
        AllOr::All => vec![false; src.len()],
        AllOr::None => src.iter().map(Numeric::is_finite).collect(),
        AllOr::Some(nulls) => src
            .iter()
            .zip(nulls.iter())
            .map(|(value, is_null)| !is_null && value.is_finite())
            .collect(),
    };
    NullableArray::try_new(values, array.nulls().clone(), array.shape().clone())
        .nullarray_expect("predicate output matches input shape")
}

#[cfg(test)]
mod tests {
    use nullarray_mask::NullMask;

    use super::*;
    use crate::Shape;

    #[test]
    fn is_nan_propagates_nulls() {
        let array = NullableArray::try_from_parts(
            vec![1.0, f64::NAN, f64::NAN, f64::INFINITY],
            NullMask::from_iter([false, false, true, false]),
        )
        .unwrap();

        let result = is_nan(&array);

        assert_eq!(result.nulls(), array.nulls());
        assert_eq!(
            result.iter().collect::<Vec<_>>(),
            vec![Some(&false), Some(&true), None, Some(&false)]
        );
        // Evaluated under the null as well.
        assert!(result.values()[2]);
    }

    #[test]
    fn is_finite_skips_nulls() {
        let array = NullableArray::try_from_parts(
            vec![1.0f32, f32::INFINITY, 2.0, f32::NAN],
            NullMask::from_iter([false, false, true, false]),
        )
        .unwrap();

        let result = is_finite(&array);

        assert_eq!(result.nulls(), array.nulls());
        assert_eq!(
            result.iter().collect::<Vec<_>>(),
            vec![Some(&true), Some(&false), None, Some(&false)]
        );
        assert!(!result.values()[2]);
    }

    #[test]
    fn integers_and_shape() {
        let array =
            NullableArray::try_from_values(vec![1i32, 2, 3, 4], Shape::matrix(2, 2).unwrap())
                .unwrap();

        let nan = is_nan(&array);
        let finite = is_finite(&array);

        assert_eq!(nan.shape(), array.shape());
        assert!(nan.values().iter().all(|v| !v));
        assert!(finite.values().iter().all(|v| *v));
    }

    #[test]
    fn all_null_input() {
        let array = NullableArray::<f64>::new_null(Shape::vector(3));
        assert_eq!(is_finite(&array).null_count(), 3);
        assert_eq!(is_nan(&array).null_count(), 3);
    }
}
