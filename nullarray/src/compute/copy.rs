use nullarray_error::{NullArrayExpect, NullArrayResult, nullarray_bail};
use nullarray_mask::{AllOr, NullMask};

use crate::NullableArray;
use crate::element::Element;

/// Copy `src` into the leading positions of `dest`.
///
/// Valid values of `src` are written to the same linear positions of `dest`; at positions that
/// are null in `src` the payload of `dest` is left as it was. The null flags of `src` replace the
/// leading `src.len()` flags of `dest`. `dest` keeps its shape.
pub fn copy_from<T: Element>(
    dest: &mut NullableArray<T>,
    src: &NullableArray<T>,
) -> NullArrayResult<()> {
    if src.len() > dest.len() {
        nullarray_bail!(OutOfBounds: src.len() - 1, 0, dest.len());
    }

    let len = src.len();
    if T::FLAT {
        // Payload under a null is unspecified and stays masked, so copying it is harmless.
        log::trace!("bulk copy of {len} {} values", T::type_name());
        dest.values_mut()[..len].clone_from_slice(src.values());
    } else {
        log::trace!("masked copy of {len} {} values", T::type_name());
        copy_valid_values(dest.values_mut(), src.values(), src.nulls());
    }

    dest.nulls_mut().copy_prefix_from(src.nulls())
}

fn copy_valid_values<T: Clone>(dest: &mut [T], src: &[T], nulls: &NullMask) {
    match nulls.boolean_buffer() {
        AllOr::All => {}
        AllOr::None => dest[..src.len()].clone_from_slice(src),
        AllOr::Some(null_bits) => {
            for (idx, is_null) in null_bits.iter().enumerate() {
                if !is_null {
                    dest[idx].clone_from(&src[idx]);
                }
            }
        }
    }
}

/// Allocate a new array of the same type and shape as `src` and copy `src` into it.
pub fn copy<T: Element>(src: &NullableArray<T>) -> NullableArray<T> {
    let mut dest = src.similar_like();
    copy_from(&mut dest, src).nullarray_expect("a similar array always fits its source");
    dest
}

/// Set every position of `array` to `value`.
///
/// A valid value is stored in every slot and clears every null flag. `None` marks every
/// position null and leaves the payload unspecified.
pub fn fill<T: Element>(array: &mut NullableArray<T>, value: impl Into<Option<T>>) {
    let len = array.len();
    match value.into() {
        Some(value) => {
            array.values_mut().fill(value);
            *array.nulls_mut() = NullMask::new_valid(len);
        }
        None => *array.nulls_mut() = NullMask::new_null(len),
    }
}

/// Copy both the values and the null mask into freshly allocated storage.
///
/// Nothing is shared with `array`: owned payloads such as `String` are cloned, and the mask
/// bits are copied rather than reference counted.
pub fn deep_copy<T: Element>(array: &NullableArray<T>) -> NullableArray<T> {
    NullableArray::try_new(
        array.values().to_vec(),
        array.nulls().deep_clone(),
        array.shape().clone(),
    )
    .nullarray_expect("parts of a valid array are congruent")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::Shape;

    #[test]
    fn copy_from_keeps_dest_payload_under_src_nulls() {
        let mut dest = NullableArray::from(vec![
            String::from("a"),
            String::from("b"),
            String::from("c"),
        ]);
        let src = NullableArray::from_iter([Some(String::from("x")), None]);

        copy_from(&mut dest, &src).unwrap();

        assert_eq!(dest.values(), &["x", "b", "c"]);
        assert_eq!(dest.get(0).unwrap().map(String::as_str), Some("x"));
        assert_eq!(dest.get(1).unwrap(), None);
        assert_eq!(dest.get(2).unwrap().map(String::as_str), Some("c"));
    }

    #[test]
    fn copy_from_flat_bulk_path() {
        let mut dest = NullableArray::<i64>::new_null(Shape::vector(4));
        let src = NullableArray::from_iter([Some(1i64), None, Some(3)]);

        copy_from(&mut dest, &src).unwrap();

        assert_eq!(
            dest.iter().collect::<Vec<_>>(),
            vec![Some(&1), None, Some(&3), None]
        );
    }

    #[test]
    fn copy_from_rejects_small_dest_before_writing() {
        let mut dest = NullableArray::from(vec![7, 8]);
        let src = NullableArray::from_iter([None, Some(1), Some(2)]);

        let err = copy_from(&mut dest, &src).unwrap_err();

        assert!(err.is_shape_error());
        assert_eq!(dest, NullableArray::from(vec![7, 8]));
    }

    #[test]
    fn copy_is_equal_and_same_shape() {
        let src = NullableArray::try_from_values(vec![1, 2, 3, 4], Shape::matrix(2, 2).unwrap())
            .unwrap();
        let copied = copy(&src);
        assert_eq!(copied, src);
        assert_eq!(copied.shape(), src.shape());
    }

    #[rstest]
    #[case(Some(5))]
    #[case(None)]
    fn fill_with_scalar(#[case] value: Option<i32>) {
        let mut array = NullableArray::from_iter([Some(1), None, Some(3)]);
        fill(&mut array, value);

        match value {
            Some(v) => {
                assert_eq!(array.null_count(), 0);
                assert!(array.values().iter().all(|x| *x == v));
            }
            None => assert_eq!(array.null_count(), 3),
        }
    }

    #[test]
    fn fill_with_plain_value() {
        let mut array = NullableArray::<u8>::new_null(Shape::vector(2));
        fill(&mut array, 9u8);
        assert_eq!(array, NullableArray::from(vec![9u8, 9]));
    }

    #[test]
    fn deep_copy_is_independent() {
        let original =
            NullableArray::from_iter([Some(String::from("a")), None, Some(String::from("c"))]);
        let mut copied = deep_copy(&original);
        assert_eq!(copied, original);

        copied.set(0, String::from("z")).unwrap();
        copied.set(2, None).unwrap();

        assert_eq!(original.get(0).unwrap().map(String::as_str), Some("a"));
        assert_eq!(original.get(2).unwrap().map(String::as_str), Some("c"));
        assert_ne!(original.values().as_ptr(), copied.values().as_ptr());
    }
}
