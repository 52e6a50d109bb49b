use crate::NullableArray;
use crate::scalar::AnyNull;

/// Returns true if any position of the array is null.
pub fn any_null<T>(array: &NullableArray<T>) -> bool {
    array.nulls().any_null()
}

/// Returns true if every position of the array is null. An empty array is all null.
pub fn all_null<T>(array: &NullableArray<T>) -> bool {
    array.nulls().all_null()
}

impl<T> AnyNull for NullableArray<T> {
    fn any_null(&self) -> bool {
        any_null(self)
    }
}
