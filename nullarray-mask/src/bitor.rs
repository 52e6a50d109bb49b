use std::ops::BitOr;

use nullarray_error::nullarray_panic;

use crate::{AllOr, NullMask};

/// The union of two masks: a position is null if it is null in either input.
impl BitOr for &NullMask {
    type Output = NullMask;

    fn bitor(self, rhs: Self) -> Self::Output {
        if self.len() != rhs.len() {
            nullarray_panic!("Masks must have the same length");
        }

        match (self.boolean_buffer(), rhs.boolean_buffer()) {
            (AllOr::None, _) => rhs.clone(),
            (_, AllOr::None) => self.clone(),
            (AllOr::All, _) | (_, AllOr::All) => NullMask::new_null(self.len()),
            (AllOr::Some(lhs), AllOr::Some(rhs)) => NullMask::from_buffer(lhs | rhs),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::NullMask;

    #[test]
    fn union_of_nulls() {
        let lhs = NullMask::from_iter([true, false, false, false]);
        let rhs = NullMask::from_iter([false, false, true, false]);
        assert_eq!(&lhs | &rhs, NullMask::from_iter([true, false, true, false]));
    }

    #[test]
    fn union_fast_paths() {
        let mixed = NullMask::from_iter([true, false]);
        assert_eq!(&mixed | &NullMask::new_valid(2), mixed);
        assert_eq!(&NullMask::new_null(2) | &mixed, NullMask::new_null(2));
    }

    #[test]
    #[should_panic]
    fn union_length_mismatch() {
        let _ = &NullMask::new_valid(2) | &NullMask::new_valid(3);
    }
}
