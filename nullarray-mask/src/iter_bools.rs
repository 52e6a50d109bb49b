use std::iter;

use crate::{AllOr, NullMask};

impl NullMask {
    /// Provides a closure with an iterator over the null flags of the mask.
    ///
    /// This allows us to provide different implementations of the iterator based on the underlying
    /// representation of the mask, while avoiding a heap allocation to return a boxed iterator.
    pub fn iter_bools<F, T>(&self, mut f: F) -> T
    where
        F: FnMut(&mut dyn Iterator<Item = bool>) -> T,
    {
        match self.boolean_buffer() {
            AllOr::All => f(&mut iter::repeat_n(true, self.len())),
            AllOr::None => f(&mut iter::repeat_n(false, self.len())),
            AllOr::Some(buffer) => f(&mut buffer.iter()),
        }
    }
}

#[cfg(test)]
mod test {
    use itertools::Itertools;

    use crate::NullMask;

    #[test]
    fn iter_bools_all_valid() {
        let mask = NullMask::new_valid(10);
        assert_eq!(mask.iter_bools(|iter| iter.collect_vec()), vec![false; 10]);
    }

    #[test]
    fn iter_bools_all_null() {
        let mask = NullMask::new_null(10);
        assert_eq!(mask.iter_bools(|iter| iter.collect_vec()), vec![true; 10]);
    }

    #[test]
    fn iter_bools_indices() {
        assert_eq!(
            NullMask::from_null_indices(5, vec![0, 4])
                .unwrap()
                .iter_bools(|iter| iter.collect_vec()),
            vec![true, false, false, false, true],
        );
        assert_eq!(
            NullMask::from_null_indices(5, vec![1, 2, 3])
                .unwrap()
                .iter_bools(|iter| iter.collect_vec()),
            vec![false, true, true, true, false],
        );
    }
}
