use crate::NullMask;

impl PartialEq for NullMask {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        if self.null_count() != other.null_count() {
            return false;
        }

        // Since the null counts are the same, a fully valid or fully null mask is equal to the other mask.
        if self.null_count() == 0 || self.null_count() == self.len() {
            return true;
        }

        match (self.values(), other.values()) {
            (Some(lhs), Some(rhs)) => {
                if let (Some(lhs), Some(rhs)) = (lhs.null_indices.get(), rhs.null_indices.get()) {
                    return lhs == rhs;
                }
                lhs.boolean_buffer() == rhs.boolean_buffer()
            }
            // Both are mixed whenever the counts are strictly between zero and the length.
            _ => false,
        }
    }
}

impl Eq for NullMask {}

#[cfg(test)]
mod test {
    use arrow_buffer::BooleanBuffer;

    use crate::NullMask;

    #[test]
    fn null_mask_eq() {
        assert_eq!(
            NullMask::new_valid(5),
            NullMask::from_buffer(BooleanBuffer::new_unset(5))
        );
        assert_eq!(
            NullMask::new_null(5),
            NullMask::from_buffer(BooleanBuffer::new_set(5))
        );
        assert_eq!(
            NullMask::from_null_indices(5, vec![0, 2, 3]).unwrap(),
            NullMask::from_buffer(BooleanBuffer::from_iter([true, false, true, true, false]))
        );
    }

    #[test]
    fn null_mask_ne() {
        assert_ne!(NullMask::new_valid(5), NullMask::new_valid(4));
        assert_ne!(NullMask::new_valid(2), NullMask::new_null(2));
        assert_ne!(
            NullMask::from_iter([true, false]),
            NullMask::from_iter([false, true])
        );
    }

    #[test]
    fn sliced_buffers_compare_by_value() {
        let buffer = BooleanBuffer::from_iter([false, true, false, true, false, true]);
        let sliced = NullMask::from_buffer(buffer.slice(1, 4));
        assert_eq!(sliced, NullMask::from_iter([true, false, true, false]));
    }
}
