//! A null mask records, for every position of an array, whether that position holds no value.
#![deny(missing_docs)]
mod bitor;
mod eq;
mod iter_bools;

use std::fmt::{Debug, Formatter};
use std::sync::{Arc, OnceLock};

use arrow_buffer::{BooleanBuffer, BooleanBufferBuilder, Buffer, NullBuffer};
use itertools::Itertools;
use nullarray_error::{NullArrayResult, nullarray_bail};

/// Represents a set of positions that are all null, all valid, or some mixture of both.
pub enum AllOr<T> {
    /// Every position is null.
    All,
    /// No position is null.
    None,
    /// Some positions are null.
    Some(T),
}

impl<T> Debug for AllOr<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::None => f.write_str("None"),
            Self::Some(v) => f.debug_tuple("Some").field(v).finish(),
        }
    }
}

impl<T> PartialEq for AllOr<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::All, Self::All) => true,
            (Self::None, Self::None) => true,
            (Self::Some(lhs), Self::Some(rhs)) => lhs == rhs,
            _ => false,
        }
    }
}

impl<T> Eq for AllOr<T> where T: Eq {}

/// The null flags of an array.
///
/// A set bit marks a null position. Masks that are entirely valid or entirely null are stored
/// without a buffer; a [`NullMask::Mixed`] mask always holds at least one null and one valid
/// position.
#[derive(Clone, Debug)]
pub enum NullMask {
    /// No position is null.
    AllValid(usize),
    /// Every position is null.
    AllNull(usize),
    /// Some positions are null, represented as a [`BooleanBuffer`].
    Mixed(Arc<MaskValues>),
}

/// The bits of a [`NullMask`] that contains both null and valid positions.
#[derive(Debug)]
pub struct MaskValues {
    buffer: BooleanBuffer,

    // Cached lazily, iterating the bits on every request is slow for sparse masks.
    null_indices: OnceLock<Vec<usize>>,

    null_count: usize,
}

impl MaskValues {
    /// Returns the length of the mask.
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns the number of null positions.
    pub fn null_count(&self) -> usize {
        self.null_count
    }

    /// Returns the boolean buffer representation of the mask.
    pub fn boolean_buffer(&self) -> &BooleanBuffer {
        &self.buffer
    }

    /// Returns whether the position at `index` is null.
    pub fn is_null(&self, index: usize) -> bool {
        self.buffer.value(index)
    }

    /// Returns the sorted positions of every null.
    pub fn null_indices(&self) -> &[usize] {
        self.null_indices.get_or_init(|| {
            let mut indices = Vec::with_capacity(self.null_count);
            indices.extend(self.buffer.set_indices());
            debug_assert!(indices.is_sorted());
            debug_assert_eq!(indices.len(), self.null_count);
            indices
        })
    }
}

impl NullMask {
    /// Create a new mask where no position is null.
    pub fn new_valid(length: usize) -> Self {
        Self::AllValid(length)
    }

    /// Create a new mask where every position is null.
    pub fn new_null(length: usize) -> Self {
        Self::AllNull(length)
    }

    /// Create a new [`NullMask`] from a [`BooleanBuffer`] whose set bits mark nulls.
    pub fn from_buffer(buffer: BooleanBuffer) -> Self {
        let len = buffer.len();
        let null_count = buffer.count_set_bits();

        if null_count == 0 {
            return Self::AllValid(len);
        }
        if null_count == len {
            return Self::AllNull(len);
        }

        Self::Mixed(Arc::new(MaskValues {
            buffer,
            null_indices: Default::default(),
            null_count,
        }))
    }

    /// Create a new [`NullMask`] of length `len` where exactly the given positions are null.
    ///
    /// The indices must be sorted, unique and in bounds.
    pub fn from_null_indices(len: usize, indices: Vec<usize>) -> NullArrayResult<Self> {
        if let Some(&last) = indices.last() {
            if last >= len {
                nullarray_bail!(OutOfBounds: last, 0, len);
            }
        }
        if let Some((first, second)) = indices.iter().tuple_windows().find(|(a, b)| a >= b) {
            nullarray_bail!(
                "Null indices must be sorted and unique, got {} followed by {}",
                first,
                second
            );
        }

        let null_count = indices.len();
        if null_count == 0 {
            return Ok(Self::AllValid(len));
        }
        if null_count == len {
            return Ok(Self::AllNull(len));
        }

        let mut buf = BooleanBufferBuilder::new(len);
        buf.append_n(len, false);
        indices.iter().for_each(|idx| buf.set_bit(*idx, true));
        debug_assert_eq!(buf.len(), len);

        Ok(Self::Mixed(Arc::new(MaskValues {
            buffer: buf.finish(),
            null_indices: OnceLock::from(indices),
            null_count,
        })))
    }

    /// Create a new [`NullMask`] from an Arrow validity buffer of length `len`.
    ///
    /// Arrow marks *valid* positions with set bits, so the polarity is inverted.
    pub fn from_validity(len: usize, validity: Option<&NullBuffer>) -> Self {
        match validity {
            None => Self::AllValid(len),
            Some(nulls) => Self::from_buffer(!nulls.inner()),
        }
    }

    /// Returns the length of the mask (not the number of nulls).
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        match &self {
            Self::AllValid(len) => *len,
            Self::AllNull(len) => *len,
            Self::Mixed(values) => values.buffer.len(),
        }
    }

    /// Get the number of null positions.
    #[inline]
    pub fn null_count(&self) -> usize {
        match &self {
            Self::AllValid(_) => 0,
            Self::AllNull(len) => *len,
            Self::Mixed(values) => values.null_count,
        }
    }

    /// Get the number of valid positions.
    #[inline]
    pub fn valid_count(&self) -> usize {
        self.len() - self.null_count()
    }

    /// Returns true if at least one position is null.
    #[inline]
    pub fn any_null(&self) -> bool {
        match &self {
            Self::AllValid(_) => false,
            Self::AllNull(len) => *len > 0,
            Self::Mixed(_) => true,
        }
    }

    /// Returns true if every position is null. An empty mask is vacuously all null.
    #[inline]
    pub fn all_null(&self) -> bool {
        match &self {
            Self::AllValid(len) => *len == 0,
            Self::AllNull(_) => true,
            Self::Mixed(_) => false,
        }
    }

    /// Returns whether the position at `idx` is null.
    ///
    /// ## Panics
    ///
    /// Panics if the index is out of bounds.
    pub fn is_null(&self, idx: usize) -> bool {
        assert!(
            idx < self.len(),
            "index {idx} out of bounds for mask of length {}",
            self.len()
        );
        match self {
            Self::AllValid(_) => false,
            Self::AllNull(_) => true,
            Self::Mixed(values) => values.is_null(idx),
        }
    }

    /// Mark the position at `idx` as null or valid.
    ///
    /// A change rebuilds the bitmap, which costs O(len). Use [`NullMask::set_many`] to apply
    /// several edits with a single rebuild.
    pub fn set(&mut self, idx: usize, null: bool) -> NullArrayResult<()> {
        self.set_many([(idx, null)])
    }

    /// Apply a batch of `(idx, null)` edits with at most one rebuild of the bitmap.
    ///
    /// Every index is checked before the mask changes. Later edits to the same index win.
    pub fn set_many<I>(&mut self, edits: I) -> NullArrayResult<()>
    where
        I: IntoIterator<Item = (usize, bool)>,
    {
        let len = self.len();
        let edits = edits.into_iter().collect::<Vec<_>>();
        if let Some(&(idx, _)) = edits.iter().find(|(idx, _)| *idx >= len) {
            nullarray_bail!(OutOfBounds: idx, 0, len);
        }
        if edits.iter().all(|&(idx, null)| self.is_null(idx) == null) {
            return Ok(());
        }

        let mut builder = self.to_builder(len);
        for (idx, null) in edits {
            builder.set_bit(idx, null);
        }
        *self = Self::from_buffer(builder.finish());
        Ok(())
    }

    /// Grow or shrink the mask to `len` positions.
    ///
    /// Positions added by growing are null. Shrinking discards trailing positions.
    pub fn resize(&mut self, len: usize) {
        let current = self.len();
        if len <= current {
            *self = self.slice(0, len);
            return;
        }

        if matches!(self, Self::AllNull(_)) {
            *self = Self::AllNull(len);
            return;
        }

        let mut builder = self.to_builder(len);
        builder.append_n(len - current, true);
        *self = Self::from_buffer(builder.finish());
    }

    /// Overwrite the leading `src.len()` positions of this mask with the flags of `src`.
    ///
    /// Positions past the end of `src` keep their current flags.
    pub fn copy_prefix_from(&mut self, src: &NullMask) -> NullArrayResult<()> {
        let len = self.len();
        if src.len() > len {
            nullarray_bail!(OutOfBounds: src.len(), 0, len);
        }
        if src.len() == len {
            *self = src.clone();
            return Ok(());
        }

        let mut builder = src.to_builder(len);
        match self.slice(src.len(), len - src.len()) {
            Self::AllValid(n) => builder.append_n(n, false),
            Self::AllNull(n) => builder.append_n(n, true),
            Self::Mixed(values) => builder.append_buffer(&values.buffer),
        }
        *self = Self::from_buffer(builder.finish());
        Ok(())
    }

    /// Slice the mask.
    pub fn slice(&self, offset: usize, length: usize) -> Self {
        assert!(offset + length <= self.len());
        match &self {
            Self::AllValid(_) => Self::new_valid(length),
            Self::AllNull(_) => Self::new_null(length),
            Self::Mixed(values) => Self::from_buffer(values.buffer.slice(offset, length)),
        }
    }

    /// Clone the mask into freshly allocated storage that shares nothing with `self`.
    pub fn deep_clone(&self) -> Self {
        match self {
            Self::AllValid(len) => Self::AllValid(*len),
            Self::AllNull(len) => Self::AllNull(*len),
            Self::Mixed(values) => {
                let buffer = &values.buffer;
                let bytes = Buffer::from_slice_ref(buffer.values());
                Self::Mixed(Arc::new(MaskValues {
                    buffer: BooleanBuffer::new(bytes, buffer.offset(), buffer.len()),
                    null_indices: Default::default(),
                    null_count: values.null_count,
                }))
            }
        }
    }

    /// Return the boolean buffer representation of the mask.
    pub fn boolean_buffer(&self) -> AllOr<&BooleanBuffer> {
        match &self {
            Self::AllNull(_) => AllOr::All,
            Self::AllValid(_) => AllOr::None,
            Self::Mixed(values) => AllOr::Some(&values.buffer),
        }
    }

    /// Returns an Arrow null buffer representation of the mask.
    pub fn to_null_buffer(&self) -> Option<NullBuffer> {
        match self {
            Self::AllValid(_) => None,
            Self::AllNull(l) => Some(NullBuffer::new_null(*l)),
            Self::Mixed(values) => Some(NullBuffer::new(!values.boolean_buffer())),
        }
    }

    /// Return the sorted null positions of the mask.
    pub fn null_indices(&self) -> AllOr<&[usize]> {
        match &self {
            Self::AllNull(_) => AllOr::All,
            Self::AllValid(_) => AllOr::None,
            Self::Mixed(values) => AllOr::Some(values.null_indices()),
        }
    }

    /// Return [`MaskValues`] if the mask is neither all valid nor all null.
    pub fn values(&self) -> Option<&MaskValues> {
        match self {
            Self::Mixed(values) => Some(values),
            _ => None,
        }
    }

    fn to_builder(&self, capacity: usize) -> BooleanBufferBuilder {
        let mut builder = BooleanBufferBuilder::new(capacity.max(self.len()));
        match self {
            Self::AllValid(len) => builder.append_n(*len, false),
            Self::AllNull(len) => builder.append_n(*len, true),
            Self::Mixed(values) => builder.append_buffer(&values.buffer),
        }
        builder
    }
}

impl From<BooleanBuffer> for NullMask {
    fn from(value: BooleanBuffer) -> Self {
        Self::from_buffer(value)
    }
}

impl FromIterator<bool> for NullMask {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        Self::from_buffer(BooleanBuffer::from_iter(iter))
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::*;

    #[test]
    fn mask_all_valid() {
        let mask = NullMask::new_valid(5);
        assert_eq!(mask.len(), 5);
        assert_eq!(mask.null_count(), 0);
        assert!(!mask.any_null());
        assert!(!mask.all_null());
        assert_eq!(mask.null_indices(), AllOr::None);
        assert_eq!(mask.boolean_buffer(), AllOr::None);
        assert!(mask.to_null_buffer().is_none());
    }

    #[test]
    fn mask_all_null() {
        let mask = NullMask::new_null(5);
        assert_eq!(mask.len(), 5);
        assert_eq!(mask.null_count(), 5);
        assert!(mask.any_null());
        assert!(mask.all_null());
        assert_eq!(mask.null_indices(), AllOr::All);
    }

    #[test]
    fn empty_mask_is_all_null_and_has_no_null() {
        for mask in [NullMask::new_valid(0), NullMask::new_null(0)] {
            assert!(mask.all_null());
            assert!(!mask.any_null());
        }
    }

    #[test]
    fn mask_from() {
        let masks = [
            NullMask::from_null_indices(5, vec![1, 4]).unwrap(),
            NullMask::from_buffer(BooleanBuffer::from_iter([false, true, false, false, true])),
            NullMask::from_iter([false, true, false, false, true]),
        ];

        for mask in &masks {
            assert_eq!(mask.len(), 5);
            assert_eq!(mask.null_count(), 2);
            assert_eq!(mask.valid_count(), 3);
            assert_eq!(mask.null_indices(), AllOr::Some(&[1, 4][..]));
            assert!(mask.is_null(1));
            assert!(!mask.is_null(2));
        }
    }

    #[rstest]
    #[case(vec![5])]
    #[case(vec![2, 1])]
    #[case(vec![1, 1])]
    fn from_null_indices_rejects(#[case] indices: Vec<usize>) {
        assert!(NullMask::from_null_indices(5, indices).is_err());
    }

    #[test]
    fn normalizes_representation() {
        assert!(matches!(
            NullMask::from_iter([true, true]),
            NullMask::AllNull(2)
        ));
        assert!(matches!(
            NullMask::from_iter([false, false]),
            NullMask::AllValid(2)
        ));
    }

    #[test]
    fn set_flips_single_position() {
        let mut mask = NullMask::new_valid(4);
        mask.set(2, true).unwrap();
        assert_eq!(mask.null_indices(), AllOr::Some(&[2][..]));

        mask.set(2, false).unwrap();
        assert!(matches!(mask, NullMask::AllValid(4)));

        assert!(mask.set(4, true).is_err());
    }

    #[test]
    fn set_many_applies_batch() {
        let mut mask = NullMask::new_valid(6);
        mask.set_many([(0, true), (3, true), (5, true), (5, false)])
            .unwrap();
        assert_eq!(mask.null_indices(), AllOr::Some(&[0, 3][..]));

        mask.set_many([(0, false), (3, false)]).unwrap();
        assert!(matches!(mask, NullMask::AllValid(6)));
    }

    #[test]
    fn set_many_checks_every_index_first() {
        let mut mask = NullMask::from_iter([false, true, false]);
        assert!(mask.set_many([(0, true), (3, true)]).is_err());
        assert_eq!(mask, NullMask::from_iter([false, true, false]));
    }

    #[rstest]
    #[case(NullMask::new_valid(3), vec![false, false, false, true, true])]
    #[case(NullMask::new_null(3), vec![true; 5])]
    #[case(NullMask::from_iter([false, true, false]), vec![false, true, false, true, true])]
    fn resize_grow_appends_nulls(#[case] mut mask: NullMask, #[case] expected: Vec<bool>) {
        mask.resize(5);
        assert_eq!(mask.len(), 5);
        assert_eq!(mask.iter_bools(|iter| iter.collect::<Vec<_>>()), expected);
    }

    #[test]
    fn resize_shrink_truncates() {
        let mut mask = NullMask::from_iter([false, true, false, true]);
        mask.resize(1);
        assert!(matches!(mask, NullMask::AllValid(1)));
    }

    #[test]
    fn copy_prefix_keeps_tail() {
        let mut dest = NullMask::from_iter([false, false, true, true]);
        dest.copy_prefix_from(&NullMask::from_iter([true, false]))
            .unwrap();
        assert_eq!(
            dest.iter_bools(|iter| iter.collect::<Vec<_>>()),
            vec![true, false, true, true]
        );

        let mut short = NullMask::new_valid(1);
        assert!(short.copy_prefix_from(&NullMask::new_null(2)).is_err());
        assert!(matches!(short, NullMask::AllValid(1)));
    }

    #[test]
    fn deep_clone_does_not_share() {
        let mask = NullMask::from_iter([true, false, true]);
        let copy = mask.deep_clone();
        assert_eq!(mask, copy);

        let (NullMask::Mixed(a), NullMask::Mixed(b)) = (&mask, &copy) else {
            unreachable!("mixed masks stay mixed")
        };
        assert!(!Arc::ptr_eq(a, b));
        assert_ne!(
            a.boolean_buffer().values().as_ptr(),
            b.boolean_buffer().values().as_ptr()
        );
    }

    #[test]
    fn arrow_validity_round_trip() {
        let mask = NullMask::from_iter([false, true, false]);
        let nulls = mask.to_null_buffer().unwrap();
        assert!(nulls.is_valid(0));
        assert!(nulls.is_null(1));
        assert_eq!(NullMask::from_validity(3, Some(&nulls)), mask);
        assert_eq!(NullMask::from_validity(3, None), NullMask::new_valid(3));
    }
}
