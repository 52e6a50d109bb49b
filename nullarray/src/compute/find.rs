use nullarray_mask::AllOr;

use crate::NullableArray;

/// Returns, in ascending order, the linear indices of every valid `true` value.
///
/// Null positions count as `false`.
pub fn find(array: &NullableArray<bool>) -> Vec<usize> {
    let values = array.values();
    match array.nulls().boolean_buffer() {
        AllOr::All => Vec::new(),
        AllOr::None => collect_matches(|| values.iter().copied()),
        AllOr::Some(nulls) => collect_matches(|| {
            values
                .iter()
                .zip(nulls.iter())
                .map(|(value, is_null)| *value && !is_null)
        }),
    }
}

fn collect_matches<I, F>(matches: F) -> Vec<usize>
where
    F: Fn() -> I,
    I: Iterator<Item = bool>,
{
    // Count first so the result is allocated exactly once.
    let count = matches().filter(|is_match| *is_match).count();
    let mut indices = Vec::with_capacity(count);
    indices.extend(
        matches()
            .enumerate()
            .filter_map(|(idx, is_match)| is_match.then_some(idx)),
    );
    debug_assert_eq!(indices.len(), count);
    indices
}
