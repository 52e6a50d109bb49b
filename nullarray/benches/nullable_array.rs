#![allow(clippy::unwrap_used)]

use divan::Bencher;
use nullarray::compute::{any_null, copy_from, find};
use nullarray::{AnyNull, NullMask, NullableArray, Shape};

fn main() {
    divan::main();
}

const LENGTHS: &[usize] = &[1_000, 100_000, 1_000_000];

trait Sample: nullarray::Element {
    fn sample(idx: usize) -> Self;
}

impl Sample for i64 {
    fn sample(idx: usize) -> Self {
        (idx % 251) as i64
    }
}

impl Sample for String {
    fn sample(idx: usize) -> Self {
        format!("value-{}", idx % 251)
    }
}

fn sparse_nulls(len: usize) -> NullMask {
    NullMask::from_iter((0..len).map(|idx| idx % 97 == 13))
}

#[divan::bench(args = LENGTHS)]
fn any_null_mixed(bencher: Bencher, len: usize) {
    let array =
        NullableArray::try_from_parts((0..len as i64).collect(), sparse_nulls(len)).unwrap();
    bencher.with_inputs(|| &array).bench_refs(|array| any_null(*array));
}

#[divan::bench(args = LENGTHS)]
fn any_null_view(bencher: Bencher, len: usize) {
    // The only null sits past the last viewed position, so every position is scanned.
    let mut array = NullableArray::from((0..len as i64).collect::<Vec<_>>());
    array.set(len - 1, None).unwrap();
    bencher
        .with_inputs(|| array.strided(1, 2, (len - 1) / 2).unwrap())
        .bench_refs(|view| view.any_null());
}

#[divan::bench(types = [i64, String], args = LENGTHS)]
fn copy_into<T: Sample>(bencher: Bencher, len: usize) {
    let src = NullableArray::try_from_parts(
        (0..len).map(T::sample).collect(),
        sparse_nulls(len),
    )
    .unwrap();
    bencher
        .with_inputs(|| NullableArray::<T>::new_null(Shape::vector(len)))
        .bench_refs(|dest| copy_from(dest, &src).unwrap());
}

#[divan::bench(args = LENGTHS)]
fn find_true(bencher: Bencher, len: usize) {
    let array = NullableArray::try_from_parts(
        (0..len).map(|idx| idx % 3 == 0).collect(),
        sparse_nulls(len),
    )
    .unwrap();
    bencher.with_inputs(|| &array).bench_refs(|array| find(*array));
}
