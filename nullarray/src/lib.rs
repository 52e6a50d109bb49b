//! N-dimensional arrays with a per-position null mask.
//!
//! A [`NullableArray`] pairs a buffer of values with a [`NullMask`] of the same shape. A set bit
//! in the mask marks its position as null; the value stored underneath is unspecified and never
//! read. Scalars read out of an array are `Option<&T>`, so SQL-style "value or null" semantics
//! fall out of ordinary pattern matching.
//!
//! ```
//! use nullarray::NullableArray;
//! use nullarray::compute::{find, to_plain_or};
//!
//! let matches = NullableArray::from_iter([Some(true), None, Some(false), Some(true)]);
//! assert_eq!(find(&matches), vec![0, 3]);
//!
//! let numbers = NullableArray::from_iter([Some(1), None, Some(3)]);
//! assert_eq!(to_plain_or(&numbers, 0), vec![1, 0, 3]);
//! ```
#![deny(missing_docs)]

mod array;
#[cfg(feature = "arrow")]
pub mod arrow;
pub mod compute;
mod element;
pub mod scalar;
mod shape;
mod view;

pub use array::*;
pub use element::*;
pub use nullarray_error::{NullArrayError, NullArrayResult};
pub use nullarray_mask::{AllOr, NullMask};
pub use scalar::{AnyNull, MaybeNull};
pub use shape::*;
pub use view::*;
