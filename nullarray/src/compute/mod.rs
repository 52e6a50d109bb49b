//! Compute functions over [`NullableArray`](crate::NullableArray).
//!
//! Every function validates its inputs before touching any destination buffer, so a returned
//! error never leaves an array partially updated.

mod cast;
mod copy;
mod find;
mod nulls;
mod predicate;
mod resize;

pub use cast::*;
pub use copy::*;
pub use find::*;
pub use nulls::*;
pub use predicate::*;
pub use resize::*;
