//! Capabilities of the types that can be stored in a [`NullableArray`](crate::NullableArray).

use std::fmt::Debug;

use num_traits::{Float, NumCast, ToPrimitive};

/// A type that can be stored in the value buffer of a nullable array.
///
/// Null positions still occupy a value slot, so every element type needs a [`Default`] to
/// fill slots that hold no meaningful value.
pub trait Element: Clone + Default + Debug + Send + Sync + 'static {
    /// Whether the type is plain data with a fixed bit layout.
    ///
    /// Flat element types may be bulk copied, payload garbage at null positions included, and
    /// may be converted to floating point.
    const FLAT: bool;

    /// A short name used in error messages.
    fn type_name() -> &'static str;

    /// Convert the value to `f64`, if the type has a numeric interpretation.
    fn to_f64(&self) -> Option<f64> {
        None
    }
}

/// Element types with numeric semantics.
pub trait Numeric: Element + Copy + ToPrimitive + NumCast {
    /// Returns true for a floating point NaN. Integers are never NaN.
    fn is_nan(&self) -> bool;

    /// Returns true unless the value is infinite or NaN. Integers are always finite.
    fn is_finite(&self) -> bool;
}

/// Normalizes a requested element type to the payload type stored in a nullable array.
///
/// Requesting `Option<T>` yields `T`, so a nullable array of nullable values is never built.
pub trait Payload {
    /// The element type actually stored.
    type Inner: Element;
}

impl<T: Element> Payload for Option<T> {
    type Inner = T;
}

macro_rules! int_element {
    ($typ:ty) => {
        impl Element for $typ {
            const FLAT: bool = true;

            fn type_name() -> &'static str {
                stringify!($typ)
            }

            fn to_f64(&self) -> Option<f64> {
                ToPrimitive::to_f64(self)
            }
        }

        impl Numeric for $typ {
            #[inline]
            fn is_nan(&self) -> bool {
                false
            }

            #[inline]
            fn is_finite(&self) -> bool {
                true
            }
        }

        impl Payload for $typ {
            type Inner = $typ;
        }
    };
}

macro_rules! float_element {
    ($typ:ty) => {
        impl Element for $typ {
            const FLAT: bool = true;

            fn type_name() -> &'static str {
                stringify!($typ)
            }

            fn to_f64(&self) -> Option<f64> {
                ToPrimitive::to_f64(self)
            }
        }

        impl Numeric for $typ {
            #[inline]
            fn is_nan(&self) -> bool {
                Float::is_nan(*self)
            }

            #[inline]
            fn is_finite(&self) -> bool {
                Float::is_finite(*self)
            }
        }

        impl Payload for $typ {
            type Inner = $typ;
        }
    };
}

int_element!(u8);
int_element!(u16);
int_element!(u32);
int_element!(u64);
int_element!(usize);
int_element!(i8);
int_element!(i16);
int_element!(i32);
int_element!(i64);
int_element!(isize);
float_element!(f32);
float_element!(f64);

impl Element for bool {
    const FLAT: bool = true;

    fn type_name() -> &'static str {
        "bool"
    }

    fn to_f64(&self) -> Option<f64> {
        Some(if *self { 1.0 } else { 0.0 })
    }
}

impl Payload for bool {
    type Inner = bool;
}

impl Element for char {
    const FLAT: bool = true;

    fn type_name() -> &'static str {
        "char"
    }

    fn to_f64(&self) -> Option<f64> {
        Some(<f64 as From<u32>>::from(<u32 as From<char>>::from(*self)))
    }
}

impl Payload for char {
    type Inner = char;
}

impl Element for String {
    const FLAT: bool = false;

    fn type_name() -> &'static str {
        "String"
    }
}

impl Payload for String {
    type Inner = String;
}

impl<T: Element> Element for Vec<T> {
    const FLAT: bool = false;

    fn type_name() -> &'static str {
        "Vec"
    }
}

impl<T: Element> Payload for Vec<T> {
    type Inner = Vec<T>;
}
