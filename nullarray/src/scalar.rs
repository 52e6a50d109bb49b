//! Nullable scalars.
//!
//! A single element read out of a [`NullableArray`](crate::NullableArray) is an `Option<&T>`:
//! `Some` for a valid position and `None` for a null one. [`MaybeNull`] generalizes that to any
//! value that may or may not be able to represent null, and [`AnyNull`] answers "is anything
//! here null?" for whole collections.

/// A value that may be null.
///
/// `Option<T>` is null when it is `None`. Plain values can never be null: for them the concept
/// does not apply, and they always report `false`.
pub trait MaybeNull {
    /// Returns true if the value is a null scalar.
    fn is_null(&self) -> bool;
}

impl<T> MaybeNull for Option<T> {
    #[inline]
    fn is_null(&self) -> bool {
        self.is_none()
    }
}

impl<T: MaybeNull + ?Sized> MaybeNull for &T {
    #[inline]
    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

macro_rules! never_null {
    ($($typ:ty),+ $(,)?) => {
        $(
            impl MaybeNull for $typ {
                #[inline]
                fn is_null(&self) -> bool {
                    false
                }
            }
        )+
    };
}

never_null!(
    u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64, bool, char, str, String
);

impl<T> MaybeNull for Vec<T> {
    #[inline]
    fn is_null(&self) -> bool {
        false
    }
}

/// Collections that can report whether any of their positions is null.
pub trait AnyNull {
    /// Returns true if at least one position is null, stopping at the first one found.
    fn any_null(&self) -> bool;
}

impl<T: MaybeNull> AnyNull for [T] {
    fn any_null(&self) -> bool {
        any_null(self)
    }
}

impl<T: MaybeNull> AnyNull for Vec<T> {
    fn any_null(&self) -> bool {
        any_null(self)
    }
}

macro_rules! tuple_any_null {
    ($($name:ident),+) => {
        impl<$($name: MaybeNull),+> AnyNull for ($($name,)+) {
            #[allow(non_snake_case)]
            fn any_null(&self) -> bool {
                let ($($name,)+) = self;
                any_null([$($name as &dyn MaybeNull),+])
            }
        }
    };
}

tuple_any_null!(A);
tuple_any_null!(A, B);
tuple_any_null!(A, B, C);
tuple_any_null!(A, B, C, D);
tuple_any_null!(A, B, C, D, E);
tuple_any_null!(A, B, C, D, E, F);
tuple_any_null!(A, B, C, D, E, F, G);
tuple_any_null!(A, B, C, D, E, F, G, H);

/// Returns true if any element of the collection is a null scalar.
///
/// Elements that cannot represent null never contribute.
pub fn any_null<I>(values: I) -> bool
where
    I: IntoIterator,
    I::Item: MaybeNull,
{
    values.into_iter().any(|value| value.is_null())
}
