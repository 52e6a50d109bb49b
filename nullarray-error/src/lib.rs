#![deny(missing_docs)]

//! This crate defines error & result types for nullarray.
//! It also contains a variety of useful macros for error handling.

use std::backtrace::Backtrace;
use std::borrow::Cow;
use std::fmt::{Debug, Display, Formatter};
use std::ops::Deref;

/// A string that can be used as an error message.
#[derive(Debug)]
pub struct ErrString(Cow<'static, str>);

#[allow(clippy::fallible_impl_from)]
impl<T> From<T> for ErrString
where
    T: Into<Cow<'static, str>>,
{
    fn from(msg: T) -> Self {
        if cfg!(panic = "unwind") && std::env::var("NULLARRAY_PANIC_ON_ERR").as_deref() == Ok("1") {
            panic!("{}\nBacktrace:\n{}", msg.into(), Backtrace::capture());
        } else {
            Self(msg.into())
        }
    }
}

impl AsRef<str> for ErrString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for ErrString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for ErrString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// The top-level error type for nullarray.
#[derive(thiserror::Error)]
#[non_exhaustive]
pub enum NullArrayError {
    /// An index is out of bounds.
    #[error("index {0} out of bounds from {1} to {2}\nBacktrace:\n{3}")]
    OutOfBounds(usize, usize, usize, Backtrace),
    /// The value and null buffers, or two arrays, do not have congruent shapes.
    #[error("shape mismatch: {0}\nBacktrace:\n{1}")]
    ShapeMismatch(ErrString, Backtrace),
    /// A strict conversion was attempted on an array that holds nulls.
    #[error("cannot convert to a plain array: contains {0} null values\nBacktrace:\n{1}")]
    ContainsNulls(usize, Backtrace),
    /// An operation is not supported for the given element type.
    #[error("function {0} not implemented for {1}\nBacktrace:\n{2}")]
    NotImplemented(ErrString, ErrString, Backtrace),
    /// A valid value could not be represented in the target element type.
    #[error("invalid cast: {0}\nBacktrace:\n{1}")]
    InvalidCast(ErrString, Backtrace),
    /// An invalid argument was provided.
    #[error("{0}\nBacktrace:\n{1}")]
    InvalidArgument(ErrString, Backtrace),
    /// A wrapped error with additional context.
    #[error("{0}: {1}")]
    Context(ErrString, #[source] Box<NullArrayError>),
}

impl NullArrayError {
    /// Adds additional context to an error.
    pub fn with_context<T: Into<ErrString>>(self, msg: T) -> Self {
        NullArrayError::Context(msg.into(), Box::new(self))
    }

    /// Whether the error, or the error it wraps, reports nulls blocking a strict conversion.
    pub fn is_contains_nulls(&self) -> bool {
        match self {
            Self::ContainsNulls(..) => true,
            Self::Context(_, inner) => inner.is_contains_nulls(),
            _ => false,
        }
    }

    /// Whether the error, or the error it wraps, is a bounds or shape violation.
    pub fn is_shape_error(&self) -> bool {
        match self {
            Self::OutOfBounds(..) | Self::ShapeMismatch(..) => true,
            Self::Context(_, inner) => inner.is_shape_error(),
            _ => false,
        }
    }
}

impl Debug for NullArrayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

/// A type alias for Results that return NullArrayErrors as their error type.
pub type NullArrayResult<T> = Result<T, NullArrayError>;

/// A trait for expect-ing a NullArrayResult or an Option.
pub trait NullArrayExpect {
    /// The type of the value being expected.
    type Output;

    /// Returns the value of the result if it is Ok, otherwise panics with the error.
    /// Should be called only in contexts where the error condition represents a bug (programmer error).
    fn nullarray_expect(self, msg: &str) -> Self::Output;
}

impl<T, E> NullArrayExpect for Result<T, E>
where
    E: Into<NullArrayError>,
{
    type Output = T;

    #[inline(always)]
    fn nullarray_expect(self, msg: &str) -> Self::Output {
        self.map_err(|err| err.into())
            .unwrap_or_else(|e| nullarray_panic!(e.with_context(msg.to_string())))
    }
}

impl<T> NullArrayExpect for Option<T> {
    type Output = T;

    #[inline(always)]
    fn nullarray_expect(self, msg: &str) -> Self::Output {
        self.unwrap_or_else(|| {
            let err = NullArrayError::InvalidArgument(msg.to_string().into(), Backtrace::capture());
            nullarray_panic!(err)
        })
    }
}

/// A convenient macro for creating a NullArrayError.
#[macro_export]
macro_rules! nullarray_err {
    (OutOfBounds: $idx:expr, $start:expr, $stop:expr) => {{
        use std::backtrace::Backtrace;
        $crate::__private::must_use(
            $crate::NullArrayError::OutOfBounds($idx, $start, $stop, Backtrace::capture())
        )
    }};
    (ContainsNulls: $count:expr) => {{
        use std::backtrace::Backtrace;
        $crate::__private::must_use(
            $crate::NullArrayError::ContainsNulls($count, Backtrace::capture())
        )
    }};
    (NotImplemented: $func:expr, $by_whom:expr) => {{
        use std::backtrace::Backtrace;
        $crate::__private::must_use(
            $crate::NullArrayError::NotImplemented($func.into(), format!("{}", $by_whom).into(), Backtrace::capture())
        )
    }};
    (Context: $msg:literal, $err:expr) => {{
        $crate::__private::must_use(
            $crate::NullArrayError::Context($msg.into(), Box::new($err))
        )
    }};
    ($variant:ident: $fmt:literal $(, $arg:expr)* $(,)?) => {{
        use std::backtrace::Backtrace;
        $crate::__private::must_use(
            $crate::NullArrayError::$variant(format!($fmt, $($arg),*).into(), Backtrace::capture())
        )
    }};
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::nullarray_err!(InvalidArgument: $fmt, $($arg),*)
    };
}

/// A convenient macro for returning a NullArrayError.
#[macro_export]
macro_rules! nullarray_bail {
    ($($tt:tt)+) => {
        return Err($crate::nullarray_err!($($tt)+))
    };
}

/// A convenient macro for panicking with a NullArrayError in the presence of a programmer error
/// (e.g., an invariant has been violated).
#[macro_export]
macro_rules! nullarray_panic {
    (OutOfBounds: $idx:expr, $start:expr, $stop:expr) => {{
        $crate::nullarray_panic!($crate::nullarray_err!(OutOfBounds: $idx, $start, $stop))
    }};
    ($variant:ident: $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::nullarray_panic!($crate::nullarray_err!($variant: $fmt, $($arg),*))
    };
    ($err:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {{
        let err: $crate::NullArrayError = $err;
        panic!("{}", err.with_context(format!($fmt, $($arg),*)))
    }};
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::nullarray_panic!($crate::nullarray_err!($fmt, $($arg),*))
    };
    ($err:expr) => {{
        let err: $crate::NullArrayError = $err;
        panic!("{}", err)
    }};
}

#[doc(hidden)]
pub mod __private {
    #[doc(hidden)]
    #[inline]
    #[cold]
    #[must_use]
    pub const fn must_use(error: crate::NullArrayError) -> crate::NullArrayError {
        error
    }
}
