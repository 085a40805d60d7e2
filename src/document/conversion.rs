// Author: Dustin Pilgrim
// License: MIT

use crate::datetime::Datetime;
use crate::error::ConversionError;
use crate::value::{Table, Value};

// Conversions are strict: a value converts only into the Rust types of its
// own kind. Integers never become floats and strings are never parsed.

impl<'a> TryFrom<&'a Value> for &'a str {
    type Error = ConversionError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        value.as_str()
    }
}

impl<'a> TryFrom<&'a Value> for String {
    type Error = ConversionError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        value.as_str().map(str::to_string)
    }
}

impl<'a> TryFrom<&'a Value> for i64 {
    type Error = ConversionError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        value.as_integer()
    }
}

macro_rules! narrow_integer {
    ($($target:ty),*) => {
        $(
            impl<'a> TryFrom<&'a Value> for $target {
                type Error = ConversionError;

                fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
                    let n = value.as_integer()?;
                    <$target>::try_from(n).map_err(|_| ConversionError::OutOfRange {
                        value: n,
                        target: stringify!($target),
                    })
                }
            }
        )*
    };
}

narrow_integer!(i32, u8, u16, u32, u64, usize);

impl<'a> TryFrom<&'a Value> for f64 {
    type Error = ConversionError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        value.as_float()
    }
}

impl<'a> TryFrom<&'a Value> for bool {
    type Error = ConversionError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        value.as_bool()
    }
}

impl<'a> TryFrom<&'a Value> for Datetime {
    type Error = ConversionError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        value.as_datetime().copied()
    }
}

/// Each element is converted in turn, so the first element of the wrong
/// kind reports the mismatch. An empty array converts to an empty `Vec`.
impl<'a, T> TryFrom<&'a Value> for Vec<T>
where
    T: TryFrom<&'a Value, Error = ConversionError>,
{
    type Error = ConversionError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        value.as_array()?.iter().map(T::try_from).collect()
    }
}

impl<'a> TryFrom<&'a Value> for &'a [Value] {
    type Error = ConversionError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        value.as_array()
    }
}

impl<'a> TryFrom<&'a Value> for &'a Table {
    type Error = ConversionError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        value.as_table()
    }
}

impl<'a> TryFrom<&'a Value> for Table {
    type Error = ConversionError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        value.as_table().cloned()
    }
}

impl<'a> TryFrom<&'a Value> for Value {
    type Error = ConversionError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        Ok(value.clone())
    }
}
