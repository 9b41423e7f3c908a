//! Cell values and type tags shared by cursors and records.
//!
//! A cursor reports a [`DataType`] per column and hands out [`Value`]s per
//! cell; records accept values through [`FromValue`](super::traits::FromValue).

use std::borrow::Cow;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Declared type of a column or member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Bool,
    I16,
    I32,
    I64,
    F32,
    F64,
    String,
    Bytes,
    Uuid,
    Decimal,
    DateTime,
    DateTimeOffset,
    Date,
    Time,
}

impl DataType {
    /// True for the signed integer tags.
    #[must_use]
    pub fn is_integer(self) -> bool {
        matches!(self, DataType::I16 | DataType::I32 | DataType::I64)
    }
}

/// A single cell read from a cursor row.
///
/// Uses `Cow` for string and byte data so a cursor can lend its row buffer
/// for the duration of one assignment instead of allocating per cell.
///
/// # Example
///
/// ```rust
/// use std::borrow::Cow;
/// use rowmap::core::Value;
///
/// let borrowed: Value<'_> = Value::Text(Cow::Borrowed("hello"));
/// let owned: Value<'static> = borrowed.into_owned();
/// assert!(!owned.is_null());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// The cursor's "no data" marker.
    Null,

    Bool(bool),

    I16(i16),

    I32(i32),

    I64(i64),

    F32(f32),

    F64(f64),

    /// Text data with zero-copy support.
    Text(Cow<'a, str>),

    /// Binary data with zero-copy support.
    Bytes(Cow<'a, [u8]>),

    Uuid(Uuid),

    Decimal(Decimal),

    /// Timestamp without timezone.
    DateTime(NaiveDateTime),

    /// Timestamp with timezone offset.
    DateTimeOffset(DateTime<FixedOffset>),

    Date(NaiveDate),

    Time(NaiveTime),
}

impl<'a> Value<'a> {
    /// Convert to a fully owned value with `'static` lifetime.
    #[must_use]
    pub fn into_owned(self) -> Value<'static> {
        match self {
            Value::Null => Value::Null,
            Value::Bool(v) => Value::Bool(v),
            Value::I16(v) => Value::I16(v),
            Value::I32(v) => Value::I32(v),
            Value::I64(v) => Value::I64(v),
            Value::F32(v) => Value::F32(v),
            Value::F64(v) => Value::F64(v),
            Value::Text(v) => Value::Text(Cow::Owned(v.into_owned())),
            Value::Bytes(v) => Value::Bytes(Cow::Owned(v.into_owned())),
            Value::Uuid(v) => Value::Uuid(v),
            Value::Decimal(v) => Value::Decimal(v),
            Value::DateTime(v) => Value::DateTime(v),
            Value::DateTimeOffset(v) => Value::DateTimeOffset(v),
            Value::Date(v) => Value::Date(v),
            Value::Time(v) => Value::Time(v),
        }
    }

    /// Borrow this value, lending text and byte buffers instead of cloning them.
    #[must_use]
    pub fn as_borrowed(&self) -> Value<'_> {
        match self {
            Value::Text(v) => Value::Text(Cow::Borrowed(v.as_ref())),
            Value::Bytes(v) => Value::Bytes(Cow::Borrowed(v.as_ref())),
            other => other.clone(),
        }
    }

    /// Check if this value is the null marker.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The type tag of this value, or `None` for the null marker.
    #[must_use]
    pub fn data_type(&self) -> Option<DataType> {
        let tag = match self {
            Value::Null => return None,
            Value::Bool(_) => DataType::Bool,
            Value::I16(_) => DataType::I16,
            Value::I32(_) => DataType::I32,
            Value::I64(_) => DataType::I64,
            Value::F32(_) => DataType::F32,
            Value::F64(_) => DataType::F64,
            Value::Text(_) => DataType::String,
            Value::Bytes(_) => DataType::Bytes,
            Value::Uuid(_) => DataType::Uuid,
            Value::Decimal(_) => DataType::Decimal,
            Value::DateTime(_) => DataType::DateTime,
            Value::DateTimeOffset(_) => DataType::DateTimeOffset,
            Value::Date(_) => DataType::Date,
            Value::Time(_) => DataType::Time,
        };
        Some(tag)
    }

    /// Widen any integer variant to `i64`.
    pub(crate) fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I16(v) => Some(i64::from(*v)),
            Value::I32(v) => Some(i64::from(*v)),
            Value::I64(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<bool> for Value<'static> {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i16> for Value<'static> {
    fn from(v: i16) -> Self {
        Value::I16(v)
    }
}

impl From<i32> for Value<'static> {
    fn from(v: i32) -> Self {
        Value::I32(v)
    }
}

impl From<i64> for Value<'static> {
    fn from(v: i64) -> Self {
        Value::I64(v)
    }
}

impl From<f32> for Value<'static> {
    fn from(v: f32) -> Self {
        Value::F32(v)
    }
}

impl From<f64> for Value<'static> {
    fn from(v: f64) -> Self {
        Value::F64(v)
    }
}

impl From<String> for Value<'static> {
    fn from(v: String) -> Self {
        Value::Text(Cow::Owned(v))
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(v: &'a str) -> Self {
        Value::Text(Cow::Borrowed(v))
    }
}

impl From<Vec<u8>> for Value<'static> {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(Cow::Owned(v))
    }
}

impl<'a> From<&'a [u8]> for Value<'a> {
    fn from(v: &'a [u8]) -> Self {
        Value::Bytes(Cow::Borrowed(v))
    }
}

impl From<Uuid> for Value<'static> {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl From<Decimal> for Value<'static> {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<NaiveDateTime> for Value<'static> {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl From<DateTime<FixedOffset>> for Value<'static> {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Value::DateTimeOffset(v)
    }
}

impl From<NaiveDate> for Value<'static> {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveTime> for Value<'static> {
    fn from(v: NaiveTime) -> Self {
        Value::Time(v)
    }
}

impl<'a, T> From<Option<T>> for Value<'a>
where
    T: Into<Value<'a>>,
{
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
