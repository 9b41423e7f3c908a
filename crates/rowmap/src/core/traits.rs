//! Core traits at the boundary of the mapping engine.
//!
//! - [`RecordCursor`]: the forward-only, column-typed record source
//! - [`Record`]: a target type that can be populated member by member
//! - [`FromValue`]: coercion of a cell value into a member's Rust type
//!
//! Rust has no runtime reflection, so member discovery is a static
//! registration: a record lists its members once in [`Record::members`]
//! (usually through [`impl_record!`](crate::impl_record)) and the
//! [`MemberCatalog`](super::catalog::MemberCatalog) caches the result.

use std::borrow::Cow;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{AssignError, Result, RowMapError};

use super::schema::MemberDescriptor;
use super::value::{DataType, Value};

/// A forward-only result stream with a fixed, typed column schema.
///
/// Schema accessors take ordinals in `0..field_count()`; implementations
/// may panic outside that range. Cell accessors return
/// [`RowMapError::NoCurrentRow`] when the cursor is not positioned on a row.
pub trait RecordCursor {
    /// Number of columns in the schema.
    fn field_count(&self) -> usize;

    /// Column name at `ordinal`.
    fn field_name(&self, ordinal: usize) -> &str;

    /// Declared column type at `ordinal`.
    fn field_type(&self, ordinal: usize) -> DataType;

    /// Move to the next row. Returns `false` once the stream is exhausted.
    fn advance(&mut self) -> Result<bool>;

    /// Whether the cell at `ordinal` holds the null marker.
    fn is_null(&self, ordinal: usize) -> Result<bool>;

    /// Generic cell read.
    fn value(&self, ordinal: usize) -> Result<Value<'_>>;

    /// Boolean-typed cell read.
    ///
    /// The default accepts booleans, the integers 0 and 1, and the text
    /// forms `true`/`false`/`1`/`0` (case-insensitive).
    fn get_bool(&self, ordinal: usize) -> Result<bool> {
        let value = self.value(ordinal)?;
        let parsed = match &value {
            Value::Bool(b) => Some(*b),
            Value::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            other => match other.as_i64() {
                Some(0) => Some(false),
                Some(1) => Some(true),
                _ => None,
            },
        };
        parsed.ok_or_else(|| mismatch(ordinal, DataType::Bool, &value))
    }

    /// Identifier-typed cell read.
    ///
    /// The default accepts UUID values, parseable text and 16-byte blobs.
    fn get_uuid(&self, ordinal: usize) -> Result<Uuid> {
        let value = self.value(ordinal)?;
        let parsed = match &value {
            Value::Uuid(u) => Some(*u),
            Value::Text(s) => Uuid::parse_str(s.trim()).ok(),
            Value::Bytes(b) => Uuid::from_slice(b).ok(),
            _ => None,
        };
        parsed.ok_or_else(|| mismatch(ordinal, DataType::Uuid, &value))
    }
}

fn mismatch(ordinal: usize, expected: DataType, found: &Value<'_>) -> RowMapError {
    match found.data_type() {
        Some(found) => RowMapError::TypeMismatch {
            ordinal,
            expected,
            found,
        },
        None => RowMapError::cursor(format!("column {} is null", ordinal)),
    }
}

impl<C: RecordCursor + ?Sized> RecordCursor for &mut C {
    fn field_count(&self) -> usize {
        (**self).field_count()
    }

    fn field_name(&self, ordinal: usize) -> &str {
        (**self).field_name(ordinal)
    }

    fn field_type(&self, ordinal: usize) -> DataType {
        (**self).field_type(ordinal)
    }

    fn advance(&mut self) -> Result<bool> {
        (**self).advance()
    }

    fn is_null(&self, ordinal: usize) -> Result<bool> {
        (**self).is_null(ordinal)
    }

    fn value(&self, ordinal: usize) -> Result<Value<'_>> {
        (**self).value(ordinal)
    }

    fn get_bool(&self, ordinal: usize) -> Result<bool> {
        (**self).get_bool(ordinal)
    }

    fn get_uuid(&self, ordinal: usize) -> Result<Uuid> {
        (**self).get_uuid(ordinal)
    }
}

/// A default-constructible target type with named, typed members.
pub trait Record: Default + 'static {
    /// Every member of the type, writable or not.
    ///
    /// Called at most once per type per [`MemberCatalog`](super::catalog::MemberCatalog).
    fn members() -> Vec<MemberDescriptor>;

    /// Write `value` into the member registered as `member`.
    ///
    /// `member` is always a name previously returned by [`Record::members`].
    /// On error the member must be left unchanged.
    fn assign(&mut self, member: &str, value: Value<'_>) -> std::result::Result<(), AssignError>;
}

/// Conversion from a cell value into a member's Rust type.
///
/// Exact type matches always succeed. Integers and floats widen losslessly
/// (`I16` into `i32`/`i64`, `I32` into `i64`, `F32` into `f64`); nothing
/// narrows and nothing crosses between text and numbers.
pub trait FromValue: Sized {
    /// Declared type reported for members of this Rust type.
    const DATA_TYPE: DataType;

    /// Convert a non-null value.
    fn from_value(value: Value<'_>) -> std::result::Result<Self, AssignError>;
}

/// Assign `value` into `slot`, leaving it untouched on failure.
pub fn assign_into<T: FromValue>(
    slot: &mut T,
    value: Value<'_>,
) -> std::result::Result<(), AssignError> {
    *slot = T::from_value(value)?;
    Ok(())
}

fn reject<T: FromValue>(value: &Value<'_>) -> AssignError {
    // Null never reaches a member: the materializer skips it.
    AssignError::mismatch(T::DATA_TYPE, value.data_type().unwrap_or(T::DATA_TYPE))
}

macro_rules! exact_from_value {
    ($($ty:ty => $tag:ident),* $(,)?) => {
        $(
            impl FromValue for $ty {
                const DATA_TYPE: DataType = DataType::$tag;

                fn from_value(value: Value<'_>) -> std::result::Result<Self, AssignError> {
                    match value {
                        Value::$tag(v) => Ok(v),
                        other => Err(reject::<Self>(&other)),
                    }
                }
            }
        )*
    };
}

exact_from_value! {
    bool => Bool,
    i16 => I16,
    Uuid => Uuid,
    Decimal => Decimal,
    NaiveDateTime => DateTime,
    DateTime<FixedOffset> => DateTimeOffset,
    NaiveDate => Date,
    NaiveTime => Time,
}

impl FromValue for i32 {
    const DATA_TYPE: DataType = DataType::I32;

    fn from_value(value: Value<'_>) -> std::result::Result<Self, AssignError> {
        match value {
            Value::I32(v) => Ok(v),
            Value::I16(v) => Ok(i32::from(v)),
            other => Err(reject::<Self>(&other)),
        }
    }
}

impl FromValue for i64 {
    const DATA_TYPE: DataType = DataType::I64;

    fn from_value(value: Value<'_>) -> std::result::Result<Self, AssignError> {
        match value.as_i64() {
            Some(v) => Ok(v),
            None => Err(reject::<Self>(&value)),
        }
    }
}

impl FromValue for f32 {
    const DATA_TYPE: DataType = DataType::F32;

    fn from_value(value: Value<'_>) -> std::result::Result<Self, AssignError> {
        match value {
            Value::F32(v) => Ok(v),
            other => Err(reject::<Self>(&other)),
        }
    }
}

impl FromValue for f64 {
    const DATA_TYPE: DataType = DataType::F64;

    fn from_value(value: Value<'_>) -> std::result::Result<Self, AssignError> {
        match value {
            Value::F64(v) => Ok(v),
            Value::F32(v) => Ok(f64::from(v)),
            other => Err(reject::<Self>(&other)),
        }
    }
}

impl FromValue for String {
    const DATA_TYPE: DataType = DataType::String;

    fn from_value(value: Value<'_>) -> std::result::Result<Self, AssignError> {
        match value {
            Value::Text(s) => Ok(s.into_owned()),
            other => Err(reject::<Self>(&other)),
        }
    }
}

impl FromValue for Vec<u8> {
    const DATA_TYPE: DataType = DataType::Bytes;

    fn from_value(value: Value<'_>) -> std::result::Result<Self, AssignError> {
        match value {
            Value::Bytes(b) => Ok(Cow::into_owned(b)),
            other => Err(reject::<Self>(&other)),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    const DATA_TYPE: DataType = T::DATA_TYPE;

    fn from_value(value: Value<'_>) -> std::result::Result<Self, AssignError> {
        T::from_value(value).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemoryCursor;

    fn one_cell(data_type: DataType, value: Value<'static>) -> MemoryCursor {
        let mut cursor = MemoryCursor::new(vec![("c".to_string(), data_type)]);
        cursor.push_row(vec![value]).unwrap();
        cursor.advance().unwrap();
        cursor
    }

    #[test]
    fn test_get_bool_accepts_bit_and_text() {
        assert!(one_cell(DataType::Bool, Value::Bool(true)).get_bool(0).unwrap());
        assert!(one_cell(DataType::I16, Value::I16(1)).get_bool(0).unwrap());
        assert!(!one_cell(DataType::String, Value::from("False")).get_bool(0).unwrap());
        assert!(one_cell(DataType::String, Value::from("1")).get_bool(0).unwrap());
    }

    #[test]
    fn test_get_bool_rejects_other_values() {
        let err = one_cell(DataType::I32, Value::I32(7)).get_bool(0).unwrap_err();
        assert!(matches!(
            err,
            RowMapError::TypeMismatch {
                expected: DataType::Bool,
                found: DataType::I32,
                ..
            }
        ));
    }

    #[test]
    fn test_get_uuid_accepts_text_and_bytes() {
        let id = Uuid::from_u128(0x1234_5678_9abc_def0_1234_5678_9abc_def0);
        let text = one_cell(DataType::String, Value::from(id.to_string()));
        assert_eq!(text.get_uuid(0).unwrap(), id);

        let bytes = one_cell(DataType::Bytes, Value::from(id.as_bytes().to_vec()));
        assert_eq!(bytes.get_uuid(0).unwrap(), id);

        let bad = one_cell(DataType::String, Value::from("not-a-uuid"));
        assert!(bad.get_uuid(0).is_err());
    }

    #[test]
    fn test_from_value_exact_and_widening() {
        assert_eq!(i32::from_value(Value::I16(5)), Ok(5));
        assert_eq!(i64::from_value(Value::I32(-8)), Ok(-8));
        assert_eq!(f64::from_value(Value::F32(1.5)), Ok(1.5));
        assert_eq!(String::from_value(Value::from("x")), Ok("x".to_string()));
        assert_eq!(Option::<i64>::from_value(Value::I64(3)), Ok(Some(3)));
    }

    #[test]
    fn test_from_value_never_narrows() {
        assert_eq!(
            i16::from_value(Value::I32(5)),
            Err(AssignError::mismatch(DataType::I16, DataType::I32))
        );
        assert_eq!(
            i32::from_value(Value::from("5")),
            Err(AssignError::mismatch(DataType::I32, DataType::String))
        );
    }

    #[test]
    fn test_assign_into_leaves_slot_on_failure() {
        let mut slot = 42i32;
        assert!(assign_into(&mut slot, Value::from("oops")).is_err());
        assert_eq!(slot, 42);

        assign_into(&mut slot, Value::I32(7)).unwrap();
        assert_eq!(slot, 7);
    }
}
