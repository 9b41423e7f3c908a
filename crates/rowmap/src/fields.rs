//! Field catalog: column metadata read from a cursor's schema.
//!
//! [`FieldIter`] walks the cursor's columns lazily in ordinal order. It only
//! touches schema accessors, so the cursor's row position is never moved.
//! Once consumed it cannot be replayed; call [`fields`] again to re-read the
//! current schema.

use std::iter::FusedIterator;

use crate::core::schema::FieldDescriptor;
use crate::core::traits::{Record, RecordCursor};
use crate::loader::Loader;

/// Lazy iterator over a cursor's columns.
#[derive(Debug)]
pub struct FieldIter<'c, C: ?Sized> {
    cursor: &'c C,
    next: usize,
    count: usize,
}

impl<'c, C: RecordCursor + ?Sized> Iterator for FieldIter<'c, C> {
    type Item = FieldDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }
        let ordinal = self.next;
        self.next += 1;
        Some(FieldDescriptor::new(
            self.cursor.field_name(ordinal),
            ordinal,
            self.cursor.field_type(ordinal),
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl<'c, C: RecordCursor + ?Sized> ExactSizeIterator for FieldIter<'c, C> {}

impl<'c, C: RecordCursor + ?Sized> FusedIterator for FieldIter<'c, C> {}

/// Describe every column of `cursor`, in ordinal order.
///
/// The column count is sampled once, when the iterator is created.
pub fn fields<C: RecordCursor + ?Sized>(cursor: &C) -> FieldIter<'_, C> {
    FieldIter {
        cursor,
        next: 0,
        count: cursor.field_count(),
    }
}

/// Column names of `cursor`, in ordinal order.
pub fn field_names<C: RecordCursor + ?Sized>(cursor: &C) -> impl Iterator<Item = &str> + '_ {
    (0..cursor.field_count()).map(move |ordinal| cursor.field_name(ordinal))
}

/// Extension methods available on every [`RecordCursor`].
pub trait CursorExt: RecordCursor {
    /// See [`fields`].
    fn fields(&self) -> FieldIter<'_, Self> {
        fields(self)
    }

    /// See [`field_names`].
    fn field_names(&self) -> Vec<&str> {
        field_names(self).collect()
    }

    /// Build a [`Loader`] for `T` over this cursor using the global member
    /// catalog and name matching.
    fn loader<T: Record>(&mut self) -> Loader<'_, T, Self> {
        Loader::new(self)
    }
}

impl<C: RecordCursor + ?Sized> CursorExt for C {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::{DataType, Value};
    use crate::source::MemoryCursor;

    fn cursor() -> MemoryCursor {
        MemoryCursor::new(vec![
            ("id".to_string(), DataType::I32),
            ("name".to_string(), DataType::String),
            ("active".to_string(), DataType::Bool),
        ])
    }

    #[test]
    fn test_fields_in_ordinal_order() {
        let cursor = cursor();
        let fields: Vec<FieldDescriptor> = cursor.fields().collect();
        assert_eq!(
            fields,
            vec![
                FieldDescriptor::new("id", 0, DataType::I32),
                FieldDescriptor::new("name", 1, DataType::String),
                FieldDescriptor::new("active", 2, DataType::Bool),
            ]
        );
    }

    #[test]
    fn test_fields_exact_size_and_fused() {
        let cursor = cursor();
        let mut iter = fields(&cursor);
        assert_eq!(iter.len(), 3);
        iter.next();
        assert_eq!(iter.len(), 2);
        iter.by_ref().for_each(drop);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_fields_leave_row_position_alone() {
        let mut cursor = cursor();
        cursor
            .push_row(vec![Value::I32(1), Value::from("Ann"), Value::Bool(true)])
            .unwrap();
        assert!(cursor.advance().unwrap());

        let _ = cursor.fields().count();
        assert_eq!(cursor.value(1).unwrap(), Value::from("Ann"));
        assert!(!cursor.advance().unwrap());
    }

    #[test]
    fn test_field_names() {
        let cursor = cursor();
        assert_eq!(CursorExt::field_names(&cursor), vec!["id", "name", "active"]);
    }
}
