//! In-memory record cursor.

use tracing::trace;

use crate::core::traits::RecordCursor;
use crate::core::value::{DataType, Value};
use crate::error::{Result, RowMapError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    BeforeFirst,
    On(usize),
    AfterLast,
}

/// A forward-only cursor over rows held in memory.
///
/// Cells are lent to readers without copying text or byte buffers.
///
/// # Example
///
/// ```rust
/// use rowmap::core::{DataType, RecordCursor, Value};
/// use rowmap::source::MemoryCursor;
///
/// let mut cursor = MemoryCursor::new(vec![("name".to_string(), DataType::String)])
///     .with_rows(vec![vec![Value::from("Ann")]])?;
///
/// assert!(cursor.advance()?);
/// assert_eq!(cursor.value(0)?, Value::from("Ann"));
/// assert!(!cursor.advance()?);
/// # Ok::<(), rowmap::RowMapError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MemoryCursor {
    columns: Vec<(String, DataType)>,
    rows: Vec<Vec<Value<'static>>>,
    position: Position,
}

impl MemoryCursor {
    /// Create an empty cursor with the given `(name, type)` columns.
    pub fn new(columns: Vec<(String, DataType)>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            position: Position::BeforeFirst,
        }
    }

    /// Append a row. The row must have one value per column.
    pub fn push_row(&mut self, row: Vec<Value<'static>>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(RowMapError::cursor(format!(
                "row {} has {} values, expected {}",
                self.rows.len() + 1,
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Append several rows, builder style.
    pub fn with_rows(mut self, rows: Vec<Vec<Value<'static>>>) -> Result<Self> {
        for row in rows {
            self.push_row(row)?;
        }
        Ok(self)
    }

    /// Rows not yet reached by [`advance`](RecordCursor::advance).
    pub fn remaining(&self) -> usize {
        match self.position {
            Position::BeforeFirst => self.rows.len(),
            Position::On(idx) => self.rows.len() - idx - 1,
            Position::AfterLast => 0,
        }
    }

    /// True once `advance` has reported the end of the rows.
    pub fn is_exhausted(&self) -> bool {
        self.position == Position::AfterLast
    }

    fn cell(&self, ordinal: usize) -> Result<&Value<'static>> {
        let row = match self.position {
            Position::On(idx) => &self.rows[idx],
            _ => return Err(RowMapError::NoCurrentRow),
        };
        row.get(ordinal).ok_or(RowMapError::OrdinalOutOfRange {
            ordinal,
            count: self.columns.len(),
        })
    }
}

impl RecordCursor for MemoryCursor {
    fn field_count(&self) -> usize {
        self.columns.len()
    }

    fn field_name(&self, ordinal: usize) -> &str {
        &self.columns[ordinal].0
    }

    fn field_type(&self, ordinal: usize) -> DataType {
        self.columns[ordinal].1
    }

    fn advance(&mut self) -> Result<bool> {
        let next = match self.position {
            Position::BeforeFirst => 0,
            Position::On(idx) => idx + 1,
            Position::AfterLast => return Ok(false),
        };
        if next < self.rows.len() {
            trace!("MemoryCursor advanced to row {}", next);
            self.position = Position::On(next);
            Ok(true)
        } else {
            self.position = Position::AfterLast;
            Ok(false)
        }
    }

    fn is_null(&self, ordinal: usize) -> Result<bool> {
        Ok(self.cell(ordinal)?.is_null())
    }

    fn value(&self, ordinal: usize) -> Result<Value<'_>> {
        Ok(self.cell(ordinal)?.as_borrowed())
    }
}
