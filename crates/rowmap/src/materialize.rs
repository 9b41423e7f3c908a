//! Row materializer: writes one cursor row into a record through its links.
//!
//! # Sparse updates
//!
//! A cell holding the cursor's null marker is skipped: the linked member
//! keeps whatever value it already had, either its default or the value of
//! the record being updated. Null never clears a member.
//!
//! # Coercion
//!
//! - Fields declared [`DataType::Bool`] are read with
//!   [`RecordCursor::get_bool`].
//! - Members declared [`DataType::Uuid`] are read with
//!   [`RecordCursor::get_uuid`].
//! - Everything else goes through [`RecordCursor::value`] and
//!   [`Record::assign`].
//!
//! A value the member cannot accept is not fatal. The member is left
//! unchanged and the failure is reported in [`RowDiagnostics`]. Cursor
//! failures other than a typed-accessor mismatch abort the row.

use serde::Serialize;
use tracing::debug;

use crate::core::schema::Link;
use crate::core::traits::{Record, RecordCursor};
use crate::core::value::{DataType, Value};
use crate::error::{AssignError, Result, RowMapError};

/// One member that could not be written for one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentWarning {
    /// 1-based row number within the loader, 0 when materialized directly.
    pub row: u64,

    /// Member that was left unchanged.
    pub member: String,

    /// Field the value was read from.
    pub field: String,

    /// Ordinal of that field.
    pub position: usize,

    pub error: AssignError,
}

/// Per-row outcome of a materialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RowDiagnostics {
    /// Members written from this row.
    pub assigned: usize,

    /// Members skipped because the cell held the null marker.
    pub skipped_null: usize,

    /// Members whose assignment failed.
    pub warnings: Vec<AssignmentWarning>,
}

impl RowDiagnostics {
    /// True when no assignment failed.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Populate `target` from the cursor's current row.
///
/// Links are applied in order. Returns the diagnostics for the row; the
/// caller may inspect or discard them.
pub fn materialize<C, T>(cursor: &C, links: &[Link], target: &mut T) -> Result<RowDiagnostics>
where
    C: RecordCursor + ?Sized,
    T: Record,
{
    let mut diagnostics = RowDiagnostics::default();

    for link in links {
        let pos = link.field.position;

        if cursor.is_null(pos)? {
            diagnostics.skipped_null += 1;
            continue;
        }

        let outcome = match read_linked(cursor, link) {
            Ok(value) => target.assign(&link.member.name, value),
            Err(RowMapError::TypeMismatch {
                expected, found, ..
            }) => Err(AssignError::mismatch(expected, found)),
            Err(e) => return Err(e),
        };

        match outcome {
            Ok(()) => diagnostics.assigned += 1,
            Err(error) => {
                debug!(
                    "Could not assign field '{}' to member '{}': {}",
                    link.field.name, link.member.name, error
                );
                diagnostics.warnings.push(AssignmentWarning {
                    row: 0,
                    member: link.member.name.clone(),
                    field: link.field.name.clone(),
                    position: pos,
                    error,
                });
            }
        }
    }

    Ok(diagnostics)
}

fn read_linked<'c, C: RecordCursor + ?Sized>(cursor: &'c C, link: &Link) -> Result<Value<'c>> {
    let pos = link.field.position;
    if link.field.data_type == DataType::Bool {
        Ok(Value::Bool(cursor.get_bool(pos)?))
    } else if link.member.data_type == DataType::Uuid {
        Ok(Value::Uuid(cursor.get_uuid(pos)?))
    } else {
        cursor.value(pos)
    }
}
