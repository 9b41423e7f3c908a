//! # rowmap
//!
//! Project rows from a forward-only, column-typed record cursor onto typed
//! records, matching columns to members by name.
//!
//! The library provides:
//!
//! - **Field catalog**: ordered column metadata read from a cursor
//! - **Member catalog**: per-type cache of writable record members
//! - **Mapping resolver**: case-insensitive name matching or explicit
//!   field→member renames
//! - **Row materializer**: type-aware assignment with sparse null handling
//!   and per-member diagnostics
//! - **Loader**: single-row and bulk loading over one cursor
//!
//! ## Example
//!
//! ```rust
//! use rowmap::core::{DataType, Value};
//! use rowmap::source::MemoryCursor;
//! use rowmap::{CursorExt, FieldMemberMapping, Loader};
//!
//! #[derive(Debug, Default)]
//! struct Employee {
//!     id: i32,
//!     name: String,
//! }
//!
//! rowmap::impl_record!(Employee { id => "Id", name => "Name" });
//!
//! let mut cursor = MemoryCursor::new(vec![
//!     ("id".to_string(), DataType::I32),
//!     ("emp_name".to_string(), DataType::String),
//! ])
//! .with_rows(vec![vec![Value::I32(7), Value::from("Ann")]])?;
//!
//! let mappings = vec![
//!     FieldMemberMapping::new("id", "Id"),
//!     FieldMemberMapping::new("emp_name", "Name"),
//! ];
//! let employees = Loader::<Employee, _>::with_mappings(&mut cursor, &mappings).collect_all()?;
//! assert_eq!(employees[0].name, "Ann");
//! assert!(cursor.fields().len() == 2);
//! # Ok::<(), rowmap::RowMapError>(())
//! ```

#[macro_use]
mod macros;

pub mod config;
pub mod core;
pub mod error;
pub mod fields;
pub mod loader;
pub mod mapping;
pub mod materialize;
pub mod source;

// Re-exports for convenient access
pub use config::MappingConfig;
pub use crate::core::{
    DataType, FieldDescriptor, Link, MemberCatalog, MemberDescriptor, Record, RecordCursor, Value,
};
pub use error::{AssignError, Result, RowMapError};
pub use fields::CursorExt;
pub use loader::{Loader, LoaderBuilder};
pub use mapping::FieldMemberMapping;
pub use materialize::{AssignmentWarning, RowDiagnostics};
