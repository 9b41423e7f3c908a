//! Core abstractions for projecting cursor rows onto records.
//!
//! This module provides the foundational types and traits used by the
//! mapping engine:
//!
//! - [`value`]: cell values and their declared type tags
//! - [`schema`]: field, member and link descriptors
//! - [`traits`]: the cursor and record capabilities the engine consumes
//! - [`catalog`]: per-type member cache
//!
//! # Architecture
//!
//! The engine never talks to a database directly. A driver exposes its
//! result set through [`RecordCursor`], a target type describes itself
//! through [`Record`], and the components in [`fields`](crate::fields),
//! [`mapping`](crate::mapping), [`materialize`](crate::materialize) and
//! [`loader`](crate::loader) join the two.

pub mod catalog;
pub mod schema;
pub mod traits;
pub mod value;

pub use catalog::{MemberCatalog, MemberSet};
pub use schema::{FieldDescriptor, Link, MemberDescriptor};
pub use traits::{assign_into, FromValue, Record, RecordCursor};
pub use value::{DataType, Value};
