//! Record sources bundled with the crate.
//!
//! Database drivers implement [`RecordCursor`](crate::core::RecordCursor)
//! in their own crates. [`MemoryCursor`] serves pre-materialized rows and
//! backs the crate's tests.

mod memory;

pub use memory::MemoryCursor;
