//! Loader facade: binds a cursor to the resolved links of one record type.
//!
//! Links are resolved once, when the loader is built, and reused for every
//! row. The loader borrows the cursor and never closes or drops it.

use std::marker::PhantomData;

use tracing::debug;

use crate::core::catalog::{MemberCatalog, MemberSet};
use crate::core::schema::{FieldDescriptor, Link};
use crate::core::traits::{Record, RecordCursor};
use crate::error::Result;
use crate::fields::fields;
use crate::mapping::{resolve_links, FieldMemberMapping};
use crate::materialize::{materialize, AssignmentWarning, RowDiagnostics};

/// Loads cursor rows into records of type `T`.
///
/// # Example
///
/// ```rust
/// use rowmap::core::{DataType, Value};
/// use rowmap::source::MemoryCursor;
/// use rowmap::Loader;
///
/// #[derive(Debug, Default)]
/// struct Person {
///     id: i32,
///     name: String,
/// }
///
/// rowmap::impl_record!(Person { id => "Id", name => "Name" });
///
/// let mut cursor = MemoryCursor::new(vec![
///     ("id".to_string(), DataType::I32),
///     ("name".to_string(), DataType::String),
/// ])
/// .with_rows(vec![
///     vec![Value::I32(1), Value::from("Ann")],
///     vec![Value::I32(2), Value::from("Bob")],
/// ])?;
///
/// let mut people: Vec<Person> = Vec::new();
/// Loader::<Person, _>::new(&mut cursor).load_all(&mut people)?;
/// assert_eq!(people.len(), 2);
/// assert_eq!(people[1].name, "Bob");
/// # Ok::<(), rowmap::RowMapError>(())
/// ```
pub struct Loader<'c, T, C: ?Sized> {
    cursor: &'c mut C,
    links: Vec<Link>,
    rows_loaded: u64,
    keep_warnings: bool,
    warnings: Vec<AssignmentWarning>,
    _record: PhantomData<fn() -> T>,
}

impl<'c, T, C> Loader<'c, T, C>
where
    T: Record,
    C: RecordCursor + ?Sized,
{
    /// Build a loader using the global member catalog and name matching.
    pub fn new(cursor: &'c mut C) -> Self {
        Self::builder(cursor).build()
    }

    /// Build a loader using `catalog` and name matching.
    pub fn with_catalog(cursor: &'c mut C, catalog: &MemberCatalog) -> Self {
        Self::builder(cursor).catalog(catalog).build()
    }

    /// Build a loader using the global member catalog and explicit mappings.
    pub fn with_mappings(cursor: &'c mut C, mappings: &[FieldMemberMapping]) -> Self {
        Self::builder(cursor).mappings(mappings).build()
    }

    /// Start configuring a loader.
    pub fn builder(cursor: &'c mut C) -> LoaderBuilder<'c, 'static, T, C> {
        LoaderBuilder {
            cursor,
            catalog: MemberCatalog::global(),
            mappings: None,
            keep_warnings: false,
            _record: PhantomData,
        }
    }

    fn from_parts(
        cursor: &'c mut C,
        members: &MemberSet,
        mappings: Option<&[FieldMemberMapping]>,
        keep_warnings: bool,
    ) -> Self {
        let schema: Vec<FieldDescriptor> = fields(&*cursor).collect();
        let links = resolve_links(&schema, members.as_slice(), mappings);
        debug!(
            "Loader for {} bound to {} of {} columns",
            members.type_name(),
            links.len(),
            schema.len()
        );

        Self {
            cursor,
            links,
            rows_loaded: 0,
            keep_warnings,
            warnings: Vec::new(),
            _record: PhantomData,
        }
    }

    /// The resolved links, in application order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Advance the bound cursor by one row.
    pub fn advance(&mut self) -> Result<bool> {
        self.cursor.advance()
    }

    /// The bound cursor.
    pub fn cursor(&self) -> &C {
        &*self.cursor
    }

    /// Materialize the current row into a new default record.
    ///
    /// The cursor must already be positioned on a row.
    pub fn load_one(&mut self) -> Result<T> {
        let mut record = T::default();
        self.load_into(&mut record)?;
        Ok(record)
    }

    /// Materialize the current row into `record`, leaving members whose
    /// cells are null untouched.
    pub fn load_into<'r>(&mut self, record: &'r mut T) -> Result<&'r mut T> {
        self.load_with_diagnostics(record)?;
        Ok(record)
    }

    /// Like [`load_into`](Self::load_into), also returning the row's
    /// diagnostics. Warnings are also recorded on the loader when it was
    /// built with [`keep_warnings`](LoaderBuilder::keep_warnings).
    pub fn load_with_diagnostics(&mut self, record: &mut T) -> Result<RowDiagnostics> {
        let mut diagnostics = materialize(&*self.cursor, &self.links, record)?;
        self.rows_loaded += 1;
        for warning in &mut diagnostics.warnings {
            warning.row = self.rows_loaded;
        }
        if self.keep_warnings {
            self.warnings.extend(diagnostics.warnings.iter().cloned());
        }
        Ok(diagnostics)
    }

    /// Advance through every remaining row, appending one new record per
    /// row to `items`. Returns `items` for chaining.
    ///
    /// The cursor is exhausted on success. Assignment warnings are only
    /// retained when the loader was built with
    /// [`keep_warnings`](LoaderBuilder::keep_warnings); otherwise they are
    /// logged at debug level and dropped.
    pub fn load_all<'i, E>(&mut self, items: &'i mut E) -> Result<&'i mut E>
    where
        E: Extend<T>,
    {
        let start = self.rows_loaded;
        while self.cursor.advance()? {
            let record = self.load_one()?;
            items.extend(std::iter::once(record));
        }
        debug!("Loaded {} rows", self.rows_loaded - start);
        Ok(items)
    }

    /// Load every remaining row into a new `Vec`.
    pub fn collect_all(&mut self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        self.load_all(&mut items)?;
        Ok(items)
    }

    /// Rows materialized through this loader.
    pub fn rows_loaded(&self) -> u64 {
        self.rows_loaded
    }

    /// Assignment warnings recorded so far. Always empty unless the loader
    /// was built with [`keep_warnings`](LoaderBuilder::keep_warnings).
    pub fn warnings(&self) -> &[AssignmentWarning] {
        &self.warnings
    }

    /// Drain the recorded assignment warnings.
    pub fn take_warnings(&mut self) -> Vec<AssignmentWarning> {
        std::mem::take(&mut self.warnings)
    }
}

/// Configures the member catalog and mappings of a [`Loader`].
pub struct LoaderBuilder<'c, 'm, T, C: ?Sized> {
    cursor: &'c mut C,
    catalog: &'m MemberCatalog,
    mappings: Option<&'m [FieldMemberMapping]>,
    keep_warnings: bool,
    _record: PhantomData<fn() -> T>,
}

impl<'c, 'm, T, C> LoaderBuilder<'c, 'm, T, C>
where
    T: Record,
    C: RecordCursor + ?Sized,
{
    /// Use `catalog` instead of the global one.
    pub fn catalog<'n>(self, catalog: &'n MemberCatalog) -> LoaderBuilder<'c, 'n, T, C>
    where
        'm: 'n,
    {
        LoaderBuilder {
            cursor: self.cursor,
            catalog,
            mappings: self.mappings,
            keep_warnings: self.keep_warnings,
            _record: PhantomData,
        }
    }

    /// Resolve links from explicit field→member pairs only.
    pub fn mappings<'n>(self, mappings: &'n [FieldMemberMapping]) -> LoaderBuilder<'c, 'n, T, C>
    where
        'm: 'n,
    {
        LoaderBuilder {
            cursor: self.cursor,
            catalog: self.catalog,
            mappings: Some(mappings),
            keep_warnings: self.keep_warnings,
            _record: PhantomData,
        }
    }

    /// Retain every row's assignment warnings on the loader.
    ///
    /// Off by default: a bulk load over a column that never converts would
    /// otherwise hold one warning per row.
    pub fn keep_warnings(mut self, keep: bool) -> Self {
        self.keep_warnings = keep;
        self
    }

    /// Resolve links and bind the cursor.
    pub fn build(self) -> Loader<'c, T, C> {
        let members = self.catalog.members::<T>();
        Loader::from_parts(self.cursor, &members, self.mappings, self.keep_warnings)
    }
}
