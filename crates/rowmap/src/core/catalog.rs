//! Member catalog: per-type cache of writable record members.
//!
//! The [`MemberCatalog`] is an explicit, injectable registry keyed by
//! [`TypeId`]. Discovery runs through [`Record::members`] the first time a
//! type is requested; every later request returns the shared
//! [`MemberSet`] without re-discovery.
//!
//! Entries are append-only. Concurrent first use of the same type is
//! settled by the map's entry API, so all callers observe one entry.
//! [`MemberCatalog::global`] provides a process-wide instance for callers
//! that do not carry their own.

use std::any::{type_name, TypeId};
use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;
use tracing::debug;

use super::schema::MemberDescriptor;
use super::traits::Record;

/// The writable members of one record type, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSet {
    type_name: &'static str,
    members: Vec<MemberDescriptor>,
    /// Lowercased member names, parallel to `members`.
    keys: Vec<String>,
}

impl MemberSet {
    /// Discover the writable members of `T`.
    ///
    /// Read-only members are dropped; duplicate names (compared
    /// case-insensitively) keep the first declaration.
    pub fn discover<T: Record>() -> Self {
        let mut seen = HashSet::new();
        let mut members = Vec::new();
        let mut keys = Vec::new();
        for member in T::members().into_iter().filter(|m| m.writable) {
            let key = member.name.to_lowercase();
            if seen.insert(key.clone()) {
                members.push(member);
                keys.push(key);
            }
        }

        Self {
            type_name: type_name::<T>(),
            members,
            keys,
        }
    }

    /// Rust type name the set was discovered from.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Members as a slice.
    pub fn as_slice(&self) -> &[MemberDescriptor] {
        &self.members
    }

    /// Find a member by case-insensitive name.
    pub fn find(&self, name: &str) -> Option<&MemberDescriptor> {
        let key = name.to_lowercase();
        self.keys
            .iter()
            .position(|k| *k == key)
            .map(|idx| &self.members[idx])
    }

    /// Number of writable members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the type has no writable members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterate over the members.
    pub fn iter(&self) -> std::slice::Iter<'_, MemberDescriptor> {
        self.members.iter()
    }
}

impl<'a> IntoIterator for &'a MemberSet {
    type Item = &'a MemberDescriptor;
    type IntoIter = std::slice::Iter<'a, MemberDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

/// Concurrent, append-only cache of [`MemberSet`]s keyed by record type.
///
/// # Example
///
/// ```rust
/// use rowmap::core::{DataType, MemberCatalog};
///
/// #[derive(Default)]
/// struct Person {
///     name: String,
/// }
///
/// rowmap::impl_record!(Person { name => "Name" });
///
/// let catalog = MemberCatalog::new();
/// let members = catalog.members::<Person>();
/// assert_eq!(members.len(), 1);
/// assert_eq!(members.as_slice()[0].data_type, DataType::String);
/// assert!(catalog.contains::<Person>());
/// ```
#[derive(Debug, Default)]
pub struct MemberCatalog {
    entries: DashMap<TypeId, Arc<MemberSet>>,
}

impl MemberCatalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide catalog.
    pub fn global() -> &'static MemberCatalog {
        static GLOBAL: OnceLock<MemberCatalog> = OnceLock::new();
        GLOBAL.get_or_init(MemberCatalog::new)
    }

    /// Get the members of `T`, discovering them on first use.
    pub fn members<T: Record>(&self) -> Arc<MemberSet> {
        let key = TypeId::of::<T>();
        if let Some(set) = self.entries.get(&key) {
            return Arc::clone(set.value());
        }

        let entry = self.entries.entry(key).or_insert_with(|| {
            let set = MemberSet::discover::<T>();
            debug!(
                "Discovered {} writable members on {}",
                set.len(),
                set.type_name()
            );
            Arc::new(set)
        });
        Arc::clone(entry.value())
    }

    /// Check whether `T` has already been discovered.
    pub fn contains<T: Record>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Number of cached types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no type has been discovered yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::{DataType, Value};
    use crate::error::AssignError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static DISCOVERIES: AtomicUsize = AtomicUsize::new(0);

    #[derive(Default)]
    struct Counted;

    impl Record for Counted {
        fn members() -> Vec<MemberDescriptor> {
            DISCOVERIES.fetch_add(1, Ordering::SeqCst);
            vec![
                MemberDescriptor::new("Id", DataType::I32),
                MemberDescriptor::read_only("Total", DataType::I64),
                MemberDescriptor::new("ID", DataType::I64),
                MemberDescriptor::new("Name", DataType::String),
            ]
        }

        fn assign(&mut self, member: &str, _value: Value<'_>) -> Result<(), AssignError> {
            Err(AssignError::UnknownMember(member.to_string()))
        }
    }

    #[derive(Default)]
    struct Other;

    impl Record for Other {
        fn members() -> Vec<MemberDescriptor> {
            vec![MemberDescriptor::new("Code", DataType::String)]
        }

        fn assign(&mut self, member: &str, _value: Value<'_>) -> Result<(), AssignError> {
            Err(AssignError::UnknownMember(member.to_string()))
        }
    }

    #[test]
    fn test_discover_filters_read_only_and_duplicates() {
        let set = MemberSet::discover::<Counted>();
        let names: Vec<&str> = set.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Id", "Name"]);
        assert_eq!(set.find("name").map(|m| m.data_type), Some(DataType::String));
        assert_eq!(set.find("ID").map(|m| m.data_type), Some(DataType::I32));
        assert!(set.find("total").is_none());
    }

    #[test]
    fn test_members_cached_per_type() {
        let catalog = MemberCatalog::new();
        assert!(catalog.is_empty());

        let before = DISCOVERIES.load(Ordering::SeqCst);
        let first = catalog.members::<Counted>();
        let second = catalog.members::<Counted>();
        let after = DISCOVERIES.load(Ordering::SeqCst);

        assert!(Arc::ptr_eq(&first, &second));
        // Other tests may discover Counted concurrently on their own catalogs.
        assert!(after - before >= 1);
        assert_eq!(catalog.len(), 1);

        catalog.members::<Other>();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains::<Other>());
    }

    #[test]
    fn test_global_catalog_is_shared() {
        let a = MemberCatalog::global();
        let b = MemberCatalog::global();
        assert!(std::ptr::eq(a, b));
        let set = a.members::<Other>();
        assert!(Arc::ptr_eq(&set, &b.members::<Other>()));
    }
}
