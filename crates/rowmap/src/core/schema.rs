//! Descriptor types for cursor columns, record members and the links
//! resolved between them.

use serde::{Deserialize, Serialize};

use super::value::DataType;

/// Column metadata read from a cursor's schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Column name as reported by the cursor.
    pub name: String,

    /// Ordinal position in the row (0-based).
    pub position: usize,

    /// Declared column type.
    pub data_type: DataType,
}

impl FieldDescriptor {
    /// Create a new field descriptor.
    pub fn new(name: impl Into<String>, position: usize, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            position,
            data_type,
        }
    }
}

/// A named, typed attribute of a record type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberDescriptor {
    /// Member name, passed back verbatim to [`Record::assign`](super::traits::Record::assign).
    pub name: String,

    /// Declared member type.
    pub data_type: DataType,

    /// Whether the loader may write this member.
    pub writable: bool,
}

impl MemberDescriptor {
    /// Create a writable member descriptor.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            writable: true,
        }
    }

    /// Create a descriptor for a member the loader must never write.
    pub fn read_only(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            writable: false,
        }
    }

    /// Create a writable descriptor whose type is taken from a field accessor.
    ///
    /// Used by [`impl_record!`](crate::impl_record) so the declared type
    /// always follows the Rust field type.
    pub fn of<R, T, F>(name: impl Into<String>, _accessor: F) -> Self
    where
        T: super::traits::FromValue,
        F: Fn(&R) -> &T,
    {
        Self::new(name, T::DATA_TYPE)
    }
}

/// A resolved pairing of one member with one field.
///
/// Every link's member is writable and its field position is a valid
/// ordinal for rows read through the cursor it was resolved against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub member: MemberDescriptor,
    pub field: FieldDescriptor,
}

impl Link {
    /// Create a new link.
    pub fn new(member: MemberDescriptor, field: FieldDescriptor) -> Self {
        Self { member, field }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Sample {
        count: i64,
    }

    #[test]
    fn test_member_descriptor_constructors() {
        let m = MemberDescriptor::new("Name", DataType::String);
        assert!(m.writable);

        let ro = MemberDescriptor::read_only("Computed", DataType::I32);
        assert!(!ro.writable);
    }

    #[test]
    fn test_member_descriptor_from_accessor() {
        let m = MemberDescriptor::of("Count", |s: &Sample| &s.count);
        assert_eq!(m.data_type, DataType::I64);
        assert_eq!(m.name, "Count");
        assert_eq!(Sample::default().count, 0);
    }

    #[test]
    fn test_link_equality() {
        let a = Link::new(
            MemberDescriptor::new("Id", DataType::I32),
            FieldDescriptor::new("id", 0, DataType::I32),
        );
        let b = a.clone();
        assert_eq!(a, b);
    }
}
