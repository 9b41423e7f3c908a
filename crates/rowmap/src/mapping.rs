//! Mapping resolver: joins cursor fields with record members.
//!
//! Two mutually exclusive modes:
//!
//! - **Name matching** (no mappings supplied): a field links to the member
//!   with the same name, compared case-insensitively.
//! - **Explicit mappings**: only the supplied field→member pairs are
//!   considered. Name matching is not applied on top of them, so a field
//!   left out of the mapping list stays unlinked even when a member shares
//!   its name.
//!
//! Resolution is tolerant in both modes. Fields without a member, members
//! without a field, and mapping entries naming an unknown field or member
//! are dropped without error.
//!
//! Links are emitted in field (ordinal) order.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::schema::{FieldDescriptor, Link, MemberDescriptor};

/// An explicit rename pair: the cursor field `field` populates the record
/// member `member`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldMemberMapping {
    /// Cursor column name.
    pub field: String,

    /// Record member name.
    pub member: String,
}

impl FieldMemberMapping {
    /// Create a new mapping pair.
    pub fn new(field: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            member: member.into(),
        }
    }
}

impl<F: Into<String>, M: Into<String>> From<(F, M)> for FieldMemberMapping {
    fn from((field, member): (F, M)) -> Self {
        Self::new(field, member)
    }
}

fn fold(name: &str) -> String {
    name.to_lowercase()
}

/// Resolve the ordered link list for one cursor schema and one record type.
///
/// `members` must already be restricted to writable members. An empty
/// mapping slice still selects explicit mode and yields no links. When
/// several pairs name the same field, the first pair whose member resolves
/// is used.
///
/// # Example
///
/// ```rust
/// use rowmap::core::{DataType, FieldDescriptor, MemberDescriptor};
/// use rowmap::mapping::{resolve_links, FieldMemberMapping};
///
/// let fields = vec![FieldDescriptor::new("emp_name", 0, DataType::String)];
/// let members = vec![MemberDescriptor::new("Name", DataType::String)];
///
/// assert!(resolve_links(&fields, &members, None).is_empty());
///
/// let mappings = vec![FieldMemberMapping::new("EMP_NAME", "name")];
/// let links = resolve_links(&fields, &members, Some(mappings.as_slice()));
/// assert_eq!(links.len(), 1);
/// assert_eq!(links[0].member.name, "Name");
/// ```
pub fn resolve_links(
    fields: &[FieldDescriptor],
    members: &[MemberDescriptor],
    mappings: Option<&[FieldMemberMapping]>,
) -> Vec<Link> {
    let member_keys: Vec<String> = members.iter().map(|m| fold(&m.name)).collect();
    let find_member = |name: &str| {
        let key = fold(name);
        member_keys
            .iter()
            .position(|k| *k == key)
            .map(|idx| &members[idx])
    };

    let links: Vec<Link> = match mappings {
        None => fields
            .iter()
            .filter_map(|field| match find_member(&field.name) {
                Some(member) => Some(Link::new(member.clone(), field.clone())),
                None => {
                    debug!("Field '{}' has no matching member", field.name);
                    None
                }
            })
            .collect(),
        Some(mappings) => {
            let field_keys: Vec<String> = fields.iter().map(|f| fold(&f.name)).collect();
            let mapping_keys: Vec<String> = mappings.iter().map(|m| fold(&m.field)).collect();
            for (mapping, key) in mappings.iter().zip(&mapping_keys) {
                if !field_keys.contains(key) {
                    debug!(
                        "Mapping '{}' -> '{}' names no cursor field; ignored",
                        mapping.field, mapping.member
                    );
                } else if find_member(&mapping.member).is_none() {
                    debug!(
                        "Mapping '{}' -> '{}' names no writable member; ignored",
                        mapping.field, mapping.member
                    );
                }
            }

            // A field takes the first of its pairs whose member resolves.
            fields
                .iter()
                .zip(&field_keys)
                .filter_map(|(field, key)| {
                    mappings
                        .iter()
                        .zip(&mapping_keys)
                        .filter(|(_, k)| *k == key)
                        .find_map(|(mapping, _)| find_member(&mapping.member))
                        .map(|member| Link::new(member.clone(), field.clone()))
                })
                .collect()
        }
    };

    for member in members {
        if !links.iter().any(|l| l.member.name == member.name) {
            debug!("Member '{}' has no matching field", member.name);
        }
    }
    for link in &links {
        trace!(
            "Linked field '{}' (#{}) -> member '{}'",
            link.field.name,
            link.field.position,
            link.member.name
        );
    }
    debug!(
        "Resolved {} links from {} fields and {} members ({})",
        links.len(),
        fields.len(),
        members.len(),
        if mappings.is_some() { "explicit mappings" } else { "name matching" }
    );

    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::DataType;

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("id", 0, DataType::I32),
            FieldDescriptor::new("emp_name", 1, DataType::String),
            FieldDescriptor::new("ACTIVE", 2, DataType::Bool),
            FieldDescriptor::new("extra", 3, DataType::String),
        ]
    }

    fn members() -> Vec<MemberDescriptor> {
        vec![
            MemberDescriptor::new("Active", DataType::Bool),
            MemberDescriptor::new("Id", DataType::I32),
            MemberDescriptor::new("Name", DataType::String),
            MemberDescriptor::new("Unused", DataType::I64),
        ]
    }

    fn pairs(links: &[Link]) -> Vec<(&str, &str)> {
        links
            .iter()
            .map(|l| (l.field.name.as_str(), l.member.name.as_str()))
            .collect()
    }

    #[test]
    fn test_name_matching_is_case_insensitive() {
        let links = resolve_links(&fields(), &members(), None);
        assert_eq!(pairs(&links), vec![("id", "Id"), ("ACTIVE", "Active")]);
    }

    #[test]
    fn test_explicit_mapping_links_renamed_field() {
        let mappings = vec![FieldMemberMapping::new("Emp_Name", "NAME")];
        let links = resolve_links(&fields(), &members(), Some(mappings.as_slice()));
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].field, FieldDescriptor::new("emp_name", 1, DataType::String));
        assert_eq!(links[0].member, MemberDescriptor::new("Name", DataType::String));
    }

    #[test]
    fn test_explicit_mappings_replace_name_matching() {
        // "id" would match by name, but explicit mode only honours pairs.
        let mappings = vec![FieldMemberMapping::new("emp_name", "Name")];
        let links = resolve_links(&fields(), &members(), Some(mappings.as_slice()));
        assert_eq!(pairs(&links), vec![("emp_name", "Name")]);

        let none = resolve_links(&fields(), &members(), Some(&[][..]));
        assert!(none.is_empty());
    }

    #[test]
    fn test_unmatched_mapping_entries_are_ignored() {
        let mappings = vec![
            FieldMemberMapping::new("missing_field", "Name"),
            FieldMemberMapping::new("extra", "MissingMember"),
            FieldMemberMapping::new("id", "Id"),
        ];
        let links = resolve_links(&fields(), &members(), Some(mappings.as_slice()));
        assert_eq!(pairs(&links), vec![("id", "Id")]);
    }

    #[test]
    fn test_links_follow_field_order() {
        let mappings = vec![
            FieldMemberMapping::new("active", "Active"),
            FieldMemberMapping::new("id", "Id"),
        ];
        let links = resolve_links(&fields(), &members(), Some(mappings.as_slice()));
        assert_eq!(pairs(&links), vec![("id", "Id"), ("ACTIVE", "Active")]);
    }

    #[test]
    fn test_first_mapping_for_a_field_wins() {
        let mappings = vec![
            FieldMemberMapping::new("emp_name", "Name"),
            FieldMemberMapping::new("EMP_NAME", "Unused"),
        ];
        let links = resolve_links(&fields(), &members(), Some(mappings.as_slice()));
        assert_eq!(pairs(&links), vec![("emp_name", "Name")]);
    }

    #[test]
    fn test_unresolved_pair_does_not_shadow_later_pair() {
        let mappings = vec![
            FieldMemberMapping::new("emp_name", "Missing"),
            FieldMemberMapping::new("emp_name", "Name"),
        ];
        let links = resolve_links(&fields(), &members(), Some(mappings.as_slice()));
        assert_eq!(pairs(&links), vec![("emp_name", "Name")]);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let mappings: Vec<FieldMemberMapping> =
            vec![("emp_name", "Name").into(), ("id", "Id").into()];
        let a = resolve_links(&fields(), &members(), Some(mappings.as_slice()));
        let b = resolve_links(&fields(), &members(), Some(mappings.as_slice()));
        assert_eq!(a, b);
    }
}
