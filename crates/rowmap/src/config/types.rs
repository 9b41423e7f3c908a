//! Mapping file type definitions.

use serde::{Deserialize, Serialize};

use crate::mapping::FieldMemberMapping;

/// Root of a mapping file: the explicit field→member pairs for one loader.
///
/// ```yaml
/// mappings:
///   - field: emp_name
///     member: Name
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingConfig {
    /// Rename pairs. Supplying any pairs switches the loader to explicit mode.
    #[serde(default)]
    pub mappings: Vec<FieldMemberMapping>,
}

impl MappingConfig {
    /// Create a config from rename pairs.
    pub fn new(mappings: Vec<FieldMemberMapping>) -> Self {
        Self { mappings }
    }

    /// The pairs as a slice, ready for [`Loader::with_mappings`](crate::Loader::with_mappings).
    pub fn as_slice(&self) -> &[FieldMemberMapping] {
        &self.mappings
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// Check if the config lists no pairs.
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

impl FromIterator<FieldMemberMapping> for MappingConfig {
    fn from_iter<I: IntoIterator<Item = FieldMemberMapping>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
