//! Mapping file validation.
//!
//! Only malformed entries are rejected. Names that match nothing in a
//! particular cursor or record are left to the resolver, which drops them.

use std::collections::HashSet;

use super::MappingConfig;
use crate::error::{Result, RowMapError};

/// Maximum accepted name length.
const MAX_NAME_LENGTH: usize = 128;

fn validate_name(kind: &str, index: usize, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(RowMapError::Config(format!(
            "mappings[{}].{} is required",
            index, kind
        )));
    }
    if name.contains('\0') {
        return Err(RowMapError::Config(format!(
            "mappings[{}].{} contains a null byte: {:?}",
            index, kind, name
        )));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(RowMapError::Config(format!(
            "mappings[{}].{} exceeds {} bytes (got {})",
            index,
            kind,
            MAX_NAME_LENGTH,
            name.len()
        )));
    }
    Ok(())
}

/// Validate the mapping list.
pub fn validate(config: &MappingConfig) -> Result<()> {
    let mut fields = HashSet::new();

    for (index, mapping) in config.mappings.iter().enumerate() {
        validate_name("field", index, &mapping.field)?;
        validate_name("member", index, &mapping.member)?;

        // One resolution per field
        if !fields.insert(mapping.field.to_lowercase()) {
            return Err(RowMapError::Config(format!(
                "mappings[{}]: field '{}' is mapped more than once",
                index, mapping.field
            )));
        }
    }

    Ok(())
}
