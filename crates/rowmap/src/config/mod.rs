//! Mapping file loading and validation.

mod types;
mod validation;

pub use types::*;

use crate::error::Result;
use std::path::Path;

impl MappingConfig {
    /// Load a mapping list from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a mapping list from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: MappingConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the mapping list back to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate the mapping list.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RowMapError;
    use crate::mapping::FieldMemberMapping;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
mappings:
  - field: emp_name
    member: Name
  - field: emp_id
    member: Id
"#;

    #[test]
    fn test_from_yaml() {
        let config = MappingConfig::from_yaml(SAMPLE).unwrap();
        assert_eq!(
            config.mappings,
            vec![
                FieldMemberMapping::new("emp_name", "Name"),
                FieldMemberMapping::new("emp_id", "Id"),
            ]
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = MappingConfig::load(file.path()).unwrap();
        assert_eq!(config.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = MappingConfig::load("/nonexistent/rowmap/mapping.yaml").unwrap_err();
        assert!(matches!(err, RowMapError::Io(_)));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = MappingConfig::from_yaml("mappings: [field: 1").unwrap_err();
        assert!(matches!(err, RowMapError::Yaml(_)));
    }

    #[test]
    fn test_empty_document_has_no_mappings() {
        let config = MappingConfig::from_yaml("{}").unwrap();
        assert!(config.is_empty());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = MappingConfig::from_yaml(SAMPLE).unwrap();
        let reparsed = MappingConfig::from_yaml(&config.to_yaml().unwrap()).unwrap();
        assert_eq!(config, reparsed);
    }
}
