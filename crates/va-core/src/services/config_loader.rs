use std::path::{Path, PathBuf};

use crate::error::{AllocatorError, Result};
use crate::models::AllocatorConfig;

pub const CONFIG_FILENAME: &str = ".volunteer-admit.yaml";

/// Load `.volunteer-admit.yaml` from `dir`, falling back to defaults when the
/// file does not exist.
pub fn load(dir: &Path) -> Result<AllocatorConfig> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(AllocatorConfig::default());
    }
    load_file(&config_path)
}

/// Load an explicitly named config file, which must exist.
pub fn load_file(path: &Path) -> Result<AllocatorConfig> {
    if !path.exists() {
        return Err(AllocatorError::ConfigNotFound(PathBuf::from(path)));
    }
    let contents = std::fs::read_to_string(path)?;
    let config: AllocatorConfig = serde_yaml::from_str(&contents)
        .map_err(|e| AllocatorError::InvalidConfig(e.to_string()))?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &AllocatorConfig) -> Result<()> {
    if config.default_capacity == 0 {
        return Err(AllocatorError::InvalidConfig(
            "default_capacity must be at least 1".into(),
        ));
    }
    if config.output_file.trim().is_empty() {
        return Err(AllocatorError::InvalidConfig(
            "output_file must not be empty".into(),
        ));
    }
    if let Some((field, _)) = config
        .columns
        .all()
        .into_iter()
        .find(|(_, header)| header.trim().is_empty())
    {
        return Err(AllocatorError::InvalidConfig(format!(
            "columns.{field} must not be empty"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn parse_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = r#"
columns:
  name: Name
  student_id: Student ID
  sex: Sex
  contact: Phone
  selections: Selected Times
  window: Admitted Window
  sequence: Order
default_capacity: 8
output_file: roster.xlsx
"#;
        fs::write(dir.path().join(CONFIG_FILENAME), yaml).unwrap();
        let config = load(dir.path()).unwrap();
        assert_eq!(config.columns.student_id, "Student ID");
        assert_eq!(config.columns.selections, "Selected Times");
        assert_eq!(config.default_capacity, 8);
        assert_eq!(config.output_file, "roster.xlsx");
    }

    #[test]
    fn parse_partial_config_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = "default_capacity: 3\ncolumns:\n  contact: 电话\n";
        fs::write(dir.path().join(CONFIG_FILENAME), yaml).unwrap();
        let config = load(dir.path()).unwrap();
        assert_eq!(config.default_capacity, 3);
        assert_eq!(config.columns.contact, "电话");
        assert_eq!(config.columns.name, "姓名");
        assert_eq!(config.output_file, "录取结果.xlsx");
    }

    #[test]
    fn missing_default_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load(dir.path()).unwrap(), AllocatorConfig::default());
    }

    #[test]
    fn missing_explicit_file_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_file(&dir.path().join("custom.yaml")),
            Err(AllocatorError::ConfigNotFound(_))
        ));
    }

    #[test]
    fn zero_capacity_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "default_capacity: 0\n").unwrap();
        assert!(matches!(
            load(dir.path()),
            Err(AllocatorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn unparsable_yaml_is_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "default_capacity: [1, 2\n").unwrap();
        assert!(matches!(
            load(dir.path()),
            Err(AllocatorError::InvalidConfig(_))
        ));
        fs::write(dir.path().join(CONFIG_FILENAME), "default_capacity: lots\n").unwrap();
        assert!(matches!(
            load(dir.path()),
            Err(AllocatorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn blank_column_name_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "columns:\n  window: \"\"\n").unwrap();
        let err = load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("columns.window"));
    }
}
