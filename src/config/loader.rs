//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse configuration text. `.json` files are JSON, everything else TOML.
pub fn parse_config(path: &Path, content: &str) -> Result<ProxyConfig, ConfigError> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let config = if is_json {
        serde_json::from_str(content)?
    } else {
        toml::from_str(content)?
    };

    Ok(config)
}

/// Load and validate configuration from a TOML or JSON file.
pub fn load_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(path, &content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_temp(file_name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}", std::process::id(), file_name));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_toml() {
        let path = write_temp(
            "gate.toml",
            r#"
            [gate]
            name = "wechat"

            [[gate.regex]]
            name = "User-Agent"
            reg = "MicroMessenger"
            "#,
        );

        let config = load_config(&path).unwrap();
        assert_eq!(config.gate.name, "wechat");
        assert_eq!(config.gate.rules[0].name, "User-Agent");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_load_json() {
        let path = write_temp(
            "gate.json",
            r#"{"gate": {"regex": [{"name": "User-Agent", "reg": "curl"}]}}"#,
        );

        let config = load_config(&path).unwrap();
        assert_eq!(config.gate.rules[0].pattern, "curl");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config(Path::new("bad.toml"), "[gate\nname = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));

        let err = parse_config(Path::new("bad.JSON"), "{").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_validation_error_lists_everything() {
        let path = write_temp(
            "invalid.toml",
            r#"
            [timeouts]
            request_secs = 0

            [observability]
            log_level = "loud"
            "#,
        );

        let err = load_config(&path).unwrap_err();
        match &err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().starts_with("Validation failed: timeouts.request_secs"));
        let _ = fs::remove_file(path);
    }
}
