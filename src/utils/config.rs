//! TOML configuration
//!
//! ```toml
//! [convert]
//! inject_stylesheet = false
//! display_containers = ["p", "div"]
//!
//! [pandoc]
//! program = "/opt/pandoc/bin/pandoc"
//! extra_args = ["--reference-doc=template.docx"]
//! ```
//!
//! Missing tables and keys keep their defaults; unknown keys are rejected.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{ConversionError, ConversionResult};
use crate::core::options::ConvertOptions;
use crate::features::pandoc::PandocOptions;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub convert: ConvertOptions,
    pub pandoc: PandocOptions,
}

impl Config {
    pub fn from_toml_str(input: &str) -> ConversionResult<Self> {
        toml::from_str(input).map_err(|e| ConversionError::config(e.to_string()))
    }

    /// Read and parse a config file
    pub fn load(path: impl AsRef<Path>) -> ConversionResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConversionError::config(format!("{}: {}", path.display(), e)))?;
        toml::from_str(&text)
            .map_err(|e| ConversionError::config(format!("{}: {}", path.display(), e)))
    }

    pub fn to_toml_string(&self) -> ConversionResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConversionError::config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_toml_str(
            r#"
            [convert]
            inject_stylesheet = false
            display_containers = ["p", "div"]

            [pandoc]
            extra_args = ["--reference-doc=ref.docx"]
            "#,
        )
        .unwrap();
        assert!(!config.convert.inject_stylesheet);
        assert!(config.convert.normalize_multiscripts);
        assert_eq!(config.convert.display_containers, vec!["p", "div"]);
        assert_eq!(config.pandoc.program, "pandoc");
        assert_eq!(config.pandoc.extra_args, vec!["--reference-doc=ref.docx"]);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = Config::from_toml_str("[convert]\nfancy = true\n").unwrap_err();
        assert!(matches!(err, ConversionError::ConfigError { .. }));
    }

    #[test]
    fn test_round_trip_defaults() {
        let text = Config::default().to_toml_string().unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), Config::default());
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load("/nonexistent/mathdocx.toml").unwrap_err();
        assert!(err.to_string().contains("mathdocx.toml"));
    }
}
