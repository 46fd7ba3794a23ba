//! Configuration structures shared by the CLI and WASM front ends.

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

/// Main configuration for invscan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvscanConfig {
    /// Image preprocessing applied before OCR.
    pub preprocess: PreprocessConfig,

    /// Defaults for newly created invoice drafts.
    pub draft: DraftConfig,

    /// Output formatting.
    pub output: OutputConfig,
}

/// Image preprocessing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Convert to grayscale.
    pub grayscale: bool,

    /// Stretch the intensity range to the full 0-255 span.
    pub contrast_stretch: bool,

    /// Binarize to pure black and white.
    pub binarize: bool,

    /// Fixed binarization threshold. `None` picks one with Otsu's method.
    pub threshold: Option<u8>,

    /// Maximum image dimension (longer side); larger images are downscaled.
    pub max_image_size: u32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            grayscale: true,
            contrast_stretch: true,
            binarize: true,
            threshold: None,
            max_image_size: 2048,
        }
    }
}

/// Defaults applied to new invoice drafts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftConfig {
    /// Currency code.
    pub currency: String,

    /// Days between invoice date and due date.
    pub due_in_days: u32,

    /// Tax rate in percent.
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_rate: Decimal,

    /// Prefix for generated invoice numbers.
    pub number_prefix: String,
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            due_in_days: 30,
            tax_rate: Decimal::ZERO,
            number_prefix: "INV".to_string(),
        }
    }
}

/// Output format for extraction results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
    Text,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format.
    pub format: OutputFormat,

    /// Print per-field confidence after the result.
    pub show_confidence: bool,

    /// Print the recognized text when nothing could be extracted.
    pub show_raw_text_on_empty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            show_confidence: false,
            show_raw_text_on_empty: true,
        }
    }
}

impl InvscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = serde_json::from_str(&content)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise return defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            debug!("No configuration at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// Look up a dotted key (e.g. `draft.currency`).
    pub fn get_key(&self, key: &str) -> Result<serde_json::Value, ConfigError> {
        let json = serde_json::to_value(self)?;
        let mut current = &json;

        for part in key.split('.') {
            current = current
                .get(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Ok(current.clone())
    }

    /// Set a dotted key. Values that parse as JSON are used as-is, anything
    /// else is stored as a string.
    pub fn set_key(&mut self, key: &str, value: &str) -> Result<serde_json::Value, ConfigError> {
        let parsed: serde_json::Value = serde_json::from_str(value)
            .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));

        let mut json = serde_json::to_value(&*self)?;
        let parts: Vec<&str> = key.split('.').collect();
        let (last, parents) = parts
            .split_last()
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

        let mut current = &mut json;
        for part in parents {
            current = current
                .get_mut(*part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        match current.as_object_mut() {
            Some(obj) if obj.contains_key(*last) => {
                obj.insert((*last).to_string(), parsed.clone());
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }

        *self = serde_json::from_value(json)?;
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = InvscanConfig::default();
        assert_eq!(config.draft.currency, "USD");
        assert_eq!(config.draft.due_in_days, 30);
        assert_eq!(config.preprocess.threshold, None);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: InvscanConfig =
            serde_json::from_str(r#"{ "draft": { "currency": "EUR" } }"#).unwrap();
        assert_eq!(config.draft.currency, "EUR");
        assert_eq!(config.draft.number_prefix, "INV");
        assert!(config.preprocess.binarize);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = InvscanConfig::default();
        config.output.format = OutputFormat::Text;
        config.preprocess.threshold = Some(140);
        config.save(&path).unwrap();

        let loaded = InvscanConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(InvscanConfig::load_or_default(&path).unwrap(), config);
        assert_eq!(
            InvscanConfig::load_or_default(&dir.path().join("missing.json")).unwrap(),
            InvscanConfig::default()
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = InvscanConfig::from_file(Path::new("/nonexistent/invscan.json"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_get_and_set_key() {
        let mut config = InvscanConfig::default();

        assert_eq!(config.get_key("draft.currency").unwrap(), "USD");

        config.set_key("draft.currency", "GBP").unwrap();
        config.set_key("draft.due_in_days", "14").unwrap();
        config.set_key("output.format", "csv").unwrap();

        assert_eq!(config.draft.currency, "GBP");
        assert_eq!(config.draft.due_in_days, 14);
        assert_eq!(config.output.format, OutputFormat::Csv);
    }

    #[test]
    fn test_unknown_key() {
        let mut config = InvscanConfig::default();
        assert!(matches!(
            config.get_key("draft.nope"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            config.set_key("nope.currency", "EUR"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_set_key_rejects_wrong_type() {
        let mut config = InvscanConfig::default();
        assert!(matches!(
            config.set_key("draft.due_in_days", "soon"),
            Err(ConfigError::Parse(_))
        ));
        assert_eq!(config.draft.due_in_days, 30);
    }
}
