//! Calibration profile parsing
//!
//! TOML is the primary format; JSON is accepted as well.

use contracts::{CalibrationProfile, SensorError};

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML (recommended)
    Toml,
    /// JSON
    Json,
}

impl ConfigFormat {
    /// Infer format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parse a TOML profile
pub fn parse_toml(content: &str) -> Result<CalibrationProfile, SensorError> {
    toml::from_str(content).map_err(|e| SensorError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse a JSON profile
pub fn parse_json(content: &str) -> Result<CalibrationProfile, SensorError> {
    serde_json::from_str(content).map_err(|e| SensorError::ConfigParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse according to format
pub fn parse(content: &str, format: ConfigFormat) -> Result<CalibrationProfile, SensorError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml_minimal() {
        let content = r#"
model = "vlp16"
range_resolution = 0.002
minimum_range = 0.5
base_to_fire_height = 0.0
elevations = [-0.2618, 0.0, 0.2618]
"#;
        let result = parse_toml(content);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let profile = result.unwrap();
        assert_eq!(profile.model, "vlp16");
        assert_eq!(profile.minimum_range, 0.5);
        assert_eq!(profile.elevations.len(), 3);
    }

    #[test]
    fn test_parse_empty_toml_uses_hdl32e() {
        let profile = parse_toml("").unwrap();
        assert_eq!(profile, CalibrationProfile::default());
    }

    #[test]
    fn test_parse_json_minimal() {
        let content = r#"{
            "model": "hdl32e",
            "base_to_fire_height": 0.1,
            "elevations": [0.0, 0.1]
        }"#;
        let profile = parse_json(content).unwrap();
        assert_eq!(profile.base_to_fire_height, 0.1);
        assert_eq!(profile.elevations, vec![0.0, 0.1]);
        assert_eq!(profile.minimum_range, 1.0);
    }

    #[test]
    fn test_parse_toml_syntax_error() {
        let content = "invalid toml [[[";
        let result = parse_toml(content);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, SensorError::ConfigParse { .. }));
    }

    #[test]
    fn test_parse_wrong_type() {
        let result = parse_toml("elevations = \"up\"");
        assert!(matches!(result, Err(SensorError::ConfigParse { .. })));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_extension("toml"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("TOML"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("json"),
            Some(ConfigFormat::Json)
        );
        assert_eq!(ConfigFormat::from_extension("yaml"), None);
    }
}
