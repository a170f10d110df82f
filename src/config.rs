//! Filter configuration.
//!
//! [`SobelConfig`] is immutable for the duration of one filter call and may be
//! swapped between calls. It deserializes from JSON with every field optional.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Output quantization policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SobelConfig {
    /// Min-max normalize magnitudes instead of saturating them at 255
    pub use_quantization: bool,
    /// Number of levels the magnitude range maps onto (practical range 1..=255)
    pub quantization_levels: u8,
    /// Rescale the quantized levels to the full 0..=255 range
    pub normalize_output: bool,
}

impl Default for SobelConfig {
    fn default() -> Self {
        Self {
            use_quantization: true,
            quantization_levels: 64,
            normalize_output: true,
        }
    }
}

impl SobelConfig {
    pub const fn new(use_quantization: bool, quantization_levels: u8, normalize_output: bool) -> Self {
        Self {
            use_quantization,
            quantization_levels,
            normalize_output,
        }
    }

    /// Saturating output with no normalization.
    pub const fn clamp_only() -> Self {
        Self::new(false, 255, false)
    }

    #[must_use]
    pub const fn with_quantization(mut self, enabled: bool) -> Self {
        self.use_quantization = enabled;
        self
    }

    #[must_use]
    pub const fn with_levels(mut self, levels: u8) -> Self {
        self.quantization_levels = levels;
        self
    }

    #[must_use]
    pub const fn with_normalization(mut self, enabled: bool) -> Self {
        self.normalize_output = enabled;
        self
    }

    /// # Errors
    ///
    /// * `ConfigError::InvalidLevels` - quantization is enabled with zero levels
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.use_quantization && self.quantization_levels == 0 {
            return Err(ConfigError::InvalidLevels(self.quantization_levels));
        }
        Ok(())
    }
}

/// Code path requested for the buffer-managed filter.
///
/// Every level currently computes through the scalar kernels, so the choice
/// never changes output bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizationLevel {
    Scalar,
    Sse,
    Avx2,
    #[default]
    Auto,
}

impl OptimizationLevel {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scalar => "Scalar",
            Self::Sse => "SSE",
            Self::Avx2 => "AVX2",
            Self::Auto => "Auto",
        }
    }
}

/// Settings file read by the command-line front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    pub sobel: SobelConfig,
    pub optimization: OptimizationLevel,
}

/// Reads and validates [`FilterSettings`] from a JSON file.
///
/// # Errors
///
/// * `ConfigError::Read` - the file cannot be read
/// * `ConfigError::Parse` - the content is not valid settings JSON
/// * `ConfigError::InvalidLevels` - see [`SobelConfig::validate`]
pub fn load_config(path: &Path) -> Result<FilterSettings, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let settings: FilterSettings =
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    settings.sobel.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_quantizes_to_64_levels_and_normalizes() {
        let config = SobelConfig::default();
        assert!(config.use_quantization);
        assert_eq!(config.quantization_levels, 64);
        assert!(config.normalize_output);
    }

    #[test]
    fn partial_json_fills_missing_fields_from_default() {
        let settings: FilterSettings =
            serde_json::from_str(r#"{ "sobel": { "quantization_levels": 16 } }"#).unwrap();
        assert_eq!(settings.sobel, SobelConfig::default().with_levels(16));
        assert_eq!(settings.optimization, OptimizationLevel::Auto);

        let settings: FilterSettings =
            serde_json::from_str(r#"{ "optimization": "avx2" }"#).unwrap();
        assert_eq!(settings.optimization, OptimizationLevel::Avx2);
    }

    #[test]
    fn validate_rejects_zero_levels_only_when_quantizing() {
        assert!(matches!(
            SobelConfig::default().with_levels(0).validate(),
            Err(ConfigError::InvalidLevels(0))
        ));
        assert!(SobelConfig::clamp_only().with_levels(0).validate().is_ok());
    }

    #[test]
    fn load_config_reports_missing_file() {
        let path = std::env::temp_dir().join("sobel-edges-missing-config.json");
        assert!(matches!(
            load_config(&path),
            Err(ConfigError::Read { .. })
        ));
    }
}
