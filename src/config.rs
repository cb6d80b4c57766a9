//! Tool configuration.
//!
//! Handles loading and validating `config.toml`. All options are optional —
//! user config files need only specify the values they want to override.
//! Unknown keys are rejected to catch typos early.
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [export]
//! quality = 90        # JPEG quality (1-100)
//! density = 1.0       # Device pixel density to oversample for
//!
//! [roles]
//! cover = "16:9"      # Aspect ratio locked for the cover image
//! profile = "1:1"     # Aspect ratio locked for the profile image
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::cropping::AspectRatio;
use crate::profile::ImageRole;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CropConfig {
    /// Export (rasterization) settings.
    pub export: ExportConfig,
    /// Aspect ratio locked for each image role.
    pub roles: RoleAspects,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            export: ExportConfig::default(),
            roles: RoleAspects::default(),
        }
    }
}

/// Export settings for the rasterizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// JPEG quality (1-100).
    pub quality: u32,
    /// Device pixel density to oversample exports for.
    pub density: f64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            quality: 90,
            density: 1.0,
        }
    }
}

/// Aspect ratio strings per role, e.g. `"16:9"` or `"1.5"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoleAspects {
    pub cover: String,
    pub profile: String,
}

impl Default for RoleAspects {
    fn default() -> Self {
        Self {
            cover: "16:9".to_string(),
            profile: "1:1".to_string(),
        }
    }
}

impl CropConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given and present, otherwise the stock defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) if p.exists() => Self::load(p),
            _ => Ok(Self::default()),
        }
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.export.quality == 0 || self.export.quality > 100 {
            return Err(ConfigError::Validation(
                "export.quality must be 1-100".into(),
            ));
        }
        if !self.export.density.is_finite() || self.export.density <= 0.0 {
            return Err(ConfigError::Validation(
                "export.density must be positive".into(),
            ));
        }
        // Both role aspects must parse
        self.aspect_for(ImageRole::Cover)?;
        self.aspect_for(ImageRole::Profile)?;
        Ok(())
    }

    /// The aspect ratio configured for a role.
    pub fn aspect_for(&self, role: ImageRole) -> Result<AspectRatio, ConfigError> {
        let raw = match role {
            ImageRole::Cover => &self.roles.cover,
            ImageRole::Profile => &self.roles.profile,
        };
        raw.parse().map_err(|e: String| {
            ConfigError::Validation(format!("roles.{role}: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = CropConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.export.quality, 90);
        assert_eq!(config.export.density, 1.0);
    }

    #[test]
    fn default_role_aspects() {
        let config = CropConfig::default();
        let cover = config.aspect_for(ImageRole::Cover).unwrap();
        assert!((cover.value() - 16.0 / 9.0).abs() < 1e-12);
        let profile = config.aspect_for(ImageRole::Profile).unwrap();
        assert_eq!(profile.value(), 1.0);
    }

    #[test]
    fn partial_config_overrides_one_value() {
        let config: CropConfig = toml::from_str("[export]\nquality = 75\n").unwrap();
        assert_eq!(config.export.quality, 75);
        assert_eq!(config.export.density, 1.0);
        assert_eq!(config.roles.cover, "16:9");
    }

    #[test]
    fn unknown_keys_rejected() {
        let result: Result<CropConfig, _> = toml::from_str("[export]\nqualty = 75\n");
        assert!(result.is_err());
    }

    #[test]
    fn validation_catches_bad_quality() {
        let config: CropConfig = toml::from_str("[export]\nquality = 0\n").unwrap();
        assert!(config.validate().is_err());
        let config: CropConfig = toml::from_str("[export]\nquality = 101\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_catches_bad_density() {
        let config: CropConfig = toml::from_str("[export]\ndensity = 0.0\n").unwrap();
        assert!(config.validate().is_err());
        let config: CropConfig = toml::from_str("[export]\ndensity = -1.5\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_catches_malformed_aspect() {
        let config: CropConfig = toml::from_str("[roles]\ncover = \"wide\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_or_default_without_path() {
        let config = CropConfig::load_or_default(None).unwrap();
        assert_eq!(config.export.quality, 90);
    }

    #[test]
    fn load_from_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[roles]\ncover = \"4:5\"\n").unwrap();

        let config = CropConfig::load_or_default(Some(&path)).unwrap();
        let cover = config.aspect_for(ImageRole::Cover).unwrap();
        assert_eq!(cover.value(), 0.8);
    }
}
