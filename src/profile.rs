//! Image roles and aspect profiles.
//!
//! A pipeline instance serves exactly one role ("cover" or "profile"), and
//! that role's aspect ratio is resolved from configuration once, at
//! construction — there is no per-render settings lookup. The profile is the
//! storage key; the store it writes into is owned by the pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::{ConfigError, CropConfig};
use crate::cropping::AspectRatio;

/// Semantic role of an exported image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageRole {
    /// Wide banner image (16:9 by default).
    Cover,
    /// Square avatar image (1:1 by default).
    Profile,
}

impl ImageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cover => "cover",
            Self::Profile => "profile",
        }
    }

    /// All known roles, in display order.
    pub fn all() -> [Self; 2] {
        [Self::Cover, Self::Profile]
    }
}

impl fmt::Display for ImageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cover" => Ok(Self::Cover),
            "profile" => Ok(Self::Profile),
            other => Err(format!("unknown image role '{other}' (expected cover|profile)")),
        }
    }
}

/// A role bound to its target aspect ratio.
///
/// Immutable for the lifetime of a pipeline instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectProfile {
    role: ImageRole,
    aspect: AspectRatio,
}

impl AspectProfile {
    /// Resolve a role's profile from configuration. This is the single place
    /// role settings are read; everything downstream carries the resolved
    /// value.
    pub fn resolve(role: ImageRole, config: &CropConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            role,
            aspect: config.aspect_for(role)?,
        })
    }

    pub fn role(&self) -> ImageRole {
        self.role
    }

    pub fn aspect(&self) -> AspectRatio {
        self.aspect
    }
}
