//! TOML theme documents
//!
//! A theme document names a theme and lists its tokens:
//!
//! ```toml
//! id = "dark"
//! name = "Dark"
//!
//! [tokens]
//! "accent.default" = "#3A8FDE"
//! "radius.default" = 4.0
//! "font.body" = { family = "Inter", size = 13.0, weight = 400 }
//! "icon.clear" = { icon = "edit-clear" }
//! ```
//!
//! Strings are colors, numbers are dimensions, `{ family, size, weight }`
//! tables are fonts and `{ icon }` tables are icon references. A theme
//! configuration bundles several documents plus the default theme id.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use nuix_core::Color;
use serde::Deserialize;

use crate::error::ThemeError;
use crate::tokens::{FontSpec, IconRef, TokenDefinition, TokenValue};

/// A single theme as written in a TOML file
#[derive(Debug, Deserialize)]
pub struct ThemeDocument {
    pub id: String,
    /// Display name for theme pickers
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tokens: BTreeMap<String, RawTokenValue>,
}

/// A token value before category inference
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum RawTokenValue {
    Text(String),
    Number(f64),
    Icon {
        icon: String,
    },
    Font {
        family: String,
        size: f32,
        #[serde(default = "default_weight")]
        weight: u16,
    },
}

fn default_weight() -> u16 {
    400
}

impl RawTokenValue {
    fn into_value(self, name: &str) -> Result<TokenValue, ThemeError> {
        match self {
            RawTokenValue::Text(text) => text
                .parse::<Color>()
                .map(TokenValue::Color)
                .map_err(|_| ThemeError::InvalidValue {
                    name: name.to_string(),
                    value: text,
                }),
            RawTokenValue::Number(n) => Ok(TokenValue::Dimension(n as f32)),
            RawTokenValue::Icon { icon } => Ok(TokenValue::Icon(IconRef(icon))),
            RawTokenValue::Font {
                family,
                size,
                weight,
            } => Ok(TokenValue::Font(FontSpec {
                family,
                size,
                weight,
            })),
        }
    }
}

impl ThemeDocument {
    /// Parse a document from TOML text
    pub fn from_toml_str(src: &str) -> Result<Self, ThemeError> {
        toml::from_str(src).map_err(|e| ThemeError::Parse(e.to_string()))
    }

    /// Read and parse a document file
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ThemeError> {
        Self::from_toml_str(&read(path.as_ref())?)
    }

    /// Display name, defaulting to the id
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Convert the raw entries into typed token definitions
    pub fn definitions(&self) -> Result<Vec<TokenDefinition>, ThemeError> {
        self.tokens
            .iter()
            .map(|(name, raw)| {
                Ok(TokenDefinition {
                    name: name.clone(),
                    value: raw.clone().into_value(name)?,
                })
            })
            .collect()
    }
}

/// A set of themes plus the theme to activate at startup
#[derive(Debug, Default, Deserialize)]
pub struct ThemeConfig {
    /// Initially active theme; the first theme when absent
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default, rename = "theme")]
    pub themes: Vec<ThemeDocument>,
}

impl ThemeConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(src: &str) -> Result<Self, ThemeError> {
        toml::from_str(src).map_err(|e| ThemeError::Parse(e.to_string()))
    }

    /// Read and parse a configuration file
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ThemeError> {
        Self::from_toml_str(&read(path.as_ref())?)
    }
}

fn read(path: &Path) -> Result<String, ThemeError> {
    fs::read_to_string(path).map_err(|source| ThemeError::Io {
        path: path.to_path_buf(),
        source,
    })
}
