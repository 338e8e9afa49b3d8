//! Design tokens
//!
//! A token is a named design value belonging to one of four closed
//! categories:
//! - Colors (`accent.default`, `surface.hover`, ...)
//! - Dimensions (radii, spacing, widths, opacities)
//! - Fonts
//! - Icon references

use std::fmt;

use nuix_core::Color;

/// Token category
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum TokenCategory {
    Color,
    Dimension,
    Font,
    Icon,
}

impl TokenCategory {
    pub const ALL: [TokenCategory; 4] = [
        TokenCategory::Color,
        TokenCategory::Dimension,
        TokenCategory::Font,
        TokenCategory::Icon,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Dimension => "dimension",
            Self::Font => "font",
            Self::Icon => "icon",
        }
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A font description
#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    pub family: String,
    /// Point size
    pub size: f32,
    /// CSS-style weight (400 = regular, 700 = bold)
    pub weight: u16,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: f32, weight: u16) -> Self {
        Self {
            family: family.into(),
            size,
            weight,
        }
    }
}

/// Reference to an icon asset, resolved by the host's icon loader
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct IconRef(pub String);

impl IconRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// A concrete token value
#[derive(Clone, Debug, PartialEq)]
pub enum TokenValue {
    Color(Color),
    Dimension(f32),
    Font(FontSpec),
    Icon(IconRef),
}

impl TokenValue {
    pub fn category(&self) -> TokenCategory {
        match self {
            Self::Color(_) => TokenCategory::Color,
            Self::Dimension(_) => TokenCategory::Dimension,
            Self::Font(_) => TokenCategory::Font,
            Self::Icon(_) => TokenCategory::Icon,
        }
    }
}

impl From<Color> for TokenValue {
    fn from(color: Color) -> Self {
        Self::Color(color)
    }
}

impl From<f32> for TokenValue {
    fn from(value: f32) -> Self {
        Self::Dimension(value)
    }
}

impl From<FontSpec> for TokenValue {
    fn from(font: FontSpec) -> Self {
        Self::Font(font)
    }
}

impl From<IconRef> for TokenValue {
    fn from(icon: IconRef) -> Self {
        Self::Icon(icon)
    }
}

/// A named token inside a [`TokenStore`](crate::TokenStore)
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    name: String,
    value: TokenValue,
}

impl Token {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> TokenCategory {
        self.value.category()
    }

    pub fn value(&self) -> &TokenValue {
        &self.value
    }
}

/// One `name = value` entry of a theme definition, as fed to `load_theme`
#[derive(Clone, Debug, PartialEq)]
pub struct TokenDefinition {
    pub name: String,
    pub value: TokenValue,
}

impl TokenDefinition {
    pub fn new(name: impl Into<String>, value: impl Into<TokenValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn color(name: impl Into<String>, color: Color) -> Self {
        Self::new(name, color)
    }

    pub fn dimension(name: impl Into<String>, value: f32) -> Self {
        Self::new(name, value)
    }

    pub fn font(name: impl Into<String>, family: &str, size: f32, weight: u16) -> Self {
        Self::new(name, FontSpec::new(family, size, weight))
    }

    pub fn icon(name: impl Into<String>, icon: &str) -> Self {
        Self::new(name, IconRef::new(icon))
    }
}

impl From<TokenDefinition> for Token {
    fn from(def: TokenDefinition) -> Self {
        Self {
            name: def.name,
            value: def.value,
        }
    }
}
