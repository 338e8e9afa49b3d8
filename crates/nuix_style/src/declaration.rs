//! Style declarations
//!
//! A [`StyleDeclaration`] maps visual properties to concrete values. It is
//! produced by the compiler, shared through the resolution cache and never
//! mutated afterward.

use std::collections::BTreeMap;
use std::fmt;

use nuix_theme::{TokenCategory, TokenValue};
use smallvec::SmallVec;

/// A concrete property value (a color, dimension, font or icon)
pub type StyleValue = TokenValue;

/// Visual properties a rule can set
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum StyleProperty {
    Background,
    Foreground,
    BorderColor,
    BorderWidth,
    Radius,
    Padding,
    Margin,
    Height,
    Font,
    FontSize,
    Icon,
    Opacity,
}

impl StyleProperty {
    pub const ALL: [StyleProperty; 12] = [
        StyleProperty::Background,
        StyleProperty::Foreground,
        StyleProperty::BorderColor,
        StyleProperty::BorderWidth,
        StyleProperty::Radius,
        StyleProperty::Padding,
        StyleProperty::Margin,
        StyleProperty::Height,
        StyleProperty::Font,
        StyleProperty::FontSize,
        StyleProperty::Icon,
        StyleProperty::Opacity,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Foreground => "foreground",
            Self::BorderColor => "border-color",
            Self::BorderWidth => "border-width",
            Self::Radius => "radius",
            Self::Padding => "padding",
            Self::Margin => "margin",
            Self::Height => "height",
            Self::Font => "font",
            Self::FontSize => "font-size",
            Self::Icon => "icon",
            Self::Opacity => "opacity",
        }
    }

    /// The token category this property accepts
    pub fn category(self) -> TokenCategory {
        match self {
            Self::Background | Self::Foreground | Self::BorderColor => TokenCategory::Color,
            Self::BorderWidth
            | Self::Radius
            | Self::Padding
            | Self::Margin
            | Self::Height
            | Self::FontSize
            | Self::Opacity => TokenCategory::Dimension,
            Self::Font => TokenCategory::Font,
            Self::Icon => TokenCategory::Icon,
        }
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolved property values for one widget state
///
/// Equality is structural: two declarations compiled separately from the
/// same inputs compare equal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleDeclaration {
    properties: BTreeMap<StyleProperty, StyleValue>,
    /// Properties a rule assigned but the theme could not resolve
    unresolved: SmallVec<[StyleProperty; 2]>,
}

impl StyleDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, property: StyleProperty) -> Option<&StyleValue> {
        self.properties.get(&property)
    }

    pub fn contains(&self, property: StyleProperty) -> bool {
        self.properties.contains_key(&property)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Properties in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (StyleProperty, &StyleValue)> {
        self.properties.iter().map(|(p, v)| (*p, v))
    }

    /// Properties left unresolved because their token and fallback were
    /// both missing
    ///
    /// A binding keeps whatever value it last applied for these.
    pub fn unresolved(&self) -> &[StyleProperty] {
        &self.unresolved
    }

    pub(crate) fn insert(&mut self, property: StyleProperty, value: StyleValue) {
        self.properties.insert(property, value);
    }

    pub(crate) fn mark_unresolved(&mut self, property: StyleProperty) {
        if !self.unresolved.contains(&property) {
            self.unresolved.push(property);
        }
    }

    /// Copy of `self` with unresolved properties filled in from `previous`
    ///
    /// Returns `None` when `previous` has nothing to contribute.
    pub(crate) fn carry_forward(&self, previous: &StyleDeclaration) -> Option<StyleDeclaration> {
        let mut carried = None;
        for property in &self.unresolved {
            if self.contains(*property) {
                continue;
            }
            if let Some(value) = previous.get(*property) {
                carried
                    .get_or_insert_with(|| self.clone())
                    .insert(*property, value.clone());
            }
        }
        carried
    }
}

impl FromIterator<(StyleProperty, StyleValue)> for StyleDeclaration {
    fn from_iter<I: IntoIterator<Item = (StyleProperty, StyleValue)>>(iter: I) -> Self {
        Self {
            properties: iter.into_iter().collect(),
            unresolved: SmallVec::new(),
        }
    }
}

/// Difference between a previously applied declaration and a new one
///
/// Sinks that can patch individual properties use this instead of
/// re-applying the full declaration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleDelta {
    /// Properties that were added or whose value changed
    pub changed: SmallVec<[(StyleProperty, StyleValue); 4]>,
    /// Properties present before and absent now
    ///
    /// Unresolved properties of the new declaration are never listed.
    pub removed: SmallVec<[StyleProperty; 4]>,
}

impl StyleDelta {
    /// Compute the delta from `previous` to `next`
    ///
    /// With no previous declaration every property of `next` counts as
    /// changed.
    pub fn between(previous: Option<&StyleDeclaration>, next: &StyleDeclaration) -> Self {
        let mut delta = Self::default();
        for (property, value) in next.iter() {
            if previous.and_then(|p| p.get(property)) != Some(value) {
                delta.changed.push((property, value.clone()));
            }
        }
        if let Some(previous) = previous {
            delta.removed.extend(
                previous
                    .iter()
                    .map(|(property, _)| property)
                    .filter(|property| {
                        !next.contains(*property) && !next.unresolved.contains(property)
                    }),
            );
        }
        delta
    }

    pub fn is_empty(&self) -> bool {
        self.changed.is_empty() && self.removed.is_empty()
    }

    /// Number of changed plus removed properties
    pub fn len(&self) -> usize {
        self.changed.len() + self.removed.len()
    }
}
