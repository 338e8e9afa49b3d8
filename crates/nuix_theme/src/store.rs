//! Token stores
//!
//! A [`TokenStore`] is built once when its theme is loaded and never mutated
//! afterward. Theme switches and reloads swap whole stores.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::ThemeError;
use crate::tokens::{Token, TokenDefinition};

/// Tokens every theme must define itself (fallbacks do not satisfy them)
pub const REQUIRED_TOKENS: &[&str] = &["accent.default", "surface.default", "text.default"];

/// Identifier of a loaded theme
///
/// Cheap to clone; compares and hashes by content.
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct ThemeId(Arc<str>);

impl ThemeId {
    pub fn new(id: &str) -> Self {
        Self(Arc::from(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ThemeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl Borrow<str> for ThemeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The immutable token set of one theme
#[derive(Debug)]
pub struct TokenStore {
    theme_id: ThemeId,
    tokens: FxHashMap<String, Token>,
}

impl TokenStore {
    /// Build a store from a theme's definitions plus the fallback set
    ///
    /// Fallback definitions only fill names the theme leaves undefined.
    pub fn build(
        theme_id: ThemeId,
        definitions: impl IntoIterator<Item = TokenDefinition>,
        fallbacks: &[TokenDefinition],
    ) -> Result<Self, ThemeError> {
        let definitions = definitions.into_iter();
        let mut tokens =
            FxHashMap::with_capacity_and_hasher(definitions.size_hint().0 + fallbacks.len(), Default::default());

        for def in definitions {
            if tokens.contains_key(&def.name) {
                return Err(ThemeError::DuplicateToken {
                    theme_id: theme_id.to_string(),
                    name: def.name,
                });
            }
            tokens.insert(def.name.clone(), Token::from(def));
        }

        if let Some(missing) = REQUIRED_TOKENS.iter().find(|name| !tokens.contains_key(**name)) {
            return Err(ThemeError::MissingRequiredToken {
                theme_id: theme_id.to_string(),
                name: missing.to_string(),
            });
        }

        for def in fallbacks {
            if !tokens.contains_key(&def.name) {
                tokens.insert(def.name.clone(), Token::from(def.clone()));
            }
        }

        Ok(Self { theme_id, tokens })
    }

    pub fn theme_id(&self) -> &ThemeId {
        &self.theme_id
    }

    /// Look up a token, failing rather than defaulting when it is absent
    pub fn resolve(&self, name: &str) -> Result<&Token, ThemeError> {
        self.tokens.get(name).ok_or_else(|| ThemeError::UndefinedToken {
            theme_id: self.theme_id.to_string(),
            name: name.to_string(),
        })
    }

    pub fn get(&self, name: &str) -> Option<&Token> {
        self.tokens.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tokens.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate over all tokens in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.values()
    }
}
