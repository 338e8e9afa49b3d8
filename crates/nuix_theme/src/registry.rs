//! Theme registry
//!
//! The registry owns every loaded [`TokenStore`], the active theme id and the
//! theme-changed subscriber list. It is an explicit value rather than a
//! process global: the host creates one at startup and hands it to the style
//! engine, and tests can run any number of registries side by side.
//!
//! Notifications are delivered synchronously, in subscription order, before
//! the mutating call returns.

use std::ops::ControlFlow;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::document::{ThemeConfig, ThemeDocument};
use crate::error::ThemeError;
use crate::fallback::standard_fallbacks;
use crate::store::{ThemeId, TokenStore};
use crate::themes;
use crate::tokens::{Token, TokenDefinition};

/// Event delivered to subscribers when the active token store changes
#[derive(Clone, Debug)]
pub struct ThemeChanged {
    /// Theme that was active before the change
    pub previous: ThemeId,
    /// Theme that is active now
    pub current: ThemeId,
    /// Token store of `current`
    pub store: Arc<TokenStore>,
}

impl ThemeChanged {
    /// True when the active theme was reloaded in place rather than switched
    pub fn is_reload(&self) -> bool {
        self.previous == self.current
    }
}

/// Theme-changed callback
///
/// Returning `ControlFlow::Break(())` cancels the subscription.
pub type ThemeListener = Box<dyn FnMut(&ThemeChanged) -> ControlFlow<()>>;

/// Handle returned by [`ThemeRegistry::subscribe`]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct SubscriptionId(u64);

struct Subscriber {
    id: SubscriptionId,
    listener: ThemeListener,
}

/// The set of known themes and the currently active one
pub struct ThemeRegistry {
    stores: FxHashMap<ThemeId, Arc<TokenStore>>,
    /// Theme ids in load order
    order: Vec<ThemeId>,
    /// Always a key of `stores`
    active: ThemeId,
    fallbacks: Vec<TokenDefinition>,
    subscribers: Vec<Subscriber>,
    next_subscription: u64,
}

impl ThemeRegistry {
    /// Create a registry with a single theme, which becomes active
    pub fn new(
        theme_id: &str,
        definitions: impl IntoIterator<Item = TokenDefinition>,
    ) -> Result<Self, ThemeError> {
        Self::builder().theme(theme_id, definitions).build()
    }

    /// Create a registry builder
    pub fn builder() -> ThemeRegistryBuilder {
        ThemeRegistryBuilder::new()
    }

    /// Registry with the built-in `dark` and `light` themes, `dark` active
    pub fn with_builtin_themes() -> Result<Self, ThemeError> {
        Self::builder()
            .theme(themes::DARK, themes::dark())
            .theme(themes::LIGHT, themes::light())
            .active(themes::DARK)
            .build()
    }

    /// Build a registry from a parsed theme configuration
    ///
    /// Activates `config.default`, or the first listed theme.
    pub fn from_config(config: &ThemeConfig) -> Result<Self, ThemeError> {
        let mut builder = Self::builder();
        for doc in &config.themes {
            builder = builder.theme(&doc.id, doc.definitions()?);
        }
        if let Some(default) = &config.default {
            builder = builder.active(default);
        }
        builder.build()
    }

    /// Build a token store and register it under `theme_id`
    ///
    /// Loading an id that is already present replaces its store. Replacing
    /// the active theme's store emits a theme-changed notification.
    pub fn load_theme(
        &mut self,
        theme_id: &str,
        definitions: impl IntoIterator<Item = TokenDefinition>,
    ) -> Result<(), ThemeError> {
        let id = ThemeId::new(theme_id);
        let store = Arc::new(TokenStore::build(id.clone(), definitions, &self.fallbacks)?);
        tracing::debug!("ThemeRegistry::load_theme - {} ({} tokens)", id, store.len());

        let replaced = self.stores.insert(id.clone(), store.clone()).is_some();
        if !replaced {
            self.order.push(id.clone());
        }

        if replaced && id == self.active {
            self.notify(ThemeChanged {
                previous: id.clone(),
                current: id,
                store,
            });
        }
        Ok(())
    }

    /// Load a parsed theme document
    pub fn load_document(&mut self, doc: &ThemeDocument) -> Result<(), ThemeError> {
        self.load_theme(&doc.id, doc.definitions()?)
    }

    /// Switch the active theme
    ///
    /// Fails with [`ThemeError::UnknownTheme`] and changes nothing when
    /// `theme_id` was never loaded. Re-activating the active theme is a no-op.
    pub fn set_active(&mut self, theme_id: &str) -> Result<(), ThemeError> {
        let Some((id, store)) = self.stores.get_key_value(theme_id) else {
            return Err(ThemeError::UnknownTheme(theme_id.to_string()));
        };
        if *id == self.active {
            return Ok(());
        }

        let event = ThemeChanged {
            previous: self.active.clone(),
            current: id.clone(),
            store: store.clone(),
        };
        tracing::debug!(
            "ThemeRegistry::set_active - switching from {} to {}",
            event.previous,
            event.current
        );
        self.active = event.current.clone();
        self.notify(event);
        Ok(())
    }

    /// Resolve a token against the active theme
    pub fn resolve(&self, token_name: &str) -> Result<&Token, ThemeError> {
        self.active_store().resolve(token_name)
    }

    pub fn active_theme_id(&self) -> &ThemeId {
        &self.active
    }

    /// Token store of the active theme
    pub fn active_store(&self) -> &Arc<TokenStore> {
        // `active` is only ever assigned ids present in `stores`
        &self.stores[&self.active]
    }

    pub fn store(&self, theme_id: &str) -> Option<&Arc<TokenStore>> {
        self.stores.get(theme_id)
    }

    /// Loaded theme ids in load order
    pub fn theme_ids(&self) -> &[ThemeId] {
        &self.order
    }

    pub fn contains(&self, theme_id: &str) -> bool {
        self.stores.contains_key(theme_id)
    }

    // ========== Theme-changed channel ==========

    /// Subscribe to theme-changed notifications
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&ThemeChanged) -> ControlFlow<()> + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push(Subscriber {
            id,
            listener: Box::new(listener),
        });
        id
    }

    /// Remove a subscription; returns false if it was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn notify(&mut self, event: ThemeChanged) {
        self.subscribers
            .retain_mut(|s| (s.listener)(&event).is_continue());
    }
}

/// Builder for [`ThemeRegistry`]
///
/// Themes load in the order they are added. Without an explicit
/// [`active`](Self::active) call the first theme becomes active.
pub struct ThemeRegistryBuilder {
    fallbacks: Vec<TokenDefinition>,
    themes: Vec<(String, Vec<TokenDefinition>)>,
    active: Option<String>,
}

impl ThemeRegistryBuilder {
    pub fn new() -> Self {
        Self {
            fallbacks: standard_fallbacks(),
            themes: Vec::new(),
            active: None,
        }
    }

    /// Replace the fallback set merged into every store
    pub fn fallbacks(mut self, fallbacks: Vec<TokenDefinition>) -> Self {
        self.fallbacks = fallbacks;
        self
    }

    /// Add a theme
    pub fn theme(
        mut self,
        theme_id: &str,
        definitions: impl IntoIterator<Item = TokenDefinition>,
    ) -> Self {
        self.themes
            .push((theme_id.to_string(), definitions.into_iter().collect()));
        self
    }

    /// Choose the initially active theme
    pub fn active(mut self, theme_id: &str) -> Self {
        self.active = Some(theme_id.to_string());
        self
    }

    /// Build every store and the registry
    pub fn build(self) -> Result<ThemeRegistry, ThemeError> {
        let mut stores = FxHashMap::default();
        let mut order = Vec::with_capacity(self.themes.len());

        for (theme_id, definitions) in self.themes {
            let id = ThemeId::new(&theme_id);
            let store = TokenStore::build(id.clone(), definitions, &self.fallbacks)?;
            tracing::debug!("ThemeRegistry::build - loaded {} ({} tokens)", id, store.len());
            if stores.insert(id.clone(), Arc::new(store)).is_none() {
                order.push(id);
            }
        }

        let active = match self.active {
            Some(name) => order
                .iter()
                .find(|id| id.as_str() == name)
                .cloned()
                .ok_or(ThemeError::UnknownTheme(name))?,
            None => order.first().cloned().ok_or(ThemeError::NoThemes)?,
        };

        Ok(ThemeRegistry {
            stores,
            order,
            active,
            fallbacks: self.fallbacks,
            subscribers: Vec::new(),
            next_subscription: 0,
        })
    }
}

impl Default for ThemeRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
