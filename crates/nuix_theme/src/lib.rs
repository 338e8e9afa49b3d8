//! Nuix Theme System
//!
//! Design tokens, per-theme token stores and the registry that tracks which
//! theme is active.
//!
//! # Overview
//!
//! - **Tokens**: named, typed design values ([`Token`], [`TokenValue`])
//! - **Token stores**: one immutable [`TokenStore`] per loaded theme
//! - **Registry**: [`ThemeRegistry`] owns the stores, the active theme id and
//!   the theme-changed subscriber list
//! - **Documents**: TOML theme files ([`ThemeDocument`], [`ThemeConfig`])
//!
//! # Quick Start
//!
//! ```rust
//! use nuix_theme::{ThemeRegistry, TokenValue};
//!
//! let mut registry = ThemeRegistry::with_builtin_themes().unwrap();
//! let accent = registry.resolve("accent.default").unwrap();
//! assert!(matches!(accent.value(), TokenValue::Color(_)));
//!
//! registry.set_active("light").unwrap();
//! assert_eq!(registry.active_theme_id().as_str(), "light");
//! ```
//!
//! # Switching themes
//!
//! A switch never edits a store in place. [`ThemeRegistry::set_active`] swaps
//! the active id and delivers a [`ThemeChanged`] event to every subscriber,
//! in registration order, before it returns.

pub mod document;
pub mod error;
pub mod fallback;
pub mod registry;
pub mod store;
pub mod themes;
pub mod tokens;

pub use document::{ThemeConfig, ThemeDocument};
pub use error::ThemeError;
pub use fallback::{fallback_token_name, standard_fallbacks};
pub use registry::{ThemeChanged, ThemeListener, ThemeRegistry, ThemeRegistryBuilder, SubscriptionId};
pub use store::{ThemeId, TokenStore, REQUIRED_TOKENS};
pub use tokens::*;
