//! Nuix Style Resolution
//!
//! Turns design tokens into per-widget style declarations and keeps them
//! current as widgets change state and themes switch.
//!
//! # Pipeline
//!
//! 1. [`StateTracker`] records each widget's class, role and interaction flags
//!    and produces a [`StateSignature`]
//! 2. [`StyleCompiler`] evaluates the widget class's [`RuleTable`] against the
//!    signature and the active [`TokenStore`](nuix_theme::TokenStore)
//! 3. [`ResolutionCache`] memoizes compiled [`StyleDeclaration`]s per theme
//! 4. [`StyleEngine`] binds widgets to all of the above and pushes changed
//!    declarations to each widget's [`StyleSink`]
//!
//! # Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use nuix_core::InteractionFlag;
//! use nuix_style::{StyleDeclaration, StyleDelta, StyleEngine, StyleProperty, WidgetClass};
//! use nuix_theme::ThemeRegistry;
//!
//! let registry = Rc::new(RefCell::new(ThemeRegistry::with_builtin_themes().unwrap()));
//! let engine = StyleEngine::with_standard_rules(registry);
//!
//! let button = engine.attach(
//!     |_: &StyleDeclaration, _: &StyleDelta| { /* push to the toolkit */ },
//!     WidgetClass::Button,
//!     None,
//! );
//! button.notify_state_changed(InteractionFlag::Hover, true);
//!
//! let declaration = button.declaration().unwrap();
//! assert!(declaration.get(StyleProperty::Background).is_some());
//! ```

pub mod binder;
pub mod cache;
pub mod compiler;
pub mod declaration;
pub mod error;
pub mod rules;
pub mod signature;
pub mod tracker;

pub use binder::{BindingPhase, StyleEngine, StyleHandle, StyleSink};
pub use cache::{CacheStats, ResolutionCache, SharedResolutionCache};
pub use compiler::{Compilation, CompileStyle, StyleCompiler};
pub use declaration::{StyleDeclaration, StyleDelta, StyleProperty, StyleValue};
pub use error::CompilerError;
pub use rules::{Predicate, Rule, RuleBook, RuleTable, RuleTableBuilder, ValueSource};
pub use signature::{StateSignature, WidgetClass};
pub use tracker::StateTracker;
