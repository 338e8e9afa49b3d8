//! Widget style binding
//!
//! [`StyleEngine`] connects widgets to the style pipeline. Each attached
//! widget gets a [`StyleSink`] that receives its declaration whenever the
//! declaration actually changes, whether from an interaction state change,
//! a theme switch or a rule reload.
//!
//! The engine and its handles share state through `Rc<RefCell<_>>` and are
//! confined to the UI thread. Sinks are called while that state is borrowed
//! and must not call back into the engine.

use std::cell::{Cell, RefCell};
use std::ops::ControlFlow;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use nuix_core::{flag_change, EventType, InteractionFlag, WidgetId};
use nuix_theme::{SubscriptionId, ThemeChanged, ThemeError, ThemeRegistry, TokenStore};
use slotmap::SecondaryMap;

use crate::cache::{CacheStats, ResolutionCache};
use crate::compiler::StyleCompiler;
use crate::declaration::{StyleDeclaration, StyleDelta};
use crate::rules::RuleBook;
use crate::signature::{StateSignature, WidgetClass};
use crate::tracker::StateTracker;

/// Receiver of a widget's resolved style
pub trait StyleSink {
    /// Apply a new declaration
    ///
    /// `delta` lists what differs from the previously applied declaration;
    /// on first application it lists every property.
    fn apply_style(&mut self, declaration: &StyleDeclaration, delta: &StyleDelta);
}

impl<F> StyleSink for F
where
    F: FnMut(&StyleDeclaration, &StyleDelta),
{
    fn apply_style(&mut self, declaration: &StyleDeclaration, delta: &StyleDelta) {
        (self)(declaration, delta)
    }
}

/// Lifecycle of a binding
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BindingPhase {
    /// Receiving style updates
    Attached,
    /// Detached, or its engine is gone
    Detached,
}

struct Binding {
    sink: Box<dyn StyleSink>,
    applied: Option<Arc<StyleDeclaration>>,
}

impl Binding {
    /// Push `declaration` to the sink unless it matches what was applied
    ///
    /// Unresolved properties keep their previously applied values.
    fn apply(&mut self, declaration: Arc<StyleDeclaration>) -> bool {
        let declaration = match self.applied.as_deref().and_then(|a| declaration.carry_forward(a)) {
            Some(carried) => Arc::new(carried),
            None => declaration,
        };
        if let Some(applied) = &self.applied {
            if Arc::ptr_eq(applied, &declaration) {
                return false;
            }
            if **applied == *declaration {
                self.applied = Some(declaration);
                return false;
            }
        }
        let delta = StyleDelta::between(self.applied.as_deref(), &declaration);
        self.sink.apply_style(&declaration, &delta);
        self.applied = Some(declaration);
        true
    }
}

struct EngineState {
    tracker: StateTracker,
    cache: ResolutionCache,
    compiler: StyleCompiler,
    bindings: SecondaryMap<WidgetId, Binding>,
    /// Snapshot of the registry's active store
    store: Arc<TokenStore>,
}

impl EngineState {
    /// Resolve the widget's current signature and apply the result
    fn refresh(&mut self, id: WidgetId) -> bool {
        let Some(signature) = self.tracker.signature(id) else {
            return false;
        };
        let declaration =
            self.cache
                .get_or_compile(&signature, self.store.theme_id(), &self.compiler, &self.store);
        match self.bindings.get_mut(id) {
            Some(binding) => {
                let applied = binding.apply(declaration);
                if applied {
                    tracing::trace!("StyleEngine - applied {:?} to {:?}", signature, id);
                }
                applied
            }
            None => false,
        }
    }

    fn set_flag(&mut self, id: WidgetId, flag: InteractionFlag, is_set: bool) -> bool {
        let Some(before) = self.tracker.signature(id) else {
            return false;
        };
        match self.tracker.update_flags(id, flag, is_set) {
            Some(after) if after != before => self.refresh(id),
            _ => false,
        }
    }

    fn release(&mut self, id: WidgetId) {
        self.bindings.remove(id);
        self.tracker.unregister(id);
    }
}

/// Binds widgets to the theme registry through the style pipeline
pub struct StyleEngine {
    registry: Rc<RefCell<ThemeRegistry>>,
    state: Rc<RefCell<EngineState>>,
    subscription: SubscriptionId,
}

impl StyleEngine {
    /// Create an engine over a shared registry
    ///
    /// The engine subscribes to theme changes before any widget binding, so
    /// stale cache entries are gone by the time bindings re-resolve.
    pub fn new(registry: Rc<RefCell<ThemeRegistry>>, compiler: StyleCompiler) -> Self {
        let store = registry.borrow().active_store().clone();
        let state = Rc::new(RefCell::new(EngineState {
            tracker: StateTracker::new(),
            cache: ResolutionCache::new(),
            compiler,
            bindings: SecondaryMap::new(),
            store,
        }));

        let weak = Rc::downgrade(&state);
        let subscription = registry.borrow_mut().subscribe(move |event: &ThemeChanged| {
            let Some(state) = weak.upgrade() else {
                return ControlFlow::Break(());
            };
            let mut state = state.borrow_mut();
            state.cache.invalidate_theme(event.previous.as_str());
            state.store = event.store.clone();
            ControlFlow::Continue(())
        });

        Self {
            registry,
            state,
            subscription,
        }
    }

    /// Engine using [`RuleBook::standard`]
    pub fn with_standard_rules(registry: Rc<RefCell<ThemeRegistry>>) -> Self {
        Self::new(registry, StyleCompiler::standard())
    }

    /// Register a widget and apply its initial style
    ///
    /// The sink is called once before this returns. Must not be called from
    /// inside a theme-changed notification.
    pub fn attach<S>(&self, sink: S, class: WidgetClass, depth_role: Option<&str>) -> StyleHandle
    where
        S: StyleSink + 'static,
    {
        let id = self.state.borrow_mut().tracker.register(class, depth_role);
        let alive = Rc::new(Cell::new(true));

        let subscription = {
            let state = Rc::downgrade(&self.state);
            let alive = alive.clone();
            self.registry
                .borrow_mut()
                .subscribe(move |_: &ThemeChanged| rebind(&state, id, &alive))
        };

        {
            let mut state = self.state.borrow_mut();
            state.bindings.insert(
                id,
                Binding {
                    sink: Box::new(sink),
                    applied: None,
                },
            );
            state.refresh(id);
        }
        tracing::debug!("StyleEngine::attach - {} {:?} role={:?}", class, id, depth_role);

        StyleHandle {
            id,
            state: Rc::downgrade(&self.state),
            registry: Rc::downgrade(&self.registry),
            subscription,
            alive,
        }
    }

    /// Set or clear one interaction flag on a widget
    ///
    /// Returns true if the widget's sink received a new declaration. A flag
    /// change that leaves the signature unchanged does nothing.
    pub fn notify_state_changed(&self, widget: WidgetId, flag: InteractionFlag, is_set: bool) -> bool {
        self.state.borrow_mut().set_flag(widget, flag, is_set)
    }

    /// Translate a raw input event into a flag change
    ///
    /// Events that map to no flag are ignored.
    pub fn handle_event(&self, widget: WidgetId, event_type: EventType) -> bool {
        match flag_change(event_type) {
            Some((flag, is_set)) => self.notify_state_changed(widget, flag, is_set),
            None => false,
        }
    }

    /// Switch the registry's active theme
    ///
    /// Every binding re-resolves before this returns. On error nothing
    /// changes.
    pub fn set_theme(&self, theme_id: &str) -> Result<(), ThemeError> {
        self.registry.borrow_mut().set_active(theme_id)
    }

    /// Replace the rule book and re-resolve every binding
    pub fn reload_rules(&self, rules: RuleBook) {
        let mut state = self.state.borrow_mut();
        state.compiler.set_rules(rules);
        state.cache.invalidate_all();

        let ids: Vec<WidgetId> = state.bindings.keys().collect();
        let applied = ids.into_iter().filter(|id| state.refresh(*id)).count();
        tracing::debug!("StyleEngine::reload_rules - {} bindings updated", applied);
    }

    pub fn registry(&self) -> &Rc<RefCell<ThemeRegistry>> {
        &self.registry
    }

    pub fn binding_count(&self) -> usize {
        self.state.borrow().bindings.len()
    }

    pub fn signature(&self, widget: WidgetId) -> Option<StateSignature> {
        self.state.borrow().tracker.signature(widget)
    }

    /// The declaration last applied to a widget
    pub fn declaration(&self, widget: WidgetId) -> Option<Arc<StyleDeclaration>> {
        self.state.borrow().bindings.get(widget)?.applied.clone()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.state.borrow().cache.stats()
    }

    pub fn cache_len(&self) -> usize {
        self.state.borrow().cache.len()
    }

    /// Drop cached declarations no widget currently holds
    pub fn evict_unreferenced(&self) -> usize {
        self.state.borrow_mut().cache.evict_unreferenced()
    }
}

impl Drop for StyleEngine {
    fn drop(&mut self) {
        if let Ok(mut registry) = self.registry.try_borrow_mut() {
            registry.unsubscribe(self.subscription);
        }
    }
}

fn rebind(state: &Weak<RefCell<EngineState>>, id: WidgetId, alive: &Cell<bool>) -> ControlFlow<()> {
    let Some(shared) = state.upgrade() else {
        return ControlFlow::Break(());
    };
    let mut state = shared.borrow_mut();
    if !alive.get() {
        state.release(id);
        return ControlFlow::Break(());
    }
    if !state.bindings.contains_key(id) {
        return ControlFlow::Break(());
    }
    state.refresh(id);
    ControlFlow::Continue(())
}

/// A widget's attachment to a [`StyleEngine`]
///
/// Dropping the handle detaches the widget.
pub struct StyleHandle {
    id: WidgetId,
    state: Weak<RefCell<EngineState>>,
    registry: Weak<RefCell<ThemeRegistry>>,
    subscription: SubscriptionId,
    alive: Rc<Cell<bool>>,
}

impl StyleHandle {
    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn phase(&self) -> BindingPhase {
        if self.alive.get() && self.state.strong_count() > 0 {
            BindingPhase::Attached
        } else {
            BindingPhase::Detached
        }
    }

    /// See [`StyleEngine::notify_state_changed`]
    pub fn notify_state_changed(&self, flag: InteractionFlag, is_set: bool) -> bool {
        self.with_state(|state| state.set_flag(self.id, flag, is_set))
            .unwrap_or(false)
    }

    /// See [`StyleEngine::handle_event`]
    pub fn handle_event(&self, event_type: EventType) -> bool {
        match flag_change(event_type) {
            Some((flag, is_set)) => self.notify_state_changed(flag, is_set),
            None => false,
        }
    }

    pub fn signature(&self) -> Option<StateSignature> {
        self.with_state(|state| state.tracker.signature(self.id))
            .flatten()
    }

    /// The declaration last applied to this widget
    pub fn declaration(&self) -> Option<Arc<StyleDeclaration>> {
        self.with_state(|state| state.bindings.get(self.id).and_then(|b| b.applied.clone()))
            .flatten()
    }

    /// Stop receiving updates; later calls are no-ops
    pub fn detach(&mut self) {
        if !self.alive.replace(false) {
            return;
        }
        let released = match self.state.upgrade() {
            Some(state) => match state.try_borrow_mut() {
                Ok(mut state) => {
                    state.release(self.id);
                    true
                }
                Err(_) => false,
            },
            None => true,
        };
        // Otherwise the listener sees `alive == false` on the next theme change,
        // releases the binding and cancels itself.
        if !released {
            tracing::debug!("StyleHandle::detach - {:?} deferred", self.id);
            return;
        }
        if let Some(registry) = self.registry.upgrade() {
            if let Ok(mut registry) = registry.try_borrow_mut() {
                registry.unsubscribe(self.subscription);
            }
        }
        tracing::debug!("StyleHandle::detach - {:?}", self.id);
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut EngineState) -> R) -> Option<R> {
        if !self.alive.get() {
            return None;
        }
        let state = self.state.upgrade()?;
        let mut state = state.borrow_mut();
        Some(f(&mut state))
    }
}

impl Drop for StyleHandle {
    fn drop(&mut self) {
        self.detach();
    }
}
