//! Per-widget interaction state
//!
//! The tracker owns one record per registered widget: its class and role,
//! fixed at registration, and its current interaction flags. Re-parenting a
//! widget into a different role means unregistering and registering again.

use std::sync::Arc;

use nuix_core::{InteractionFlag, InteractionFlags, WidgetId};
use slotmap::SlotMap;

use crate::signature::{StateSignature, WidgetClass};

struct TrackedWidget {
    class: WidgetClass,
    role: Option<Arc<str>>,
    flags: InteractionFlags,
}

impl TrackedWidget {
    fn signature(&self) -> StateSignature {
        StateSignature {
            widget_class: self.class,
            flags: self.flags,
            depth_role: self.role.clone(),
        }
    }
}

/// Registry of widget interaction state
#[derive(Default)]
pub struct StateTracker {
    widgets: SlotMap<WidgetId, TrackedWidget>,
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a widget with no flags set
    pub fn register(&mut self, class: WidgetClass, depth_role: Option<&str>) -> WidgetId {
        self.widgets.insert(TrackedWidget {
            class,
            role: depth_role.map(Arc::from),
            flags: InteractionFlags::NONE,
        })
    }

    /// Forget a widget; returns false if it was not registered
    pub fn unregister(&mut self, id: WidgetId) -> bool {
        self.widgets.remove(id).is_some()
    }

    /// Set or clear one flag and return the resulting signature
    ///
    /// Setting a flag to the value it already has changes nothing and returns
    /// a signature equal to the previous one. Returns `None` for unknown ids.
    pub fn update_flags(
        &mut self,
        id: WidgetId,
        flag: InteractionFlag,
        is_set: bool,
    ) -> Option<StateSignature> {
        let widget = self.widgets.get_mut(id)?;
        widget.flags = widget.flags.set(flag, is_set);
        Some(widget.signature())
    }

    /// Current signature of a widget
    pub fn signature(&self, id: WidgetId) -> Option<StateSignature> {
        self.widgets.get(id).map(TrackedWidget::signature)
    }

    pub fn flags(&self, id: WidgetId) -> Option<InteractionFlags> {
        self.widgets.get(id).map(|w| w.flags)
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}
