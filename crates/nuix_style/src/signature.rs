//! Widget classes and state signatures

use std::fmt;
use std::sync::Arc;

use nuix_core::{InteractionFlag, InteractionFlags};

/// The closed set of styled widget classes
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum WidgetClass {
    /// Push button
    Button,
    /// Tag chip shown inside a bubble line edit (roles: `syntax`, `plain`)
    Bubble,
    /// Single-line text input (role: `bubbles` when hosting tag chips)
    LineEdit,
    /// Horizontal separator line (role: `sunken`)
    Separator,
    /// Container panel (role: `nested`)
    Panel,
}

impl WidgetClass {
    pub const ALL: [WidgetClass; 5] = [
        WidgetClass::Button,
        WidgetClass::Bubble,
        WidgetClass::LineEdit,
        WidgetClass::Separator,
        WidgetClass::Panel,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Bubble => "bubble",
            Self::LineEdit => "line-edit",
            Self::Separator => "separator",
            Self::Panel => "panel",
        }
    }
}

impl fmt::Display for WidgetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything that determines a widget's expected style
///
/// Two widgets with equal signatures under the same theme share one cached
/// declaration. Equality and hashing are structural.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct StateSignature {
    pub widget_class: WidgetClass,
    pub flags: InteractionFlags,
    pub depth_role: Option<Arc<str>>,
}

impl StateSignature {
    /// Signature of a widget with no flags and no role
    pub fn new(widget_class: WidgetClass) -> Self {
        Self {
            widget_class,
            flags: InteractionFlags::NONE,
            depth_role: None,
        }
    }

    pub fn with_role(mut self, role: &str) -> Self {
        self.depth_role = Some(Arc::from(role));
        self
    }

    pub fn with_flag(mut self, flag: InteractionFlag) -> Self {
        self.flags = self.flags.with(flag);
        self
    }

    pub fn with_flags(mut self, flags: InteractionFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn role(&self) -> Option<&str> {
        self.depth_role.as_deref()
    }

    pub fn has(&self, flag: InteractionFlag) -> bool {
        self.flags.contains(flag)
    }
}
