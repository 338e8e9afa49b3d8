//! Toolkit event types
//!
//! The host toolkit reports interaction through numeric event types. Only a
//! handful of them change a widget's interaction flags; [`flag_change`] maps
//! those to the flag update the state tracker expects.

use crate::flags::InteractionFlag;

/// Event type identifier
pub type EventType = u32;

/// Event types that change interaction flags
///
/// Any other code the host reports is passed through and ignored.
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_ENTER: EventType = 4;
    pub const POINTER_LEAVE: EventType = 5;
    pub const FOCUS: EventType = 10;
    pub const BLUR: EventType = 11;
}

/// Map a toolkit event to the interaction flag it sets or clears
///
/// `POINTER_LEAVE` only clears `Hover`. A press that leaves the widget stays
/// set until the matching `POINTER_UP`.
pub fn flag_change(event_type: EventType) -> Option<(InteractionFlag, bool)> {
    use event_types::*;

    match event_type {
        POINTER_ENTER => Some((InteractionFlag::Hover, true)),
        POINTER_LEAVE => Some((InteractionFlag::Hover, false)),
        POINTER_DOWN => Some((InteractionFlag::Pressed, true)),
        POINTER_UP => Some((InteractionFlag::Pressed, false)),
        FOCUS => Some((InteractionFlag::Focused, true)),
        BLUR => Some((InteractionFlag::Focused, false)),
        _ => None,
    }
}
