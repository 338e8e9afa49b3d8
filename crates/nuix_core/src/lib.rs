//! Nuix Core Types
//!
//! Shared value types for the Nuix styling engine:
//!
//! - **Colors**: [`Color`] values and their textual forms
//! - **Interaction flags**: [`InteractionFlag`] / [`InteractionFlags`] bitsets
//! - **Widget identity**: [`WidgetId`] keys handed out by the state tracker
//! - **Toolkit events**: [`event_types`] and the event → flag mapping

pub mod color;
pub mod events;
pub mod flags;
pub mod widget;

pub use color::{Color, ColorParseError};
pub use events::{event_types, flag_change, EventType};
pub use flags::{InteractionFlag, InteractionFlags};
pub use widget::WidgetId;
