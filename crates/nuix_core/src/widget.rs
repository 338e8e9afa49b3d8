//! Widget identity

use slotmap::new_key_type;

new_key_type! {
    /// Identifier of a widget instance registered with the state tracker
    pub struct WidgetId;
}
