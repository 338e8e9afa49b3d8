//! Interaction state flags
//!
//! Every widget carries six independent boolean flags. They are packed into a
//! single byte so a full flag set is `Copy`, hashes cheaply and compares
//! structurally.

use std::fmt;

/// A single interaction state flag
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum InteractionFlag {
    Hover,
    Pressed,
    Focused,
    Disabled,
    Checked,
    Selected,
}

impl InteractionFlag {
    /// All flags in declaration order
    pub const ALL: [InteractionFlag; 6] = [
        InteractionFlag::Hover,
        InteractionFlag::Pressed,
        InteractionFlag::Focused,
        InteractionFlag::Disabled,
        InteractionFlag::Checked,
        InteractionFlag::Selected,
    ];

    const fn bit(self) -> u8 {
        1 << self as u8
    }

    /// Lowercase name used in logs and rule descriptions
    pub fn name(self) -> &'static str {
        match self {
            Self::Hover => "hover",
            Self::Pressed => "pressed",
            Self::Focused => "focused",
            Self::Disabled => "disabled",
            Self::Checked => "checked",
            Self::Selected => "selected",
        }
    }
}

impl fmt::Display for InteractionFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of interaction flags
#[derive(Clone, Copy, Default, Hash, Eq, PartialEq)]
pub struct InteractionFlags(u8);

impl InteractionFlags {
    /// The empty set
    pub const NONE: InteractionFlags = InteractionFlags(0);

    pub fn new() -> Self {
        Self::NONE
    }

    pub fn contains(self, flag: InteractionFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    /// Return a copy with `flag` set
    pub fn with(self, flag: InteractionFlag) -> Self {
        Self(self.0 | flag.bit())
    }

    /// Return a copy with `flag` cleared
    pub fn without(self, flag: InteractionFlag) -> Self {
        Self(self.0 & !flag.bit())
    }

    /// Return a copy with `flag` set to `is_set`
    pub fn set(self, flag: InteractionFlag, is_set: bool) -> Self {
        if is_set {
            self.with(flag)
        } else {
            self.without(flag)
        }
    }

    /// Return a copy with every flag in `other` cleared
    pub fn difference(self, other: InteractionFlags) -> Self {
        Self(self.0 & !other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate over the set flags in declaration order
    pub fn iter(self) -> impl Iterator<Item = InteractionFlag> {
        InteractionFlag::ALL
            .into_iter()
            .filter(move |flag| self.contains(*flag))
    }
}

impl FromIterator<InteractionFlag> for InteractionFlags {
    fn from_iter<I: IntoIterator<Item = InteractionFlag>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

impl From<InteractionFlag> for InteractionFlags {
    fn from(flag: InteractionFlag) -> Self {
        Self::NONE.with(flag)
    }
}

impl fmt::Debug for InteractionFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
