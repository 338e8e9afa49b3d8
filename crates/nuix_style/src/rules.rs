//! Widget rule tables
//!
//! Each widget class owns an ordered list of rules. A rule pairs a predicate
//! over the interaction flags and depth role with a set of property
//! assignments. When several matching rules assign the same property, the
//! one listed last wins. A separate disabled override set is applied after
//! all rules whenever the widget is disabled.
//!
//! ```rust
//! use nuix_core::InteractionFlag;
//! use nuix_style::{Predicate, Rule, RuleTable, StyleProperty, WidgetClass};
//!
//! let table = RuleTable::builder(WidgetClass::Button)
//!     .rule(Rule::always().token(StyleProperty::Background, "accent.default"))
//!     .rule(Rule::when(Predicate::Flag(InteractionFlag::Hover))
//!         .token(StyleProperty::Background, "accent.hover"))
//!     .build();
//! assert_eq!(table.rules().len(), 2);
//! ```

use std::borrow::Cow;

use nuix_core::{Color, InteractionFlag, InteractionFlags};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::declaration::{StyleProperty, StyleValue};
use crate::signature::WidgetClass;

/// Condition under which a rule applies
#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    Always,
    Flag(InteractionFlag),
    NotFlag(InteractionFlag),
    Role(String),
    All(Vec<Predicate>),
    Any(Vec<Predicate>),
}

impl Predicate {
    pub fn matches(&self, flags: InteractionFlags, role: Option<&str>) -> bool {
        match self {
            Self::Always => true,
            Self::Flag(flag) => flags.contains(*flag),
            Self::NotFlag(flag) => !flags.contains(*flag),
            Self::Role(expected) => role == Some(expected.as_str()),
            Self::All(preds) => preds.iter().all(|p| p.matches(flags, role)),
            Self::Any(preds) => preds.iter().any(|p| p.matches(flags, role)),
        }
    }

    pub fn role(role: &str) -> Self {
        Self::Role(role.to_string())
    }
}

/// Where a property's value comes from
#[derive(Clone, Debug, PartialEq)]
pub enum ValueSource {
    /// Resolve a named token in the active theme
    Token(Cow<'static, str>),
    /// A fixed value independent of the theme
    Literal(StyleValue),
}

/// A predicate plus the properties it assigns
#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    pub predicate: Predicate,
    pub assignments: SmallVec<[(StyleProperty, ValueSource); 4]>,
}

impl Rule {
    pub fn when(predicate: Predicate) -> Self {
        Self {
            predicate,
            assignments: SmallVec::new(),
        }
    }

    pub fn always() -> Self {
        Self::when(Predicate::Always)
    }

    /// Assign a property from a token
    pub fn token(mut self, property: StyleProperty, name: impl Into<Cow<'static, str>>) -> Self {
        self.assignments
            .push((property, ValueSource::Token(name.into())));
        self
    }

    /// Assign a property a fixed value
    pub fn literal(mut self, property: StyleProperty, value: impl Into<StyleValue>) -> Self {
        self.assignments
            .push((property, ValueSource::Literal(value.into())));
        self
    }
}

/// Rules for a single widget class
#[derive(Clone, Debug, PartialEq)]
pub struct RuleTable {
    class: WidgetClass,
    rules: Vec<Rule>,
    disabled: Vec<(StyleProperty, ValueSource)>,
}

impl RuleTable {
    pub fn builder(class: WidgetClass) -> RuleTableBuilder {
        RuleTableBuilder::new(class)
    }

    pub fn class(&self) -> WidgetClass {
        self.class
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Assignments applied last when the widget is disabled
    pub fn disabled_overrides(&self) -> &[(StyleProperty, ValueSource)] {
        &self.disabled
    }
}

/// Builder for [`RuleTable`]
pub struct RuleTableBuilder {
    class: WidgetClass,
    rules: Vec<Rule>,
    disabled: Vec<(StyleProperty, ValueSource)>,
}

impl RuleTableBuilder {
    /// Start a table with the default disabled override set
    pub fn new(class: WidgetClass) -> Self {
        Self {
            class,
            rules: Vec::new(),
            disabled: default_disabled_overrides(),
        }
    }

    /// Append a rule; later rules win over earlier ones
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Replace the disabled override set with the assignments of `overrides`
    ///
    /// The rule's predicate is not consulted.
    pub fn disabled(mut self, overrides: Rule) -> Self {
        self.disabled = overrides.assignments.into_vec();
        self
    }

    pub fn build(self) -> RuleTable {
        RuleTable {
            class: self.class,
            rules: self.rules,
            disabled: self.disabled,
        }
    }
}

fn default_disabled_overrides() -> Vec<(StyleProperty, ValueSource)> {
    Rule::always()
        .token(StyleProperty::Background, "surface.disabled")
        .token(StyleProperty::Foreground, "text.disabled")
        .token(StyleProperty::BorderColor, "border.disabled")
        .token(StyleProperty::Opacity, "opacity.disabled")
        .assignments
        .into_vec()
}

/// Rule tables for every widget class
#[derive(Clone, Debug, Default)]
pub struct RuleBook {
    tables: FxHashMap<WidgetClass, RuleTable>,
    version: u64,
}

impl RuleBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tables for all built-in widget classes
    pub fn standard() -> Self {
        let mut book = Self::new();
        for table in [
            button_table(),
            bubble_table(),
            line_edit_table(),
            separator_table(),
            panel_table(),
        ] {
            book.tables.insert(table.class(), table);
        }
        book
    }

    pub fn table(&self, class: WidgetClass) -> Option<&RuleTable> {
        self.tables.get(&class)
    }

    /// Install or replace the table for its class
    pub fn set_table(&mut self, table: RuleTable) {
        self.tables.insert(table.class(), table);
        self.version += 1;
    }

    /// Incremented by every `set_table`
    pub fn version(&self) -> u64 {
        self.version
    }
}

fn button_table() -> RuleTable {
    use InteractionFlag::*;
    use StyleProperty::*;

    RuleTable::builder(WidgetClass::Button)
        .rule(
            Rule::always()
                .token(Background, "accent.default")
                .token(Foreground, "text.on_accent")
                .token(BorderWidth, "spacing.none")
                .token(Radius, "radius.default")
                .token(Padding, "spacing.md")
                .token(Font, "font.body")
                .token(Opacity, "opacity.default"),
        )
        .rule(
            Rule::when(Predicate::role("flat"))
                .token(Background, "surface.default")
                .token(Foreground, "text.default"),
        )
        .rule(Rule::when(Predicate::Flag(Hover)).token(Background, "accent.hover"))
        .rule(
            Rule::when(Predicate::All(vec![Predicate::role("flat"), Predicate::Flag(Hover)]))
                .token(Background, "surface.hover"),
        )
        .rule(Rule::when(Predicate::Flag(Pressed)).token(Background, "accent.pressed"))
        .rule(Rule::when(Predicate::Flag(Checked)).token(Background, "accent.checked"))
        .rule(
            Rule::when(Predicate::Flag(Focused))
                .token(BorderColor, "border.focus")
                .token(BorderWidth, "border.width.focus"),
        )
        .build()
}

fn bubble_table() -> RuleTable {
    use InteractionFlag::*;
    use StyleProperty::*;

    RuleTable::builder(WidgetClass::Bubble)
        .rule(
            Rule::always()
                .token(Background, "bubble.default")
                .token(Foreground, "bubble.text")
                .token(BorderWidth, "spacing.none")
                .token(Radius, "radius.small")
                .token(Padding, "spacing.none")
                .token(Height, "bubble.height")
                .token(Font, "font.small"),
        )
        .rule(Rule::when(Predicate::role("syntax")).token(Background, "bubble.syntax"))
        // Plain bubbles are outlined rather than filled
        .rule(
            Rule::when(Predicate::role("plain"))
                .literal(Background, Color::TRANSPARENT)
                .token(Foreground, "text.default")
                .token(BorderColor, "text.default")
                .token(BorderWidth, "border.width"),
        )
        .rule(Rule::when(Predicate::Flag(Hover)).token(Background, "bubble.hover"))
        .rule(
            Rule::when(Predicate::Flag(Selected))
                .token(BorderColor, "border.focus")
                .token(BorderWidth, "border.width.focus"),
        )
        .build()
}

fn line_edit_table() -> RuleTable {
    use InteractionFlag::*;
    use StyleProperty::*;

    RuleTable::builder(WidgetClass::LineEdit)
        .rule(
            Rule::always()
                .token(Background, "input.default")
                .token(Foreground, "text.default")
                .token(BorderColor, "border.default")
                .token(BorderWidth, "border.width")
                .token(Radius, "radius.small")
                .token(Padding, "spacing.sm")
                .token(Font, "font.body")
                .token(Icon, "icon.clear"),
        )
        .rule(
            Rule::when(Predicate::Flag(Hover))
                .token(Background, "input.hover")
                .token(BorderColor, "border.hover"),
        )
        .rule(
            Rule::when(Predicate::Flag(Focused))
                .token(Background, "input.focus")
                .token(BorderColor, "border.focus")
                .token(BorderWidth, "border.width.focus"),
        )
        .rule(
            Rule::when(Predicate::role("bubbles"))
                .token(Padding, "spacing.none")
                .token(Margin, "spacing.sm"),
        )
        .build()
}

fn separator_table() -> RuleTable {
    use StyleProperty::*;

    RuleTable::builder(WidgetClass::Separator)
        .rule(
            Rule::always()
                .token(Foreground, "border.default")
                .token(Height, "separator.thickness")
                .token(Margin, "spacing.sm"),
        )
        .rule(
            Rule::when(Predicate::role("sunken"))
                .token(BorderColor, "separator.shadow")
                .token(BorderWidth, "separator.thickness"),
        )
        .disabled(
            Rule::always()
                .token(Foreground, "text.disabled")
                .token(Opacity, "opacity.disabled"),
        )
        .build()
}

fn panel_table() -> RuleTable {
    use InteractionFlag::*;
    use StyleProperty::*;

    RuleTable::builder(WidgetClass::Panel)
        .rule(
            Rule::always()
                .token(Background, "surface.default")
                .token(Foreground, "text.default")
                .token(Padding, "spacing.md")
                .token(Radius, "spacing.none"),
        )
        .rule(
            Rule::when(Predicate::role("nested"))
                .token(Background, "surface.raised")
                .token(Radius, "radius.default")
                .token(BorderColor, "border.default")
                .token(BorderWidth, "border.width"),
        )
        .rule(Rule::when(Predicate::Flag(Selected)).token(Background, "surface.selected"))
        .rule(Rule::when(Predicate::Flag(Focused)).token(BorderColor, "border.focus"))
        .build()
}
