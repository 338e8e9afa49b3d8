//! Style compiler
//!
//! Turns a [`StateSignature`] plus a [`TokenStore`] into a
//! [`StyleDeclaration`]. Compilation is a pure function of its inputs: it
//! reads no global state, performs no I/O and logs nothing. Defects are
//! returned to the caller, which decides how to report them.
//!
//! Evaluation order:
//! 1. If the signature is disabled, every other flag is masked out
//! 2. Every matching rule is visited in table order; the last assignment to
//!    a property wins
//! 3. If disabled, the table's disabled overrides are applied on top
//! 4. Token sources are resolved; a token that is undefined or of the wrong
//!    category resolves to its category's fallback token instead

use std::collections::BTreeMap;

use nuix_core::{InteractionFlag, InteractionFlags};
use nuix_theme::{fallback_token_name, TokenStore, TokenValue};

use crate::declaration::{StyleDeclaration, StyleProperty};
use crate::error::CompilerError;
use crate::rules::{RuleBook, ValueSource};
use crate::signature::StateSignature;

/// Result of one compilation
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Compilation {
    pub declaration: StyleDeclaration,
    /// Why properties could not be resolved; those properties are listed in
    /// [`StyleDeclaration::unresolved`] and carry no value
    pub defects: Vec<CompilerError>,
}

/// Something that can compile declarations
///
/// The resolution cache is generic over this so tests can count or fake
/// compilations.
pub trait CompileStyle {
    fn compile(&self, signature: &StateSignature, store: &TokenStore) -> Compilation;
}

/// Rule-table driven compiler
#[derive(Clone, Debug, Default)]
pub struct StyleCompiler {
    rules: RuleBook,
}

impl StyleCompiler {
    pub fn new(rules: RuleBook) -> Self {
        Self { rules }
    }

    /// Compiler over [`RuleBook::standard`]
    pub fn standard() -> Self {
        Self::new(RuleBook::standard())
    }

    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    pub fn set_rules(&mut self, rules: RuleBook) {
        self.rules = rules;
    }
}

impl CompileStyle for StyleCompiler {
    fn compile(&self, signature: &StateSignature, store: &TokenStore) -> Compilation {
        let Some(table) = self.rules.table(signature.widget_class) else {
            return Compilation {
                declaration: StyleDeclaration::new(),
                defects: vec![CompilerError::MissingRuleTable(signature.widget_class)],
            };
        };

        let disabled = signature.has(InteractionFlag::Disabled);
        let flags = if disabled {
            InteractionFlags::NONE.with(InteractionFlag::Disabled)
        } else {
            signature.flags
        };
        let role = signature.role();

        let mut winners: BTreeMap<StyleProperty, &ValueSource> = BTreeMap::new();
        for rule in table.rules() {
            if rule.predicate.matches(flags, role) {
                for (property, source) in &rule.assignments {
                    winners.insert(*property, source);
                }
            }
        }
        if disabled {
            for (property, source) in table.disabled_overrides() {
                winners.insert(*property, source);
            }
        }

        let mut compilation = Compilation::default();
        for (property, source) in winners {
            match resolve(property, source, store) {
                Ok(value) => compilation.declaration.insert(property, value),
                Err(defect) => {
                    compilation.declaration.mark_unresolved(property);
                    compilation.defects.push(defect);
                }
            }
        }
        compilation
    }
}

fn resolve(
    property: StyleProperty,
    source: &ValueSource,
    store: &TokenStore,
) -> Result<TokenValue, CompilerError> {
    let category = property.category();
    match source {
        ValueSource::Literal(value) if value.category() == category => Ok(value.clone()),
        ValueSource::Literal(_) => fallback(property, "<literal>", store),
        ValueSource::Token(name) => match store.get(name) {
            Some(token) if token.category() == category => Ok(token.value().clone()),
            _ => fallback(property, name, store),
        },
    }
}

fn fallback(property: StyleProperty, token: &str, store: &TokenStore) -> Result<TokenValue, CompilerError> {
    let category = property.category();
    match store.get(fallback_token_name(category)) {
        Some(fallback) if fallback.category() == category => Ok(fallback.value().clone()),
        _ => Err(CompilerError::FallbackMissing {
            theme_id: store.theme_id().clone(),
            token: token.to_string(),
            category,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Rule, RuleTable};
    use crate::signature::WidgetClass;
    use nuix_core::Color;
    use nuix_theme::{standard_fallbacks, ThemeId, TokenDefinition};
    use pretty_assertions::assert_eq;

    fn store(fallbacks: &[TokenDefinition]) -> TokenStore {
        TokenStore::build(
            ThemeId::new("test"),
            [
                TokenDefinition::color("accent.default", Color::from_hex(0x3A8FDE)),
                TokenDefinition::color("accent.hover", Color::from_hex(0x5AA0E8)),
                TokenDefinition::color("surface.default", Color::from_hex(0x1E1E2E)),
                TokenDefinition::color("text.default", Color::WHITE),
                TokenDefinition::color("surface.disabled", Color::from_hex(0x202020)),
                TokenDefinition::dimension("radius.default", 6.0),
            ],
            fallbacks,
        )
        .unwrap()
    }

    fn button(flags: &[InteractionFlag]) -> StateSignature {
        flags
            .iter()
            .fold(StateSignature::new(WidgetClass::Button), |sig, f| sig.with_flag(*f))
    }

    #[test]
    fn last_matching_rule_wins() {
        let compiler = StyleCompiler::standard();
        let store = store(&standard_fallbacks());

        let idle = compiler.compile(&button(&[]), &store);
        assert_eq!(
            idle.declaration.get(StyleProperty::Background),
            Some(&TokenValue::Color(Color::from_hex(0x3A8FDE)))
        );

        let hovered = compiler.compile(&button(&[InteractionFlag::Hover]), &store);
        assert_eq!(
            hovered.declaration.get(StyleProperty::Background),
            Some(&TokenValue::Color(Color::from_hex(0x5AA0E8)))
        );
    }

    #[test]
    fn undefined_token_uses_category_fallback() {
        let compiler = StyleCompiler::standard();
        let store = store(&standard_fallbacks());
        let compilation = compiler.compile(&button(&[]), &store);

        // text.on_accent is not defined by the test theme
        let fallback = store.get("fallback.color").unwrap().value();
        assert_eq!(
            compilation.declaration.get(StyleProperty::Foreground),
            Some(fallback)
        );
        assert!(compilation.defects.is_empty());
    }

    #[test]
    fn missing_fallback_omits_property_and_reports() {
        let compiler = StyleCompiler::standard();
        let store = store(&[]);
        let compilation = compiler.compile(&button(&[]), &store);

        assert!(!compilation.declaration.contains(StyleProperty::Foreground));
        assert!(compilation.declaration.unresolved().contains(&StyleProperty::Foreground));
        assert!(compilation.declaration.contains(StyleProperty::Background));
        assert!(compilation.defects.contains(&CompilerError::FallbackMissing {
            theme_id: ThemeId::new("test"),
            token: "text.on_accent".to_string(),
            category: nuix_theme::TokenCategory::Color,
        }));
    }

    #[test]
    fn category_mismatch_falls_back() {
        let table = RuleTable::builder(WidgetClass::Panel)
            .rule(Rule::always().token(StyleProperty::Background, "radius.default"))
            .build();
        let mut rules = RuleBook::new();
        rules.set_table(table);
        let compiler = StyleCompiler::new(rules);
        let store = store(&standard_fallbacks());

        let compilation = compiler.compile(&StateSignature::new(WidgetClass::Panel), &store);
        assert_eq!(
            compilation.declaration.get(StyleProperty::Background),
            Some(store.get("fallback.color").unwrap().value())
        );
    }

    #[test]
    fn disabled_masks_interactive_flags() {
        let compiler = StyleCompiler::standard();
        let store = store(&standard_fallbacks());
        let disabled = compiler.compile(&button(&[InteractionFlag::Disabled]), &store);

        for extra in InteractionFlag::ALL {
            let compilation =
                compiler.compile(&button(&[InteractionFlag::Disabled, extra]), &store);
            assert_eq!(compilation.declaration, disabled.declaration, "{extra}");
        }
        assert_eq!(
            disabled.declaration.get(StyleProperty::Background),
            Some(&TokenValue::Color(Color::from_hex(0x202020)))
        );
    }

    #[test]
    fn unknown_class_reports_missing_table() {
        let compiler = StyleCompiler::new(RuleBook::new());
        let store = store(&standard_fallbacks());
        let compilation = compiler.compile(&button(&[]), &store);
        assert!(compilation.declaration.is_empty());
        assert_eq!(
            compilation.defects,
            vec![CompilerError::MissingRuleTable(WidgetClass::Button)]
        );
    }

    #[test]
    fn compilation_is_deterministic() {
        let compiler = StyleCompiler::standard();
        let store = store(&standard_fallbacks());
        let sig = button(&[InteractionFlag::Focused, InteractionFlag::Checked]);
        assert_eq!(compiler.compile(&sig, &store), compiler.compile(&sig, &store));
    }
}
