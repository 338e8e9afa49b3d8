use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use nuix_core::{Color, InteractionFlag};
use nuix_style::{
    CompileStyle, Compilation, ResolutionCache, StateSignature, StateTracker, StyleCompiler,
    StyleDeclaration, StyleDelta, StyleEngine, StyleProperty, StyleValue, WidgetClass,
};
use nuix_theme::{ThemeError, ThemeRegistry, TokenDefinition, TokenStore};
use pretty_assertions::assert_eq;

const ACCENT: u32 = 0x3A8FDE;
const ACCENT_HOVER: u32 = 0x5AA0E8;

fn dark_tokens() -> Vec<TokenDefinition> {
    vec![
        TokenDefinition::color("accent.default", Color::from_hex(ACCENT)),
        TokenDefinition::color("accent.hover", Color::from_hex(ACCENT_HOVER)),
        TokenDefinition::color("surface.default", Color::from_hex(0x1E1E2E)),
        TokenDefinition::color("surface.disabled", Color::from_hex(0x181825)),
        TokenDefinition::color("text.default", Color::from_hex(0xCDD6F4)),
        TokenDefinition::color("text.disabled", Color::from_hex(0x6C7086)),
        TokenDefinition::dimension("opacity.disabled", 0.4),
    ]
}

fn light_tokens() -> Vec<TokenDefinition> {
    vec![
        TokenDefinition::color("accent.default", Color::from_hex(0x1E66F5)),
        TokenDefinition::color("accent.hover", Color::from_hex(0x1758D1)),
        TokenDefinition::color("surface.default", Color::from_hex(0xEFF1F5)),
        TokenDefinition::color("text.default", Color::from_hex(0x4C4F69)),
    ]
}

fn registry() -> Rc<RefCell<ThemeRegistry>> {
    let registry = ThemeRegistry::builder()
        .theme("dark", dark_tokens())
        .theme("light", light_tokens())
        .active("dark")
        .build()
        .unwrap();
    Rc::new(RefCell::new(registry))
}

type Calls = Rc<RefCell<Vec<(StyleDeclaration, StyleDelta)>>>;

fn recording_sink() -> (Calls, impl FnMut(&StyleDeclaration, &StyleDelta)) {
    let calls: Calls = Rc::default();
    let log = calls.clone();
    (calls, move |declaration: &StyleDeclaration, delta: &StyleDelta| {
        log.borrow_mut().push((declaration.clone(), delta.clone()))
    })
}

fn background(declaration: &StyleDeclaration) -> Option<&StyleValue> {
    declaration.get(StyleProperty::Background)
}

struct CountingCompiler {
    inner: StyleCompiler,
    calls: AtomicUsize,
}

impl CompileStyle for CountingCompiler {
    fn compile(&self, signature: &StateSignature, store: &TokenStore) -> Compilation {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.compile(signature, store)
    }
}

#[test]
fn button_hover_applies_once_with_single_change() {
    let engine = StyleEngine::with_standard_rules(registry());
    let (calls, sink) = recording_sink();
    let button = engine.attach(sink, WidgetClass::Button, None);

    let initial = button.declaration().unwrap();
    assert_eq!(
        background(&initial),
        Some(&StyleValue::Color(Color::from_hex(ACCENT)))
    );
    assert_eq!(calls.borrow().len(), 1);

    assert!(button.notify_state_changed(InteractionFlag::Hover, true));

    let calls = calls.borrow();
    assert_eq!(calls.len(), 2);
    let (declaration, delta) = &calls[1];
    assert_eq!(
        background(declaration),
        Some(&StyleValue::Color(Color::from_hex(ACCENT_HOVER)))
    );
    assert_eq!(delta.len(), 1);
    assert_eq!(delta.changed[0].0, StyleProperty::Background);
}

#[test]
fn unknown_theme_leaves_engine_untouched() {
    let registry = registry();
    let engine = StyleEngine::with_standard_rules(registry.clone());
    let (calls, sink) = recording_sink();
    let button = engine.attach(sink, WidgetClass::Button, None);
    let before = button.declaration().unwrap();
    let cached = engine.cache_len();

    let err = engine.set_theme("unknown-theme").unwrap_err();
    assert!(matches!(err, ThemeError::UnknownTheme(ref id) if id == "unknown-theme"));

    assert_eq!(registry.borrow().active_theme_id().as_str(), "dark");
    assert_eq!(engine.cache_len(), cached);
    assert!(Arc::ptr_eq(&before, &button.declaration().unwrap()));
    assert_eq!(calls.borrow().len(), 1);
}

#[test]
fn theme_switch_restyles_and_drops_previous_entries() {
    let registry = registry();
    let engine = StyleEngine::with_standard_rules(registry.clone());
    let (calls, sink) = recording_sink();
    let button = engine.attach(sink, WidgetClass::Button, None);
    let dark = button.declaration().unwrap();

    engine.set_theme("light").unwrap();

    let light = button.declaration().unwrap();
    assert!(!Arc::ptr_eq(&dark, &light));
    assert_eq!(
        background(&light),
        Some(&StyleValue::Color(Color::from_hex(0x1E66F5)))
    );
    assert_eq!(calls.borrow().len(), 2);
    // Only the light theme's single entry remains
    assert_eq!(engine.cache_len(), 1);
}

#[test]
fn cache_switch_never_reuses_previous_theme() {
    let registry = registry();
    let compiler = StyleCompiler::standard();
    let mut cache = ResolutionCache::new();
    let sig = StateSignature::new(WidgetClass::Button);

    let dark_store = registry.borrow().active_store().clone();
    let dark = cache.get_or_compile(&sig, dark_store.theme_id(), &compiler, &dark_store);

    registry.borrow_mut().set_active("light").unwrap();
    assert_eq!(cache.invalidate_theme("dark"), 1);

    let light_store = registry.borrow().active_store().clone();
    let light = cache.get_or_compile(&sig, light_store.theme_id(), &compiler, &light_store);
    assert!(!Arc::ptr_eq(&dark, &light));
    assert_ne!(*dark, *light);
}

#[test]
fn repeated_lookups_share_one_instance() {
    let registry = registry();
    let store = registry.borrow().active_store().clone();
    let compiler = CountingCompiler {
        inner: StyleCompiler::standard(),
        calls: AtomicUsize::new(0),
    };
    let mut cache = ResolutionCache::new();

    for class in WidgetClass::ALL {
        let sig = StateSignature::new(class).with_flag(InteractionFlag::Hover);
        let first = cache.get_or_compile(&sig, store.theme_id(), &compiler, &store);
        for _ in 0..3 {
            let again = cache.get_or_compile(&sig, store.theme_id(), &compiler, &store);
            assert!(Arc::ptr_eq(&first, &again));
        }
    }
    assert_eq!(compiler.calls.load(Ordering::SeqCst), WidgetClass::ALL.len());
}

#[test]
fn equal_flag_sets_compile_identically() {
    let registry = registry();
    let store = registry.borrow().active_store().clone();
    let compiler = StyleCompiler::standard();
    let mut cache = ResolutionCache::new();

    for class in WidgetClass::ALL {
        let a = StateSignature::new(class)
            .with_flag(InteractionFlag::Focused)
            .with_flag(InteractionFlag::Checked);
        let b = StateSignature::new(class)
            .with_flag(InteractionFlag::Checked)
            .with_flag(InteractionFlag::Focused);

        let compiled = compiler.compile(&a, &store);
        assert_eq!(compiled, compiler.compile(&b, &store));
        let cached = cache.get_or_compile(&b, store.theme_id(), &compiler, &store);
        assert_eq!(*cached, compiled.declaration);
    }
}

#[test]
fn disabled_ignores_every_other_flag() {
    let registry = registry();
    let store = registry.borrow().active_store().clone();
    let compiler = StyleCompiler::standard();
    let others: Vec<InteractionFlag> = InteractionFlag::ALL
        .into_iter()
        .filter(|flag| *flag != InteractionFlag::Disabled)
        .collect();

    for class in WidgetClass::ALL {
        for role in [None, Some("syntax"), Some("flat")] {
            let base = StateSignature::new(class);
            let base = match role {
                Some(role) => base.with_role(role),
                None => base,
            };
            let disabled = base.with_flag(InteractionFlag::Disabled);
            let expected = compiler.compile(&disabled, &store).declaration;

            for mask in 0u8..(1 << others.len()) {
                let sig = others
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1u8 << *i) != 0)
                    .fold(disabled.clone(), |sig, (_, flag)| sig.with_flag(*flag));
                assert_eq!(
                    compiler.compile(&sig, &store).declaration,
                    expected,
                    "{class} {role:?} {mask:05b}"
                );
            }
        }
    }

    let button = compiler
        .compile(
            &StateSignature::new(WidgetClass::Button).with_flag(InteractionFlag::Disabled),
            &store,
        )
        .declaration;
    assert_eq!(
        background(&button),
        Some(&StyleValue::Color(Color::from_hex(0x181825)))
    );
    assert_eq!(
        button.get(StyleProperty::Opacity),
        Some(&StyleValue::Dimension(0.4))
    );
}

#[test]
fn disabled_selected_bubble_matches_disabled_bubble() {
    let registry = ThemeRegistry::with_builtin_themes().unwrap();
    let store = registry.active_store().clone();
    let compiler = StyleCompiler::standard();
    let disabled = StateSignature::new(WidgetClass::Bubble).with_flag(InteractionFlag::Disabled);

    assert_eq!(
        compiler
            .compile(&disabled.clone().with_flag(InteractionFlag::Selected), &store)
            .declaration
            .get(StyleProperty::BorderWidth),
        compiler.compile(&disabled, &store).declaration.get(StyleProperty::BorderWidth)
    );
}

#[test]
fn unresolvable_token_keeps_previous_value_across_switch() {
    let on_accent = Color::from_hex(0x11111B);
    let mut with_on_accent = light_tokens();
    with_on_accent.push(TokenDefinition::color("text.on_accent", on_accent));
    let registry = ThemeRegistry::builder()
        .fallbacks(Vec::new())
        .theme("a", with_on_accent)
        .theme("b", dark_tokens())
        .active("a")
        .build()
        .unwrap();
    let engine = StyleEngine::with_standard_rules(Rc::new(RefCell::new(registry)));
    let (calls, sink) = recording_sink();
    let button = engine.attach(sink, WidgetClass::Button, None);
    let foreground = Some(StyleValue::Color(on_accent));
    assert_eq!(
        button.declaration().unwrap().get(StyleProperty::Foreground).cloned(),
        foreground
    );

    engine.set_theme("b").unwrap();

    let calls = calls.borrow();
    assert_eq!(calls.len(), 2);
    let (declaration, delta) = &calls[1];
    assert!(!delta.removed.contains(&StyleProperty::Foreground));
    assert!(delta.changed.iter().all(|(p, _)| *p != StyleProperty::Foreground));
    assert_eq!(declaration.get(StyleProperty::Foreground).cloned(), foreground);
    assert!(declaration.unresolved().contains(&StyleProperty::Foreground));
    assert_eq!(
        button.declaration().unwrap().get(StyleProperty::Foreground).cloned(),
        foreground
    );
}

#[test]
fn idempotent_flag_update_does_not_reapply() {
    let mut tracker = StateTracker::new();
    let id = tracker.register(WidgetClass::Button, None);
    let set = tracker.update_flags(id, InteractionFlag::Checked, true).unwrap();
    assert_eq!(tracker.update_flags(id, InteractionFlag::Checked, true), Some(set));

    let engine = StyleEngine::with_standard_rules(registry());
    let (calls, sink) = recording_sink();
    let button = engine.attach(sink, WidgetClass::Button, None);

    assert!(button.notify_state_changed(InteractionFlag::Checked, true));
    let signature = button.signature();
    assert!(!button.notify_state_changed(InteractionFlag::Checked, true));
    assert_eq!(button.signature(), signature);
    assert_eq!(calls.borrow().len(), 2);
}

#[test]
fn reloading_active_theme_restyles_bindings() {
    let registry = registry();
    let engine = StyleEngine::with_standard_rules(registry.clone());
    let (calls, sink) = recording_sink();
    let button = engine.attach(sink, WidgetClass::Button, None);

    let mut tokens = dark_tokens();
    tokens[0] = TokenDefinition::color("accent.default", Color::from_hex(0xFF0000));
    registry.borrow_mut().load_theme("dark", tokens).unwrap();

    assert_eq!(
        background(&button.declaration().unwrap()),
        Some(&StyleValue::Color(Color::from_hex(0xFF0000)))
    );
    assert_eq!(calls.borrow().len(), 2);
}

#[test]
fn widgets_sharing_a_signature_share_a_declaration() {
    let engine = StyleEngine::with_standard_rules(registry());
    let (_a_calls, a_sink) = recording_sink();
    let (_b_calls, b_sink) = recording_sink();
    let a = engine.attach(a_sink, WidgetClass::Bubble, Some("syntax"));
    let b = engine.attach(b_sink, WidgetClass::Bubble, Some("syntax"));

    assert!(Arc::ptr_eq(&a.declaration().unwrap(), &b.declaration().unwrap()));
    assert_eq!(engine.cache_stats().misses, 1);
    assert_eq!(engine.cache_stats().hits, 1);
}

#[test]
fn registries_are_isolated() {
    let first = StyleEngine::with_standard_rules(registry());
    let second = StyleEngine::with_standard_rules(registry());
    let (_c1, s1) = recording_sink();
    let (_c2, s2) = recording_sink();
    let a = first.attach(s1, WidgetClass::Panel, None);
    let b = second.attach(s2, WidgetClass::Panel, None);

    second.set_theme("light").unwrap();

    assert_eq!(first.registry().borrow().active_theme_id().as_str(), "dark");
    assert_ne!(a.declaration(), b.declaration());
}
