use std::cell::RefCell;
use std::ops::ControlFlow;
use std::rc::Rc;

use nuix_core::Color;
use nuix_theme::{
    fallback_token_name, ThemeConfig, ThemeError, ThemeRegistry, TokenCategory, TokenDefinition,
    TokenValue,
};

const CONFIG: &str = r##"
default = "dark"

[[theme]]
id = "dark"
name = "Dark"
[theme.tokens]
"accent.default" = "#3A8FDE"
"surface.default" = "#1E1E2E"
"text.default" = "#CDD6F4"

[[theme]]
id = "light"
name = "Light"
[theme.tokens]
"accent.default" = "#1E66F5"
"surface.default" = "#EFF1F5"
"text.default" = "#4C4F69"
"##;

#[test]
fn builtin_registry_starts_dark() {
    let registry = ThemeRegistry::with_builtin_themes().unwrap();
    assert_eq!(registry.active_theme_id().as_str(), "dark");
    assert!(registry.contains("light"));
    for category in TokenCategory::ALL {
        let token = registry.resolve(fallback_token_name(category)).unwrap();
        assert_eq!(token.category(), category);
    }
}

#[test]
fn registry_from_config_activates_default() {
    let config = ThemeConfig::from_toml_str(CONFIG).unwrap();
    let registry = ThemeRegistry::from_config(&config).unwrap();

    assert_eq!(registry.active_theme_id().as_str(), "dark");
    assert_eq!(
        registry.resolve("accent.default").unwrap().value(),
        &TokenValue::Color(Color::from_hex(0x3A8FDE))
    );
}

#[test]
fn config_with_unknown_default_is_rejected() {
    let mut config = ThemeConfig::from_toml_str(CONFIG).unwrap();
    config.default = Some("sepia".to_string());
    assert!(matches!(
        ThemeRegistry::from_config(&config),
        Err(ThemeError::UnknownTheme(_))
    ));
}

#[test]
fn incomplete_theme_document_is_rejected() {
    let config = ThemeConfig::from_toml_str(
        r##"
[[theme]]
id = "partial"
[theme.tokens]
"surface.default" = "#000000"
"text.default" = "#FFFFFF"
"##,
    )
    .unwrap();
    assert!(matches!(
        ThemeRegistry::from_config(&config),
        Err(ThemeError::MissingRequiredToken { ref name, .. }) if name == "accent.default"
    ));
}

#[test]
fn theme_switch_delivers_new_store_before_returning() {
    let mut registry = ThemeRegistry::with_builtin_themes().unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = seen.clone();
    registry.subscribe(move |event| {
        let accent = event.store.resolve("accent.default").unwrap().value().clone();
        log.borrow_mut().push((event.current.to_string(), accent));
        ControlFlow::Continue(())
    });

    registry.set_active("light").unwrap();

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, "light");
    assert_eq!(&seen[0].1, registry.resolve("accent.default").unwrap().value());
}

#[test]
fn custom_fallback_set_replaces_standard_one() {
    let registry = ThemeRegistry::builder()
        .fallbacks(vec![TokenDefinition::color("fallback.color", Color::BLACK)])
        .theme(
            "mono",
            [
                TokenDefinition::color("accent.default", Color::WHITE),
                TokenDefinition::color("surface.default", Color::BLACK),
                TokenDefinition::color("text.default", Color::WHITE),
            ],
        )
        .build()
        .unwrap();

    assert!(registry.resolve("fallback.color").is_ok());
    assert!(matches!(
        registry.resolve("fallback.dimension"),
        Err(ThemeError::UndefinedToken { .. })
    ));
}
