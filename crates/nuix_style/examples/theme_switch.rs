//! Theme Switch Demo
//!
//! Attaches a few widgets, drives them through interaction states and
//! switches themes, printing every style application.
//!
//! Run with:
//! `cargo run -p nuix_style --example theme_switch`
//!
//! `RUST_LOG=trace` shows cache hits and misses.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use nuix_core::{event_types, InteractionFlag};
use nuix_style::{StyleDeclaration, StyleDelta, StyleEngine, StyleSink, WidgetClass};
use nuix_theme::{ThemeConfig, ThemeRegistry};
use tracing_subscriber::EnvFilter;

/// Prints what a real widget would apply
struct PrintSink {
    name: &'static str,
}

impl StyleSink for PrintSink {
    fn apply_style(&mut self, declaration: &StyleDeclaration, delta: &StyleDelta) {
        println!(
            "{:>10}: {} properties, {} changed, {} removed",
            self.name,
            declaration.len(),
            delta.changed.len(),
            delta.removed.len()
        );
        for (property, value) in &delta.changed {
            println!("{:>10}    {property} = {value:?}", "");
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ThemeConfig::from_toml_str(include_str!("themes.toml"))?;
    let registry = Rc::new(RefCell::new(ThemeRegistry::from_config(&config)?));
    let engine = StyleEngine::with_standard_rules(registry.clone());

    let button = engine.attach(PrintSink { name: "button" }, WidgetClass::Button, None);
    let input = engine.attach(PrintSink { name: "input" }, WidgetClass::LineEdit, Some("bubbles"));
    let tag = engine.attach(PrintSink { name: "tag" }, WidgetClass::Bubble, Some("syntax"));

    println!("-- hover and press the button");
    button.handle_event(event_types::POINTER_ENTER);
    button.handle_event(event_types::POINTER_DOWN);
    button.handle_event(event_types::POINTER_UP);
    button.handle_event(event_types::POINTER_LEAVE);

    println!("-- focus the input, select the tag");
    input.handle_event(event_types::FOCUS);
    tag.notify_state_changed(InteractionFlag::Selected, true);

    println!("-- switch to light");
    engine.set_theme("light")?;

    println!("-- disable the button");
    button.notify_state_changed(InteractionFlag::Disabled, true);

    let stats = engine.cache_stats();
    tracing::info!(
        "{} themes, {} cached declarations, {} hits / {} misses",
        registry.borrow().theme_ids().len(),
        engine.cache_len(),
        stats.hits,
        stats.misses
    );
    Ok(())
}
