//! Built-in themes derived from the Catppuccin design system
//!
//! Mocha backs the `dark` theme and Latte backs `light`. Both define the full
//! token vocabulary used by the standard widget rule tables.

mod catppuccin;

use nuix_core::Color;

use crate::tokens::TokenDefinition;
use catppuccin::{latte, mocha, Palette};

/// Id of the built-in dark theme
pub const DARK: &str = "dark";

/// Id of the built-in light theme
pub const LIGHT: &str = "light";

/// Token definitions of the built-in dark theme (Catppuccin Mocha)
pub fn dark() -> Vec<TokenDefinition> {
    let mut defs = palette_tokens(&mocha::PALETTE);
    defs.extend([
        TokenDefinition::color("accent.hover", Color::from_hex(0x9ECBFC)),
        TokenDefinition::color("accent.pressed", Color::from_hex(0x6C9BE0)),
        TokenDefinition::color("text.on_accent", mocha::PALETTE.crust),
        TokenDefinition::color("separator.shadow", Color::BLACK.with_alpha(0.4)),
    ]);
    defs
}

/// Token definitions of the built-in light theme (Catppuccin Latte)
pub fn light() -> Vec<TokenDefinition> {
    let mut defs = palette_tokens(&latte::PALETTE);
    defs.extend([
        TokenDefinition::color("accent.hover", Color::from_hex(0x1758D1)),
        TokenDefinition::color("accent.pressed", Color::from_hex(0x114AB3)),
        TokenDefinition::color("text.on_accent", Color::WHITE),
        TokenDefinition::color("separator.shadow", Color::WHITE.with_alpha(0.6)),
    ]);
    defs
}

/// Tokens shared by both flavors, mapped from a palette
fn palette_tokens(p: &Palette) -> Vec<TokenDefinition> {
    vec![
        // Accent
        TokenDefinition::color("accent.default", p.blue),
        TokenDefinition::color("accent.checked", p.sapphire),
        TokenDefinition::color("accent.subtle", p.blue.with_alpha(0.15)),
        // Surfaces
        TokenDefinition::color("surface.default", p.base),
        TokenDefinition::color("surface.hover", p.surface0),
        TokenDefinition::color("surface.raised", p.mantle),
        TokenDefinition::color("surface.selected", p.blue.with_alpha(0.3)),
        TokenDefinition::color("surface.disabled", p.mantle),
        // Text
        TokenDefinition::color("text.default", p.text),
        TokenDefinition::color("text.muted", p.subtext0),
        TokenDefinition::color("text.disabled", p.overlay0),
        // Borders
        TokenDefinition::color("border.default", p.surface1),
        TokenDefinition::color("border.hover", p.surface2),
        TokenDefinition::color("border.focus", p.blue),
        TokenDefinition::color("border.disabled", p.surface0),
        // Inputs
        TokenDefinition::color("input.default", p.surface0),
        TokenDefinition::color("input.hover", p.surface1),
        TokenDefinition::color("input.focus", p.base),
        // Tag bubbles
        TokenDefinition::color("bubble.default", p.peach),
        TokenDefinition::color("bubble.hover", p.yellow),
        TokenDefinition::color("bubble.syntax", p.mauve),
        TokenDefinition::color("bubble.text", Color::WHITE),
        // Dimensions
        TokenDefinition::dimension("radius.default", 6.0),
        TokenDefinition::dimension("radius.small", 4.0),
        TokenDefinition::dimension("spacing.none", 0.0),
        TokenDefinition::dimension("spacing.sm", 4.0),
        TokenDefinition::dimension("spacing.md", 8.0),
        TokenDefinition::dimension("border.width", 1.0),
        TokenDefinition::dimension("border.width.focus", 2.0),
        TokenDefinition::dimension("bubble.height", 20.0),
        TokenDefinition::dimension("bubble.padding", 10.0),
        TokenDefinition::dimension("separator.thickness", 1.0),
        TokenDefinition::dimension("opacity.default", 1.0),
        TokenDefinition::dimension("opacity.disabled", 0.4),
        // Fonts
        TokenDefinition::font("font.body", "Inter", 13.0, 400),
        TokenDefinition::font("font.small", "Inter", 12.0, 400),
        TokenDefinition::font("font.strong", "Inter", 13.0, 600),
        // Icons
        TokenDefinition::icon("icon.clear", "edit-clear"),
        TokenDefinition::icon("icon.check", "check"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{TokenStore, REQUIRED_TOKENS};

    #[test]
    fn builtin_themes_build() {
        for (id, defs) in [(DARK, dark()), (LIGHT, light())] {
            let store = TokenStore::build(id.into(), defs, &[]).unwrap();
            for name in REQUIRED_TOKENS {
                assert!(store.contains(name), "{id} lacks {name}");
            }
        }
    }

    #[test]
    fn builtin_themes_share_vocabulary() {
        let mut dark: Vec<String> = dark().into_iter().map(|d| d.name).collect();
        let mut light: Vec<String> = light().into_iter().map(|d| d.name).collect();
        dark.sort();
        light.sort();
        assert_eq!(dark, light);
    }

    #[test]
    fn flavors_have_distinct_surfaces() {
        let surface = |defs: Vec<TokenDefinition>| {
            defs.into_iter()
                .find(|d| d.name == "surface.default")
                .map(|d| d.value)
        };
        assert_ne!(surface(dark()), surface(light()));
    }
}
