//! Fallback tokens
//!
//! Every store carries one `fallback.<category>` token per category. When a
//! rule references a token the theme does not define, the compiler uses the
//! fallback of the expected category instead.

use nuix_core::Color;

use crate::tokens::{TokenCategory, TokenDefinition};

/// Name of the fallback token for `category`
pub fn fallback_token_name(category: TokenCategory) -> &'static str {
    match category {
        TokenCategory::Color => "fallback.color",
        TokenCategory::Dimension => "fallback.dimension",
        TokenCategory::Font => "fallback.font",
        TokenCategory::Icon => "fallback.icon",
    }
}

/// The registry-wide fallback set merged into every store by default
pub fn standard_fallbacks() -> Vec<TokenDefinition> {
    vec![
        TokenDefinition::color(fallback_token_name(TokenCategory::Color), Color::from_hex(0x808080)),
        TokenDefinition::dimension(fallback_token_name(TokenCategory::Dimension), 0.0),
        TokenDefinition::font(fallback_token_name(TokenCategory::Font), "sans-serif", 12.0, 400),
        TokenDefinition::icon(fallback_token_name(TokenCategory::Icon), "missing"),
    ]
}
