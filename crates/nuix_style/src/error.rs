//! Style compilation errors

use nuix_theme::{ThemeId, TokenCategory};
use thiserror::Error;

use crate::signature::WidgetClass;

/// Defects found while compiling a declaration
///
/// Compilation never fails outright: a defective property is omitted from
/// the declaration and the defect is reported alongside it.
#[derive(Clone, Debug, Error, Hash, Eq, PartialEq)]
pub enum CompilerError {
    #[error(
        "theme '{theme_id}' cannot resolve '{token}' and defines no {category} fallback"
    )]
    FallbackMissing {
        theme_id: ThemeId,
        token: String,
        category: TokenCategory,
    },

    #[error("no rule table for widget class '{0}'")]
    MissingRuleTable(WidgetClass),
}
