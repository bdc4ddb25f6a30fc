//! Template-literal resume state.
//!
//! A template literal is delivered as a sequence of [`TokenKind::String`]
//! chunks separated by `TemplateBrace`/`Close` pairs. The lexer carries a
//! one-shot flag across calls so that the `${` and the continuation chunk
//! after a closing `}` are produced without rescanning.
//!
//! [`TokenKind::String`]: crate::tokens::TokenKind::String

use super::{cursor::Cursor, string};

/// One-shot lexer state for template literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TemplateFlag {
    /// Normal tokenising.
    None,
    /// Emit a synthetic two-byte `${` token next.
    PendingBrace,
    /// The next call scans a template continuation chunk from the current
    /// position, with no opening backtick.
    Resume,
}

/// Scans a template continuation chunk; returns whether it stopped at a
/// further `${`.
pub(super) fn resume(cursor: &mut Cursor<'_>) -> bool {
    string::scan(cursor, true)
}
