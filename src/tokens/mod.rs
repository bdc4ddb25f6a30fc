//! The token data model exchanged between the lexer, the parser and the sink.
//!
//! A [`Token`] is a plain value: a byte span into the source buffer, a line
//! number, a semantic [`TokenKind`], the identity of a recognized literal
//! ([`Lit`], when any) and an auxiliary [`Mark`]. Tokens never reference each
//! other and are copied at every hand-off.

mod lit;

pub use lit::{Lit, LitFlags};

#[cfg(feature = "deser")]
use serde::{Deserialize, Serialize};

/// A byte range into the source buffer.
///
/// Virtual tokens carry an empty span anchored at the token that triggered
/// them.
#[cfg_attr(feature = "deser", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    start: u32,
    end: u32,
}

impl Span {
    /// Creates a new span. `start` must not exceed `end`.
    #[inline]
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// The byte offset of the first byte.
    #[inline]
    pub fn start(self) -> u32 {
        self.start
    }

    /// The byte offset one past the last byte.
    #[inline]
    pub fn end(self) -> u32 {
        self.end
    }

    /// The length of the span in bytes.
    #[inline]
    pub fn len(self) -> u32 {
        self.end - self.start
    }

    /// Whether the span covers no bytes, as every virtual token's does.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
}

/// The semantic kind of a token.
///
/// Kinds are semantic rather than syntactic: a `{` is reported as
/// [`TokenKind::Exec`] or [`TokenKind::Dict`] depending on what the parser
/// decided it opens, and a ternary `:` is a [`TokenKind::Close`].
#[cfg_attr(feature = "deser", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// End of the stream. Always the last token delivered; `line_no` is 0.
    Eof,
    /// A block-opening `{` in statement position.
    Exec,
    /// An object-literal or class-body `{`.
    Dict,
    /// An ambiguous `{` before the parser resolved it. Internal only; never
    /// reaches the sink.
    Brace,
    /// `[`
    Array,
    /// `(`
    Paren,
    /// The `${` opening a template-literal interpolation.
    TemplateBrace,
    /// The `?` opening a ternary.
    Ternary,
    /// `}`, `]`, `)` or a ternary-closing `:`.
    Close,
    /// A label or object-property `:`.
    Colon,
    /// A `;`, real or inserted. ASI semicolons have an empty span.
    Semicolon,
    /// An operator, including word operators such as `in`, `instanceof`,
    /// `typeof` and contextual `yield`/`await`/`of`.
    Op,
    /// `=>`
    Arrow,
    /// A numeric literal.
    Number,
    /// A string literal or template-literal chunk.
    String,
    /// A regular expression literal, flags included.
    Regexp,
    /// A comment (`//…`, `/*…*/` or a leading `#!…`).
    Comment,
    /// An identifier the parser has not classified yet. Reaches the sink only
    /// as the provisional half of the deferred `async` resolution.
    Lit,
    /// An identifier classified as a plain symbol.
    Symbol,
    /// An identifier classified as a reserved word.
    Keyword,
    /// An identifier used as a statement label.
    Label,
    /// Virtual marker preceding each non-attached statement.
    Start,
    /// Virtual marker gluing a substatement to its parent construct.
    Attach,
    /// Internal marker for the top of a program or function body.
    Top,
    /// An unresolved `/`. Internal only; resolved to [`TokenKind::Op`] or
    /// [`TokenKind::Regexp`] when the parser supplies a value hint.
    Slash,
}

impl TokenKind {
    /// Whether this kind opens a bracket pair tracked by the lexer stack.
    #[inline]
    pub(crate) fn is_open(self) -> bool {
        matches!(
            self,
            Self::Ternary | Self::Paren | Self::Array | Self::Brace | Self::TemplateBrace
        )
    }
}

/// Auxiliary tag on a token.
#[cfg_attr(feature = "deser", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mark {
    /// No tag.
    #[default]
    None,
    /// This token re-emits an earlier provisional [`TokenKind::Lit`] with its
    /// resolved kind; an ordered consumer should amend the earlier token.
    Resolve,
}

/// The sole record exchanged across the lexer/parser boundary and delivered
/// to the sink.
#[cfg_attr(feature = "deser", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) span: Span,
    pub(crate) line_no: u32,
    pub(crate) lit: Option<Lit>,
    pub(crate) mark: Mark,
}

impl Token {
    /// Creates a token.
    #[inline]
    pub(crate) fn new(kind: TokenKind, span: Span, line_no: u32, lit: Option<Lit>) -> Self {
        Self {
            kind,
            span,
            line_no,
            lit,
            mark: Mark::None,
        }
    }

    /// The placeholder used before any token has been observed.
    #[inline]
    pub(crate) fn none() -> Self {
        Self::new(TokenKind::Eof, Span::default(), 0, None)
    }

    /// The marker for the top of a program or function body.
    #[inline]
    pub(crate) fn top() -> Self {
        Self::new(TokenKind::Top, Span::default(), 0, None)
    }

    /// The kind of the token.
    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The byte span of the token in the source buffer.
    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    /// The 1-based line of the first byte; 0 for EOF. Virtual tokens inherit
    /// the line of the last real token before them.
    #[inline]
    pub fn line_no(&self) -> u32 {
        self.line_no
    }

    /// The identity of the recognized reserved word or canonical operator,
    /// if any. `None` for user identifiers and arbitrary text.
    #[inline]
    pub fn lit(&self) -> Option<Lit> {
        self.lit
    }

    /// The auxiliary mark.
    #[inline]
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// The token's text, sliced out of the source buffer it was lexed from.
    #[inline]
    pub fn text<'a>(&self, src: &'a str) -> &'a str {
        &src[self.span.start as usize..self.span.end as usize]
    }
}
