//! Krait is a streaming, single-pass classifier for ECMAScript source text.
//!
//! Given a UTF-8 source buffer, krait emits a linear stream of classified
//! tokens that a downstream consumer (syntax highlighter, minifier,
//! source-map builder, import rewriter) can use without itself implementing
//! the language's ambiguity rules. No AST is built: the structure of the
//! program is implicit in the open/close tokens and in the virtual markers
//! ([`TokenKind::Start`], [`TokenKind::Attach`], zero-length
//! [`TokenKind::Semicolon`]) that the parser inserts into the stream.
//!
//! The crate is split in two layers:
//!  - [`Lexer`]: byte-level recognition producing provisional tokens,
//!    including the context-sensitive `/` (division vs. regular expression),
//!    template-literal interpolation and the ternary `:`.
//!  - [`Parser`]: a pushdown automaton over a bounded stack of parse contexts
//!    that resolves the lexer's ambiguities, inserts the virtual tokens and
//!    classifies every identifier as keyword, symbol or label.
//!
//! # Example
//!
//! ```
//! use krait::{classify, TokenKind};
//!
//! let mut kinds = Vec::new();
//! classify("var x = 1;", false, |tok| kinds.push(tok.kind())).unwrap();
//!
//! assert_eq!(
//!     kinds,
//!     vec![
//!         TokenKind::Start,
//!         TokenKind::Keyword,   // var
//!         TokenKind::Symbol,    // x
//!         TokenKind::Op,        // =
//!         TokenKind::Number,    // 1
//!         TokenKind::Semicolon, // ;
//!         TokenKind::Eof,
//!     ]
//! );
//! ```

#![deny(
    unused_qualifications,
    clippy::all,
    unused_import_braces,
    unused_lifetimes,
    unreachable_pub,
    trivial_numeric_casts,
    missing_debug_implementations,
    non_ascii_idents,
    rust_2018_idioms,
    future_incompatible,
    nonstandard_style
)]
#![warn(clippy::perf, clippy::single_match_else, clippy::dbg_macro)]
#![allow(
    clippy::cognitive_complexity,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::too_many_lines
)]

pub mod error;
pub mod lexer;
pub mod parser;
mod profiler;
pub mod tokens;

pub use crate::{
    error::Error,
    lexer::{InputElement, Lexer},
    parser::{Context, Parser},
    tokens::{Lit, LitFlags, Mark, Span, Token, TokenKind},
};

/// Classifies a whole source buffer in one call, feeding every emitted token
/// to `sink`.
///
/// `module` enables module statements (`import`/`export`) and starts the
/// session in strict context.
pub fn classify<S>(src: &str, module: bool, sink: S) -> Result<(), Error>
where
    S: FnMut(&Token),
{
    Parser::new(src, module).run(sink)
}
