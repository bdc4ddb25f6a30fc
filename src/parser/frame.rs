//! Parse frames: the entries of the parser's pushdown stack.

use bitflags::bitflags;

use crate::tokens::{Lit, Token, TokenKind};

bitflags! {
    /// Execution context flags, inherited through function boundaries.
    ///
    /// The flags change how identifiers classify: `yield` is an operator only
    /// under [`Context::GENERATOR`] (or reserved under [`Context::STRICT`]),
    /// `await` only under [`Context::ASYNC`], and the strict-only reserved
    /// words only under [`Context::STRICT`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Context: u8 {
        /// Strict mode, from a `'use strict'` directive, module top level or
        /// class body.
        const STRICT = 1 << 0;
        /// Inside an `async` function or arrow.
        const ASYNC = 1 << 1;
        /// Inside a generator function.
        const GENERATOR = 1 << 2;
    }
}

/// The parse context a frame represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum FrameKind {
    /// An execution context holding statements.
    Block,
    /// An expression, either statement-level or delimited by a bracket.
    Expr,
    /// The head of a control statement, or a pending do-while.
    Control,
    /// The left side of an object literal or class body.
    Dict,
    /// A function head: optional name, parameters, body.
    Func,
    /// A class head: optional name, optional `extends`, body.
    Class,
    /// An `import`/`export` clause at module top level.
    Module,
    /// The two-token window of an unresolved `async` arrow head.
    Async,
}

/// What opened a frame, when the close handling needs to know.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Start {
    /// Nothing recorded; statement-level expressions.
    None,
    /// An opening bracket kind (`(`, `[`, `?`, `${`).
    Open(TokenKind),
    /// The keyword that opened the frame (`for`, `return`, `extends`, a
    /// declaration, `import`, `export`, `do`).
    Lit(Lit),
}

/// One entry of the parser stack.
#[derive(Debug, Clone, Copy)]
pub(super) struct Frame {
    pub(super) kind: FrameKind,
    /// The most recent token recorded while this frame was current.
    pub(super) prev: Token,
    pub(super) start: Start,
    pub(super) context: Context,
}

impl Frame {
    pub(super) fn new(kind: FrameKind, context: Context) -> Self {
        Self {
            kind,
            prev: Token::none(),
            start: Start::None,
            context,
        }
    }

    /// Whether statements are dispatched directly in this frame: blocks, and
    /// a do-while frame hosting its attached statement.
    pub(super) fn is_statement_host(&self) -> bool {
        match self.kind {
            FrameKind::Block => true,
            FrameKind::Control => self.start == Start::Lit(Lit::Do),
            _ => false,
        }
    }
}
