//! The expression state: the largest single state of the machine.
//!
//! An `Expr` frame is either the statement-level expression of a block (or
//! hosted do-while statement), or a bracketed group. The state resolves ASI,
//! arrow functions, ternaries, dict commas, word operators and the deferred
//! `async` arrow head.

use super::{
    always_keyword,
    frame::{FrameKind, Start},
    token_valuelike, token_valuelike_keyword, unary, Parser, Sink,
};
use crate::{
    error::Error,
    lexer::InputElement,
    tokens::{Lit, LitFlags, TokenKind},
};

impl<'a> Parser<'a> {
    pub(super) fn consume_expr(&mut self, sink: &mut Sink<'_>) -> Result<(), Error> {
        let ptype = self.curr().prev.kind;

        match self.tok.kind {
            TokenKind::Semicolon => {
                // the semicolon belongs to the host when this expression is a
                // statement; elsewhere (a `for` head, a group) it stays put
                if self.expr_in_statement() {
                    let _ = self.pop();
                }
                self.record_walk(sink, InputElement::RegExp)
            }

            TokenKind::Arrow => {
                if ptype != TokenKind::Paren && ptype != TokenKind::Symbol {
                    // not a valid arrow head; treat the arrow as an operator
                    return self.record_walk(sink, InputElement::RegExp);
                }
                self.start_arrowfunc(sink, false)
            }

            TokenKind::Eof | TokenKind::Close => {
                if self.tok.kind == TokenKind::Eof && !self.expr_in_statement() {
                    // EOF only closes a statement-level expression; anything
                    // else is an unclosed construct for the drain to flag
                    return Ok(());
                }

                let popped = self.pop();
                let parent_kind = self.curr().kind;

                // a statement-level close is handed back to the host, with
                // ASI if the statement had content
                let stmt = match parent_kind {
                    FrameKind::Block => true,
                    FrameKind::Control => {
                        self.curr().start == Start::Lit(Lit::Do)
                            && !matches!(popped.start, Start::Open(_))
                    }
                    _ => false,
                };
                if stmt {
                    if ptype != TokenKind::Eof {
                        self.yield_virt(sink, TokenKind::Semicolon);
                    }
                    return Ok(());
                }

                match parent_kind {
                    // closing a group inside an expression leaves a value,
                    // except the ternary's `:` which starts the else arm
                    FrameKind::Expr => {
                        let hint = if popped.start == Start::Open(TokenKind::Ternary) {
                            InputElement::RegExp
                        } else {
                            InputElement::Div
                        };
                        self.skip_walk(sink, hint)
                    }
                    // `async (...)`: the group's close may settle the arrow
                    FrameKind::Async => self.skip_walk(sink, InputElement::Div),
                    _ => {
                        if popped.start != Start::None {
                            // control head, function params and the like; no
                            // value after the close
                            self.skip_walk(sink, InputElement::RegExp)
                        } else {
                            // a close with no group, e.g. `{ class extends }`;
                            // let the parent state sort it out
                            Ok(())
                        }
                    }
                }
            }

            TokenKind::Brace => {
                if ptype != TokenKind::Op && self.curr().start == Start::None {
                    // not a value position: this brace starts a block, so the
                    // statement is over (with ASI if it spanned a line)
                    let yield_asi = self.expr_in_statement()
                        && ptype != TokenKind::Eof
                        && self.tok.line_no != self.curr().prev.line_no;
                    let _ = self.pop();
                    if yield_asi {
                        self.yield_virt(sink, TokenKind::Semicolon);
                    }
                    return Ok(());
                }
                if self.curr().start == Start::Lit(Lit::Extends) && ptype != TokenKind::Eof {
                    // the brace after `extends expr` is the class body
                    let _ = self.pop();
                    return Ok(());
                }
                self.tok.kind = TokenKind::Dict;
                self.record_walk(sink, InputElement::RegExp)?;
                self.push(FrameKind::Dict);
                Ok(())
            }

            TokenKind::Ternary
            | TokenKind::Array
            | TokenKind::Paren
            | TokenKind::TemplateBrace => {
                let kind = self.tok.kind;
                self.record_walk(sink, InputElement::RegExp)?;
                self.push(FrameKind::Expr);
                self.curr_mut().start = Start::Open(kind);
                Ok(())
            }

            TokenKind::Lit | TokenKind::String | TokenKind::Regexp | TokenKind::Number => {
                self.consume_expr_value(sink)
            }

            TokenKind::Op => {
                if self.tok.lit == Some(Lit::Comma) {
                    // a comma in a dict puts us back on the left side
                    if self.parent().kind == FrameKind::Dict {
                        let _ = self.pop();
                        return Ok(());
                    }
                    // clears any async-arrow context carried by this branch
                    let context = self.parent().context;
                    self.curr_mut().context = context;
                    return self.record_walk(sink, InputElement::RegExp);
                }

                if matches!(self.tok.lit, Some(Lit::Inc) | Some(Lit::Dec)) {
                    if ptype != TokenKind::Eof && ptype != TokenKind::Op {
                        if self.tok.line_no == self.curr().prev.line_no {
                            // right side, `a++`: not recorded
                            return self.skip_walk(sink, InputElement::RegExp);
                        }
                        // a PostfixExpression forbids the line break; the op
                        // starts a fresh statement instead
                        if self.expr_in_statement() {
                            self.yield_virt(sink, TokenKind::Semicolon);
                            self.yield_virt(sink, TokenKind::Start);
                        }
                    }
                    return self.record_walk(sink, InputElement::RegExp);
                }

                self.record_walk(sink, InputElement::RegExp)
            }

            TokenKind::Colon => {
                // `case {}:` and friends; the left side was an expression of
                // its own
                if self.expr_in_statement() {
                    let _ = self.pop();
                }
                self.record_walk(sink, InputElement::RegExp)
            }

            _ => Err(Error::Internal),
        }
    }

    /// A value-shaped token inside an expression.
    fn consume_expr_value(&mut self, sink: &mut Sink<'_>) -> Result<(), Error> {
        let ptype = self.curr().prev.kind;

        // `in` and `instanceof` are operators wherever they appear
        if self.tok.kind == TokenKind::Lit
            && self
                .tok
                .lit
                .map_or(false, |l| l.flags().contains(LitFlags::REL_OP))
        {
            self.tok.kind = TokenKind::Op;
            return self.record_walk(sink, InputElement::RegExp);
        }

        // a chunk continuing a template literal never triggers ASI; the
        // newlines inside `${...}` are not statement breaks
        if self.tok.kind == TokenKind::String && ptype == TokenKind::TemplateBrace {
            return self.record_walk(sink, InputElement::Div);
        }

        // ASI: a value on a fresh line directly after a completed value
        if self.expr_in_statement()
            && ptype != TokenKind::Eof
            && ptype != TokenKind::Op
            && self.tok.line_no != self.curr().prev.line_no
        {
            let _ = self.pop();
            self.yield_virt(sink, TokenKind::Semicolon);
            return Ok(());
        }

        if self.tok.kind == TokenKind::Lit {
            if self.tok.lit.is_some() {
                return self.consume_expr_lit(sink);
            }
            self.tok.kind = TokenKind::Symbol;
        }
        self.record_walk(sink, InputElement::Div)
    }

    /// An identifier with a recognized identity inside an expression.
    fn consume_expr_lit(&mut self, sink: &mut Sink<'_>) -> Result<(), Error> {
        // a function or class in value position
        if self.enact_defn(sink)? {
            return Ok(());
        }

        let outer = self.tok.lit;
        let context = self.curr().context;

        if unary(outer, context) {
            self.tok.kind = TokenKind::Op;
            self.record_walk(sink, InputElement::RegExp)?;
            if self.curr().prev.lit == Some(Lit::Yield) {
                // yield is a restricted production; inside a group this does
                // nothing
                let _ = self.yield_restrict_asi(sink);
            }
            return Ok(());
        }

        // non-async `await` used like a unary op: an error, but parsed as a
        // keyword, which needs a value lookahead
        if outer == Some(Lit::Await) && token_valuelike(self.lexer.peek()) {
            self.tok.kind = TokenKind::Keyword;
            return self.record_walk(sink, InputElement::RegExp);
        }

        let ptype = self.curr().prev.kind;

        // inside a `for (...)` head: declarations at the front, `of` between
        // two value-like positions
        let up = self.parent();
        if up.kind == FrameKind::Control && up.start == Start::Lit(Lit::For) {
            if ptype == TokenKind::Eof {
                if self.match_decl(sink)? {
                    return Ok(());
                }
            } else if outer == Some(Lit::Of)
                && ptype != TokenKind::Op
                && token_valuelike_keyword(self.lexer.peek())
            {
                self.tok.kind = TokenKind::Op;
                return self.record_walk(sink, InputElement::RegExp);
            }
        }

        // aggressive keyword match: an invalid keyword stays a keyword, but
        // on a fresh line it restarts the statement first
        if always_keyword(outer, context) {
            if self.expr_in_statement()
                && ptype != TokenKind::Eof
                && self.tok.line_no != self.curr().prev.line_no
            {
                let _ = self.pop();
                self.yield_virt(sink, TokenKind::Semicolon);
                return Ok(());
            }
            self.tok.kind = TokenKind::Keyword;
            return self.record_walk(sink, InputElement::RegExp);
        }

        if outer == Some(Lit::Async) {
            let prev = self.curr().prev;
            // only `= async ...` and a fresh position can head an arrow;
            // `1 + async () => x` is invalid
            let applicable = match prev.kind {
                TokenKind::Eof => true,
                TokenKind::Op => prev.lit == Some(Lit::Assign),
                _ => false,
            };
            if applicable {
                match self.lexer.peek().kind {
                    TokenKind::Lit => {
                        // `async foo` always makes a keyword
                        self.tok.kind = TokenKind::Keyword;
                        self.record_walk(sink, InputElement::Neutral)?;
                        self.push(FrameKind::Async);
                        return Ok(());
                    }
                    TokenKind::Paren => {
                        // stays provisional until the group resolves
                        self.record_walk(sink, InputElement::Neutral)?;
                        self.push(FrameKind::Async);
                        return Ok(());
                    }
                    _ => {}
                }
            }
            self.tok.kind = TokenKind::Symbol;
            return self.record_walk(sink, InputElement::Div);
        }

        // nothing special after all
        self.tok.kind = TokenKind::Symbol;
        self.record_walk(sink, InputElement::Div)
    }
}
