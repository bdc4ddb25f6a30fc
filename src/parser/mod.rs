//! The pushdown state machine that classifies the provisional token stream.
//!
//! The parser pulls tokens from the [`Lexer`], resolving its ambiguities as
//! it goes: it tells the lexer whether a value precedes each `/`, decides
//! whether a `{` opens a block or an object, classifies every identifier as
//! keyword, symbol or label, and inserts the virtual tokens: `Start` before
//! each unattached statement, `Attach` before each glued substatement, and
//! zero-length `Semicolon` where Automatic Semicolon Insertion applies.
//!
//! State lives on a bounded stack of [`Frame`]s, one per open parse context.
//! There is no token buffering beyond the lexer's single-token prebuffer.
//! The one construct that cannot be classified on sight, an `async` before a
//! parenthesized group, is emitted provisionally and re-emitted with
//! [`Mark::Resolve`] once the group's `=>` (or its absence) settles it.
//!
//! [`Mark::Resolve`]: crate::tokens::Mark::Resolve

mod expression;
mod frame;

#[cfg(test)]
mod tests;

pub use frame::Context;

use self::frame::{Frame, FrameKind, Start};
use crate::{
    error::Error,
    lexer::{InputElement, Lexer},
    profiler::Profiler,
    tokens::{Lit, LitFlags, Mark, Span, Token, TokenKind},
};

/// Maximum depth of the parse stack.
const STACK_SIZE: usize = 512;

/// Sink for emitted tokens.
pub(crate) type Sink<'s> = dyn FnMut(&Token) + 's;

/// A single-use classification session over one source buffer.
#[derive(Debug)]
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    src: &'a [u8],
    module: bool,
    /// The token currently being dispatched.
    tok: Token,
    /// Line of the last real token delivered; virtual tokens inherit it.
    prev_line_no: u32,
    /// Whether `tok` holds a real token yet.
    primed: bool,
    stack: Vec<Frame>,
}

impl<'a> Parser<'a> {
    /// Creates a parser session over `src`.
    ///
    /// `module` enables `import`/`export` statements and starts the session
    /// in strict context.
    pub fn new(src: &'a str, module: bool) -> Self {
        let context = if module {
            Context::STRICT
        } else {
            Context::empty()
        };
        let mut stack = Vec::with_capacity(STACK_SIZE);
        let mut root = Frame::new(FrameKind::Block, context);
        root.prev = Token::top();
        stack.push(root);

        Self {
            lexer: Lexer::new(src),
            src: src.as_bytes(),
            module,
            tok: Token::none(),
            prev_line_no: 1,
            primed: false,
            stack,
        }
    }

    /// Runs the session to EOF, delivering every real and virtual token to
    /// `sink` in source order.
    ///
    /// The stream already delivered stays valid when an error is returned.
    pub fn run<S>(mut self, mut sink: S) -> Result<(), Error>
    where
        S: FnMut(&Token),
    {
        self.run_inner(&mut sink)
    }

    fn run_inner(&mut self, sink: &mut Sink<'_>) -> Result<(), Error> {
        let _timer = Profiler::global().start_event("run", "parsing");

        // Prime the first token; a leading regexp is valid at statement start.
        self.skip_walk(sink, InputElement::RegExp)?;

        let mut unchanged = 0;
        while self.tok.kind != TokenKind::Eof {
            let at = (self.tok.span.start(), self.stack.len());
            self.step(sink)?;

            if self.stack.len() >= STACK_SIZE {
                return Err(Error::Stack);
            }

            // Progress means consuming bytes or moving the stack; some
            // transitions legitimately reclassify the current token while
            // popping frames, and pop chains are bounded by the depth. Two
            // steps that do neither are a wedged machine.
            if (self.tok.span.start(), self.stack.len()) == at {
                unchanged += 1;
                if unchanged > 2 {
                    return Err(Error::NoProgress);
                }
            } else {
                unchanged = 0;
            }
        }

        // Unwind at EOF; only pops may happen, anything else is an unclosed
        // construct.
        let mut depth = self.stack.len();
        while depth > 1 {
            self.step(sink)?;
            let update = self.stack.len();
            if update >= depth {
                break;
            }
            depth = update;
        }

        self.skip_walk(sink, InputElement::Neutral)?; // deliver EOF

        if self.stack.len() != 1 {
            return Err(Error::Stack);
        }
        Ok(())
    }

    // ---- frame plumbing ----------------------------------------------------

    fn curr(&self) -> &Frame {
        self.stack.last().expect("frame stack is never empty")
    }

    fn curr_mut(&mut self) -> &mut Frame {
        self.stack.last_mut().expect("frame stack is never empty")
    }

    fn parent(&self) -> &Frame {
        &self.stack[self.stack.len() - 2]
    }

    fn push(&mut self, kind: FrameKind) {
        let context = self.curr().context;
        self.stack.push(Frame::new(kind, context));
    }

    fn pop(&mut self) -> Frame {
        self.stack.pop().expect("frame stack is never empty")
    }

    /// The bytes of the current token.
    fn tok_bytes(&self) -> &[u8] {
        &self.src[self.tok.span.start() as usize..self.tok.span.end() as usize]
    }

    /// Whether the current `Expr` frame is the statement-level expression of
    /// a statement host (and not a bracket group).
    fn expr_in_statement(&self) -> bool {
        let parent = self.parent();
        match parent.kind {
            FrameKind::Block => true,
            FrameKind::Control => {
                parent.start == Start::Lit(Lit::Do)
                    && !matches!(self.curr().start, Start::Open(_))
            }
            _ => false,
        }
    }

    // ---- token plumbing ----------------------------------------------------

    /// Emits the current token and fetches the next non-comment token,
    /// forwarding comments to the sink as they surface.
    fn skip_walk(&mut self, sink: &mut Sink<'_>, hint: InputElement) -> Result<(), Error> {
        if self.primed {
            self.prev_line_no = self.tok.line_no;
            sink(&self.tok);
        } else {
            self.primed = true;
        }
        loop {
            let tok = self.lexer.next(hint)?;
            if tok.kind != TokenKind::Comment {
                self.tok = tok;
                return Ok(());
            }
            sink(&tok);
        }
    }

    /// Records the current token as the frame's previous token, then emits
    /// it and fetches the next.
    fn record_walk(&mut self, sink: &mut Sink<'_>, hint: InputElement) -> Result<(), Error> {
        self.curr_mut().prev = self.tok;
        self.skip_walk(sink, hint)
    }

    /// Emits a virtual token ahead of the current one and records it as the
    /// frame's previous token.
    fn yield_virt(&mut self, sink: &mut Sink<'_>, kind: TokenKind) {
        let at = self.tok.span.start();
        let tok = Token {
            kind,
            span: Span::new(at, at),
            line_no: self.prev_line_no,
            lit: None,
            mark: Mark::None,
        };
        self.curr_mut().prev = tok;
        sink(&tok);
    }

    /// Restricted-production check: the frame's previous token is a
    /// restricted keyword; insert a semicolon if the current token sits on a
    /// later line or closes the context. Pops a statement-level expression
    /// back to its host.
    fn yield_restrict_asi(&mut self, sink: &mut Sink<'_>) -> bool {
        let line = self.curr().prev.line_no;
        if line == self.tok.line_no && self.tok.kind != TokenKind::Close {
            return false;
        }

        if self.curr().is_statement_host() {
            // insert here
        } else if self.curr().kind == FrameKind::Expr && self.expr_in_statement() {
            let _ = self.pop();
        } else {
            return false;
        }

        self.yield_virt(sink, TokenKind::Semicolon);
        true
    }

    // ---- dispatch ----------------------------------------------------------

    fn step(&mut self, sink: &mut Sink<'_>) -> Result<(), Error> {
        match self.curr().kind {
            FrameKind::Expr => self.consume_expr(sink),
            FrameKind::Async => self.consume_async(sink),
            FrameKind::Module => self.consume_module(sink),
            FrameKind::Dict => self.consume_dict(sink),
            FrameKind::Func => self.consume_func(sink),
            FrameKind::Class => self.consume_class(sink),
            FrameKind::Control => {
                if self.curr().start == Start::Lit(Lit::Do) {
                    self.consume_do(sink)
                } else {
                    // the parenthesized head is done; glue the substatement
                    let _ = self.pop();
                    self.yield_virt(sink, TokenKind::Attach);
                    self.dispatch_statement(sink)
                }
            }
            FrameKind::Block => self.dispatch_statement(sink),
        }
    }

    /// Statement dispatch for blocks and for a do-while frame hosting its
    /// attached statement.
    fn dispatch_statement(&mut self, sink: &mut Sink<'_>) -> Result<(), Error> {
        if self.tok.kind == TokenKind::Eof {
            // EOF never opens a statement; an abandoned do-while unwinds
            if self.curr().kind == FrameKind::Control {
                let _ = self.pop();
            }
            return Ok(());
        }

        // whether this statement opens a program or function body; the Start
        // below overwrites the marker
        let at_top = self.curr().prev.kind == TokenKind::Top;

        if self.tok.kind != TokenKind::Close && self.curr().prev.kind != TokenKind::Attach {
            self.yield_virt(sink, TokenKind::Start);
        }

        match self.tok.kind {
            TokenKind::Brace => {
                self.tok.kind = TokenKind::Exec;
                self.record_walk(sink, InputElement::RegExp)?;
                self.push(FrameKind::Block);
                return Ok(());
            }

            TokenKind::Close => {
                if self.curr().kind == FrameKind::Control {
                    // do-while cut short; hand the close to the parent
                    let _ = self.pop();
                    return Ok(());
                }
                if self.stack.len() > 1 {
                    let _ = self.pop();
                }
                // a function body or block that ends inside an expression has
                // a value
                let hint = if self.curr().kind == FrameKind::Expr {
                    InputElement::Div
                } else {
                    InputElement::RegExp
                };
                return self.skip_walk(sink, hint);
            }

            TokenKind::Lit => {}

            TokenKind::String => {
                if at_top {
                    self.check_use_strict();
                }
                self.push(FrameKind::Expr);
                return Ok(());
            }

            _ => {
                self.push(FrameKind::Expr);
                return Ok(());
            }
        }

        // labelled statement
        if is_label(&self.tok, self.curr().context) && self.lexer.peek().kind == TokenKind::Colon {
            self.tok.kind = TokenKind::Label;
            self.skip_walk(sink, InputElement::Neutral)?;
            self.skip_walk(sink, InputElement::RegExp)?; // the colon
            self.yield_virt(sink, TokenKind::Attach);
            return Ok(());
        }

        // break/continue with an optional same-line label
        if matches!(self.tok.lit, Some(Lit::Break) | Some(Lit::Continue)) {
            let line = self.tok.line_no;
            self.tok.kind = TokenKind::Keyword;
            self.record_walk(sink, InputElement::RegExp)?;
            if self.tok.line_no == line && is_label(&self.tok, self.curr().context) {
                self.tok.kind = TokenKind::Label;
                self.skip_walk(sink, InputElement::RegExp)?;
            }
            if !self.yield_restrict_asi(sink) && self.tok.kind == TokenKind::Semicolon {
                self.skip_walk(sink, InputElement::RegExp)?;
            }
            return Ok(());
        }

        let outer = self.tok.lit;

        if outer == Some(Lit::Debugger) {
            self.tok.kind = TokenKind::Keyword;
            self.record_walk(sink, InputElement::RegExp)?;
            let _ = self.yield_restrict_asi(sink);
            return Ok(());
        }

        if matches!(outer, Some(Lit::Return) | Some(Lit::Throw)) {
            self.tok.kind = TokenKind::Keyword;
            self.record_walk(sink, InputElement::RegExp)?;
            // a newline after `throw` is invalid either way; no ASI for it
            if outer == Some(Lit::Return) && self.yield_restrict_asi(sink) {
                return Ok(());
            }
            self.push(FrameKind::Expr);
            self.curr_mut().start = Start::Lit(outer.expect("checked above"));
            return Ok(());
        }

        // module statements, top level only
        if self.module && self.stack.len() == 1 {
            if outer == Some(Lit::Import) {
                self.tok.kind = TokenKind::Keyword;
                self.record_walk(sink, InputElement::RegExp)?;
                self.push(FrameKind::Module);
                self.curr_mut().start = Start::Lit(Lit::Import);
                return Ok(());
            }
            if outer == Some(Lit::Export) {
                self.tok.kind = TokenKind::Keyword;
                self.record_walk(sink, InputElement::RegExp)?;
                if self.tok.lit == Some(Lit::Star) || self.tok.kind == TokenKind::Brace {
                    self.push(FrameKind::Module);
                    self.curr_mut().start = Start::Lit(Lit::Export);
                    return Ok(());
                }
                if self.tok.lit == Some(Lit::Default) {
                    self.tok.kind = TokenKind::Keyword;
                    self.record_walk(sink, InputElement::RegExp)?;
                }
                // glue the exported declaration so the statement stays whole
                self.yield_virt(sink, TokenKind::Attach);
                return Ok(());
            }
        }

        if self.match_decl(sink)? {
            self.push(FrameKind::Expr);
            self.curr_mut().start = Start::Lit(outer.expect("declarations carry a lit"));
            return Ok(());
        }

        if outer.map_or(false, |l| l.flags().contains(LitFlags::CONTROL)) {
            let lit = outer.expect("checked above");
            self.tok.kind = TokenKind::Keyword;
            self.record_walk(sink, InputElement::RegExp)?;

            // `for await (...)`: tolerated even outside async
            if lit == Lit::For && self.tok.lit == Some(Lit::Await) {
                self.tok.kind = TokenKind::Keyword;
                self.skip_walk(sink, InputElement::RegExp)?;
            }

            if lit == Lit::Do {
                // host the attached statement, then expect the while tail
                self.push(FrameKind::Control);
                self.curr_mut().start = Start::Lit(Lit::Do);
                self.yield_virt(sink, TokenKind::Attach);
                return Ok(());
            }

            if !lit.flags().contains(LitFlags::CONTROL_PAREN) || self.tok.kind != TokenKind::Paren
            {
                // no head group needed or none present; glue directly
                self.yield_virt(sink, TokenKind::Attach);
                return Ok(());
            }

            self.push(FrameKind::Control);
            self.curr_mut().start = Start::Lit(lit);
            self.record_walk(sink, InputElement::RegExp)?; // the `(`
            self.push(FrameKind::Expr);
            self.curr_mut().start = Start::Open(TokenKind::Paren);
            return Ok(());
        }

        if self.enact_defn(sink)? {
            return Ok(());
        }

        self.push(FrameKind::Expr);
        Ok(())
    }

    /// The do-while frame: one attached statement, then `while (...)` as a
    /// continuation, then a closing real or inserted semicolon.
    fn consume_do(&mut self, sink: &mut Sink<'_>) -> Result<(), Error> {
        let prev = self.curr().prev;

        // the while head has closed; finish the statement
        if prev.kind == TokenKind::Paren {
            let _ = self.pop();
            if self.tok.kind == TokenKind::Semicolon {
                self.curr_mut().prev = self.tok;
                return self.skip_walk(sink, InputElement::RegExp);
            }
            self.yield_virt(sink, TokenKind::Semicolon);
            return Ok(());
        }

        if self.tok.lit == Some(Lit::While) && prev.kind != TokenKind::Attach {
            // the attached statement is done; this while continues the do
            self.tok.kind = TokenKind::Keyword;
            self.record_walk(sink, InputElement::RegExp)?;
            if self.tok.kind == TokenKind::Paren {
                self.record_walk(sink, InputElement::RegExp)?;
                self.push(FrameKind::Expr);
                self.curr_mut().start = Start::Open(TokenKind::Paren);
            } else {
                let _ = self.pop(); // malformed tail
            }
            return Ok(());
        }

        if matches!(prev.kind, TokenKind::Semicolon | TokenKind::Exec) {
            // statement done but no while followed; the do is over
            let _ = self.pop();
            return Ok(());
        }

        self.dispatch_statement(sink)
    }

    /// The deferred `async` resolver.
    fn consume_async(&mut self, sink: &mut Sink<'_>) -> Result<(), Error> {
        match self.curr().prev.kind {
            TokenKind::Eof => {
                // start of the ambiguous window
                if self.tok.kind == TokenKind::Paren {
                    self.record_walk(sink, InputElement::RegExp)?;
                    self.push(FrameKind::Expr);
                    self.curr_mut().start = Start::Open(TokenKind::Paren);
                    return Ok(());
                }
                if self.tok.kind != TokenKind::Lit {
                    return Err(Error::Internal);
                }
                // the `x` of `async x =>`; a keyword here is invalid, allowed
                self.tok.kind = if always_keyword(self.tok.lit, self.curr().context) {
                    TokenKind::Keyword
                } else {
                    TokenKind::Symbol
                };
                self.record_walk(sink, InputElement::RegExp)?;
            }

            TokenKind::Paren => {
                // end of the ambiguity: re-emit the provisional async with
                // its settled kind
                let parent = self.stack.len() - 2;
                let mut resolved = self.stack[parent].prev;
                resolved.kind = if self.tok.kind == TokenKind::Arrow {
                    TokenKind::Keyword
                } else {
                    TokenKind::Symbol
                };
                resolved.mark = Mark::Resolve;
                self.stack[parent].prev = resolved;
                sink(&resolved);
            }

            _ => {
                let _ = self.pop();
                return Ok(());
            }
        }

        if self.tok.kind != TokenKind::Arrow {
            // no arrow after all; the expression continues in the parent
            let _ = self.pop();
            return Ok(());
        }
        let _ = self.pop();
        self.start_arrowfunc(sink, true)
    }

    /// The import/export clause machine. Nested frames handle brace lists.
    fn consume_module(&mut self, sink: &mut Sink<'_>) -> Result<(), Error> {
        let line = self.tok.line_no;

        match self.tok.kind {
            TokenKind::Brace => {
                self.tok.kind = TokenKind::Dict;
                self.record_walk(sink, InputElement::RegExp)?;
                self.push(FrameKind::Module);
                return Ok(());
            }

            // unexpected groups; classify their contents anyway
            TokenKind::TemplateBrace | TokenKind::Paren | TokenKind::Array => {
                let kind = self.tok.kind;
                self.record_walk(sink, InputElement::RegExp)?;
                self.push(FrameKind::Expr);
                self.curr_mut().start = Start::Open(kind);
                return Ok(());
            }

            TokenKind::String => {
                if self.curr().prev.kind == TokenKind::Eof {
                    return self.finalize_module(sink, line);
                }
                if self.parent().kind != FrameKind::Module {
                    let _ = self.pop();
                    return Ok(());
                }
                return self.record_walk(sink, InputElement::RegExp);
            }

            TokenKind::Lit => {
                if self.parent().kind != FrameKind::Module
                    && self.curr().prev.kind == TokenKind::Symbol
                    && self.tok.lit == Some(Lit::From)
                {
                    return self.finalize_module(sink, line);
                }
                // `as` is a keyword in its slot; everything else lands in the
                // namespace and is reported as a symbol, valid or not
                if self.curr().prev.kind == TokenKind::Symbol && self.tok.lit == Some(Lit::As) {
                    self.tok.kind = TokenKind::Keyword;
                } else {
                    self.tok.kind = TokenKind::Symbol;
                }
                return self.record_walk(sink, InputElement::RegExp);
            }

            TokenKind::Close => {
                if self.parent().kind != FrameKind::Module {
                    let _ = self.pop(); // stray close; hand it back
                    return Ok(());
                }
                self.skip_walk(sink, InputElement::RegExp)?;
                let _ = self.pop();
                if self.parent().kind == FrameKind::Module {
                    return Ok(()); // several brace levels deep, keep going
                }
                return self.finalize_module(sink, line);
            }

            TokenKind::Op => {
                if self.tok.lit == Some(Lit::Star) {
                    // namespace star binds a name; report it symbol-like
                    self.tok.kind = TokenKind::Symbol;
                    return self.record_walk(sink, InputElement::RegExp);
                }
                if self.tok.lit == Some(Lit::Comma) {
                    return self.record_walk(sink, InputElement::RegExp);
                }
            }

            _ => {}
        }

        if self.parent().kind != FrameKind::Module {
            let _ = self.pop(); // not a module token; give up on the clause
            return Ok(());
        }
        if self.tok.kind == TokenKind::Eof {
            return Ok(()); // unterminated list; unwinds as a stack error
        }
        self.record_walk(sink, InputElement::RegExp)
    }

    /// Closes a module clause: optional `from 'specifier'` trailer, then a
    /// real or inserted semicolon.
    fn finalize_module(&mut self, sink: &mut Sink<'_>, line: u32) -> Result<(), Error> {
        let _ = self.pop();

        if self.tok.lit == Some(Lit::From) {
            self.tok.kind = TokenKind::Keyword;
            self.record_walk(sink, InputElement::RegExp)?;
        }
        if self.tok.kind == TokenKind::String {
            self.record_walk(sink, InputElement::RegExp)?;
        }

        if self.tok.kind == TokenKind::Semicolon {
            self.record_walk(sink, InputElement::RegExp)?;
        } else if self.tok.line_no != line {
            self.yield_virt(sink, TokenKind::Semicolon);
        }
        Ok(())
    }

    /// The left side of an object literal or class body.
    fn consume_dict(&mut self, sink: &mut Sink<'_>) -> Result<(), Error> {
        let mut context = self.curr().context & Context::STRICT;

        // method modifiers; each is a keyword only when not itself the name
        if self.lexer.peek().kind != TokenKind::Paren && self.tok.lit == Some(Lit::Static) {
            self.tok.kind = TokenKind::Keyword;
            self.record_walk(sink, InputElement::RegExp)?;
        }
        if self.lexer.peek().kind != TokenKind::Paren && self.tok.lit == Some(Lit::Async) {
            self.tok.kind = TokenKind::Keyword;
            self.record_walk(sink, InputElement::RegExp)?;
            context |= Context::ASYNC;
        }
        if self.tok.lit == Some(Lit::Star) {
            context |= Context::GENERATOR;
            self.record_walk(sink, InputElement::RegExp)?;
        }
        if self.lexer.peek().kind != TokenKind::Paren
            && matches!(self.tok.lit, Some(Lit::Get) | Some(Lit::Set))
        {
            self.tok.kind = TokenKind::Keyword;
            self.record_walk(sink, InputElement::RegExp)?;
        }

        match self.tok.kind {
            TokenKind::String => {
                // only a plain `'name' (` makes a method
                if self.src[self.tok.span.start() as usize] != b'`'
                    && self.lexer.peek().kind == TokenKind::Paren
                {
                    self.push(FrameKind::Func);
                    self.curr_mut().context = context;
                    return Ok(());
                }
            }

            TokenKind::Lit | TokenKind::Paren | TokenKind::Brace | TokenKind::Array => {
                // anything method-shaped goes through the function head
                self.push(FrameKind::Func);
                self.curr_mut().context = context;
                return Ok(());
            }

            TokenKind::Colon => {
                self.record_walk(sink, InputElement::RegExp)?;
                self.push(FrameKind::Expr);
                return Ok(());
            }

            TokenKind::Close => {
                let _ = self.pop();
                let hint = if self.curr().kind == FrameKind::Expr {
                    InputElement::Div
                } else {
                    InputElement::RegExp
                };
                return self.skip_walk(sink, hint);
            }

            TokenKind::Op if self.tok.lit == Some(Lit::Comma) => {
                return self.record_walk(sink, InputElement::RegExp);
            }

            _ => {}
        }

        // a lone entry such as `{'abc': def}`; parsed as an expression that
        // the colon closes
        self.push(FrameKind::Expr);
        Ok(())
    }

    /// A function head: optional name, optional computed name, parameters,
    /// body.
    fn consume_func(&mut self, sink: &mut Sink<'_>) -> Result<(), Error> {
        match self.tok.kind {
            TokenKind::Array => {
                // computed method name; its awaits belong to the enclosing
                // context, not the method's own
                let outer = self.parent().context;
                self.record_walk(sink, InputElement::RegExp)?;
                self.push(FrameKind::Expr);
                let top = self.curr_mut();
                top.start = Start::Open(TokenKind::Array);
                top.context = outer;
                Ok(())
            }

            TokenKind::String => {
                if self.src[self.tok.span.start() as usize] == b'`' {
                    let _ = self.pop(); // template literals cannot name one
                    return Ok(());
                }
                self.record_walk(sink, InputElement::RegExp)
            }

            TokenKind::Lit => {
                // names use the enclosing context: `async function await()`
                // is allowed
                let parent = self.parent();
                let name_ok =
                    parent.kind == FrameKind::Dict || valid_name(self.tok.lit, parent.context);
                self.tok.kind = if name_ok {
                    TokenKind::Symbol
                } else {
                    TokenKind::Keyword
                };
                self.record_walk(sink, InputElement::RegExp)
            }

            TokenKind::Paren => {
                self.record_walk(sink, InputElement::RegExp)?;
                self.push(FrameKind::Expr);
                self.curr_mut().start = Start::Open(TokenKind::Paren);
                Ok(())
            }

            TokenKind::Brace => {
                // terminal state: the body block takes the head's context
                let context = self.curr().context;
                let _ = self.pop();
                self.tok.kind = TokenKind::Exec;
                self.record_walk(sink, InputElement::RegExp)?;
                self.push(FrameKind::Block);
                let top = self.curr_mut();
                top.prev = Token::top();
                top.context = context;
                Ok(())
            }

            _ => {
                let _ = self.pop(); // malformed head; abandon
                Ok(())
            }
        }
    }

    /// A class head: optional name, optional `extends` expression, body.
    fn consume_class(&mut self, sink: &mut Sink<'_>) -> Result<(), Error> {
        if self.curr().prev.kind == TokenKind::Eof && self.tok.lit == Some(Lit::Extends) {
            self.tok.kind = TokenKind::Keyword;
            self.record_walk(sink, InputElement::RegExp)?;
            self.push(FrameKind::Expr);
            self.curr_mut().start = Start::Lit(Lit::Extends);
            return Ok(());
        }

        if self.tok.kind == TokenKind::Brace {
            let _ = self.pop();
            self.tok.kind = TokenKind::Dict;
            self.record_walk(sink, InputElement::RegExp)?;
            self.push(FrameKind::Dict);
            return Ok(());
        }

        let _ = self.pop(); // malformed head; abandon
        Ok(())
    }

    // ---- shared matchers ---------------------------------------------------

    /// Matches `function`, `async function` and the generator star, without
    /// consuming the name. Returns the context for the new function.
    fn match_function(&mut self, sink: &mut Sink<'_>) -> Result<Option<Context>, Error> {
        if self.tok.lit == Some(Lit::Async) {
            if self.lexer.peek().lit != Some(Lit::Function) {
                return Ok(None);
            }
        } else if self.tok.lit != Some(Lit::Function) {
            return Ok(None);
        }

        let mut context = self.curr().context & Context::STRICT;
        if self.tok.lit == Some(Lit::Async) {
            context |= Context::ASYNC;
            self.tok.kind = TokenKind::Keyword;
            self.skip_walk(sink, InputElement::Neutral)?; // peeked `function`
        }
        self.tok.kind = TokenKind::Keyword;
        self.record_walk(sink, InputElement::RegExp)?;

        if self.tok.lit == Some(Lit::Star) {
            self.skip_walk(sink, InputElement::RegExp)?;
            context |= Context::GENERATOR;
        }
        Ok(Some(context))
    }

    /// Matches `class` and an optional name.
    fn match_class(&mut self, sink: &mut Sink<'_>) -> Result<bool, Error> {
        if self.tok.lit != Some(Lit::Class) {
            return Ok(false);
        }
        self.tok.kind = TokenKind::Keyword;
        self.record_walk(sink, InputElement::RegExp)?;

        let lit = self.tok.lit;
        if lit == Some(Lit::Extends) || self.tok.kind != TokenKind::Lit {
            // no name; anything but a brace next is invalid, but the frame
            // handler deals with that
            return Ok(true);
        }
        let masquerade = lit.map_or(false, |l| l.flags().contains(LitFlags::MASQUERADE));
        self.tok.kind = if !valid_name(lit, self.curr().context) || masquerade {
            TokenKind::Keyword
        } else {
            TokenKind::Symbol
        };
        self.skip_walk(sink, InputElement::RegExp)?; // name isn't recorded
        Ok(true)
    }

    /// Matches a hoisted (or expression-position) function or class.
    fn enact_defn(&mut self, sink: &mut Sink<'_>) -> Result<bool, Error> {
        if let Some(context) = self.match_function(sink)? {
            self.push(FrameKind::Func);
            self.curr_mut().context = context;
            return Ok(true);
        }
        if self.match_class(sink)? {
            self.push(FrameKind::Class);
            return Ok(true);
        }
        Ok(false)
    }

    /// Matches `var`/`let`/`const`. In sloppy mode `let` only declares when
    /// followed by something value-like or a destructuring `[`.
    fn match_decl(&mut self, sink: &mut Sink<'_>) -> Result<bool, Error> {
        if !self
            .tok
            .lit
            .map_or(false, |l| l.flags().contains(LitFlags::DECL))
        {
            return Ok(false);
        }

        if !self.curr().context.contains(Context::STRICT) && self.tok.lit == Some(Lit::Let) {
            let next = self.lexer.peek();
            if !token_valuelike(next) && next.kind != TokenKind::Array {
                return Ok(false);
            }
        }

        self.tok.kind = TokenKind::Keyword;
        self.record_walk(sink, InputElement::RegExp)?;
        Ok(true)
    }

    /// Enters an arrow function at the current `=>`.
    fn start_arrowfunc(&mut self, sink: &mut Sink<'_>, is_async: bool) -> Result<(), Error> {
        debug_assert_eq!(self.tok.kind, TokenKind::Arrow);
        debug_assert_eq!(self.curr().kind, FrameKind::Expr);

        let mut context = self.curr().context & Context::STRICT;
        if is_async {
            context |= Context::ASYNC;
        }

        if self.lexer.peek().kind == TokenKind::Brace {
            // a proper body: `() => { ... }`
            self.record_walk(sink, InputElement::Neutral)?; // the `=>`
            self.tok.kind = TokenKind::Exec;
            self.record_walk(sink, InputElement::RegExp)?;
            self.push(FrameKind::Block);
            let top = self.curr_mut();
            top.prev = Token::top();
            top.context = context;
        } else {
            // expression body: keep the statement, restart it under the
            // arrow's context
            self.record_walk(sink, InputElement::RegExp)?;
            let top = self.curr_mut();
            top.prev = Token::none();
            top.context = context;
        }
        Ok(())
    }

    /// Detects a `'use strict'` directive and upgrades the frame's context.
    /// The caller has established that the string opens a program or
    /// function body.
    fn check_use_strict(&mut self) {
        // the directive must stand alone: a real semicolon, or a next token
        // that ASI would split off
        let next = self.lexer.peek();
        let alone = if next.kind == TokenKind::Semicolon {
            true
        } else if next.line_no == self.tok.line_no {
            false
        } else if next
            .lit
            .map_or(false, |l| l.flags().contains(LitFlags::REL_OP))
        {
            false
        } else if next.kind == TokenKind::Op {
            matches!(next.lit, Some(Lit::Inc) | Some(Lit::Dec))
        } else {
            token_valuelike(next)
        };

        if alone && is_use_strict(self.tok_bytes()) {
            self.curr_mut().context |= Context::STRICT;
        }
    }
}

// ---- classification predicates ---------------------------------------------

fn is_use_strict(bytes: &[u8]) -> bool {
    bytes == b"'use strict'" || bytes == b"\"use strict\""
}

/// Reserved in the given context, unconditionally.
pub(super) fn always_keyword(lit: Option<Lit>, context: Context) -> bool {
    lit.map_or(false, |l| {
        l.flags().contains(LitFlags::KEYWORD)
            || (context.contains(Context::STRICT) && l.flags().contains(LitFlags::STRICT_KEYWORD))
    })
}

/// A keyword only because of the context: `await` in async, `yield` in a
/// generator or in strict mode.
pub(super) fn optional_keyword(lit: Option<Lit>, context: Context) -> bool {
    match lit {
        Some(Lit::Await) => context.contains(Context::ASYNC),
        Some(Lit::Yield) => context.intersects(Context::GENERATOR | Context::STRICT),
        _ => false,
    }
}

/// Usable as a function or binding name in the given context.
pub(super) fn valid_name(lit: Option<Lit>, context: Context) -> bool {
    let l = match lit {
        Some(l) => l,
        None => return true,
    };
    if context.contains(Context::ASYNC) && l == Lit::Await {
        return false;
    }
    if context.contains(Context::GENERATOR) && l == Lit::Yield {
        return false;
    }
    let mut mask = LitFlags::KEYWORD;
    if context.contains(Context::STRICT) {
        mask |= LitFlags::STRICT_KEYWORD;
    }
    !l.flags().intersects(mask)
}

/// A word operator in unary position: `typeof`-class keywords plus the
/// contextual `await`/`yield`.
pub(super) fn unary(lit: Option<Lit>, context: Context) -> bool {
    let both = LitFlags::UNARY_OP | LitFlags::KEYWORD;
    lit.map_or(false, |l| l.flags().contains(both)) || optional_keyword(lit, context)
}

/// Usable as a statement label.
fn is_label(tok: &Token, context: Context) -> bool {
    if tok.kind != TokenKind::Lit {
        return false;
    }
    !always_keyword(tok.lit, context) && !optional_keyword(tok.lit, context)
}

/// Does this token read as a value from the left? Used for lookahead after
/// `let` and non-async `await`; brackets are excluded since those would be
/// indexing or a call.
pub(super) fn token_valuelike(tok: &Token) -> bool {
    match tok.kind {
        TokenKind::Lit => !tok
            .lit
            .map_or(false, |l| l.flags().contains(LitFlags::REL_OP)),
        TokenKind::Symbol | TokenKind::Number | TokenKind::String | TokenKind::Brace => true,
        TokenKind::Op => matches!(tok.lit, Some(Lit::Not) | Some(Lit::BitNot)),
        _ => false,
    }
}

/// Value-like including bracketed forms, for the right side of a
/// `for (... of ...)`.
pub(super) fn token_valuelike_keyword(tok: &Token) -> bool {
    token_valuelike(tok)
        || matches!(
            tok.kind,
            TokenKind::Paren
                | TokenKind::Array
                | TokenKind::Brace
                | TokenKind::Slash
                | TokenKind::Regexp
        )
}
