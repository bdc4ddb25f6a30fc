//! A lexical analyzer for ECMAScript source code.
//!
//! The lexer produces provisional tokens one pull at a time and never
//! backtracks. Three ambiguities are left to the caller:
//!
//!  - a `/` is prebuffered as [`TokenKind::Slash`] and resolved to a division
//!    operator or a regular expression literal by the [`InputElement`] hint
//!    passed to the [`Lexer::next`] call that consumes it;
//!  - a `{` is reported as the ambiguous [`TokenKind::Brace`];
//!  - identifiers are reported as [`TokenKind::Lit`] carrying their
//!    recognized [`Lit`] identity, if any.
//!
//! The lexer tracks open brackets on a bounded stack of its own, which is
//! what lets it rewrite a ternary-closing `:` to [`TokenKind::Close`] and
//! resume template-literal scanning after the `}` of an interpolation.

mod comment;
mod cursor;
mod identifier;
mod number;
mod operator;
mod regex;
mod string;
mod template;


use self::{cursor::Cursor, template::TemplateFlag};
use crate::{
    error::Error,
    profiler::Profiler,
    tokens::{Lit, Span, Token, TokenKind},
};

/// Maximum depth of the lexer's bracket stack.
const STACK_SIZE: usize = 256;

/// The goal hint passed with each [`Lexer::next`] call, deciding how a
/// prebuffered `/` is consumed.
///
/// Named after the goal symbols of the ECMAScript lexical grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputElement {
    /// The previous context has a value: `/` is a division operator.
    Div,
    /// No value is present: `/` opens a regular expression literal.
    RegExp,
    /// The caller knows the next token is not a slash; one appearing anyway
    /// is reported as [`Error::AmbiguousSlash`].
    Neutral,
}

/// A lexical analyzer over a single immutable source buffer.
#[derive(Debug)]
pub struct Lexer<'a> {
    src: &'a [u8],
    /// Line the scan cursor is on, 1-based.
    line_no: u32,
    /// The prebuffered next token, provisional where ambiguous.
    next: Token,
    /// First comment found before `next`, queued for delivery.
    pending: Option<Token>,
    /// Line state for rescanning further comments in the pending gap.
    line_after_pending: u32,
    /// Open brackets.
    stack: Vec<TokenKind>,
    flag: TemplateFlag,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `src` and prebuffers the first token.
    pub fn new(src: &'a str) -> Self {
        let mut lexer = Self {
            src: src.as_bytes(),
            line_no: 1,
            next: Token::none(),
            pending: None,
            line_after_pending: 1,
            stack: Vec::with_capacity(STACK_SIZE),
            flag: TemplateFlag::None,
        };
        lexer.eat_next();
        lexer
    }

    /// The prebuffered next token.
    ///
    /// Ambiguous tokens show their provisional kind here: an unresolved
    /// slash is [`TokenKind::Slash`], an unresolved brace
    /// [`TokenKind::Brace`]. Queued comments are not visible; the peek is
    /// always the next non-comment token.
    #[inline]
    pub fn peek(&self) -> &Token {
        &self.next
    }

    /// Returns the next token.
    ///
    /// Comments queued before it are delivered first, one per call. The
    /// `hint` resolves the token when it is a slash and is ignored otherwise.
    pub fn next(&mut self, hint: InputElement) -> Result<Token, Error> {
        let _timer = Profiler::global().start_event("next", "lexing");

        if let Some(pending) = self.pending.take() {
            // Reveal the queued comment and queue the following one, if the
            // gap up to the real token holds more.
            let mut cursor = Cursor::at(
                self.src,
                pending.span().end() as usize,
                self.line_after_pending,
            );
            cursor.take_while(is_space);
            if cursor.pos() != self.next.span().start() as usize {
                let at = cursor.pos();
                let line = cursor.line_no();
                let found = comment::scan(&mut cursor, false);
                debug_assert!(found, "pending gap must consist of comments");
                if found {
                    self.pending = Some(Token::new(
                        TokenKind::Comment,
                        Span::new(at as u32, cursor.pos() as u32),
                        line,
                        None,
                    ));
                }
                self.line_after_pending = cursor.line_no();
            }
            return Ok(pending);
        }

        let mut out = self.next;
        match out.kind() {
            TokenKind::Slash => {
                let start = out.span().start() as usize;
                let mut cursor = Cursor::at(self.src, start, out.line_no());
                match hint {
                    InputElement::Div => {
                        regex::scan_slash_op(&mut cursor);
                        out.kind = TokenKind::Op;
                    }
                    InputElement::RegExp => {
                        regex::scan_body(&mut cursor);
                        out.kind = TokenKind::Regexp;
                    }
                    InputElement::Neutral => return Err(Error::AmbiguousSlash),
                }
                out.span = Span::new(start as u32, cursor.pos() as u32);
                self.line_no = cursor.line_no();
                // continue the prebuffer scan after the resolved body
                self.next.span = out.span;
            }
            kind if kind.is_open() => {
                if self.stack.len() >= STACK_SIZE {
                    self.eat_next();
                    return Err(Error::Stack);
                }
                self.stack.push(kind);
            }
            TokenKind::Close => match self.stack.pop() {
                None => {
                    self.eat_next();
                    return Err(Error::Stack);
                }
                Some(TokenKind::TemplateBrace) => self.flag = TemplateFlag::Resume,
                Some(_) => {}
            },
            _ => {}
        }

        self.eat_next();
        Ok(out)
    }

    /// Prebuffers the token after the current one.
    fn eat_next(&mut self) {
        let from = self.next.span().end() as usize;

        // One-shot template states short-circuit normal scanning.
        match self.flag {
            TemplateFlag::PendingBrace => {
                self.next = Token::new(
                    TokenKind::TemplateBrace,
                    Span::new(from as u32, from as u32 + 2),
                    self.line_no,
                    None,
                );
                self.flag = TemplateFlag::None;
                return;
            }
            TemplateFlag::Resume => {
                let line = self.line_no;
                let mut cursor = Cursor::at(self.src, from, line);
                let interpolation = template::resume(&mut cursor);
                self.flag = if interpolation {
                    TemplateFlag::PendingBrace
                } else {
                    TemplateFlag::None
                };
                self.next = Token::new(
                    TokenKind::String,
                    Span::new(from as u32, cursor.pos() as u32),
                    line,
                    None,
                );
                self.line_no = cursor.line_no();
                return;
            }
            TemplateFlag::None => {}
        }

        let mut cursor = Cursor::at(self.src, from, self.line_no);
        cursor.take_while(is_space);

        // Comments: the first one in the gap is queued; the rest are skipped
        // here and rescanned when the queue drains.
        self.pending = None;
        let comment_start = cursor.pos();
        let comment_line = cursor.line_no();
        if comment::scan(&mut cursor, comment_start == 0) {
            self.pending = Some(Token::new(
                TokenKind::Comment,
                Span::new(comment_start as u32, cursor.pos() as u32),
                comment_line,
                None,
            ));
            self.line_after_pending = cursor.line_no();
            loop {
                cursor.take_while(is_space);
                if !comment::scan(&mut cursor, false) {
                    break;
                }
            }
        }

        let start = cursor.pos();
        let line = cursor.line_no();
        let (mut kind, lit) = self.eat_token(&mut cursor);

        // Inside a ternary the `:` is the closing half of the `? :` pair.
        if kind == TokenKind::Colon && self.stack.last() == Some(&TokenKind::Ternary) {
            kind = TokenKind::Close;
        }

        let line_no = if kind == TokenKind::Eof { 0 } else { line };
        self.next = Token::new(
            kind,
            Span::new(start as u32, cursor.pos() as u32),
            line_no,
            lit,
        );
        self.line_no = cursor.line_no();
    }

    /// Classifies and consumes the token at the cursor.
    ///
    /// A `/` is left unconsumed past its first byte: the body scan needs the
    /// caller's hint and happens at consumption time.
    fn eat_token(&mut self, cursor: &mut Cursor<'a>) -> (TokenKind, Option<Lit>) {
        let byte = match cursor.peek() {
            None => return (TokenKind::Eof, None),
            Some(b) => b,
        };

        match byte {
            b'/' => {
                let _ = cursor.next_byte();
                (TokenKind::Slash, None)
            }
            b';' => {
                let _ = cursor.next_byte();
                (TokenKind::Semicolon, None)
            }
            b'?' => {
                let _ = cursor.next_byte();
                (TokenKind::Ternary, None)
            }
            b':' => {
                let _ = cursor.next_byte();
                (TokenKind::Colon, Some(Lit::Colon))
            }
            b',' => {
                let _ = cursor.next_byte();
                (TokenKind::Op, Some(Lit::Comma))
            }
            b'(' => {
                let _ = cursor.next_byte();
                (TokenKind::Paren, None)
            }
            b'[' => {
                let _ = cursor.next_byte();
                (TokenKind::Array, None)
            }
            b'{' => {
                let _ = cursor.next_byte();
                (TokenKind::Brace, None)
            }
            b')' | b']' | b'}' => {
                let _ = cursor.next_byte();
                (TokenKind::Close, None)
            }
            b'\'' | b'"' | b'`' => {
                if string::scan(cursor, false) {
                    self.flag = TemplateFlag::PendingBrace;
                }
                (TokenKind::String, None)
            }
            b'0'..=b'9' => {
                number::scan(cursor);
                (TokenKind::Number, None)
            }
            b'.' => {
                if cursor.peek_at(1).map_or(false, |b| b.is_ascii_digit()) {
                    number::scan(cursor);
                    (TokenKind::Number, None)
                } else if cursor.peek_at(1) == Some(b'.') && cursor.peek_at(2) == Some(b'.') {
                    let _ = cursor.next_byte();
                    let _ = cursor.next_byte();
                    let _ = cursor.next_byte();
                    (TokenKind::Op, Some(Lit::Spread))
                } else {
                    let _ = cursor.next_byte();
                    (TokenKind::Op, Some(Lit::Dot))
                }
            }
            b'=' | b'&' | b'|' | b'^' | b'~' | b'!' | b'%' | b'+' | b'-' | b'*' | b'<' | b'>' => {
                operator::scan(cursor)
            }
            b if identifier::is_start(b) => (TokenKind::Lit, identifier::scan(cursor)),
            _ => {
                // Unrecognized byte: classify it as a bare operator so that
                // every byte of the input ends up covered by some token.
                let _ = cursor.next_byte();
                (TokenKind::Op, None)
            }
        }
    }
}

/// ECMAScript-relevant whitespace, `isspace` style.
#[inline]
fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r')
}
