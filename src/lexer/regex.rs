//! Slash resolution: division operator or regular expression literal.
//!
//! The lexer prebuffers a bare provisional `/` and resolves it only when the
//! parser consumes it with a value hint, so the two scans here both start at
//! the slash.

use super::cursor::Cursor;

/// Consumes `/` or `/=`.
pub(super) fn scan_slash_op(cursor: &mut Cursor<'_>) {
    let _ = cursor.next_byte();
    let _ = cursor.next_is(b'=');
}

/// Consumes a regular expression literal: body, closing `/` and trailing flag
/// letters.
///
/// A `/` inside a `[...]` character class does not terminate the body. An
/// unterminated body stops at the line terminator or EOF without consuming
/// it; invalid input, but the partial literal is kept.
pub(super) fn scan_body(cursor: &mut Cursor<'_>) {
    let _ = cursor.next_byte();
    let mut in_class = false;

    loop {
        match cursor.peek() {
            None | Some(b'\n') => return,
            Some(b'/') if !in_class => {
                let _ = cursor.next_byte();
                cursor.take_while(|b| b.is_ascii_alphanumeric());
                return;
            }
            Some(b'[') => {
                in_class = true;
                let _ = cursor.next_byte();
            }
            Some(b']') => {
                in_class = false;
                let _ = cursor.next_byte();
            }
            Some(b'\\') => {
                let _ = cursor.next_byte();
                let _ = cursor.next_byte();
            }
            Some(_) => {
                let _ = cursor.next_byte();
            }
        }
    }
}
