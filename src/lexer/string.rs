//! String literal scanning, shared by all three quote forms.

use super::cursor::Cursor;

/// Consumes a string literal starting at the cursor and reports whether the
/// scan stopped at a `${` interpolation.
///
/// With `resume` set the scan continues a template literal from just past a
/// closing `}`: no opening quote is consumed and the very first byte may be
/// the terminating backtick.
///
/// An escape skips the following byte (newlines included, which keeps the
/// line count right for `\<newline>` continuations). An unescaped newline
/// terminates `'` and `"` strings without being consumed; invalid input, but
/// the partial string is kept. Unterminated strings run to EOF.
pub(super) fn scan(cursor: &mut Cursor<'_>, resume: bool) -> bool {
    let quote = if resume {
        b'`'
    } else {
        cursor.next_byte().expect("string scan without a quote")
    };

    loop {
        match cursor.peek() {
            None => return false,
            Some(b) if b == quote => {
                let _ = cursor.next_byte();
                return false;
            }
            Some(b'$') if quote == b'`' && cursor.peek_at(1) == Some(b'{') => {
                // stop before the `${`; the lexer emits it as its own token
                return true;
            }
            Some(b'\\') => {
                let _ = cursor.next_byte();
                let _ = cursor.next_byte();
            }
            Some(b'\n') if quote != b'`' => return false,
            Some(_) => {
                let _ = cursor.next_byte();
            }
        }
    }
}
