//! Comment scanning.

use super::cursor::Cursor;

/// Consumes a comment starting at the cursor, if any, and reports whether one
/// was found.
///
/// Recognizes `//…` (up to but not including the line terminator), `/*…*/`
/// (newlines counted, unterminated comments run to EOF) and, when `at_start`
/// is set, a `#!…` shebang line.
pub(super) fn scan(cursor: &mut Cursor<'_>, at_start: bool) -> bool {
    match cursor.peek() {
        Some(b'/') => match cursor.peek_at(1) {
            Some(b'*') => {
                let _ = cursor.next_byte();
                let _ = cursor.next_byte();
                scan_multi_line(cursor);
                true
            }
            Some(b'/') => {
                scan_single_line(cursor);
                true
            }
            _ => false,
        },
        Some(b'#') if at_start && cursor.peek_at(1) == Some(b'!') => {
            scan_single_line(cursor);
            true
        }
        _ => false,
    }
}

/// Consumes up to the line terminator, leaving it for the whitespace skip.
fn scan_single_line(cursor: &mut Cursor<'_>) {
    while let Some(b) = cursor.peek() {
        if b == b'\n' {
            break;
        }
        let _ = cursor.next_byte();
    }
}

fn scan_multi_line(cursor: &mut Cursor<'_>) {
    while let Some(b) = cursor.next_byte() {
        if b == b'*' && cursor.next_is(b'/') {
            return;
        }
    }
}
