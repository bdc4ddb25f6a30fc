//! Identifier and reserved-word scanning.

use super::cursor::Cursor;
use crate::tokens::Lit;

/// Whether `byte` can begin an identifier.
///
/// Any non-ASCII byte continues the UTF-8 sequence of an identifier
/// character; the classifier does not validate identifier unicode categories.
#[inline]
pub(super) fn is_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'$' || byte == b'_' || byte >= 0x80 || byte == b'\\'
}

#[inline]
fn is_part(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'$' || byte == b'_' || byte >= 0x80
}

/// Consumes a maximal identifier and returns its recognized identity, if any.
///
/// Unicode escapes (`\uXXXX`, `\u{…}`) are consumed but cancel the identity:
/// reserved words cannot be spelled with escapes.
pub(super) fn scan(cursor: &mut Cursor<'_>) -> Option<Lit> {
    let start = cursor.pos();
    let mut escaped = false;

    loop {
        match cursor.peek() {
            Some(b'\\') => {
                escaped = true;
                let _ = cursor.next_byte();
                let _ = cursor.next_byte();
                if cursor.peek() == Some(b'{') {
                    while let Some(b) = cursor.next_byte() {
                        if b == b'}' {
                            break;
                        }
                    }
                }
            }
            Some(b) if is_part(b) => {
                let _ = cursor.next_byte();
            }
            _ => break,
        }
    }

    if escaped {
        None
    } else {
        Lit::from_ident(cursor.slice_from(start))
    }
}
