//! Operator scanning.

use super::cursor::Cursor;
use crate::tokens::{Lit, TokenKind};

/// Consumes an operator starting at the cursor; the first byte is known to be
/// one of `=&|^~!%+-*<>`.
///
/// Greedy, with a per-start-byte cap on repeats (`*` and `<`: 2, `>`: 3,
/// everything else 1), an optional trailing `=`, and a second `=` for `===`
/// and `!==`. The short forms `=>`, `++`, `--`, `||` and `&&` are matched
/// before the assignment suffix. Canonical identities are attached where the
/// parser distinguishes operators.
pub(super) fn scan(cursor: &mut Cursor<'_>) -> (TokenKind, Option<Lit>) {
    let start = cursor.next_byte().expect("operator scan without a byte");

    let cap = match start {
        b'*' | b'<' => 2,
        b'>' => 3,
        _ => 1,
    };
    let mut run = 1;
    while run < cap && cursor.peek() == Some(start) {
        let _ = cursor.next_byte();
        run += 1;
    }

    if run == 1 {
        match (start, cursor.peek()) {
            (b'=', Some(b'>')) => {
                let _ = cursor.next_byte();
                return (TokenKind::Arrow, Some(Lit::Arrow));
            }
            (b'+', Some(b'+')) => {
                let _ = cursor.next_byte();
                return (TokenKind::Op, Some(Lit::Inc));
            }
            (b'-', Some(b'-')) => {
                let _ = cursor.next_byte();
                return (TokenKind::Op, Some(Lit::Dec));
            }
            (b'|', Some(b'|')) | (b'&', Some(b'&')) => {
                let _ = cursor.next_byte();
                return (TokenKind::Op, None);
            }
            _ => {}
        }
    }

    if cursor.next_is(b'=') {
        // `===` and `!==` take one more
        if run == 1 && (start == b'=' || start == b'!') {
            let _ = cursor.next_is(b'=');
        }
        return (TokenKind::Op, None);
    }

    let lit = if run == 1 {
        match start {
            b'*' => Some(Lit::Star),
            b'~' => Some(Lit::BitNot),
            b'!' => Some(Lit::Not),
            b'=' => Some(Lit::Assign),
            _ => None,
        }
    } else {
        None
    };
    (TokenKind::Op, lit)
}
