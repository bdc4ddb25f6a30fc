//! Numeric literal scanning.

use super::cursor::Cursor;

/// Consumes a numeric literal starting at the cursor.
///
/// The scan is deliberately lenient: after the leading digit (or `.` followed
/// by a digit) the maximal run of `[A-Za-z0-9.]` is taken. That covers
/// `0x100`, `10n`, `.5` and friends, and swallows misuse such as `0x1.2z` as
/// a single token for the consumer to flag. A signed exponent splits the
/// token (`1e-3` scans as `1e`, `-`, `3`).
pub(super) fn scan(cursor: &mut Cursor<'_>) {
    let _ = cursor.next_byte();
    cursor.take_while(|b| b.is_ascii_alphanumeric() || b == b'.');
}
