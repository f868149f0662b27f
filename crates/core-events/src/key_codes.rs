//! Platform virtual key codes (macOS `kVK_*` values).
//!
//! Only codes the translator or the admission predicate look at are listed, plus a
//! handful of letter keys used by tests and trace files.

pub const ANSI_A: u16 = 0x00;
pub const ANSI_S: u16 = 0x01;
pub const ANSI_D: u16 = 0x02;
pub const ANSI_X: u16 = 0x07;
pub const ANSI_E: u16 = 0x0E;
pub const ANSI_I: u16 = 0x22;
pub const ANSI_SEMICOLON: u16 = 0x29;
pub const ANSI_U: u16 = 0x20;

pub const RETURN: u16 = 0x24;
pub const TAB: u16 = 0x30;
pub const SPACE: u16 = 0x31;
pub const DELETE: u16 = 0x33;
pub const ESCAPE: u16 = 0x35;
pub const KEYPAD_ENTER: u16 = 0x4C;
pub const HELP: u16 = 0x72;
pub const HOME: u16 = 0x73;
pub const PAGE_UP: u16 = 0x74;
pub const FORWARD_DELETE: u16 = 0x75;
pub const END: u16 = 0x77;
pub const PAGE_DOWN: u16 = 0x79;
pub const LEFT_ARROW: u16 = 0x7B;
pub const RIGHT_ARROW: u16 = 0x7C;
pub const DOWN_ARROW: u16 = 0x7D;
pub const UP_ARROW: u16 = 0x7E;

/// Function key codes indexed by ordinal - 1 (F1..=F20).
const FUNCTION_KEYS: [u16; 20] = [
    0x7A, 0x78, 0x63, 0x76, 0x60, 0x61, 0x62, 0x64, 0x65, 0x6D, 0x67, 0x6F, 0x69, 0x6B, 0x71,
    0x6A, 0x40, 0x4F, 0x50, 0x5A,
];

/// Key code for function key `Fn` (1-based).
pub fn function_key(ordinal: u8) -> Option<u16> {
    let idx = usize::from(ordinal).checked_sub(1)?;
    FUNCTION_KEYS.get(idx).copied()
}

/// Inverse of [`function_key`].
pub fn function_key_ordinal(key_code: u16) -> Option<u8> {
    FUNCTION_KEYS
        .iter()
        .position(|&code| code == key_code)
        .and_then(|idx| u8::try_from(idx + 1).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_keys_round_trip_bounds() {
        assert_eq!(function_key(1), Some(0x7A));
        assert_eq!(function_key(20), Some(0x5A));
        assert_eq!(function_key(0), None);
        assert_eq!(function_key(21), None);
        assert_eq!(function_key_ordinal(0x60), Some(5));
        assert_eq!(function_key_ordinal(ESCAPE), None);
    }
}
