//! The 85 symbols `!` through `u` and their inverse lookup.

/// Digit value `i` is written as `ALPHABET[i]`.
pub const ALPHABET: &[u8; 85] = b"!\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`abcdefghijklmnopqrstu";

/// Highest digit value, used to pad a short trailing group before decoding.
pub const MAX_DIGIT: u8 = 84;

/// Maps a byte to `digit + 1`, or to `0` if the byte is not a digit.
///
/// Evaluated at compile time, so every context reads the same immutable table
/// and nothing is ever initialised twice.
static DECODE_TABLE: [u8; 256] = build_decode_table();

const fn build_decode_table() -> [u8; 256] {
    let mut table = [0; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8 + 1;
        i += 1;
    }
    table
}

/// Maps a digit value (`0..85`) to its symbol.
#[inline]
pub(crate) fn encode_digit(digit: u32) -> u8 {
    debug_assert!(digit < 85, "digit out of range: {}", digit);
    ALPHABET[digit as usize]
}

/// Maps a symbol to its digit value, `None` if it is outside the alphabet.
#[inline]
pub(crate) fn decode_symbol(byte: u8) -> Option<u8> {
    match DECODE_TABLE[byte as usize] {
        0 => None,
        d => Some(d - 1),
    }
}
