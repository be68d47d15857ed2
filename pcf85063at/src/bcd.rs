//! Packed binary coded decimal, one digit per nibble

/// Tens digit in the high nibble, ones digit in the low nibble.
/// Callers range check first; only 0 - 99 is representable.
pub const fn encode(x: u8) -> u8 {
    debug_assert!(x < 100);
    ((x / 10) << 4) | (x % 10)
}

/// Nibbles above 9 are not rejected, they decode to whatever `tens * 10 + ones` gives
pub const fn decode(x: u8) -> u8 {
    (x >> 4) * 10 + (x & 0b0000_1111)
}
