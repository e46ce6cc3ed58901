// crates/fwtools-core/src/bitops.rs
//
// Bit-algebra primitives for the swap engine. Every function here is an
// involution: applying it twice restores the original value.

/// Reverse the 8 bits of a byte (bit 0 <-> bit 7, 1 <-> 6, 2 <-> 5, 3 <-> 4).
///
/// `0b1011_1001` -> `0b1001_1101`
#[inline]
pub fn reverse_bits(b: u8) -> u8 {
    let b = (b >> 4) | (b << 4);
    let b = ((b & 0xcc) >> 2) | ((b & 0x33) << 2);
    ((b & 0xaa) >> 1) | ((b & 0x55) << 1)
}

/// Exchange the high and low nibble of a byte.
///
/// `0xAB` -> `0xBA`
#[inline]
pub fn swap_half(b: u8) -> u8 {
    (b >> 4) | (b << 4)
}

/// Exchange the two bytes of a 16-bit word.
///
/// `0xABCD` -> `0xCDAB`
#[inline]
pub fn swap_bytes(w: u16) -> u16 {
    (w >> 8) | (w << 8)
}

/// Exchange the two 16-bit halves of a 32-bit value.
///
/// `0xABCD_1234` -> `0x1234_ABCD`
#[inline]
pub fn swap_words(d: u32) -> u32 {
    (d >> 16) | (d << 16)
}

/// Exchange the two 32-bit halves of a 64-bit value.
#[inline]
pub fn swap_dwords(q: u64) -> u64 {
    (q >> 32) | (q << 32)
}
