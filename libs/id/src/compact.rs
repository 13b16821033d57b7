//! 110-bit compaction used by the prefixed encoding.
//!
//! The prefixed form drops word 3 (carried by the prefix) and the variant
//! marker of word 4, leaving 110 informative bits in seven words. Compaction
//! shifts that run two bits to the left so it starts at bit 0 and the last
//! word ends in two zero bits of padding.

/// Number of words carried by the compact form.
pub const COMPACT_WORDS: usize = 7;

/// Informative bits carried by the compact form.
pub const COMPACT_BITS: usize = 110;

/// Drops the top two bits of `words[0]` and shifts the remaining 110 bits
/// two positions to the left across word boundaries.
///
/// The low two bits of the last word are always zero.
pub fn compact110(words: [u16; COMPACT_WORDS]) -> [u16; COMPACT_WORDS] {
    let mut out = [0u16; COMPACT_WORDS];
    for i in 0..COMPACT_WORDS {
        let next = if i + 1 < COMPACT_WORDS {
            words[i + 1] >> 14
        } else {
            0
        };
        out[i] = ((words[i] & 0x3fff) << 2) | next;
    }
    out
}

/// Inverse of [`compact110`]: shifts 110 bits two positions to the right.
///
/// The top two bits of the first word come back as zero; the low two bits
/// of the last input word are discarded.
pub fn expand110(words: [u16; COMPACT_WORDS]) -> [u16; COMPACT_WORDS] {
    let mut out = [0u16; COMPACT_WORDS];
    let mut carry = 0u16;
    for i in 0..COMPACT_WORDS {
        out[i] = (words[i] >> 2) | (carry << 14);
        carry = words[i] & 0b11;
    }
    out
}
