//! Unpadded RFC 4648 base32hex ("extended hex") text codec.
//!
//! Encodes lowercase; decodes either case. Bits that do not fill a whole
//! trailing byte are dropped on decode.

/// The base32hex alphabet, lowercase.
pub const ALPHABET: &[u8; 32] = b"0123456789abcdefghijklmnopqrstuv";

/// A symbol outside the base32hex alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSymbol {
    pub position: usize,
    pub symbol: u8,
}

/// Returns true if `b` is a lowercase base32hex symbol.
pub fn is_symbol(b: u8) -> bool {
    matches!(b, b'0'..=b'9' | b'a'..=b'v')
}

fn symbol_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'v' => Some(b - b'a' + 10),
        b'A'..=b'V' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Encodes bytes without padding.
pub fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity((bytes.len() * 8).div_ceil(5));
    let mut buffer: u32 = 0;
    let mut bits = 0u32;

    for &byte in bytes {
        buffer = (buffer << 8) | u32::from(byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(ALPHABET[((buffer >> bits) & 0x1f) as usize] as char);
        }
        buffer &= (1 << bits) - 1;
    }

    if bits > 0 {
        out.push(ALPHABET[((buffer << (5 - bits)) & 0x1f) as usize] as char);
    }

    out
}

/// Decodes unpadded text.
pub fn decode(text: &str) -> Result<Vec<u8>, InvalidSymbol> {
    let mut out = Vec::with_capacity(text.len() * 5 / 8);
    let mut buffer: u32 = 0;
    let mut bits = 0u32;

    for (position, symbol) in text.bytes().enumerate() {
        let value = symbol_value(symbol).ok_or(InvalidSymbol { position, symbol })?;
        buffer = (buffer << 5) | u32::from(value);
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push((buffer >> bits) as u8);
        }
        buffer &= (1 << bits) - 1;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc4648_vectors() {
        assert_eq!(encode(b""), "");
        assert_eq!(encode(b"f"), "co");
        assert_eq!(encode(b"fo"), "cpng");
        assert_eq!(encode(b"foo"), "cpnmu");
        assert_eq!(encode(b"foob"), "cpnmuog");
        assert_eq!(encode(b"fooba"), "cpnmuoj1");
        assert_eq!(encode(b"foobar"), "cpnmuoj1e8");
    }

    #[test]
    fn test_decode_vectors() {
        assert_eq!(decode("cpnmuoj1e8").unwrap(), b"foobar");
        assert_eq!(decode("cpnmuog").unwrap(), b"foob");
        assert_eq!(decode("co").unwrap(), b"f");
    }

    #[test]
    fn test_decode_is_case_insensitive() {
        assert_eq!(decode("CPNMUOJ1E8").unwrap(), b"foobar");
    }

    #[test]
    fn test_decode_rejects_symbols_outside_alphabet() {
        let err = decode("cpnw").unwrap_err();
        assert_eq!(err, InvalidSymbol { position: 3, symbol: b'w' });
    }

    #[test]
    fn test_encode_length_for_compact_payload() {
        assert_eq!(encode(&[0xff; 14]).len(), 23);
    }
}
