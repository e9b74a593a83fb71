//! Unpadded, lowercase RFC 4648 base32 as used by the Filecoin address text
//! form.
//!
//! Decoding accepts both cases but requires the canonical encoding: no
//! padding, no dangling symbols and zeroed trailing bits.

use crate::{Error, Result};

/// Symbols in value order.
const ALPHABET: &[u8; 32] = b"abcdefghijklmnopqrstuvwxyz234567";

/// Maps a symbol to its 5-bit value. Upper and lower case are equivalent.
fn symbol_value(symbol: u8) -> Option<u32> {
    match symbol {
        b'a'..=b'z' => Some((symbol - b'a') as u32),
        b'A'..=b'Z' => Some((symbol - b'A') as u32),
        b'2'..=b'7' => Some((symbol - b'2') as u32 + 26),
        _ => None,
    }
}

/// Encode `bytes` without padding.
pub(crate) fn encode(bytes: &[u8]) -> String {
    let mut encoded = String::with_capacity((bytes.len() * 8).div_ceil(5));

    let mut buffer: u32 = 0;
    let mut bits = 0;
    for &byte in bytes {
        buffer = (buffer << 8) | byte as u32;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            encoded.push(ALPHABET[((buffer >> bits) & 0x1f) as usize] as char);
        }
        buffer &= (1 << bits) - 1;
    }
    // Leftover bits are padded with zeros on the right.
    if bits > 0 {
        encoded.push(ALPHABET[((buffer << (5 - bits)) & 0x1f) as usize] as char);
    }

    encoded
}

/// Decode an unpadded base32 string.
pub(crate) fn decode(text: &str) -> Result<Vec<u8>> {
    let mut decoded = Vec::with_capacity(text.len() * 5 / 8);

    let mut buffer: u32 = 0;
    let mut bits = 0;
    for (position, symbol) in text.bytes().enumerate() {
        let value = symbol_value(symbol).ok_or_else(|| {
            Error::InvalidFormat(format!(
                "invalid base32 symbol {:?} at position {position}",
                symbol as char
            ))
        })?;
        buffer = (buffer << 5) | value;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            decoded.push((buffer >> bits) as u8);
            buffer &= (1 << bits) - 1;
        }
    }

    // A whole symbol without a byte to go with it never comes out of `encode`.
    if bits >= 5 {
        return Err(Error::InvalidFormat(format!(
            "base32 input of {} symbols has an invalid length",
            text.len()
        )));
    }
    if buffer != 0 {
        return Err(Error::InvalidFormat(
            "base32 input has non-zero trailing bits".to_string(),
        ));
    }

    Ok(decoded)
}
