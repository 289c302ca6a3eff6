//! Encoding gateway — ISO-8859-1 in and out, plus hex.
//!
//! Bankgiro files are single-byte ISO-8859-1 text. Rust strings are
//! UTF-8, so every byte buffer crosses this module on the way in and
//! every signed payload crosses it on the way out. Within ISO-8859-1 one
//! char is one byte, which is what keeps the positional offsets of the
//! registry and the byte-level normalizer in agreement.
//!
//! ## Decoding rules
//! - Valid UTF-8 is taken as-is, unless it already carries U+FFFD: a
//!   replacement char means an earlier transcoder lost the original byte
//!   and the seal could never match, so that is an error.
//! - Anything else is ISO-8859-1, which maps every byte and cannot fail.
//!
//! ## Encoding rules
//! - Chars up to U+00FF map to their own byte.
//! - Above that, Windows-1252 is tried for the handful of typographic
//!   chars it places in 0x80..0x9F (`€`, `”`, ...). Everything else is
//!   [`EncodingError::Unrepresentable`].

use encoding_rs::{mem, WINDOWS_1252};

use crate::errors::EncodingError;

/// Decode raw file bytes into text.
///
/// # Errors
/// Returns [`EncodingError::ReplacementCharacter`] when the input is
/// valid UTF-8 that contains U+FFFD.
pub fn decode(bytes: &[u8]) -> Result<String, EncodingError> {
    match std::str::from_utf8(bytes) {
        Ok(text) if text.contains(char::REPLACEMENT_CHARACTER) => {
            Err(EncodingError::ReplacementCharacter)
        }
        Ok(text) => Ok(text.to_owned()),
        Err(_) => Ok(decode_latin1(bytes)),
    }
}

/// Decode bytes already known to be ISO-8859-1.
pub fn decode_latin1(bytes: &[u8]) -> String {
    mem::decode_latin1(bytes).into_owned()
}

/// Encode text into the canonical single-byte form.
///
/// # Errors
/// Returns [`EncodingError::Unrepresentable`] for the first char that
/// neither ISO-8859-1 nor Windows-1252 can hold. `offset` counts chars.
pub fn encode(text: &str) -> Result<Vec<u8>, EncodingError> {
    if mem::is_str_latin1(text) {
        return Ok(mem::encode_latin1_lossy(text).into_owned());
    }

    let mut out = Vec::with_capacity(text.len());
    for (offset, ch) in text.chars().enumerate() {
        if let Ok(byte) = u8::try_from(u32::from(ch)) {
            out.push(byte);
            continue;
        }
        let mut buf = [0u8; 4];
        let (bytes, _, had_errors) = WINDOWS_1252.encode(ch.encode_utf8(&mut buf));
        if had_errors {
            return Err(EncodingError::Unrepresentable { ch, offset });
        }
        out.extend_from_slice(&bytes);
    }
    Ok(out)
}

/// Encode bytes to an uppercase hex string (the form used in file footers).
pub fn to_hex_upper(data: &[u8]) -> String {
    hex::encode_upper(data)
}

/// Decode a hex string (either case) to bytes.
///
/// # Errors
/// Returns the underlying [`hex::FromHexError`] on odd length or
/// non-hex chars.
pub fn from_hex(encoded: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(encoded)
}
