//! Reversible mapping between internal collection names and URL-safe
//! identifiers.
//!
//! Internal names are arbitrary strings (typically `namespace:localName`),
//! but published identifiers must fit an NCName-like grammar: start with an
//! ASCII letter or underscore, then only ASCII letters, digits, `.`, `-`
//! and `_`. Bytes outside that set (the `:` separator in particular) are
//! escaped as `_` followed by two lowercase hex digits, which keeps the
//! mapping injective and exactly invertible.

use crate::error::{AppError, AppResult};

fn is_safe(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'.' || byte == b'-'
}

/// Encode an internal name as an NCName-like identifier.
pub fn encode(internal: &str) -> String {
    let mut out = String::with_capacity(internal.len());
    for (i, byte) in internal.bytes().enumerate() {
        // The first character may not be a digit, '.' or '-'.
        let safe_here = if i == 0 {
            byte.is_ascii_alphabetic()
        } else {
            is_safe(byte)
        };
        if safe_here {
            out.push(byte as char);
        } else {
            out.push_str(&format!("_{:02x}", byte));
        }
    }
    out
}

/// Decode an identifier produced by [`encode`] back to the internal name.
///
/// Only strings actually produced by `encode` are guaranteed to decode;
/// anything else fails with `MalformedIdentifier`.
pub fn decode(external: &str) -> AppResult<String> {
    let malformed = || AppError::MalformedIdentifier(external.to_string());

    // encode never emits a leading digit, '.' or '-'.
    match external.bytes().next() {
        Some(first) if first.is_ascii_alphabetic() || first == b'_' => {}
        _ => return Err(malformed()),
    }

    let mut bytes = Vec::with_capacity(external.len());
    let mut iter = external.bytes();
    while let Some(byte) = iter.next() {
        if byte == b'_' {
            let hi = iter.next().ok_or_else(malformed)?;
            let lo = iter.next().ok_or_else(malformed)?;
            let hex = [hi, lo];
            let hex = std::str::from_utf8(&hex).map_err(|_| malformed())?;
            if hex.bytes().any(|b| b.is_ascii_uppercase()) {
                return Err(malformed());
            }
            let value = u8::from_str_radix(hex, 16).map_err(|_| malformed())?;
            bytes.push(value);
        } else if is_safe(byte) {
            bytes.push(byte);
        } else {
            return Err(malformed());
        }
    }

    String::from_utf8(bytes).map_err(|_| malformed())
}

/// Encode a namespace-qualified name.
pub fn encode_qualified(namespace: &str, local: &str) -> String {
    encode(&format!("{}:{}", namespace, local))
}

/// Decode an identifier and split it into namespace and local name.
pub fn decode_qualified(external: &str) -> AppResult<(String, String)> {
    let qualified = decode(external)?;
    match qualified.split_once(':') {
        Some((ns, local)) => Ok((ns.to_string(), local.to_string())),
        None => Err(AppError::MalformedIdentifier(format!(
            "{} does not decode to a qualified name",
            external
        ))),
    }
}
