//! Percent-encoding utilities.

pub mod table;

pub use table::Table;

use crate::error::{Result, UriError, UriErrorKind};
use alloc::{borrow::Cow, string::String, vec::Vec};

/// The character encoding used to turn characters into octets before
/// percent-encoding them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Charset {
    /// UTF-8.
    #[default]
    Utf8,
    /// ISO-8859-1. Characters above `U+00FF` are replaced with `?`.
    Latin1,
}

impl Charset {
    fn push_octets(self, ch: char, out: &mut Vec<u8>) {
        match self {
            Charset::Utf8 => out.extend_from_slice(ch.encode_utf8(&mut [0; 4]).as_bytes()),
            Charset::Latin1 => out.push(u8::try_from(u32::from(ch)).unwrap_or(b'?')),
        }
    }
}

const HEX_TABLE: &[u8; 512] = &{
    const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

    let mut i = 0;
    let mut table = [0; 512];
    while i < 256 {
        table[i * 2] = HEX_DIGITS[i >> 4];
        table[i * 2 + 1] = HEX_DIGITS[i & 0b1111];
        i += 1;
    }
    table
};

pub(crate) fn push_pct_encoded(buf: &mut String, x: u8) {
    let i = x as usize * 2;
    buf.push('%');
    buf.push(HEX_TABLE[i] as char);
    buf.push(HEX_TABLE[i + 1] as char);
}

#[inline]
pub(crate) const fn is_hexdig(x: u8) -> bool {
    x.is_ascii_hexdigit()
}

#[inline]
pub(crate) const fn is_hexdig_pair(hi: u8, lo: u8) -> bool {
    is_hexdig(hi) && is_hexdig(lo)
}

const fn hex_value(x: u8) -> u8 {
    match x {
        b'0'..=b'9' => x - b'0',
        b'a'..=b'f' => x - b'a' + 10,
        _ => x - b'A' + 10,
    }
}

/// Percent-encodes a string for the component described by `table`,
/// appending the result to `buf`.
///
/// Characters allowed by the table are kept as is. Any other character is
/// converted to octets with `charset` and each octet is percent-encoded.
/// Well-formed percent-encoded octets already present in `s` are preserved
/// when the table allows them, so encoding is idempotent.
pub fn encode_to(s: &str, table: Table, charset: Charset, buf: &mut String) {
    let bytes = s.as_bytes();
    let mut octets = Vec::new();

    for (i, ch) in s.char_indices() {
        if ch == '%' && table.allows_pct_encoded() {
            if let Some(&[hi, lo]) = bytes.get(i + 1..i + 3) {
                if is_hexdig_pair(hi, lo) {
                    buf.push('%');
                    continue;
                }
            }
        }
        if table.allows(ch) {
            buf.push(ch);
        } else {
            octets.clear();
            charset.push_octets(ch, &mut octets);
            for &x in &octets {
                push_pct_encoded(buf, x);
            }
        }
    }
}

/// Percent-encodes a string for the component described by `table`.
///
/// See [`encode_to`] for details.
///
/// # Examples
///
/// ```
/// use uri_components::pct_enc::{encode, table, Charset};
///
/// assert_eq!(encode("a b/c", table::PATH_SEGMENT, Charset::Utf8), "a%20b%2Fc");
/// assert_eq!(encode("a%20b", table::PATH, Charset::Utf8), "a%20b");
/// assert_eq!(encode("100%", table::PATH, Charset::Utf8), "100%25");
/// assert_eq!(encode("é", table::PATH, Charset::Latin1), "%E9");
/// ```
#[must_use]
pub fn encode(s: &str, table: Table, charset: Charset) -> Cow<'_, str> {
    let needs_encoding = s.char_indices().any(|(i, ch)| {
        if ch == '%' && table.allows_pct_encoded() {
            !matches!(s.as_bytes().get(i + 1..i + 3), Some(&[hi, lo]) if is_hexdig_pair(hi, lo))
        } else {
            !table.allows(ch)
        }
    });
    if !needs_encoding {
        return Cow::Borrowed(s);
    }
    let mut buf = String::with_capacity(s.len() + s.len() / 2);
    encode_to(s, table, charset, &mut buf);
    Cow::Owned(buf)
}

/// Checks that a string only contains characters allowed by `table`
/// and well-formed percent-encoded octets.
pub(crate) fn verify(s: &str, table: Table, component: &str) -> Result<()> {
    table.validate(s).map_err(|i| {
        let reason = match s[i..].chars().next() {
            Some('%') => alloc::format!("invalid percent-encoded octet in {component} {s:?}"),
            Some(ch) => alloc::format!("invalid character {ch:?} for {component} in {s:?}"),
            None => alloc::format!("invalid {component} {s:?}"),
        };
        UriError::at(UriErrorKind::NotEncoded, i, reason)
    })
}

/// Decodes a percent-encoded string into octets.
///
/// Note that `+` is **not** decoded as a space.
///
/// # Errors
///
/// Returns `Err` with kind [`BadEncoding`] if a percent sign is not followed
/// by two hexadecimal digits.
///
/// [`BadEncoding`]: UriErrorKind::BadEncoding
///
/// # Examples
///
/// ```
/// use uri_components::pct_enc::decode;
///
/// assert_eq!(decode("%C2%A1Hola%21")?.as_ref(), "¡Hola!".as_bytes());
/// assert!(decode("%2").is_err());
/// # Ok::<_, uri_components::UriError>(())
/// ```
pub fn decode(s: &str) -> Result<Cow<'_, [u8]>> {
    let bytes = s.as_bytes();
    let Some(first) = bytes.iter().position(|&x| x == b'%') else {
        return Ok(Cow::Borrowed(bytes));
    };

    let mut out = Vec::with_capacity(bytes.len());
    out.extend_from_slice(&bytes[..first]);

    let mut i = first;
    while i < bytes.len() {
        let x = bytes[i];
        if x == b'%' {
            match bytes.get(i + 1..i + 3) {
                Some(&[hi, lo]) if is_hexdig_pair(hi, lo) => {
                    out.push(hex_value(hi) << 4 | hex_value(lo));
                    i += 3;
                }
                _ => {
                    return Err(UriError::at(
                        UriErrorKind::BadEncoding,
                        i,
                        "incomplete or non-hexadecimal percent-encoded octet",
                    ))
                }
            }
        } else {
            out.push(x);
            i += 1;
        }
    }
    Ok(Cow::Owned(out))
}

/// Decodes a percent-encoded string, replacing invalid UTF-8 with `U+FFFD`.
///
/// # Errors
///
/// Returns `Err` under the same conditions as [`decode`].
pub fn decode_utf8_lossy(s: &str) -> Result<String> {
    decode(s).map(|octets| String::from_utf8_lossy(&octets).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_preserves_triplets() {
        let s = encode("/a%2Fb%zz", table::PATH, Charset::Utf8);
        assert_eq!(s, "/a%2Fb%25zz");
        assert_eq!(encode(&s, table::PATH, Charset::Utf8), s);
    }

    #[test]
    fn encode_ports_strictly() {
        // Percent-encoded octets are never allowed in a port.
        assert_eq!(encode("8%30", table::PORT, Charset::Utf8), "8%2530");
    }

    #[test]
    fn encode_non_ascii() {
        assert_eq!(encode("测试", table::QUERY, Charset::Utf8), "%E6%B5%8B%E8%AF%95");
        assert_eq!(encode("€", table::QUERY, Charset::Latin1), "%3F");
    }

    #[test]
    fn decode_mixed() {
        assert_eq!(decode_utf8_lossy("a%20b").unwrap(), "a b");
        assert_eq!(decode("plain").unwrap(), Cow::Borrowed(b"plain".as_slice()));
        let e = decode("ab%g1").unwrap_err();
        assert_eq!(e.kind(), UriErrorKind::BadEncoding);
        assert_eq!(e.index(), Some(2));
    }
}
