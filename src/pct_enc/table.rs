//! Character class tables from RFC 3986.
//!
//! Each table answers whether an ASCII character may appear unescaped in a
//! given component. The predefined constants are documented with the ABNF
//! notation of [RFC 5234].
//!
//! [RFC 5234]: https://datatracker.ietf.org/doc/html/rfc5234

const MASK_PCT_ENCODED: u64 = 1;

/// A table specifying the characters allowed in a component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Table(u64, u64);

impl Table {
    /// Creates a table that only allows the given unencoded bytes.
    ///
    /// # Panics
    ///
    /// Panics if any of the bytes is not ASCII or equals `0` or `b'%'`.
    #[must_use]
    pub const fn new(mut bytes: &[u8]) -> Self {
        let mut table = 0;
        while let [cur, rem @ ..] = bytes {
            assert!(
                !matches!(cur, 0 | b'%' | 128..),
                "cannot allow non-ASCII byte, 0, or %"
            );
            table |= 1u128.wrapping_shl(*cur as u32);
            bytes = rem;
        }
        Self(table as u64, (table >> 64) as u64)
    }

    /// Combines two tables into one.
    #[must_use]
    pub const fn or(self, other: Self) -> Self {
        Self(self.0 | other.0, self.1 | other.1)
    }

    /// Marks this table as allowing percent-encoded octets.
    #[must_use]
    pub const fn or_pct_encoded(self) -> Self {
        Self(self.0 | MASK_PCT_ENCODED, self.1)
    }

    /// Subtracts from this table.
    #[must_use]
    pub const fn sub(self, other: Self) -> Self {
        Self(self.0 & !other.0, self.1 & !other.1)
    }

    /// Checks whether the given byte is allowed unencoded by the table.
    ///
    /// Always returns `false` for `%` and non-ASCII bytes.
    #[inline]
    #[must_use]
    pub const fn allows_ascii(self, x: u8) -> bool {
        let table = if x < 64 {
            self.0 & !MASK_PCT_ENCODED
        } else if x < 128 {
            self.1
        } else {
            0
        };
        table & 1u64.wrapping_shl(x as u32) != 0
    }

    /// Checks whether the given character is allowed unencoded by the table.
    #[inline]
    #[must_use]
    pub const fn allows(self, ch: char) -> bool {
        ch.is_ascii() && self.allows_ascii(ch as u8)
    }

    /// Checks whether percent-encoded octets are allowed by the table.
    #[inline]
    #[must_use]
    pub const fn allows_pct_encoded(self) -> bool {
        self.0 & MASK_PCT_ENCODED != 0
    }

    /// Validates the given string with the table.
    ///
    /// Returns the byte index of the first offending character on failure.
    pub(crate) fn validate(self, s: &str) -> Result<(), usize> {
        let bytes = s.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            let x = bytes[i];
            if x == b'%' && self.allows_pct_encoded() {
                match bytes.get(i + 1..i + 3) {
                    Some(&[hi, lo]) if super::is_hexdig_pair(hi, lo) => i += 3,
                    _ => return Err(i),
                }
            } else if self.allows_ascii(x) {
                i += 1;
            } else {
                return Err(i);
            }
        }
        Ok(())
    }
}

const fn new(bytes: &[u8]) -> Table {
    Table::new(bytes)
}

/// `ALPHA = %x41-5A / %x61-7A`
pub const ALPHA: Table = new(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz");

/// `DIGIT = %x30-39`
pub const DIGIT: Table = new(b"0123456789");

/// `HEXDIG = DIGIT / "A" / "B" / "C" / "D" / "E" / "F"`
pub const HEXDIG: Table = DIGIT.or(new(b"ABCDEFabcdef"));

/// `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
pub const SCHEME: Table = ALPHA.or(DIGIT).or(new(b"+-."));

/// `userinfo = *( unreserved / pct-encoded / sub-delims / ":" )`
pub const USERINFO: Table = UNRESERVED.or(SUB_DELIMS).or(new(b":")).or_pct_encoded();

/// `reg-name = *( unreserved / pct-encoded / sub-delims )`
pub const REG_NAME: Table = UNRESERVED.or(SUB_DELIMS).or_pct_encoded();

/// `IP-literal = "[" ( IPv6address / IPvFuture ) "]"`, loosely.
pub const IP_LITERAL: Table = UNRESERVED.or(SUB_DELIMS).or(new(b"[]:"));

/// `port = *DIGIT`
pub const PORT: Table = DIGIT;

/// Port text that may still hold a template placeholder:
/// `*( unreserved / pct-encoded )`.
pub const PORT_TEXT: Table = UNRESERVED.or_pct_encoded();

/// `path = *( pchar / "/" )`
pub const PATH: Table = PCHAR.or(new(b"/"));

/// `segment = *pchar`
pub const PATH_SEGMENT: Table = PCHAR;

/// `pchar = unreserved / pct-encoded / sub-delims / ":" / "@"`
pub const PCHAR: Table = UNRESERVED.or(SUB_DELIMS).or(new(b":@")).or_pct_encoded();

/// `query = *( pchar / "/" / "?" )`
pub const QUERY: Table = PCHAR.or(new(b"/?"));

/// A query parameter name or value: `query` without `"="` and `"&"`.
pub const QUERY_PARAM: Table = QUERY.sub(new(b"=&"));

/// `fragment = *( pchar / "/" / "?" )`
pub const FRAGMENT: Table = QUERY;

/// `unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"`
pub const UNRESERVED: Table = ALPHA.or(DIGIT).or(new(b"-._~"));

/// `reserved = gen-delims / sub-delims`
pub const RESERVED: Table = GEN_DELIMS.or(SUB_DELIMS);

/// `gen-delims = ":" / "/" / "?" / "#" / "[" / "]" / "@"`
pub const GEN_DELIMS: Table = new(b":/?#[]@");

/// `sub-delims = "!" / "$" / "&" / "'" / "(" / ")"
///             / "*" / "+" / "," / ";" / "="`
pub const SUB_DELIMS: Table = new(b"!$&'()*+,;=");

/// Characters of an opaque scheme-specific part: `reserved / unreserved`.
pub const OPAQUE_PART: Table = RESERVED.sub(new(b"#[]")).or(UNRESERVED).or_pct_encoded();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows() {
        assert!(UNRESERVED.allows('~'));
        assert!(!UNRESERVED.allows('%'));
        assert!(!PCHAR.allows('%'));
        assert!(PCHAR.allows_pct_encoded());
        assert!(PATH.allows('/'));
        assert!(!PATH_SEGMENT.allows('/'));
        assert!(QUERY.allows('='));
        assert!(!QUERY_PARAM.allows('='));
        assert!(!QUERY_PARAM.allows('&'));
        assert!(QUERY_PARAM.allows('+'));
        assert!(!REG_NAME.allows(' '));
        assert!(!REG_NAME.allows('é'));
        assert!(IP_LITERAL.allows('['));
    }

    #[test]
    fn validate() {
        assert_eq!(PATH.validate("/a%20b"), Ok(()));
        assert_eq!(PATH.validate("/a%2"), Err(2));
        assert_eq!(PATH.validate("/a b"), Err(2));
        assert_eq!(PORT.validate("80a"), Err(2));
        assert_eq!(PORT.validate("%38"), Err(0));
        assert_eq!(PORT_TEXT.validate("%7Bport%7D"), Ok(()));
        assert_eq!(PORT_TEXT.validate("{port}"), Err(0));
    }
}
