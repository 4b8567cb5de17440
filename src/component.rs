//! URI components.

use crate::pct_enc::table;
use ref_cast::{ref_cast_custom, RefCastCustom};

/// Schemes whose scheme-specific part is always decomposed into
/// authority, path and query, even when it does not start with `/`.
pub(crate) const HIERARCHICAL_SCHEMES: &[&str] = &["ftp", "file", "http", "https", "ws", "wss"];

/// A [scheme] component.
///
/// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
///
/// # Comparison
///
/// `Scheme`s are compared case-insensitively.
///
/// # Examples
///
/// ```
/// use uri_components::{component::Scheme, Uri};
///
/// const SCHEME_HTTP: &Scheme = Scheme::new_or_panic("http");
///
/// let uri = Uri::parse("HTTP://EXAMPLE.COM/")?;
/// let scheme = uri.scheme().unwrap();
///
/// // The parser lowercases schemes.
/// assert_eq!(scheme.as_str(), "http");
/// assert_eq!(scheme, SCHEME_HTTP);
/// assert_eq!(Scheme::new_or_panic("HTTPS"), Scheme::new_or_panic("https"));
/// # Ok::<_, uri_components::UriError>(())
/// ```
#[derive(RefCastCustom)]
#[repr(transparent)]
pub struct Scheme {
    inner: str,
}

impl Scheme {
    #[ref_cast_custom]
    #[inline]
    pub(crate) const fn new_validated(scheme: &str) -> &Scheme;

    /// Converts a string slice to `&Scheme`.
    ///
    /// # Panics
    ///
    /// Panics if the string is not a valid scheme name according to
    /// [Section 3.1 of RFC 3986][scheme]. For a non-panicking variant,
    /// use [`new`](Self::new).
    ///
    /// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
    #[inline]
    #[must_use]
    pub const fn new_or_panic(s: &str) -> &Scheme {
        match Self::new(s) {
            Some(scheme) => scheme,
            None => panic!("invalid scheme"),
        }
    }

    /// Converts a string slice to `&Scheme`, returning `None` if the conversion fails.
    #[inline]
    #[must_use]
    pub const fn new(s: &str) -> Option<&Scheme> {
        let bytes = s.as_bytes();
        if bytes.is_empty() || !bytes[0].is_ascii_alphabetic() {
            return None;
        }
        let mut i = 1;
        while i < bytes.len() {
            if !table::SCHEME.allows_ascii(bytes[i]) {
                return None;
            }
            i += 1;
        }
        Some(Scheme::new_validated(s))
    }

    /// Returns the scheme component as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Checks whether the scheme is one of the schemes that are always
    /// hierarchical: `ftp`, `file`, `http`, `https`, `ws` and `wss`.
    #[must_use]
    pub fn is_hierarchical(&self) -> bool {
        HIERARCHICAL_SCHEMES
            .iter()
            .any(|s| s.eq_ignore_ascii_case(&self.inner))
    }

    /// Returns the default port of the scheme, if known.
    ///
    /// | Scheme | Port |
    /// | - | - |
    /// | ftp | 21 |
    /// | http, ws | 80 |
    /// | https, wss | 443 |
    #[must_use]
    pub fn default_port(&self) -> Option<u16> {
        const TABLE: &[(&str, u16)] = &[
            ("ftp", 21),
            ("http", 80),
            ("https", 443),
            ("ws", 80),
            ("wss", 443),
        ];
        TABLE
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(&self.inner))
            .map(|&(_, port)| port)
    }
}

impl PartialEq for Scheme {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.inner.eq_ignore_ascii_case(&other.inner)
    }
}

impl Eq for Scheme {}
