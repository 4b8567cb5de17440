//! Strictly validated URIs.

use crate::{
    component::Scheme,
    error::{Result, UriError, UriErrorKind},
    parse::{parse_uri, UriRecord},
    pct_enc::{table, Table},
};
use alloc::{format, string::String};
use core::str::FromStr;

/// A URI that conforms to [RFC 3986].
///
/// Unlike [`parse_uri`], which accepts template placeholders and non-ASCII
/// text, [`Uri::parse`] rejects any character not allowed in its component.
///
/// [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986
///
/// # Examples
///
/// ```
/// use uri_components::Uri;
///
/// let uri = Uri::parse("http://[2001:db8::1]:80/x?y#z")?;
/// assert_eq!(uri.host(), Some("[2001:db8::1]"));
/// assert_eq!(uri.port_number(), Some(80));
/// assert_eq!(uri.path(), Some("/x"));
///
/// assert!(Uri::parse("http://example.com/a b").is_err());
/// assert!(Uri::parse("http://{host}/").is_err());
/// # Ok::<_, uri_components::UriError>(())
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Uri {
    text: String,
    record: UriRecord,
}

fn check(value: Option<&str>, table: Table, component: &str) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    table.validate(value).map_err(|i| {
        UriError::new(
            UriErrorKind::InvalidUri,
            format!("illegal character in {component} at index {i}: {value:?}"),
        )
    })
}

fn check_ip_literal(host: &str) -> Result<()> {
    let ok = host
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .is_some_and(|inner| {
            inner.contains(':')
                && inner
                    .bytes()
                    .all(|x| x.is_ascii_hexdigit() || x == b':' || x == b'.')
        });
    if ok {
        Ok(())
    } else {
        Err(UriError::new(
            UriErrorKind::InvalidUri,
            format!("invalid IP literal {host:?}"),
        ))
    }
}

impl Uri {
    /// Parses and validates a URI string.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string cannot be parsed, or if a component
    /// contains a character not allowed in it.
    pub fn parse(s: &str) -> Result<Uri> {
        let record = parse_uri(s)?;

        if let Some(scheme) = &record.scheme {
            if Scheme::new(scheme).is_none() {
                return Err(UriError::new(
                    UriErrorKind::InvalidUri,
                    format!("invalid scheme {scheme:?}"),
                ));
            }
        }
        check(record.user.as_deref(), table::USERINFO, "user info")?;
        match record.host.as_deref() {
            Some(host) if host.starts_with('[') => check_ip_literal(host)?,
            host => check(host, table::REG_NAME, "host")?,
        }
        check(record.port.as_deref(), table::PORT, "port")?;
        let path_table = if record.is_opaque {
            table::OPAQUE_PART
        } else {
            table::PATH
        };
        check(record.path.as_deref(), path_table, "path")?;
        if record.scheme.is_none() && record.host.is_none() {
            let first = record.path.as_deref().and_then(|p| p.split('/').next());
            if first.is_some_and(|seg| seg.contains(':')) {
                return Err(UriError::new(
                    UriErrorKind::InvalidUri,
                    "colon in the first segment of a relative path",
                ));
            }
        }
        check(record.query.as_deref(), table::QUERY, "query")?;
        check(record.fragment.as_deref(), table::FRAGMENT, "fragment")?;

        Ok(Uri {
            text: s.into(),
            record,
        })
    }

    /// Returns the URI as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consumes the `Uri` and returns its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }

    /// Returns the scheme.
    #[must_use]
    pub fn scheme(&self) -> Option<&Scheme> {
        self.record.scheme.as_deref().map(Scheme::new_validated)
    }

    /// Checks whether the URI is opaque.
    #[must_use]
    pub fn is_opaque(&self) -> bool {
        self.record.is_opaque
    }

    /// Checks whether the URI has a scheme.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.record.scheme.is_some()
    }

    /// Returns the scheme-specific part of an opaque URI.
    #[must_use]
    pub fn scheme_specific_part(&self) -> Option<&str> {
        if self.record.is_opaque {
            self.record.path.as_deref()
        } else {
            None
        }
    }

    /// Returns the user information.
    #[must_use]
    pub fn user_info(&self) -> Option<&str> {
        self.record.user.as_deref()
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.record.host.as_deref()
    }

    /// Returns the port as text.
    #[must_use]
    pub fn port(&self) -> Option<&str> {
        self.record.port.as_deref()
    }

    /// Returns the port as a number, if it fits in a `u16`.
    #[must_use]
    pub fn port_number(&self) -> Option<u16> {
        self.port().and_then(|s| s.parse().ok())
    }

    /// Returns the path of a hierarchical URI.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        if self.record.is_opaque {
            None
        } else {
            self.record.path.as_deref()
        }
    }

    /// Returns the query.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.record.query.as_deref()
    }

    /// Returns the fragment.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.record.fragment.as_deref()
    }
}

impl FromStr for Uri {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self> {
        Uri::parse(s)
    }
}

impl AsRef<str> for Uri {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::Uri;
    use alloc::string::String;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for Uri {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(self.as_str())
        }
    }

    impl<'de> Deserialize<'de> for Uri {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            Uri::parse(&s).map_err(de::Error::custom)
        }
    }
}
