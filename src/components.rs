//! Immutable URI components.

use crate::{
    builder::UriComponentsBuilder,
    error::Result,
    normalize::remove_dot_segments,
    path::PathComponent,
    pct_enc::{self, table, Charset, Table},
    query::{self, QueryParams},
    template::{expand_component, TemplateValue, UriTemplateVariables},
    uri::Uri,
};
use alloc::{string::String, vec::Vec};

/// An immutable collection of URI components.
///
/// A value is created by [`UriComponentsBuilder::build`]. Every transformation
/// ([`encode`], [`normalize`], [`expand`]) returns a new value.
///
/// Component values are kept as given, which may include template
/// placeholders such as `{id}` and characters that are not allowed in a URI.
/// Call [`encode`] before [`to_uri_string`] when a valid URI is required,
/// or use [`to_uri`].
///
/// [`encode`]: Self::encode
/// [`normalize`]: Self::normalize
/// [`expand`]: Self::expand
/// [`to_uri_string`]: Self::to_uri_string
/// [`to_uri`]: Self::to_uri
///
/// # Examples
///
/// ```
/// use uri_components::UriComponentsBuilder;
///
/// let c = UriComponentsBuilder::new()
///     .scheme("https")
///     .host("example.com")
///     .path("/search results")
///     .query_param("q", ["a&b"])
///     .build(false)?;
///
/// assert_eq!(c.to_uri_string(), "https://example.com/search results?q=a&b");
/// assert_eq!(
///     c.encode().to_uri_string(),
///     "https://example.com/search%20results?q=a%26b"
/// );
/// # Ok::<_, uri_components::UriError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UriComponents {
    /// Components of a hierarchical URI.
    Hierarchical(HierarchicalUriComponents),
    /// Components of an opaque URI.
    Opaque(OpaqueUriComponents),
}

/// Components of a hierarchical URI such as `http://example.com/path?query`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HierarchicalUriComponents {
    pub(crate) scheme: Option<String>,
    pub(crate) user_info: Option<String>,
    pub(crate) host: Option<String>,
    pub(crate) port: Option<String>,
    pub(crate) path: PathComponent,
    pub(crate) query_params: QueryParams,
    pub(crate) fragment: Option<String>,
    pub(crate) encoded: bool,
}

/// Components of an opaque URI such as `mailto:user@example.com`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OpaqueUriComponents {
    pub(crate) scheme: Option<String>,
    pub(crate) ssp: Option<String>,
    pub(crate) fragment: Option<String>,
}

impl HierarchicalUriComponents {
    /// Returns the path component.
    #[must_use]
    pub fn path_component(&self) -> &PathComponent {
        &self.path
    }

    fn encode_with(&self, charset: Charset) -> Self {
        let enc = |s: &Option<String>, table: Table| {
            s.as_deref()
                .map(|s| pct_enc::encode(s, table, charset).into_owned())
        };
        let query_params = match self.query_params.try_map(|s| {
            Ok::<_, core::convert::Infallible>(
                pct_enc::encode(s, table::QUERY_PARAM, charset).into_owned(),
            )
        }) {
            Ok(params) => params,
            Err(never) => match never {},
        };
        Self {
            scheme: enc(&self.scheme, table::SCHEME),
            user_info: enc(&self.user_info, table::USERINFO),
            host: enc(&self.host, host_table(self.host.as_deref())),
            port: enc(&self.port, table::PORT_TEXT),
            path: self.path.encode(charset),
            query_params,
            fragment: enc(&self.fragment, table::FRAGMENT),
            encoded: true,
        }
    }

    fn verify(&self) -> Result<()> {
        let check = |s: &Option<String>, table: Table, name: &str| match s {
            Some(s) => pct_enc::verify(s, table, name),
            None => Ok(()),
        };
        check(&self.scheme, table::SCHEME, "scheme")?;
        check(&self.user_info, table::USERINFO, "user info")?;
        check(&self.host, host_table(self.host.as_deref()), "host")?;
        check(&self.port, table::PORT_TEXT, "port")?;
        self.path.verify()?;
        for (name, values) in &self.query_params {
            pct_enc::verify(name, table::QUERY_PARAM, "query parameter name")?;
            for value in values.iter().flatten() {
                pct_enc::verify(value, table::QUERY_PARAM, "query parameter value")?;
            }
        }
        check(&self.fragment, table::FRAGMENT, "fragment")
    }

    fn write_to(&self, buf: &mut String) {
        if let Some(scheme) = &self.scheme {
            buf.push_str(scheme);
            buf.push(':');
        }
        let has_authority = self.user_info.is_some() || self.host.is_some();
        if has_authority {
            buf.push_str("//");
            if let Some(user_info) = &self.user_info {
                buf.push_str(user_info);
                buf.push('@');
            }
            if let Some(host) = &self.host {
                buf.push_str(host);
            }
            if let Some(port) = &self.port {
                buf.push(':');
                buf.push_str(port);
            }
        }
        if let Some(path) = self.path.path() {
            if has_authority && !path.starts_with('/') {
                buf.push('/');
            }
            buf.push_str(&path);
        }
        if let Some(query) = self.query_params.to_query_string() {
            buf.push('?');
            buf.push_str(&query);
        }
        if let Some(fragment) = &self.fragment {
            buf.push('#');
            buf.push_str(fragment);
        }
    }
}

impl OpaqueUriComponents {
    fn write_to(&self, buf: &mut String) {
        if let Some(scheme) = &self.scheme {
            buf.push_str(scheme);
            buf.push(':');
        }
        if let Some(ssp) = &self.ssp {
            buf.push_str(ssp);
        }
        if let Some(fragment) = &self.fragment {
            buf.push('#');
            buf.push_str(fragment);
        }
    }
}

fn host_table(host: Option<&str>) -> Table {
    match host {
        Some(host) if host.starts_with('[') => table::IP_LITERAL,
        _ => table::REG_NAME,
    }
}

fn expand_opt<E>(
    s: &Option<String>,
    resolve: &mut dyn FnMut(&str) -> Result<TemplateValue, E>,
) -> Result<Option<String>, E> {
    s.as_deref().map(|s| expand_component(s, resolve)).transpose()
}

impl UriComponents {
    /// Returns the scheme.
    #[must_use]
    pub fn scheme(&self) -> Option<&str> {
        match self {
            UriComponents::Hierarchical(h) => h.scheme.as_deref(),
            UriComponents::Opaque(o) => o.scheme.as_deref(),
        }
    }

    /// Returns the scheme-specific part of an opaque URI.
    #[must_use]
    pub fn scheme_specific_part(&self) -> Option<&str> {
        match self {
            UriComponents::Hierarchical(_) => None,
            UriComponents::Opaque(o) => o.ssp.as_deref(),
        }
    }

    /// Returns the user information.
    #[must_use]
    pub fn user_info(&self) -> Option<&str> {
        match self {
            UriComponents::Hierarchical(h) => h.user_info.as_deref(),
            UriComponents::Opaque(_) => None,
        }
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        match self {
            UriComponents::Hierarchical(h) => h.host.as_deref(),
            UriComponents::Opaque(_) => None,
        }
    }

    /// Returns the port as text.
    #[must_use]
    pub fn port(&self) -> Option<&str> {
        match self {
            UriComponents::Hierarchical(h) => h.port.as_deref(),
            UriComponents::Opaque(_) => None,
        }
    }

    /// Returns the port as a number.
    ///
    /// Returns `None` if there is no port or if it is not a decimal
    /// number below 65536, e.g. an unexpanded `{port}`.
    #[must_use]
    pub fn port_number(&self) -> Option<u16> {
        self.port().and_then(|s| s.parse().ok())
    }

    /// Returns the rendered path, or `None` if it is empty.
    #[must_use]
    pub fn path(&self) -> Option<String> {
        match self {
            UriComponents::Hierarchical(h) => h.path.path(),
            UriComponents::Opaque(_) => None,
        }
    }

    /// Returns the non-empty path segments.
    #[must_use]
    pub fn path_segments(&self) -> Vec<String> {
        match self {
            UriComponents::Hierarchical(h) => h.path.path_segments(),
            UriComponents::Opaque(_) => Vec::new(),
        }
    }

    /// Returns the rendered query, or `None` if there are no parameters.
    #[must_use]
    pub fn query(&self) -> Option<String> {
        match self {
            UriComponents::Hierarchical(h) => h.query_params.to_query_string(),
            UriComponents::Opaque(_) => None,
        }
    }

    /// Returns the query parameters, which are always empty for an opaque URI.
    #[must_use]
    pub fn query_params(&self) -> &QueryParams {
        match self {
            UriComponents::Hierarchical(h) => &h.query_params,
            UriComponents::Opaque(_) => &query::EMPTY,
        }
    }

    /// Returns the fragment.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        match self {
            UriComponents::Hierarchical(h) => h.fragment.as_deref(),
            UriComponents::Opaque(o) => o.fragment.as_deref(),
        }
    }

    /// Checks whether the components are opaque.
    #[must_use]
    pub fn is_opaque(&self) -> bool {
        matches!(self, UriComponents::Opaque(_))
    }

    /// Checks whether the components are known to be fully percent-encoded,
    /// i.e., they were built with `encoded` set or returned by [`encode`].
    ///
    /// [`encode`]: Self::encode
    #[must_use]
    pub fn is_encoded(&self) -> bool {
        match self {
            UriComponents::Hierarchical(h) => h.encoded,
            UriComponents::Opaque(_) => false,
        }
    }

    /// Percent-encodes the components with UTF-8.
    ///
    /// See [`encode_with`](Self::encode_with).
    #[must_use]
    pub fn encode(&self) -> UriComponents {
        self.encode_with(Charset::Utf8)
    }

    /// Percent-encodes every character that is not allowed in its component.
    ///
    /// Characters allowed in a component, including reserved ones such as
    /// `;` in a path, are left as they are, and so are valid `%XX` triplets.
    /// Query parameter names and values additionally have `=` and `&`
    /// encoded. Encoding a value that is already encoded, or that is opaque,
    /// returns a copy of it.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_components::{pct_enc::Charset, UriComponentsBuilder};
    ///
    /// let c = UriComponentsBuilder::from_path("/caf\u{e9}/%41").build(false)?;
    /// assert_eq!(c.encode().path().as_deref(), Some("/caf%C3%A9/%41"));
    /// assert_eq!(
    ///     c.encode_with(Charset::Latin1).path().as_deref(),
    ///     Some("/caf%E9/%41")
    /// );
    /// # Ok::<_, uri_components::UriError>(())
    /// ```
    #[must_use]
    pub fn encode_with(&self, charset: Charset) -> UriComponents {
        match self {
            UriComponents::Hierarchical(h) if !h.encoded => {
                UriComponents::Hierarchical(h.encode_with(charset))
            }
            _ => self.clone(),
        }
    }

    /// Removes `.` and `..` segments from the full rendered path.
    ///
    /// Opaque components are returned as they are.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_components::UriComponentsBuilder;
    ///
    /// let c = UriComponentsBuilder::from_uri_string("http://h/a/b/../c/./d")?
    ///     .build(false)?
    ///     .normalize();
    /// assert_eq!(c.path().as_deref(), Some("/a/c/d"));
    /// # Ok::<_, uri_components::UriError>(())
    /// ```
    #[must_use]
    pub fn normalize(&self) -> UriComponents {
        match self {
            UriComponents::Hierarchical(h) => {
                let path = match h.path.path() {
                    Some(path) => PathComponent::full_path(&remove_dot_segments(&path)),
                    None => PathComponent::Empty,
                };
                UriComponents::Hierarchical(HierarchicalUriComponents {
                    path,
                    ..h.clone()
                })
            }
            UriComponents::Opaque(_) => self.clone(),
        }
    }

    /// Replaces template placeholders with values from `vars`.
    ///
    /// Components are expanded in the order scheme, user information, host,
    /// port, path, query parameter names and values, and fragment; for an
    /// opaque URI, scheme, scheme-specific part and fragment. This is the
    /// order in which [positional](crate::template::positional) values
    /// are consumed. The result is not encoded.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a variable cannot be resolved.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use uri_components::UriComponentsBuilder;
    ///
    /// let vars = HashMap::from([("host", "example.com"), ("id", "42")]);
    ///
    /// let c = UriComponentsBuilder::from_uri_string("https://{host}/hotels/{id}")?
    ///     .build(false)?
    ///     .expand(&vars)?;
    /// assert_eq!(c.to_uri_string(), "https://example.com/hotels/42");
    /// # Ok::<_, uri_components::UriError>(())
    /// ```
    pub fn expand(&self, mut vars: impl UriTemplateVariables) -> Result<UriComponents> {
        self.expand_with(&mut |name| vars.get_value(name))
    }

    /// Expands placeholders with names resolved by `resolve`.
    pub(crate) fn expand_with<E>(
        &self,
        resolve: &mut dyn FnMut(&str) -> Result<TemplateValue, E>,
    ) -> Result<UriComponents, E> {
        Ok(match self {
            UriComponents::Hierarchical(h) => {
                let scheme = expand_opt(&h.scheme, resolve)?;
                let user_info = expand_opt(&h.user_info, resolve)?;
                let host = expand_opt(&h.host, resolve)?;
                let port = expand_opt(&h.port, resolve)?;
                let path = h.path.try_map(&mut |s| expand_component(s, resolve))?;
                let query_params = h.query_params.try_map(|s| expand_component(s, resolve))?;
                let fragment = expand_opt(&h.fragment, resolve)?;
                UriComponents::Hierarchical(HierarchicalUriComponents {
                    scheme,
                    user_info,
                    host,
                    port,
                    path,
                    query_params,
                    fragment,
                    encoded: false,
                })
            }
            UriComponents::Opaque(o) => UriComponents::Opaque(OpaqueUriComponents {
                scheme: expand_opt(&o.scheme, resolve)?,
                ssp: expand_opt(&o.ssp, resolve)?,
                fragment: expand_opt(&o.fragment, resolve)?,
            }),
        })
    }

    /// Checks that the components are fully encoded and marks them so.
    pub(crate) fn into_verified(self) -> Result<UriComponents> {
        match self {
            UriComponents::Hierarchical(mut h) => {
                h.verify()?;
                h.encoded = true;
                Ok(UriComponents::Hierarchical(h))
            }
            UriComponents::Opaque(_) => Ok(self),
        }
    }

    /// Concatenates the components into a URI string.
    ///
    /// Values are joined as they are; call [`encode`](Self::encode) first
    /// if they may contain characters not allowed in a URI.
    #[must_use]
    pub fn to_uri_string(&self) -> String {
        let mut buf = String::new();
        match self {
            UriComponents::Hierarchical(h) => h.write_to(&mut buf),
            UriComponents::Opaque(o) => o.write_to(&mut buf),
        }
        buf
    }

    /// Converts the components into a strictly validated [`Uri`].
    ///
    /// Encoded components are parsed as they are. Otherwise the components
    /// are encoded first; for an opaque URI the scheme-specific part and
    /// fragment are quoted.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the result is not a valid URI, for example when a
    /// template placeholder is left in the scheme or port.
    pub fn to_uri(&self) -> Result<Uri> {
        match self {
            UriComponents::Hierarchical(h) if h.encoded => Uri::parse(&self.to_uri_string()),
            UriComponents::Hierarchical(h) => {
                Uri::parse(&UriComponents::Hierarchical(h.encode_with(Charset::Utf8)).to_uri_string())
            }
            UriComponents::Opaque(o) => {
                let quote = |s: &Option<String>, table: Table| {
                    s.as_deref()
                        .map(|s| pct_enc::encode(s, table, Charset::Utf8).into_owned())
                };
                let quoted = OpaqueUriComponents {
                    scheme: o.scheme.clone(),
                    ssp: quote(&o.ssp, table::OPAQUE_PART),
                    fragment: quote(&o.fragment, table::FRAGMENT),
                };
                Uri::parse(&UriComponents::Opaque(quoted).to_uri_string())
            }
        }
    }

    /// Sets every present component of `self` on `builder`.
    pub fn copy_to_builder(&self, builder: &mut UriComponentsBuilder) {
        match self {
            UriComponents::Hierarchical(h) => {
                if let Some(scheme) = &h.scheme {
                    builder.scheme(scheme.as_str());
                }
                if let Some(user_info) = &h.user_info {
                    builder.user_info(user_info.as_str());
                }
                if let Some(host) = &h.host {
                    builder.host(host.as_str());
                }
                if let Some(port) = &h.port {
                    builder.port(port.as_str());
                }
                h.path.copy_to(builder.path_builder_mut());
                if !h.query_params.is_empty() {
                    builder.query_params(&h.query_params);
                }
                if let Some(fragment) = &h.fragment {
                    builder.fragment(fragment.as_str());
                }
            }
            UriComponents::Opaque(o) => {
                if let Some(scheme) = &o.scheme {
                    builder.scheme(scheme.as_str());
                }
                if let Some(ssp) = &o.ssp {
                    builder.scheme_specific_part(ssp.as_str());
                }
                if let Some(fragment) = &o.fragment {
                    builder.fragment(fragment.as_str());
                }
            }
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::UriComponents;
    use crate::builder::UriComponentsBuilder;
    use alloc::string::String;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for UriComponents {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_uri_string())
        }
    }

    impl<'de> Deserialize<'de> for UriComponents {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            UriComponentsBuilder::from_uri_string(&s)
                .and_then(|b| b.build(false))
                .map_err(de::Error::custom)
        }
    }
}
