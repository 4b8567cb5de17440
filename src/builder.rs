//! The URI components builder.

use crate::{
    components::{HierarchicalUriComponents, OpaqueUriComponents, UriComponents},
    error::{Result, UriError, UriErrorKind},
    parse::{Parser, UriRecord},
    path::PathBuilder,
    query::QueryParams,
    template::{TemplateValue, ToTemplateValue, UriTemplateVariables},
};
use alloc::{
    format,
    string::{String, ToString},
};
use core::convert::Infallible;
use std::collections::HashMap;

/// A builder for [`UriComponents`].
///
/// A builder is populated either by parsing a URI string or by calling
/// setters, and then turned into an immutable snapshot with [`build`].
/// Setters take `&mut self` and return `&mut Self` so that calls can be
/// chained; use [`clone_builder`] to branch a construction into two
/// independent continuations.
///
/// [`build`]: Self::build
/// [`clone_builder`]: Self::clone_builder
///
/// # Examples
///
/// ```
/// use uri_components::UriComponentsBuilder;
///
/// let mut base = UriComponentsBuilder::from_uri_string("https://example.com/api")?;
/// let users = base.clone_builder().path_segment(&["users", "a/b"]).build(false)?;
/// let items = base.path("items").query("page=2").build(false)?;
///
/// assert_eq!(users.to_uri_string(), "https://example.com/api/users/a%2Fb");
/// assert_eq!(items.to_uri_string(), "https://example.com/api/items?page=2");
/// # Ok::<_, uri_components::UriError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[must_use]
pub struct UriComponentsBuilder {
    scheme: Option<String>,
    ssp: Option<String>,
    user_info: Option<String>,
    host: Option<String>,
    port: Option<String>,
    path: PathBuilder,
    query_params: QueryParams,
    fragment: Option<String>,
    uri_variables: HashMap<String, TemplateValue>,
}

fn owned<'a>(s: impl Into<Option<&'a str>>) -> Option<String> {
    s.into().map(String::from)
}

impl UriComponentsBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with the given path.
    pub fn from_path(path: &str) -> Self {
        let mut builder = Self::new();
        builder.path(path);
        builder
    }

    /// Creates a builder initialized from a parsed URI string.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string cannot be parsed.
    pub fn from_uri_string(uri: &str) -> Result<Self> {
        Self::from_uri_string_with(&Parser::new(), uri)
    }

    /// Creates a builder initialized from a URI string parsed with `parser`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string cannot be parsed.
    pub fn from_uri_string_with(parser: &Parser, uri: &str) -> Result<Self> {
        parser.parse(uri).map(Self::from_record)
    }

    /// Creates a builder initialized from an HTTP or HTTPS URL.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string cannot be parsed, or if it lacks an
    /// `http` or `https` scheme or a non-empty host.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_components::{UriComponentsBuilder, UriErrorKind};
    ///
    /// let b = UriComponentsBuilder::from_http_url("HTTPS://example.com:8443/a")?;
    /// assert_eq!(b.build(false)?.port_number(), Some(8443));
    ///
    /// let e = UriComponentsBuilder::from_http_url("mailto:someone@example.com").unwrap_err();
    /// assert_eq!(e.kind(), UriErrorKind::InvalidHttpUrl);
    /// # Ok::<_, uri_components::UriError>(())
    /// ```
    pub fn from_http_url(url: &str) -> Result<Self> {
        let record = Parser::new().parse(url)?;
        let is_http = matches!(record.scheme.as_deref(), Some("http" | "https"));
        if !is_http || record.host.as_deref().map_or(true, str::is_empty) {
            return Err(UriError::new(
                UriErrorKind::InvalidHttpUrl,
                format!("{url:?} is not a valid HTTP URL"),
            ));
        }
        Ok(Self::from_record(record))
    }

    /// Creates a builder initialized from the given components.
    pub fn from_uri_components(components: &UriComponents) -> Self {
        let mut builder = Self::new();
        components.copy_to_builder(&mut builder);
        builder
    }

    /// Creates a builder initialized from a parse result.
    pub fn from_record(record: UriRecord) -> Self {
        let mut builder = Self::new();
        builder.scheme = record.scheme;
        if record.is_opaque {
            builder.ssp = record.path;
        } else {
            builder.user_info = record.user;
            builder.host = record.host;
            builder.port = record.port.filter(|p| !p.is_empty());
            if let Some(path) = &record.path {
                builder.path(path);
            }
            if let Some(query) = &record.query {
                builder.query(query.as_str());
            }
        }
        builder.fragment(record.fragment.as_deref());
        builder
    }

    /// Returns a deep copy of the builder.
    pub fn clone_builder(&self) -> Self {
        self.clone()
    }

    pub(crate) fn path_builder_mut(&mut self) -> &mut PathBuilder {
        self.ssp = None;
        &mut self.path
    }

    /// Sets the scheme, or clears it with `None`.
    pub fn scheme<'a>(&mut self, scheme: impl Into<Option<&'a str>>) -> &mut Self {
        self.scheme = owned(scheme);
        self
    }

    /// Sets the scheme-specific part, making the URI opaque.
    ///
    /// Clears the user information, host, port, path and query.
    pub fn scheme_specific_part<'a>(&mut self, ssp: impl Into<Option<&'a str>>) -> &mut Self {
        self.ssp = owned(ssp);
        self.user_info = None;
        self.host = None;
        self.port = None;
        self.path.clear();
        self.query_params.clear();
        self
    }

    /// Sets the user information, or clears it with `None`.
    pub fn user_info<'a>(&mut self, user_info: impl Into<Option<&'a str>>) -> &mut Self {
        self.user_info = owned(user_info);
        self.ssp = None;
        self
    }

    /// Sets the host, or clears it with `None`.
    pub fn host<'a>(&mut self, host: impl Into<Option<&'a str>>) -> &mut Self {
        self.host = owned(host);
        self.ssp = None;
        self
    }

    /// Sets the port as text, or clears it with `None`.
    ///
    /// The text may be a template placeholder such as `{port}`.
    /// An empty string clears the port.
    pub fn port<'a>(&mut self, port: impl Into<Option<&'a str>>) -> &mut Self {
        self.port = owned(port).filter(|p| !p.is_empty());
        self.ssp = None;
        self
    }

    /// Sets the port.
    pub fn port_number(&mut self, port: u16) -> &mut Self {
        self.port = Some(port.to_string());
        self.ssp = None;
        self
    }

    /// Appends literal path text.
    ///
    /// A `/` is inserted between the text and a previously added path unless
    /// either side already has one, and repeated slashes are collapsed.
    pub fn path(&mut self, path: &str) -> &mut Self {
        self.path_builder_mut().add_path(path);
        self
    }

    /// Replaces the path, or clears it with `None`.
    pub fn replace_path<'a>(&mut self, path: impl Into<Option<&'a str>>) -> &mut Self {
        self.path_builder_mut().clear();
        if let Some(path) = path.into() {
            self.path(path);
        }
        self
    }

    /// Appends path segments.
    ///
    /// A `/` inside a segment is escaped as `%2F` rather than treated as a
    /// separator. Blank segments are ignored.
    pub fn path_segment<S: AsRef<str>>(&mut self, segments: &[S]) -> &mut Self {
        self.path_builder_mut().add_segments(segments);
        self
    }

    /// Parses `name(=value)?` pairs separated by `&` and appends them to the
    /// query parameters, or clears the parameters with `None`.
    ///
    /// `name=` yields an empty value and `name` alone yields no value.
    pub fn query<'a>(&mut self, query: impl Into<Option<&'a str>>) -> &mut Self {
        match query.into() {
            Some(query) => self.query_params.extend_from_query(query),
            None => self.query_params.clear(),
        }
        self.ssp = None;
        self
    }

    /// Replaces the query parameters with those parsed from `query`.
    pub fn replace_query<'a>(&mut self, query: impl Into<Option<&'a str>>) -> &mut Self {
        self.query_params.clear();
        self.query(query)
    }

    /// Appends values to a query parameter.
    ///
    /// With no values, a parameter without value (`?name`) is added.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_components::UriComponentsBuilder;
    ///
    /// let c = UriComponentsBuilder::from_path("/p")
    ///     .query_param("a", ["1", "2"])
    ///     .query_param("flag", None::<&str>)
    ///     .build(false)?;
    /// assert_eq!(c.query().as_deref(), Some("a=1&a=2&flag"));
    /// # Ok::<_, uri_components::UriError>(())
    /// ```
    pub fn query_param<I, V>(&mut self, name: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: AsRef<str>,
    {
        let mut empty = true;
        for value in values {
            self.query_params.add(name, Some(value.as_ref().into()));
            empty = false;
        }
        if empty {
            self.query_params.add(name, None);
        }
        self.ssp = None;
        self
    }

    /// Appends a value to a query parameter if the value is present.
    pub fn query_param_if_present(&mut self, name: &str, value: Option<&str>) -> &mut Self {
        match value {
            Some(value) => self.query_param(name, [value]),
            None => self,
        }
    }

    /// Replaces the values of a query parameter.
    ///
    /// With no values, the parameter is removed.
    pub fn replace_query_param<I, V>(&mut self, name: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: AsRef<str>,
    {
        self.query_params.remove(name);
        let mut values = values.into_iter().peekable();
        if values.peek().is_some() {
            self.query_param(name, values);
        }
        self
    }

    /// Appends all of the given query parameters.
    pub fn query_params(&mut self, params: &QueryParams) -> &mut Self {
        self.query_params.extend_from(params);
        self.ssp = None;
        self
    }

    /// Replaces the query parameters.
    pub fn replace_query_params(&mut self, params: &QueryParams) -> &mut Self {
        self.query_params.clear();
        self.query_params(params)
    }

    /// Sets the fragment, or clears it with `None`.
    ///
    /// An empty string clears the fragment.
    pub fn fragment<'a>(&mut self, fragment: impl Into<Option<&'a str>>) -> &mut Self {
        self.fragment = owned(fragment).filter(|f| !f.is_empty());
        self
    }

    /// Registers URI variables to expand when building.
    ///
    /// Placeholders whose names are not registered are left unexpanded so
    /// that they can be expanded later.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_components::{template::positional, UriComponentsBuilder};
    ///
    /// let c = UriComponentsBuilder::from_uri_string("https://{host}/{a}/{b}")?
    ///     .uri_variables([("host", "example.com"), ("a", "x")])
    ///     .build(false)?;
    /// assert_eq!(c.to_uri_string(), "https://example.com/x/{b}");
    ///
    /// let c = c.expand(positional(["y"]))?;
    /// assert_eq!(c.to_uri_string(), "https://example.com/x/y");
    /// # Ok::<_, uri_components::UriError>(())
    /// ```
    pub fn uri_variables<I, K, V>(&mut self, vars: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToTemplateValue,
    {
        for (name, value) in vars {
            self.uri_variables
                .insert(name.into(), value.to_template_value());
        }
        self
    }

    /// Builds [`UriComponents`] from the current state.
    ///
    /// The components are opaque if a scheme-specific part is set.
    /// Registered URI variables are expanded first.
    ///
    /// If `encoded` is `true`, the components are declared to be already
    /// percent-encoded and are verified accordingly.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `encoded` is `true` and a component contains a
    /// character not allowed in it or a malformed escape.
    pub fn build(&self, encoded: bool) -> Result<UriComponents> {
        let components = self.build_internal();
        if encoded {
            components.into_verified()
        } else {
            Ok(components)
        }
    }

    /// Builds [`UriComponents`] and expands them with `vars`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a variable cannot be resolved.
    pub fn build_and_expand(&self, vars: impl UriTemplateVariables) -> Result<UriComponents> {
        self.build_internal().expand(vars)
    }

    /// Builds, encodes and renders the URI as a string.
    #[must_use]
    pub fn to_uri_string(&self) -> String {
        self.build_internal().encode().to_uri_string()
    }

    fn build_internal(&self) -> UriComponents {
        let components = match &self.ssp {
            Some(ssp) => UriComponents::Opaque(OpaqueUriComponents {
                scheme: self.scheme.clone(),
                ssp: Some(ssp.clone()),
                fragment: self.fragment.clone(),
            }),
            None => UriComponents::Hierarchical(HierarchicalUriComponents {
                scheme: self.scheme.clone(),
                user_info: self.user_info.clone(),
                host: self.host.clone(),
                port: self.port.clone(),
                path: self.path.build(),
                query_params: self.query_params.clone(),
                fragment: self.fragment.clone(),
                encoded: false,
            }),
        };

        if self.uri_variables.is_empty() {
            return components;
        }
        tracing::debug!(
            count = self.uri_variables.len(),
            "expanding registered URI variables"
        );
        let expanded = components.expand_with(&mut |name| {
            Ok::<_, Infallible>(
                self.uri_variables
                    .get(name)
                    .cloned()
                    .unwrap_or(TemplateValue::Skip),
            )
        });
        match expanded {
            Ok(expanded) => expanded,
            Err(never) => match never {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ssp_and_hierarchical_fields_exclude_each_other() {
        let mut b = UriComponentsBuilder::new();
        b.scheme("mailto").host("h").path("/p").query("a=1");
        b.scheme_specific_part("user@example.com");
        let c = b.build(false).unwrap();
        assert!(c.is_opaque());
        assert_eq!(c.to_uri_string(), "mailto:user@example.com");

        b.host("example.com");
        let c = b.build(false).unwrap();
        assert!(!c.is_opaque());
        assert_eq!(c.to_uri_string(), "mailto://example.com");
    }

    #[test]
    fn from_record_keeps_fields() {
        let b = UriComponentsBuilder::from_uri_string("ftp://u@h:21/a?x#f").unwrap();
        assert_eq!(b.user_info.as_deref(), Some("u"));
        assert_eq!(b.host.as_deref(), Some("h"));
        assert_eq!(b.port.as_deref(), Some("21"));
        assert_eq!(b.fragment.as_deref(), Some("f"));
        assert_eq!(b.query_params.get("x"), Some(&[None][..]));
    }

    #[test]
    fn replace_query_param_removes_with_no_values() {
        let mut b = UriComponentsBuilder::from_path("/p");
        b.query("a=1&b=2");
        b.replace_query_param("a", ["3"]);
        assert_eq!(b.build(false).unwrap().query().as_deref(), Some("b=2&a=3"));
        b.replace_query_param("a", [""; 0]);
        assert_eq!(b.build(false).unwrap().query().as_deref(), Some("b=2"));
    }

    #[test]
    fn build_encoded_verifies() {
        let mut b = UriComponentsBuilder::from_path("/a%20b");
        assert!(b.build(true).unwrap().is_encoded());
        b.path("c d");
        let e = b.build(true).unwrap_err();
        assert_eq!(e.kind(), UriErrorKind::NotEncoded);
    }
}
