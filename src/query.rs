//! Query parameters.

use alloc::{string::String, vec::Vec};
use core::slice;

/// An ordered multi-map of query parameters.
///
/// Keys keep the order in which they were first added, and each key maps to
/// the list of its values in insertion order. A value of `None` stands for a
/// parameter written without `=`, such as `flag` in `?flag&x=1`.
///
/// # Examples
///
/// ```
/// use uri_components::QueryParams;
///
/// let mut params = QueryParams::new();
/// params.extend_from_query("a=1&b&a=2&c=");
///
/// assert_eq!(params.get("a"), Some(&[Some("1".into()), Some("2".into())][..]));
/// assert_eq!(params.get("b"), Some(&[None][..]));
/// assert_eq!(params.get_first("c"), Some(Some("")));
/// assert_eq!(params.to_query_string().as_deref(), Some("a=1&a=2&b&c="));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, Vec<Option<String>>)>,
}

pub(crate) static EMPTY: QueryParams = QueryParams {
    entries: Vec::new(),
};

impl QueryParams {
    /// Creates an empty `QueryParams`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks whether there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks whether a key is present.
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Returns all values of a key.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[Option<String>]> {
        self.position(name).map(|i| &self.entries[i].1[..])
    }

    /// Returns the first value of a key.
    ///
    /// The inner `Option` is `None` for a parameter without `=`.
    #[must_use]
    pub fn get_first(&self, name: &str) -> Option<Option<&str>> {
        self.get(name)
            .and_then(|values| values.first())
            .map(Option::as_deref)
    }

    /// Appends a value to a key, adding the key if absent.
    pub fn add(&mut self, name: impl Into<String>, value: Option<String>) {
        let name = name.into();
        match self.position(&name) {
            Some(i) => self.entries[i].1.push(value),
            None => self.entries.push((name, alloc::vec![value])),
        }
    }

    /// Removes a key and returns its values.
    pub fn remove(&mut self, name: &str) -> Option<Vec<Option<String>>> {
        self.position(name).map(|i| self.entries.remove(i).1)
    }

    /// Removes all parameters.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns an iterator over the keys and their values, in order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Parses `name(=value)?` pairs separated by `&` and appends them.
    ///
    /// An `=` with nothing after it yields an empty value, while a pair
    /// without `=` yields no value. Pairs with an empty name are skipped.
    pub fn extend_from_query(&mut self, query: &str) {
        for pair in query.split('&') {
            let (name, value) = match pair.split_once('=') {
                Some((name, value)) => (name, Some(String::from(value))),
                None => (pair, None),
            };
            if !name.is_empty() {
                self.add(name, value);
            }
        }
    }

    /// Renders the parameters as a query string, or `None` if there are none.
    #[must_use]
    pub fn to_query_string(&self) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }
        let mut buf = String::new();
        for (name, values) in &self.entries {
            if values.is_empty() {
                push_pair(&mut buf, name, None);
            }
            for value in values {
                push_pair(&mut buf, name, value.as_deref());
            }
        }
        Some(buf)
    }

    /// Applies `f` to every key and value, keeping the order.
    pub(crate) fn try_map<E>(
        &self,
        mut f: impl FnMut(&str) -> Result<String, E>,
    ) -> Result<QueryParams, E> {
        let mut out = QueryParams::new();
        for (name, values) in &self.entries {
            let name = f(name)?;
            let values = values
                .iter()
                .map(|v| v.as_deref().map(&mut f).transpose())
                .collect::<Result<Vec<_>, E>>()?;
            // Two keys may become equal after mapping.
            match out.position(&name) {
                Some(i) => out.entries[i].1.extend(values),
                None => out.entries.push((name, values)),
            }
        }
        Ok(out)
    }

    /// Appends every entry of `other`, keeping its order.
    pub(crate) fn extend_from(&mut self, other: &QueryParams) {
        for (name, values) in &other.entries {
            match self.position(name) {
                Some(i) => self.entries[i].1.extend(values.iter().cloned()),
                None => self.entries.push((name.clone(), values.clone())),
            }
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == name)
    }
}

fn push_pair(buf: &mut String, name: &str, value: Option<&str>) {
    if !buf.is_empty() {
        buf.push('&');
    }
    buf.push_str(name);
    if let Some(value) = value {
        buf.push('=');
        buf.push_str(value);
    }
}

/// An iterator over the entries of [`QueryParams`].
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a> {
    inner: slice::Iter<'a, (String, Vec<Option<String>>)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a [Option<String>]);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (&k[..], &v[..]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a QueryParams {
    type Item = (&'a str, &'a [Option<String>]);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, Option<V>)> for QueryParams {
    fn from_iter<T: IntoIterator<Item = (K, Option<V>)>>(iter: T) -> Self {
        let mut params = QueryParams::new();
        for (k, v) in iter {
            params.add(k, v.map(Into::into));
        }
        params
    }
}
