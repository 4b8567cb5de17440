//! URI template variables.
//!
//! A component may contain placeholders of the form `{name}` or
//! `{name:pattern}`. Expansion replaces each placeholder with the value
//! resolved for `name` from a [`UriTemplateVariables`] source.
//!
//! Three kinds of source are provided:
//!
//! - Maps: `&HashMap` and `&BTreeMap` with string keys. A missing name is an error.
//! - Positional values: [`positional`]. Values are consumed in the order in
//!   which placeholders are met, and running out of values is an error.
//! - Resolver closures: [`from_fn`]. The closure decides for every name,
//!   and may return [`TemplateValue::Skip`] to leave a placeholder as is.

use crate::error::{Result, UriError, UriErrorKind};
use alloc::{
    borrow::{Borrow, ToOwned},
    collections::BTreeMap,
    format,
    string::{String, ToString},
};
use core::{fmt, hash::BuildHasher, hash::Hash};
use std::collections::HashMap;

/// The value resolved for a template variable.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TemplateValue {
    /// Substitute the placeholder with this text.
    Value(String),
    /// Substitute the placeholder with an empty string.
    Null,
    /// Leave the placeholder unexpanded.
    Skip,
}

impl TemplateValue {
    /// Creates a [`TemplateValue::Value`].
    pub fn new(value: impl Into<String>) -> Self {
        TemplateValue::Value(value.into())
    }
}

/// A source of values for template variables.
pub trait UriTemplateVariables {
    /// Resolves the variable with the given name.
    ///
    /// # Errors
    ///
    /// Returns `Err` with kind [`TemplateResolution`] if the variable
    /// cannot be resolved.
    ///
    /// [`TemplateResolution`]: UriErrorKind::TemplateResolution
    fn get_value(&mut self, name: &str) -> Result<TemplateValue>;
}

impl<T: UriTemplateVariables + ?Sized> UriTemplateVariables for &mut T {
    fn get_value(&mut self, name: &str) -> Result<TemplateValue> {
        (**self).get_value(name)
    }
}

/// Conversion of a variable value into a [`TemplateValue`].
pub trait ToTemplateValue {
    /// Converts the value.
    fn to_template_value(&self) -> TemplateValue;
}

impl ToTemplateValue for str {
    fn to_template_value(&self) -> TemplateValue {
        TemplateValue::Value(self.to_owned())
    }
}

impl ToTemplateValue for String {
    fn to_template_value(&self) -> TemplateValue {
        TemplateValue::Value(self.clone())
    }
}

impl ToTemplateValue for TemplateValue {
    fn to_template_value(&self) -> TemplateValue {
        self.clone()
    }
}

/// `None` expands to an empty string.
impl<T: ToTemplateValue> ToTemplateValue for Option<T> {
    fn to_template_value(&self) -> TemplateValue {
        match self {
            Some(v) => v.to_template_value(),
            None => TemplateValue::Null,
        }
    }
}

impl<T: ToTemplateValue + ?Sized> ToTemplateValue for &T {
    fn to_template_value(&self) -> TemplateValue {
        (**self).to_template_value()
    }
}

macro_rules! impl_to_template_value_display {
    ($($t:ty),*) => {
        $(
            impl ToTemplateValue for $t {
                fn to_template_value(&self) -> TemplateValue {
                    TemplateValue::Value(self.to_string())
                }
            }
        )*
    };
}

impl_to_template_value_display!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize
);

fn missing(name: &str) -> UriError {
    UriError::new(
        UriErrorKind::TemplateResolution,
        format!("map has no value for {name:?}"),
    )
}

impl<K, V, S> UriTemplateVariables for &HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: ToTemplateValue,
    S: BuildHasher,
{
    fn get_value(&mut self, name: &str) -> Result<TemplateValue> {
        self.get(name)
            .map(ToTemplateValue::to_template_value)
            .ok_or_else(|| missing(name))
    }
}

impl<K, V> UriTemplateVariables for &BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: ToTemplateValue,
{
    fn get_value(&mut self, name: &str) -> Result<TemplateValue> {
        self.get(name)
            .map(ToTemplateValue::to_template_value)
            .ok_or_else(|| missing(name))
    }
}

/// Variables taken from a sequence of values, in order.
///
/// This struct is created by [`positional`].
#[derive(Clone, Debug)]
pub struct Positional<I> {
    iter: I,
}

/// Creates a variable source that hands out `values` in order,
/// regardless of the placeholder names.
///
/// # Examples
///
/// ```
/// use uri_components::{template::positional, UriComponentsBuilder};
///
/// let c = UriComponentsBuilder::from_uri_string("/hotels/{hotel}/rooms/{room}")?
///     .build(false)?
///     .expand(positional(["42", "7"]))?;
/// assert_eq!(c.to_uri_string(), "/hotels/42/rooms/7");
/// # Ok::<_, uri_components::UriError>(())
/// ```
pub fn positional<I>(values: I) -> Positional<I::IntoIter>
where
    I: IntoIterator,
    I::Item: ToTemplateValue,
{
    Positional {
        iter: values.into_iter(),
    }
}

impl<I> UriTemplateVariables for Positional<I>
where
    I: Iterator,
    I::Item: ToTemplateValue,
{
    fn get_value(&mut self, name: &str) -> Result<TemplateValue> {
        match self.iter.next() {
            Some(v) => Ok(v.to_template_value()),
            None => Err(UriError::new(
                UriErrorKind::TemplateResolution,
                format!("not enough variable values available to expand {name:?}"),
            )),
        }
    }
}

/// Variables resolved by a closure.
///
/// This struct is created by [`from_fn`].
#[derive(Clone)]
pub struct FromFn<F> {
    f: F,
}

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromFn").finish_non_exhaustive()
    }
}

/// Creates a variable source from a resolver closure.
///
/// # Examples
///
/// ```
/// use uri_components::{template::{from_fn, TemplateValue}, UriComponentsBuilder};
///
/// let c = UriComponentsBuilder::from_path("/{a}/{b}")
///     .build(false)?
///     .expand(from_fn(|name| match name {
///         "a" => TemplateValue::new("x"),
///         _ => TemplateValue::Skip,
///     }))?;
/// assert_eq!(c.to_uri_string(), "/x/{b}");
/// # Ok::<_, uri_components::UriError>(())
/// ```
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: FnMut(&str) -> TemplateValue,
{
    FromFn { f }
}

impl<F> UriTemplateVariables for FromFn<F>
where
    F: FnMut(&str) -> TemplateValue,
{
    fn get_value(&mut self, name: &str) -> Result<TemplateValue> {
        Ok((self.f)(name))
    }
}

/// Location of a placeholder in a component.
struct Placeholder {
    start: usize,
    end: usize,
    name_end: usize,
}

/// Finds the next placeholder at or after `from`.
///
/// Braces nested inside a placeholder, such as the quantifier in
/// `{id:\d{3}}`, belong to its pattern and are skipped. A body that is empty
/// or contains `/` outside nested braces is not a placeholder.
fn next_placeholder(s: &str, mut from: usize) -> Option<Placeholder> {
    let bytes = s.as_bytes();
    loop {
        let start = from + s.get(from..)?.find('{')?;
        let mut level = 0u32;
        let mut name_end = None;
        let mut has_slash = false;
        let mut end = None;

        for (i, &x) in bytes.iter().enumerate().skip(start) {
            match x {
                b'{' => level += 1,
                b'}' => {
                    level -= 1;
                    if level == 0 {
                        end = Some(i + 1);
                        break;
                    }
                }
                b'/' if level == 1 => has_slash = true,
                b':' if level == 1 && name_end.is_none() => name_end = Some(i),
                _ => {}
            }
        }

        let end = end?;
        if has_slash || end == start + 2 {
            from = start + 1;
            continue;
        }
        return Some(Placeholder {
            start,
            end,
            name_end: name_end.unwrap_or(end - 1),
        });
    }
}

/// Expands the placeholders in a single component, resolving names with `resolve`.
pub(crate) fn expand_component<E>(
    source: &str,
    resolve: &mut dyn FnMut(&str) -> Result<TemplateValue, E>,
) -> Result<String, E> {
    let mut out = String::with_capacity(source.len());
    let mut copied = 0;
    let mut from = 0;

    while let Some(p) = next_placeholder(source, from) {
        from = p.end;
        let name = &source[p.start + 1..p.name_end];
        let value = match resolve(name)? {
            TemplateValue::Value(v) => v,
            TemplateValue::Null => String::new(),
            TemplateValue::Skip => {
                tracing::trace!(variable = name, "leaving URI template variable unexpanded");
                continue;
            }
        };
        out.push_str(&source[copied..p.start]);
        out.push_str(&value);
        copied = p.end;
    }

    out.push_str(&source[copied..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(s: &str) -> Vec<&str> {
        let mut out = Vec::new();
        let mut from = 0;
        while let Some(p) = next_placeholder(s, from) {
            out.push(&s[p.start + 1..p.name_end]);
            from = p.end;
        }
        out
    }

    fn expand(source: &str, mut vars: impl UriTemplateVariables) -> Result<String> {
        expand_component(source, &mut |name| vars.get_value(name))
    }

    #[test]
    fn scan_placeholders() {
        assert_eq!(names("/{a}/{b}"), ["a", "b"]);
        assert_eq!(names("/{id:\\d{3}}/x"), ["id"]);
        assert_eq!(names("/{a:[a-z]{2,}}-{b}"), ["a", "b"]);
        assert_eq!(names("{a/b}{c}"), ["c"]);
        assert_eq!(names("{}{d}"), ["d"]);
        assert!(names("{unclosed").is_empty());
        assert!(names("plain").is_empty());
    }

    #[test]
    fn expand_values() {
        let mut vars = from_fn(|name| match name {
            "a" => TemplateValue::new("1"),
            "n" => TemplateValue::Null,
            _ => TemplateValue::Skip,
        });
        assert_eq!(
            expand("/{a}/{n}/{s:\\d{2}}/{a}", &mut vars).unwrap(),
            "/1//{s:\\d{2}}/1"
        );
    }

    #[test]
    fn map_and_positional() {
        let map: HashMap<&str, i32> = [("id", 42)].into_iter().collect();
        assert_eq!(expand("/{id}", &map).unwrap(), "/42");
        let e = expand("/{nope}", &map).unwrap_err();
        assert_eq!(e.kind(), UriErrorKind::TemplateResolution);

        let mut vars = positional(["x"]);
        assert_eq!(expand("{a}", &mut vars).unwrap(), "x");
        let e = expand("{b}", &mut vars).unwrap_err();
        assert_eq!(e.kind(), UriErrorKind::TemplateResolution);

        let btree: BTreeMap<String, Option<String>> = [("v".to_string(), None)].into();
        assert_eq!(expand("a{v}b", &btree).unwrap(), "ab");
    }
}
