//! Path components.

use crate::{
    error::Result,
    pct_enc::{self, table, Charset},
};
use alloc::{string::String, vec::Vec};

/// A path, either as one literal string, as a list of segments, or as a
/// sequence of both.
///
/// Values should be created with [`full_path`] and [`segment_list`], which
/// keep the following invariants:
///
/// - A `FullPath` is never empty and never contains `//`.
/// - A `SegmentList` never contains an empty segment or a raw `/`;
///   slashes inside a segment are stored escaped as `%2F`.
///
/// [`full_path`]: Self::full_path
/// [`segment_list`]: Self::segment_list
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PathComponent {
    /// A literal path such as `/a/b`.
    FullPath(String),
    /// Path segments, rendered as `/` followed by the segments joined with `/`.
    SegmentList(Vec<String>),
    /// Several paths rendered one after another.
    Composite(Vec<PathComponent>),
    /// No path.
    #[default]
    Empty,
}

impl PathComponent {
    /// Creates a literal path, collapsing repeated slashes.
    ///
    /// Returns [`Empty`](Self::Empty) for an empty string.
    #[must_use]
    pub fn full_path(path: &str) -> Self {
        if path.is_empty() {
            return PathComponent::Empty;
        }
        let mut buf = String::with_capacity(path.len());
        for ch in path.chars() {
            if !(ch == '/' && buf.ends_with('/')) {
                buf.push(ch);
            }
        }
        PathComponent::FullPath(buf)
    }

    /// Creates a segment list, skipping blank segments and escaping `/`.
    ///
    /// Returns [`Empty`](Self::Empty) if no segment is left.
    #[must_use]
    pub fn segment_list<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments: Vec<String> = segments
            .into_iter()
            .filter(|s| !is_blank(s.as_ref()))
            .map(|s| escape_slashes(s.as_ref()))
            .collect();
        if segments.is_empty() {
            PathComponent::Empty
        } else {
            PathComponent::SegmentList(segments)
        }
    }

    /// Renders the path, or returns `None` if it is empty.
    #[must_use]
    pub fn path(&self) -> Option<String> {
        let mut buf = String::new();
        self.write_to(&mut buf);
        (!buf.is_empty()).then_some(buf)
    }

    fn write_to(&self, buf: &mut String) {
        match self {
            PathComponent::FullPath(path) => buf.push_str(path),
            PathComponent::SegmentList(segments) => {
                for segment in segments {
                    buf.push('/');
                    buf.push_str(segment);
                }
            }
            PathComponent::Composite(components) => {
                for c in components {
                    c.write_to(buf);
                }
            }
            PathComponent::Empty => {}
        }
    }

    /// Returns the non-empty segments of the path.
    #[must_use]
    pub fn path_segments(&self) -> Vec<String> {
        match self {
            PathComponent::FullPath(path) => path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            PathComponent::SegmentList(segments) => segments.clone(),
            PathComponent::Composite(components) => {
                components.iter().flat_map(|c| c.path_segments()).collect()
            }
            PathComponent::Empty => Vec::new(),
        }
    }

    /// Checks whether the path is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            PathComponent::FullPath(path) => path.is_empty(),
            PathComponent::SegmentList(segments) => segments.is_empty(),
            PathComponent::Composite(components) => components.iter().all(|c| c.is_empty()),
            PathComponent::Empty => true,
        }
    }

    /// Percent-encodes the path: literal paths keep `/`, segments do not.
    #[must_use]
    pub fn encode(&self, charset: Charset) -> PathComponent {
        match self {
            PathComponent::FullPath(path) => PathComponent::FullPath(
                pct_enc::encode(path, table::PATH, charset).into_owned(),
            ),
            PathComponent::SegmentList(segments) => PathComponent::SegmentList(
                segments
                    .iter()
                    .map(|s| pct_enc::encode(s, table::PATH_SEGMENT, charset).into_owned())
                    .collect(),
            ),
            PathComponent::Composite(components) => {
                PathComponent::Composite(components.iter().map(|c| c.encode(charset)).collect())
            }
            PathComponent::Empty => PathComponent::Empty,
        }
    }

    /// Checks that the path is fully percent-encoded.
    pub(crate) fn verify(&self) -> Result<()> {
        match self {
            PathComponent::FullPath(path) => pct_enc::verify(path, table::PATH, "path"),
            PathComponent::SegmentList(segments) => segments
                .iter()
                .try_for_each(|s| pct_enc::verify(s, table::PATH_SEGMENT, "path segment")),
            PathComponent::Composite(components) => components.iter().try_for_each(|c| c.verify()),
            PathComponent::Empty => Ok(()),
        }
    }

    /// Applies `f` to the raw text of the path, segment by segment
    /// for segment lists.
    pub(crate) fn try_map<E>(
        &self,
        f: &mut dyn FnMut(&str) -> Result<String, E>,
    ) -> Result<PathComponent, E> {
        Ok(match self {
            PathComponent::FullPath(path) => PathComponent::full_path(&f(path)?),
            PathComponent::SegmentList(segments) => {
                let segments = segments
                    .iter()
                    .map(|s| f(s))
                    .collect::<Result<Vec<_>, E>>()?;
                PathComponent::segment_list(segments)
            }
            PathComponent::Composite(components) => PathComponent::Composite(
                components
                    .iter()
                    .map(|c| c.try_map(f))
                    .collect::<Result<_, E>>()?,
            ),
            PathComponent::Empty => PathComponent::Empty,
        })
    }

    pub(crate) fn copy_to(&self, builder: &mut PathBuilder) {
        match self {
            PathComponent::FullPath(path) => builder.add_path(path),
            PathComponent::SegmentList(segments) => builder.push_segments(segments.clone()),
            PathComponent::Composite(components) => {
                for c in components {
                    c.copy_to(builder);
                }
            }
            PathComponent::Empty => {}
        }
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn escape_slashes(s: &str) -> String {
    s.replace('/', "%2F")
}

/// A part of a path under construction.
#[derive(Clone, Debug, PartialEq, Eq)]
enum PathPart {
    Literal(String),
    Segments(Vec<String>),
}

/// Accumulates literal paths and segments in the order they are added.
///
/// Consecutive calls of the same kind extend the last part; switching kind
/// starts a new part.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct PathBuilder {
    parts: Vec<PathPart>,
}

impl PathBuilder {
    /// Appends literal path text.
    ///
    /// A `/` is inserted between this text and what came before unless
    /// either side already has one.
    pub(crate) fn add_path(&mut self, path: &str) {
        if is_blank(path) {
            return;
        }
        match self.parts.last_mut() {
            Some(PathPart::Literal(buf)) => {
                if !buf.ends_with('/') && !path.starts_with('/') {
                    buf.push('/');
                }
                buf.push_str(path);
            }
            Some(PathPart::Segments(_)) => {
                let mut buf = String::with_capacity(path.len() + 1);
                if !path.starts_with('/') {
                    buf.push('/');
                }
                buf.push_str(path);
                self.parts.push(PathPart::Literal(buf));
            }
            None => self.parts.push(PathPart::Literal(path.into())),
        }
    }

    /// Appends path segments, escaping any `/` inside them.
    pub(crate) fn add_segments<S: AsRef<str>>(&mut self, segments: &[S]) {
        let segments = segments
            .iter()
            .map(|s| s.as_ref())
            .filter(|s: &&str| !is_blank(s))
            .map(escape_slashes)
            .collect();
        self.push_segments(segments);
    }

    fn push_segments(&mut self, segments: Vec<String>) {
        if segments.is_empty() {
            return;
        }
        if let Some(PathPart::Segments(last)) = self.parts.last_mut() {
            last.extend(segments);
            return;
        }
        if let Some(PathPart::Literal(buf)) = self.parts.last_mut() {
            if buf.ends_with('/') {
                buf.pop();
            }
            if buf.is_empty() {
                self.parts.pop();
            }
        }
        self.parts.push(PathPart::Segments(segments));
    }

    pub(crate) fn clear(&mut self) {
        self.parts.clear();
    }

    pub(crate) fn build(&self) -> PathComponent {
        let mut components: Vec<PathComponent> = self
            .parts
            .iter()
            .map(|part| match part {
                PathPart::Literal(path) => PathComponent::full_path(path),
                PathPart::Segments(segments) => PathComponent::SegmentList(segments.clone()),
            })
            .filter(|c| *c != PathComponent::Empty)
            .collect();

        match components.len() {
            0 => PathComponent::Empty,
            1 => components.remove(0),
            _ => PathComponent::Composite(components),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_path_collapses_slashes() {
        assert_eq!(
            PathComponent::full_path("//a///b/"),
            PathComponent::FullPath("/a/b/".into())
        );
        assert_eq!(PathComponent::full_path(""), PathComponent::Empty);
    }

    #[test]
    fn segment_list_escapes_slashes() {
        let p = PathComponent::segment_list(["a/b", "", " ", "c"]);
        assert_eq!(p, PathComponent::SegmentList(vec!["a%2Fb".into(), "c".into()]));
        assert_eq!(p.path().as_deref(), Some("/a%2Fb/c"));
        assert_eq!(PathComponent::segment_list([""; 0]), PathComponent::Empty);
    }

    #[test]
    fn builder_mixes_parts() {
        let mut b = PathBuilder::default();
        b.add_path("/a/");
        b.add_segments(&["b", "c"]);
        b.add_path("d");
        b.add_segments(&["e"]);
        let p = b.build();
        assert_eq!(p.path().as_deref(), Some("/a/b/c/d/e"));
        assert_eq!(p.path_segments(), ["a", "b", "c", "d", "e"]);
        assert!(matches!(p, PathComponent::Composite(ref v) if v.len() == 4));
    }

    #[test]
    fn builder_inserts_separator() {
        let mut b = PathBuilder::default();
        b.add_path("/a");
        b.add_path("b");
        b.add_path("/c");
        b.add_path("//d");
        assert_eq!(b.build(), PathComponent::FullPath("/a/b/c/d".into()));
    }

    #[test]
    fn builder_drops_lone_slash() {
        let mut b = PathBuilder::default();
        b.add_path("/");
        b.add_segments(&["x"]);
        assert_eq!(b.build(), PathComponent::SegmentList(vec!["x".into()]));
    }

    #[test]
    fn try_map_drops_emptied_segments() {
        let p = PathComponent::segment_list(["{a}", "b"]);
        let mapped = p
            .try_map(&mut |s| Ok::<_, ()>(if s == "{a}" { String::new() } else { s.into() }))
            .unwrap();
        assert_eq!(mapped, PathComponent::SegmentList(vec!["b".into()]));

        let mapped = p.try_map(&mut |_| Ok::<_, ()>(" ".into())).unwrap();
        assert_eq!(mapped, PathComponent::Empty);

        let mapped = p.try_map(&mut |s| Ok::<_, ()>(s.replace('{', "x/"))).unwrap();
        assert_eq!(mapped.path().as_deref(), Some("/x%2Fa}/b"));
    }

    #[test]
    fn encode_segments_and_paths() {
        let p = PathComponent::Composite(vec![
            PathComponent::full_path("/a b/;c"),
            PathComponent::segment_list(["x/y", "ü"]),
        ]);
        assert_eq!(
            p.encode(Charset::Utf8).path().as_deref(),
            Some("/a%20b/;c/x%2Fy/%C3%BC")
        );
    }
}
