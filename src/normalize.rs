//! Path normalization.

use alloc::{string::String, vec::Vec};

/// Removes `.` and `..` segments from a path.
///
/// A `..` with nothing left to remove is kept, so `/../a` stays as is and a
/// relative path keeps its leading `..` segments. A path ending in a dot
/// segment keeps a trailing slash.
///
/// # Examples
///
/// ```
/// use uri_components::normalize::remove_dot_segments;
///
/// assert_eq!(remove_dot_segments("/a/b/../c/./d"), "/a/c/d");
/// assert_eq!(remove_dot_segments("/../a"), "/../a");
/// assert_eq!(remove_dot_segments("/a/b/.."), "/a/");
/// assert_eq!(remove_dot_segments("a/../../b"), "../b");
/// ```
#[must_use]
pub fn remove_dot_segments(path: &str) -> String {
    let (root, rest) = match path.strip_prefix('/') {
        Some(rest) => ("/", rest),
        None => ("", path),
    };

    let mut out: Vec<&str> = Vec::new();
    let mut ends_with_dot = false;

    for seg in rest.split('/') {
        ends_with_dot = matches!(seg, "." | "..");
        match seg {
            "." => {}
            ".." => match out.last() {
                Some(&last) if last != ".." => {
                    out.pop();
                }
                _ => out.push(".."),
            },
            _ => out.push(seg),
        }
    }

    if ends_with_dot && out.last().is_some_and(|&last| last != "..") {
        out.push("");
    }

    let mut buf = String::with_capacity(path.len());
    buf.push_str(root);
    for (i, seg) in out.iter().enumerate() {
        if i > 0 {
            buf.push('/');
        }
        buf.push_str(seg);
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::remove_dot_segments;

    #[test]
    fn dot_segments() {
        assert_eq!(remove_dot_segments("/a/./"), "/a/");
        assert_eq!(remove_dot_segments("/a/."), "/a/");
        assert_eq!(remove_dot_segments("/a/b/../../.."), "/..");
        assert_eq!(remove_dot_segments("/a//b/../c"), "/a//c");
        assert_eq!(remove_dot_segments("a/.."), "");
        assert_eq!(remove_dot_segments("./a"), "a");
        assert_eq!(remove_dot_segments("/"), "/");
        assert_eq!(remove_dot_segments(""), "");
        assert_eq!(remove_dot_segments("/a.b/..c/d"), "/a.b/..c/d");
    }
}
