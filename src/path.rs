//! Path algebra.
//!
//! Absolute paths are plain strings: labels joined by a delimiter, starting
//! at the root. None of the functions here look at a tree; they work on any
//! string.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Delimiter between the labels of an absolute path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Delimiter(String);

impl Delimiter {
    /// Creates a delimiter.
    #[inline]
    #[must_use]
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self(delimiter.into())
    }

    /// Returns the delimiter as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the string contains the delimiter.
    ///
    /// A single label (including the root label) is not an absolute path.
    ///
    /// ```
    /// use pathtree::Delimiter;
    ///
    /// let d = Delimiter::new(".");
    /// assert!(d.is_absolute_path("a.b"));
    /// assert!(!d.is_absolute_path("a"));
    /// ```
    #[inline]
    #[must_use]
    pub fn is_absolute_path(&self, s: &str) -> bool {
        s.contains(self.as_str())
    }

    /// Returns the last label of the path.
    #[must_use]
    pub fn basename<'a>(&self, path: &'a str) -> &'a str {
        self.split_absolute_path(path).1
    }

    /// Returns the path of the parent, or an empty string for a single label.
    #[must_use]
    pub fn dirname<'a>(&self, path: &'a str) -> &'a str {
        self.split_absolute_path(path).0
    }

    /// Splits the path into the parent path and the last label.
    ///
    /// ```
    /// use pathtree::Delimiter;
    ///
    /// let d = Delimiter::new(".");
    /// assert_eq!(d.split_absolute_path("a.b.c.d"), ("a.b.c", "d"));
    /// assert_eq!(d.split_absolute_path("a"), ("", "a"));
    /// ```
    #[must_use]
    pub fn split_absolute_path<'a>(&self, path: &'a str) -> (&'a str, &'a str) {
        match path.rfind(self.as_str()) {
            Some(pos) => (&path[..pos], &path[(pos + self.0.len())..]),
            None => ("", path),
        }
    }

    /// Joins two labels or paths.
    #[must_use]
    pub fn combine(&self, a: &str, b: &str) -> String {
        let mut path = String::with_capacity(a.len() + self.0.len() + b.len());
        path.push_str(a);
        path.push_str(&self.0);
        path.push_str(b);
        path
    }

    /// Joins `b` under `a`, or returns `b` alone when there is no `a`.
    #[must_use]
    pub(crate) fn combine_under(&self, a: Option<&str>, b: &str) -> String {
        match a {
            Some(a) => self.combine(a, b),
            None => b.into(),
        }
    }

    /// Returns the labels of the path from the root.
    #[must_use]
    pub fn segments<'a>(&self, path: &'a str) -> Vec<&'a str> {
        path.split(self.as_str()).collect()
    }

    /// Joins the labels into a path.
    #[must_use]
    pub fn join<S: AsRef<str>>(&self, labels: &[S]) -> String {
        let mut path = String::new();
        for (i, label) in labels.iter().enumerate() {
            if i != 0 {
                path.push_str(&self.0);
            }
            path.push_str(label.as_ref());
        }
        path
    }

    /// Returns true if `path` is `ancestor` or lies under it.
    #[must_use]
    pub fn starts_with_path(&self, path: &str, ancestor: &str) -> bool {
        match path.strip_prefix(ancestor) {
            Some("") => true,
            Some(rest) => rest.starts_with(self.as_str()),
            None => false,
        }
    }

    /// Returns true if the label is usable as a single path segment.
    #[inline]
    #[must_use]
    pub(crate) fn is_valid_label(&self, label: &str) -> bool {
        !label.is_empty() && !self.is_absolute_path(label)
    }
}

impl fmt::Display for Delimiter {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloc::vec;

    #[test]
    fn split_and_combine() {
        let d = Delimiter::new(".");
        assert_eq!(d.basename("a.b.c"), "c");
        assert_eq!(d.dirname("a.b.c"), "a.b");
        assert_eq!(d.dirname("a"), "");
        assert_eq!(d.combine("a.b.c", "d.e"), "a.b.c.d.e");
        assert_eq!(d.combine_under(None, "x"), "x");
    }

    #[test]
    fn multi_char_delimiter() {
        let d = Delimiter::new("::");
        assert_eq!(d.split_absolute_path("a::b::c"), ("a::b", "c"));
        assert_eq!(d.segments("a::b::c"), vec!["a", "b", "c"]);
        assert_eq!(d.join(&["a", "b"]), "a::b");
        assert!(!d.is_absolute_path("a:b"));
    }

    #[test]
    fn prefix_is_segment_aware() {
        let d = Delimiter::new(".");
        assert!(d.starts_with_path("a.b.c", "a.b"));
        assert!(d.starts_with_path("a.b", "a.b"));
        assert!(!d.starts_with_path("a.bc", "a.b"));
    }

    #[test]
    fn labels_with_delimiter_are_invalid() {
        let d = Delimiter::new("/");
        assert!(d.is_valid_label("a.b"));
        assert!(!d.is_valid_label("a/b"));
        assert!(!d.is_valid_label(""));
    }
}
