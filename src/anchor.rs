//! Anchors.

use alloc::string::String;

use crate::path::Delimiter;

/// Target of a [`PathTree`][`crate::PathTree`] operation.
///
/// A bare name is ambiguous and addresses every node carrying that label,
/// while an absolute path addresses exactly one node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeRef {
    /// A bare label.
    Name(String),
    /// An absolute path from the root.
    Path(String),
}

impl NodeRef {
    /// Creates a reference by bare label.
    #[inline]
    #[must_use]
    pub fn name(label: impl Into<String>) -> Self {
        Self::Name(label.into())
    }

    /// Creates a reference by absolute path.
    #[inline]
    #[must_use]
    pub fn path(path: impl Into<String>) -> Self {
        Self::Path(path.into())
    }

    /// Classifies the string by the presence of the delimiter.
    ///
    /// A root label is never an absolute path, so `"a"` is always a name.
    ///
    /// ```
    /// use pathtree::{Delimiter, NodeRef};
    ///
    /// let delimiter = Delimiter::new("/");
    /// assert_eq!(NodeRef::classify("a/b", &delimiter), NodeRef::path("a/b"));
    /// assert_eq!(NodeRef::classify("a.b", &delimiter), NodeRef::name("a.b"));
    /// ```
    #[must_use]
    pub fn classify(s: &str, delimiter: &Delimiter) -> Self {
        if delimiter.is_absolute_path(s) {
            Self::Path(s.into())
        } else {
            Self::Name(s.into())
        }
    }

    /// Returns the referenced string.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Name(s) | Self::Path(s) => s,
        }
    }
}

/// Child reattachment policy of `remove`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RemoveMode {
    /// Removes the node together with all its descendants.
    RemoveAll,
    /// Removes the node only and hands its children to its parent.
    #[default]
    RemoveOne,
    /// Removes the node only if it is a leaf.
    DontRemove,
}

/// Ordering of the leaf paths returned by
/// [`PathTree::leaves`][`crate::PathTree::leaves`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortMode {
    /// Lexicographic order.
    #[default]
    Alphabetical,
    /// Order by the number of characters, ties broken lexicographically.
    Length,
}

/// What a mutating method does when it hits a conflict.
///
/// [`TreeConfig::always_raise`][`crate::TreeConfig::always_raise`] overrides
/// this and makes every conflict an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OnConflict {
    /// Returns the conflict as an error.
    Raise,
    /// Skips the conflicting step silently.
    #[default]
    Ignore,
}
