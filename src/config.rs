//! Tree configuration.

use alloc::string::String;

/// Delimiter used when none is configured.
pub const DEFAULT_DELIMITER: &str = ".";

/// Label of the root created by [`TreeConfig::default_root`].
pub const DEFAULT_ROOT_LABEL: &str = "root";

/// Construction options shared by [`NameTree`][`crate::NameTree`] and
/// [`PathTree`][`crate::PathTree`].
///
/// # Examples
///
/// ```
/// use pathtree::{PathTree, TreeConfig};
///
/// let tree = PathTree::with_config(
///     TreeConfig::new().delimiter("/").default_root(true),
/// )?;
/// assert_eq!(tree.root(), Some("root"));
/// assert_eq!(tree.delimiter().as_str(), "/");
/// # Ok::<_, pathtree::TreeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeConfig {
    /// Separator between the labels of a path.
    pub(crate) delimiter: String,
    /// Whether to create a root labeled [`DEFAULT_ROOT_LABEL`].
    pub(crate) default_root: bool,
    /// Whether every conflict is raised regardless of the per-call policy.
    pub(crate) always_raise: bool,
}

impl TreeConfig {
    /// Creates the default configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the path delimiter.
    #[must_use]
    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Creates the tree with a root labeled [`DEFAULT_ROOT_LABEL`].
    #[must_use]
    pub fn default_root(mut self, on: bool) -> Self {
        self.default_root = on;
        self
    }

    /// Raises every conflict, whatever [`OnConflict`][`crate::OnConflict`]
    /// the caller passes.
    #[must_use]
    pub fn always_raise(mut self, on: bool) -> Self {
        self.always_raise = on;
        self
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.into(),
            default_root: false,
            always_raise: false,
        }
    }
}
