//! Errors.

use alloc::string::String;

use thiserror::Error;

use crate::anchor::OnConflict;

/// Structure error of a tree operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TreeError {
    /// A parent is required since the tree already has a root.
    #[error("a parent is required since the tree already has a root")]
    ParentRequired,
    /// The label or path is not in the tree.
    #[error("node `{target}` is not in the tree")]
    NodeNotFound {
        /// Label or path that was looked up.
        target: String,
    },
    /// The label is already used somewhere in a [`NameTree`][`crate::NameTree`].
    #[error("node `{label}` already exists")]
    DuplicateNode {
        /// Conflicting label.
        label: String,
    },
    /// The absolute path is already used in a [`PathTree`][`crate::PathTree`].
    #[error("path `{path}` already exists")]
    PathAlreadyExists {
        /// Conflicting path.
        path: String,
    },
    /// The input implies another root than the established one.
    #[error("root must be unique, but found `{found}` besides `{existing}`")]
    RootNotUnique {
        /// Root already in place (or first root seen in the input).
        existing: String,
        /// Conflicting root.
        found: String,
    },
    /// The label is empty or contains the delimiter.
    #[error("invalid label `{label}`")]
    InvalidLabel {
        /// Rejected label.
        label: String,
    },
    /// The delimiter is empty or collides with stored labels.
    #[error("invalid delimiter `{delimiter}`")]
    InvalidDelimiter {
        /// Rejected delimiter.
        delimiter: String,
    },
}

impl TreeError {
    /// Creates [`TreeError::NodeNotFound`].
    #[inline]
    #[must_use]
    pub(crate) fn not_found(target: &str) -> Self {
        Self::NodeNotFound {
            target: target.into(),
        }
    }
}

/// Raise-or-ignore decision of a single call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ErrorPolicy {
    /// Whether conflicts are returned as errors.
    raise: bool,
}

impl ErrorPolicy {
    /// Combines the tree-wide override with the per-call policy.
    #[inline]
    #[must_use]
    pub(crate) fn new(always_raise: bool, on_conflict: OnConflict) -> Self {
        Self {
            raise: always_raise || on_conflict == OnConflict::Raise,
        }
    }

    /// Returns `Err(err)` when raising, `Ok(())` when the conflict is to be skipped.
    #[inline]
    pub(crate) fn report(self, err: TreeError) -> Result<(), TreeError> {
        if self.raise {
            Err(err)
        } else {
            Ok(())
        }
    }

    /// Returns the result unchanged when raising, or `ignored` in place of an error.
    #[inline]
    pub(crate) fn apply<T>(self, res: Result<T, TreeError>, ignored: T) -> Result<T, TreeError> {
        match res {
            Err(_) if !self.raise => Ok(ignored),
            res => res,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_raise_overrides_ignore() {
        let policy = ErrorPolicy::new(true, OnConflict::Ignore);
        assert_eq!(
            policy.report(TreeError::ParentRequired),
            Err(TreeError::ParentRequired)
        );
    }

    #[test]
    fn ignore_turns_errors_into_fallback() {
        let policy = ErrorPolicy::new(false, OnConflict::Ignore);
        assert_eq!(policy.report(TreeError::ParentRequired), Ok(()));
        assert_eq!(
            policy.apply(Err(TreeError::not_found("x")), false),
            Ok(false)
        );
        assert_eq!(policy.apply(Ok(true), false), Ok(true));
    }
}
