//! Insertion of whole paths.

use alloc::string::String;
use alloc::vec::Vec;

use log::debug;

use crate::anchor::OnConflict;
use crate::error::TreeError;

use super::PathTree;

impl PathTree {
    /// Inserts the absolute path, creating the missing intermediate nodes.
    ///
    /// On an empty tree, the first label of the path becomes the root.
    ///
    /// ```
    /// use pathtree::{OnConflict, PathTree};
    ///
    /// let mut tree = PathTree::new();
    /// tree.append_abs("a.b.c", OnConflict::Raise)?;
    /// tree.append_abs("a.b.d", OnConflict::Raise)?;
    /// assert_eq!(tree.len(), 4);
    /// assert!(tree.append_abs("a.b", OnConflict::Raise).is_err());
    /// # Ok::<_, pathtree::TreeError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// When raising:
    ///
    /// * [`TreeError::PathAlreadyExists`] if the full path is already present.
    /// * [`TreeError::RootNotUnique`] if the first label differs from the root.
    /// * [`TreeError::InvalidLabel`] if the path has an empty label.
    ///
    /// The tree is unchanged on error.
    pub fn append_abs(&mut self, path: &str, on_conflict: OnConflict) -> Result<(), TreeError> {
        let policy = self.policy(on_conflict);
        policy.apply(self.insert_chain(path, true).map(drop), ())
    }

    /// Inserts every path, creating the missing intermediate nodes.
    ///
    /// Paths already present are skipped. On an empty tree, every path must
    /// start with the same label, which becomes the root.
    ///
    /// # Errors
    ///
    /// When raising:
    ///
    /// * [`TreeError::RootNotUnique`] if the tree is empty and the paths
    ///   start with different labels, in which case nothing is inserted.
    /// * [`TreeError::RootNotUnique`] if a path does not start with the
    ///   existing root.
    /// * [`TreeError::InvalidLabel`] if a path has an empty label.
    ///
    /// The paths before the failing one stay inserted. When ignoring, the
    /// failing paths are skipped.
    pub fn append_all<I, S>(&mut self, paths: I, on_conflict: OnConflict) -> Result<(), TreeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let policy = self.policy(on_conflict);
        let paths: Vec<S> = paths.into_iter().collect();

        if self.is_empty() {
            let mut firsts = paths.iter().map(|path| self.first_label(path.as_ref()));
            if let Some(first) = firsts.next() {
                if let Some(other) = firsts.find(|&label| label != first) {
                    return policy.report(TreeError::RootNotUnique {
                        existing: first.into(),
                        found: other.into(),
                    });
                }
            }
        }

        let mut inserted = 0;
        for path in &paths {
            inserted += policy.apply(self.insert_chain(path.as_ref(), false), 0)?;
        }
        debug!(
            "{} nodes inserted from {} paths, {} nodes in total",
            inserted,
            paths.len(),
            self.len()
        );

        Ok(())
    }

    /// Returns the first label of the path.
    fn first_label<'a>(&self, path: &'a str) -> &'a str {
        path.split(self.delimiter.as_str()).next().unwrap_or(path)
    }

    /// Inserts every missing node along the path.
    ///
    /// Returns the number of nodes created. Nothing is created on error.
    fn insert_chain(&mut self, path: &str, must_be_new: bool) -> Result<usize, TreeError> {
        let labels = self.delimiter.segments(path);
        if labels.iter().any(|label| label.is_empty()) {
            return Err(TreeError::InvalidLabel { label: path.into() });
        }
        if must_be_new && self.contains_path(path) {
            return Err(TreeError::PathAlreadyExists { path: path.into() });
        }
        let (top, rest) = match labels.split_first() {
            Some(v) => v,
            None => return Err(TreeError::InvalidLabel { label: path.into() }),
        };

        let mut created = 0;
        match self.root() {
            None => {
                self.set_root(top);
                created += 1;
            }
            Some(root) if root != *top => {
                return Err(TreeError::RootNotUnique {
                    existing: root.into(),
                    found: (*top).into(),
                });
            }
            Some(_) => {}
        }

        let mut current = String::from(*top);
        for label in rest {
            let next = self.delimiter.combine(&current, label);
            if !self.contains_path(&next) {
                self.link(&current, label);
                created += 1;
            }
            current = next;
        }

        Ok(created)
    }
}
