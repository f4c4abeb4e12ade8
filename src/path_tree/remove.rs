//! Node removal.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use log::{debug, trace};

use crate::anchor::{NodeRef, RemoveMode};
use crate::hierarchy;
use crate::name_tree::insert_sorted;

use super::PathTree;

impl PathTree {
    /// Removes every node the target resolves to.
    ///
    /// * [`RemoveMode::RemoveAll`]: the whole subtree is removed.
    /// * [`RemoveMode::RemoveOne`]: the descendants move one level up. When
    ///   a moved node lands on a path which already exists, the two subtrees
    ///   are merged path by path. The root is never removed this way.
    /// * [`RemoveMode::DontRemove`]: the node is removed only if it is a leaf.
    ///
    /// A name is resolved into paths which are processed from the longest,
    /// skipping any that an earlier removal has already taken away.
    ///
    /// Returns true if something was removed.
    ///
    /// ```text
    /// Before `remove(Name("e"), RemoveOne)`:
    ///
    /// a
    /// └ b
    ///   └ c
    ///     ├ d
    ///     │ └ h
    ///     └ e
    ///       └ d
    ///         └ f
    ///
    /// After:
    ///
    /// a
    /// └ b
    ///   └ c
    ///     └ d
    ///       ├ f
    ///       └ h
    /// ```
    pub fn remove(&mut self, target: &NodeRef, mode: RemoveMode) -> bool {
        let mut removed = false;
        for path in self.resolve_deepest_first(target) {
            if !self.contains_path(&path) {
                continue;
            }
            let done = match mode {
                RemoveMode::RemoveAll => self.remove_subtree(&path),
                RemoveMode::RemoveOne => self.remove_and_merge(&path),
                RemoveMode::DontRemove => self.remove_leaf(&path),
            };
            if done {
                debug!("`{}` removed ({:?})", path, mode);
            }
            removed |= done;
        }
        removed
    }

    /// Removes the node at the path and its descendants.
    fn remove_subtree(&mut self, path: &str) -> bool {
        if self.is_root(path) {
            self.clear_nodes();
            return true;
        }
        for (_, doomed) in hierarchy::breadth_first(self, path) {
            self.adjacency.remove(&doomed);
        }
        self.unlink(path);
        true
    }

    /// Removes the node at the path if it is a leaf.
    fn remove_leaf(&mut self, path: &str) -> bool {
        if self.adjacency.get(path).is_some_and(|children| !children.is_empty()) {
            return false;
        }
        if self.is_root(path) {
            self.clear_nodes();
            return true;
        }
        self.adjacency.remove(path);
        self.unlink(path);
        true
    }

    /// Removes the node at the path and moves its descendants one level up.
    fn remove_and_merge(&mut self, path: &str) -> bool {
        if self.is_root(path) {
            return false;
        }
        let parent = self.delimiter.dirname(path).to_string();

        let moved = self.take_subtree(path);
        self.unlink(path);
        for relative in moved {
            let dest = self.delimiter.combine(&parent, &relative);
            self.attach(&dest);
        }
        true
    }

    /// Detaches the descendants of the node at the path, and removes them
    /// along with the node.
    ///
    /// Returns the paths of the descendants relative to the node, parents
    /// before children.
    fn take_subtree(&mut self, path: &str) -> Vec<String> {
        let offset = path.len() + self.delimiter.as_str().len();
        let nodes = hierarchy::breadth_first(self, path);
        let mut relatives = Vec::with_capacity(nodes.len().saturating_sub(1));
        for (depth, node) in nodes {
            self.adjacency.remove(&node);
            if depth > 0 {
                relatives.push(node[offset..].into());
            }
        }
        relatives
    }

    /// Ensures the node at the path exists and is linked to its parent.
    ///
    /// An existing node is kept with its children.
    fn attach(&mut self, path: &str) {
        if self.contains_path(path) {
            trace!("`{}` merged", path);
            return;
        }
        self.adjacency.insert(path.into(), Vec::new());
        let (parent, label) = self.delimiter.split_absolute_path(path);
        let siblings = self
            .adjacency
            .get_mut(parent)
            .expect("[consistency] parents are attached before their children");
        insert_sorted(siblings, label);
    }

    /// Removes the label of a non-root path from its parent's children.
    fn unlink(&mut self, path: &str) {
        let (parent, label) = self.delimiter.split_absolute_path(path);
        if let Some(siblings) = self.adjacency.get_mut(parent) {
            siblings.retain(|s| s != label);
        }
    }
}
