//! Tree of globally unique labels.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use log::{debug, trace};

use crate::anchor::{OnConflict, RemoveMode};
use crate::config::{TreeConfig, DEFAULT_ROOT_LABEL};
use crate::error::{ErrorPolicy, TreeError};
use crate::hierarchy::{self, Hierarchy};
use crate::path::Delimiter;
use crate::render::TreeDiagram;

/// Tree whose nodes are identified by their labels.
///
/// A label appears at most once in the whole tree, and the tree has a single
/// root. Children of a node are kept in ascending order.
///
/// # Examples
///
/// ```
/// use pathtree::{NameTree, OnConflict};
///
/// let mut tree = NameTree::new();
/// tree.append("root", None, OnConflict::Raise)?;
/// tree.append("b", Some("root"), OnConflict::Raise)?;
/// tree.append("a", Some("root"), OnConflict::Raise)?;
///
/// assert_eq!(tree.children("root"), Some(&["a".to_owned(), "b".to_owned()][..]));
/// assert_eq!(tree.parent("a"), Some("root"));
///
/// // Labels are unique in the whole tree.
/// assert!(tree.append("a", Some("b"), OnConflict::Raise).is_err());
/// # Ok::<_, pathtree::TreeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTree {
    /// Root label.
    root: Option<String>,
    /// Children of every node. Leaves map to an empty vector.
    adjacency: BTreeMap<String, Vec<String>>,
    /// Parent of every node except the root.
    parents: BTreeMap<String, String>,
    /// Delimiter used by [`NameTree::append_all`].
    delimiter: Delimiter,
    /// Whether every conflict is raised.
    always_raise: bool,
}

impl NameTree {
    /// Creates an empty tree with the default configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tree with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidDelimiter`] if the delimiter is empty.
    pub fn with_config(config: TreeConfig) -> Result<Self, TreeError> {
        if config.delimiter.is_empty() {
            return Err(TreeError::InvalidDelimiter {
                delimiter: config.delimiter,
            });
        }
        let mut tree = Self {
            root: None,
            adjacency: BTreeMap::new(),
            parents: BTreeMap::new(),
            delimiter: Delimiter::new(config.delimiter),
            always_raise: config.always_raise,
        };
        if config.default_root {
            tree.set_root(DEFAULT_ROOT_LABEL);
        }
        Ok(tree)
    }

    /// Returns the root label.
    #[inline]
    #[must_use]
    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    /// Returns the number of nodes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns true if the tree has no nodes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the adjacency map: every label with its sorted children.
    #[inline]
    #[must_use]
    pub fn adjacency(&self) -> &BTreeMap<String, Vec<String>> {
        &self.adjacency
    }

    /// Returns the delimiter.
    #[inline]
    #[must_use]
    pub fn delimiter(&self) -> &Delimiter {
        &self.delimiter
    }

    /// Changes the delimiter, replacing the old one in every stored label.
    ///
    /// # Errors
    ///
    /// * [`TreeError::InvalidDelimiter`] if the delimiter is empty.
    /// * [`TreeError::DuplicateNode`] if two labels become the same.
    ///
    /// The tree is unchanged on error.
    pub fn set_delimiter(&mut self, delimiter: &str) -> Result<(), TreeError> {
        if delimiter.is_empty() {
            return Err(TreeError::InvalidDelimiter {
                delimiter: delimiter.into(),
            });
        }
        if delimiter == self.delimiter.as_str() {
            return Ok(());
        }
        let old = self.delimiter.as_str();
        let rename = |label: &String| label.replace(old, delimiter);

        let mut adjacency = BTreeMap::new();
        for (label, children) in &self.adjacency {
            let label = rename(label);
            let mut children: Vec<String> = children.iter().map(rename).collect();
            children.sort_unstable();
            if adjacency.insert(label.clone(), children).is_some() {
                return Err(TreeError::DuplicateNode { label });
            }
        }
        let parents: BTreeMap<String, String> = self
            .parents
            .iter()
            .map(|(child, parent)| (rename(child), rename(parent)))
            .collect();
        let root = self.root.as_ref().map(rename);

        debug!("delimiter changed from {:?} to {:?}", old, delimiter);
        self.adjacency = adjacency;
        self.parents = parents;
        self.root = root;
        self.delimiter = Delimiter::new(delimiter);
        Ok(())
    }

    /// Returns whether every conflict is raised regardless of [`OnConflict`].
    #[inline]
    #[must_use]
    pub fn raise_error_mode(&self) -> bool {
        self.always_raise
    }

    /// Sets whether every conflict is raised regardless of [`OnConflict`].
    #[inline]
    pub fn set_raise_error_mode(&mut self, always_raise: bool) {
        self.always_raise = always_raise;
    }

    /// Returns the policy for a call.
    #[inline]
    fn policy(&self, on_conflict: OnConflict) -> ErrorPolicy {
        ErrorPolicy::new(self.always_raise, on_conflict)
    }

    /// Returns the label if it is in the tree.
    #[inline]
    #[must_use]
    pub fn search(&self, label: &str) -> Option<&str> {
        self.adjacency
            .get_key_value(label)
            .map(|(label, _)| label.as_str())
    }

    /// Returns true if the label is in the tree.
    #[inline]
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.adjacency.contains_key(label)
    }

    /// Returns the sorted children of the node.
    ///
    /// Returns `None` if the label is not in the tree, and an empty slice for a leaf.
    #[inline]
    #[must_use]
    pub fn children(&self, label: &str) -> Option<&[String]> {
        self.adjacency.get(label).map(Vec::as_slice)
    }

    /// Returns the parent of the node.
    ///
    /// Returns `None` if the label is not in the tree or is the root.
    #[inline]
    #[must_use]
    pub fn parent(&self, label: &str) -> Option<&str> {
        self.parents.get(label).map(String::as_str)
    }

    /// Inserts a node.
    ///
    /// * If the tree is empty and `parent` is `None`, `label` becomes the root.
    /// * If the tree is empty and `parent` is given, the parent becomes the
    ///   root and `label` its only child.
    /// * Otherwise `label` becomes a child of `parent`, placed in order
    ///   among its siblings.
    ///
    /// # Errors
    ///
    /// When `on_conflict` is [`OnConflict::Raise`] or the tree always raises:
    ///
    /// * [`TreeError::ParentRequired`] if `parent` is `None` while a root exists.
    /// * [`TreeError::DuplicateNode`] if `label` is already in the tree.
    /// * [`TreeError::NodeNotFound`] if `parent` is not in the tree.
    /// * [`TreeError::InvalidLabel`] if `label` is empty.
    ///
    /// Otherwise the conflict leaves the tree unchanged and `Ok(())` is returned.
    pub fn append(
        &mut self,
        label: &str,
        parent: Option<&str>,
        on_conflict: OnConflict,
    ) -> Result<(), TreeError> {
        let policy = self.policy(on_conflict);
        policy.apply(self.append_node(label, parent), ())
    }

    /// Inserts a node, returning every conflict as an error.
    ///
    /// # Errors
    ///
    /// See [`NameTree::append`].
    #[inline]
    pub fn try_append(&mut self, label: &str, parent: Option<&str>) -> Result<(), TreeError> {
        self.append(label, parent, OnConflict::Raise)
    }

    /// Inserts a node, or fails without touching the tree.
    fn append_node(&mut self, label: &str, parent: Option<&str>) -> Result<(), TreeError> {
        if label.is_empty() {
            return Err(TreeError::InvalidLabel {
                label: label.into(),
            });
        }
        if self.root.is_none() {
            match parent {
                None => self.set_root(label),
                Some(parent) if parent == label => {
                    return Err(TreeError::DuplicateNode {
                        label: label.into(),
                    });
                }
                Some(parent) => {
                    self.set_root(parent);
                    self.link(parent, label);
                }
            }
            return Ok(());
        }

        let parent = parent.ok_or(TreeError::ParentRequired)?;
        if self.contains(label) {
            return Err(TreeError::DuplicateNode {
                label: label.into(),
            });
        }
        if !self.contains(parent) {
            return Err(TreeError::not_found(parent));
        }
        self.link(parent, label);
        Ok(())
    }

    /// Makes the label the root of an empty tree.
    fn set_root(&mut self, label: &str) {
        debug_assert!(self.is_empty(), "[precondition] the tree must be empty");
        debug!("root `{}` created", label);
        self.root = Some(label.into());
        self.adjacency.insert(label.into(), Vec::new());
    }

    /// Registers a new leaf under an existing parent.
    fn link(&mut self, parent: &str, label: &str) {
        let siblings = self
            .adjacency
            .get_mut(parent)
            .expect("[precondition] the parent must be in the tree");
        insert_sorted(siblings, label);
        self.adjacency.insert(label.into(), Vec::new());
        self.parents.insert(label.into(), parent.into());
        trace!("`{}` appended under `{}`", label, parent);
    }

    /// Rebuilds the tree structure from delimiter-joined paths.
    ///
    /// The order of the paths does not matter, and a path may describe any
    /// part of a chain (`"a.b"` and `"b.c"` together describe `a.b.c`).
    /// The labels which never appear as a child are the top nodes:
    ///
    /// * On an empty tree, there must be exactly one, and it becomes the root.
    /// * On a non-empty tree, every top node must already exist and receives
    ///   its new descendants.
    ///
    /// Edges already present are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathtree::{NameTree, OnConflict};
    ///
    /// let mut tree = NameTree::new();
    /// tree.append_all(&["r.x.y", "x.z", "r.w"], OnConflict::Raise)?;
    /// assert_eq!(tree.root(), Some("r"));
    /// assert_eq!(tree.parent("z"), Some("x"));
    /// assert_eq!(tree.len(), 5);
    /// # Ok::<_, pathtree::TreeError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// When raising:
    ///
    /// * [`TreeError::NodeNotFound`] if no root can be determined for an empty tree.
    /// * [`TreeError::RootNotUnique`] if the paths have several top nodes and
    ///   the tree is empty.
    /// * Any error of [`NameTree::append`] for an individual edge.
    pub fn append_all<I, S>(&mut self, paths: I, on_conflict: OnConflict) -> Result<(), TreeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let policy = self.policy(on_conflict);

        let mut local: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut has_parent: BTreeSet<String> = BTreeSet::new();
        for path in paths {
            let labels = self.delimiter.segments(path.as_ref());
            for &label in &labels {
                local.entry(label.into()).or_default();
            }
            for pair in labels.windows(2) {
                let children = local
                    .get_mut(pair[0])
                    .expect("[consistency] every label has been registered");
                if !children.iter().any(|c| c == pair[1]) {
                    children.push(pair[1].into());
                }
                has_parent.insert(pair[1].into());
            }
        }
        if local.is_empty() {
            return Ok(());
        }
        let tops: Vec<String> = local
            .keys()
            .filter(|label| !has_parent.contains(*label))
            .cloned()
            .collect();

        let starts = if self.is_empty() {
            if tops.len() > 1 {
                return policy.report(TreeError::RootNotUnique {
                    existing: tops[0].clone(),
                    found: tops[1].clone(),
                });
            }
            // Every label has a parent: the input is cyclic.
            let root = match tops.into_iter().next() {
                Some(v) => v,
                None => return policy.report(TreeError::not_found("root")),
            };
            if let Err(e) = self.append_node(&root, None) {
                return policy.report(e);
            }
            alloc::vec![root]
        } else {
            tops
        };

        let mut visited: BTreeSet<String> = BTreeSet::new();
        let mut stack: Vec<String> = starts;
        while let Some(node) = stack.pop() {
            if !visited.insert(node.clone()) {
                continue;
            }
            let children = match local.get(&node) {
                Some(v) => v,
                None => continue,
            };
            for child in children {
                if self.parent(child) != Some(node.as_str()) {
                    policy.apply(self.append_node(child, Some(&node)), ())?;
                }
                stack.push(child.clone());
            }
        }
        debug!("bulk load finished with {} nodes", self.len());

        Ok(())
    }

    /// Removes the node, handling its children according to `mode`.
    ///
    /// * [`RemoveMode::RemoveAll`]: the whole subtree is removed.
    /// * [`RemoveMode::RemoveOne`]: the children are handed to the parent.
    ///   The root is never removed this way.
    /// * [`RemoveMode::DontRemove`]: the node is removed only if it is a leaf.
    ///
    /// Returns true if something was removed.
    ///
    /// ```text
    /// Before `remove("1", RemoveOne)`:
    ///
    /// root
    /// ├ 0
    /// ├ 1
    /// │ ├ 1-0
    /// │ └ 1-1
    /// └ 2
    ///
    /// After:
    ///
    /// root
    /// ├ 0
    /// ├ 1-0
    /// ├ 1-1
    /// └ 2
    /// ```
    pub fn remove(&mut self, label: &str, mode: RemoveMode) -> bool {
        let children_count = match self.adjacency.get(label) {
            Some(v) => v.len(),
            None => return false,
        };
        let parent = self.parents.get(label).cloned();

        match mode {
            RemoveMode::RemoveAll => {
                let doomed = hierarchy::breadth_first(self, label);
                for (_, key) in &doomed {
                    self.adjacency.remove(key);
                    self.parents.remove(key);
                }
                match parent {
                    Some(parent) => self.unlink(&parent, label),
                    None => self.root = None,
                }
                debug!("removed `{}` with {} nodes in total", label, doomed.len());
            }
            RemoveMode::RemoveOne => {
                let parent = match parent {
                    Some(v) => v,
                    // The root has nobody to hand its children to.
                    None => return false,
                };
                let children = self.adjacency.remove(label).unwrap_or_default();
                self.parents.remove(label);
                let siblings = self
                    .adjacency
                    .get_mut(&parent)
                    .expect("[consistency] the parent must be in the tree");
                siblings.retain(|s| s != label);
                for child in children {
                    self.parents.insert(child.clone(), parent.clone());
                    siblings.push(child);
                }
                siblings.sort_unstable();
                debug!("removed `{}`, children moved to `{}`", label, parent);
            }
            RemoveMode::DontRemove => {
                if children_count != 0 {
                    return false;
                }
                self.adjacency.remove(label);
                match parent {
                    Some(parent) => {
                        self.parents.remove(label);
                        self.unlink(&parent, label);
                    }
                    None => self.root = None,
                }
                debug!("removed leaf `{}`", label);
            }
        }

        true
    }

    /// Detaches the child label from the parent's children.
    fn unlink(&mut self, parent: &str, label: &str) {
        if let Some(siblings) = self.adjacency.get_mut(parent) {
            siblings.retain(|s| s != label);
        }
    }

    /// Renames a node, keeping its children and its parent.
    ///
    /// # Errors
    ///
    /// When raising:
    ///
    /// * [`TreeError::NodeNotFound`] if `old` is not in the tree.
    /// * [`TreeError::DuplicateNode`] if `new` is already in the tree.
    /// * [`TreeError::InvalidLabel`] if `new` is empty.
    ///
    /// Otherwise `Ok(false)` is returned on conflict.
    pub fn replace(
        &mut self,
        old: &str,
        new: &str,
        on_conflict: OnConflict,
    ) -> Result<bool, TreeError> {
        let policy = self.policy(on_conflict);
        policy.apply(self.rename(old, new).map(|()| true), false)
    }

    /// Renames a node, or fails without touching the tree.
    fn rename(&mut self, old: &str, new: &str) -> Result<(), TreeError> {
        if !self.contains(old) {
            return Err(TreeError::not_found(old));
        }
        if new.is_empty() {
            return Err(TreeError::InvalidLabel { label: new.into() });
        }
        if self.contains(new) {
            return Err(TreeError::DuplicateNode { label: new.into() });
        }

        let children = self.adjacency.remove(old).unwrap_or_default();
        for child in &children {
            self.parents.insert(child.clone(), new.into());
        }
        self.adjacency.insert(new.into(), children);
        match self.parents.remove(old) {
            Some(parent) => {
                let siblings = self
                    .adjacency
                    .get_mut(&parent)
                    .expect("[consistency] the parent must be in the tree");
                siblings.retain(|s| s != old);
                insert_sorted(siblings, new);
                self.parents.insert(new.into(), parent);
            }
            None => self.root = Some(new.into()),
        }
        debug!("`{}` renamed to `{}`", old, new);
        Ok(())
    }

    /// Removes every node and resets the raise mode.
    pub fn clear(&mut self) {
        self.root = None;
        self.adjacency.clear();
        self.parents.clear();
        self.always_raise = false;
    }

    /// Returns `(depth, label)` of every node in level order.
    ///
    /// The root has depth 0.
    #[must_use]
    pub fn breadth_first(&self) -> Vec<(usize, String)> {
        match self.root() {
            Some(root) => hierarchy::breadth_first(self, root),
            None => Vec::new(),
        }
    }

    /// Returns a printable diagram of the tree.
    #[inline]
    #[must_use]
    pub fn diagram(&self) -> TreeDiagram<'_> {
        TreeDiagram::new(self)
    }

    /// Renders the tree as a box-drawing diagram.
    ///
    /// See [`TreeDiagram`] for the format.
    #[must_use]
    pub fn tree_structure(&self) -> String {
        self.diagram().to_string()
    }
}

impl Default for NameTree {
    fn default() -> Self {
        Self::with_config(TreeConfig::default())
            .expect("[validity] the default delimiter is not empty")
    }
}

impl Hierarchy for NameTree {
    fn root_key(&self) -> Option<&str> {
        self.root()
    }

    fn child_keys(&self, key: &str) -> Vec<String> {
        self.adjacency.get(key).cloned().unwrap_or_default()
    }

    fn label<'a>(&self, key: &'a str) -> &'a str {
        key
    }
}

impl fmt::Display for NameTree {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.diagram(), f)
    }
}

/// Inserts the label into a sorted list, keeping it sorted.
pub(crate) fn insert_sorted(list: &mut Vec<String>, label: &str) {
    if let Err(pos) = list.binary_search_by(|v| v.as_str().cmp(label)) {
        list.insert(pos, label.into());
    }
}
