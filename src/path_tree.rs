//! Tree addressed by absolute paths.

mod bulk;
mod remove;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::{fmt, slice};

use log::{debug, trace};

use crate::anchor::{NodeRef, OnConflict, SortMode};
use crate::config::{TreeConfig, DEFAULT_ROOT_LABEL};
use crate::error::{ErrorPolicy, TreeError};
use crate::hierarchy::{self, Hierarchy};
use crate::name_tree::insert_sorted;
use crate::order::{self, sort_length_order};
use crate::path::Delimiter;
use crate::render::TreeDiagram;

/// Paths resolved from a [`NodeRef`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matches {
    /// The absolute path given as [`NodeRef::Path`].
    Single(String),
    /// Every path ending with the [`NodeRef::Name`], sorted. Never empty.
    Many(Vec<String>),
}

impl Matches {
    /// Returns the matched paths.
    #[must_use]
    pub fn paths(&self) -> &[String] {
        match self {
            Self::Single(path) => slice::from_ref(path),
            Self::Many(paths) => paths,
        }
    }

    /// Converts into the matched paths.
    #[must_use]
    pub fn into_paths(self) -> Vec<String> {
        match self {
            Self::Single(path) => alloc::vec![path],
            Self::Many(paths) => paths,
        }
    }
}

/// Children of the node(s) addressed by a [`NodeRef`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Children {
    /// Child labels of the node at the given path.
    Single(Vec<String>),
    /// Child labels of every node carrying the given name, by path.
    Many(BTreeMap<String, Vec<String>>),
}

/// Parents of the node(s) addressed by a [`NodeRef`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parents {
    /// Path of the parent of the node at the given path.
    Single(String),
    /// Path of the parent of every node carrying the given name.
    ///
    /// The root has no parent and is represented by an empty string.
    Many(Vec<String>),
}

/// Tree whose nodes are identified by their absolute paths.
///
/// The same label may appear at many places as long as the absolute paths
/// differ. Children of a node are kept in ascending order.
///
/// Operations take a [`NodeRef`]: a [`NodeRef::Path`] addresses a single
/// node, while a [`NodeRef::Name`] addresses every node with that label.
///
/// # Examples
///
/// ```
/// use pathtree::path_tree::Parents;
/// use pathtree::{NodeRef, OnConflict, PathTree};
///
/// let mut tree = PathTree::new();
/// tree.append_all(&["a.b.c", "a.d.c"], OnConflict::Raise)?;
///
/// // Appending under a name appends under every node with that name.
/// tree.append("x", Some(&NodeRef::name("c")), OnConflict::Raise)?;
/// assert_eq!(
///     tree.parent(&NodeRef::name("x")),
///     Some(Parents::Many(vec!["a.b.c".into(), "a.d.c".into()]))
/// );
///
/// println!("{}", tree);
/// // a
/// // ├ b
/// // │ └ c
/// // │   └ x
/// // └ d
/// //   └ c
/// //     └ x
/// # Ok::<_, pathtree::TreeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTree {
    /// Root label, which is also the path of the root.
    root: Option<String>,
    /// Child labels of every node, keyed by absolute path.
    adjacency: BTreeMap<String, Vec<String>>,
    /// Delimiter of the paths.
    delimiter: Delimiter,
    /// Whether every conflict is raised.
    always_raise: bool,
}

impl PathTree {
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
    /// Returns [`TreeError::InvalidDelimiter`] if the delimiter is empty, or
    /// appears in the default root label.
    pub fn with_config(config: TreeConfig) -> Result<Self, TreeError> {
        let delimiter = Delimiter::new(config.delimiter);
        if delimiter.as_str().is_empty()
            || (config.default_root && !delimiter.is_valid_label(DEFAULT_ROOT_LABEL))
        {
            return Err(TreeError::InvalidDelimiter {
                delimiter: delimiter.as_str().into(),
            });
        }
        let mut tree = Self {
            root: None,
            adjacency: BTreeMap::new(),
            delimiter,
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

    /// Returns the adjacency map: every absolute path with its sorted child labels.
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

    /// Changes the delimiter and rewrites every path with it.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidDelimiter`] if the delimiter is empty or
    /// the rewritten paths would no longer split into the same labels (for
    /// example when a label contains the new delimiter). The tree is
    /// unchanged on error.
    pub fn set_delimiter(&mut self, delimiter: &str) -> Result<(), TreeError> {
        let invalid = || TreeError::InvalidDelimiter {
            delimiter: delimiter.into(),
        };
        if delimiter.is_empty() {
            return Err(invalid());
        }
        let new = Delimiter::new(delimiter);
        let mut adjacency = BTreeMap::new();
        for (path, children) in &self.adjacency {
            let labels = self.delimiter.segments(path);
            let new_path = new.join(&labels);
            if new.segments(&new_path) != labels
                || children.iter().any(|c| !new.is_valid_label(c))
            {
                return Err(invalid());
            }
            adjacency.insert(new_path, children.clone());
        }
        debug!(
            "delimiter changed from {:?} to {:?}",
            self.delimiter.as_str(),
            delimiter
        );
        self.adjacency = adjacency;
        self.delimiter = new;
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

    /// Classifies the string as a name or a path with this tree's delimiter.
    #[inline]
    #[must_use]
    pub fn node_ref(&self, s: &str) -> NodeRef {
        NodeRef::classify(s, &self.delimiter)
    }

    /// Returns true if the absolute path is in the tree.
    #[inline]
    #[must_use]
    pub fn contains_path(&self, path: &str) -> bool {
        self.adjacency.contains_key(path)
    }

    /// Returns true if the path is the root.
    #[inline]
    fn is_root(&self, path: &str) -> bool {
        self.root.as_deref() == Some(path)
    }

    /// Returns the sorted paths of every node labeled `name`.
    fn paths_named(&self, name: &str) -> Vec<String> {
        self.adjacency
            .keys()
            .filter(|path| self.delimiter.basename(path) == name)
            .cloned()
            .collect()
    }

    /// Returns the paths the target stands for. Empty if there is none.
    fn resolve(&self, target: &NodeRef) -> Vec<String> {
        match target {
            NodeRef::Path(path) if self.contains_path(path) => alloc::vec![path.clone()],
            NodeRef::Path(_) => Vec::new(),
            NodeRef::Name(name) => self.paths_named(name),
        }
    }

    /// Returns the resolved paths, the longest first.
    ///
    /// Processing in this order, a change to a path never affects the
    /// paths still pending, since those are never longer.
    fn resolve_deepest_first(&self, target: &NodeRef) -> Vec<String> {
        sort_length_order(self.resolve(target), false)
    }

    /// Looks up the target.
    ///
    /// A path is returned as is if present. A name yields every path ending
    /// with it, sorted.
    ///
    /// ```
    /// use pathtree::path_tree::Matches;
    /// use pathtree::{NodeRef, OnConflict, PathTree};
    ///
    /// let mut tree = PathTree::new();
    /// tree.append_all(&["a.a.b", "a.b.c"], OnConflict::Raise)?;
    ///
    /// assert_eq!(
    ///     tree.search(&NodeRef::name("a")),
    ///     Some(Matches::Many(vec!["a".into(), "a.a".into()]))
    /// );
    /// assert_eq!(
    ///     tree.search(&NodeRef::path("a.b.c")),
    ///     Some(Matches::Single("a.b.c".into()))
    /// );
    /// assert_eq!(tree.search(&NodeRef::path("a.c")), None);
    /// # Ok::<_, pathtree::TreeError>(())
    /// ```
    #[must_use]
    pub fn search(&self, target: &NodeRef) -> Option<Matches> {
        match target {
            NodeRef::Path(path) => self
                .contains_path(path)
                .then(|| Matches::Single(path.clone())),
            NodeRef::Name(name) => {
                let paths = self.paths_named(name);
                (!paths.is_empty()).then_some(Matches::Many(paths))
            }
        }
    }

    /// Returns the child labels of the target.
    ///
    /// Returns `None` if nothing matches. A leaf has no children.
    #[must_use]
    pub fn children(&self, target: &NodeRef) -> Option<Children> {
        match target {
            NodeRef::Path(path) => self.adjacency.get(path).cloned().map(Children::Single),
            NodeRef::Name(name) => {
                let children: BTreeMap<String, Vec<String>> = self
                    .adjacency
                    .iter()
                    .filter(|(path, _)| self.delimiter.basename(path) == name)
                    .map(|(path, children)| (path.clone(), children.clone()))
                    .collect();
                (!children.is_empty()).then_some(Children::Many(children))
            }
        }
    }

    /// Returns the parent path of the target.
    ///
    /// Returns `None` if nothing matches, or if the path of the root is given.
    #[must_use]
    pub fn parent(&self, target: &NodeRef) -> Option<Parents> {
        match target {
            NodeRef::Path(path) => {
                if !self.contains_path(path) || self.is_root(path) {
                    return None;
                }
                Some(Parents::Single(self.delimiter.dirname(path).into()))
            }
            NodeRef::Name(name) => {
                let parents: Vec<String> = self
                    .paths_named(name)
                    .iter()
                    .map(|path| self.delimiter.dirname(path).into())
                    .collect();
                (!parents.is_empty()).then_some(Parents::Many(parents))
            }
        }
    }

    /// Inserts a node under the target.
    ///
    /// * If the tree is empty and `parent` is `None` or a path, `label`
    ///   becomes the root.
    /// * If the tree is empty and `parent` is a name, that name becomes the
    ///   root and `label` its only child.
    /// * Otherwise `label` is inserted under every node `parent` resolves to.
    ///
    /// # Errors
    ///
    /// When `on_conflict` is [`OnConflict::Raise`] or the tree always raises:
    ///
    /// * [`TreeError::ParentRequired`] if `parent` is `None` while a root exists.
    /// * [`TreeError::NodeNotFound`] if `parent` matches nothing.
    /// * [`TreeError::PathAlreadyExists`] if a resulting path exists. The
    ///   insertions under the parents before the conflicting one are kept.
    /// * [`TreeError::InvalidLabel`] if `label` is empty or contains the delimiter.
    ///
    /// When ignoring, each conflicting parent is skipped and the others
    /// still receive the node.
    pub fn append(
        &mut self,
        label: &str,
        parent: Option<&NodeRef>,
        on_conflict: OnConflict,
    ) -> Result<(), TreeError> {
        let policy = self.policy(on_conflict);
        if !self.delimiter.is_valid_label(label) {
            return policy.report(TreeError::InvalidLabel {
                label: label.into(),
            });
        }

        if self.is_empty() {
            match parent {
                None | Some(NodeRef::Path(_)) => self.set_root(label),
                Some(NodeRef::Name(parent)) => {
                    if !self.delimiter.is_valid_label(parent) {
                        return policy.report(TreeError::InvalidLabel {
                            label: parent.clone(),
                        });
                    }
                    self.set_root(parent);
                    self.link(parent, label);
                }
            }
            return Ok(());
        }

        let parent = match parent {
            Some(v) => v,
            None => return policy.report(TreeError::ParentRequired),
        };
        let parents = self.resolve(parent);
        if parents.is_empty() {
            return policy.report(TreeError::not_found(parent.as_str()));
        }
        for parent in parents {
            let path = self.delimiter.combine(&parent, label);
            if self.contains_path(&path) {
                policy.report(TreeError::PathAlreadyExists { path })?;
                continue;
            }
            self.link(&parent, label);
        }

        Ok(())
    }

    /// Inserts a node, returning every conflict as an error.
    ///
    /// # Errors
    ///
    /// See [`PathTree::append`].
    #[inline]
    pub fn try_append(&mut self, label: &str, parent: Option<&NodeRef>) -> Result<(), TreeError> {
        self.append(label, parent, OnConflict::Raise)
    }

    /// Makes the label the root of an empty tree.
    fn set_root(&mut self, label: &str) {
        debug_assert!(self.is_empty(), "[precondition] the tree must be empty");
        debug!("root `{}` created", label);
        self.root = Some(label.into());
        self.adjacency.insert(label.into(), Vec::new());
    }

    /// Registers a new leaf `label` under the existing path `parent`.
    fn link(&mut self, parent: &str, label: &str) {
        let siblings = self
            .adjacency
            .get_mut(parent)
            .expect("[precondition] the parent must be in the tree");
        insert_sorted(siblings, label);
        let path = self.delimiter.combine(parent, label);
        trace!("`{}` appended", path);
        self.adjacency.insert(path, Vec::new());
    }

    /// Renames every node the target resolves to.
    ///
    /// The renamed nodes keep their children, and every descendant path is
    /// rewritten under the new name.
    ///
    /// Returns `Ok(true)` if at least one node was renamed.
    ///
    /// ```
    /// use pathtree::path_tree::Children;
    /// use pathtree::{NodeRef, OnConflict, PathTree};
    ///
    /// let mut tree = PathTree::new();
    /// tree.append_all(&["a.b.c", "a.d.c"], OnConflict::Raise)?;
    /// assert!(tree.replace(&NodeRef::name("c"), "e", OnConflict::Raise)?);
    /// assert_eq!(
    ///     tree.children(&NodeRef::path("a.b")),
    ///     Some(Children::Single(vec!["e".into()]))
    /// );
    /// # Ok::<_, pathtree::TreeError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// When raising:
    ///
    /// * [`TreeError::NodeNotFound`] if the target matches nothing.
    /// * [`TreeError::PathAlreadyExists`] if a sibling already has the new name.
    /// * [`TreeError::InvalidLabel`] if `new` is empty or contains the delimiter.
    ///
    /// When ignoring, each conflicting node is left as is.
    pub fn replace(
        &mut self,
        target: &NodeRef,
        new: &str,
        on_conflict: OnConflict,
    ) -> Result<bool, TreeError> {
        let policy = self.policy(on_conflict);
        if !self.delimiter.is_valid_label(new) {
            return policy.apply(Err(TreeError::InvalidLabel { label: new.into() }), false);
        }
        let olds = self.resolve_deepest_first(target);
        if olds.is_empty() {
            return policy.apply(Err(TreeError::not_found(target.as_str())), false);
        }

        let mut renamed = false;
        for old in olds {
            if !self.contains_path(&old) {
                continue;
            }
            let parent = (!self.is_root(&old)).then(|| self.delimiter.dirname(&old).to_string());
            let new_path = self.delimiter.combine_under(parent.as_deref(), new);
            if self.contains_path(&new_path) {
                policy.report(TreeError::PathAlreadyExists { path: new_path })?;
                continue;
            }

            self.move_subtree(&old, &new_path);
            match parent {
                Some(parent) => {
                    let siblings = self
                        .adjacency
                        .get_mut(&parent)
                        .expect("[consistency] the parent must be in the tree");
                    let old_label = self.delimiter.basename(&old);
                    siblings.retain(|s| s != old_label);
                    insert_sorted(siblings, new);
                }
                None => self.root = Some(new.into()),
            }
            debug!("`{}` renamed to `{}`", old, new_path);
            renamed = true;
        }

        Ok(renamed)
    }

    /// Rekeys the node at `from` and all its descendants under `to`.
    ///
    /// `to` must be a free path.
    fn move_subtree(&mut self, from: &str, to: &str) {
        let moved: Vec<String> = self
            .adjacency
            .keys()
            .filter(|path| self.delimiter.starts_with_path(path, from))
            .cloned()
            .collect();
        for path in moved {
            let children = self
                .adjacency
                .remove(&path)
                .expect("[consistency] the path has just been listed");
            let mut new_path = String::with_capacity(to.len() + path.len() - from.len());
            new_path.push_str(to);
            new_path.push_str(&path[from.len()..]);
            self.adjacency.insert(new_path, children);
        }
    }

    /// Returns the absolute paths of every leaf.
    ///
    /// [`SortMode::Length`] orders by the number of characters; ties are
    /// ordered lexicographically in both directions.
    ///
    /// ```
    /// use pathtree::{OnConflict, PathTree, SortMode};
    ///
    /// let mut tree = PathTree::new();
    /// tree.append_all(&["r.aaa", "r.b.c", "r.dd"], OnConflict::Raise)?;
    /// assert_eq!(
    ///     tree.leaves(SortMode::Length, true),
    ///     ["r.dd", "r.aaa", "r.b.c"]
    /// );
    /// assert_eq!(
    ///     tree.leaves(SortMode::Alphabetical, false),
    ///     ["r.dd", "r.b.c", "r.aaa"]
    /// );
    /// # Ok::<_, pathtree::TreeError>(())
    /// ```
    #[must_use]
    pub fn leaves(&self, sort: SortMode, ascending: bool) -> Vec<String> {
        let mut leaves: Vec<String> = self
            .adjacency
            .iter()
            .filter(|(_, children)| children.is_empty())
            .map(|(path, _)| path.clone())
            .collect();
        order::sort_paths(&mut leaves, sort, ascending);
        leaves
    }

    /// Removes every node and resets the raise mode.
    pub fn clear(&mut self) {
        self.clear_nodes();
        self.always_raise = false;
    }

    /// Removes every node.
    fn clear_nodes(&mut self) {
        self.root = None;
        self.adjacency.clear();
    }

    /// Returns `(depth, path)` of every node in level order.
    ///
    /// The root has depth 0.
    #[must_use]
    pub fn breadth_first(&self) -> Vec<(usize, String)> {
        match self.root() {
            Some(root) => hierarchy::breadth_first(self, root),
            None => Vec::new(),
        }
    }

    /// Returns a printable diagram of the tree, showing labels only.
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

impl Default for PathTree {
    fn default() -> Self {
        Self::with_config(TreeConfig::default())
            .expect("[validity] the default delimiter is valid")
    }
}

impl Hierarchy for PathTree {
    fn root_key(&self) -> Option<&str> {
        self.root()
    }

    fn child_keys(&self, key: &str) -> Vec<String> {
        match self.adjacency.get(key) {
            Some(children) => children
                .iter()
                .map(|child| self.delimiter.combine(key, child))
                .collect(),
            None => Vec::new(),
        }
    }

    fn label<'a>(&self, key: &'a str) -> &'a str {
        self.delimiter.basename(key)
    }
}

impl fmt::Display for PathTree {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.diagram(), f)
    }
}
