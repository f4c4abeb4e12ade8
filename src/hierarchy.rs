//! Hierarchy view shared by the trees, and traversals over it.

use alloc::string::String;
use alloc::vec::Vec;

use crate::queue::DoubleStackQueue;

/// Read-only view of a tree as keys linked to child keys.
///
/// A key identifies a node: the label for a name tree, the absolute path for
/// a path tree.
pub(crate) trait Hierarchy {
    /// Returns the key of the root.
    fn root_key(&self) -> Option<&str>;

    /// Returns the keys of the children, in ascending order.
    ///
    /// Returns an empty vector for a leaf or an unknown key.
    fn child_keys(&self, key: &str) -> Vec<String>;

    /// Returns the text printed for the node.
    fn label<'a>(&self, key: &'a str) -> &'a str;
}

/// Returns `(depth, key)` of every node under `top`, breadth-first.
///
/// The top node has depth 0 and comes first. Siblings keep their ascending order.
pub(crate) fn breadth_first<H: Hierarchy + ?Sized>(hier: &H, top: &str) -> Vec<(usize, String)> {
    let mut nodes = Vec::new();
    let mut queue = DoubleStackQueue::new();
    queue
        .enqueue((0, String::from(top)))
        .expect("[consistency] unbounded queue never overflows");
    while let Some((depth, key)) = queue.dequeue() {
        for child in hier.child_keys(&key) {
            queue
                .enqueue((depth + 1, child))
                .expect("[consistency] unbounded queue never overflows");
        }
        nodes.push((depth, key));
    }
    nodes
}
